//! Shared UI components.

mod guard;
mod social_auth_row;
mod tab_bar;

pub use guard::{GuestOnly, RequireSession};
pub use social_auth_row::SocialAuthRow;
pub use tab_bar::TabBar;
