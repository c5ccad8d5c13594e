//! Page components for TrapiHaus.

mod forgot_password;
mod listing;
mod login;
mod register;
mod tabs;

pub use forgot_password::ForgotPassword;
pub use listing::{ListingDetail, NotFound, Reviews};
pub use login::Login;
pub use register::Register;
pub use tabs::{Bookings, Home, Profile, Saved, Search};
