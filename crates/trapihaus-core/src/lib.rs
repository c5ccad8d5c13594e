//! TrapiHaus Core Library
//!
//! Session gating for the TrapiHaus listing app.
//!
//! ## Overview
//!
//! The app has exactly one piece of state with rules attached: whether the
//! current user is signed in. That flag lives in a [`SessionGate`], which
//!
//! - loads the persisted flag once at startup ([`SessionGate::initialize`]),
//! - validates credentials through a pluggable [`CredentialValidator`],
//! - mirrors sign-in / sign-out into a [`KeyValueStore`],
//! - publishes [`SessionState`] changes to whoever renders routes.
//!
//! Route guards turn a [`SessionState`] into a [`RouteAccess`] decision via
//! [`RouteKind::access`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use trapihaus_core::{SessionConfig, SessionGate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gate = SessionGate::open(&SessionConfig::from_env())?;
//!
//!     let state = gate.initialize().await;
//!     if !state.signed_in {
//!         let outcome = gate.sign_in("admin", "admin").await;
//!         assert!(outcome.is_signed_in());
//!     }
//!
//!     gate.sign_out().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod logging;
pub mod session;
pub mod storage;

// Re-exports
pub use config::{default_data_dir, SessionConfig};
pub use credentials::{CredentialValidator, Credentials, FixedCredentials};
pub use error::{SessionError, SessionResult};
pub use guard::{Destination, RouteAccess, RouteKind};
pub use session::{Persistence, SessionGate, SessionPhase, SessionState, SignInOutcome};
pub use storage::{KeyValueStore, MemoryStore, RedbStore, SIGNED_IN_SENTINEL, STORAGE_KEY};
