//! Credential validation.
//!
//! The gate never decides who may sign in; it asks a [`CredentialValidator`].
//! [`FixedCredentials`] is the only policy today: a single hardcoded
//! identifier/secret pair. A real identity provider plugs in behind the same
//! trait without touching the session state machine.

use std::fmt;

/// Identifier and secret as typed into a sign-in form.
#[derive(Clone)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Decides whether a set of credentials may sign in.
pub trait CredentialValidator: Send + Sync + 'static {
    fn validate(&self, credentials: &Credentials) -> bool;
}

/// Placeholder policy accepting exactly one identifier/secret pair.
///
/// Surrounding whitespace on the identifier is ignored; the secret must
/// match exactly.
#[derive(Clone, Debug)]
pub struct FixedCredentials {
    identifier: String,
    secret: String,
}

impl FixedCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// The demo account, `admin` / `admin`.
    pub fn admin() -> Self {
        Self::new("admin", "admin")
    }
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::admin()
    }
}

impl CredentialValidator for FixedCredentials {
    fn validate(&self, credentials: &Credentials) -> bool {
        credentials.identifier.trim() == self.identifier && credentials.secret == self.secret
    }
}

impl<F> CredentialValidator for F
where
    F: Fn(&Credentials) -> bool + Send + Sync + 'static,
{
    fn validate(&self, credentials: &Credentials) -> bool {
        self(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_accepted() {
        let policy = FixedCredentials::admin();
        assert!(policy.validate(&Credentials::new("admin", "admin")));
    }

    #[test]
    fn test_identifier_is_trimmed() {
        let policy = FixedCredentials::admin();
        assert!(policy.validate(&Credentials::new("  admin\t", "admin")));
        assert!(policy.validate(&Credentials::new("\nadmin \n", "admin")));
    }

    #[test]
    fn test_secret_is_not_trimmed() {
        let policy = FixedCredentials::admin();
        assert!(!policy.validate(&Credentials::new("admin", " admin")));
        assert!(!policy.validate(&Credentials::new("admin", "admin ")));
    }

    #[test]
    fn test_rejects_wrong_values() {
        let policy = FixedCredentials::admin();
        let cases = [
            ("admin", "wrong"),
            ("Admin", "admin"),
            ("admin", "ADMIN"),
            ("", ""),
            ("root", "admin"),
            ("ad min", "admin"),
        ];

        for (identifier, secret) in cases {
            assert!(
                !policy.validate(&Credentials::new(identifier, secret)),
                "{:?}/{:?} should be rejected",
                identifier,
                secret
            );
        }
    }

    #[test]
    fn test_closure_validator() {
        let allow_all = |_: &Credentials| true;
        assert!(allow_all.validate(&Credentials::new("anyone", "anything")));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("admin", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
