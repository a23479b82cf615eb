use std::fmt;

use aws_smithy_types::{DateTime, date_time::Format};

pub mod credentials;
pub mod sts;

/// Resolved AWS credentials
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Empty for long-lived IAM user keys
    pub session_token: String,
    pub expiration: Option<DateTime>,
}

impl Credentials {
    pub fn expiration_display(&self) -> String {
        self.expiration
            .and_then(|expiration| expiration.fmt(Format::DateTime).ok())
            .unwrap_or_else(|| "never".to_string())
    }
}

impl From<aws_credential_types::Credentials> for Credentials {
    fn from(creds: aws_credential_types::Credentials) -> Self {
        Self {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().unwrap_or_default().to_string(),
            expiration: creds.expiry().map(DateTime::from),
        }
    }
}

// Secrets stay out of debug logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration_display())
            .finish()
    }
}

pub use credentials::{ChainResolver, ResolveCredentials};
pub use sts::{CallerIdentity, StsVerifier, VerifyIdentity};
