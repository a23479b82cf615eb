use aws_credential_types::provider::error::CredentialsError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that end an export run
#[derive(Debug, Error)]
pub enum ExportError {
    /// No usable credential source, a malformed shared config file or an
    /// unreachable metadata endpoint
    #[error("failed to resolve AWS credentials")]
    CredentialResolution(#[source] CredentialsError),

    /// The STS caller identity check failed
    #[error("failed to verify AWS credentials with STS GetCallerIdentity")]
    IdentityVerification(#[source] BoxError),
}
