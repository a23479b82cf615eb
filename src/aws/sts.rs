use std::{fmt, future::Future};

use aws_config::{
    Region, environment::region::EnvironmentVariableRegionProvider,
    imds::region::ImdsRegionProvider, meta::region::RegionProviderChain,
};
use aws_sdk_sts::{
    Client as StsClient,
    config::{BehaviorVersion, Config as StsConfig},
};
use tracing::{debug, info};

use super::Credentials;
use crate::{
    config::{ExportConfig, SharedConfig},
    constants::{DEFAULT_AWS_REGION, PROVIDER_NAME},
    error::ExportError,
};

/// Result of STS GetCallerIdentity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("unknown")
        }

        writeln!(f, "Account: {}", field(&self.account))?;
        writeln!(f, "Arn: {}", field(&self.arn))?;
        write!(f, "UserId: {}", field(&self.user_id))
    }
}

/// Check that credentials are accepted by AWS
pub trait VerifyIdentity {
    fn verify(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<CallerIdentity, ExportError>>;
}

/// Verifier calling STS GetCallerIdentity with the resolved credentials
#[derive(Debug, Clone)]
pub struct StsVerifier {
    region: Option<String>,
    shared_config: SharedConfig,
}

impl StsVerifier {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            region: config.region.clone(),
            shared_config: config.shared_config,
        }
    }

    /// Pick the STS region
    /// Priority: --region -> ENV vars -> Config file (when enabled) -> EC2 metadata -> DEFAULT_AWS_REGION
    async fn resolve_region(&self) -> Region {
        let explicit = self.region.clone().map(Region::new);
        let chain = match self.shared_config {
            SharedConfig::Enabled => RegionProviderChain::first_try(explicit).or_default_provider(),
            SharedConfig::Disabled => RegionProviderChain::first_try(explicit)
                .or_else(EnvironmentVariableRegionProvider::new())
                .or_else(ImdsRegionProvider::builder().build()),
        };

        match chain.region().await {
            Some(region) => {
                info!("Using region: {}", region);
                region
            }
            None => {
                info!(
                    "No region configured, using default {} for STS",
                    DEFAULT_AWS_REGION
                );
                Region::new(DEFAULT_AWS_REGION)
            }
        }
    }
}

impl VerifyIdentity for StsVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<CallerIdentity, ExportError> {
        info!("Calling AWS STS GetCallerIdentity");
        let region = self.resolve_region().await;

        let session_token =
            Some(credentials.session_token.clone()).filter(|token| !token.is_empty());
        let config = StsConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(aws_sdk_sts::config::Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                session_token,
                None,
                PROVIDER_NAME,
            ))
            .build();

        let client = StsClient::from_conf(config);

        let response = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| ExportError::IdentityVerification(Box::new(e)))?;

        let identity = CallerIdentity {
            account: response.account().map(str::to_string),
            arn: response.arn().map(str::to_string),
            user_id: response.user_id().map(str::to_string),
        };

        debug!("Caller identity: {:?}", identity);
        info!("AWS credentials verified");
        Ok(identity)
    }
}
