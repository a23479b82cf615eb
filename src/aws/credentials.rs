use std::future::Future;

use aws_config::{
    default_provider::credentials::DefaultCredentialsChain, ecs::EcsCredentialsProvider,
    imds::credentials::ImdsCredentialsProvider, meta::credentials::CredentialsProviderChain,
};
use aws_credential_types::provider::ProvideCredentials;
use tracing::{debug, info};

use super::Credentials;
use crate::{config::SharedConfig, error::ExportError};

/// Source of AWS credentials
pub trait ResolveCredentials {
    fn resolve(
        &self,
        shared_config: SharedConfig,
    ) -> impl Future<Output = Result<Credentials, ExportError>>;
}

/// Resolver backed by the `aws-config` provider chains
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainResolver;

impl ResolveCredentials for ChainResolver {
    async fn resolve(&self, shared_config: SharedConfig) -> Result<Credentials, ExportError> {
        let loaded = match shared_config {
            SharedConfig::Enabled => {
                info!("Resolving credentials with the default provider chain");
                let chain = DefaultCredentialsChain::builder().build().await;
                chain.provide_credentials().await
            }
            SharedConfig::Disabled => {
                info!("Resolving credentials from container and instance metadata");
                let chain = metadata_chain();
                chain.provide_credentials().await
            }
        }
        .map_err(ExportError::CredentialResolution)?;

        let credentials = Credentials::from(loaded);
        debug!("Resolved credentials: {:?}", credentials);
        Ok(credentials)
    }
}

/// ECS container credentials, then EC2 instance metadata
fn metadata_chain() -> CredentialsProviderChain {
    CredentialsProviderChain::first_try("EcsContainer", EcsCredentialsProvider::builder().build())
        .or_else(
            "Ec2InstanceMetadata",
            ImdsCredentialsProvider::builder().build(),
        )
}
