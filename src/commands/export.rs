use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info, warn};

use crate::{
    aws::{ChainResolver, ResolveCredentials, StsVerifier, VerifyIdentity},
    config::{ExportConfig, IdentityCheck, SharedConfig},
    env::{self, Environment, ProcessEnv},
    output::{self, ShellFlavor},
};

#[derive(Debug, Clone, Default, Args)]
pub struct ExportCommand {
    #[arg(
        long,
        env = "AWS_CRED_ENV_DISABLE_SHARED_CONFIG",
        help = "Disable shared configuration (force use of EC2/ECS metadata, ignore AWS_PROFILE, etc.)"
    )]
    pub disable_shared_config: bool,

    #[arg(
        long,
        help = "Keep AWS_ACCESS_KEY_ID and AWS_PROFILE set when shared configuration is disabled"
    )]
    pub keep_env: bool,

    #[arg(
        long,
        env = "AWS_CRED_ENV_VERIFY",
        help = "Verify the credentials with STS GetCallerIdentity before printing them"
    )]
    pub verify: bool,

    #[arg(
        long,
        env = "AWS_CRED_ENV_DISPLAY_CALLER_IDENTITY",
        help = "Display STS GetCallerIdentity output on stderr"
    )]
    pub display_caller_identity: bool,

    #[arg(long, env = "AWS_CRED_ENV_REGION", help = "AWS region for the STS call")]
    pub region: Option<String>,

    #[arg(
        long,
        value_enum,
        env = "AWS_CRED_ENV_SHELL",
        help = "Shell syntax for the exported variables [default: powershell on Windows, posix elsewhere]"
    )]
    pub shell: Option<ShellFlavor>,
}

impl ExportCommand {
    pub fn config(&self) -> ExportConfig {
        ExportConfig {
            shared_config: if self.disable_shared_config {
                SharedConfig::Disabled
            } else {
                SharedConfig::Enabled
            },
            clear_leaked_env: !self.keep_env,
            identity: IdentityCheck::from_flags(self.verify, self.display_caller_identity),
            region: self.region.clone(),
            shell: self.shell.unwrap_or_else(ShellFlavor::native),
        }
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.config();
        debug!("Export configuration: {:?}", config);

        let verifier = StsVerifier::new(&config);
        run(
            &config,
            &mut ProcessEnv,
            &ChainResolver,
            &verifier,
            &mut io::stdout(),
            &mut io::stderr(),
        )
        .await
    }
}

/// Bridge the environment, resolve, optionally verify, then print
///
/// `out` receives the assignment lines and nothing else; it is written once,
/// after every fallible step has succeeded.
pub async fn run<E, R, V>(
    config: &ExportConfig,
    env: &mut E,
    resolver: &R,
    verifier: &V,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()>
where
    E: Environment,
    R: ResolveCredentials,
    V: VerifyIdentity,
{
    if let Some(uri) = env::bridge_container_uri(env) {
        info!("Using container credentials URI: {}", uri);
    }

    if config.should_clear_env() {
        let cleared = env::clear_shared_config_vars(env);
        if !cleared.is_empty() {
            warn!(
                "Shared configuration disabled, ignoring {}",
                cleared.join(", ")
            );
        }
    }

    let credentials = resolver.resolve(config.shared_config).await?;
    info!(
        "Resolved credentials for {} (expires: {})",
        credentials.access_key_id,
        credentials.expiration_display()
    );

    if config.identity.is_requested() {
        let identity = verifier.verify(&credentials).await?;
        if config.identity == IdentityCheck::Display {
            writeln!(err, "STS Get-Caller-Identity:\n{identity}")
                .context("Failed to write caller identity")?;
        }
    }

    out.write_all(output::render(&credentials, config.shell).as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write credentials to stdout")?;

    Ok(())
}
