/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Provider name attached to credentials handed to the STS client
pub const PROVIDER_NAME: &str = "aws-cred-env";

/// Exported variable holding the access key id
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// Exported variable holding the secret access key
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Exported variable holding the session token
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Profile selector read by the shared config loader
pub const AWS_PROFILE: &str = "AWS_PROFILE";

/// Non-standard name some tooling uses for the container credentials URI
/// (see hashicorp/aws-sdk-go-base#20)
pub const AWS_CRED_CONTAINER_RELATIVE_URI: &str = "AWS_CRED_CONTAINER_RELATIVE_URI";

/// Container credentials URI read by the ECS provider
pub const AWS_CONTAINER_CREDENTIALS_RELATIVE_URI: &str = "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI";

/// Variables removed when shared config is disabled, so the chain cannot pick them up
pub const SHARED_CONFIG_VARS: [&str; 2] = [AWS_ACCESS_KEY_ID, AWS_PROFILE];

/// `--version` output with build metadata from `build.rs`
pub const LONG_VERSION: &str = concat!(
    env!("AWS_CRED_ENV_LONG_VERSION_0"),
    "\n",
    env!("AWS_CRED_ENV_LONG_VERSION_1"),
    "\n",
    env!("AWS_CRED_ENV_LONG_VERSION_2"),
    "\n",
    env!("AWS_CRED_ENV_LONG_VERSION_3"),
    "\n",
    env!("AWS_CRED_ENV_LONG_VERSION_4"),
);

/// Long flags the original tool accepted with a single leading dash
pub const LEGACY_FLAGS: [&str; 3] = [
    "disable-shared-config",
    "display-caller-identity",
    "version",
];
