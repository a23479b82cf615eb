use crate::output::ShellFlavor;

/// Whether the shared profile files take part in credential resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharedConfig {
    #[default]
    Enabled,
    /// Container and instance metadata only
    Disabled,
}

/// What to do with STS GetCallerIdentity after resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityCheck {
    #[default]
    Skip,
    Verify,
    /// Verify and print the identity to stderr
    Display,
}

impl IdentityCheck {
    pub fn from_flags(verify: bool, display: bool) -> Self {
        match (verify, display) {
            (_, true) => Self::Display,
            (true, false) => Self::Verify,
            (false, false) => Self::Skip,
        }
    }

    pub fn is_requested(self) -> bool {
        self != Self::Skip
    }
}

/// Settings for one export run, fixed once flags are parsed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportConfig {
    pub shared_config: SharedConfig,
    /// Remove `AWS_ACCESS_KEY_ID` and `AWS_PROFILE` when shared config is disabled
    pub clear_leaked_env: bool,
    pub identity: IdentityCheck,
    /// Region for the STS call
    pub region: Option<String>,
    pub shell: ShellFlavor,
}

impl ExportConfig {
    pub fn should_clear_env(&self) -> bool {
        self.shared_config == SharedConfig::Disabled && self.clear_leaked_env
    }
}
