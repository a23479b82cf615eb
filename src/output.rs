use clap::ValueEnum;

use crate::{
    aws::Credentials,
    constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN},
};

/// Shell syntax used for the exported assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellFlavor {
    /// `export NAME=value`
    Posix,
    /// `$env:NAME='value'`
    #[value(name = "powershell", alias = "pwsh")]
    PowerShell,
}

impl ShellFlavor {
    /// Flavor matching the platform this binary was built for
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Posix
        }
    }

    fn assignment(self, name: &str, value: &str) -> String {
        match self {
            Self::Posix => format!("export {name}={value}\n"),
            Self::PowerShell => format!("$env:{name}='{}'\n", value.replace('\'', "''")),
        }
    }
}

impl Default for ShellFlavor {
    fn default() -> Self {
        Self::native()
    }
}

/// Render the three assignment lines, always in key, secret, token order
pub fn render(credentials: &Credentials, shell: ShellFlavor) -> String {
    [
        (AWS_ACCESS_KEY_ID, credentials.access_key_id.as_str()),
        (AWS_SECRET_ACCESS_KEY, credentials.secret_access_key.as_str()),
        (AWS_SESSION_TOKEN, credentials.session_token.as_str()),
    ]
    .into_iter()
    .map(|(name, value)| shell.assignment(name, value))
    .collect()
}
