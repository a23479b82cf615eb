use std::ffi::OsString;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{CompletionsCommand, ExportCommand},
    constants::{LEGACY_FLAGS, LONG_VERSION},
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "aws-cred-env",
    version,
    long_version = LONG_VERSION,
    about = "Resolve AWS credentials and print them as shell exports",
    long_about = "Resolve AWS credentials through the standard provider chain (environment, \
                  shared config, ECS container and EC2 instance metadata) and print them as \
                  shell assignments.\n\nUsage: eval \"$(aws-cred-env)\""
)]
pub struct Cli {
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(flatten)]
    pub export: ExportCommand,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Generate shell completion scripts for aws-cred-env")]
    Completions(CompletionsCommand),
}

impl Cli {
    /// Parse arguments, accepting the single-dash long flags of the original tool
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Completions(cmd)) => {
                cmd.execute();
                Ok(())
            }
            None => self.export.execute().await,
        }
    }
}

/// Rewrite `-disable-shared-config` style flags to their `--` form
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            let legacy = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| LEGACY_FLAGS.contains(name))
                .map(|name| format!("--{name}"));
            legacy.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}
