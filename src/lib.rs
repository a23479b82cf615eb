pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod output;
