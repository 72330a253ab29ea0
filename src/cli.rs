//! Command-line interface definition

use crate::api::{constants, Language};
use clap::Parser;

/// Migrate Dreaming progress from one account/language pair to another.
#[derive(Parser)]
#[command(
    name = "dreaming-cli",
    version,
    about = "Migrate Dreaming progress between accounts"
)]
pub struct Cli {
    /// Bearer token for the source account
    #[arg(long, env = "DREAMING_SOURCE_TOKEN", hide_env_values = true)]
    pub source_token: String,

    /// Bearer token for the target account
    #[arg(long, env = "DREAMING_TARGET_TOKEN", hide_env_values = true)]
    pub target_token: String,

    /// Language to read progress from
    #[arg(long, value_enum, default_value_t = Language::Es)]
    pub source_language: Language,

    /// Language to write progress to
    #[arg(long, value_enum, default_value_t = Language::Fr)]
    pub target_language: Language,

    /// Actually perform the migration (default is a dry run)
    #[arg(long)]
    pub execute: bool,

    /// Override the Dreaming API base URL
    #[arg(long, default_value = constants::DEFAULT_API_URL, hide = true)]
    pub api_url: String,
}
