//! Command dispatch logic for trustscore

use super::{ScoreArgs, score_urls};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "trustscore", version, author, long_about = None)]
#[command(about = "Score the trustworthiness of ML models and their linked datasets and code")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    score: ScoreArgs,
}

/// Parse command-line arguments and score the URL file they name
///
/// This is designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the URL file or configuration cannot be read, or the
/// configuration is invalid. Individual metric failures are not errors.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    score_urls(host, &cli.score).await
}
