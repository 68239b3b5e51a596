use super::config::Config;
use super::logging::{LogLevel, init_logging};
use super::Host;
use crate::Result;
use crate::facts::{HttpSource, HttpSourceOptions};
use crate::reports::generate_ndjson;
use crate::resources::parse_input;
use crate::scoring::{Scorer, ScorerOptions};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Args;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "     score";

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File listing one `code_url,dataset_url,model_url` line per model
    #[arg(value_name = "URL_FILE")]
    pub url_file: Utf8PathBuf,

    /// Path to configuration file (default is `trustscore.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", env = "LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Write diagnostic output to this file instead of stderr
    #[arg(long, value_name = "PATH", env = "LOG_FILE")]
    pub log_file: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Hugging Face access token
    #[arg(long, value_name = "TOKEN", env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    /// Time budget for each metric, overriding the configuration file
    #[arg(long, value_name = "MILLISECONDS")]
    pub metric_timeout_ms: Option<u64>,
}

/// Score every model listed in the URL file and write one NDJSON line per model.
///
/// Malformed lines are reported on the host's error stream and skipped. Nothing is
/// written to the output until every record is ready, so a fatal error leaves the
/// output empty.
pub async fn score_urls<H: Host>(host: &mut H, args: &ScoreArgs) -> Result<()> {
    init_logging(args.log_level, args.log_file.as_deref())?;

    let mut config = Config::load(Utf8Path::new("."), args.config.as_deref())?;
    if let Some(timeout) = args.metric_timeout_ms {
        config.metric_timeout_ms = timeout;
        config.validate()?;
    }

    let text = fs::read_to_string(&args.url_file).into_app_err_with(|| format!("reading URL file '{}'", args.url_file))?;
    let parsed = parse_input(&text);

    if !parsed.malformed.is_empty() {
        let mut error = host.error();
        for malformed in &parsed.malformed {
            writeln!(error, "warning: skipping {malformed}")?;
        }
    }

    let source = HttpSource::new(&HttpSourceOptions {
        hub_base_url: config.hub_base_url.clone(),
        github_api_url: config.github_api_url.clone(),
        hub_token: args.hf_token.clone(),
        github_token: args.github_token.clone(),
        request_timeout: config.request_timeout(),
        max_concurrent_requests: config.max_concurrent_requests,
    })?;

    let scorer = Scorer::new(
        Arc::new(source),
        ScorerOptions {
            metric_timeout: config.metric_timeout(),
            max_concurrent_groups: config.max_concurrent_groups,
            max_concurrent_metrics: config.max_concurrent_metrics,
        },
    );

    let records = scorer.score_all(parsed.groups, Utc::now()).await;
    log::info!(target: LOG_TARGET, "Writing {} record(s)", records.len());

    let mut ndjson = String::new();
    generate_ndjson(&records, &mut ndjson)?;
    host.output().write_all(ndjson.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn args(url_file: Utf8PathBuf) -> ScoreArgs {
        ScoreArgs {
            url_file,
            config: None,
            log_level: LogLevel::None,
            log_file: None,
            github_token: None,
            hf_token: None,
            metric_timeout_ms: None,
        }
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_missing_url_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("absent.txt")).unwrap();
        let mut host = TestHost::new();

        let err = score_urls(&mut host, &args(path)).await.unwrap_err();
        assert!(err.to_string().contains("reading URL file"));
        assert!(host.output_buf.is_empty());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_malformed_lines_are_reported_and_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("urls.txt")).unwrap();
        fs::write(&path, "a,b,c,d\n\nhttps://github.com/org/code,,\n").unwrap();
        let mut host = TestHost::new();

        score_urls(&mut host, &args(path)).await.unwrap();

        assert!(host.output_buf.is_empty());
        let errors = String::from_utf8(host.error_buf).unwrap();
        assert_eq!(errors.lines().count(), 2);
        assert!(errors.contains("line 1"));
        assert!(errors.contains("line 3"));
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_zero_timeout_override_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("urls.txt")).unwrap();
        fs::write(&path, "").unwrap();
        let mut host = TestHost::new();

        let mut args = args(path);
        args.metric_timeout_ms = Some(0);
        let _ = score_urls(&mut host, &args).await.unwrap_err();
    }
}
