//! CLI argument definitions using clap derive macros.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use paper_proxy::download::{DEFAULT_BATCH_CONCURRENCY, DOWNLOAD_TIMEOUT, VERIFY_TIMEOUT};
use paper_proxy::proxy::{MAX_BATCH_CONCURRENCY, MIN_BATCH_CONCURRENCY};

/// Upper bound for either timeout, in seconds.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Serve the exam-paper catalog and proxy validated PDF downloads.
///
/// Papers and textbook chapters are fetched from their third-party hosts on
/// demand, checked for a PDF signature, and returned singly or as a streamed
/// zip archive.
#[derive(Parser, Debug)]
#[command(name = "paper-proxy")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "PAPER_PROXY_LOG_JSON")]
    pub log_json: bool,

    /// Address to listen on
    #[arg(long, env = "PAPER_PROXY_BIND", default_value = "0.0.0.0:12000")]
    pub bind: SocketAddr,

    /// Paper catalog (JSON array of paper records)
    #[arg(long, env = "PAPER_PROXY_CATALOG", default_value = "data/papers.json")]
    pub catalog: PathBuf,

    /// Resource library JSON replacing the built-in textbook table
    #[arg(long, env = "PAPER_PROXY_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// Download timeout in seconds (1-600)
    #[arg(long, env = "PAPER_PROXY_DOWNLOAD_TIMEOUT", default_value_t = DOWNLOAD_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub download_timeout: u64,

    /// Verification (HEAD) timeout in seconds (1-600)
    #[arg(long, env = "PAPER_PROXY_VERIFY_TIMEOUT", default_value_t = VERIFY_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub verify_timeout: u64,

    /// Papers fetched concurrently per batch archive (1-20, 1 = sequential)
    #[arg(
        long,
        env = "PAPER_PROXY_BATCH_CONCURRENCY",
        default_value_t = DEFAULT_BATCH_CONCURRENCY as u64,
        value_parser = clap::value_parser!(u64).range(MIN_BATCH_CONCURRENCY as u64..=MAX_BATCH_CONCURRENCY as u64)
    )]
    pub batch_concurrency: u64,
}

impl Args {
    /// Download timeout as a duration.
    #[must_use]
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout)
    }

    /// Verification timeout as a duration.
    #[must_use]
    pub fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout)
    }

    /// Batch fan-out as a count.
    #[must_use]
    pub fn batch_concurrency(&self) -> usize {
        usize::try_from(self.batch_concurrency).unwrap_or(MAX_BATCH_CONCURRENCY)
    }

    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["paper-proxy"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.bind, "0.0.0.0:12000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.catalog, PathBuf::from("data/papers.json"));
        assert!(args.resources.is_none());
        assert_eq!(args.download_timeout(), Duration::from_secs(60));
        assert_eq!(args.verify_timeout(), Duration::from_secs(30));
        assert_eq!(args.batch_concurrency(), 5);
    }

    #[test]
    fn test_cli_defaults_match_service_defaults() {
        let args = Args::try_parse_from(["paper-proxy"]).unwrap();
        let settings = paper_proxy::ProxySettings::default();
        assert_eq!(args.download_timeout(), settings.download_timeout());
        assert_eq!(args.verify_timeout(), settings.verify_timeout());
        assert_eq!(args.batch_concurrency(), settings.batch_concurrency());
    }

    #[test]
    fn test_cli_concurrency_range_matches_service_bounds() {
        let min = MIN_BATCH_CONCURRENCY.to_string();
        let max = MAX_BATCH_CONCURRENCY.to_string();
        for value in [&min, &max] {
            let args = Args::try_parse_from(["paper-proxy", "--batch-concurrency", value]).unwrap();
            let settings = paper_proxy::ProxySettings::new(
                args.download_timeout(),
                args.verify_timeout(),
                args.batch_concurrency(),
            );
            assert!(settings.is_ok(), "concurrency {value}");
        }
        let above = (MAX_BATCH_CONCURRENCY + 1).to_string();
        assert!(Args::try_parse_from(["paper-proxy", "--batch-concurrency", &above]).is_err());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["paper-proxy", "-v"]).unwrap();
        assert_eq!(args.default_log_level(), "debug");

        let args = Args::try_parse_from(["paper-proxy", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.default_log_level(), "trace");
    }

    #[test]
    fn test_cli_quiet_wins_over_verbose() {
        let args = Args::try_parse_from(["paper-proxy", "-q", "-v"]).unwrap();
        assert_eq!(args.default_log_level(), "error");
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["paper-proxy", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_paths_and_bind() {
        let args = Args::try_parse_from([
            "paper-proxy",
            "--bind",
            "127.0.0.1:8080",
            "--catalog",
            "/srv/papers.json",
            "--resources",
            "/srv/ncert.json",
        ])
        .unwrap();
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.catalog, PathBuf::from("/srv/papers.json"));
        assert_eq!(args.resources, Some(PathBuf::from("/srv/ncert.json")));
    }

    #[test]
    fn test_cli_invalid_bind_rejected() {
        let err = Args::try_parse_from(["paper-proxy", "--bind", "localhost"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_batch_concurrency_bounds() {
        let args = Args::try_parse_from(["paper-proxy", "--batch-concurrency", "1"]).unwrap();
        assert_eq!(args.batch_concurrency, 1);
        let args = Args::try_parse_from(["paper-proxy", "--batch-concurrency", "20"]).unwrap();
        assert_eq!(args.batch_concurrency, 20);

        for value in ["0", "21"] {
            let err = Args::try_parse_from(["paper-proxy", "--batch-concurrency", value])
                .unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_cli_timeout_bounds() {
        let args = Args::try_parse_from(["paper-proxy", "--download-timeout", "600"]).unwrap();
        assert_eq!(args.download_timeout(), Duration::from_secs(600));

        let err = Args::try_parse_from(["paper-proxy", "--verify-timeout", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let err =
            Args::try_parse_from(["paper-proxy", "--download-timeout", "601"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
