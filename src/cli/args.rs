//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Twitter media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "twitter-media-downloader",
    version,
    about = "Download photos, videos and GIFs from X/Twitter posts",
    long_about = "A CLI tool that fetches an X/Twitter post page, extracts its embedded media,\n\
                  and downloads the highest-quality variant of each item.\n\n\
                  Accepts https://x.com/<handle>/status/<id> and twitter.com URLs."
)]
pub struct Args {
    /// X/Twitter post URL.
    pub url: String,

    /// Output directory for downloaded media.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "TWITTER_DL_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide the banner and progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.output {
            config.options.download_directory = Some(dir.clone());
        }

        if let Some(user_agent) = &self.user_agent {
            config.network.user_agent = user_agent.clone();
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_output_dir() {
        let args = Args::parse_from([
            "twitter-media-downloader",
            "https://x.com/user/status/42",
            "-o",
            "/tmp/media",
        ]);

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.download_directory(), PathBuf::from("/tmp/media"));
    }

    #[test]
    fn test_merge_keeps_defaults_without_flags() {
        let args = Args::parse_from(["twitter-media-downloader", "https://x.com/user/status/42"]);

        let mut config = Config::default();
        let default_ua = config.network.user_agent.clone();
        args.merge_into_config(&mut config);

        assert_eq!(config.network.user_agent, default_ua);
        assert!(config.options.show_downloads);
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = Args::parse_from([
            "twitter-media-downloader",
            "https://x.com/user/status/42",
            "--quiet",
        ]);

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert!(!config.options.show_downloads);
    }
}
