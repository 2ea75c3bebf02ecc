//! Twitter Media Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use twitter_media_downloader::{
    cli::Args,
    config::{validate_config, Config},
    download::download_from_url,
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_error, print_info, print_results, print_run_stats, print_run_summary,
        print_warning,
    },
    TwitterClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = match e {
                Error::InvalidUrl(_) => exit_codes::INVALID_URL,
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    exit_codes::CONFIG_ERROR
                }
                Error::Network { .. } | Error::HttpStatus { .. } | Error::EmptyResponse(_) => {
                    exit_codes::FETCH_ERROR
                }
                Error::Parse(_) | Error::Json(_) => exit_codes::PARSE_ERROR,
                Error::Write(_) | Error::Transfer(_) => exit_codes::ALL_DOWNLOADS_FAILED,
                _ => exit_codes::UNEXPECTED_ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    if !args.quiet {
        print_banner();
    }

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        if args.config.to_string_lossy() != "config.toml" {
            print_warning(&format!(
                "Configuration file not found: {}",
                args.config.display()
            ));
        }
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    let output_dir = config.download_directory();
    if !args.quiet {
        print_run_summary(&args.url, &output_dir.display().to_string());
    }

    // Initialize the HTTP client shared by the fetcher and downloader
    let client = TwitterClient::new(&config.network)?;

    // Run the pipeline
    let results = download_from_url(&client, &config, &args.url, &output_dir).await?;

    if results.is_empty() {
        print_info("No media found in post");
        return Ok(exit_codes::SUCCESS);
    }

    print_results(&results);
    print_run_stats(&results);

    let successes = results.iter().filter(|r| r.is_success()).count();
    if successes == 0 {
        print_error("Every media entry failed to download");
        return Ok(exit_codes::ALL_DOWNLOADS_FAILED);
    }

    if successes < results.len() {
        print_warning(&format!(
            "{} of {} entries failed to download",
            results.len() - successes,
            results.len()
        ));
    }

    Ok(exit_codes::SUCCESS)
}
