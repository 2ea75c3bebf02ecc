//! Run statistics reporting.

use console::style;

use crate::download::{DownloadOutcome, DownloadResult, RunStats};

/// Print the saved files and a per-entry accounting of failures.
pub fn print_results(results: &[DownloadResult]) {
    println!();
    for result in results {
        match &result.outcome {
            DownloadOutcome::Saved { path, bytes } => {
                println!(
                    "  {} {} ({})",
                    style("saved").green(),
                    path.display(),
                    format_bytes(*bytes)
                );
            }
            DownloadOutcome::Failed { error } => {
                println!(
                    "  {} {} entry {}: {}",
                    style("failed").red(),
                    result.kind,
                    result.index,
                    error
                );
            }
        }
    }
}

/// Print aggregate statistics for the run.
pub fn print_run_stats(results: &[DownloadResult]) {
    let stats = RunStats::from_results(results);

    println!();
    println!("{}", style("Statistics:").bold());
    println!("  Photos: {}", stats.photo_count);
    println!("  Videos: {}", stats.video_count);
    println!("  GIFs:   {}", stats.gif_count);
    if stats.failed_count > 0 {
        println!("  Failed: {}", style(stats.failed_count).red());
    }
    println!(
        "  Total:  {} downloaded ({})",
        stats.total_downloaded(),
        format_bytes(stats.total_bytes)
    );
}

/// Human-readable byte count.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}
