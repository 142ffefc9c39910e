//! Batch summary.

use std::collections::HashMap;

use console::style;

use crate::fetch::{FetchOutcome, FetchStatus};

/// Outcome counts for one run.
#[derive(Debug, Default, Clone)]
pub struct FetchSummary {
    counts: HashMap<FetchStatus, u32>,
    /// Posts that ended in an error instead of an outcome.
    pub errors: u32,
}

impl FetchSummary {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        *self.counts.entry(outcome.status).or_insert(0) += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn count(&self, status: FetchStatus) -> u32 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum::<u32>() + self.errors
    }

    /// Whether any post needs another attempt.
    pub fn has_failures(&self) -> bool {
        self.errors > 0 || self.count(FetchStatus::Failed) > 0
    }
}

/// Print the closing summary.
pub fn print_summary(summary: &FetchSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Summary:").bold());
    println!(
        "  Completed:        {}",
        style(summary.count(FetchStatus::Completed)).green()
    );
    println!(
        "  Not supported:    {}",
        summary.count(FetchStatus::NotSupported)
    );
    println!(
        "  Source not found: {}",
        summary.count(FetchStatus::SourceNotFound)
    );
    if summary.count(FetchStatus::Failed) > 0 {
        println!(
            "  Failed:           {}",
            style(summary.count(FetchStatus::Failed)).red()
        );
    }
    if summary.errors > 0 {
        println!("  Errors:           {}", style(summary.errors).red());
    }
    println!("  Total:            {}", summary.total());
    println!("{}", style("═".repeat(50)).dim());
}
