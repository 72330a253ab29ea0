//! The migration pipeline: fetch, summarize, then preview or submit
//!
//! Strictly sequential; every HTTP call is awaited before the next one is
//! issued. Per-entry submission failures are logged and counted, fatal
//! failures abort the run.

use crate::api::{DreamingClient, Language, TimeEntry};
use anyhow::{Context, Result};
use colored::*;
use log::{info, warn};
use std::time::{Duration, Instant};

/// Entries shown in a dry-run preview
const PREVIEW_LIMIT: usize = 5;

/// Progress line cadence during execution
const PROGRESS_INTERVAL: usize = 10;

/// Execution mode, fixed for the whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// Fetch and summarize only; never writes to the target
    DryRun,
    /// Submit every fetched entry to the target account
    Execute,
}

/// Count and total duration of a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total_seconds: u64,
}

impl Summary {
    pub fn of(entries: &[TimeEntry]) -> Self {
        Self {
            count: entries.len(),
            total_seconds: entries.iter().map(|e| u64::from(e.time_seconds)).sum(),
        }
    }

    pub fn hours(&self) -> f64 {
        self.total_seconds as f64 / 3600.0
    }
}

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub fetched: usize,
    pub submitted: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Orchestrates one migration run between two account/language pairs.
pub struct Migrator {
    source: DreamingClient,
    target: DreamingClient,
    source_language: Language,
    target_language: Language,
}

impl Migrator {
    pub fn new(
        source: DreamingClient,
        target: DreamingClient,
        source_language: Language,
        target_language: Language,
    ) -> Self {
        Self {
            source,
            target,
            source_language,
            target_language,
        }
    }

    /// Run the pipeline in the given mode.
    ///
    /// A fetch-stage failure of any kind aborts before any mutation. During
    /// submission, API errors skip the entry and continue; auth and network
    /// failures abort the remainder of the run.
    pub async fn run(&self, mode: MigrationMode) -> Result<MigrationReport> {
        let start = Instant::now();

        println!(
            "Fetching {} progress from source account...",
            self.source_language.display_name().cyan()
        );
        let entries = self
            .source
            .list_time_entries(self.source_language)
            .await
            .context("Failed to fetch time entries from the source account")?;
        info!("Fetched {} entries from source", entries.len());

        let summary = Summary::of(&entries);
        println!("Found {} time entries", summary.count.to_string().bold());

        if entries.is_empty() {
            println!("No entries to migrate");
            return Ok(MigrationReport {
                fetched: 0,
                submitted: 0,
                failed: 0,
                elapsed: start.elapsed(),
            });
        }

        println!(
            "Total time: {:.2} hours ({} seconds)",
            summary.hours(),
            summary.total_seconds
        );
        println!();

        match mode {
            MigrationMode::DryRun => {
                self.preview(&entries);
                Ok(MigrationReport {
                    fetched: entries.len(),
                    submitted: 0,
                    failed: 0,
                    elapsed: start.elapsed(),
                })
            }
            MigrationMode::Execute => self.execute(&entries, start).await,
        }
    }

    /// Print the first few entries that would be migrated, without touching
    /// the target.
    fn preview(&self, entries: &[TimeEntry]) {
        println!(
            "{}",
            format!(
                "DRY RUN - showing first {PREVIEW_LIMIT} entries that would be migrated:"
            )
            .yellow()
        );
        for (i, entry) in entries.iter().take(PREVIEW_LIMIT).enumerate() {
            println!();
            println!("{}. {}", i + 1, entry.title.bold());
            if let Some(description) = &entry.description {
                println!("   {}", description.dimmed());
            }
            println!("   Date: {}", entry.date);
            println!("   Duration: {} seconds", entry.time_seconds);
            println!("   Type: {}", entry.entry_type);
            if let Some(url) = &entry.url {
                println!("   URL: {url}");
            }
        }
        if entries.len() > PREVIEW_LIMIT {
            println!();
            println!("... and {} more entries", entries.len() - PREVIEW_LIMIT);
        }
        println!();
        println!("To actually migrate, run with {}", "--execute".bold());
    }

    async fn execute(&self, entries: &[TimeEntry], start: Instant) -> Result<MigrationReport> {
        println!(
            "Migrating entries to {} in target account...",
            self.target_language.display_name().cyan()
        );

        let mut submitted = 0usize;
        let mut failed = 0usize;

        for (i, entry) in entries.iter().enumerate() {
            let attempt = i + 1;
            let payload = entry.to_submission();

            match self
                .target
                .create_time_entry(self.target_language, &payload)
                .await
            {
                Ok(()) => submitted += 1,
                Err(failure) if failure.is_fatal() => {
                    return Err(anyhow::Error::new(failure)).with_context(|| {
                        format!(
                            "Aborting migration at entry {attempt} ('{}', {})",
                            entry.title, entry.date
                        )
                    });
                }
                Err(failure) => {
                    failed += 1;
                    warn!(
                        "Failed to migrate entry {attempt} ('{}', {}): {failure}",
                        entry.title, entry.date
                    );
                    eprintln!(
                        "{}",
                        format!(
                            "Error migrating entry {attempt} ('{}', {}): {failure}",
                            entry.title, entry.date
                        )
                        .red()
                    );
                }
            }

            if attempt % PROGRESS_INTERVAL == 0 {
                println!("Progress: {attempt}/{} entries migrated", entries.len());
            }
        }

        let elapsed = start.elapsed();
        println!();
        println!("{}", "Migration complete!".green().bold());
        println!("Successfully migrated: {submitted}");
        println!("Errors: {failed}");
        println!("Elapsed: {:.1}s", elapsed.as_secs_f64());

        Ok(MigrationReport {
            fetched: entries.len(),
            submitted,
            failed,
            elapsed,
        })
    }
}
