//! # jobharvest
//!
//! Collects job listings from a paginated job board by driving a real
//! Chrome instance, and writes them to a CSV file.
//!
//! ## Architecture
//!
//! ```text
//! Orchestrator → PaginationController → RecordBuilder → FieldExtractor
//!                                                             ↓
//!                                            CsvSink ← Vec<JobRecord>
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Three pages with the default search
//! jobharvest run
//!
//! # A different search, labelled, five pages
//! jobharvest run --url "https://www.indeed.com/jobs?q=rust" \
//!     --category Engineering --subcategory Backend --pages 5
//!
//! # Show the effective configuration
//! jobharvest config
//! ```

/// Error type and application context.
pub mod app;

/// Command-line interface using clap.
///
/// - `run` - Harvest listings into a CSV file
/// - `config` - Print the effective configuration
pub mod cli;

/// Configuration loaded from `~/.config/jobharvest/config.toml`.
///
/// Covers the search itself, browser timeouts, CSS selectors,
/// per-field placeholders, the expiry window and the output location.
pub mod config;

/// Core domain models.
///
/// - [`JobRecord`](domain::JobRecord): one harvested listing
/// - [`RunState`](domain::RunState): pagination progress
/// - [`Termination`](domain::Termination): why a run stopped
pub mod domain;

/// Browser-driven extraction.
///
/// - [`ChromeBrowser`](scraper::ChromeBrowser): chromiumoxide implementation
/// - [`FieldExtractor`](scraper::FieldExtractor): never-failing field reads
/// - [`RecordBuilder`](scraper::RecordBuilder): one listing to one record
/// - [`PaginationController`](scraper::PaginationController): page loop
/// - [`Orchestrator`](scraper::Orchestrator): a whole run
pub mod scraper;

/// Output sinks.
///
/// - [`RecordSink`](store::RecordSink): trait for run output
/// - [`CsvSink`](store::CsvSink): uniquely named CSV files
pub mod store;
