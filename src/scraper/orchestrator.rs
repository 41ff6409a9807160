use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::app::Result;
use crate::config::Config;
use crate::domain::Termination;
use crate::scraper::{Browser, PageDriver, PaginationController, RecordBuilder};
use crate::store::RecordSink;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub pages_visited: u32,
    pub termination: Termination,
    pub output: PathBuf,
}

/// Top-level sequencing of one harvest run
pub struct Orchestrator {
    config: Config,
    builder: RecordBuilder,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        let builder = RecordBuilder::from_config(&config);
        Self { config, builder }
    }

    /// Load the start page, walk the results, write the records, and
    /// close the browser whatever happened along the way.
    pub async fn run<B: Browser, S: RecordSink>(
        &self,
        browser: &mut B,
        sink: &S,
    ) -> Result<RunSummary> {
        let outcome = self.harvest(&*browser, sink).await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        outcome
    }

    async fn harvest<B: Browser, S: RecordSink>(&self, browser: &B, sink: &S) -> Result<RunSummary> {
        let search = &self.config.search;
        let page = browser.new_page().await?;

        info!("Opening {}", search.url);
        if let Err(e) = page
            .goto(&search.url, self.config.browser.navigation_timeout())
            .await
        {
            if let Err(close_err) = page.close().await {
                warn!("Failed to close page: {}", close_err);
            }
            return Err(e);
        }

        let controller = PaginationController::new(&self.config, &self.builder);
        let harvest = controller.run(browser, &page, search.page_limit).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close page: {}", e);
        }

        let written = sink.write(&harvest.records);
        let termination = match harvest.termination {
            Ok(termination) => termination,
            Err(e) => {
                match &written {
                    Ok(path) => warn!(
                        "Run aborted; saved {} records to {}",
                        harvest.records.len(),
                        path.display()
                    ),
                    Err(write_err) => error!("Failed to save partial results: {}", write_err),
                }
                return Err(e);
            }
        };
        let output = written?;

        info!(
            "Wrote {} records to {} ({})",
            harvest.records.len(),
            output.display(),
            termination
        );

        Ok(RunSummary {
            records: harvest.records.len(),
            pages_visited: harvest.state.pages_processed,
            termination,
            output,
        })
    }
}
