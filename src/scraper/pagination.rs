use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::{HarvestError, Result};
use crate::config::{Config, Selectors};
use crate::domain::{JobRecord, RunState, Termination};
use crate::scraper::{Browser, PageDriver, RecordBuilder};

/// Everything a pagination run produced.
///
/// `records` holds what was collected even when `termination` is an error,
/// so the caller can still persist it.
#[derive(Debug)]
pub struct Harvest {
    pub records: Vec<JobRecord>,
    pub state: RunState,
    pub termination: Result<Termination>,
}

/// Walks results pages one at a time, building a record per result item.
///
/// Items are processed strictly in sequence: every record build navigates
/// the shared page into a detail view and back again.
pub struct PaginationController<'a> {
    builder: &'a RecordBuilder,
    selectors: &'a Selectors,
    results_timeout: Duration,
    navigation_timeout: Duration,
}

impl<'a> PaginationController<'a> {
    pub fn new(config: &'a Config, builder: &'a RecordBuilder) -> Self {
        Self {
            builder,
            selectors: &config.selectors,
            results_timeout: config.browser.results_timeout(),
            navigation_timeout: config.browser.navigation_timeout(),
        }
    }

    /// Process up to `pages_requested` results pages starting from the one
    /// currently loaded in `page`.
    pub async fn run<B: Browser>(
        &self,
        browser: &B,
        page: &B::Page,
        pages_requested: u32,
    ) -> Harvest {
        let mut state = RunState::new(pages_requested);
        let mut records = Vec::new();
        let termination = self.drive(browser, page, &mut state, &mut records).await;

        Harvest {
            records,
            state,
            termination,
        }
    }

    async fn drive<B: Browser>(
        &self,
        browser: &B,
        page: &B::Page,
        state: &mut RunState,
        records: &mut Vec<JobRecord>,
    ) -> Result<Termination> {
        loop {
            if state.is_capped() {
                return Ok(Termination::Capped);
            }

            if self.captcha_present(page).await {
                warn!(
                    "Captcha detected on page {}, stopping with {} records",
                    state.current_page,
                    records.len()
                );
                state.block();
                return Ok(Termination::Blocked);
            }

            page.wait_for(&self.selectors.result_item, self.results_timeout)
                .await?;
            let count = page.find_all(&self.selectors.result_item).await?.len();
            info!("Page {}: {} results", state.current_page, count);

            for index in 0..count {
                match self.process_item(browser, page, index).await {
                    Ok(record) => {
                        debug!("Collected {:?} ({})", record.title, record.job_id);
                        records.push(record);
                    }
                    Err(e) => {
                        warn!(
                            "Skipping result {} on page {}: {}",
                            index + 1,
                            state.current_page,
                            e
                        );
                    }
                }
            }
            state.finish_page();

            match self.next_page(page).await {
                Ok(true) => state.advance(),
                Ok(false) => {
                    info!("No next page control after page {}", state.current_page);
                    return Ok(Termination::Exhausted);
                }
                Err(e) => {
                    warn!(
                        "Could not move past page {}: {}",
                        state.current_page, e
                    );
                    return Ok(Termination::Exhausted);
                }
            }
        }
    }

    async fn captcha_present<P: PageDriver>(&self, page: &P) -> bool {
        match page.find_all(&self.selectors.captcha).await {
            Ok(markers) => !markers.is_empty(),
            Err(e) => {
                debug!("Captcha check failed, assuming none: {}", e);
                false
            }
        }
    }

    /// Result handles go stale once the page navigates, so each item is
    /// looked up again by position after the previous one returned.
    async fn process_item<B: Browser>(
        &self,
        browser: &B,
        page: &B::Page,
        index: usize,
    ) -> Result<JobRecord> {
        let items = page.find_all(&self.selectors.result_item).await?;
        let item = items.get(index).ok_or_else(|| {
            HarvestError::ElementNotFound(format!(
                "{} #{} (only {} on page)",
                self.selectors.result_item,
                index + 1,
                items.len()
            ))
        })?;
        self.builder.build(browser, page, item).await
    }

    /// Click the last pagination control. `Ok(false)` when there is none.
    async fn next_page<P: PageDriver>(&self, page: &P) -> Result<bool> {
        let controls = page.find_all(&self.selectors.next_page).await?;
        let Some(next) = controls.last() else {
            return Ok(false);
        };
        page.click_and_wait(next, self.navigation_timeout).await?;
        Ok(true)
    }
}
