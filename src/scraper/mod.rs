//! Browser-driven listing extraction.
//!
//! # Architecture
//!
//! ```text
//! Orchestrator → PaginationController → RecordBuilder → FieldExtractor
//!                                                     ↘ employer page (second tab)
//! ```
//!
//! The browser is reached only through the [`Browser`] and [`PageDriver`]
//! traits. [`ChromeBrowser`] implements them over chromiumoxide; tests use
//! a scripted fake site.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jobharvest::config::Config;
//! use jobharvest::scraper::{ChromeBrowser, Orchestrator};
//! use jobharvest::store::CsvSink;
//!
//! let config = Config::load()?;
//! let mut browser = ChromeBrowser::launch(config.browser.clone()).await?;
//! let sink = CsvSink::new(&config.output);
//! let summary = Orchestrator::new(config).run(&mut browser, &sink).await?;
//! ```

mod chrome;
mod config;
mod expiry;
mod extractor;
mod orchestrator;
mod pagination;
mod record;

#[cfg(test)]
pub(crate) mod testing;

pub use chrome::{ChromeBrowser, ChromePage};
pub use config::BrowserSettings;
pub use expiry::{expiration_date, format_expiration, ExpiryGenerator, ExpiryWindow, EXPIRY_FORMAT};
pub use extractor::{FieldExtractor, FieldSpec, Projection};
pub use orchestrator::{Orchestrator, RunSummary};
pub use pagination::{Harvest, PaginationController};
pub use record::RecordBuilder;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// Where a locator is resolved: the whole document or below one element
pub enum Scope<'a, E> {
    Page,
    Element(&'a E),
}

impl<E> Clone for Scope<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Scope<'_, E> {}

/// One browsing context (a tab) and the operations the harvester needs on it
#[async_trait]
pub trait PageDriver: Send + Sync {
    type Element: Send + Sync;

    /// Navigate and wait for the load to settle
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait until `locator` matches at least one element
    async fn wait_for(&self, locator: &str, timeout: Duration) -> Result<()>;

    /// All matches in document order
    async fn find_all(&self, locator: &str) -> Result<Vec<Self::Element>>;

    /// Rendered text of the first match, `None` when nothing matches
    async fn text(&self, scope: Scope<'_, Self::Element>, locator: &str)
        -> Result<Option<String>>;

    /// DOM property of the first match (resolved, so `href` is absolute)
    async fn attribute(
        &self,
        scope: Scope<'_, Self::Element>,
        locator: &str,
        name: &str,
    ) -> Result<Option<String>>;

    /// Rendered text of every `child` below the first `locator` match.
    /// `None` when the container itself is missing.
    async fn texts(
        &self,
        scope: Scope<'_, Self::Element>,
        locator: &str,
        child: &str,
    ) -> Result<Option<Vec<String>>>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Click and wait for the resulting navigation
    async fn click_and_wait(&self, element: &Self::Element, timeout: Duration) -> Result<()>;

    /// Return to the previous history entry
    async fn go_back(&self, timeout: Duration) -> Result<()>;

    async fn close(self) -> Result<()>;
}

/// Source of isolated browsing contexts
#[async_trait]
pub trait Browser: Send + Sync {
    type Page: PageDriver;

    async fn new_page(&self) -> Result<Self::Page>;

    async fn close(&mut self) -> Result<()>;
}

/// Element handle type of a browser's pages
pub type ElementOf<B> = <<B as Browser>::Page as PageDriver>::Element;
