use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    GetNavigationHistoryParams, NavigateToHistoryEntryParams,
};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};

use crate::app::{HarvestError, Result};
use crate::scraper::config::BrowserSettings;
use crate::scraper::{Browser, PageDriver, Scope};

/// Chrome driven over CDP by chromiumoxide
pub struct ChromeBrowser {
    browser: CdpBrowser,
    handler: JoinHandle<()>,
    settings: BrowserSettings,
}

impl ChromeBrowser {
    /// Launch a local Chrome/Chromium with the given settings
    pub async fn launch(settings: BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder();
        for arg in &settings.args {
            builder = builder.arg(arg.as_str());
        }

        if !settings.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| HarvestError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = CdpBrowser::launch(browser_config).await.map_err(|e| {
            HarvestError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // The handler drives the CDP connection; without it no command completes
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler,
            settings,
        })
    }
}

#[async_trait]
impl Browser for ChromeBrowser {
    type Page = ChromePage;

    async fn new_page(&self) -> Result<ChromePage> {
        let page = self.browser.new_page("about:blank").await?;

        if let Some(ref ua) = self.settings.user_agent {
            page.set_user_agent(ua).await?;
        }

        Ok(ChromePage {
            page,
            poll_interval: self.settings.poll_interval(),
        })
    }

    async fn close(&mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        self.handler.abort();
        Ok(())
    }
}

/// One Chrome tab
pub struct ChromePage {
    page: Page,
    poll_interval: Duration,
}

impl ChromePage {
    /// First match of `locator` in `scope`, `None` when nothing matches
    async fn locate(&self, scope: Scope<'_, Element>, locator: &str) -> Option<Element> {
        let found = match scope {
            Scope::Page => self.page.find_element(locator).await,
            Scope::Element(parent) => parent.find_element(locator).await,
        };
        found.ok()
    }

    async fn settle(&self, what: &str, limit: Duration) -> Result<()> {
        match timeout(limit, self.page.wait_for_navigation()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(HarvestError::Navigation(format!("{}: {}", what, e))),
            Err(_) => Err(HarvestError::timeout(what, limit)),
        }
    }
}

#[async_trait]
impl PageDriver for ChromePage {
    type Element = Element;

    async fn goto(&self, url: &str, limit: Duration) -> Result<()> {
        match timeout(limit, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(HarvestError::Navigation(format!("{}: {}", url, e))),
            Err(_) => Err(HarvestError::timeout(url, limit)),
        }
    }

    async fn wait_for(&self, locator: &str, limit: Duration) -> Result<()> {
        let deadline = Instant::now() + limit;
        loop {
            if self.page.find_element(locator).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(HarvestError::timeout(locator, limit));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn find_all(&self, locator: &str) -> Result<Vec<Element>> {
        Ok(self.page.find_elements(locator).await?)
    }

    async fn text(&self, scope: Scope<'_, Element>, locator: &str) -> Result<Option<String>> {
        match self.locate(scope, locator).await {
            Some(element) => Ok(element.inner_text().await?),
            None => Ok(None),
        }
    }

    async fn attribute(
        &self,
        scope: Scope<'_, Element>,
        locator: &str,
        name: &str,
    ) -> Result<Option<String>> {
        let Some(element) = self.locate(scope, locator).await else {
            return Ok(None);
        };
        let value = element.property(name).await?;
        Ok(value.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }))
    }

    async fn texts(
        &self,
        scope: Scope<'_, Element>,
        locator: &str,
        child: &str,
    ) -> Result<Option<Vec<String>>> {
        let Some(container) = self.locate(scope, locator).await else {
            return Ok(None);
        };
        let mut texts = Vec::new();
        for element in container.find_elements(child).await? {
            texts.push(element.inner_text().await?.unwrap_or_default());
        }
        Ok(Some(texts))
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element.click().await?;
        Ok(())
    }

    async fn click_and_wait(&self, element: &Element, limit: Duration) -> Result<()> {
        element.click().await?;
        self.settle("next results page", limit).await
    }

    async fn go_back(&self, limit: Duration) -> Result<()> {
        let history = self
            .page
            .execute(GetNavigationHistoryParams::default())
            .await?;
        let previous = usize::try_from(history.current_index - 1)
            .ok()
            .and_then(|index| history.entries.get(index))
            .ok_or_else(|| HarvestError::Navigation("no earlier history entry".into()))?;

        self.page
            .execute(NavigateToHistoryEntryParams::new(previous.id))
            .await?;
        self.settle("back navigation", limit).await
    }

    async fn close(self) -> Result<()> {
        self.page.close().await?;
        Ok(())
    }
}
