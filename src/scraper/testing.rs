//! Scripted stand-in for a job board, driven through the same traits as
//! Chrome. Pages, listings and employer profiles are plain data; the fake
//! records clicks and counts opened/closed contexts so tests can assert on
//! navigation behaviour.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{HarvestError, Result};
use crate::config::Selectors;
use crate::domain::JobRecord;
use crate::scraper::{Browser, PageDriver, Scope};
use crate::store::RecordSink;

pub const START_URL: &str = "https://jobs.example.com/search?q=rust";

/// One listing: its anchor href in the results list plus its detail view
#[derive(Debug, Clone, Default)]
pub struct FakeListing {
    pub href: Option<String>,
    pub texts: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub children: HashMap<(String, String), Vec<String>>,
    pub fail_back: bool,
}

impl FakeListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn text(mut self, locator: &str, value: &str) -> Self {
        self.texts.insert(locator.to_string(), value.to_string());
        self
    }

    pub fn attribute(mut self, locator: &str, value: &str) -> Self {
        self.attributes.insert(locator.to_string(), value.to_string());
        self
    }

    /// Texts of the `child` matches below `locator`
    pub fn children(mut self, locator: &str, child: &str, rows: &[&str]) -> Self {
        self.children.insert(
            (locator.to_string(), child.to_string()),
            rows.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    pub fn failing_back(mut self) -> Self {
        self.fail_back = true;
        self
    }

    /// A listing with every field the default selectors read
    pub fn complete(selectors: &Selectors, title: &str, company_url: Option<&str>) -> Self {
        let mut listing = Self::new()
            .href(&format!("https://jobs.example.com/viewjob?jk={}", slug(title)))
            .text(&selectors.detail_title, &format!("{} - job post", title))
            .children(&selectors.detail_title, &selectors.title_badge, &["- job post"])
            .text(&selectors.location, "Remote")
            .children(
                &selectors.salary_and_type,
                &selectors.salary_and_type_part,
                &["$150,000 a year", "Full-time"],
            )
            .text(&selectors.benefits, "401(k)")
            .text(&selectors.description, "Write Rust.")
            .children(
                &selectors.shift,
                &selectors.shift_row,
                &["Monday to Friday", "Day shift"],
            )
            .text(&selectors.company_link, "Acme")
            .text(&selectors.average_rating, "4.2");
        if let Some(url) = company_url {
            listing = listing.attribute(&selectors.company_link, url);
        }
        listing
    }
}

fn slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

#[derive(Debug, Clone, Default)]
pub struct FakeResultsPage {
    pub listings: Vec<FakeListing>,
    pub captcha: bool,
    pub has_next: bool,
    pub renders_results: bool,
}

impl FakeResultsPage {
    pub fn new(listings: Vec<FakeListing>) -> Self {
        Self {
            listings,
            captcha: false,
            has_next: true,
            renders_results: true,
        }
    }

    pub fn with_captcha(mut self) -> Self {
        self.captcha = true;
        self
    }

    pub fn last(mut self) -> Self {
        self.has_next = false;
        self
    }

    pub fn never_renders(mut self) -> Self {
        self.renders_results = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Blank,
    Results(usize),
    Detail { page: usize, item: usize },
    Company(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeElement {
    ResultItem { page: usize, item: usize },
    NextControl { page: usize },
    Marker,
}

#[derive(Debug, Default)]
struct SiteState {
    start_url: String,
    selectors: Selectors,
    pages: Vec<FakeResultsPage>,
    companies: HashMap<String, HashMap<String, String>>,
    unreachable: HashSet<String>,
    failing_reads: HashSet<String>,
    stalled_reads: HashSet<String>,
    clicks: Vec<(usize, usize)>,
    opened: usize,
    closed: usize,
    browser_closed: bool,
}

/// Shared site definition; cheap to clone
#[derive(Clone)]
pub struct FakeSite {
    state: Arc<Mutex<SiteState>>,
}

impl FakeSite {
    pub fn new(selectors: Selectors) -> Self {
        Self {
            state: Arc::new(Mutex::new(SiteState {
                start_url: START_URL.to_string(),
                selectors,
                ..Default::default()
            })),
        }
    }

    pub fn with_page(self, page: FakeResultsPage) -> Self {
        self.lock().pages.push(page);
        self
    }

    pub fn with_company(self, url: &str, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.lock().companies.insert(url.to_string(), fields);
        self
    }

    pub fn unreachable(self, url: &str) -> Self {
        self.lock().unreachable.insert(url.to_string());
        self
    }

    pub fn browser(&self) -> FakeBrowser {
        FakeBrowser { site: self.clone() }
    }

    pub fn clicks(&self) -> Vec<(usize, usize)> {
        self.lock().clicks.clone()
    }

    pub fn opened_pages(&self) -> usize {
        self.lock().opened
    }

    pub fn closed_pages(&self) -> usize {
        self.lock().closed
    }

    pub fn browser_closed(&self) -> bool {
        self.lock().browser_closed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SiteState> {
        self.state.lock().unwrap()
    }
}

pub struct FakeBrowser {
    site: FakeSite,
}

#[async_trait]
impl Browser for FakeBrowser {
    type Page = FakePage;

    async fn new_page(&self) -> Result<FakePage> {
        self.site.lock().opened += 1;
        Ok(FakePage {
            site: self.site.clone(),
            location: Mutex::new(Location::Blank),
        })
    }

    async fn close(&mut self) -> Result<()> {
        self.site.lock().browser_closed = true;
        Ok(())
    }
}

pub struct FakePage {
    site: FakeSite,
    location: Mutex<Location>,
}

impl FakePage {
    /// Jump straight to a detail view
    pub fn show_detail(&self, page: usize, item: usize) {
        *self.location.lock().unwrap() = Location::Detail { page, item };
    }

    pub fn fail_reads(&self, locator: &str) {
        self.site.lock().failing_reads.insert(locator.to_string());
    }

    pub fn stall_reads(&self, locator: &str) {
        self.site.lock().stalled_reads.insert(locator.to_string());
    }

    fn location(&self) -> Location {
        self.location.lock().unwrap().clone()
    }

    fn set_location(&self, location: Location) {
        *self.location.lock().unwrap() = location;
    }

    fn listing(&self, page: usize, item: usize) -> Option<FakeListing> {
        self.site
            .lock()
            .pages
            .get(page)
            .and_then(|p| p.listings.get(item))
            .cloned()
    }

    /// Fails or stalls reads of `locator` when the test asked for it
    async fn before_read(&self, locator: &str) -> Result<()> {
        let (fail, stall) = {
            let site = self.site.lock();
            (
                site.failing_reads.contains(locator),
                site.stalled_reads.contains(locator),
            )
        };
        if stall {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if fail {
            return Err(HarvestError::Browser(format!("detached node for {}", locator)));
        }
        Ok(())
    }
}

#[async_trait]
impl PageDriver for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        let target = {
            let site = self.site.lock();
            if site.unreachable.contains(url) {
                None
            } else if url == site.start_url && !site.pages.is_empty() {
                Some(Location::Results(0))
            } else if site.companies.contains_key(url) {
                Some(Location::Company(url.to_string()))
            } else {
                None
            }
        };
        match target {
            Some(location) => {
                self.set_location(location);
                Ok(())
            }
            None => Err(HarvestError::timeout(url, timeout)),
        }
    }

    async fn wait_for(&self, locator: &str, timeout: Duration) -> Result<()> {
        let site = self.site.lock();
        let ready = match self.location() {
            Location::Results(page) => {
                locator == site.selectors.result_item
                    && site.pages.get(page).is_some_and(|p| p.renders_results)
            }
            Location::Detail { page, item } => site
                .pages
                .get(page)
                .and_then(|p| p.listings.get(item))
                .is_some_and(|l| l.texts.contains_key(locator)),
            Location::Company(ref url) => site
                .companies
                .get(url)
                .is_some_and(|fields| fields.contains_key(locator)),
            Location::Blank => false,
        };
        if ready {
            Ok(())
        } else {
            Err(HarvestError::timeout(locator, timeout))
        }
    }

    async fn find_all(&self, locator: &str) -> Result<Vec<FakeElement>> {
        let site = self.site.lock();
        let Location::Results(page) = self.location() else {
            return Ok(Vec::new());
        };
        let Some(results) = site.pages.get(page) else {
            return Ok(Vec::new());
        };
        let found = if locator == site.selectors.captcha {
            if results.captcha {
                vec![FakeElement::Marker]
            } else {
                Vec::new()
            }
        } else if locator == site.selectors.result_item {
            (0..results.listings.len())
                .map(|item| FakeElement::ResultItem { page, item })
                .collect()
        } else if locator == site.selectors.next_page {
            if results.has_next {
                // "previous" and "next" share the class; next comes last
                vec![FakeElement::Marker, FakeElement::NextControl { page }]
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        };
        Ok(found)
    }

    async fn text(&self, scope: Scope<'_, FakeElement>, locator: &str) -> Result<Option<String>> {
        self.before_read(locator).await?;
        if !matches!(scope, Scope::Page) {
            return Ok(None);
        }
        Ok(match self.location() {
            Location::Detail { page, item } => self
                .listing(page, item)
                .and_then(|l| l.texts.get(locator).cloned()),
            Location::Company(url) => self
                .site
                .lock()
                .companies
                .get(&url)
                .and_then(|fields| fields.get(locator).cloned()),
            _ => None,
        })
    }

    async fn attribute(
        &self,
        scope: Scope<'_, FakeElement>,
        locator: &str,
        name: &str,
    ) -> Result<Option<String>> {
        self.before_read(locator).await?;
        match scope {
            Scope::Element(FakeElement::ResultItem { page, item }) => {
                let link = self.site.lock().selectors.result_link.clone();
                if locator == link && name == "href" {
                    Ok(self.listing(*page, *item).and_then(|l| l.href))
                } else {
                    Ok(None)
                }
            }
            Scope::Element(_) => Ok(None),
            Scope::Page => Ok(match self.location() {
                Location::Detail { page, item } => self
                    .listing(page, item)
                    .and_then(|l| l.attributes.get(locator).cloned()),
                _ => None,
            }),
        }
    }

    async fn texts(
        &self,
        scope: Scope<'_, FakeElement>,
        locator: &str,
        child: &str,
    ) -> Result<Option<Vec<String>>> {
        self.before_read(locator).await?;
        if !matches!(scope, Scope::Page) {
            return Ok(None);
        }
        Ok(match self.location() {
            Location::Detail { page, item } => self
                .listing(page, item)
                .and_then(|l| {
                    l.children
                        .get(&(locator.to_string(), child.to_string()))
                        .cloned()
                }),
            _ => None,
        })
    }

    async fn click(&self, element: &FakeElement) -> Result<()> {
        match element {
            FakeElement::ResultItem { page, item } => {
                self.site.lock().clicks.push((*page, *item));
                self.set_location(Location::Detail {
                    page: *page,
                    item: *item,
                });
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn click_and_wait(&self, element: &FakeElement, timeout: Duration) -> Result<()> {
        let FakeElement::NextControl { page } = element else {
            return Err(HarvestError::timeout("navigation", timeout));
        };
        let exists = self.site.lock().pages.len() > page + 1;
        if exists {
            self.set_location(Location::Results(page + 1));
            Ok(())
        } else {
            Err(HarvestError::timeout("navigation", timeout))
        }
    }

    async fn go_back(&self, timeout: Duration) -> Result<()> {
        match self.location() {
            Location::Detail { page, item } => {
                let fails = self.listing(page, item).is_some_and(|l| l.fail_back);
                // A failing back navigation still lands on the list, it just
                // reports an error the way a late load event would
                self.set_location(Location::Results(page));
                if fails {
                    return Err(HarvestError::Navigation("history entry vanished".into()));
                }
                Ok(())
            }
            _ => Err(HarvestError::timeout("back navigation", timeout)),
        }
    }

    async fn close(self) -> Result<()> {
        self.site.lock().closed += 1;
        Ok(())
    }
}

/// Sink that keeps every write in memory
#[derive(Default)]
pub struct MemorySink {
    writes: Mutex<Vec<Vec<JobRecord>>>,
}

impl MemorySink {
    pub fn writes(&self) -> Vec<Vec<JobRecord>> {
        self.writes.lock().unwrap().clone()
    }
}

impl RecordSink for MemorySink {
    fn write(&self, records: &[JobRecord]) -> Result<PathBuf> {
        let mut writes = self.writes.lock().unwrap();
        writes.push(records.to_vec());
        Ok(PathBuf::from(format!("memory-{}.csv", writes.len())))
    }
}
