use std::time::Duration;

use tracing::debug;

use crate::app::Result;
use crate::scraper::{PageDriver, Scope};

/// How a matched element is turned into a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Rendered text
    Text,
    /// DOM property such as `href`
    Attribute(String),
    /// Rendered text with the text of each matching child removed
    TextWithout(String),
    /// Rendered text of every matching child, joined
    JoinChildren { child: String, separator: String },
}

/// A field to read: where, how, and what to use when it can't be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub locator: String,
    pub projection: Projection,
    pub fallback: String,
}

impl FieldSpec {
    pub fn new(locator: &str, projection: Projection, fallback: &str) -> Self {
        Self {
            locator: locator.to_string(),
            projection,
            fallback: fallback.to_string(),
        }
    }

    pub fn text(locator: &str, fallback: &str) -> Self {
        Self::new(locator, Projection::Text, fallback)
    }

    pub fn attribute(locator: &str, name: &str, fallback: &str) -> Self {
        Self::new(locator, Projection::Attribute(name.to_string()), fallback)
    }
}

/// Reads fields from a page without ever failing.
///
/// Missing elements, driver errors, empty text and reads that outlive the
/// timeout all produce the field's fallback.
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor {
    timeout: Duration,
}

impl FieldExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn extract<P: PageDriver>(
        &self,
        page: &P,
        scope: Scope<'_, P::Element>,
        spec: &FieldSpec,
    ) -> String {
        self.try_extract(page, scope, spec)
            .await
            .unwrap_or_else(|| spec.fallback.clone())
    }

    /// Like [`extract`](Self::extract) but reports a miss as `None`
    pub async fn try_extract<P: PageDriver>(
        &self,
        page: &P,
        scope: Scope<'_, P::Element>,
        spec: &FieldSpec,
    ) -> Option<String> {
        let read = read_projection(page, scope, &spec.locator, &spec.projection);
        match tokio::time::timeout(self.timeout, read).await {
            Ok(Ok(Some(value))) => {
                let value = non_empty(&value);
                if value.is_none() {
                    debug!("Empty value at {}", spec.locator);
                }
                value
            }
            Ok(Ok(None)) => {
                debug!("No element matches {}", spec.locator);
                None
            }
            Ok(Err(e)) => {
                debug!("Failed to read {}: {}", spec.locator, e);
                None
            }
            Err(_) => {
                debug!("Timed out reading {}", spec.locator);
                None
            }
        }
    }

    /// Read the children of one container as separate values.
    ///
    /// Part `i` is the text of the `i`-th child, or `fallbacks[i]` when that
    /// child is absent or empty.
    pub async fn extract_parts<P: PageDriver>(
        &self,
        page: &P,
        scope: Scope<'_, P::Element>,
        locator: &str,
        child: &str,
        fallbacks: &[&str],
    ) -> Vec<String> {
        let children = match tokio::time::timeout(self.timeout, page.texts(scope, locator, child))
            .await
        {
            Ok(Ok(Some(children))) => children,
            Ok(Ok(None)) => {
                debug!("No element matches {}", locator);
                Vec::new()
            }
            Ok(Err(e)) => {
                debug!("Failed to read {}: {}", locator, e);
                Vec::new()
            }
            Err(_) => {
                debug!("Timed out reading {}", locator);
                Vec::new()
            }
        };

        fallbacks
            .iter()
            .enumerate()
            .map(|(i, fallback)| {
                children
                    .get(i)
                    .and_then(|text| non_empty(text))
                    .unwrap_or_else(|| fallback.to_string())
            })
            .collect()
    }
}

async fn read_projection<P: PageDriver>(
    page: &P,
    scope: Scope<'_, P::Element>,
    locator: &str,
    projection: &Projection,
) -> Result<Option<String>> {
    match projection {
        Projection::Text => page.text(scope, locator).await,
        Projection::Attribute(name) => page.attribute(scope, locator, name).await,
        Projection::TextWithout(child) => {
            let Some(text) = page.text(scope, locator).await? else {
                return Ok(None);
            };
            let removed = page.texts(scope, locator, child).await?.unwrap_or_default();
            Ok(Some(strip_fragments(&text, &removed)))
        }
        Projection::JoinChildren { child, separator } => Ok(page
            .texts(scope, locator, child)
            .await?
            .map(|rows| join_rows(&rows, separator))),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Remove the first occurrence of each fragment from `text`
pub(crate) fn strip_fragments(text: &str, fragments: &[String]) -> String {
    let mut cleaned = text.trim().to_string();
    for fragment in fragments {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            cleaned = cleaned.replacen(fragment, "", 1);
        }
    }
    cleaned.trim().to_string()
}

/// Join trimmed, non-empty rows
pub(crate) fn join_rows(rows: &[String], separator: &str) -> String {
    rows.iter()
        .map(|row| row.trim())
        .filter(|row| !row.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
