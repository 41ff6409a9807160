use std::time::Duration;

use tracing::{debug, warn};

use crate::app::Result;
use crate::config::{Config, Placeholders, Selectors};
use crate::domain::JobRecord;
use crate::scraper::{
    Browser, ElementOf, ExpiryGenerator, FieldExtractor, FieldSpec, PageDriver, Projection, Scope,
};

/// Employer profile values read from the second tab
#[derive(Debug, Clone, PartialEq, Eq)]
struct EmployerInfo {
    review: String,
    number_of_jobs: String,
}

/// Turns one result item into a [`JobRecord`].
///
/// Opens the item's detail view on the shared page, reads every field,
/// optionally visits the employer profile in its own tab, then navigates
/// the shared page back to the results list.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    selectors: Selectors,
    placeholders: Placeholders,
    extractor: FieldExtractor,
    expiry: ExpiryGenerator,
    detail_timeout: Duration,
    navigation_timeout: Duration,
    category: String,
    subcategory: String,
}

impl RecordBuilder {
    pub fn from_config(config: &Config) -> Self {
        let placeholders = config.placeholders.clone();
        let category = config
            .search
            .category
            .clone()
            .unwrap_or_else(|| placeholders.category.clone());
        let subcategory = config
            .search
            .subcategory
            .clone()
            .unwrap_or_else(|| placeholders.subcategory.clone());

        Self {
            selectors: config.selectors.clone(),
            placeholders,
            extractor: FieldExtractor::new(config.browser.field_timeout()),
            expiry: ExpiryGenerator::new(config.expiry),
            detail_timeout: config.browser.detail_timeout(),
            navigation_timeout: config.browser.navigation_timeout(),
            category,
            subcategory,
        }
    }

    pub async fn build<B: Browser>(
        &self,
        browser: &B,
        page: &B::Page,
        item: &ElementOf<B>,
    ) -> Result<JobRecord> {
        let sel = &self.selectors;
        let ph = &self.placeholders;
        let ex = &self.extractor;

        // The anchor is only reachable while the results list is showing
        let job_url = ex
            .extract(
                page,
                Scope::Element(item),
                &FieldSpec::attribute(&sel.result_link, "href", &ph.job_url),
            )
            .await;
        let third_party_apply_url = ex
            .extract(
                page,
                Scope::Element(item),
                &FieldSpec::attribute(&sel.result_link, "href", &ph.third_party_apply_url),
            )
            .await;

        // Nothing fallible may run between the click and the back navigation
        let expire_at = self.expiry.generate()?;

        page.click(item).await?;
        if let Err(e) = page.wait_for(&sel.detail_title, self.detail_timeout).await {
            warn!("Detail view did not render, reading what is there: {}", e);
        }

        let title = ex
            .extract(
                page,
                Scope::Page,
                &FieldSpec::new(
                    &sel.detail_title,
                    Projection::TextWithout(sel.title_badge.clone()),
                    &ph.title,
                ),
            )
            .await;
        let location = ex
            .extract(page, Scope::Page, &FieldSpec::text(&sel.location, &ph.location))
            .await;
        let pay = ex
            .extract_parts(
                page,
                Scope::Page,
                &sel.salary_and_type,
                &sel.salary_and_type_part,
                &[ph.salary.as_str(), ph.job_type.as_str()],
            )
            .await;
        let mut pay = pay.into_iter();
        let salary = pay.next().unwrap_or_else(|| ph.salary.clone());
        let job_type = pay.next().unwrap_or_else(|| ph.job_type.clone());
        let benefit = ex
            .extract(page, Scope::Page, &FieldSpec::text(&sel.benefits, &ph.benefit))
            .await;
        let description = ex
            .extract(
                page,
                Scope::Page,
                &FieldSpec::text(&sel.description, &ph.description),
            )
            .await;
        let shift = ex
            .extract(
                page,
                Scope::Page,
                &FieldSpec::new(
                    &sel.shift,
                    Projection::JoinChildren {
                        child: sel.shift_row.clone(),
                        separator: ", ".to_string(),
                    },
                    &ph.shift,
                ),
            )
            .await;
        let company_url = ex
            .try_extract(
                page,
                Scope::Page,
                &FieldSpec::attribute(&sel.company_link, "href", &ph.company_url),
            )
            .await;
        let company = ex
            .extract(page, Scope::Page, &FieldSpec::text(&sel.company_link, &ph.company))
            .await;
        let average_rating = ex
            .extract(
                page,
                Scope::Page,
                &FieldSpec::text(&sel.average_rating, &ph.average_rating),
            )
            .await;

        let employer = match company_url.as_deref() {
            Some(url) => self.fetch_employer(browser, url).await,
            None => {
                debug!("No employer link, skipping profile fetch");
                self.employer_placeholders()
            }
        };

        let record = JobRecord {
            job_id: JobRecord::generate_id(),
            title,
            job_url,
            location,
            company,
            company_url: company_url.unwrap_or_else(|| ph.company_url.clone()),
            review: employer.review,
            description,
            job_type,
            salary,
            shift,
            benefit,
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            expire_at,
            is_claimed: false,
            average_rating,
            number_of_jobs: employer.number_of_jobs,
            third_party_apply_url,
        };

        page.go_back(self.navigation_timeout).await?;
        Ok(record)
    }

    /// Read the employer profile in a fresh tab that is always closed again
    async fn fetch_employer<B: Browser>(&self, browser: &B, url: &str) -> EmployerInfo {
        let tab = match browser.new_page().await {
            Ok(tab) => tab,
            Err(e) => {
                warn!("Could not open employer tab for {}: {}", url, e);
                return self.employer_placeholders();
            }
        };

        if let Err(e) = tab.goto(url, self.navigation_timeout).await {
            warn!("Employer page {} did not load: {}", url, e);
        }

        let info = EmployerInfo {
            review: self
                .extractor
                .extract(
                    &tab,
                    Scope::Page,
                    &FieldSpec::text(&self.selectors.company_review, &self.placeholders.review),
                )
                .await,
            number_of_jobs: self
                .extractor
                .extract(
                    &tab,
                    Scope::Page,
                    &FieldSpec::text(
                        &self.selectors.company_jobs,
                        &self.placeholders.number_of_jobs,
                    ),
                )
                .await,
        };

        if let Err(e) = tab.close().await {
            warn!("Failed to close employer tab: {}", e);
        }
        info
    }

    fn employer_placeholders(&self) -> EmployerInfo {
        EmployerInfo {
            review: self.placeholders.review.clone(),
            number_of_jobs: self.placeholders.number_of_jobs.clone(),
        }
    }
}
