use serde::{Deserialize, Serialize};

/// CSS selectors for every element the harvester reads or clicks.
///
/// Defaults target the job board's markup as of the last layout change.
/// Obfuscated class names rotate, so all of them can be overridden in
/// the `[selectors]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Element whose presence means the session was challenged
    pub captcha: String,

    /// One entry in the results list
    pub result_item: String,

    /// Anchor inside a result item carrying the listing URL
    pub result_link: String,

    /// Title region of the detail view; also the readiness marker
    pub detail_title: String,

    /// Nested badge text removed from the title
    pub title_badge: String,

    pub location: String,

    /// Container whose children hold salary then job type
    pub salary_and_type: String,
    pub salary_and_type_part: String,

    pub benefits: String,
    pub description: String,

    /// Container whose child rows make up the work schedule
    pub shift: String,
    pub shift_row: String,

    /// Employer link; text is the company name, href its profile page
    pub company_link: String,
    pub average_rating: String,

    /// Employer profile page fields
    pub company_review: String,
    pub company_jobs: String,

    /// Pagination controls; the last match is "next"
    pub next_page: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            captcha: ".cb-lb".to_string(),
            result_item: ".resultContent".to_string(),
            result_link: ".jobTitle > a".to_string(),
            detail_title: ".jobsearch-JobInfoHeader-title".to_string(),
            title_badge: ".css-1b6omqv.esbq1260".to_string(),
            location: "[data-testid=\"jobsearch-JobInfoHeader-companyLocation\"]".to_string(),
            salary_and_type: "#salaryInfoAndJobType".to_string(),
            salary_and_type_part: "span".to_string(),
            benefits: "#benefits".to_string(),
            description: "#jobDescriptionText".to_string(),
            shift: ".js-match-insights-provider-g6kqeb.ecydgvn0".to_string(),
            shift_row: "div".to_string(),
            company_link: ".css-1saizt3.e1wnkr790 > a".to_string(),
            average_rating: "[data-testid=\"inlineHeader-companyName\"] .css-ppxtlp.e1wnkr790"
                .to_string(),
            company_review: "[data-testid=\"reviews-tab\"] .css-104u4ae.eu4oa1w0".to_string(),
            company_jobs: "[data-testid=\"jobs-tab\"] .css-104u4ae.eu4oa1w0".to_string(),
            next_page: ".css-227srf.eu4oa1w0".to_string(),
        }
    }
}
