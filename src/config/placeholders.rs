use serde::{Deserialize, Serialize};

const PENDING: &str = "pending";
const UNKNOWN: &str = "unknown";

/// Sentinel values written when a field cannot be read from the page.
///
/// Each output column has its own entry so the fallback policy lives in
/// one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub title: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub benefit: String,
    pub description: String,
    pub shift: String,
    pub company: String,
    pub company_url: String,
    pub job_url: String,
    pub third_party_apply_url: String,
    pub average_rating: String,
    pub review: String,
    pub number_of_jobs: String,
    pub category: String,
    pub subcategory: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            title: PENDING.to_string(),
            location: PENDING.to_string(),
            salary: PENDING.to_string(),
            job_type: UNKNOWN.to_string(),
            benefit: UNKNOWN.to_string(),
            description: PENDING.to_string(),
            shift: UNKNOWN.to_string(),
            company: PENDING.to_string(),
            company_url: PENDING.to_string(),
            job_url: PENDING.to_string(),
            third_party_apply_url: PENDING.to_string(),
            average_rating: PENDING.to_string(),
            review: PENDING.to_string(),
            number_of_jobs: PENDING.to_string(),
            category: PENDING.to_string(),
            subcategory: PENDING.to_string(),
        }
    }
}

impl Placeholders {
    /// Use the same sentinel for every field
    pub fn uniform(value: &str) -> Self {
        Self {
            title: value.to_string(),
            location: value.to_string(),
            salary: value.to_string(),
            job_type: value.to_string(),
            benefit: value.to_string(),
            description: value.to_string(),
            shift: value.to_string(),
            company: value.to_string(),
            company_url: value.to_string(),
            job_url: value.to_string(),
            third_party_apply_url: value.to_string(),
            average_rating: value.to_string(),
            review: value.to_string(),
            number_of_jobs: value.to_string(),
            category: value.to_string(),
            subcategory: value.to_string(),
        }
    }
}
