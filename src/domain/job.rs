use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output column order of the harvested CSV
pub const COLUMNS: [&str; 19] = [
    "jobId",
    "title",
    "job_url",
    "branch",
    "company",
    "company_url",
    "review",
    "description",
    "type",
    "salary",
    "shift",
    "benefit",
    "category",
    "subcategory",
    "expire_at",
    "is_claimed",
    "average_rating",
    "number_of_jobs",
    "third_party_apply_url",
];

/// One harvested listing.
///
/// Every field is always populated; values that could not be read hold
/// the configured placeholder instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub title: String,
    pub job_url: String,
    #[serde(rename = "branch")]
    pub location: String,
    pub company: String,
    pub company_url: String,
    pub review: String,
    pub description: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary: String,
    pub shift: String,
    pub benefit: String,
    pub category: String,
    pub subcategory: String,
    pub expire_at: String,
    pub is_claimed: bool,
    pub average_rating: String,
    pub number_of_jobs: String,
    pub third_party_apply_url: String,
}

impl JobRecord {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Values in [`COLUMNS`] order
    pub fn to_row(&self) -> [String; 19] {
        [
            self.job_id.clone(),
            self.title.clone(),
            self.job_url.clone(),
            self.location.clone(),
            self.company.clone(),
            self.company_url.clone(),
            self.review.clone(),
            self.description.clone(),
            self.job_type.clone(),
            self.salary.clone(),
            self.shift.clone(),
            self.benefit.clone(),
            self.category.clone(),
            self.subcategory.clone(),
            self.expire_at.clone(),
            self.is_claimed.to_string(),
            self.average_rating.clone(),
            self.number_of_jobs.clone(),
            self.third_party_apply_url.clone(),
        ]
    }
}

#[cfg(test)]
pub(crate) fn sample_record(title: &str) -> JobRecord {
    JobRecord {
        job_id: JobRecord::generate_id(),
        title: title.to_string(),
        job_url: "https://example.com/viewjob?jk=1".into(),
        location: "San Francisco, CA".into(),
        company: "Acme".into(),
        company_url: "https://example.com/cmp/acme".into(),
        review: "1,204".into(),
        description: "Build things.".into(),
        job_type: "Full-time".into(),
        salary: "$150,000 a year".into(),
        shift: "Monday to Friday".into(),
        benefit: "Dental insurance".into(),
        category: "Engineering".into(),
        subcategory: "Software".into(),
        expire_at: "05/01/2027".into(),
        is_claimed: false,
        average_rating: "4.1".into(),
        number_of_jobs: "37".into(),
        third_party_apply_url: "https://example.com/viewjob?jk=1".into(),
    }
}
