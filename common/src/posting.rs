use serde::{Deserialize, Serialize};

/// A job in the shape the careers site reads (`jobs.json`).
///
/// Text fields are Markdown. `posted_at` is an ISO date (`YYYY-MM-DD`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Posting {
    /// URL slug derived from the title.
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub description_md: String,
    pub requirements_md: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice_to_haves_md: Option<String>,
    pub apply_url: String,
    pub posted_at: String,
    pub remote: bool,
    pub locations: Vec<String>,
    /// `FULL_TIME`, `PART_TIME`, ...
    pub employment_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_uses_site_field_names() {
        let posting = Posting {
            id: "finance-manager".to_string(),
            title: "Finance Manager".to_string(),
            department: "Finance".to_string(),
            location: "Park City, UT".to_string(),
            kind: "Full Time".to_string(),
            salary_min: Some(80000),
            salary_max: Some(120000),
            currency: Some("USD".to_string()),
            description_md: "Join us.".to_string(),
            requirements_md: "- Accounting".to_string(),
            nice_to_haves_md: None,
            apply_url: "https://example.com/apply?jobId=1".to_string(),
            posted_at: "2024-07-05".to_string(),
            remote: false,
            locations: vec!["Park City, UT".to_string()],
            employment_type: "FULL_TIME".to_string(),
        };

        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["type"], "Full Time");
        assert_eq!(value["employment_type"], "FULL_TIME");
        assert!(value.get("kind").is_none());
        assert!(value.get("nice_to_haves_md").is_none());

        let back: Posting = serde_json::from_value(value).unwrap();
        assert_eq!(back, posting);
    }
}
