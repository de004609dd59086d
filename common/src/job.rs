use serde::{Deserialize, Serialize};

use crate::company::CompanyInfo;

/// Placeholder written into a field the page did not provide.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One job posting as collected from the listings site.
///
/// Only `title` is mandatory. Absent optional fields are left out of the JSON
/// output entirely, so records from different collectors keep their own shape.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct JobRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Benefits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
}

impl JobRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Benefits are published either as a single sentence or as a bullet list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Benefits {
    Text(String),
    List(Vec<String>),
}

impl Benefits {
    /// Flattened form used in CSV cells.
    pub fn joined(&self) -> String {
        match self {
            Benefits::Text(text) => text.clone(),
            Benefits::List(items) => items.join("; "),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let json = serde_json::to_string(&JobRecord::new("Ecommerce Manager")).unwrap();
        assert_eq!(json, r#"{"title":"Ecommerce Manager"}"#);
    }

    #[test]
    fn test_benefits_accepts_text_or_list() {
        let text: Benefits = serde_json::from_str(r#""Competitive salary""#).unwrap();
        assert_eq!(text, Benefits::Text("Competitive salary".to_string()));

        let list: Benefits = serde_json::from_str(r#"["Paid training", "Flexible schedule"]"#).unwrap();
        assert_eq!(list.joined(), "Paid training; Flexible schedule");
    }
}
