use serde::{Deserialize, Serialize};

/// Descriptive facts about the hiring company.
///
/// The static extractor embeds one copy of this in every record; it is not
/// normalized, so the same value repeats once per job in the JSON output.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CompanyInfo {
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub headquarters: String,
    pub founded: String,
    pub website: String,
    pub description: String,
    pub specialties: Vec<String>,
    pub funding: Funding,
    pub unique_features: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Funding {
    pub last_round: String,
    pub date: String,
    pub investors: Vec<String>,
}
