//! Human-readable run summaries printed to stdout.

use std::fmt::{self, Write};

use common::{CompanyInfo, ExtractionReport, JobRecord, Posting};

const RULE: &str = "============================================================";

/// Short summary printed by the two scrapers.
pub fn scraping_summary(report: &ExtractionReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "\n=== SCRAPING SUMMARY ===")?;
    writeln!(out, "Total jobs found: {}", report.records.len())?;

    if !report.records.is_empty() {
        writeln!(out, "\nJob titles found:")?;
        for (i, job) in report.records.iter().enumerate() {
            let title: &str = if job.title.is_empty() { "N/A" } else { &job.title };
            let location = job.location.as_deref().unwrap_or("N/A");
            writeln!(out, "{}. {} - {}", i + 1, title, location)?;
        }
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        writeln!(out, "\nProblems ({}):", failures.len())?;
        for issue in failures {
            writeln!(out, "- {issue}")?;
        }
    }

    writeln!(out, "\n=== END SUMMARY ===")?;
    Ok(out)
}

fn section(out: &mut String, heading: &str) -> fmt::Result {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "{heading}")?;
    writeln!(out, "{RULE}")
}

/// Long-form summary printed by the static extractor.
pub fn extraction_summary(jobs: &[JobRecord]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let company: Option<&CompanyInfo> = jobs.first().and_then(|job| job.company_info.as_ref());

    section(&mut out, "POWERED BY MRP - JOB EXTRACTION SUMMARY")?;
    writeln!(out, "Total jobs found: {}", jobs.len())?;
    if let Some(info) = company {
        writeln!(out, "Company: {}", info.company_name)?;
        writeln!(out, "Industry: {}", info.industry)?;
        writeln!(out, "Location: {}", info.headquarters)?;
        writeln!(out, "Company Size: {}", info.company_size)?;
        writeln!(out, "Founded: {}", info.founded)?;
    }

    section(&mut out, "AVAILABLE POSITIONS:")?;
    for (i, job) in jobs.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, job.title)?;
        writeln!(out, "   Location: {}", job.location.as_deref().unwrap_or("N/A"))?;
        writeln!(out, "   Type: {}", job.employment_type.as_deref().unwrap_or("N/A"))?;
        writeln!(out, "   Posted: {}", job.posted_time.as_deref().unwrap_or("N/A"))?;
        if let Some(contact) = &job.contact_info {
            if let Some(email) = &contact.email {
                writeln!(out, "   Contact: {email}")?;
            }
            if let Some(phone) = &contact.phone {
                writeln!(out, "   Phone: {phone}")?;
            }
        }
    }

    if let Some(info) = company {
        section(&mut out, "COMPANY SPECIALTIES:")?;
        for specialty in &info.specialties {
            writeln!(out, "• {specialty}")?;
        }

        section(&mut out, "UNIQUE COMPANY FEATURES:")?;
        for feature in &info.unique_features {
            writeln!(out, "• {feature}")?;
        }
    }
    Ok(out)
}

/// Listing printed by the ADP collector: one block per posting.
pub fn adp_summary(report: &ExtractionReport<Posting>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "\n📋 Found {} job postings:", report.records.len())?;
    for (i, posting) in report.records.iter().enumerate() {
        writeln!(out, "{}. {} ({})", i + 1, posting.title, posting.department)?;
        writeln!(out, "   Location: {}", posting.location)?;
        writeln!(out, "   Type: {}", posting.kind)?;
        if let (Some(min), Some(max)) = (posting.salary_min, posting.salary_max) {
            writeln!(out, "   Salary: {min} - {max}")?;
        }
        writeln!(out, "   Apply URL: {}", posting.apply_url)?;
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        writeln!(out, "\nProblems ({}):", failures.len())?;
        for issue in failures {
            writeln!(out, "- {issue}")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::extracted_jobs;
    use common::{IssueKind, Stage};

    #[test]
    fn test_scraping_summary_lists_titles_and_failures() {
        let mut report = ExtractionReport::default();
        report.records.push(JobRecord {
            location: Some("Park City, Utah".to_string()),
            ..JobRecord::new("Supply Chain Manager")
        });
        report.records.push(JobRecord::new(""));
        report.push_issue(2, Stage::Detail, None, IssueKind::Navigation("reset".to_string()));

        let text = scraping_summary(&report).unwrap();

        assert!(text.contains("Total jobs found: 2"));
        assert!(text.contains("1. Supply Chain Manager - Park City, Utah"));
        assert!(text.contains("2. N/A - N/A"));
        assert!(text.contains("- detail #3: navigation failed: reset"));
    }

    #[test]
    fn test_empty_scrape_has_no_title_section() {
        let text = scraping_summary(&ExtractionReport::default()).unwrap();
        assert!(text.contains("Total jobs found: 0"));
        assert!(!text.contains("Job titles found"));
    }

    #[test]
    fn test_extraction_summary_shows_contact_and_specialties() {
        let text = extraction_summary(&extracted_jobs()).unwrap();
        assert!(text.contains("Total jobs found: 6"));
        assert!(text.contains("6. Clinical Trainer (Field Training Team)"));
        assert!(text.contains("   Contact: training@mrp.io"));
        assert!(text.contains("• Refurbished Devices"));
        assert!(text.contains("• Lowest failure rate in the industry"));
    }

    #[test]
    fn test_adp_summary_lists_apply_urls() {
        let mut report = ExtractionReport::default();
        report.records.push(Posting {
            id: "finance-manager".to_string(),
            title: "Finance Manager".to_string(),
            department: "Finance".to_string(),
            location: "Park City, UT".to_string(),
            kind: "Full Time".to_string(),
            salary_min: Some(80000),
            salary_max: Some(120000),
            currency: Some("USD".to_string()),
            description_md: String::new(),
            requirements_md: String::new(),
            nice_to_haves_md: None,
            apply_url: "https://example.com/apply?jobId=9201410695317".to_string(),
            posted_at: "2024-07-05".to_string(),
            remote: false,
            locations: vec!["Park City, UT".to_string()],
            employment_type: "FULL_TIME".to_string(),
        });

        let text = adp_summary(&report).unwrap();

        assert!(text.contains("Found 1 job postings"));
        assert!(text.contains("1. Finance Manager (Finance)"));
        assert!(text.contains("   Salary: 80000 - 120000"));
        assert!(text.contains("   Apply URL: https://example.com/apply?jobId=9201410695317"));
        assert!(!text.contains("Problems"));
    }
}
