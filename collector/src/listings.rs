//! Hand-authored job records taken from the Powered By MRP company page.
//!
//! No network access: the output is identical on every run.

use std::path::{Path, PathBuf};

use common::output::{write_csv, write_json};
use common::{Benefits, CompanyInfo, ContactInfo, Funding, JobRecord, OutputError};

use crate::{COMPANY_LOCATION, COMPANY_NAME};

pub const JOBS_JSON: &str = "mrp_jobs_extracted.json";
pub const JOBS_CSV: &str = "mrp_jobs_extracted.csv";
pub const COMPANY_JSON: &str = "mrp_company_info.json";

const SOURCE: &str = "LinkedIn Company Page";
const STANDARD_BENEFITS: &str = "Competitive salary and benefits package";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A full-time Park City position with the standard benefits line.
fn full_time(title: &str, posted_time: &str, description: &str, requirements: &[&str]) -> JobRecord {
    JobRecord {
        company: Some(COMPANY_NAME.to_string()),
        location: Some(COMPANY_LOCATION.to_string()),
        posted_time: Some(posted_time.to_string()),
        job_type: Some("Full-time".to_string()),
        description: Some(description.to_string()),
        requirements: strings(requirements),
        benefits: Some(Benefits::Text(STANDARD_BENEFITS.to_string())),
        employment_type: Some("Full-time".to_string()),
        source: Some(SOURCE.to_string()),
        ..JobRecord::new(title)
    }
}

/// The six open positions, in the order the company page lists them.
pub fn job_records() -> Vec<JobRecord> {
    vec![
        full_time(
            "Ecommerce Specialist",
            "4 days ago",
            "Ecommerce specialist position at Powered By MRP focusing on online marketplace operations for medical aesthetic devices.",
            &[
                "Experience in ecommerce operations",
                "Knowledge of medical device marketplace",
                "Strong analytical skills",
                "Experience with online platforms",
            ],
        ),
        full_time(
            "Supply Chain Manager",
            "1 week ago",
            "Supply chain management role focusing on the largest private delivery network in aesthetics, ensuring safe and timely delivery of medical devices.",
            &[
                "Supply chain management experience",
                "Logistics and operations background",
                "Experience with medical devices preferred",
                "Strong organizational skills",
            ],
        ),
        full_time(
            "Director of Sales and Operations",
            "2 weeks ago",
            "Senior leadership role overseeing sales and operations for the medical aesthetic marketplace.",
            &[
                "Senior leadership experience",
                "Sales and operations background",
                "Medical device industry experience preferred",
                "Strategic planning skills",
            ],
        ),
        full_time(
            "Depot Service and Sales Operations Manager",
            "2 weeks ago",
            "Management role overseeing depot service operations and sales coordination for medical aesthetic devices.",
            &[
                "Operations management experience",
                "Service operations background",
                "Sales coordination experience",
                "Medical device knowledge preferred",
            ],
        ),
        full_time(
            "Ecommerce Manager",
            "3 weeks ago",
            "Ecommerce management role for the medical aesthetic marketplace platform.",
            &[
                "Ecommerce management experience",
                "Digital marketplace knowledge",
                "Analytics and reporting skills",
                "Medical device industry experience preferred",
            ],
        ),
        JobRecord {
            company: Some(COMPANY_NAME.to_string()),
            location: Some("Flexible (Local training, travel optional)".to_string()),
            posted_time: Some("4 weeks ago".to_string()),
            job_type: Some("Contract (1099)".to_string()),
            description: Some(
                "Flexible clinical trainer position for aesthetic device training. Train locally with optional travel opportunities."
                    .to_string(),
            ),
            requirements: strings(&[
                "Clinical training experience",
                "Aesthetic device knowledge",
                "Training and education background",
                "Flexible schedule availability",
            ]),
            benefits: Some(Benefits::List(strings(&[
                "Flexible schedule (1099 Contract)",
                "Train locally — travel optional",
                "Paid training + travel",
                "Easy onboarding and support",
            ]))),
            employment_type: Some("Contract".to_string()),
            contact_info: Some(ContactInfo {
                email: Some("training@mrp.io".to_string()),
                phone: Some("435-704-9688".to_string()),
            }),
            source: Some(SOURCE.to_string()),
            ..JobRecord::new("Clinical Trainer (Field Training Team)")
        },
    ]
}

pub fn company_info() -> CompanyInfo {
    CompanyInfo {
        company_name: COMPANY_NAME.to_string(),
        industry: "Medical Equipment Manufacturing".to_string(),
        company_size: "51-200 employees".to_string(),
        headquarters: COMPANY_LOCATION.to_string(),
        founded: "2015".to_string(),
        website: "http://www.mrp.io".to_string(),
        description: "Powered by MRP wants to radically decrease healthcare cost with technology first solutions. Our commitment is to build the first digitally enabled end-to-end marketplace for Medical Aesthetic Professional. At Powered by MRP we focus on providing aesthetic lasers & devices, resources, training, education and support to our customers to empower them to deliver top service to their clients.".to_string(),
        specialties: strings(&[
            "Medical Device Marketplace",
            "Aesthetic Solutions",
            "Intense Pulsed Light (IPL)",
            "Aesthetic Devices",
            "Lasers",
            "Dermatology",
            "Plastic Surgery",
            "Medspas",
            "New Devices",
            "Refurbished Devices",
        ]),
        funding: Funding {
            last_round: "Series A".to_string(),
            date: "July 5, 2024".to_string(),
            investors: strings(&["Broadhaven Capital Partners", "Aries Capital Partners"]),
        },
        unique_features: strings(&[
            "Largest private delivery network in aesthetics",
            "Lowest failure rate in the industry",
            "Technology-first solutions",
            "Digitally enabled marketplace",
        ]),
    }
}

/// Embeds a copy of `info` in every record.
pub fn attach_company_info(mut jobs: Vec<JobRecord>, info: &CompanyInfo) -> Vec<JobRecord> {
    for job in &mut jobs {
        job.company_info = Some(info.clone());
    }
    jobs
}

/// Records plus company info, ready to write.
pub fn extracted_jobs() -> Vec<JobRecord> {
    attach_company_info(job_records(), &company_info())
}

/// Writes the jobs JSON, the flattened CSV and the company info of the first
/// record into `dir`. Returns the paths written, in that order.
pub fn save(dir: &Path, jobs: &[JobRecord]) -> Result<Vec<PathBuf>, OutputError> {
    let paths = [JOBS_JSON, JOBS_CSV, COMPANY_JSON].map(|name| dir.join(name));

    write_json(&paths[0], jobs)?;
    write_csv(&paths[1], jobs)?;
    match jobs.first().and_then(|job| job.company_info.as_ref()) {
        Some(info) => write_json(&paths[2], info)?,
        None => write_json(&paths[2], &serde_json::json!({}))?,
    }

    Ok(paths.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::output::{to_json_string, write_csv_to};

    #[test]
    fn test_always_six_records() {
        let jobs = extracted_jobs();
        assert_eq!(jobs.len(), 6);
        assert_eq!(jobs[0].title, "Ecommerce Specialist");
        assert_eq!(jobs[5].title, "Clinical Trainer (Field Training Team)");
    }

    #[test]
    fn test_company_info_identical_on_every_record() {
        let jobs = extracted_jobs();
        let first = serde_json::to_string(&jobs[0].company_info).unwrap();
        for job in &jobs {
            assert!(job.company_info.is_some());
            assert_eq!(serde_json::to_string(&job.company_info).unwrap(), first);
        }
    }

    #[test]
    fn test_output_is_byte_identical_across_runs() {
        let first = to_json_string(&extracted_jobs()).unwrap();
        let second = to_json_string(&extracted_jobs()).unwrap();
        assert_eq!(first, second);

        let csv_first = write_csv_to(Vec::new(), &extracted_jobs()).unwrap();
        let csv_second = write_csv_to(Vec::new(), &extracted_jobs()).unwrap();
        assert_eq!(csv_first, csv_second);
    }

    #[test]
    fn test_only_the_trainer_has_contact_and_list_benefits() {
        let jobs = job_records();
        let with_contact: Vec<_> = jobs.iter().filter(|j| j.contact_info.is_some()).collect();
        assert_eq!(with_contact.len(), 1);
        assert_eq!(
            with_contact[0].contact_info.as_ref().unwrap().email.as_deref(),
            Some("training@mrp.io")
        );
        assert!(matches!(with_contact[0].benefits, Some(Benefits::List(_))));
    }

    #[test]
    fn test_json_key_order_follows_record_layout() {
        let json = to_json_string(&job_records()[0]).unwrap();
        let title = json.find("\"title\"").unwrap();
        let requirements = json.find("\"requirements\"").unwrap();
        let source = json.find("\"source\"").unwrap();
        assert!(title < requirements && requirements < source);
    }

    #[test]
    fn test_save_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = save(dir.path(), &extracted_jobs()).unwrap();

        assert_eq!(paths.len(), 3);
        let company: CompanyInfo =
            serde_json::from_str(&std::fs::read_to_string(&paths[2]).unwrap()).unwrap();
        assert_eq!(company, company_info());

        let csv = std::fs::read_to_string(&paths[1]).unwrap();
        assert_eq!(csv.lines().count(), 7);
    }

    #[test]
    fn test_save_without_records_writes_empty_company_object() {
        let dir = tempfile::tempdir().unwrap();
        let paths = save(dir.path(), &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "[]");
        assert_eq!(std::fs::read_to_string(&paths[2]).unwrap(), "{}");
    }
}
