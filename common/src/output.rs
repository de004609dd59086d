//! JSON and CSV writers shared by every collector.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::OutputError;
use crate::job::JobRecord;

/// Column order of every CSV file the toolkit writes.
pub const CSV_HEADERS: [&str; 14] = [
    "title",
    "company",
    "location",
    "posted_time",
    "job_type",
    "employment_type",
    "description",
    "requirements",
    "benefits",
    "salary",
    "job_url",
    "contact_email",
    "contact_phone",
    "source",
];

/// A `JobRecord` flattened into one CSV row; list fields are joined with `"; "`.
#[derive(Debug, Serialize, PartialEq)]
pub struct CsvRow {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_time: String,
    pub job_type: String,
    pub employment_type: String,
    pub description: String,
    pub requirements: String,
    pub benefits: String,
    pub salary: String,
    pub job_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub source: String,
}

impl From<&JobRecord> for CsvRow {
    fn from(job: &JobRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let contact = job.contact_info.as_ref();

        Self {
            title: job.title.clone(),
            company: text(&job.company),
            location: text(&job.location),
            posted_time: text(&job.posted_time),
            job_type: text(&job.job_type),
            employment_type: text(&job.employment_type),
            description: text(&job.description),
            requirements: job.requirements.join("; "),
            benefits: job.benefits.as_ref().map(|b| b.joined()).unwrap_or_default(),
            salary: text(&job.salary),
            job_url: text(&job.job_url),
            contact_email: contact.and_then(|c| c.email.clone()).unwrap_or_default(),
            contact_phone: contact.and_then(|c| c.phone.clone()).unwrap_or_default(),
            source: text(&job.source),
        }
    }
}

/// Pretty JSON with two-space indentation, non-ASCII left unescaped.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let json = to_json_string(value)?;
    fs::write(path, json).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved JSON");
    Ok(())
}

/// Writes the header row followed by one flattened row per record.
pub fn write_csv_to<W: io::Write>(writer: W, jobs: &[JobRecord]) -> Result<W, csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for job in jobs {
        csv_writer.serialize(CsvRow::from(job))?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

pub fn write_csv(path: &Path, jobs: &[JobRecord]) -> Result<(), OutputError> {
    let file = fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(file, jobs).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = jobs.len(), "saved CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Benefits, ContactInfo};

    fn sample_job() -> JobRecord {
        JobRecord {
            company: Some("Powered By MRP".to_string()),
            requirements: vec!["A".to_string(), "B".to_string()],
            benefits: Some(Benefits::List(vec![
                "Paid training + travel".to_string(),
                "Easy onboarding and support".to_string(),
            ])),
            contact_info: Some(ContactInfo {
                email: Some("training@mrp.io".to_string()),
                phone: None,
            }),
            ..JobRecord::new("Clinical Trainer")
        }
    }

    #[test]
    fn test_requirements_are_joined_with_semicolons() {
        let row = CsvRow::from(&sample_job());
        assert_eq!(row.requirements, "A; B");
        assert_eq!(row.benefits, "Paid training + travel; Easy onboarding and support");
        assert_eq!(row.contact_email, "training@mrp.io");
        assert_eq!(row.contact_phone, "");
    }

    #[test]
    fn test_csv_has_header_even_without_rows() {
        let bytes = write_csv_to(Vec::new(), &[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), CSV_HEADERS.join(","));
    }

    #[test]
    fn test_csv_row_values_line_up_with_headers() {
        let bytes = write_csv_to(Vec::new(), &[sample_job()]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());

        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let requirements = headers.iter().position(|h| h == "requirements").unwrap();
        assert_eq!(&row[0], "Clinical Trainer");
        assert_eq!(&row[requirements], "A; B");
    }

    #[test]
    fn test_json_uses_two_space_indent_and_raw_utf8() {
        let job = JobRecord::new("Train locally — travel optional");
        let json = to_json_string(&vec![job]).unwrap();
        assert!(json.contains("\n  {\n    \"title\": \"Train locally — travel optional\""));
    }

    #[test]
    fn test_write_json_and_csv_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("jobs.json");
        let csv_path = dir.path().join("jobs.csv");

        write_json(&json_path, &vec![sample_job()]).unwrap();
        write_csv(&csv_path, &[sample_job()]).unwrap();

        let loaded: Vec<JobRecord> =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(loaded, vec![sample_job()]);
        assert!(fs::read_to_string(&csv_path).unwrap().contains("A; B"));
    }

    #[test]
    fn test_write_json_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("jobs.json");
        let err = write_json(&path, &Vec::<JobRecord>::new()).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
