//! Full-text index over collected job records.

use common::JobRecord;
use serde::Serialize;
use tantivy::{
    Document, Index, IndexReader, ReloadPolicy,
    collector::TopDocs,
    query::QueryParser,
    schema::{Field, NumericOptions, STORED, Schema, TEXT},
};

/// Search result returned by the API
#[derive(Debug, Serialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub company: String,
    pub location: String,
    pub score: f32,
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    fn empty(query: String) -> Self {
        Self {
            query,
            total_results: 0,
            results: vec![],
        }
    }
}

struct Fields {
    title: Field,
    company: Field,
    location: Field,
    description: Field,
    requirements: Field,
    salary_min: Field,
}

/// In-memory index rebuilt from the JSON output on every start.
pub struct JobIndex {
    reader: IndexReader,
    query_parser: QueryParser,
    fields: Fields,
}

impl JobIndex {
    pub fn build(jobs: &[JobRecord]) -> tantivy::Result<Self> {
        let mut schema_builder = Schema::builder();

        // Shown in results, so stored as well as indexed
        let title = schema_builder.add_text_field("title", TEXT | STORED);
        let company = schema_builder.add_text_field("company", TEXT | STORED);
        let location = schema_builder.add_text_field("location", TEXT | STORED);

        // Searchable but not stored (saves space)
        let description = schema_builder.add_text_field("description", TEXT);
        let requirements = schema_builder.add_text_field("requirements", TEXT);

        // Salary: indexed for filtering, but as i64 field
        let salary_min = schema_builder.add_i64_field("salary_min", NumericOptions::default().set_indexed());

        let index = Index::create_in_ram(schema_builder.build());
        let fields = Fields {
            title,
            company,
            location,
            description,
            requirements,
            salary_min,
        };

        let mut index_writer = index.writer_with_num_threads(1, 50_000_000)?;
        for job in jobs {
            index_writer.add_document(fields.document(job))?;
        }
        index_writer.commit()?;
        tracing::info!(jobs = jobs.len(), "search index built");

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommit)
            .try_into()?;
        let query_parser = QueryParser::for_index(
            &index,
            vec![
                fields.title,
                fields.company,
                fields.location,
                fields.description,
                fields.requirements,
            ],
        );

        Ok(Self {
            reader,
            query_parser,
            fields,
        })
    }

    /// Top `limit` hits for `query`. Empty or unparsable queries match nothing.
    pub fn search(&self, query: &str, limit: usize) -> SearchResponse {
        let query_str = query.trim().to_string();
        if query_str.is_empty() {
            return SearchResponse::empty(query_str);
        }

        let query = match self.query_parser.parse_query(&query_str) {
            Ok(q) => q,
            Err(err) => {
                tracing::debug!(query = %query_str, error = %err, "unparsable search query");
                return SearchResponse::empty(query_str);
            }
        };

        let searcher = self.reader.searcher();
        let top_docs = match searcher.search(&query, &TopDocs::with_limit(limit)) {
            Ok(docs) => docs,
            Err(err) => {
                tracing::warn!(query = %query_str, error = %err, "search failed");
                return SearchResponse::empty(query_str);
            }
        };

        let text = |doc: &Document, field: Field| {
            doc.get_first(field)
                .and_then(|v| v.as_text())
                .unwrap_or("Unknown")
                .to_string()
        };

        let results: Vec<SearchResult> = top_docs
            .into_iter()
            .filter_map(|(score, address)| searcher.doc(address).ok().map(|doc| (score, doc)))
            .map(|(score, doc)| SearchResult {
                title: text(&doc, self.fields.title),
                company: text(&doc, self.fields.company),
                location: text(&doc, self.fields.location),
                score,
            })
            .collect();

        SearchResponse {
            query: query_str,
            total_results: results.len(),
            results,
        }
    }
}

impl Fields {
    fn document(&self, job: &JobRecord) -> Document {
        let mut doc = Document::new();
        doc.add_text(self.title, &job.title);
        if let Some(company) = &job.company {
            doc.add_text(self.company, company);
        }
        if let Some(location) = &job.location {
            doc.add_text(self.location, location);
        }
        if let Some(description) = &job.description {
            doc.add_text(self.description, description);
        }
        for requirement in &job.requirements {
            doc.add_text(self.requirements, requirement);
        }
        if let Some(salary) = job.salary_min {
            doc.add_i64(self.salary_min, salary);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Vec<JobRecord> {
        vec![
            JobRecord {
                company: Some("Powered By MRP".to_string()),
                location: Some("Park City, Utah".to_string()),
                description: Some("Supply chain management role for medical devices.".to_string()),
                requirements: vec!["Logistics and operations background".to_string()],
                ..JobRecord::new("Supply Chain Manager")
            },
            JobRecord {
                company: Some("Powered By MRP".to_string()),
                location: Some("Flexible (Local training, travel optional)".to_string()),
                description: Some("Clinical trainer position for aesthetic device training.".to_string()),
                salary_min: Some(65000),
                ..JobRecord::new("Clinical Trainer")
            },
        ]
    }

    #[test]
    fn test_search_matches_title() {
        let index = JobIndex::build(&jobs()).unwrap();
        let response = index.search("trainer", 10);

        assert_eq!(response.total_results, 1);
        assert_eq!(response.results[0].title, "Clinical Trainer");
        assert_eq!(response.results[0].company, "Powered By MRP");
    }

    #[test]
    fn test_search_matches_requirements() {
        let index = JobIndex::build(&jobs()).unwrap();
        let response = index.search("logistics", 10);

        assert_eq!(response.total_results, 1);
        assert_eq!(response.results[0].location, "Park City, Utah");
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let index = JobIndex::build(&jobs()).unwrap();
        let response = index.search("   ", 10);
        assert_eq!(response.total_results, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_empty_catalogue_is_searchable() {
        let index = JobIndex::build(&[]).unwrap();
        assert_eq!(index.search("manager", 10).total_results, 0);
    }
}
