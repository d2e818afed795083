// src/export.rs
use crate::types::JobRecord;
use anyhow::{Context, Result};
use std::io::Write;

/// Fixed export column order. Downstream consumers rely on it.
const COLUMNS: [&str; 13] = [
    "title",
    "company",
    "job_type",
    "salary",
    "benefits",
    "description_preview",
    "apply_link",
    "recruiter_name",
    "recruiter_title",
    "recruiter_linkedin",
    "tags",
    "source_site",
    "scraped_at",
];

/// Write records as CSV: one header line plus one line per record.
pub fn write_csv<W: Write>(records: &[JobRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    csv_writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;

    for record in records {
        let preview = record.description_preview();
        let tags = record.tags_joined();
        csv_writer
            .write_record([
                record.title.as_str(),
                record.company.as_str(),
                record.job_type.as_str(),
                record.salary.as_str(),
                record.benefits.as_str(),
                preview.as_str(),
                record.apply_link.as_str(),
                record.recruiter_name.as_str(),
                record.recruiter_title.as_str(),
                record.recruiter_linkedin.as_str(),
                tags.as_str(),
                record.source_site.as_str(),
                record.scraped_at.as_str(),
            ])
            .context("Failed to write CSV row")?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// CSV document in memory, ready to serve as a download.
pub fn to_csv_bytes(records: &[JobRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Vec<JobRecord> {
        (0..n)
            .map(|i| {
                let mut record = JobRecord::new("RemoteOK");
                record.title = format!("Engineer {}", i);
                record.company = "Acme".to_string();
                record.tags = vec!["Remote".to_string(), "Tech".to_string()];
                record
            })
            .collect()
    }

    #[test]
    fn test_n_records_produce_n_plus_one_lines() {
        let bytes = to_csv_bytes(&sample(3)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end().lines().count(), 4);
    }

    #[test]
    fn test_header_has_thirteen_columns_in_order() {
        let bytes = to_csv_bytes(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.trim_end(),
            "title,company,job_type,salary,benefits,description_preview,apply_link,\
             recruiter_name,recruiter_title,recruiter_linkedin,tags,source_site,scraped_at"
        );
    }

    #[test]
    fn test_tags_are_comma_joined_in_one_cell() {
        let bytes = to_csv_bytes(&sample(1)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Remote, Tech\""));
    }

    #[test]
    fn test_preview_is_bounded() {
        let mut record = JobRecord::new("RemoteOK");
        record.description = "d".repeat(1000);
        let bytes = to_csv_bytes(&[record]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        let preview = row.split(',').nth(5).unwrap();
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));
    }
}
