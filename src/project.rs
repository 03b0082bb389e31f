use crate::error::PipelineError;
use crate::record::Record;

/// Fixed-schema feature summary of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub title: String,
    pub num_headings: usize,
    pub num_paragraphs: usize,
    pub num_links: usize,
}

pub const HEADER: [&str; 4] = ["title", "num_headings", "num_paragraphs", "num_links"];

/// Derive the feature row from a record. Counts are exact sequence
/// lengths — no deduplication, no filtering. Total over `Record`:
/// structural absence is rejected earlier, at `Record::from_json`.
pub fn project(record: &Record) -> FeatureRow {
    FeatureRow {
        title: record.title.clone(),
        num_headings: record.headings.len(),
        num_paragraphs: record.paragraphs.len(),
        num_links: record.links.len(),
    }
}

/// Encode header + one data row as CSV bytes.
pub fn to_csv(row: &FeatureRow) -> Result<Vec<u8>, PipelineError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    let counts = [
        row.num_headings.to_string(),
        row.num_paragraphs.to_string(),
        row.num_links.to_string(),
    ];
    wtr.write_record([
        row.title.as_str(),
        counts[0].as_str(),
        counts[1].as_str(),
        counts[2].as_str(),
    ])?;
    wtr.into_inner()
        .map_err(|e| PipelineError::Csv(e.into_error().into()))
}

// ── Tests ──
