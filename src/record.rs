use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Structured representation of one HTML document.
///
/// All four fields are always present in the serialized form, even when
/// empty. `headings` preserves document order across levels h1–h6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    /// `None` when the anchor carried no href attribute; serialized as
    /// JSON null rather than omitted, so the stored record stays
    /// self-describing.
    pub href: Option<String>,
}

/// Intake shape: every field optional so absence can be reported as a
/// structured `MissingField` instead of a serde key error.
#[derive(Deserialize)]
struct RawRecord {
    title: Option<String>,
    headings: Option<Vec<String>>,
    paragraphs: Option<Vec<String>>,
    links: Option<Vec<Link>>,
}

impl Record {
    /// Parse a stored record, checking structural completeness.
    ///
    /// JSON that does not parse, or whose fields have the wrong shape, is
    /// `MalformedInput`; a well-formed object lacking one of the four
    /// fields is `MissingField` naming the first absent one.
    pub fn from_json(bytes: &[u8]) -> Result<Record, PipelineError> {
        let raw: RawRecord = serde_json::from_slice(bytes)
            .map_err(|e| PipelineError::MalformedInput(e.to_string()))?;
        Ok(Record {
            title: raw.title.ok_or(PipelineError::MissingField("title"))?,
            headings: raw
                .headings
                .ok_or(PipelineError::MissingField("headings"))?,
            paragraphs: raw
                .paragraphs
                .ok_or(PipelineError::MissingField("paragraphs"))?,
            links: raw.links.ok_or(PipelineError::MissingField("links"))?,
        })
    }

    /// Serialize for storage. Pretty-printed so repeated extractions of
    /// unchanged input are byte-identical and diffable.
    pub fn to_json(&self) -> Result<Vec<u8>, PipelineError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| PipelineError::MalformedInput(e.to_string()))
    }
}

// ── Tests ──
