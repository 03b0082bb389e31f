//! Location-key derivation between pipeline stages.
//!
//! A stage's output key is a pure function of its input key: one path
//! segment is swapped and the file extension replaced. Keys that do not
//! carry the expected segment and extension are refused instead of passed
//! through, so a misrouted key can never silently name the wrong object.

use crate::error::PipelineError;

/// `raw/…/doc.html` → `structured/…/doc.json`
pub fn record_key(key: &str) -> Result<String, PipelineError> {
    derive(key, "raw", "structured", ".html", ".json")
}

/// `structured/…/doc.json` → `tabular/…/doc.csv`
pub fn features_key(key: &str) -> Result<String, PipelineError> {
    derive(key, "structured", "tabular", ".json", ".csv")
}

fn derive(
    key: &str,
    from_seg: &str,
    to_seg: &str,
    from_ext: &str,
    to_ext: &str,
) -> Result<String, PipelineError> {
    let stem = key
        .strip_suffix(from_ext)
        .ok_or_else(|| PipelineError::InvalidKey {
            key: key.to_string(),
            reason: "unexpected file extension",
        })?;

    // Rewrite the first whole path segment that matches; substring hits
    // inside other segments or file names do not count.
    let mut segments: Vec<&str> = stem.split('/').collect();
    let pos = segments
        .iter()
        .position(|s| *s == from_seg)
        .ok_or_else(|| PipelineError::InvalidKey {
            key: key.to_string(),
            reason: "expected path segment not present",
        })?;
    segments[pos] = to_seg;

    Ok(format!("{}{}", segments.join("/"), to_ext))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_one_derivation() {
        assert_eq!(
            record_key("raw/2024/page.html").unwrap(),
            "structured/2024/page.json"
        );
    }

    #[test]
    fn stage_two_derivation() {
        assert_eq!(
            features_key("structured/2024/page.json").unwrap(),
            "tabular/2024/page.csv"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = record_key("raw/x/y.html").unwrap();
        let b = record_key("raw/x/y.html").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_extension_is_refused() {
        assert!(matches!(
            record_key("raw/page.txt"),
            Err(PipelineError::InvalidKey { .. })
        ));
    }

    #[test]
    fn missing_segment_is_refused() {
        assert!(matches!(
            record_key("incoming/page.html"),
            Err(PipelineError::InvalidKey { .. })
        ));
    }

    #[test]
    fn substring_segments_do_not_match() {
        // "rawhide" contains "raw" but is not the raw/ segment.
        assert!(record_key("rawhide/page.html").is_err());
        // A file named "raw.html" under the segment still derives cleanly.
        assert_eq!(
            record_key("raw/raw.html").unwrap(),
            "structured/raw.json"
        );
    }
}
