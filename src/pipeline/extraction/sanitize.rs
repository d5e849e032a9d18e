use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Sanitize extracted text before matching.
/// Strips control characters and collapses line breaks and runs of spaces
/// into single spaces, so markers split across lines still match.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let printable: String = raw
        .chars()
        .map(|c| if c.is_control() && !c.is_whitespace() { ' ' } else { c })
        .collect();
    WHITESPACE_RUN.replace_all(&printable, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let clean = sanitize_extracted_text("Patient:\x00Dubois");
        assert!(!clean.contains('\x00'));
        assert_eq!(clean, "Patient: Dubois");
    }

    #[test]
    fn joins_markers_broken_across_lines() {
        let clean = sanitize_extracted_text("Platelet count\n   low\r\n\n");
        assert_eq!(clean, "Platelet count low");
    }

    #[test]
    fn preserves_medical_punctuation() {
        let clean = sanitize_extracted_text("HbA1c > 6.5 %  (ref 4.0-5.6)");
        assert_eq!(clean, "HbA1c > 6.5 % (ref 4.0-5.6)");
    }

    #[test]
    fn blank_input_stays_blank() {
        assert_eq!(sanitize_extracted_text(" \n\t "), "");
    }
}
