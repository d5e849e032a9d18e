//! Turns knowledge-base matches into the condition summaries returned to
//! clients, including the fallback summaries for unclear input and
//! unreadable uploads.

use crate::knowledge::{find_best_match, KnowledgeBase, MatchResult};
use crate::models::AnalysisReport;

const DEFAULT_SEVERITY: &str = "mild";
const NO_CONFIDENCE: &str = "0%";
const BALANCED_DIET: &str = "Balanced Diet";

/// Analyze typed symptoms.
pub fn analyze_text(kb: &KnowledgeBase, text: &str) -> AnalysisReport {
    match find_best_match(kb, text) {
        Some(result) => report_from_match(result),
        None => fallback(
            "Unclear Symptoms",
            "Try specific symptoms like 'fever', 'rash', 'vomiting'.".to_string(),
            BALANCED_DIET,
        ),
    }
}

/// Analyze text extracted from an uploaded lab report.
pub fn analyze_extracted(kb: &KnowledgeBase, extracted: &str) -> AnalysisReport {
    if extracted.trim().is_empty() {
        return fallback(
            "File Read Failed",
            "Could not read text. If using an image, make sure Tesseract OCR is installed. \
             If PDF, ensure it's text-based."
                .to_string(),
            "N/A",
        );
    }

    match find_best_match(kb, extracted) {
        Some(result) => report_from_match(result),
        None => {
            let sample: String = extracted.chars().take(50).collect();
            fallback(
                "Unknown Condition",
                format!(
                    "Analyzed report but found no specific diseases. Extracted Text Sample: '{sample}...'"
                ),
                BALANCED_DIET,
            )
        }
    }
}

fn report_from_match(result: MatchResult) -> AnalysisReport {
    let MatchResult {
        disease,
        confidence,
        matched,
        score,
        source,
    } = result;

    tracing::info!(condition = %disease.name, ?source, score, "Matched condition");
    if disease.severity_level().is_serious() {
        tracing::warn!(condition = %disease.name, "Serious condition matched");
    }

    AnalysisReport {
        condition: disease.name,
        severity: disease.severity,
        confidence: confidence.as_str().to_string(),
        description: disease.description,
        precautions: Some(disease.precautions),
        specialty: Some(disease.specialty),
        diet_plan: disease.diet_plan,
        matched_symptoms: matched,
    }
}

fn fallback(condition: &str, description: String, diet_plan: &str) -> AnalysisReport {
    AnalysisReport {
        condition: condition.to_string(),
        severity: DEFAULT_SEVERITY.to_string(),
        confidence: NO_CONFIDENCE.to_string(),
        description,
        precautions: None,
        specialty: None,
        diet_plan: diet_plan.to_string(),
        matched_symptoms: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::bundled().unwrap()
    }

    #[test]
    fn matched_text_carries_disease_fields() {
        let report = analyze_text(&kb(), "Runny nose and sneezing since yesterday");
        assert_eq!(report.condition, "Common Cold");
        assert_eq!(report.severity, "mild");
        assert_eq!(report.confidence, "99%");
        assert_eq!(report.specialty.as_deref(), Some("General Physician"));
        assert!(report.precautions.as_ref().is_some_and(|p| !p.is_empty()));
        assert_eq!(report.matched_symptoms, vec!["runny nose", "sneezing"]);
    }

    #[test]
    fn unclear_symptoms_fallback() {
        let report = analyze_text(&kb(), "I feel off");
        assert_eq!(report.condition, "Unclear Symptoms");
        assert_eq!(report.severity, "mild");
        assert_eq!(report.confidence, "0%");
        assert_eq!(report.diet_plan, "Balanced Diet");
        assert!(report.specialty.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("precautions").is_none());
        assert!(json.get("specialty").is_none());
        assert!(json.get("matched_symptoms").is_none());
    }

    #[test]
    fn blank_extraction_is_read_failure() {
        let report = analyze_extracted(&kb(), "  \n ");
        assert_eq!(report.condition, "File Read Failed");
        assert_eq!(report.diet_plan, "N/A");
        assert!(report.description.contains("Tesseract"));
    }

    #[test]
    fn unmatched_extraction_quotes_sample() {
        let text = "Cholesterol panel: all values within reference ranges for this patient sample";
        let report = analyze_extracted(&kb(), text);
        assert_eq!(report.condition, "Unknown Condition");
        assert!(report
            .description
            .contains("Extracted Text Sample: 'Cholesterol panel: all values within reference ran...'"));
    }

    #[test]
    fn lab_report_hits_marker() {
        let report = analyze_extracted(&kb(), "Widal test: WIDAL POSITIVE (1:160)");
        assert_eq!(report.condition, "Typhoid Fever");
        assert_eq!(report.confidence, "100%");
        assert_eq!(report.matched_symptoms, vec!["Lab Result: WIDAL POSITIVE"]);
    }
}
