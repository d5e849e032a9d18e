use serde::{Deserialize, Serialize};

/// Condition summary returned by the analysis endpoints.
///
/// Fallback summaries (no match, unreadable file) carry no precautions or
/// specialty, so those keys are omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub condition: String,
    pub severity: String,
    pub confidence: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub diet_plan: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_symptoms: Vec<String>,
}

/// Free-text symptom input for `POST /analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct SymptomInput {
    pub text: String,
}
