use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// One entry of the static disease knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub name: String,
    pub symptoms: Vec<String>,
    pub severity: String,
    pub description: String,
    pub specialty: String,
    pub diet_plan: String,
    #[serde(default)]
    pub precautions: Vec<String>,
}

impl Disease {
    pub fn severity_level(&self) -> Severity {
        Severity::classify(&self.severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precautions_default_to_empty() {
        let json = r#"{
            "name": "Common Cold",
            "symptoms": ["sneezing"],
            "severity": "mild",
            "description": "Viral infection of the nose and throat.",
            "specialty": "General Physician",
            "diet_plan": "Warm fluids"
        }"#;
        let disease: Disease = serde_json::from_str(json).unwrap();
        assert!(disease.precautions.is_empty());
        assert_eq!(disease.severity_level(), Severity::Mild);
    }
}
