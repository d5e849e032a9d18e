use super::lab_rules::{next_marker_hit, LAB_REPORT_RULES};
use super::store::KnowledgeBase;
use crate::models::Disease;

/// Points for a symptom phrase found verbatim in the text.
const EXACT_SYMPTOM_POINTS: u32 = 3;
/// Points for a multi-word symptom whose words all appear, in any order.
const WORD_OVERLAP_POINTS: u32 = 1;
/// Points for the disease name itself appearing in the text.
const NAME_MENTION_POINTS: u32 = 10;

/// Confidence label attached to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Lab marker hit.
    Certain,
    VeryHigh,
    High,
    Moderate,
    None,
}

impl Confidence {
    /// Map a symptom score to a confidence tier.
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Confidence::None,
            1..=2 => Confidence::Moderate,
            3..=5 => Confidence::High,
            _ => Confidence::VeryHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Certain => "100%",
            Confidence::VeryHigh => "99%",
            Confidence::High => "90%",
            Confidence::Moderate => "75%",
            Confidence::None => "0%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    LabMarker,
    Symptoms,
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub disease: Disease,
    pub confidence: Confidence,
    /// Symptoms that contributed to the score, or the lab marker that fired.
    pub matched: Vec<String>,
    pub score: u32,
    pub source: MatchSource,
}

/// Find the disease that best explains `text`.
///
/// Lab-report markers take priority and short-circuit with full confidence.
/// Otherwise every disease is scored on symptom and name mentions and the
/// first disease with the highest non-zero score wins.
pub fn find_best_match(kb: &KnowledgeBase, text: &str) -> Option<MatchResult> {
    let lowered = text.to_lowercase();
    let preview: String = lowered.chars().take(200).collect();
    tracing::debug!(preview = %preview, "Analyzing text");

    if let Some(hit) = match_lab_markers(kb, &lowered) {
        return Some(hit);
    }

    match_symptoms(kb, &lowered)
}

fn match_lab_markers(kb: &KnowledgeBase, lowered: &str) -> Option<MatchResult> {
    let mut start = 0;
    while let Some((rule_idx, marker)) = next_marker_hit(lowered, start) {
        let key = LAB_REPORT_RULES[rule_idx].disease_key;
        tracing::warn!(marker, disease_key = key, "Lab alert: marker found in report");
        if let Some(disease) = kb.find_by_name_fragment(key) {
            return Some(MatchResult {
                disease: disease.clone(),
                confidence: Confidence::Certain,
                matched: vec![format!("Lab Result: {}", marker.to_uppercase())],
                score: 0,
                source: MatchSource::LabMarker,
            });
        }
        start = rule_idx + 1;
    }
    None
}

fn match_symptoms(kb: &KnowledgeBase, lowered: &str) -> Option<MatchResult> {
    let mut best: Option<(&Disease, u32, Vec<String>)> = None;

    for disease in kb.diseases() {
        let (score, matched) = score_disease(disease, lowered);
        let best_score = best.as_ref().map_or(0, |(_, s, _)| *s);
        if score > best_score {
            best = Some((disease, score, matched));
        }
    }

    best.map(|(disease, score, matched)| MatchResult {
        disease: disease.clone(),
        confidence: Confidence::from_score(score),
        matched,
        score,
        source: MatchSource::Symptoms,
    })
}

/// Score a single disease against lower-cased text.
pub fn score_disease(disease: &Disease, lowered: &str) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();

    for symptom in &disease.symptoms {
        let symptom_lower = symptom.to_lowercase();
        if lowered.contains(&symptom_lower) {
            score += EXACT_SYMPTOM_POINTS;
            matched.push(symptom.clone());
            continue;
        }
        // "chest pain" also matches "pain in my chest"
        let words: Vec<&str> = symptom_lower.split_whitespace().collect();
        if words.len() > 1 && words.iter().all(|w| lowered.contains(w)) {
            score += WORD_OVERLAP_POINTS;
            matched.push(symptom.clone());
        }
    }

    if lowered.contains(&disease.name.to_lowercase()) {
        score += NAME_MENTION_POINTS;
    }

    (score, matched)
}
