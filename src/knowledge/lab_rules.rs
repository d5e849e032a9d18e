/// Lab-report markers that map directly to a disease.
///
/// `disease_key` is matched as a substring of the lower-cased disease name,
/// so "diabetes" resolves to e.g. "Type 2 Diabetes". Order matters: rules
/// and markers are scanned top to bottom and the first hit wins.
#[derive(Debug, Clone, Copy)]
pub struct LabRule {
    pub disease_key: &'static str,
    pub markers: &'static [&'static str],
}

pub const LAB_REPORT_RULES: &[LabRule] = &[
    LabRule {
        disease_key: "dengue",
        markers: &[
            "ns1",
            "dengue positive",
            "platelet count low",
            "platelets < 100000",
            "igg positive",
            "igm positive",
        ],
    },
    LabRule {
        disease_key: "malaria",
        markers: &["plasmodium", "malaria detected", "parasite seen", "rings seen"],
    },
    LabRule {
        disease_key: "typhoid",
        markers: &["salmonella", "typhi", "widal positive", "typhoid positive"],
    },
    LabRule {
        disease_key: "diabetes",
        markers: &[
            "glucose high",
            "sugar high",
            "hba1c > 6.5",
            "fasting > 126",
            "diabetes",
            "diabetic",
        ],
    },
    LabRule {
        disease_key: "jaundice",
        markers: &["bilirubin high", "bilirubin > 1.2", "jaundice"],
    },
    LabRule {
        disease_key: "anemia",
        markers: &["hemoglobin low", "hb < 12", "anemic"],
    },
    LabRule {
        disease_key: "urinary tract infection",
        markers: &["pus cells", "bacteria present", "nitrite positive", "uti"],
    },
    LabRule {
        disease_key: "heart attack",
        markers: &["troponin positive", "ck-mb high", "ecg abnormal", "st elevation"],
    },
    LabRule {
        disease_key: "thyroid",
        markers: &["tsh high", "tsh > 5", "tsh low", "t3", "t4"],
    },
    LabRule {
        disease_key: "pneumonia",
        markers: &["consolidation", "infiltrates", "opacity", "pneumonia"],
    },
];

/// First `(rule, marker)` pair whose marker occurs in `lowered`, scanning
/// from `start_rule`. Returns the rule index so callers can resume.
pub fn next_marker_hit(lowered: &str, start_rule: usize) -> Option<(usize, &'static str)> {
    LAB_REPORT_RULES
        .iter()
        .enumerate()
        .skip(start_rule)
        .find_map(|(idx, rule)| {
            rule.markers
                .iter()
                .find(|marker| lowered.contains(*marker))
                .map(|marker| (idx, *marker))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_lowercase() {
        for rule in LAB_REPORT_RULES {
            assert_eq!(rule.disease_key, rule.disease_key.to_lowercase());
            for marker in rule.markers {
                assert_eq!(*marker, marker.to_lowercase(), "marker {marker} must be lowercase");
            }
        }
    }

    #[test]
    fn finds_first_marker_in_rule_order() {
        let hit = next_marker_hit("widal positive and ns1 antigen", 0).unwrap();
        assert_eq!(LAB_REPORT_RULES[hit.0].disease_key, "dengue");
        assert_eq!(hit.1, "ns1");
    }

    #[test]
    fn resumes_after_given_rule() {
        let hit = next_marker_hit("widal positive and ns1 antigen", 1).unwrap();
        assert_eq!(LAB_REPORT_RULES[hit.0].disease_key, "typhoid");
    }

    #[test]
    fn no_marker_no_hit() {
        assert!(next_marker_hit("everything within normal limits", 0).is_none());
    }
}
