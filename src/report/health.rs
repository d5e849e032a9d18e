use printpdf::*;
use serde::Deserialize;
use serde_json::Value;

use super::layout::{
    black, draw_text, green, header_band, pt, red, save, truncate_chars, value_text, white,
    Fonts, PAGE_HEIGHT, PAGE_WIDTH,
};
use super::ReportError;

const HEADER_HEIGHT: f32 = 100.0;
const MARGIN_X: f32 = 50.0;
const MAX_VALUE_CHARS: usize = 90;

/// Body of `POST /generate_pdf`: usually an `AnalysisReport` echoed back by
/// the client, but any JSON object is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthReportRequest {
    #[serde(default)]
    pub condition: Option<Value>,
    #[serde(default)]
    pub severity: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub precautions: Option<Value>,
    #[serde(default)]
    pub specialty: Option<Value>,
    #[serde(default)]
    pub diet_plan: Option<Value>,
}

impl HealthReportRequest {
    fn text_or(field: &Option<Value>, default: &str) -> String {
        match field {
            Some(value) => value_text(value),
            None => default.to_string(),
        }
    }

    pub fn condition_text(&self) -> String {
        Self::text_or(&self.condition, "Unknown")
    }

    pub fn severity_label(&self) -> String {
        Self::text_or(&self.severity, "mild").to_uppercase()
    }
}

/// Render the one-page health report.
pub fn generate_health_report(req: &HealthReportRequest) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(
        "NutriCare AI Health Report",
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let fonts = Fonts::load(&doc)?;

    header_band(&layer, HEADER_HEIGHT);
    layer.set_fill_color(white());
    draw_text(
        &layer,
        "NutriCare AI Health Report",
        24.0,
        MARGIN_X,
        PAGE_HEIGHT - 60.0,
        &fonts.bold,
    );
    let date = chrono::Local::now().format("%Y-%m-%d %H:%M");
    draw_text(
        &layer,
        &format!("Date: {date}"),
        12.0,
        MARGIN_X,
        PAGE_HEIGHT - 80.0,
        &fonts.regular,
    );

    let mut y = PAGE_HEIGHT - 150.0;
    layer.set_fill_color(black());
    draw_text(
        &layer,
        &format!("Condition: {}", req.condition_text()),
        18.0,
        MARGIN_X,
        y,
        &fonts.bold,
    );
    y -= 30.0;

    let severity = req.severity_label();
    layer.set_fill_color(if severity == "SERIOUS" { red() } else { green() });
    draw_text(&layer, &format!("Severity: {severity}"), 14.0, MARGIN_X, y, &fonts.bold);
    y -= 40.0;

    layer.set_fill_color(black());
    let sections = [
        ("Description:", HealthReportRequest::text_or(&req.description, "")),
        ("Precautions:", HealthReportRequest::text_or(&req.precautions, "")),
        ("Specialist:", HealthReportRequest::text_or(&req.specialty, "")),
        ("Diet:", HealthReportRequest::text_or(&req.diet_plan, "")),
    ];
    for (title, value) in &sections {
        draw_text(&layer, title, 12.0, MARGIN_X, y, &fonts.bold);
        y -= 20.0;
        let value = truncate_chars(value, MAX_VALUE_CHARS);
        draw_text(&layer, &value, 11.0, MARGIN_X, y, &fonts.regular);
        y -= 30.0;
    }

    save(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> HealthReportRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn renders_pdf_for_analysis_report() {
        let req = request(json!({
            "condition": "Dengue Fever",
            "severity": "serious",
            "confidence": "99%",
            "description": "A mosquito-borne viral infection.",
            "precautions": ["Stay hydrated", "Monitor platelet count"],
            "specialty": "Infectious Disease Specialist",
            "diet_plan": "Papaya leaf extract, coconut water."
        }));
        let bytes = generate_health_report(&req).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_body_uses_defaults() {
        let req = request(json!({}));
        assert_eq!(req.condition_text(), "Unknown");
        assert_eq!(req.severity_label(), "MILD");
        assert!(generate_health_report(&req).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn explicit_null_falls_back_like_missing_field() {
        let req = request(json!({"condition": null, "severity": null}));
        assert_eq!(req.condition_text(), "Unknown");
        assert_eq!(req.severity_label(), "MILD");
    }

    #[test]
    fn severity_is_uppercased() {
        assert_eq!(request(json!({"severity": "Serious"})).severity_label(), "SERIOUS");
    }

    #[test]
    fn non_string_values_render() {
        let req = request(json!({
            "condition": 42,
            "precautions": "Rest only",
            "description": null,
            "specialty": {"name": "GP"}
        }));
        assert_eq!(req.condition_text(), "42");
        assert!(generate_health_report(&req).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn long_and_unicode_values_render() {
        let req = request(json!({
            "condition": "Migraine 🤕",
            "description": "x".repeat(500),
        }));
        assert!(generate_health_report(&req).unwrap().starts_with(b"%PDF"));
    }
}
