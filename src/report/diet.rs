use printpdf::*;
use serde::Deserialize;
use serde_json::Value;

use super::layout::{
    black, dark_grey, draw_text, estimate_width, grey, header_band, pt, save, teal,
    truncate_chars, value_text, white, Fonts, PAGE_HEIGHT, PAGE_WIDTH,
};
use super::ReportError;

const HEADER_HEIGHT: f32 = 120.0;
const NEW_PAGE_BELOW: f32 = 200.0;
const MEAL_INDENT: f32 = 70.0;
const MEAL_SIZE: f32 = 11.0;
const MEAL_MAX_WIDTH: f32 = 500.0;
const MEAL_MAX_CHARS: usize = 90;
const GROCERY_SIZE: f32 = 10.0;
const GROCERY_MAX_WIDTH: f32 = 480.0;
/// Break after 95 characters counting the two-character cart glyph prefix,
/// which the builtin fonts cannot draw and is omitted.
const GROCERY_SPLIT_AT: usize = 95 - 2;
const GROCERY_CONTINUATION_INDENT: f32 = 85.0;

const MEALS: [(&str, &str); 4] = [
    ("breakfast", "Breakfast"),
    ("lunch", "Lunch"),
    ("dinner", "Dinner"),
    ("snacks", "Snacks"),
];

/// Body of `POST /generate_diet_pdf`.
/// `days` maps a day label to `{breakfast, lunch, dinner, snacks, grocery}`
/// and is rendered in the order the client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietPlanRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub days: Value,
}

impl DietPlanRequest {
    pub fn title_text(&self) -> String {
        self.title
            .as_ref()
            .map(value_text)
            .unwrap_or_else(|| "Healthy Living".to_string())
    }

    /// Days in payload order; a non-object `days` counts as none.
    pub fn days(&self) -> Vec<(&str, &Value)> {
        match &self.days {
            Value::Object(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            _ => Vec::new(),
        }
    }
}

/// The four `- Meal: ...` lines for a day, shortened when too wide.
pub fn meal_lines(info: &Value) -> Vec<String> {
    MEALS
        .iter()
        .map(|(key, label)| {
            let meal = match info.get(key) {
                Some(v) if !v.is_null() => value_text(v),
                _ => "-".to_string(),
            };
            let line = format!("- {label}: {meal}");
            if estimate_width(&line, MEAL_SIZE) > MEAL_MAX_WIDTH {
                format!("{}...", truncate_chars(&line, MEAL_MAX_CHARS))
            } else {
                line
            }
        })
        .collect()
}

/// The grocery line, split in two when too wide for the page.
pub fn grocery_lines(info: &Value) -> Vec<String> {
    let groceries = info.get("grocery").map(value_text).unwrap_or_default();
    let line = format!("Grocery Needed: {groceries}");
    if estimate_width(&line, GROCERY_SIZE) > GROCERY_MAX_WIDTH {
        let head = truncate_chars(&line, GROCERY_SPLIT_AT);
        let tail: String = line.chars().skip(GROCERY_SPLIT_AT).collect();
        vec![format!("{head}-"), tail]
    } else {
        vec![line]
    }
}

/// Render the weekly diet plan, adding pages as days run past the bottom margin.
pub fn generate_diet_plan(req: &DietPlanRequest) -> Result<Vec<u8>, ReportError> {
    let days = req.days();
    tracing::info!(days = days.len(), "Generating diet plan PDF");

    let (doc, page, layer) = PdfDocument::new(
        "7-Day Personalized Diet Plan",
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
        "Layer 1",
    );
    let mut layer = doc.get_page(page).get_layer(layer);
    let fonts = Fonts::load(&doc)?;

    header_band(&layer, HEADER_HEIGHT);
    layer.set_fill_color(white());
    draw_text(
        &layer,
        "7-Day Personalized Diet Plan",
        26.0,
        50.0,
        PAGE_HEIGHT - 60.0,
        &fonts.bold,
    );
    draw_text(
        &layer,
        &format!("Plan Type: {}", req.title_text()),
        16.0,
        50.0,
        PAGE_HEIGHT - 90.0,
        &fonts.regular,
    );

    let mut y = PAGE_HEIGHT - 150.0;

    for (day, info) in days {
        if y < NEW_PAGE_BELOW {
            let (page, new_layer) = doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT - 50.0;
        }

        layer.set_fill_color(teal());
        draw_text(&layer, day, 16.0, 50.0, y, &fonts.bold);
        y -= 25.0;

        layer.set_fill_color(black());
        for line in meal_lines(info) {
            draw_text(&layer, &line, MEAL_SIZE, MEAL_INDENT, y, &fonts.regular);
            y -= 15.0;
        }
        y -= 5.0;

        layer.set_fill_color(dark_grey());
        let grocery = grocery_lines(info);
        for (i, line) in grocery.iter().enumerate() {
            if i == 0 {
                draw_text(&layer, line, GROCERY_SIZE, MEAL_INDENT, y, &fonts.oblique);
            } else {
                y -= 12.0;
                draw_text(
                    &layer,
                    line,
                    GROCERY_SIZE,
                    GROCERY_CONTINUATION_INDENT,
                    y,
                    &fonts.oblique,
                );
            }
        }
        y -= 40.0;
    }

    layer.set_fill_color(grey());
    draw_text(&layer, "Generated by NutriCare AI", 10.0, 250.0, 30.0, &fonts.regular);

    save(doc)
}
