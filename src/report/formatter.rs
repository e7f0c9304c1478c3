//! Per-cell styling for the regime comparison report
//!
//! The recommendation column is coloured by regime, difference columns by
//! whether switching costs or saves money. Everything else renders plainly.

use super::column::Column;
use super::row::ComparisonRow;
use crate::core::Regime;
use crate::money::display_inr;
use colored::*;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Semantic role of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Default,
    /// "New Regime" recommended (green, bold)
    RecommendedNew,
    /// Any other recommendation (blue, bold)
    RecommendedOther,
    /// Positive difference, shown as a cost warning (red)
    Cost,
    /// Negative difference, shown as savings (green)
    Savings,
}

impl Emphasis {
    /// CSS colour, `None` for default rendering
    pub fn css_color(&self) -> Option<&'static str> {
        match self {
            Emphasis::Default => None,
            Emphasis::RecommendedNew => Some("green"),
            Emphasis::RecommendedOther => Some("blue"),
            Emphasis::Cost => Some("#d9534f"),
            Emphasis::Savings => Some("#5cb85c"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub emphasis: Emphasis,
}

impl RenderedCell {
    pub fn plain(text: impl Into<String>) -> Self {
        RenderedCell {
            text: text.into(),
            emphasis: Emphasis::Default,
        }
    }

    pub fn to_html(&self) -> String {
        let text = escape_html(&self.text);
        match self.emphasis.css_color() {
            Some(color) => format!(
                "<span style=\"color: {}; font-weight: 600\">{}</span>",
                color, text
            ),
            None => text,
        }
    }

    pub fn to_ansi(&self) -> String {
        match self.emphasis {
            Emphasis::Default => self.text.clone(),
            Emphasis::RecommendedNew | Emphasis::Savings => self.text.green().bold().to_string(),
            Emphasis::RecommendedOther => self.text.blue().bold().to_string(),
            Emphasis::Cost => self.text.red().bold().to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("row has no values to read a recommendation from")]
    EmptyRow,
}

/// Render one report cell. Never fails: anything that cannot be classified
/// renders the raw value plainly.
pub fn render_cell(raw_value: &str, row: &ComparisonRow, column: &Column) -> RenderedCell {
    match classify(raw_value, row, column) {
        Ok(Some(cell)) => cell,
        Ok(None) => default_cell(raw_value, column),
        Err(err) => {
            log::debug!("Default rendering for '{}': {}", column.label, err);
            default_cell(raw_value, column)
        }
    }
}

fn classify(
    raw_value: &str,
    row: &ComparisonRow,
    column: &Column,
) -> Result<Option<RenderedCell>, RenderError> {
    let label = column.label.to_lowercase();

    if label.contains("recommended") {
        let recommended = row.recommendation().ok_or(RenderError::EmptyRow)?;
        let emphasis = if recommended == Regime::New.label() {
            Emphasis::RecommendedNew
        } else {
            Emphasis::RecommendedOther
        };
        return Ok(Some(RenderedCell {
            text: recommended.to_string(),
            emphasis,
        }));
    }

    if label.contains("difference") {
        let value = parse_decimal(raw_value).unwrap_or(Decimal::ZERO);
        let emphasis = if value > Decimal::ZERO {
            Emphasis::Cost
        } else if value < Decimal::ZERO {
            Emphasis::Savings
        } else {
            return Ok(None);
        };
        return Ok(Some(RenderedCell {
            text: default_text(raw_value, column),
            emphasis,
        }));
    }

    Ok(None)
}

fn default_cell(raw_value: &str, column: &Column) -> RenderedCell {
    RenderedCell::plain(default_text(raw_value, column))
}

fn default_text(raw_value: &str, column: &Column) -> String {
    if column.is_currency() {
        if let Some(amount) = parse_decimal(raw_value) {
            return display_inr(amount);
        }
    }
    raw_value.to_string()
}

/// Plain or scientific notation, e.g. "5000.00" or "1e3"
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::column::FieldType;

    fn row(values: &[&str]) -> ComparisonRow {
        ComparisonRow::new(values.iter().map(|v| v.to_string()).collect())
    }

    fn recommended() -> Column {
        Column::new("Recommended Regime", FieldType::Data)
    }

    fn difference() -> Column {
        Column::new("Tax Difference", FieldType::Currency)
    }

    #[test]
    fn new_regime_recommendation_is_green_bold() {
        let r = row(&["EMP-1", "100", "90", "10", "New Regime"]);
        let cell = render_cell("New Regime", &r, &recommended());
        assert_eq!(cell.emphasis, Emphasis::RecommendedNew);
        assert_eq!(
            cell.to_html(),
            "<span style=\"color: green; font-weight: 600\">New Regime</span>"
        );
    }

    #[test]
    fn other_recommendation_is_blue_bold() {
        let r = row(&["EMP-1", "100", "110", "-10", "Old Regime"]);
        let cell = render_cell("Old Regime", &r, &recommended());
        assert_eq!(cell.emphasis, Emphasis::RecommendedOther);
        assert_eq!(cell.emphasis.css_color(), Some("blue"));
    }

    #[test]
    fn recommendation_is_read_from_last_value() {
        // the cell's own value is ignored in favour of the row's final value
        let r = row(&["EMP-1", "New Regime", "Old Regime"]);
        let cell = render_cell("New Regime", &r, &recommended());
        assert_eq!(cell.text, "Old Regime");
        assert_eq!(cell.emphasis, Emphasis::RecommendedOther);
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let r = row(&["New Regime"]);
        let column = Column::new("RECOMMENDED", FieldType::Data);
        assert_eq!(
            render_cell("x", &r, &column).emphasis,
            Emphasis::RecommendedNew
        );
    }

    #[test]
    fn positive_difference_is_cost() {
        let r = row(&["5000", "New Regime"]);
        let cell = render_cell("5000", &r, &difference());
        assert_eq!(cell.emphasis, Emphasis::Cost);
        assert!(cell.to_html().contains("#d9534f"));
    }

    #[test]
    fn negative_difference_is_savings() {
        let r = row(&["-3000", "Old Regime"]);
        let cell = render_cell("-3000", &r, &difference());
        assert_eq!(cell.emphasis, Emphasis::Savings);
        assert!(cell.to_html().contains("#5cb85c"));
    }

    #[test]
    fn scientific_difference_is_classified() {
        let r = row(&["1e3", "New Regime"]);
        let cell = render_cell("1e3", &r, &difference());
        assert_eq!(cell.emphasis, Emphasis::Cost);
        assert_eq!(cell.text, "₹1,000.00");

        let cell = render_cell("-2.5E2", &r, &difference());
        assert_eq!(cell.emphasis, Emphasis::Savings);
    }

    #[test]
    fn zero_or_garbage_difference_is_default() {
        let r = row(&["0", "Old Regime"]);
        assert_eq!(render_cell("0", &r, &difference()).emphasis, Emphasis::Default);
        let cell = render_cell("Error", &r, &difference());
        assert_eq!(cell, RenderedCell::plain("Error"));
    }

    #[test]
    fn empty_row_falls_back_to_default() {
        let cell = render_cell("New Regime", &row(&[]), &recommended());
        assert_eq!(cell, RenderedCell::plain("New Regime"));
    }

    #[test]
    fn other_columns_render_plainly() {
        let r = row(&["EMP-1", "New Regime"]);
        let column = Column::new("Employee", FieldType::Link("Employee".to_string()));
        assert_eq!(render_cell("EMP-1", &r, &column), RenderedCell::plain("EMP-1"));
    }

    #[test]
    fn currency_columns_format_as_rupees() {
        let r = row(&["New Regime"]);
        let column = Column::new("Tax (Old)", FieldType::Currency);
        let cell = render_cell("52000.00", &r, &column);
        assert_eq!(cell.emphasis, Emphasis::Default);
        assert!(cell.text.contains('₹'));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let r = row(&["EMP-1", "5000", "New Regime"]);
        let before = r.clone();
        let raw = String::from("5000");
        render_cell(&raw, &r, &difference());
        assert_eq!(r, before);
        assert_eq!(raw, "5000");
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(RenderedCell::plain("<b>").to_html(), "&lt;b&gt;");
    }
}
