use super::column::Column;
use super::filters::ValidatedFilters;
use super::formatter::{escape_html, render_cell, RenderedCell};
use super::row::ComparisonRow;
use crate::utils::write_csv;
use std::io::Write;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

/// Render every cell of a row against its column.
pub fn rendered_cells(columns: &[Column], row: &ComparisonRow) -> Vec<RenderedCell> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let raw = row.values().get(i).map_or("", String::as_str);
            render_cell(raw, row, column)
        })
        .collect()
}

/// Terminal table with styled recommendation and difference cells
pub fn table(columns: &[Column], rows: &[ComparisonRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.label.clone()));
    for row in rows {
        builder.push_record(rendered_cells(columns, row).iter().map(RenderedCell::to_ansi));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    for (i, _) in columns.iter().enumerate().filter(|(_, c)| c.is_currency()) {
        table.with(Modify::new(Columns::new(i..i + 1)).with(Alignment::right()));
    }
    table.to_string()
}

/// Raw values, one line per row, headed by the column labels
pub fn write_rows_csv<W: Write>(
    columns: &[Column],
    rows: &[ComparisonRow],
    writer: W,
) -> anyhow::Result<()> {
    let header: Vec<String> = columns.iter().map(|c| c.label.clone()).collect();
    let records = std::iter::once(header).chain(rows.iter().map(|r| r.values().to_vec()));
    write_csv(records, writer)
}

/// Self-contained HTML page
pub fn html(columns: &[Column], rows: &[ComparisonRow], filters: &ValidatedFilters) -> String {
    let head: String = columns
        .iter()
        .map(|c| match c.width {
            Some(w) => format!(
                "<th style=\"min-width: {}px\">{}</th>",
                w,
                escape_html(&c.label)
            ),
            None => format!("<th>{}</th>", escape_html(&c.label)),
        })
        .collect();

    let body: String = if rows.is_empty() {
        format!(
            "<tr><td colspan=\"{}\" class=\"empty\">No employees match the filters</td></tr>",
            columns.len()
        )
    } else {
        rows.iter()
            .map(|row| {
                let cells: String = rendered_cells(columns, row)
                    .iter()
                    .map(|cell| format!("<td>{}</td>", cell.to_html()))
                    .collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tax Regime Comparison</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <h1>Tax Regime Comparison</h1>
        <p class="period">{period}</p>
    </header>
    <main>
        <table>
            <thead><tr>{head}</tr></thead>
            <tbody>
{body}
            </tbody>
        </table>
    </main>
</body>
</html>
"##,
        css = CSS,
        period = filters.period(),
        head = head,
        body = body,
    )
}

const CSS: &str = r#"        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 2rem; color: #222; }
        h1 { margin-bottom: 0.25rem; }
        .period { color: #666; margin-top: 0; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border-bottom: 1px solid #e5e5e5; padding: 0.5rem 0.75rem; text-align: left; }
        th { background: #f7f7f7; }
        td.empty { text-align: center; color: #888; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::column::{comparison_columns, FieldType};
    use crate::report::filters::ReportFilters;
    use chrono::NaiveDate;

    fn rows() -> Vec<ComparisonRow> {
        vec![
            ComparisonRow::new(
                ["EMP-1", "Asha", "Girman", "52000.00", "47000.00", "5000.00", "New Regime"]
                    .iter()
                    .map(|v| v.to_string())
                    .collect(),
            ),
            ComparisonRow::new(
                ["EMP-2", "Ravi", "Girman", "Error", "Error", "Error", "Error"]
                    .iter()
                    .map(|v| v.to_string())
                    .collect(),
            ),
        ]
    }

    fn filters() -> ValidatedFilters {
        ReportFilters {
            from_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            to_date: NaiveDate::from_ymd_opt(2026, 3, 31),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn csv_keeps_raw_values() {
        let mut buf = Vec::new();
        write_rows_csv(&comparison_columns(), &rows(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Employee,Employee Name,Company,Tax (Old),Tax (New),Difference (Old - New),Recommended")
        );
        assert_eq!(
            lines.next(),
            Some("EMP-1,Asha,Girman,52000.00,47000.00,5000.00,New Regime")
        );
    }

    #[test]
    fn html_highlights_recommendation_and_difference() {
        let page = html(&comparison_columns(), &rows(), &filters());
        assert!(page.contains("2025-04-01 to 2026-03-31"));
        assert!(page.contains("<span style=\"color: green; font-weight: 600\">New Regime</span>"));
        assert!(page.contains("#d9534f"));
        // error rows are plain
        assert!(page.contains("<td>Error</td>"));
    }

    #[test]
    fn html_escapes_column_labels() {
        let columns = vec![
            Column::new("Tax <Old> & \"New\"", FieldType::Currency),
            "Note <i>:Data:120".parse::<Column>().unwrap(),
        ];
        let page = html(&columns, &[], &filters());
        assert!(page.contains("<th>Tax &lt;Old&gt; &amp; &quot;New&quot;</th>"));
        assert!(page.contains("<th style=\"min-width: 120px\">Note &lt;i&gt;</th>"));
        assert!(!page.contains("<i>"));
    }

    #[test]
    fn html_with_no_rows_says_so() {
        let page = html(&comparison_columns(), &[], &filters());
        assert!(page.contains("No employees match the filters"));
    }

    #[test]
    fn table_contains_every_employee() {
        let out = table(&comparison_columns(), &rows());
        assert!(out.contains("EMP-1"));
        assert!(out.contains("EMP-2"));
        assert!(out.contains("Recommended"));
    }
}
