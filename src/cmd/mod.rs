pub mod assign;
pub mod compare;
pub mod declare;
pub mod schema;
pub mod validate;

use crate::assignment::StaticPreferences;
use crate::core::{DeclarationInput, InvestmentDeclaration, RawAmount};
use crate::report::LiabilityRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read declarations from JSON or CSV (or stdin with "-")
pub fn read_declarations(path: &Path) -> anyhow::Result<Vec<InvestmentDeclaration>> {
    let buffer = read_input(path)?;
    let is_csv = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("csv"),
        None => !buffer.trim_start().starts_with('{'),
    };

    let declarations = if is_csv {
        read_declarations_csv(buffer.as_bytes())?
    } else {
        let input: DeclarationInput = serde_json::from_str(&buffer)?;
        input.declarations
    };
    log::info!("Read {} declarations", declarations.len());
    Ok(declarations)
}

/// CSV cells are always text, so amounts are read as strings and coerced later.
#[derive(Debug, Deserialize)]
struct DeclarationCsvRow {
    #[serde(default)]
    employee: String,
    #[serde(default)]
    fiscal_year: String,
    section_80c_amount: Option<String>,
    section_80d_amount: Option<String>,
    other_exemptions: Option<String>,
}

impl From<DeclarationCsvRow> for InvestmentDeclaration {
    fn from(row: DeclarationCsvRow) -> Self {
        InvestmentDeclaration {
            employee: row.employee,
            fiscal_year: row.fiscal_year,
            section_80c_amount: RawAmount::from(row.section_80c_amount),
            section_80d_amount: RawAmount::from(row.section_80d_amount),
            other_exemptions: RawAmount::from(row.other_exemptions),
            total_exemption: None,
        }
    }
}

fn read_declarations_csv<R: Read>(reader: R) -> anyhow::Result<Vec<InvestmentDeclaration>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut declarations = Vec::new();
    for result in rdr.deserialize::<DeclarationCsvRow>() {
        declarations.push(result?.into());
    }
    Ok(declarations)
}

/// Read per-employee tax liabilities (CSV, or stdin with "-")
pub fn read_liabilities(path: &Path) -> anyhow::Result<Vec<LiabilityRecord>> {
    let buffer = read_input(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(buffer.as_bytes());
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    log::info!("Read {} liability records", records.len());
    Ok(records)
}

/// Read employee regime preferences (JSON object of employee id to regime)
pub fn read_preferences(path: &Path) -> anyhow::Result<StaticPreferences> {
    let file = File::open(path)?;
    StaticPreferences::from_reader(BufReader::new(file))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    let mut buffer = String::new();
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        BufReader::new(stdin.lock()).read_to_string(&mut buffer)?;
        if buffer.trim().is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
    } else {
        BufReader::new(File::open(path)?).read_to_string(&mut buffer)?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_amounts_keep_raw_text() {
        let data = "employee,fiscal_year,section_80c_amount,section_80d_amount,other_exemptions\n\
                    EMP-1,2025-2026,100000,abc,\n";
        let declarations = read_declarations_csv(data.as_bytes()).unwrap();
        assert_eq!(declarations.len(), 1);
        let decl = &declarations[0];
        assert_eq!(decl.employee, "EMP-1");
        assert_eq!(decl.section_80c_amount, RawAmount::from("100000"));
        assert_eq!(decl.section_80d_amount, RawAmount::from("abc"));
        assert!(decl.other_exemptions.parse().is_ok());
    }
}
