//! Schema command - print expected input formats

use crate::core::{DeclarationInput, InvestmentDeclaration};
use crate::report::comparison_columns;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for declaration input
    JsonSchema,
    /// CSV header row for declaration input
    CsvHeader,
    /// Declaration field descriptions
    Fields,
    /// Regime comparison report columns
    ReportColumns,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(DeclarationInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let editable: Vec<&str> = InvestmentDeclaration::field_schema()
                    .iter()
                    .filter(|f| !f.read_only)
                    .map(|f| f.name)
                    .collect();
                println!("{}", editable.join(","));
            }
            SchemaFormat::Fields => print_fields(),
            SchemaFormat::ReportColumns => {
                for column in comparison_columns() {
                    println!("{}", column);
                }
            }
        }
        Ok(())
    }
}

fn print_fields() {
    println!("Investment Declaration Fields");
    println!("=============================");
    println!();
    for field in InvestmentDeclaration::field_schema() {
        let flag = if field.read_only {
            "read-only"
        } else if field.required {
            "required"
        } else {
            "optional"
        };
        println!(
            "{:20} {:20} ({:9})  {}",
            field.name, field.label, flag, field.description
        );
    }
}
