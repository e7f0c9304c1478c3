//! Validate command - check declarations the way they would be checked on save

use crate::cmd::read_declarations;
use crate::config::Settings;
use crate::core::{validate_declaration, CapPolicy, ValidatedDeclaration};
use crate::utils::write_csv;
use clap::{Args, ValueEnum};
use colored::*;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// JSON or CSV file containing declarations ("-" for stdin)
    #[arg(short, long)]
    declarations: PathBuf,

    /// Cap breach handling (defaults to the configured policy)
    #[arg(short, long, value_enum)]
    policy: Option<CapPolicyArg>,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CapPolicyArg {
    /// Reject declarations over a cap
    Enforce,
    /// Accept them with a warning
    Advise,
}

impl From<CapPolicyArg> for CapPolicy {
    fn from(arg: CapPolicyArg) -> Self {
        match arg {
            CapPolicyArg::Enforce => CapPolicy::Enforce,
            CapPolicyArg::Advise => CapPolicy::Advise,
        }
    }
}

/// Outcome for one input row
#[derive(Debug, Clone, Serialize)]
struct ValidationResult {
    row: usize,
    employee: String,
    fiscal_year: String,
    status: Status,
    total_exemption: Option<String>,
    messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum Status {
    Valid,
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
struct ValidationOutput {
    policy: CapPolicy,
    declaration_count: usize,
    error_count: usize,
    warning_count: usize,
    results: Vec<ValidationResult>,
}

impl ValidateCommand {
    pub fn exec(&self, settings: &Settings) -> anyhow::Result<()> {
        let declarations = read_declarations(&self.declarations)?;
        let policy = self.policy.map_or(settings.cap_policy, CapPolicy::from);

        let mut accepted: Vec<ValidatedDeclaration> = Vec::new();
        let mut results = Vec::with_capacity(declarations.len());
        for (i, declaration) in declarations.iter().enumerate() {
            let result = match validate_declaration(declaration, &accepted, &settings.caps, policy) {
                Ok(validated) => {
                    let status = if validated.warnings.is_empty() {
                        Status::Valid
                    } else {
                        Status::Warning
                    };
                    let result = ValidationResult {
                        row: i + 1,
                        employee: validated.employee.clone(),
                        fiscal_year: validated.fiscal_year.clone(),
                        status,
                        total_exemption: Some(validated.total_exemption.to_string()),
                        messages: validated
                            .warnings
                            .iter()
                            .map(|w| w.detailed_message())
                            .collect(),
                    };
                    accepted.push(validated);
                    result
                }
                Err(err) => ValidationResult {
                    row: i + 1,
                    employee: declaration.employee.clone(),
                    fiscal_year: declaration.fiscal_year.clone(),
                    status: Status::Error,
                    total_exemption: None,
                    messages: err.to_string().lines().map(str::to_string).collect(),
                },
            };
            results.push(result);
        }

        let error_count = results.iter().filter(|r| r.status == Status::Error).count();
        let warning_count = results.iter().filter(|r| r.status == Status::Warning).count();

        if self.json {
            let output = ValidationOutput {
                policy,
                declaration_count: results.len(),
                error_count,
                warning_count,
                results,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if self.csv {
            print_csv(&results)?;
        } else {
            print_text(&results, policy, error_count);
        }

        // Exit with code 1 if any declaration would be rejected
        if error_count > 0 {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn print_text(results: &[ValidationResult], policy: CapPolicy, error_count: usize) {
    println!();
    println!("DECLARATION VALIDATION (cap policy: {:?})", policy);
    println!();

    for result in results {
        let status = match result.status {
            Status::Valid => "\u{2713}".green(),
            Status::Warning => "\u{26A0}".yellow(),
            Status::Error => "\u{2717}".red(),
        };
        let who = if result.employee.is_empty() {
            "(no employee)"
        } else {
            result.employee.as_str()
        };
        match &result.total_exemption {
            Some(total) => println!(
                "  {} {}. {} {} total {}",
                status, result.row, who, result.fiscal_year, total
            ),
            None => println!("  {} {}. {} {}", status, result.row, who, result.fiscal_year),
        }
        for message in &result.messages {
            println!("       {}", message);
        }
    }

    println!();
    if error_count == 0 {
        println!("\u{2713} {} declaration(s) valid.", results.len());
    } else {
        println!(
            "\u{26A0} {} of {} declaration(s) rejected.",
            error_count,
            results.len()
        );
    }
}

fn print_csv(results: &[ValidationResult]) -> anyhow::Result<()> {
    let header = vec![
        "row".to_string(),
        "employee".to_string(),
        "fiscal_year".to_string(),
        "status".to_string(),
        "total_exemption".to_string(),
        "messages".to_string(),
    ];
    let rows = results.iter().map(|r| {
        vec![
            r.row.to_string(),
            r.employee.clone(),
            r.fiscal_year.clone(),
            format!("{:?}", r.status),
            r.total_exemption.clone().unwrap_or_default(),
            r.messages.join("; "),
        ]
    });
    write_csv(std::iter::once(header).chain(rows), io::stdout())
}
