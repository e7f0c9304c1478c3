//! Declare command - fill in a declaration form and show its live total and advisories

use crate::config::Settings;
use crate::core::{monthly_exemption, DeclarationField, DeclarationState, FiscalYear, RawAmount};
use crate::form::{AdvisoryState, ConsolePort, DeclarationController, FormEvent};
use crate::money::display_inr;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct DeclareCommand {
    /// Employee id
    #[arg(short, long)]
    employee: Option<String>,

    /// Fiscal year (e.g. 2025-2026)
    #[arg(short, long)]
    fiscal_year: Option<String>,

    /// Section 80C amount
    #[arg(long = "section-80c", allow_hyphen_values = true)]
    section_80c: Option<String>,

    /// Section 80D amount
    #[arg(long = "section-80d", allow_hyphen_values = true)]
    section_80d: Option<String>,

    /// Other exemptions
    #[arg(long = "other", allow_hyphen_values = true)]
    other_exemptions: Option<String>,

    /// Apply after the form loads, in order: a field edit such as
    /// section_80d_amount=60000, or `refresh` to recompute (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE|refresh", value_parser = parse_event)]
    events: Vec<FormEvent>,

    /// Show advisories as notices instead of inline banners
    #[arg(long)]
    modal: bool,

    /// Salary slip start date, to show the monthly exemption
    #[arg(long)]
    slip_start_date: Option<NaiveDate>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

fn parse_event(s: &str) -> Result<FormEvent, String> {
    if s.trim().eq_ignore_ascii_case("refresh") {
        return Ok(FormEvent::Refresh);
    }
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE or refresh, got '{}'", s))?;
    let field: DeclarationField = field.trim().parse().map_err(|e| format!("{}", e))?;
    Ok(FormEvent::FieldChanged(field, RawAmount::from(value)))
}

#[derive(Debug, Serialize)]
struct DeclarationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    employee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fiscal_year: Option<String>,
    total_exemption: String,
    advisory: String,
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_exemption: Option<String>,
}

impl DeclareCommand {
    pub fn exec(&self, settings: &Settings) -> anyhow::Result<()> {
        let fiscal_year = self
            .fiscal_year
            .as_deref()
            .map(str::parse::<FiscalYear>)
            .transpose()?;

        let state = DeclarationState::new(
            RawAmount::from(self.section_80c.clone()),
            RawAmount::from(self.section_80d.clone()),
            RawAmount::from(self.other_exemptions.clone()),
        );
        // JSON output keeps stdout clean of advisories
        let out: Box<dyn Write> = if self.json {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout())
        };
        let port = ConsolePort::new(out, !self.modal);

        let mut controller = DeclarationController::new(port, settings.caps.clone(), state);
        let mut result = controller.load();
        for event in &self.events {
            if let Some(recomputed) = controller.handle(event.clone())? {
                result = recomputed;
            }
        }

        if let (Some(fy), Some(start)) = (fiscal_year, self.slip_start_date) {
            if !fy.contains(start) {
                log::warn!(
                    "Salary slip starting {} is outside fiscal year {}",
                    start,
                    fy
                );
            }
        }

        let total = controller.state().total_exemption();
        let monthly = self
            .slip_start_date
            .map(|start| (start, monthly_exemption(total, start, fiscal_year)));

        if self.json {
            let summary = DeclarationSummary {
                employee: self.employee.clone(),
                fiscal_year: fiscal_year.map(|fy| fy.display()),
                total_exemption: total.to_string(),
                advisory: format!("{:?}", controller.advisory()),
                warnings: result.warnings.iter().map(|w| w.to_string()).collect(),
                monthly_exemption: monthly.map(|(_, m)| m.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!();
        if let Some(employee) = &self.employee {
            println!("Employee:          {}", employee);
        }
        if let Some(fy) = fiscal_year {
            match (fy.start_date(), fy.end_date()) {
                (Some(start), Some(end)) => {
                    println!("Fiscal Year:       {} ({} to {})", fy, start, end)
                }
                _ => println!("Fiscal Year:       {}", fy),
            }
        }
        for field in DeclarationField::ALL {
            if let Some(amount) = controller.state().amount(field) {
                println!("{:18} {}", format!("{}:", field.label()), display_inr(amount.coerce()));
            }
        }
        println!(
            "{:18} {} ({})",
            format!("{}:", DeclarationField::TotalExemption.label()),
            total,
            display_inr(total)
        );
        if let Some((start, amount)) = monthly {
            println!(
                "{:18} {} from {}",
                "Monthly Exemption:",
                display_inr(amount),
                start
            );
        }
        if controller.advisory() == AdvisoryState::Clean {
            println!();
            println!("\u{2713} Within statutory caps.");
        }
        Ok(())
    }
}
