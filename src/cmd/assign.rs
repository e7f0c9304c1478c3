//! Assign command - salary structure choices for an employee, filtered by regime preference

use crate::assignment::{RegimePreferenceLookup, SalaryStructureAssignment, StaticPreferences};
use crate::cmd::read_preferences;
use crate::config::Settings;
use crate::core::Regime;
use clap::Args;
use colored::*;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AssignCommand {
    /// Employee to assign a structure to
    #[arg(short, long)]
    employee: Option<String>,

    /// JSON file mapping employee ids to their declared tax regime
    #[arg(short, long)]
    preferences: Option<PathBuf>,

    /// Available salary structures (repeatable, defaults to the configured regime structures)
    #[arg(long = "available")]
    available: Vec<String>,

    /// Salary structure to assign; checked against the regime structures
    #[arg(short, long)]
    structure: Option<String>,

    /// Payroll cost centers for the assignment (repeatable)
    #[arg(long = "cost-center")]
    cost_centers: Vec<String>,
}

impl AssignCommand {
    pub fn exec(&self, settings: &Settings) -> anyhow::Result<()> {
        let preferences = match &self.preferences {
            Some(path) => read_preferences(path)?,
            None => StaticPreferences::default(),
        };

        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        let form = runtime.block_on(self.resolve(&preferences));

        let available = if self.available.is_empty() {
            settings.regime_structures.allowed()
        } else {
            self.available.clone()
        };

        println!();
        println!(
            "Employee:            {}",
            form.employee().unwrap_or("(none)")
        );
        match form.filter() {
            Some(filter) => println!("Structure filter:    contains \"{}\"", filter.pattern()),
            None => println!("Structure filter:    (none)"),
        }
        if let Some(structure) = form
            .filter()
            .and_then(|filter| filter.pattern().parse::<Regime>().ok())
            .and_then(|regime| settings.regime_structures.structure_for(regime))
        {
            println!("Regime structure:    {}", structure);
        }
        println!(
            "Payroll cost centers: {}",
            if form.payroll_cost_centers().is_empty() {
                "(none)".to_string()
            } else {
                form.payroll_cost_centers().join(", ")
            }
        );
        println!();
        println!("Selectable salary structures:");
        let selectable = form.selectable(&available);
        if selectable.is_empty() {
            println!("  (none)");
        }
        for structure in selectable {
            println!("  - {}", structure);
        }

        if let Some(structure) = form.salary_structure.as_deref() {
            settings
                .regime_structures
                .check_assignment(Some(structure))?;
            println!();
            println!("{} {}", "\u{2713}".green(), structure);
        }
        Ok(())
    }

    async fn resolve<L: RegimePreferenceLookup>(&self, lookup: &L) -> SalaryStructureAssignment {
        let mut form = SalaryStructureAssignment::new();
        form.change_employee(lookup, self.employee.clone()).await;
        if form.employee().is_some() {
            form.set_payroll_cost_centers(self.cost_centers.clone());
        }
        form.salary_structure = self.structure.clone();
        form
    }
}
