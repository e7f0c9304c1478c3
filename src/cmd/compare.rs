//! Compare command - old vs new regime liability per employee with a recommendation

use crate::cmd::read_liabilities;
use crate::report::{build_report, comparison_columns, display, ReportFilters};
use chrono::NaiveDate;
use clap::Args;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// CSV file with employee,employee_name,company,department,tax_old,tax_new
    #[arg(short, long)]
    liabilities: PathBuf,

    /// Start of the reporting period (YYYY-MM-DD)
    #[arg(long)]
    from_date: Option<NaiveDate>,

    /// End of the reporting period (YYYY-MM-DD)
    #[arg(long)]
    to_date: Option<NaiveDate>,

    /// Only employees of this company
    #[arg(long)]
    company: Option<String>,

    /// Only employees of this department
    #[arg(long)]
    department: Option<String>,

    /// Only this employee
    #[arg(long)]
    employee: Option<String>,

    /// Output as CSV
    #[arg(long, conflicts_with = "html")]
    csv: bool,

    /// Output as a self-contained HTML page
    #[arg(long)]
    html: bool,

    /// HTML output file path (default: opens in browser)
    #[arg(short, long, requires = "html")]
    output: Option<PathBuf>,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        // nothing is read until the filters are valid
        let filters = ReportFilters {
            from_date: self.from_date,
            to_date: self.to_date,
            company: self.company.clone(),
            department: self.department.clone(),
            employee: self.employee.clone(),
        }
        .validate()?;

        let records = read_liabilities(&self.liabilities)?;
        let columns = comparison_columns();
        let rows = build_report(&records, &filters);

        if self.csv {
            return display::write_rows_csv(&columns, &rows, io::stdout());
        }

        if self.html {
            let html = display::html(&columns, &rows, &filters);
            if let Some(ref output_path) = self.output {
                std::fs::write(output_path, &html)?;
                println!("HTML report written to: {}", output_path.display());
            } else {
                let temp_path = std::env::temp_dir().join("taxdecl-regime-comparison.html");
                std::fs::write(&temp_path, &html)?;
                opener::open(&temp_path)?;
                println!("Opened HTML report in browser: {}", temp_path.display());
            }
            return Ok(());
        }

        println!();
        println!("TAX REGIME COMPARISON ({})", filters.period());
        println!();
        if rows.is_empty() {
            println!("No employees match the filters.");
            return Ok(());
        }
        println!("{}", display::table(&columns, &rows));

        let errors = rows.iter().filter(|r| r.is_error()).count();
        if errors > 0 {
            println!();
            println!(
                "\u{26A0} {} employee(s) could not be compared, see log for details.",
                errors
            );
        }
        Ok(())
    }
}
