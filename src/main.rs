use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::cmd::{
    assign::AssignCommand, compare::CompareCommand, declare::DeclareCommand,
    schema::SchemaCommand, validate::ValidateCommand,
};
use crate::config::Settings;
use crate::core::Section;

mod assignment;
mod cmd;
mod config;
mod core;
mod form;
mod money;
mod report;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "taxdecl", version, about = "Employee investment declarations and tax regime comparison")]
struct Opts {
    /// JSON settings file (caps, cap policy, regime salary structures)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the section 80C cap
    #[arg(long = "cap-80c", global = true)]
    cap_80c: Option<Decimal>,

    /// Override the section 80D cap
    #[arg(long = "cap-80d", global = true)]
    cap_80d: Option<Decimal>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in a declaration and show its total and cap advisories
    Declare(DeclareCommand),
    /// Validate declarations before saving
    Validate(ValidateCommand),
    /// Compare old and new regime tax per employee
    Compare(CompareCommand),
    /// Salary structures selectable for an employee
    Assign(AssignCommand),
    /// Print expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    if opts.no_color {
        colored::control::set_override(false);
    }

    let mut settings = Settings::load(opts.config.as_deref())?;
    if let Some(cap) = opts.cap_80c {
        settings.caps = settings.caps.with_cap(Section::S80C, cap);
    }
    if let Some(cap) = opts.cap_80d {
        settings.caps = settings.caps.with_cap(Section::S80D, cap);
    }

    match opts.command {
        Command::Declare(declare) => declare.exec(&settings),
        Command::Validate(validate) => validate.exec(&settings),
        Command::Compare(compare) => compare.exec(),
        Command::Assign(assign) => assign.exec(&settings),
        Command::Schema(schema) => schema.exec(),
    }
}
