//! CLI command for the petty cash report
//!
//! Filters the ledger and prints or exports the result, optionally with an
//! assistant-written summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::ai::{self, Assistant};
use crate::config::Settings;
use crate::error::{PettyError, PettyResult};
use crate::reports::{PettyCashReport, ReportFilter};
use crate::services::validation::parse_date;
use crate::services::{CategoryService, VendorService};
use crate::storage::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Csv,
    Json,
    Yaml,
}

/// Report arguments
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Start date (YYYY-MM-DD); alone, selects that single day
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive; ignored without --from
    #[arg(long)]
    pub to: Option<String>,

    /// Category name or ID, or "all"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Vendor name or ID, or "all"
    #[arg(short, long)]
    pub vendor: Option<String>,

    /// Ask the assistant for a summary of the matching transactions
    #[arg(short, long)]
    pub summary: bool,

    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the report command
pub fn handle_report_command(
    store: &RecordStore,
    settings: &Settings,
    args: ReportArgs,
) -> PettyResult<()> {
    let filter = build_filter(store, &args)?;
    let report = PettyCashReport::generate(store, &filter)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PettyError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, settings, args.format, &mut writer)?;
            writer.flush()?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report(&report, settings, args.format, &mut stdout.lock())?;
        }
    }

    if args.summary {
        let assistant = ai::assistant_from_settings(&settings.ai);
        print_summary(&report, assistant.as_ref())?;
    }

    Ok(())
}

fn build_filter(store: &RecordStore, args: &ReportArgs) -> PettyResult<ReportFilter> {
    let category_id = match args.category.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() && !c.eq_ignore_ascii_case("all") => {
            Some(CategoryService::new(store).resolve(c)?.id.to_string())
        }
        other => other.map(String::from),
    };
    let vendor_id = match args.vendor.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() && !v.eq_ignore_ascii_case("all") => {
            Some(VendorService::new(store).resolve(v)?.id.to_string())
        }
        other => other.map(String::from),
    };

    Ok(ReportFilter {
        date_from: args.from.as_deref().map(|d| date_arg("from", d)).transpose()?,
        date_to: args.to.as_deref().map(|d| date_arg("to", d)).transpose()?,
        category_id,
        vendor_id,
    })
}

fn date_arg(field: &str, input: &str) -> PettyResult<chrono::NaiveDate> {
    parse_date(input).ok_or_else(|| {
        PettyError::field(field, format!("Invalid date: {}. Use YYYY-MM-DD", input))
    })
}

fn write_report<W: Write>(
    report: &PettyCashReport,
    settings: &Settings,
    format: ReportFormat,
    writer: &mut W,
) -> PettyResult<()> {
    match format {
        ReportFormat::Table => write!(writer, "{}", report.format_terminal(&settings.currency_symbol))?,
        ReportFormat::Csv => report.export_csv(&mut *writer)?,
        ReportFormat::Json => {
            report.export_json(&mut *writer)?;
            writeln!(writer)?;
        }
        ReportFormat::Yaml => report.export_yaml(&mut *writer)?,
    }
    Ok(())
}

fn print_summary(report: &PettyCashReport, assistant: &dyn Assistant) -> PettyResult<()> {
    if report.is_empty() {
        println!("\nNo transactions to summarize.");
        return Ok(());
    }
    let summary = ai::summarize_report(assistant, &report.summary_input()?);
    println!("\nAI Summary\n{}\n{}", "-".repeat(10), summary);
    Ok(())
}
