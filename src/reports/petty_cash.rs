//! Petty cash report
//!
//! Filtered transactions with vendor and category names resolved, plus the
//! inflow/outflow totals. Generating a report never writes anything.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::{truncate, Names};
use crate::error::{PettyError, PettyResult};
use crate::models::{PaymentMode, Transaction, TransactionType};
use crate::storage::RecordStore;

use super::filter::{aggregate, filter, ReportFilter, ReportTotals};

/// One transaction as it appears in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub vendor_id: String,
    pub vendor: String,
    pub category_id: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub payment_mode: PaymentMode,
    /// Decimal amount, e.g. "120.50"
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PettyCashReport {
    pub filter: ReportFilter,
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
    #[serde(skip)]
    pub transactions: Vec<Transaction>,
}

impl PettyCashReport {
    pub fn generate(store: &RecordStore, report_filter: &ReportFilter) -> PettyResult<Self> {
        let transactions = store.transactions().list()?;
        let names = Names::load(store)?;
        Ok(Self::build(&transactions, report_filter, &names))
    }

    /// Build from an explicit transaction list and name lookup
    pub fn build(transactions: &[Transaction], report_filter: &ReportFilter, names: &Names) -> Self {
        let matching = filter(transactions, report_filter);
        let rows = matching
            .iter()
            .map(|t| ReportRow {
                id: t.id.to_string(),
                date: t.date,
                description: t.description.clone(),
                vendor_id: t.vendor_id.to_string(),
                vendor: names.vendor(&t.vendor_id).to_string(),
                category_id: t.category_id.to_string(),
                category: names.category(&t.category_id).to_string(),
                kind: t.kind,
                payment_mode: t.payment_mode,
                amount: t.amount.to_string(),
                notes: t.notes.clone(),
            })
            .collect();

        Self {
            filter: report_filter.clone(),
            rows,
            totals: aggregate(&matching),
            transactions: matching,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text handed to the summariser: the report rows as pretty JSON
    pub fn summary_input(&self) -> PettyResult<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Petty Cash Report: {}\n", self.describe_filter()));
        output.push_str(&"=".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "Total Inflow:  {}\n",
            self.totals.total_inflow.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total Outflow: {}\n",
            self.totals.total_outflow.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Net Flow:      {}\n\n",
            self.totals.net_flow.format_with_symbol(currency)
        ));

        if self.rows.is_empty() {
            output.push_str("No transactions match the selected filters.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10}  {:<30}  {:<20}  {:<16}  {:<7}  {:>12}\n",
            "Date", "Description", "Vendor", "Category", "Type", "Amount"
        ));
        output.push_str(&"-".repeat(96));
        output.push('\n');

        for (row, txn) in self.rows.iter().zip(&self.transactions) {
            let amount = match txn.kind {
                TransactionType::Income => format!("+{}", txn.amount.format_with_symbol(currency)),
                TransactionType::Expense => format!("-{}", txn.amount.format_with_symbol(currency)),
            };
            output.push_str(&format!(
                "{:<10}  {:<30}  {:<20}  {:<16}  {:<7}  {:>12}\n",
                row.date,
                truncate(&row.description, 30),
                truncate(&row.vendor, 20),
                truncate(&row.category, 16),
                row.kind.as_str(),
                amount
            ));
        }

        output.push_str(&"-".repeat(96));
        output.push('\n');
        output.push_str(&format!("Showing {} transactions.\n", self.rows.len()));
        output
    }

    fn describe_filter(&self) -> String {
        let mut parts = Vec::new();
        match (self.filter.date_from, self.filter.date_to) {
            (Some(from), Some(to)) => parts.push(format!("{} to {}", from, to)),
            (Some(from), None) => parts.push(format!("on {}", from)),
            _ => parts.push("all dates".to_string()),
        }
        if let Some(category) = self.filter.category_id.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("category {}", category));
        }
        if let Some(vendor) = self.filter.vendor_id.as_deref().filter(|v| !v.is_empty()) {
            parts.push(format!("vendor {}", vendor));
        }
        parts.join(", ")
    }

    /// Export the rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> PettyResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record([
                "ID",
                "Date",
                "Description",
                "Vendor",
                "Category",
                "Type",
                "Payment Mode",
                "Amount",
                "Notes",
            ])
            .map_err(export_error)?;

        for row in &self.rows {
            let date = row.date.to_string();
            csv_writer
                .write_record([
                    row.id.as_str(),
                    date.as_str(),
                    row.description.as_str(),
                    row.vendor.as_str(),
                    row.category.as_str(),
                    row.kind.as_str(),
                    row.payment_mode.as_str(),
                    row.amount.as_str(),
                    row.notes.as_deref().unwrap_or(""),
                ])
                .map_err(export_error)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn export_json<W: Write>(&self, writer: W) -> PettyResult<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| PettyError::Export(e.to_string()))
    }

    pub fn export_yaml<W: Write>(&self, writer: W) -> PettyResult<()> {
        serde_yaml::to_writer(writer, self).map_err(|e| PettyError::Export(e.to_string()))
    }
}

fn export_error(err: csv::Error) -> PettyError {
    PettyError::Export(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, TransactionId, VendorId};
    use crate::storage::seed_demo_data;

    fn demo_report(report_filter: &ReportFilter) -> PettyCashReport {
        let store = RecordStore::in_memory();
        seed_demo_data(&store).unwrap();
        PettyCashReport::generate(&store, report_filter).unwrap()
    }

    #[test]
    fn test_generate_resolves_names() {
        let report = demo_report(&ReportFilter {
            vendor_id: Some("v2".into()),
            ..ReportFilter::default()
        });

        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.vendor, "Quick Eats Cafe");
        assert_eq!(row.category, "Food & Beverage");
        assert_eq!(row.amount, "120.50");
        assert_eq!(report.totals.total_outflow, Money::from_minor(12050));
    }

    #[test]
    fn test_dangling_references_render_as_na() {
        let transactions = vec![Transaction {
            id: TransactionId::new("t1"),
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            description: "Orphan".into(),
            vendor_id: VendorId::new("v-gone"),
            category_id: CategoryId::new("c-gone"),
            amount: Money::from_minor(100),
            kind: TransactionType::Expense,
            payment_mode: PaymentMode::Cash,
            notes: None,
        }];
        let report =
            PettyCashReport::build(&transactions, &ReportFilter::default(), &Names::default());
        assert_eq!(report.rows[0].vendor, "N/A");
        assert_eq!(report.rows[0].category, "N/A");
    }

    #[test]
    fn test_generate_does_not_write() {
        let store = RecordStore::in_memory();
        seed_demo_data(&store).unwrap();
        let before = store.snapshot().unwrap();

        PettyCashReport::generate(&store, &ReportFilter::default()).unwrap();
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn test_export_csv() {
        let report = demo_report(&ReportFilter {
            category_id: Some("c6".into()),
            ..ReportFilter::default()
        });

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID,Date,Description"));
        assert_eq!(
            lines[1],
            "t5,2024-05-15,Initial cash deposit,Client A,Client Revenue,income,cash,1000.00,"
        );
    }

    #[test]
    fn test_export_json_includes_totals() {
        let report = demo_report(&ReportFilter {
            category_id: Some("c6".into()),
            ..ReportFilter::default()
        });

        let mut buffer = Vec::new();
        report.export_json(&mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["totals"]["totalInflow"], 250000);
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_summary_input_is_pretty_json_of_rows() {
        let report = demo_report(&ReportFilter {
            vendor_id: Some("v3".into()),
            ..ReportFilter::default()
        });
        let input = report.summary_input().unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&input).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(input.contains("\n  {"));
        assert_eq!(parsed[0]["vendor"], "City Transport");
    }

    #[test]
    fn test_format_terminal() {
        let report = demo_report(&ReportFilter::default());
        let text = report.format_terminal("₹");
        assert!(text.contains("Total Inflow:  ₹2500.00"));
        assert!(text.contains("Showing 7 transactions."));

        let empty = demo_report(&ReportFilter {
            vendor_id: Some("v404".into()),
            ..ReportFilter::default()
        });
        assert!(empty
            .format_terminal("₹")
            .contains("No transactions match the selected filters."));
    }
}
