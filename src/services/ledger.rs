//! Ledger calculations
//!
//! Balances and aggregates derived from the transaction collection. All of
//! these are pure functions of the slice they are given and are recomputed
//! on every read; nothing here is cached or persisted.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType, VendorId};

/// Income and expense totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub inflow: Money,
    pub outflow: Money,
}

impl Totals {
    pub fn net(&self) -> Money {
        self.inflow - self.outflow
    }
}

/// Sum income into inflow and expenses into outflow
pub fn totals(transactions: &[Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut acc, txn| {
            match txn.kind {
                TransactionType::Income => acc.inflow += txn.amount,
                TransactionType::Expense => acc.outflow += txn.amount,
            }
            acc
        })
}

/// `initial_balance + Σ income − Σ expense`
pub fn current_balance(transactions: &[Transaction], initial_balance: Money) -> Money {
    initial_balance + transactions.iter().map(Transaction::signed_amount).sum::<Money>()
}

/// What a single vendor has been paid and has paid in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStats {
    pub total_spent: Money,
    pub total_earned: Money,
    pub count: usize,
    /// Newest date first
    pub transactions: Vec<Transaction>,
}

pub fn vendor_stats(vendor_id: &VendorId, transactions: &[Transaction]) -> VendorStats {
    let matching: Vec<Transaction> = transactions
        .iter()
        .filter(|t| &t.vendor_id == vendor_id)
        .cloned()
        .collect();
    let sums = totals(&matching);

    VendorStats {
        total_spent: sums.outflow,
        total_earned: sums.inflow,
        count: matching.len(),
        transactions: sorted_by_date_desc(matching),
    }
}

/// True iff no transaction references the vendor
pub fn can_delete_vendor(vendor_id: &VendorId, transactions: &[Transaction]) -> bool {
    !transactions.iter().any(|t| &t.vendor_id == vendor_id)
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// e.g. "May 2024"
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

/// Totals per calendar month, most recent month first
pub fn monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), Totals> = BTreeMap::new();
    for txn in transactions {
        let bucket = months
            .entry((txn.date.year(), txn.date.month()))
            .or_default();
        match txn.kind {
            TransactionType::Income => bucket.inflow += txn.amount,
            TransactionType::Expense => bucket.outflow += txn.amount,
        }
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), sums)| MonthlySummary {
            year,
            month,
            label: month_label(year, month),
            income: sums.inflow,
            expense: sums.outflow,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// The `n` most recent transactions by date
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut recent = sorted_by_date_desc(transactions.to_vec());
    recent.truncate(n);
    recent
}

/// Stable sort, newest date first; same-day records keep their stored order
pub fn sorted_by_date_desc(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}
