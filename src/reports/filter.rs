//! Report filtering and totals
//!
//! `filter` never mutates its input and preserves order, so applying the same
//! filter twice gives the same rows as applying it once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Money, Transaction, TransactionType};

/// Category/vendor value meaning "no restriction"
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

/// How the filter narrows by date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Any,
    Day(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl ReportFilter {
    pub fn date_window(&self) -> DateWindow {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => DateWindow::Range(from, to),
            (Some(from), None) => DateWindow::Day(from),
            (None, Some(to)) => {
                warn!(date_to = %to, "end date without a start date is ignored");
                DateWindow::Any
            }
            (None, None) => DateWindow::Any,
        }
    }

    fn category(&self) -> Option<&str> {
        selected(self.category_id.as_deref())
    }

    fn vendor(&self) -> Option<&str> {
        selected(self.vendor_id.as_deref())
    }
}

fn selected(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

/// The transactions matching every criterion of `filter`
pub fn filter(transactions: &[Transaction], filter: &ReportFilter) -> Vec<Transaction> {
    let window = filter.date_window();
    let category = filter.category();
    let vendor = filter.vendor();

    transactions
        .iter()
        .filter(|t| match window {
            DateWindow::Any => true,
            DateWindow::Day(day) => t.date == day,
            DateWindow::Range(from, to) => from <= t.date && t.date <= to,
        })
        .filter(|t| category.map_or(true, |c| t.category_id.as_str() == c))
        .filter(|t| vendor.map_or(true, |v| t.vendor_id.as_str() == v))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub net_flow: Money,
}

pub fn aggregate(transactions: &[Transaction]) -> ReportTotals {
    let mut totals = ReportTotals::default();
    for txn in transactions {
        match txn.kind {
            TransactionType::Income => totals.total_inflow += txn.amount,
            TransactionType::Expense => totals.total_outflow += txn.amount,
        }
    }
    totals.net_flow = totals.total_inflow - totals.total_outflow;
    totals
}
