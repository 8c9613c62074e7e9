//! Dashboard figures
//!
//! Everything the dashboard shows, computed from one consistent snapshot.

use serde::Serialize;

use crate::config::Settings;
use crate::error::PettyResult;
use crate::models::{Money, Transaction};
use crate::storage::RecordStore;

use super::ledger::{current_balance, monthly_breakdown, recent_transactions, totals, MonthlySummary, Totals};

/// Number of transactions listed under "recent activity"
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub initial_balance: Money,
    pub balance: Money,
    pub totals: Totals,
    pub monthly: Vec<MonthlySummary>,
    pub recent: Vec<Transaction>,
}

impl Dashboard {
    pub fn build(store: &RecordStore, settings: &Settings) -> PettyResult<Self> {
        let transactions = store.transactions().list()?;
        Ok(Self::from_transactions(&transactions, settings.initial_balance))
    }

    pub fn from_transactions(transactions: &[Transaction], initial_balance: Money) -> Self {
        Self {
            initial_balance,
            balance: current_balance(transactions, initial_balance),
            totals: totals(transactions),
            monthly: monthly_breakdown(transactions),
            recent: recent_transactions(transactions, RECENT_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_demo_data;

    #[test]
    fn test_dashboard_from_demo_data() {
        let store = RecordStore::in_memory();
        seed_demo_data(&store).unwrap();

        let dashboard = Dashboard::build(&store, &Settings::default()).unwrap();

        assert_eq!(dashboard.totals.inflow, Money::from_major_minor(2500, 0));
        assert_eq!(dashboard.totals.outflow, Money::from_major_minor(339, 50));
        assert_eq!(dashboard.balance, Money::from_major_minor(2660, 50));
        assert_eq!(dashboard.recent.len(), RECENT_LIMIT);
        assert_eq!(dashboard.monthly.len(), 2);
    }

    #[test]
    fn test_empty_dashboard_shows_initial_balance() {
        let dashboard = Dashboard::from_transactions(&[], Money::from_major_minor(500, 0));
        assert_eq!(dashboard.balance, Money::from_major_minor(500, 0));
        assert!(dashboard.recent.is_empty());
        assert!(dashboard.monthly.is_empty());
    }
}
