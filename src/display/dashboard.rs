//! Dashboard display formatting

use crate::config::Settings;
use crate::services::Dashboard;

use super::transaction::format_transaction_register;
use super::Names;

pub fn format_dashboard(dashboard: &Dashboard, names: &Names, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("PettyFlow Dashboard\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "Current Balance: {}\n",
        settings.format_money(dashboard.balance)
    ));
    output.push_str(&format!(
        "Total Inflow:    {}\n",
        settings.format_money(dashboard.totals.inflow)
    ));
    output.push_str(&format!(
        "Total Outflow:   {}\n",
        settings.format_money(dashboard.totals.outflow)
    ));
    output.push_str(&format!(
        "Opening Balance: {}\n\n",
        settings.format_money(dashboard.initial_balance)
    ));

    if !dashboard.monthly.is_empty() {
        output.push_str("Monthly Overview\n");
        output.push_str(&format!("{:<10} {:>14} {:>14}\n", "Month", "Income", "Expense"));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for month in &dashboard.monthly {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14}\n",
                month.label,
                settings.format_money(month.income),
                settings.format_money(month.expense)
            ));
        }
        output.push('\n');
    }

    output.push_str("Recent Transactions\n");
    output.push_str(&format_transaction_register(&dashboard.recent, names, settings));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{seed_demo_data, RecordStore};

    #[test]
    fn test_format_dashboard() {
        let store = RecordStore::in_memory();
        seed_demo_data(&store).unwrap();
        let settings = Settings::default();
        let dashboard = Dashboard::build(&store, &settings).unwrap();

        let output = format_dashboard(&dashboard, &Names::load(&store).unwrap(), &settings);
        assert!(output.contains("Current Balance: ₹2660.50"));
        assert!(output.contains("May 2024"));
        assert!(output.contains("Team lunch"));
        assert!(!output.contains("Internet Bill"));
    }
}
