//! Transaction model
//!
//! A single movement of cash in or out of the petty cash box. Amounts are
//! always positive; the direction comes from the transaction type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId, VendorId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Invalid transaction type: {}", other)),
        }
    }
}

/// How the money moved
///
/// Older data files used `card` and `online`; they read as `others` and
/// `bank` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Upi,
    #[serde(alias = "online")]
    Bank,
    #[serde(alias = "card")]
    Others,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [Self::Cash, Self::Upi, Self::Bank, Self::Others];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Upi => "upi",
            Self::Bank => "bank",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Upi => write!(f, "UPI"),
            Self::Bank => write!(f, "Bank"),
            Self::Others => write!(f, "Others"),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "upi" => Ok(Self::Upi),
            "bank" | "online" => Ok(Self::Bank),
            "others" | "other" | "card" => Ok(Self::Others),
            other => Err(format!("Invalid payment mode: {}", other)),
        }
    }
}

/// A petty cash transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    pub date: NaiveDate,

    pub description: String,

    /// May reference a vendor that no longer exists
    pub vendor_id: VendorId,

    /// May reference a category that no longer exists
    pub category_id: CategoryId,

    /// Always positive
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub payment_mode: PaymentMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Validated fields for a transaction that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub vendor_id: VendorId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub kind: TransactionType,
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
}

/// Partial transaction update; `notes: Some(None)` clears the notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub vendor_id: Option<VendorId>,
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub kind: Option<TransactionType>,
    pub payment_mode: Option<PaymentMode>,
    pub notes: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Transaction {
    pub fn from_draft(id: TransactionId, draft: NewTransaction) -> Self {
        Self {
            id,
            date: draft.date,
            description: draft.description,
            vendor_id: draft.vendor_id,
            category_id: draft.category_id,
            amount: draft.amount,
            kind: draft.kind,
            payment_mode: draft.payment_mode,
            notes: draft.notes,
        }
    }

    /// Copy of this transaction with the patch applied
    pub fn merged(&self, patch: &TransactionPatch) -> Self {
        Self {
            id: self.id.clone(),
            date: patch.date.unwrap_or(self.date),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            vendor_id: patch
                .vendor_id
                .clone()
                .unwrap_or_else(|| self.vendor_id.clone()),
            category_id: patch
                .category_id
                .clone()
                .unwrap_or_else(|| self.category_id.clone()),
            amount: patch.amount.unwrap_or(self.amount),
            kind: patch.kind.unwrap_or(self.kind),
            payment_mode: patch.payment_mode.unwrap_or(self.payment_mode),
            notes: patch.notes.clone().unwrap_or_else(|| self.notes.clone()),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Effect on the cash balance: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxi() -> Transaction {
        Transaction::from_draft(
            TransactionId::new("t3"),
            NewTransaction {
                date: NaiveDate::from_ymd_opt(2024, 5, 19).unwrap(),
                description: "Taxi fare for client meeting".into(),
                vendor_id: VendorId::new("v3"),
                category_id: CategoryId::new("c3"),
                amount: Money::from_major_minor(35, 0),
                kind: TransactionType::Expense,
                payment_mode: PaymentMode::Cash,
                notes: None,
            },
        )
    }

    #[test]
    fn test_signed_amount() {
        let mut txn = taxi();
        assert_eq!(txn.signed_amount(), Money::from_minor(-3500));
        txn.kind = TransactionType::Income;
        assert_eq!(txn.signed_amount(), Money::from_minor(3500));
    }

    #[test]
    fn test_merge_applies_only_patched_fields() {
        let txn = taxi();
        let patch = TransactionPatch {
            amount: Some(Money::from_major_minor(40, 0)),
            notes: Some(Some("Airport run".into())),
            ..TransactionPatch::default()
        };

        let merged = txn.merged(&patch);
        assert_eq!(merged.amount, Money::from_major_minor(40, 0));
        assert_eq!(merged.notes.as_deref(), Some("Airport run"));
        assert_eq!(merged.description, txn.description);
        assert_eq!(merged.id, txn.id);
    }

    #[test]
    fn test_payment_mode_parsing() {
        assert_eq!("UPI".parse::<PaymentMode>().unwrap(), PaymentMode::Upi);
        assert_eq!("card".parse::<PaymentMode>().unwrap(), PaymentMode::Others);
        assert!("cheque".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_legacy_payment_modes_deserialize() {
        let json = r#"{"id":"t4","date":"2024-05-18","description":"Monthly subscription",
            "vendorId":"v4","categoryId":"c4","amount":4900,"type":"expense","paymentMode":"online"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.payment_mode, PaymentMode::Bank);
        assert_eq!(txn.kind, TransactionType::Expense);
        assert!(txn.notes.is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(taxi()).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["paymentMode"], "cash");
        assert_eq!(json["vendorId"], "v3");
        assert_eq!(json["date"], "2024-05-19");
    }
}
