//! The transaction model.

use serde::{Deserialize, Serialize};
use time::Date;

/// Identifies a transaction in the ledger.
pub type TransactionId = u64;

/// The largest amount a single transaction may have.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// What a transaction with no category is displayed as.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Adds to the balance.
    Income,
    /// Subtracts from the balance.
    Expense,
}

impl TransactionType {
    /// The name shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// The value used for the type in forms and URLs.
    pub fn as_form_value(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The categories suggested in the transaction form.
    pub fn default_categories(self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => &[
                "Salary",
                "Freelance",
                "Investment",
                "Gift",
                "Bonus",
                "Other",
            ],
            TransactionType::Expense => &[
                "Food",
                "Transportation",
                "Shopping",
                "Bills",
                "Entertainment",
                "Healthcare",
                "Other",
            ],
        }
    }
}

/// A record of money moving in or out of the account.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Assigned by the ledger, never reused.
    pub id: TransactionId,
    /// What the transaction was for.
    pub description: String,
    /// The magnitude of the transaction, always positive.
    pub amount: f64,
    /// Decides the sign of the transaction.
    pub type_: TransactionType,
    /// Shown as "Uncategorized" when missing.
    pub category: Option<String>,
    /// The day the transaction happened, never in the future.
    pub date: Date,
}

impl Transaction {
    /// The effect the transaction has on the balance.
    pub fn signed_amount(&self) -> f64 {
        match self.type_ {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// The category as shown to the user.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// The category as used for searching and sorting.
    pub fn category_text(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }
}

/// The validated fields of a transaction that is about to be added or
/// edited. The ledger assigns the ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Trimmed and non-empty.
    pub description: String,
    /// Greater than zero and at most [MAX_AMOUNT].
    pub amount: f64,
    /// Income or expense.
    pub type_: TransactionType,
    /// `None` when the category field was left blank.
    pub category: Option<String>,
    /// Today or earlier.
    pub date: Date,
}

impl NewTransaction {
    pub(crate) fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            type_: self.type_,
            category: self.category,
            date: self.date,
        }
    }
}
