//! The in-memory store of transactions and the account balance.

use time::{Date, Duration};

use crate::Error;

use super::core::{NewTransaction, Transaction, TransactionId, TransactionType};

/// The opening balance used with the sample transactions.
pub const DEMO_OPENING_BALANCE: f64 = 2200.0;

/// Owns the transactions and the balance.
///
/// The balance is tracked separately from the transactions, starting at the
/// opening balance. Adding, editing and deleting a transaction each apply
/// the transaction's effect on the balance exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Newest first.
    transactions: Vec<Transaction>,
    balance: f64,
    next_id: TransactionId,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new(opening_balance: f64) -> Self {
        Self {
            transactions: Vec::new(),
            balance: opening_balance,
            next_id: 1,
        }
    }

    /// Create a ledger with a week of sample transactions ending on `today`.
    ///
    /// The opening balance is [DEMO_OPENING_BALANCE] and already accounts for
    /// the sample transactions.
    pub fn with_demo_data(today: Date) -> Self {
        let samples = [
            ("Salary", 3000.0, TransactionType::Income, "Salary"),
            ("Groceries", 450.0, TransactionType::Expense, "Food"),
            ("Freelance Project", 1200.0, TransactionType::Income, "Freelance"),
            ("Electricity Bill", 280.0, TransactionType::Expense, "Bills"),
            ("Fuel", 150.0, TransactionType::Expense, "Transportation"),
            ("Bonus", 800.0, TransactionType::Income, "Bonus"),
            ("Restaurant", 320.0, TransactionType::Expense, "Food"),
            ("Internet Bill", 199.0, TransactionType::Expense, "Bills"),
        ];

        let mut ledger = Self::new(DEMO_OPENING_BALANCE);

        // Oldest first so the newest sample gets the largest ID.
        for (days_ago, (description, amount, type_, category)) in
            samples.into_iter().enumerate().rev()
        {
            let transaction = NewTransaction {
                description: description.to_owned(),
                amount,
                type_,
                category: Some(category.to_owned()),
                date: today - Duration::days(days_ago as i64),
            }
            .into_transaction(ledger.take_id());

            ledger.transactions.insert(0, transaction);
        }

        ledger
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The opening balance plus the signed amount of every transaction.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// The transaction with `id`, if it has not been deleted.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Add a transaction to the front of the ledger and apply it to the balance.
    pub fn add(&mut self, new_transaction: NewTransaction) -> &Transaction {
        let transaction = new_transaction.into_transaction(self.take_id());
        self.balance += transaction.signed_amount();
        self.transactions.insert(0, transaction);

        &self.transactions[0]
    }

    /// Replace the fields of the transaction `id`, keeping its ID and position.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingTransaction] if there is no transaction `id`.
    pub fn edit(
        &mut self,
        id: TransactionId,
        new_transaction: NewTransaction,
    ) -> Result<&Transaction, Error> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or(Error::UpdateMissingTransaction)?;

        let previous_effect = transaction.signed_amount();
        *transaction = new_transaction.into_transaction(id);
        self.balance += transaction.signed_amount() - previous_effect;

        Ok(transaction)
    }

    /// Remove the transaction `id` and reverse its effect on the balance.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if there is no transaction `id`.
    pub fn delete(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or(Error::DeleteMissingTransaction)?;

        let transaction = self.transactions.remove(index);
        self.balance -= transaction.signed_amount();

        Ok(transaction)
    }

    fn take_id(&mut self) -> TransactionId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(0.0)
    }
}
