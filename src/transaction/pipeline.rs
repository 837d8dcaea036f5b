//! Turns the ledger's transactions into the rows and totals shown in the
//! transaction list.
//!
//! [derive_view] filters by type and search text, sorts by the selected key
//! and sums income and expenses over the filtered rows. It borrows the input
//! and never reorders it.

use std::{cmp::Ordering, sync::LazyLock};

use icu_collator::{
    Collator, CollatorBorrowed,
    options::{CollatorOptions, Strength},
};
use serde::Deserialize;

use super::core::{Transaction, TransactionType};

/// Which transaction types to show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Income and expenses.
    #[default]
    All,
    /// Income only.
    Income,
    /// Expenses only.
    Expense,
}

impl TypeFilter {
    /// Whether a transaction of type `type_` passes the filter.
    pub fn matches(self, type_: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => type_ == TransactionType::Income,
            TypeFilter::Expense => type_ == TransactionType::Expense,
        }
    }

    /// The option text in the filter select.
    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "All Types",
            TypeFilter::Income => "Income",
            TypeFilter::Expense => "Expense",
        }
    }

    /// The value of the `type` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

/// The field the transaction list is ordered by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Chronological.
    #[default]
    Date,
    /// By magnitude, regardless of type.
    Amount,
    /// Alphabetical, ignoring case.
    Description,
    /// Alphabetical, with missing categories first when ascending.
    Category,
}

impl SortKey {
    /// The column heading.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Date => "Date",
            SortKey::Amount => "Amount",
            SortKey::Description => "Description",
            SortKey::Category => "Category",
        }
    }

    /// The value of the `sort` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
            SortKey::Description => "description",
            SortKey::Category => "category",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.total_cmp(&b.amount),
            SortKey::Description => compare_text(&a.description, &b.description),
            SortKey::Category => compare_text(a.category_text(), b.category_text()),
        }
    }
}

/// Root locale collation at secondary strength: accents count, case does not.
static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Secondary);

    Collator::try_new(Default::default(), options)
        .inspect_err(|error| tracing::error!("could not load text collation data: {error}"))
        .ok()
});

/// Compare in alphabetical order ignoring case, falling back to the raw text
/// so the order is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    let collated = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };

    collated.then_with(|| a.cmp(b))
}

/// The order of the sort column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SortDirection {
    /// Smallest, earliest or first in the alphabet first.
    #[serde(rename = "asc")]
    Ascending,
    /// The reverse of [SortDirection::Ascending].
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// The value of the `dir` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// The arrow shown next to the active sort column.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// How the transaction list is filtered and ordered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewParams {
    /// Matched case-insensitively against the description and category.
    pub search: String,
    /// Applied together with the search.
    pub type_filter: TypeFilter,
    /// The column the rows are ordered by.
    pub sort_key: SortKey,
    /// The order of [ViewParams::sort_key].
    pub direction: SortDirection,
}

impl ViewParams {
    /// Sort by `key`, flipping the direction if `key` is already selected.
    ///
    /// A newly selected key starts in descending order.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.flipped();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Descending;
        }
    }

    /// A copy of the params with [ViewParams::toggle_sort] applied.
    pub fn with_sort_toggled(&self, key: SortKey) -> Self {
        let mut params = self.clone();
        params.toggle_sort(key);
        params
    }

    fn matches(&self, transaction: &Transaction, search: &str) -> bool {
        if !self.type_filter.matches(transaction.type_) {
            return false;
        }

        search.is_empty()
            || transaction.description.to_lowercase().contains(search)
            || transaction.category_text().to_lowercase().contains(search)
    }
}

/// Sums over a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of the income amounts.
    pub income: f64,
    /// Sum of the expense amounts, as a positive number.
    pub expenses: f64,
    /// `income - expenses`
    pub net: f64,
}

impl Totals {
    fn sum<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (income, expenses) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expenses), transaction| {
                    match transaction.type_ {
                        TransactionType::Income => (income + transaction.amount, expenses),
                        TransactionType::Expense => (income, expenses + transaction.amount),
                    }
                });

        Self {
            income,
            expenses,
            net: income - expenses,
        }
    }
}

/// Why the transaction list has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// There are no transactions at all.
    NoTransactions,
    /// There are transactions but the filters exclude all of them.
    NoMatches,
}

/// The rows and totals for the transaction list.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView<'a> {
    /// The filtered transactions in display order.
    pub rows: Vec<&'a Transaction>,
    /// Sums over [TransactionView::rows].
    pub totals: Totals,
    /// The number of transactions before filtering.
    pub total_count: usize,
    /// Set when [TransactionView::rows] is empty.
    pub empty_state: Option<EmptyState>,
}

/// Filter, sort and total `transactions` according to `params`.
pub fn derive_view<'a>(transactions: &'a [Transaction], params: &ViewParams) -> TransactionView<'a> {
    let search = params.search.trim().to_lowercase();

    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| params.matches(transaction, &search))
        .collect();

    // `sort_by` is stable, equal rows keep their ledger order in both directions.
    rows.sort_by(|a, b| {
        let ordering = params.sort_key.compare(a, b);

        match params.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let totals = Totals::sum(rows.iter().copied());

    let empty_state = match (rows.is_empty(), transactions.is_empty()) {
        (false, _) => None,
        (true, true) => Some(EmptyState::NoTransactions),
        (true, false) => Some(EmptyState::NoMatches),
    };

    TransactionView {
        rows,
        totals,
        total_count: transactions.len(),
        empty_state,
    }
}
