//! Transactions: the ledger that owns them, the pipeline that filters, sorts
//! and totals them for display, and the pages and endpoints for managing them.

mod core;
mod create;
mod delete;
mod edit;
mod form;
mod ledger;
mod list;
mod pipeline;
mod query;

pub use core::{
    MAX_AMOUNT, NewTransaction, Transaction, TransactionId, TransactionType, UNCATEGORIZED,
};
pub use create::{TransactionFormState, create_transaction_endpoint, new_transaction_form};
pub use delete::{
    DeleteTransactionState, delete_transaction_endpoint, get_delete_transaction_dialog,
};
pub use edit::{get_edit_transaction_dialog, update_transaction_endpoint};
pub use form::{TransactionForm, TransactionFormErrors, transaction_form_fields};
pub use ledger::{DEMO_OPENING_BALANCE, Ledger};
pub use list::{
    TRANSACTION_LIST_ID, TransactionListState, get_transaction_list, transaction_list_section,
    transaction_list_view,
};
pub use pipeline::{
    EmptyState, SortDirection, SortKey, Totals, TransactionView, TypeFilter, ViewParams,
    derive_view,
};
pub use query::ListQuery;
