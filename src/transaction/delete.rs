//! Confirming and deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    dialog::{ConfirmRequest, ConfirmationDialog, DialogKind},
    endpoints::{self, format_endpoint},
};

use super::{core::TransactionId, ledger::Ledger};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Renders the dialog asking the user to confirm deleting a transaction.
pub async fn get_delete_transaction_dialog(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let Ok(ledger) = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    let Some(transaction) = ledger.get(transaction_id) else {
        tracing::error!("Tried to confirm deleting missing transaction {transaction_id}");
        return Error::DeleteMissingTransaction.into_alert_response();
    };

    let message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.description
    );
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction_id);

    ConfirmationDialog {
        title: "Delete Transaction",
        confirm_label: "Delete",
        kind: DialogKind::Error,
        ..ConfirmationDialog::new(&message, ConfirmRequest::Delete(&delete_url))
    }
    .into_html()
    .into_response()
}

/// A route handler for deleting a transaction, redirects to the dashboard on success.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let Ok(mut ledger) = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    match ledger.delete(transaction_id) {
        Ok(transaction) => {
            tracing::info!(
                "Deleted transaction {} ({})",
                transaction.id,
                transaction.description
            );
            (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
