//! The dialog and endpoint for editing a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    dialog::{DIALOG_ROOT_SELECTOR, DialogConfig, DialogSize, dialog_view},
    endpoints::{self, format_endpoint},
    html::{BUTTON_SECONDARY_STYLE, loading_spinner},
    timezone::local_today,
};

use super::{
    core::TransactionId,
    create::TransactionFormState,
    form::{TransactionForm, TransactionFormErrors, transaction_form_fields},
};

const EDIT_FORM_ID: &str = "edit-transaction-form";

const SAVE_BUTTON_STYLE: &str = "px-4 py-2 text-sm font-medium text-white \
    bg-blue-600 rounded-lg hover:bg-blue-700 disabled:opacity-50";

/// The edit dialog for transaction `id`, prefilled with `form`.
///
/// The form re-renders the whole dialog when submitted so field errors
/// replace the dialog in place.
fn edit_transaction_dialog(
    id: TransactionId,
    form: &TransactionForm,
    errors: &TransactionFormErrors,
    max_date: Date,
) -> Markup {
    let update_url = format_endpoint(endpoints::TRANSACTION, id);
    let config = DialogConfig::new("Edit Transaction").size(DialogSize::Large);

    let body = html! {
        form
            id=(EDIT_FORM_ID)
            hx-put=(update_url)
            hx-target=(DIALOG_ROOT_SELECTOR)
            class="p-6 space-y-4"
        {
            (transaction_form_fields("edit", form, errors, max_date))
        }
    };

    // The buttons sit outside the form in the footer and submit it by ID.
    let footer = html! {
        div class="flex items-center justify-end space-x-3"
        {
            button type="button" data-dialog-close class=(BUTTON_SECONDARY_STYLE) { "Cancel" }

            button type="submit" form=(EDIT_FORM_ID) class=(SAVE_BUTTON_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                "Save Changes"
            }
        }
    };

    dialog_view(&config, body, Some(footer))
}

/// Renders the dialog for editing a transaction.
pub async fn get_edit_transaction_dialog(
    State(state): State<TransactionFormState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let Ok(ledger) = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    match ledger.get(transaction_id) {
        Some(transaction) => edit_transaction_dialog(
            transaction_id,
            &TransactionForm::from(transaction),
            &TransactionFormErrors::default(),
            today,
        )
        .into_response(),
        None => {
            tracing::error!("Tried to edit missing transaction {transaction_id}");
            Error::NotFound.into_alert_response()
        }
    }
}

/// A route handler for updating a transaction, redirects to the dashboard on success.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let new_transaction = match form.validate(today) {
        Ok(new_transaction) => new_transaction,
        Err(errors) => {
            return edit_transaction_dialog(transaction_id, &form, &errors, today).into_response();
        }
    };

    let Ok(mut ledger) = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    match ledger.edit(transaction_id, new_transaction) {
        Ok(transaction) => {
            tracing::info!("Updated transaction {}", transaction.id);
            (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
