//! The new transaction form and the endpoint for creating transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, loading_spinner},
    timezone::local_today,
};

use super::{
    form::{TransactionForm, TransactionFormErrors, transaction_form_fields},
    ledger::Ledger,
};

/// The state needed to create or edit a transaction.
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The card with the form for adding a transaction.
///
/// The form replaces itself with the response when submitted, so a form with
/// errors is swapped in place.
pub fn new_transaction_form(
    form: &TransactionForm,
    errors: &TransactionFormErrors,
    max_date: Date,
) -> Markup {
    html! {
        form
            id="new-transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-swap="outerHTML"
            class={ (CARD_STYLE) " p-6 space-y-4" }
        {
            h2 class="text-xl font-bold" { "Add Transaction" }

            (transaction_form_fields("new", form, errors, max_date))

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" { (loading_spinner()) }
                "Add Transaction"
            }
        }
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
///
/// Invalid forms are sent back with the field errors.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let new_transaction = match form.validate(today) {
        Ok(new_transaction) => new_transaction,
        Err(errors) => return new_transaction_form(&form, &errors, today).into_response(),
    };

    let Ok(mut ledger) = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    let transaction = ledger.add(new_transaction);
    tracing::info!(
        "Created transaction {} for {} on {}",
        transaction.id,
        transaction.amount,
        transaction.date
    );

    (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, extract::State, http::StatusCode, routing::post};
    use axum_extra::extract::Form;
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{
        endpoints,
        test_utils::{
            assert_form_error_message, assert_hx_endpoint, assert_hx_redirect, assert_status_ok,
            assert_valid_html, must_get_form, parse_html_fragment,
        },
        transaction::{Ledger, TransactionType, form::TransactionForm},
    };

    use super::{TransactionFormState, create_transaction_endpoint};

    fn test_state() -> TransactionFormState {
        TransactionFormState {
            ledger: Arc::new(Mutex::new(Ledger::new(100.0))),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = test_state();
        let form = TransactionForm {
            description: "Coffee".to_owned(),
            amount: Some(4.5),
            type_: TransactionType::Expense,
            category: Some("Food".to_owned()),
            date: None,
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ROOT);
        let ledger = state.ledger.lock().unwrap();
        let transaction = ledger.get(1).expect("transaction 1 was not created");
        assert_eq!(transaction.description, "Coffee");
        assert_eq!(transaction.category.as_deref(), Some("Food"));
        assert_eq!(transaction.date, OffsetDateTime::now_utc().date());
        assert_eq!(ledger.balance(), 95.5);
    }

    #[tokio::test]
    async fn invalid_form_is_rendered_with_errors() {
        let state = test_state();
        let form = TransactionForm {
            description: "Coffee".to_owned(),
            amount: Some(0.0),
            ..Default::default()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_error_message(&form, "Amount must be greater than 0");
        assert!(state.ledger.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn future_date_is_rejected() {
        let state = test_state();
        let tomorrow = OffsetDateTime::now_utc().date() + Duration::days(1);
        let form = TransactionForm {
            description: "Rent".to_owned(),
            amount: Some(500.0),
            date: Some(tomorrow),
            ..Default::default()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form)).await;

        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Date cannot be in the future");
        assert_eq!(state.ledger.lock().unwrap().balance(), 100.0);
    }

    #[tokio::test]
    async fn form_deserialises_with_empty_optional_fields() {
        let state = test_state();
        let app = Router::new()
            .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
            .with_state(state.clone());
        let server = TestServer::new(app);
        let form = [
            ("type", "income"),
            ("description", "Gift"),
            ("amount", "20"),
            ("category", ""),
            ("date", ""),
        ];

        let response = server.post(endpoints::TRANSACTIONS_API).form(&form).await;

        response.assert_status_see_other();
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.balance(), 120.0);
        assert_eq!(ledger.transactions()[0].category, None);
    }
}
