//! The dashboard: the balance, the form for adding transactions and the
//! transaction list.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::nav_bar,
    profile::{Currency, UserProfile},
    timezone::local_today,
    transaction::{
        Ledger, ListQuery, TransactionForm, TransactionFormErrors, ViewParams, derive_view,
        new_transaction_form, transaction_list_section,
    },
};

/// The state needed to render the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub profile: Arc<Mutex<UserProfile>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            profile: state.profile.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

fn balance_card(balance: f64, currency: Currency) -> Markup {
    let amount_style = if balance < 0.0 {
        "text-4xl font-bold text-red-600 dark:text-red-400"
    } else {
        "text-4xl font-bold"
    };

    html! {
        section class={ (CARD_STYLE) " p-6" } aria-labelledby="balance-heading"
        {
            h2 id="balance-heading" class="text-sm font-medium text-gray-500 dark:text-gray-400"
            {
                "Current Balance"
            }
            p class=(amount_style) data-balance { (format_currency(balance, currency)) }
        }
    }
}

/// Display the dashboard with the list state taken from the query string.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Error> {
    let params = ViewParams::from(query);
    let today = local_today(&state.local_timezone)?;

    let (user_name, settings) = {
        let profile = state
            .profile
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
            .map_err(|_| Error::StateLockError)?;

        (profile.details.name.clone(), profile.settings.clone())
    };

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::StateLockError)?;

    let view = derive_view(ledger.transactions(), &params);

    let content = html! {
        (nav_bar(&user_name))

        main class=(PAGE_CONTAINER_STYLE)
        {
            (balance_card(ledger.balance(), settings.currency))

            div class="grid gap-6 lg:grid-cols-3"
            {
                div class="lg:col-span-1"
                {
                    (new_transaction_form(
                        &TransactionForm::default(),
                        &TransactionFormErrors::default(),
                        today,
                    ))
                }

                div class="lg:col-span-2"
                {
                    (transaction_list_section(&view, &params, settings.currency))
                }
            }
        }
    };

    Ok(base("Dashboard", settings.dark_mode, &content).into_response())
}

#[cfg(test)]
mod dashboard_route_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use scraper::Selector;
    use time::OffsetDateTime;

    use crate::{
        Error,
        profile::{Currency, UserProfile},
        test_utils::{assert_status_ok, assert_valid_html, must_get_text, parse_html_document},
        transaction::{Ledger, ListQuery, SortKey},
    };

    use super::{DashboardState, get_dashboard_page};

    fn test_state(ledger: Ledger, profile: UserProfile) -> DashboardState {
        DashboardState {
            ledger: Arc::new(Mutex::new(ledger)),
            profile: Arc::new(Mutex::new(profile)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn demo_state() -> DashboardState {
        let today = OffsetDateTime::now_utc().date();
        test_state(Ledger::with_demo_data(today), UserProfile::default())
    }

    #[tokio::test]
    async fn shows_balance_form_and_list() {
        let response = get_dashboard_page(State(demo_state()), Query(ListQuery::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            must_get_text(&html, "[data-balance]").replace(',', ""),
            "₹2200.00"
        );
        assert_eq!(must_get_text(&html, "#nav-user-name"), "John Doe");
        for selector in ["#new-transaction-form", "#transaction-list", "#dialog-root"] {
            assert!(
                html.select(&Selector::parse(selector).unwrap()).next().is_some(),
                "Missing {selector}"
            );
        }
        let rows = html
            .select(&Selector::parse("tr[data-transaction-id]").unwrap())
            .count();
        assert_eq!(rows, 8);
    }

    #[tokio::test]
    async fn restores_list_state_from_query() {
        let query = ListQuery {
            search: Some("bill".to_owned()),
            sort: Some(SortKey::Amount),
            ..Default::default()
        };

        let response = get_dashboard_page(State(demo_state()), Query(query))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let search = html
            .select(&Selector::parse("input[name=search]").unwrap())
            .next()
            .expect("No search input");
        assert_eq!(search.value().attr("value"), Some("bill"));
        let descriptions = html
            .select(&Selector::parse("tr[data-transaction-id] td:nth-child(2)").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(descriptions, ["Electricity Bill", "Internet Bill"]);
    }

    #[tokio::test]
    async fn applies_dark_mode_and_currency() {
        let mut profile = UserProfile::default();
        profile.settings.dark_mode = true;
        profile.settings.currency = Currency::Usd;

        let response = get_dashboard_page(
            State(test_state(Ledger::new(-12.5), profile)),
            Query(ListQuery::default()),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let root = html
            .select(&Selector::parse("html").unwrap())
            .next()
            .expect("No html element");
        assert_eq!(root.value().attr("class"), Some("dark"));
        assert_eq!(must_get_text(&html, "[data-balance]"), "-$12.50");
        assert!(
            html.select(&Selector::parse("[data-empty-state]").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = demo_state();
        state.local_timezone = "Middle/Earth".to_owned();

        let result = get_dashboard_page(State(state), Query(ListQuery::default())).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
