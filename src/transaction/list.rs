//! The searchable, sortable transaction list.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    dialog::DIALOG_ROOT_SELECTOR,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, FORM_TEXT_INPUT_STYLE, LINK_BUTTON_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    profile::{Currency, UserProfile},
};

use super::{
    core::Transaction,
    ledger::Ledger,
    pipeline::{
        EmptyState, SortDirection, SortKey, Totals, TransactionView, TypeFilter, ViewParams,
        derive_view,
    },
    query::ListQuery,
};

/// The max number of graphemes to display in the transaction rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The ID of the element the list fragment is swapped into.
pub const TRANSACTION_LIST_ID: &str = "transaction-list";

const CONTROLS_FORM_ID: &str = "transaction-controls";

/// The state needed to render the transaction list.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub profile: Arc<Mutex<UserProfile>>,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            profile: state.profile.clone(),
        }
    }
}

/// Renders the transaction list for the search, filter and sort in the query.
pub async fn get_transaction_list(
    State(state): State<TransactionListState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Error> {
    let params = ViewParams::from(query);
    let currency = state
        .profile
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
        .map_err(|_| Error::StateLockError)?
        .settings
        .currency;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::StateLockError)?;

    let view = derive_view(ledger.transactions(), &params);

    Ok(transaction_list_view(&view, &params, currency).into_response())
}

/// The search and filter controls followed by the list itself.
pub fn transaction_list_section(
    view: &TransactionView<'_>,
    params: &ViewParams,
    currency: Currency,
) -> Markup {
    html! {
        section class={ (CARD_STYLE) " p-6 space-y-4" } aria-labelledby="transactions-heading"
        {
            h2 id="transactions-heading" class="text-xl font-bold" { "Transactions" }

            (list_controls(params))

            div id=(TRANSACTION_LIST_ID)
            {
                (transaction_list_view(view, params, currency))
            }
        }
    }
}

fn list_controls(params: &ViewParams) -> Markup {
    html! {
        form
            id=(CONTROLS_FORM_ID)
            hx-get=(endpoints::TRANSACTION_LIST)
            hx-trigger="input changed delay:300ms from:input[name=search], change"
            hx-target={ "#" (TRANSACTION_LIST_ID) }
            class="flex flex-col gap-3 sm:flex-row"
        {
            input
                type="search"
                name="search"
                placeholder="Search transactions..."
                aria-label="Search transactions"
                value=(params.search)
                class=(FORM_TEXT_INPUT_STYLE);

            select
                name="type"
                aria-label="Filter by type"
                class={ (FORM_TEXT_INPUT_STYLE) " sm:w-48" }
            {
                @for filter in [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense] {
                    option
                        value=(filter.as_query_value())
                        selected[params.type_filter == filter]
                    {
                        (filter.label())
                    }
                }
            }
        }
    }
}

/// The table of transactions and the totals, or the empty state.
///
/// The current sort is written as hidden inputs owned by the controls form
/// so that searching and filtering keep the sort order.
pub fn transaction_list_view(
    view: &TransactionView<'_>,
    params: &ViewParams,
    currency: Currency,
) -> Markup {
    html! {
        input
            type="hidden"
            name="sort"
            form=(CONTROLS_FORM_ID)
            value=(params.sort_key.as_query_value());
        input
            type="hidden"
            name="dir"
            form=(CONTROLS_FORM_ID)
            value=(params.direction.as_query_value());

        @match view.empty_state {
            Some(empty_state) => (empty_state_view(empty_state)),
            None => {
                div class="overflow-x-auto rounded-lg"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                @for key in [SortKey::Date, SortKey::Description, SortKey::Category, SortKey::Amount] {
                                    (sort_header(key, params))
                                }
                                th scope="col" class="px-6 py-3" { span class="sr-only" { "Actions" } }
                            }
                        }

                        tbody
                        {
                            @for transaction in &view.rows {
                                (transaction_row(transaction, currency))
                            }
                        }
                    }
                }
            }
        }

        (list_footer(view, currency))
    }
}

fn sort_header(key: SortKey, params: &ViewParams) -> Markup {
    let is_active = params.sort_key == key;
    let aria_sort = match (is_active, params.direction) {
        (false, _) => "none",
        (true, SortDirection::Ascending) => "ascending",
        (true, SortDirection::Descending) => "descending",
    };
    let class = if key == SortKey::Amount {
        "px-6 py-3 text-right"
    } else {
        "px-6 py-3"
    };
    let url = params
        .with_sort_toggled(key)
        .to_url(endpoints::TRANSACTION_LIST);

    html! {
        th
            scope="col"
            aria-sort=(aria_sort)
            class=(class)
        {
            button
                type="button"
                hx-get=(url)
                hx-target={ "#" (TRANSACTION_LIST_ID) }
                data-sort-key=(key.as_query_value())
                class="inline-flex items-center gap-1 uppercase hover:text-gray-900 dark:hover:text-white"
            {
                (key.label())
                @if is_active {
                    span aria-hidden="true" { (params.direction.arrow()) }
                }
            }
        }
    }
}

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

fn transaction_row(transaction: &Transaction, currency: Currency) -> Markup {
    let signed_amount = transaction.signed_amount();
    let (description, tooltip) = format_description(&transaction.description);
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION_VIEW, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE)
            {
                @if transaction.category.is_some() {
                    (transaction.category_label())
                } @else {
                    span class="text-gray-400 dark:text-gray-500" { (transaction.category_label()) }
                }
            }
            td class={ "px-6 py-4 text-right tabular-nums " (amount_class(signed_amount)) }
            {
                (format_currency(signed_amount, currency))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    button
                        type="button"
                        hx-get=(edit_url)
                        hx-target=(DIALOG_ROOT_SELECTOR)
                        class=(LINK_BUTTON_STYLE)
                    {
                        "Edit"
                    }

                    button
                        type="button"
                        hx-get=(delete_url)
                        hx-target=(DIALOG_ROOT_SELECTOR)
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn empty_state_view(empty_state: EmptyState) -> Markup {
    let (heading, message) = match empty_state {
        EmptyState::NoTransactions => (
            "No Transactions Yet",
            "Add your first transaction using the form above.",
        ),
        EmptyState::NoMatches => (
            "No Matching Transactions",
            "Try a different search or filter.",
        ),
    };

    html! {
        div class="py-12 text-center" data-empty-state
        {
            p class="text-lg font-semibold" { (heading) }
            p class="mt-1 text-gray-500 dark:text-gray-400" { (message) }
        }
    }
}

fn list_footer(view: &TransactionView<'_>, currency: Currency) -> Markup {
    let Totals {
        income,
        expenses,
        net,
    } = view.totals;

    html! {
        div
            class="flex flex-col gap-2 pt-4 border-t border-gray-200 dark:border-gray-700
                text-sm sm:flex-row sm:justify-between"
            data-list-footer
        {
            p { "Showing " (view.rows.len()) " of " (view.total_count) " transactions" }

            dl class="flex gap-4"
            {
                div class="flex gap-1"
                {
                    dt { "Income:" }
                    dd class="text-green-700 dark:text-green-300" data-total="income" { (format_currency(income, currency)) }
                }
                div class="flex gap-1"
                {
                    dt { "Expenses:" }
                    dd class="text-red-700 dark:text-red-300" data-total="expenses" { (format_currency(expenses, currency)) }
                }
                div class="flex gap-1"
                {
                    dt { "Net:" }
                    dd class=(amount_class(net)) data-total="net" { (format_currency(net, currency)) }
                }
            }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::response::IntoResponse;
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        html::format_currency,
        profile::{Currency, UserProfile},
        test_utils::{assert_status_ok, assert_valid_html, parse_html_fragment},
        transaction::{
            Ledger, NewTransaction, TransactionType,
            pipeline::{SortDirection, SortKey, TypeFilter, ViewParams, derive_view},
            query::ListQuery,
        },
    };

    use super::{
        MAX_DESCRIPTION_GRAPHEMES, TransactionListState, format_description,
        get_transaction_list, transaction_list_view,
    };

    fn new_transaction(description: &str, amount: f64, type_: TransactionType) -> NewTransaction {
        NewTransaction {
            description: description.to_owned(),
            amount,
            type_,
            category: None,
            date: date!(2025 - 06 - 20),
        }
    }

    fn test_state() -> TransactionListState {
        let mut ledger = Ledger::new(0.0);
        ledger.add(new_transaction("Salary", 3000.0, TransactionType::Income));
        ledger.add(new_transaction("Groceries", 450.0, TransactionType::Expense));
        ledger.add(new_transaction("Fuel", 150.0, TransactionType::Expense));

        TransactionListState {
            ledger: Arc::new(Mutex::new(ledger)),
            profile: Arc::new(Mutex::new(UserProfile::default())),
        }
    }

    fn row_descriptions(html: &Html) -> Vec<String> {
        let selector = Selector::parse("tbody tr td:nth-child(2)").unwrap();
        html.select(&selector)
            .map(|cell| cell.text().collect::<String>())
            .collect()
    }

    fn must_get_total<'a>(html: &'a Html, total: &str) -> ElementRef<'a> {
        let selector = Selector::parse(&format!("dd[data-total={total}]")).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No {total} total found"))
    }

    #[tokio::test]
    async fn filters_and_sorts_from_query() {
        let query = ListQuery {
            search: None,
            type_filter: Some(TypeFilter::Expense),
            sort: Some(SortKey::Amount),
            dir: Some(SortDirection::Ascending),
        };

        let response = get_transaction_list(State(test_state()), Query(query))
            .await
            .into_response();

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(row_descriptions(&html), ["Fuel", "Groceries"]);
        assert_eq!(
            must_get_total(&html, "expenses").text().collect::<String>(),
            format_currency(600.0, Currency::Inr)
        );
        assert_eq!(
            must_get_total(&html, "net").text().collect::<String>(),
            format_currency(-600.0, Currency::Inr)
        );
    }

    #[tokio::test]
    async fn uses_profile_currency() {
        let state = test_state();
        state.profile.lock().unwrap().settings.currency = Currency::Eur;

        let response = get_transaction_list(State(state), Query(ListQuery::default()))
            .await
            .into_response();

        let html = parse_html_fragment(response).await;
        assert_eq!(
            must_get_total(&html, "income").text().collect::<String>(),
            format_currency(3000.0, Currency::Eur)
        );
    }

    #[test]
    fn shows_count_of_rows_and_total() {
        let state = test_state();
        let ledger = state.ledger.lock().unwrap();
        let params = ViewParams {
            search: "gro".to_owned(),
            ..Default::default()
        };
        let view = derive_view(ledger.transactions(), &params);

        let html = Html::parse_fragment(
            &transaction_list_view(&view, &params, Currency::Inr).into_string(),
        );

        let footer = html
            .select(&Selector::parse("[data-list-footer] p").unwrap())
            .next()
            .expect("No footer found")
            .text()
            .collect::<String>();
        assert_eq!(footer, "Showing 1 of 3 transactions");
    }

    #[test]
    fn active_sort_header_toggles_direction() {
        let ledger = Ledger::with_demo_data(date!(2025 - 06 - 20));
        let params = ViewParams::default();
        let view = derive_view(ledger.transactions(), &params);

        let html = Html::parse_fragment(
            &transaction_list_view(&view, &params, Currency::Inr).into_string(),
        );

        let date_button = html
            .select(&Selector::parse("button[data-sort-key=date]").unwrap())
            .next()
            .expect("No date sort button");
        assert_eq!(
            date_button.value().attr("hx-get"),
            Some("/transactions/list?search=&type=all&sort=date&dir=asc")
        );
        assert!(date_button.text().collect::<String>().contains('↓'));

        let amount_button = html
            .select(&Selector::parse("button[data-sort-key=amount]").unwrap())
            .next()
            .expect("No amount sort button");
        assert_eq!(
            amount_button.value().attr("hx-get"),
            Some("/transactions/list?search=&type=all&sort=amount&dir=desc")
        );
    }

    #[test]
    fn rows_link_to_dialogs() {
        let state = test_state();
        let ledger = state.ledger.lock().unwrap();
        let params = ViewParams::default();
        let view = derive_view(ledger.transactions(), &params);

        let html = Html::parse_fragment(
            &transaction_list_view(&view, &params, Currency::Inr).into_string(),
        );

        let row = html
            .select(&Selector::parse("tr[data-transaction-id='1']").unwrap())
            .next()
            .expect("No row for transaction 1");
        let targets = row
            .select(&Selector::parse("button[hx-get]").unwrap())
            .map(|button| {
                (
                    button.value().attr("hx-get").unwrap_or_default(),
                    button.value().attr("hx-target").unwrap_or_default(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            targets,
            [
                ("/transactions/1/edit", "#dialog-root"),
                ("/transactions/1/delete", "#dialog-root")
            ]
        );
        assert!(
            row.text().collect::<String>().contains("Uncategorized"),
            "want missing category shown as Uncategorized"
        );
    }

    #[test]
    fn distinguishes_empty_states() {
        let params = ViewParams::default();
        let empty = derive_view(&[], &params);
        let html =
            Html::parse_fragment(&transaction_list_view(&empty, &params, Currency::Inr).into_string());
        assert!(html.root_element().text().collect::<String>().contains("No Transactions Yet"));

        let state = test_state();
        let ledger = state.ledger.lock().unwrap();
        let params = ViewParams {
            search: "nothing like this".to_owned(),
            ..Default::default()
        };
        let no_matches = derive_view(ledger.transactions(), &params);
        let html = Html::parse_fragment(
            &transaction_list_view(&no_matches, &params, Currency::Inr).into_string(),
        );
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No Matching Transactions"));
        assert!(text.contains("Showing 0 of 3 transactions"));
    }

    #[test]
    fn truncates_long_descriptions() {
        let long = "🙂".repeat(MAX_DESCRIPTION_GRAPHEMES + 1);

        let (description, tooltip) = format_description(&long);

        assert_eq!(description, "🙂".repeat(MAX_DESCRIPTION_GRAPHEMES - 3) + "...");
        assert_eq!(tooltip, Some(long.as_str()));
        assert_eq!(format_description("Coffee"), ("Coffee".to_owned(), None));
    }
}
