//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    error_page::{get_internal_server_error_page, get_not_found_page},
    help::{get_faq_list, get_help_dialog},
    profile::{
        change_password_endpoint, get_profile_dialog, get_settings_dialog,
        update_profile_endpoint, update_settings_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_delete_transaction_dialog,
        get_edit_transaction_dialog, get_transaction_list, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::TRANSACTION_LIST, get(get_transaction_list))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_dialog),
        )
        .route(
            endpoints::DELETE_TRANSACTION_VIEW,
            get(get_delete_transaction_dialog),
        )
        .route(endpoints::PROFILE_VIEW, get(get_profile_dialog))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_dialog))
        .route(endpoints::HELP_VIEW, get(get_help_dialog))
        .route(endpoints::FAQ, get(get_faq_list))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::PROFILE_API, put(update_profile_endpoint))
        .route(endpoints::PASSWORD_API, post(change_password_endpoint))
        .route(endpoints::SETTINGS_API, put(update_settings_endpoint));

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_not_found_page)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use time::OffsetDateTime;

    use crate::{AppState, endpoints, profile::UserProfile, transaction::Ledger};

    use super::build_router;

    fn test_server() -> (TestServer, AppState) {
        let state = AppState::new(
            Ledger::with_demo_data(OffsetDateTime::now_utc().date()),
            UserProfile::default(),
            "Etc/UTC",
            Duration::ZERO,
        )
        .expect("Could not create app state");
        let server =
            TestServer::new(build_router(state.clone()));

        (server, state)
    }

    #[tokio::test]
    async fn serves_every_view() {
        let (server, _) = test_server();

        for path in [
            "/",
            "/transactions/list?search=bill&type=expense&sort=amount&dir=asc",
            "/transactions/1/edit",
            "/transactions/1/delete",
            "/profile",
            "/profile?edit=true",
            "/settings",
            "/help?tab=contact",
            "/help/faq?search=password",
        ] {
            let response = server.get(path).await;

            assert_eq!(response.status_code(), StatusCode::OK, "GET {path}");
            assert!(
                response
                    .header("content-type")
                    .to_str()
                    .unwrap_or_default()
                    .starts_with("text/html"),
                "GET {path}"
            );
        }
    }

    #[tokio::test]
    async fn add_then_delete_transaction() {
        let (server, state) = test_server();
        let balance = state.ledger.lock().unwrap().balance();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("description", "Coffee"),
                ("amount", "4.50"),
                ("type", "expense"),
                ("category", ""),
                ("date", ""),
            ])
            .await;
        response.assert_status_see_other();

        let id = {
            let ledger = state.ledger.lock().unwrap();
            assert_eq!(ledger.balance(), balance - 4.5);
            ledger.transactions()[0].id
        };

        let response = server.delete(&format!("/api/transactions/{id}")).await;
        response.assert_status_see_other();
        assert_eq!(state.ledger.lock().unwrap().balance(), balance);
    }

    #[tokio::test]
    async fn unknown_routes_get_404_page() {
        let (server, _) = test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn missing_transaction_dialog_is_not_found() {
        let (server, _) = test_server();

        let response = server.get("/transactions/999/edit").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn error_page_is_served() {
        let (server, _) = test_server();

        let response = server.get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
