//! The endpoint URIs.
//!
//! Pages and dialogs are fetched from the view routes, form submissions go to
//! the `/api` routes. For endpoints that take a parameter, e.g.,
//! '/transactions/{transaction_id}/edit', use [format_endpoint].

/// The dashboard: balance, new transaction form and transaction list.
pub const ROOT: &str = "/";
/// The transaction list fragment, refreshed by the search and filter controls.
pub const TRANSACTION_LIST: &str = "/transactions/list";
/// The dialog for editing a transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The dialog asking to confirm deleting a transaction.
pub const DELETE_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/delete";
/// The profile dialog.
pub const PROFILE_VIEW: &str = "/profile";
/// The settings dialog.
pub const SETTINGS_VIEW: &str = "/settings";
/// The help dialog.
pub const HELP_VIEW: &str = "/help";
/// The list of frequently asked questions, filtered by a search query.
pub const FAQ: &str = "/help/faq";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to update the profile.
pub const PROFILE_API: &str = "/api/profile";
/// The route to change the password.
pub const PASSWORD_API: &str = "/api/profile/password";
/// The route to update the settings.
pub const SETTINGS_API: &str = "/api/settings";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is the text between a left brace and the next right brace,
/// e.g. '{transaction_id}' in '/transactions/{transaction_id}/edit'. Only
/// the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: u64) -> String {
    let Some((head, rest)) = endpoint_path.split_once('{') else {
        return endpoint_path.to_owned();
    };

    let tail = rest.split_once('}').map_or("", |(_, tail)| tail);

    format!("{head}{id}{tail}")
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::TRANSACTION_LIST,
            endpoints::EDIT_TRANSACTION_VIEW,
            endpoints::DELETE_TRANSACTION_VIEW,
            endpoints::PROFILE_VIEW,
            endpoints::SETTINGS_VIEW,
            endpoints::HELP_VIEW,
            endpoints::FAQ,
            endpoints::INTERNAL_ERROR_VIEW,
            endpoints::STATIC,
            endpoints::TRANSACTIONS_API,
            endpoints::TRANSACTION,
            endpoints::PROFILE_API,
            endpoints::PASSWORD_API,
            endpoints::SETTINGS_API,
        ] {
            assert!(
                endpoint.parse::<Uri>().is_ok(),
                "{endpoint} is not a valid URI"
            );
        }
    }

    #[test]
    fn replaces_parameter() {
        assert_eq!(format_endpoint(endpoints::TRANSACTION, 7), "/api/transactions/7");
        assert_eq!(
            format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, 42),
            "/transactions/42/edit"
        );
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(format_endpoint("/hello/world", 1), "/hello/world");
    }

    #[test]
    fn unclosed_parameter_runs_to_end() {
        assert_eq!(format_endpoint("/hello/{world", 1), "/hello/1");
    }
}
