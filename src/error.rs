//! Defines the app level error type and conversions to rendered HTML pages and alert dialogs.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crate::{
    dialog::AlertDialog,
    error_page::{InternalServerErrorPage, NotFoundPage},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A lock on the shared app state was poisoned by a panicking request.
    #[error("could not acquire the state lock")]
    StateLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the ledger")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the ledger")]
    DeleteMissingTransaction,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundPage.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerErrorPage {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StateLockError => InternalServerErrorPage::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an error alert dialog.
    pub fn into_alert_response(self) -> Response {
        let (status_code, title, message) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings",
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "The requested item could not be found. Try refreshing the page.".to_owned(),
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not update transaction",
                "The transaction could not be found.".to_owned(),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not delete transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted."
                    .to_owned(),
            ),
            Error::StateLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        (
            status_code,
            AlertDialog::error(title, &message).into_html(),
        )
            .into_response()
    }
}
