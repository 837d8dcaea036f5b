//! Full page responses for missing pages and server errors.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The 404 page, shown for unknown routes and missing transactions.
pub struct NotFoundPage;

impl IntoResponse for NotFoundPage {
    fn into_response(self) -> Response {
        let page = error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "Sorry, we can't find that page. Head back to your transactions.",
        );

        (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
    }
}

/// The 500 page with a description of what went wrong and how to fix it.
pub struct InternalServerErrorPage<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for InternalServerErrorPage<'_> {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

/// The fallback route handler.
pub async fn get_not_found_page() -> Response {
    NotFoundPage.into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerErrorPage::default().into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::{get_internal_server_error_page, get_not_found_page};

    #[tokio::test]
    async fn not_found_page_links_home() {
        let response = get_not_found_page().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let link = html
            .select(&Selector::parse("a[href='/']").unwrap())
            .next()
            .expect("no link to the home page");
        assert_eq!(link.text().collect::<String>().trim(), "Back to Homepage");
    }

    #[tokio::test]
    async fn error_page_has_500_status() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let header = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("no header");
        assert_eq!(header.text().collect::<String>().trim(), "500");
    }
}
