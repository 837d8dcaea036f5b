use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse a full page, e.g. the dashboard.
pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

/// Parse a partial response such as a dialog or the transaction list.
pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "want markup without parse errors, got {:?}",
        html.errors
    );
}

/// The dialog panel in a rendered dialog fragment.
#[track_caller]
pub(crate) fn must_get_dialog(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("[role=dialog]").unwrap())
        .next()
        .expect("No dialog found")
}

/// The text of the element matching `selector`, with surrounding whitespace removed.
#[track_caller]
pub(crate) fn must_get_text(html: &Html, selector: &str) -> String {
    let selector = Selector::parse(selector).unwrap();
    html.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No element matching {selector:?}"))
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
