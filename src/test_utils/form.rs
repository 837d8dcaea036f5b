use scraper::{ElementRef, Html, Selector};

/// The first form in `html`.
#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Check that `form` sends its request to `endpoint` via the htmx `attribute`, e.g. `hx-put`.
#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form.value().attr(attribute);

    assert_eq!(
        got,
        Some(endpoint),
        "want form with {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Check that the required input called `name` has the given type and current value.
#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input named {name:?}"))
        .value();

    assert_eq!(input.attr("type"), Some(type_), "type of input {name:?}");
    assert_eq!(input.attr("value"), Some(value), "value of input {name:?}");
    assert!(
        input.attr("required").is_some(),
        "want input {name:?} to be required"
    );
}

/// Check that one of the paragraphs in `form` is the field error `want`.
#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want: &str) {
    let messages: Vec<String> = form
        .select(&Selector::parse("p").unwrap())
        .map(|p| p.text().collect::<String>().trim().to_owned())
        .collect();

    assert!(
        messages.iter().any(|message| message == want),
        "want error message {want:?}, got {messages:?}"
    );
}
