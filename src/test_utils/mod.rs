#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_error_message, assert_form_input_with_value, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, must_get_dialog, must_get_text, parse_html_document, parse_html_fragment,
};
pub(crate) use http::{assert_hx_redirect, assert_status_ok};
