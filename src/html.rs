use maud::{DOCTYPE, Markup, PreEscaped, html};

use numfmt::{Formatter, Precision};

use crate::{
    dialog::{DIALOG_ROOT_SELECTOR, dialog_root},
    profile::Currency,
};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded-lg font-medium";

pub const BUTTON_SECONDARY_STYLE: &str = "px-4 py-2 text-sm font-medium \
    text-gray-700 bg-white rounded-lg border border-gray-300 \
    hover:bg-gray-50 dark:bg-gray-700 dark:text-gray-200 \
    dark:border-gray-600 dark:hover:bg-gray-600 transition-colors";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

pub const LINK_BUTTON_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded-lg text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_RADIO_GROUP_STYLE: &str = "grid grid-cols-2 gap-2";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer sr-only";
pub const FORM_RADIO_LABEL_STYLE: &str = "block w-full rounded-lg border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 text-center text-sm \
    font-medium text-gray-700 dark:text-white cursor-pointer transition \
    hover:border-gray-400 hover:bg-gray-50 hover:dark:bg-gray-600 \
    peer-checked:border-blue-600 peer-checked:bg-blue-50 peer-checked:text-blue-700 \
    peer-checked:dark:border-blue-500 peer-checked:dark:bg-blue-600/20 \
    peer-checked:dark:text-blue-200";
pub const FORM_ERROR_STYLE: &str = "mt-1 text-sm text-red-600 dark:text-red-400";

// Card style
pub const CARD_STYLE: &str = "w-full rounded-2xl bg-white dark:bg-gray-800 \
    shadow-sm border border-gray-200 dark:border-gray-700";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col gap-6 px-4 py-8 mx-auto max-w-screen-xl lg:py-5 text-gray-900 dark:text-white";

/// The full HTML document shared by all pages.
///
/// Every page gets the dialog root so dialogs can be opened from anywhere.
pub fn base(title: &str, dark_mode: bool, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=[dark_mode.then_some("dark")]
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Pennywise" }

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                style type="text/tailwindcss"
                {
                    (PreEscaped("@custom-variant dark (&:where(.dark, .dark *));"))
                }

                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/response-targets.js" {}

                style
                {
                    r#"
                    .dialog-indicator {
                        display: none;
                    }

                    .dialog-indicator.htmx-request {
                        display: block;
                    }
                    "#
                }

                script src="/static/dialog.js" defer {}
            }

            body
                hx-ext="response-targets"
                hx-target-error=(DIALOG_ROOT_SELECTOR)
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                (dialog_root())
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, false, &content)
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// A field error message, rendered only when there is one.
pub fn field_error(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}

/// Format `number` as an amount of `currency` with two decimal places,
/// e.g. "₹1,234.50" or "-$12.30".
pub fn format_currency(number: f64, currency: Currency) -> String {
    let symbol = currency.symbol();

    if number == 0.0 {
        // numfmt renders zero as "0"
        return format!("{symbol}0.00");
    }

    let prefix = if number < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    let formatted = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter
            .precision(Precision::Decimals(2))
            .fmt_string(number.abs()),
        Err(error) => {
            tracing::error!("Could not create currency formatter for {prefix:?}: {error:?}");
            format!("{prefix}{:.2}", number.abs())
        }
    };

    pad_decimals(formatted)
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3" and
/// "12.00" as "12", so put them back.
fn pad_decimals(mut formatted: String) -> String {
    match formatted.rfind('.') {
        None => formatted.push_str(".00"),
        Some(dot) => {
            for _ in formatted.len() - dot - 1..2 {
                formatted.push('0');
            }
        }
    }

    formatted
}
