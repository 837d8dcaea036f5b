//! The form for creating and editing transactions.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::html::{
    FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
    FORM_TEXT_INPUT_STYLE, field_error,
};

use super::core::{MAX_AMOUNT, NewTransaction, Transaction, TransactionType, UNCATEGORIZED};

/// The form data for a transaction, as submitted.
///
/// Every field is kept as entered so the form can be re-rendered when it
/// fails validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub description: String,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub category: Option<String>,
    /// Defaults to today when missing.
    pub date: Option<Date>,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: None,
            type_: TransactionType::Expense,
            category: None,
            date: None,
        }
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: Some(transaction.amount),
            type_: transaction.type_,
            category: transaction.category.clone(),
            date: Some(transaction.date),
        }
    }
}

/// The messages for the fields that failed validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFormErrors {
    pub description: Option<&'static str>,
    pub amount: Option<&'static str>,
    pub date: Option<&'static str>,
}

impl TransactionFormErrors {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.date.is_none()
    }
}

impl TransactionForm {
    /// Check the form against the transaction rules, where `today` is the
    /// latest allowed date.
    ///
    /// The description and category are trimmed and a blank category is
    /// treated as missing.
    ///
    /// # Errors
    /// Returns the message for each invalid field.
    pub fn validate(&self, today: Date) -> Result<NewTransaction, TransactionFormErrors> {
        let mut errors = TransactionFormErrors::default();

        let description = self.description.trim();
        if description.is_empty() {
            errors.description = Some("Description is required");
        }

        let amount = self.amount.unwrap_or_default();
        if amount.is_nan() || amount <= 0.0 {
            errors.amount = Some("Amount must be greater than 0");
        } else if amount > MAX_AMOUNT {
            errors.amount = Some("Amount cannot exceed 1,000,000");
        }

        let date = self.date.unwrap_or(today);
        if date > today {
            errors.date = Some("Date cannot be in the future");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_owned);

        Ok(NewTransaction {
            description: description.to_owned(),
            amount,
            type_: self.type_,
            category,
            date,
        })
    }
}

/// The inputs shared by the new transaction form and the edit dialog.
///
/// `id_prefix` keeps element IDs unique when both forms are on the page.
pub fn transaction_form_fields(
    id_prefix: &str,
    form: &TransactionForm,
    errors: &TransactionFormErrors,
    max_date: Date,
) -> Markup {
    let id = |name: &str| format!("{id_prefix}-{name}");
    let categories_id = id("categories");
    let date = form.date.unwrap_or(max_date);

    html! {
        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for type_ in [TransactionType::Expense, TransactionType::Income] {
                    div
                    {
                        input
                            type="radio"
                            name="type"
                            id=(id(type_.as_form_value()))
                            value=(type_.as_form_value())
                            checked[form.type_ == type_]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id(type_.as_form_value())) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (type_.label())
                        }
                    }
                }
            }
        }

        div
        {
            label for=(id("description")) class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id=(id("description"))
                type="text"
                placeholder="Enter description"
                value=(form.description)
                required
                aria-invalid=[errors.description.map(|_| "true")]
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors.description))
        }

        div
        {
            label for=(id("amount")) class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id=(id("amount"))
                type="number"
                step="0.01"
                min="0.01"
                max=(MAX_AMOUNT)
                placeholder="0.00"
                value=[form.amount]
                required
                aria-invalid=[errors.amount.map(|_| "true")]
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors.amount))
        }

        div
        {
            label for=(id("category")) class=(FORM_LABEL_STYLE) { "Category" }

            input
                name="category"
                id=(id("category"))
                type="text"
                list=(categories_id)
                placeholder=(UNCATEGORIZED)
                value=[form.category.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);

            datalist id=(categories_id)
            {
                @for category in form.type_.default_categories() {
                    option value=(category) {}
                }
            }
        }

        div
        {
            label for=(id("date")) class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id=(id("date"))
                type="date"
                max=(max_date)
                value=(date)
                required
                aria-invalid=[errors.date.map(|_| "true")]
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors.date))
        }
    }
}


#[cfg(test)]
mod view_tests {
    use maud::html;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{test_utils::assert_valid_html, transaction::TransactionType};

    use super::{TransactionForm, TransactionFormErrors, transaction_form_fields};

    fn render(form: &TransactionForm, errors: &TransactionFormErrors) -> Html {
        let markup = html! {
            form { (transaction_form_fields("new", form, errors, date!(2025 - 06 - 20))) }
        };

        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn checks_selected_type() {
        let form = TransactionForm {
            type_: TransactionType::Income,
            ..Default::default()
        };

        let html = render(&form, &TransactionFormErrors::default());

        assert_valid_html(&html);
        let checked = html
            .select(&Selector::parse("input[type=radio][checked]").unwrap())
            .map(|input| input.value().attr("value").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(checked, ["income"]);
    }

    #[test]
    fn suggests_categories_for_type() {
        let html = render(&TransactionForm::default(), &TransactionFormErrors::default());

        let options = html
            .select(&Selector::parse("datalist#new-categories option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(options, TransactionType::Expense.default_categories());
    }

    #[test]
    fn date_defaults_to_max_date() {
        let html = render(&TransactionForm::default(), &TransactionFormErrors::default());

        let date_input = html
            .select(&Selector::parse("input[name=date]").unwrap())
            .next()
            .expect("No date input");
        assert_eq!(date_input.value().attr("value"), Some("2025-06-20"));
        assert_eq!(date_input.value().attr("max"), Some("2025-06-20"));
    }

    #[test]
    fn shows_field_errors() {
        let errors = TransactionFormErrors {
            amount: Some("Amount must be greater than 0"),
            ..Default::default()
        };

        let html = render(&TransactionForm::default(), &errors);

        let messages = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(messages, ["Amount must be greater than 0"]);
        let amount = html
            .select(&Selector::parse("input[name=amount]").unwrap())
            .next()
            .expect("No amount input");
        assert_eq!(amount.value().attr("aria-invalid"), Some("true"));
    }
}
