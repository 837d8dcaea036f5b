//! The user's profile, app settings and their validation.

use std::str::FromStr;

use email_address::EmailAddress;
use serde::Deserialize;
use time::{Date, macros::date};

/// The interface languages a user can pick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Language {
    /// `en`
    #[default]
    #[serde(rename = "en")]
    English,
    /// `es`
    #[serde(rename = "es")]
    Spanish,
    /// `fr`
    #[serde(rename = "fr")]
    French,
    /// `de`
    #[serde(rename = "de")]
    German,
    /// `zh`
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Every language, in the order of the settings select.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
    ];

    /// The ISO 639-1 code, also used as the form value.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh",
        }
    }

    /// The name shown in the settings select.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
        }
    }
}

/// The currency amounts are displayed in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// British pound.
    Gbp,
    /// Japanese yen.
    Jpy,
    /// Canadian dollar.
    Cad,
    /// Australian dollar.
    Aud,
    /// Indian rupee.
    #[default]
    Inr,
}

impl Currency {
    /// Every currency, in the order of the settings select.
    pub const ALL: [Currency; 7] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Inr,
    ];

    /// The ISO 4217 code, also used as the form value.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Inr => "INR",
        }
    }

    /// Written before formatted amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
            Currency::Inr => "₹",
        }
    }
}

/// App-wide preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Render every page with the dark colour scheme.
    pub dark_mode: bool,
    /// Master switch for notifications.
    pub notifications: bool,
    /// Send notifications by email.
    pub email_notifications: bool,
    /// Send notifications to the browser.
    pub push_notifications: bool,
    /// Save changes without asking.
    pub auto_save: bool,
    /// Require a second factor when signing in.
    pub two_factor_auth: bool,
    /// The interface language.
    pub language: Language,
    /// The currency used to display amounts.
    pub currency: Currency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            email_notifications: true,
            push_notifications: false,
            auto_save: true,
            two_factor_auth: false,
            language: Language::default(),
            currency: Currency::default(),
        }
    }
}

/// The contact details a user can edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    /// Full name, shown in the navigation bar.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address, optional.
    pub address: String,
    /// Optional.
    pub date_of_birth: Option<Date>,
}

/// The single user of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The editable part of the profile.
    pub details: ProfileDetails,
    /// Shown in the profile dialog, never edited.
    pub join_date: Date,
    /// App preferences.
    pub settings: Settings,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            details: ProfileDetails {
                name: "John Doe".to_owned(),
                email: "john.doe@example.com".to_owned(),
                phone: "+1 (555) 123-4567".to_owned(),
                address: "123 Main Street, New York, NY 10001".to_owned(),
                date_of_birth: Some(date!(1990 - 01 - 15)),
            },
            join_date: date!(2023 - 01 - 15),
            settings: Settings::default(),
        }
    }
}

/// The minimum number of characters in a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field level messages for an invalid profile.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
}

impl ProfileErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl ProfileDetails {
    /// Trim the text fields and check the required ones.
    ///
    /// # Errors
    /// Returns a message for each field that is missing or malformed.
    pub fn validate(self) -> Result<Self, ProfileErrors> {
        let details = Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            date_of_birth: self.date_of_birth,
        };

        let errors = ProfileErrors {
            name: details.name.is_empty().then_some("Name is required"),
            email: if details.email.is_empty() {
                Some("Email is required")
            } else if !is_valid_email(&details.email) {
                Some("Please enter a valid email")
            } else {
                None
            },
            phone: if details.phone.is_empty() {
                Some("Phone number is required")
            } else if !is_valid_phone(&details.phone) {
                Some("Please enter a valid phone number")
            } else {
                None
            },
        };

        if errors.is_empty() {
            Ok(details)
        } else {
            Err(errors)
        }
    }
}

/// Whether `email` is a valid address whose domain has at least two labels.
fn is_valid_email(email: &str) -> bool {
    EmailAddress::from_str(email).is_ok_and(|address| address.domain().contains('.'))
}

/// Digits, spaces, dashes and parentheses with an optional leading '+'.
fn is_valid_phone(phone: &str) -> bool {
    let number = phone.strip_prefix('+').unwrap_or(phone);

    !number.is_empty()
        && number
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'))
}

/// Field level messages for an invalid password change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PasswordErrors {
    pub current_password: Option<&'static str>,
    pub new_password: Option<&'static str>,
}

impl PasswordErrors {
    pub fn is_empty(&self) -> bool {
        self.current_password.is_none() && self.new_password.is_none()
    }
}

/// Check a request to change the password.
///
/// # Errors
/// Returns a message for the current password if it is missing, and for the
/// new password if it does not match its confirmation or is too short.
pub fn validate_password_change(
    current_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), PasswordErrors> {
    let errors = PasswordErrors {
        current_password: current_password
            .is_empty()
            .then_some("Current password is required"),
        new_password: if new_password != confirm_password {
            Some("New passwords do not match")
        } else if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            Some("Password must be at least 6 characters long")
        } else {
            None
        },
    };

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
