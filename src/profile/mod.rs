//! The user's profile and settings, and the dialogs for viewing and changing them.

mod core;
mod details;
mod password;
mod settings;

pub use core::{
    Currency, Language, MIN_PASSWORD_LENGTH, PasswordErrors, ProfileDetails, ProfileErrors,
    Settings, UserProfile, validate_password_change,
};
pub use details::{
    NAV_USER_NAME_ID, ProfileForm, ProfileQuery, ProfileState, get_profile_dialog,
    update_profile_endpoint,
};
pub use password::{PasswordForm, change_password_endpoint};
pub use settings::{SettingsForm, SettingsState, get_settings_dialog, update_settings_endpoint};
