//! Implements a struct that holds the state of the web server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{Error, profile::UserProfile, timezone::get_local_offset, transaction::Ledger};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions and account balance.
    pub ledger: Arc<Mutex<Ledger>>,

    /// The user's profile and settings.
    pub profile: Arc<Mutex<UserProfile>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// How long profile and password saves wait before responding.
    pub simulated_latency: Duration,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        ledger: Ledger,
        profile: UserProfile,
        local_timezone: &str,
        simulated_latency: Duration,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            profile: Arc::new(Mutex::new(profile)),
            local_timezone: local_timezone.to_owned(),
            simulated_latency,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{Error, profile::UserProfile, transaction::Ledger};

    use super::AppState;

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(
            Ledger::default(),
            UserProfile::default(),
            "Middle/Earth",
            Duration::ZERO,
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
