//! # State
//!
//! State is used to correlate an OIDC authorization request with its
//! callback: the two requests are independent, so the selected demo variant
//! is persisted against the minted `state` token between them.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// State persists request information between the redirect and callback
/// steps of a flow.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct State<T> {
    /// Body holds data relevant to the current state.
    pub body: T,

    /// Time state should expire.
    pub expires_at: DateTime<Utc>,
}

impl<T> State<T> {
    /// Determines whether state has expired or not.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.signed_duration_since(Utc::now()).num_seconds() < 0
    }
}

/// State item expiry.
#[derive(Clone, Debug)]
pub enum Expire {
    /// Verification session expiration, matching the flow-type cookie's
    /// one-day lifetime.
    Session,
}

impl Expire {
    /// Returns the duration for which the state item is valid.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        match self {
            Self::Session => TimeDelta::try_hours(24).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expiry() {
        let state = State { body: (), expires_at: Utc::now() + Expire::Session.duration() };
        assert!(!state.is_expired());

        let state = State { body: (), expires_at: Utc::now() - TimeDelta::try_minutes(1).unwrap() };
        assert!(state.is_expired());
    }
}
