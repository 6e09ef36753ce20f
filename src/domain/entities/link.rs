//! Temporary link entity and expiration modes.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy deciding how a temporary link stops working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpirationMode {
    /// Consumed by the first successful visit.
    #[serde(rename = "1-click", alias = "single-click")]
    SingleClick,
    /// Valid for one hour after creation.
    #[serde(rename = "1-hour", alias = "one-hour")]
    OneHour,
    /// Valid for 24 hours after creation.
    #[serde(rename = "24-hours", alias = "one-day")]
    OneDay,
}

impl ExpirationMode {
    #[cfg(test)]
    pub const ALL: [ExpirationMode; 3] = [Self::SingleClick, Self::OneHour, Self::OneDay];

    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleClick => "1-click",
            Self::OneHour => "1-hour",
            Self::OneDay => "24-hours",
        }
    }

    /// Expiry limits for a link created at `created_at`.
    ///
    /// Exactly one of the two limits is set.
    pub fn limits(self, created_at: DateTime<Utc>) -> ExpirationLimits {
        match self {
            Self::SingleClick => ExpirationLimits {
                expires_at: None,
                max_clicks: Some(1),
            },
            Self::OneHour => ExpirationLimits {
                expires_at: Some(created_at + TimeDelta::hours(1)),
                max_clicks: None,
            },
            Self::OneDay => ExpirationLimits {
                expires_at: Some(created_at + TimeDelta::hours(24)),
                max_clicks: None,
            },
        }
    }
}

impl fmt::Display for ExpirationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known expiration mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown expiration mode '{0}'")]
pub struct UnknownExpirationMode(pub String);

impl FromStr for ExpirationMode {
    type Err = UnknownExpirationMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1-click" | "single-click" => Ok(Self::SingleClick),
            "1-hour" | "one-hour" => Ok(Self::OneHour),
            "24-hours" | "one-day" => Ok(Self::OneDay),
            other => Err(UnknownExpirationMode(other.to_string())),
        }
    }
}

/// Time or click threshold derived from an [`ExpirationMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationLimits {
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<u64>,
}

/// A short-lived redirect link.
///
/// `destination_url`, `expiration_mode`, `expires_at` and `max_clicks` are fixed
/// at creation. `click_count` only grows and `is_expired` never goes back to
/// `false`; both change exclusively through [`TemporaryLink::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryLink {
    pub id: i64,
    pub short_id: String,
    pub destination_url: String,
    pub expiration_mode: ExpirationMode,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<u64>,
    pub click_count: u64,
    pub is_expired: bool,
}

impl TemporaryLink {
    /// Builds a fresh, unvisited link.
    pub fn new(id: i64, short_id: String, new_link: NewLink) -> Self {
        let limits = new_link.expiration_mode.limits(new_link.created_at);

        Self {
            id,
            short_id,
            destination_url: new_link.destination_url,
            expiration_mode: new_link.expiration_mode,
            created_at: new_link.created_at,
            expires_at: limits.expires_at,
            max_clicks: limits.max_clicks,
            click_count: 0,
            is_expired: false,
        }
    }

    /// Merges a patch into the record.
    ///
    /// The expired flag is a latch and the click counter never moves backwards,
    /// whatever the patch says.
    pub fn apply(&mut self, patch: &LinkPatch) {
        if let Some(click_count) = patch.click_count {
            self.click_count = self.click_count.max(click_count);
        }
        if let Some(is_expired) = patch.is_expired {
            self.is_expired |= is_expired;
        }
    }
}

/// Input data for creating a new link.
///
/// The destination must already be validated.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub destination_url: String,
    pub expiration_mode: ExpirationMode,
    pub created_at: DateTime<Utc>,
}

/// Partial update for the mutable fields of a link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub click_count: Option<u64>,
    pub is_expired: Option<bool>,
}

impl LinkPatch {
    /// Patch that flips the link to expired.
    pub fn expire() -> Self {
        Self {
            click_count: None,
            is_expired: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(mode: ExpirationMode, created_at: DateTime<Utc>) -> NewLink {
        NewLink {
            destination_url: "https://example.com".to_string(),
            expiration_mode: mode,
            created_at,
        }
    }

    #[test]
    fn test_single_click_limits() {
        let now = Utc::now();
        let link = TemporaryLink::new(1, "abc".to_string(), new_link(ExpirationMode::SingleClick, now));

        assert_eq!(link.max_clicks, Some(1));
        assert!(link.expires_at.is_none());
        assert_eq!(link.click_count, 0);
        assert!(!link.is_expired);
    }

    #[test]
    fn test_time_based_limits() {
        let now = Utc::now();

        let hour = TemporaryLink::new(1, "a".to_string(), new_link(ExpirationMode::OneHour, now));
        assert_eq!(hour.expires_at, Some(now + TimeDelta::seconds(3600)));
        assert!(hour.max_clicks.is_none());

        let day = TemporaryLink::new(2, "b".to_string(), new_link(ExpirationMode::OneDay, now));
        assert_eq!(day.expires_at, Some(now + TimeDelta::seconds(86_400)));
        assert!(day.max_clicks.is_none());
    }

    #[test]
    fn test_exactly_one_limit_for_every_mode() {
        let now = Utc::now();
        for mode in ExpirationMode::ALL {
            let limits = mode.limits(now);
            assert!(
                limits.expires_at.is_some() != limits.max_clicks.is_some(),
                "mode {mode} must set exactly one limit"
            );
        }
    }

    #[test]
    fn test_apply_never_clears_expired() {
        let mut link = TemporaryLink::new(
            1,
            "abc".to_string(),
            new_link(ExpirationMode::OneHour, Utc::now()),
        );

        link.apply(&LinkPatch::expire());
        assert!(link.is_expired);

        link.apply(&LinkPatch {
            click_count: None,
            is_expired: Some(false),
        });
        assert!(link.is_expired);
    }

    #[test]
    fn test_apply_never_decreases_clicks() {
        let mut link = TemporaryLink::new(
            1,
            "abc".to_string(),
            new_link(ExpirationMode::OneDay, Utc::now()),
        );

        link.apply(&LinkPatch {
            click_count: Some(3),
            is_expired: None,
        });
        link.apply(&LinkPatch {
            click_count: Some(1),
            is_expired: None,
        });

        assert_eq!(link.click_count, 3);
    }

    #[test]
    fn test_mode_parsing_accepts_aliases() {
        assert_eq!("1-click".parse(), Ok(ExpirationMode::SingleClick));
        assert_eq!("single-click".parse(), Ok(ExpirationMode::SingleClick));
        assert_eq!("one-hour".parse(), Ok(ExpirationMode::OneHour));
        assert_eq!("24-hours".parse(), Ok(ExpirationMode::OneDay));
        assert_eq!("one-day".parse(), Ok(ExpirationMode::OneDay));
        assert!("2-hours".parse::<ExpirationMode>().is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&ExpirationMode::OneDay).unwrap(),
            "\"24-hours\""
        );
        let mode: ExpirationMode = serde_json::from_str("\"single-click\"").unwrap();
        assert_eq!(mode, ExpirationMode::SingleClick);
    }
}
