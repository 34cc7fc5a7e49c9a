use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// The optional categories a visitor picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentChoice {
    pub analytics: bool,
    pub marketing: bool,
}

impl ConsentChoice {
    /// Every optional category.
    pub const ALL: Self = Self { analytics: true, marketing: true };
}

/// Persisted consent record.
///
/// `necessary` is always `true`, whatever was stored or requested. Only a JSON
/// object is accepted as a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct CookiePreferences {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    /// RFC 3339 timestamp in UTC with millisecond precision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
}

/// Fields read back from storage. A stored `necessary` is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(default)]
    analytics: bool,
    #[serde(default)]
    marketing: bool,
    #[serde(default)]
    accepted_at: Option<String>,
}

impl TryFrom<Map<String, Value>> for CookiePreferences {
    type Error = serde_json::Error;

    fn try_from(record: Map<String, Value>) -> Result<Self, Self::Error> {
        let stored: StoredRecord = serde_json::from_value(Value::Object(record))?;
        Ok(Self {
            necessary: true,
            analytics: stored.analytics,
            marketing: stored.marketing,
            accepted_at: stored.accepted_at,
        })
    }
}

impl CookiePreferences {
    /// Record for `choice`, stamped with `accepted_at`.
    #[must_use]
    pub fn from_choice(choice: ConsentChoice, accepted_at: DateTime<Utc>) -> Self {
        Self {
            necessary: true,
            analytics: choice.analytics,
            marketing: choice.marketing,
            accepted_at: Some(accepted_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// The optional categories this record grants.
    #[must_use]
    pub const fn choice(&self) -> ConsentChoice {
        ConsentChoice { analytics: self.analytics, marketing: self.marketing }
    }
}

/// Optional categories that may be activated on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnabledCategories {
    pub analytics: bool,
    pub marketing: bool,
}

impl EnabledCategories {
    /// Decide what to activate and log each enabled category.
    #[must_use]
    pub fn from_preferences(preferences: Option<&CookiePreferences>) -> Self {
        let enabled = preferences.map_or_else(Self::default, |preferences| Self {
            analytics: preferences.analytics,
            marketing: preferences.marketing,
        });
        for name in enabled.names() {
            tracing::info!("{} enabled", name);
        }
        enabled
    }

    /// Names of the enabled categories, analytics first.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [(self.analytics, "analytics"), (self.marketing, "marketing")]
            .into_iter()
            .filter_map(|(enabled, name)| enabled.then_some(name))
            .collect()
    }

    /// True when no optional category is enabled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.analytics && !self.marketing
    }
}
