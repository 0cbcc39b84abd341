//! Registry of preference keys persisted through the storage accessor.
//!
//! Each key names one logical setting and owns its storage namespace;
//! callers must not invent ad-hoc keys outside this module.

/// Color theme selection ("light", "dark", "system").
pub const THEME_PREFERENCE: &str = "theme_preference";

/// Whether the first-run onboarding flow has completed.
pub const ONBOARDING_COMPLETE: &str = "onboarding_complete";

/// Whether reminder notifications are enabled.
pub const NOTIFICATIONS_ENABLED: &str = "notifications_enabled";

/// ISO 4217 currency code used for display.
pub const CURRENCY_CODE: &str = "currency_code";

/// RFC 3339 timestamp of the most recent transaction export.
pub const LAST_EXPORT_AT: &str = "last_export_at";

/// Every registered key, for enumeration in `prefs list` and doctor checks.
pub const ALL_KEYS: [&str; 5] = [
    THEME_PREFERENCE,
    ONBOARDING_COMPLETE,
    NOTIFICATIONS_ENABLED,
    CURRENCY_CODE,
    LAST_EXPORT_AT,
];
