//! Plugin settings and the resolved login guard configuration.
//!
//! Settings are a flat name/value mapping supplied by the host application.
//! The login guard overlays them onto hard-coded defaults the first time it
//! is installed and never reads them again.
//!
//! ## Recognized settings
//! - `login_route`: where unauthenticated requests are sent (default `/login`)
//! - `logged_in_key`: session key that marks a logged-in user (default `user`)
//! - `callback_key`: query parameter carrying the return URL (default `return_url`)
//! - `passthrough`: request parameters forwarded to the login route (default `[user]`)

use std::collections::BTreeMap;
use std::env;

use crate::logging;

/// Default route unauthenticated requests are redirected to.
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
/// Default session key checked by the login guard.
pub const DEFAULT_LOGGED_IN_KEY: &str = "user";
/// Default query parameter carrying the callback URL.
pub const DEFAULT_CALLBACK_KEY: &str = "return_url";

const ENV_PREFIX: &str = "ROUTE_GUARD_";
const KNOWN_KEYS: [&str; 4] = ["login_route", "logged_in_key", "callback_key", "passthrough"];

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// A scalar string
    Text(String),
    /// An ordered list of strings
    List(Vec<String>),
}

/// Flat mapping of plugin settings supplied by the host.
///
/// # Examples
///
/// ```
/// use route_guard::{LoginConfig, PluginSettings};
///
/// let settings = PluginSettings::new()
///     .with_text("logged_in_key", "account")
///     .with_list("passthrough", ["user", "email"]);
///
/// let config = LoginConfig::resolve(&settings);
/// assert_eq!(config.logged_in_key, "account");
/// assert_eq!(config.login_route, "/login");
/// assert_eq!(config.passthrough, vec!["user", "email"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSettings {
    values: BTreeMap<String, SettingValue>,
}

impl PluginSettings {
    /// Creates an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a scalar setting.
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(name.into(), SettingValue::Text(value.into()));
        self
    }

    /// Sets a list setting.
    pub fn with_list<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.insert(
            name.into(),
            SettingValue::List(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Inserts a raw setting value.
    pub fn insert(&mut self, name: impl Into<String>, value: SettingValue) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    /// Returns true if no settings are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Loads settings from `ROUTE_GUARD_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `ROUTE_GUARD_LOGIN_ROUTE`
    /// - `ROUTE_GUARD_LOGGED_IN_KEY`
    /// - `ROUTE_GUARD_CALLBACK_KEY`
    /// - `ROUTE_GUARD_PASSTHROUGH` (comma-separated)
    ///
    /// Unset variables are left out so the defaults apply.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// `lookup` receives the full variable name, e.g. `ROUTE_GUARD_LOGIN_ROUTE`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::new();
        for key in KNOWN_KEYS {
            let var = format!("{}{}", ENV_PREFIX, key.to_ascii_uppercase());
            if let Some(raw) = lookup(&var) {
                let value = if key == "passthrough" {
                    SettingValue::List(split_list(&raw))
                } else {
                    SettingValue::Text(raw)
                };
                settings.insert(key, value);
            }
        }
        settings
    }
}

/// Resolved configuration of the built-in `login` guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    /// Route unauthenticated requests are redirected to
    pub login_route: String,
    /// Session key whose truthy value marks the request as logged in
    pub logged_in_key: String,
    /// Query parameter that carries the callback URL
    pub callback_key: String,
    /// Request parameters forwarded to the login route, in order
    pub passthrough: Vec<String>,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            logged_in_key: DEFAULT_LOGGED_IN_KEY.to_string(),
            callback_key: DEFAULT_CALLBACK_KEY.to_string(),
            passthrough: vec![DEFAULT_LOGGED_IN_KEY.to_string()],
        }
    }
}

impl LoginConfig {
    /// Overlays `settings` onto the defaults.
    ///
    /// A text `passthrough` is split on commas. A list given for a scalar
    /// key is ignored and the default kept.
    pub fn resolve(settings: &PluginSettings) -> Self {
        let mut config = Self::default();

        overlay_text(settings, "login_route", &mut config.login_route);
        overlay_text(settings, "logged_in_key", &mut config.logged_in_key);
        overlay_text(settings, "callback_key", &mut config.callback_key);

        match settings.get("passthrough") {
            Some(SettingValue::List(names)) => config.passthrough = names.clone(),
            Some(SettingValue::Text(raw)) => config.passthrough = split_list(raw),
            None => {}
        }

        config
    }
}

fn overlay_text(settings: &PluginSettings, key: &str, target: &mut String) {
    match settings.get(key) {
        Some(SettingValue::Text(value)) => *target = value.clone(),
        Some(SettingValue::List(_)) => logging::ignored_setting(key, "expected a single value"),
        None => {}
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
