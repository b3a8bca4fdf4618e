//! Structured log events emitted by the guard machinery.
//!
//! All events use the `route_guard` target so hosts can filter them
//! independently of their own request logging.

use crate::config::LoginConfig;

pub(crate) fn condition_registered(name: &str, replaced: bool) {
    tracing::debug!(target: "route_guard", condition = %name, replaced, "condition registered");
}

pub(crate) fn guard_installed(name: &str, arg_count: usize) {
    tracing::debug!(target: "route_guard", condition = %name, args = arg_count, "guard installed");
}

pub(crate) fn unknown_condition(name: &str) {
    tracing::warn!(target: "route_guard", condition = %name, "unknown condition requested");
}

pub(crate) fn malformed_extension(len: usize) {
    tracing::warn!(target: "route_guard", items = len, "rejected malformed extension");
}

pub(crate) fn config_resolved(config: &LoginConfig) {
    tracing::debug!(
        target: "route_guard",
        login_route = %config.login_route,
        logged_in_key = %config.logged_in_key,
        callback_key = %config.callback_key,
        passthrough = ?config.passthrough,
        "login configuration resolved"
    );
}

pub(crate) fn ignored_setting(key: &str, reason: &str) {
    tracing::warn!(target: "route_guard", setting = %key, reason, "ignoring setting");
}

pub(crate) fn ignored_arguments(name: &str, count: usize) {
    tracing::warn!(
        target: "route_guard",
        condition = %name,
        args = count,
        "condition takes no arguments; ignoring"
    );
}

pub(crate) fn passthrough_shadowed(name: &str) {
    tracing::debug!(
        target: "route_guard",
        param = %name,
        "passthrough parameter shares the callback key; callback kept"
    );
}

pub(crate) fn login_redirect(path: &str, location: &str) {
    tracing::info!(target: "route_guard", path = %path, location = %location, "redirecting to login");
}
