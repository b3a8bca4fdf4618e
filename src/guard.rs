use std::sync::{Arc, OnceLock};

use crate::config::{LoginConfig, PluginSettings};
use crate::context::Handler;
use crate::logging;

/// Builds a guarded handler from condition arguments and the protected handler.
///
/// A factory runs once per route registration. The handler it returns runs
/// once per request and usually either delegates to the protected handler or
/// answers with a redirect.
///
/// # Examples
///
/// A factory that only lets requests through when the session's `role`
/// matches the first condition argument:
///
/// ```
/// use std::sync::Arc;
/// use route_guard::{handler, GuardContext, GuardFactory, Handler, QueryParams, RequestContext};
///
/// fn require_role<C>() -> GuardFactory<C>
/// where
///     C: RequestContext + 'static,
/// {
///     Arc::new(|_ctx: &GuardContext, args: &[String], protected: Handler<C>| {
///         let role = args.first().cloned().unwrap_or_default();
///         handler(move |req: &C| {
///             if req.session_value("role").as_deref() == Some(role.as_str()) {
///                 protected(req)
///             } else {
///                 req.redirect(req.uri_for("/forbidden", &QueryParams::new()))
///             }
///         })
///     })
/// }
/// ```
pub type GuardFactory<C> =
    Arc<dyn Fn(&GuardContext, &[String], Handler<C>) -> Handler<C> + Send + Sync>;

/// Shared state available to every guard factory of one registry.
///
/// Holds the host's plugin settings and a write-once cache of the resolved
/// login configuration. The cache is filled the first time the `login`
/// guard is installed and is shared by every route guarded by it.
#[derive(Debug, Default)]
pub struct GuardContext {
    settings: PluginSettings,
    login: OnceLock<Arc<LoginConfig>>,
}

impl GuardContext {
    /// Creates a context over the given settings.
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            settings,
            login: OnceLock::new(),
        }
    }

    /// Returns the host's plugin settings.
    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Returns the login configuration, resolving it on first use.
    pub fn login_config(&self) -> Arc<LoginConfig> {
        self.login
            .get_or_init(|| {
                let config = LoginConfig::resolve(&self.settings);
                logging::config_resolved(&config);
                Arc::new(config)
            })
            .clone()
    }

    /// Returns true once the login configuration has been resolved.
    pub fn is_login_resolved(&self) -> bool {
        self.login.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_config_is_resolved_lazily() {
        let ctx = GuardContext::new(PluginSettings::new().with_text("login_route", "/signin"));
        assert!(!ctx.is_login_resolved());

        let config = ctx.login_config();
        assert_eq!(config.login_route, "/signin");
        assert!(ctx.is_login_resolved());
    }

    #[test]
    fn login_config_is_shared_after_resolution() {
        let ctx = GuardContext::default();
        let first = ctx.login_config();
        let second = ctx.login_config();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
