//! The built-in `login` condition.
//!
//! Requests whose session carries a truthy value under `logged_in_key` reach
//! the protected handler untouched. Everything else is redirected to
//! `login_route` with a callback URL pointing back at the original request,
//! plus any configured passthrough parameters.

use std::sync::Arc;

use crate::config::LoginConfig;
use crate::context::{handler, is_truthy, Handler, RequestContext};
use crate::guard::{GuardContext, GuardFactory};
use crate::logging;
use crate::request::QueryParams;

/// Name under which the login guard is registered.
pub const LOGIN_CONDITION: &str = "login";

/// Returns the factory for the built-in `login` condition.
pub fn login_factory<C>() -> GuardFactory<C>
where
    C: RequestContext + 'static,
{
    Arc::new(login_guard::<C>)
}

/// Wraps `protected` so that only logged-in sessions reach it.
///
/// Condition arguments are not used by this guard.
pub fn login_guard<C>(ctx: &GuardContext, args: &[String], protected: Handler<C>) -> Handler<C>
where
    C: RequestContext + 'static,
{
    if !args.is_empty() {
        logging::ignored_arguments(LOGIN_CONDITION, args.len());
    }

    let config = ctx.login_config();

    handler(move |req: &C| {
        if is_truthy(req.session_value(&config.logged_in_key).as_deref()) {
            return protected(req);
        }

        let location = login_location(req, &config);
        logging::login_redirect(req.path(), &location);
        req.redirect(location)
    })
}

/// URL of the original request: its path plus the raw query string.
pub fn callback_url<C: RequestContext>(req: &C) -> String {
    let base = req.uri_for(req.path(), &QueryParams::new());
    let query = req.query_string();
    if query.is_empty() {
        base
    } else {
        format!("{}?{}", base, query)
    }
}

/// Query parameters sent to the login route for an unauthenticated request.
///
/// The callback URL is always present. Passthrough parameters are copied
/// only when present and non-empty, and never replace the callback.
pub fn login_params<C: RequestContext>(req: &C, config: &LoginConfig) -> QueryParams {
    let mut data = QueryParams::new();
    data.insert(config.callback_key.as_str(), callback_url(req));

    for name in &config.passthrough {
        if *name == config.callback_key {
            logging::passthrough_shadowed(name);
            continue;
        }
        match req.param(name) {
            Some(value) if !value.is_empty() => data.insert(name.as_str(), value),
            _ => {}
        }
    }

    data
}

/// Full redirect target for an unauthenticated request.
pub fn login_location<C: RequestContext>(req: &C, config: &LoginConfig) -> String {
    req.uri_for(&config.login_route, &login_params(req, config))
}
