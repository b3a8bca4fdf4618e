//! Named route guards for web applications.
//!
//! This crate wraps route handlers so that a named condition is checked
//! before the handler runs. When the condition fails the request is
//! redirected instead of being handled:
//! - **Registry**: an explicit, application-owned map from condition names
//!   to guard factories, seeded with the built-in `login` condition
//! - **Guard wrapping**: `needs` resolves a condition once, at route
//!   registration, and returns the handler to install
//! - **Login guard**: gates on a session value and redirects to a login
//!   route with a callback URL back to the original request
//!
//! The host framework is reached only through [`RequestContext`]. The
//! [`web`] module contains an in-memory implementation of it.
//!
//! # Core Types
//!
//! - [`GuardRegistry`]: condition registry and `needs` entry point
//! - [`GuardFactory`]: builds a guarded handler from arguments and a handler
//! - [`GuardContext`]: settings and cached login configuration
//! - [`LoginConfig`]: resolved configuration of the `login` guard
//! - [`PluginSettings`]: host-supplied settings
//!
//! # Examples
//!
//! ```
//! use route_guard::{handler, GuardRegistry, PluginSettings};
//! use route_guard::web::{RequestAdapter, Response};
//!
//! let settings = PluginSettings::new().with_text("logged_in_key", "account");
//! let registry = GuardRegistry::<RequestAdapter>::new(settings);
//!
//! let dashboard = registry
//!     .needs("login", handler(|_req: &RequestAdapter| Response::ok("dashboard")))
//!     .expect("login is always registered");
//!
//! // No session: redirected to the login route
//! let req = RequestAdapter::get("/dashboard");
//! assert_eq!(dashboard(&req).location(), Some("/login?return_url=%2Fdashboard"));
//!
//! // Logged in under the configured key: handled normally
//! let mut req = RequestAdapter::get("/dashboard");
//! req.set_session("account", "42");
//! assert_eq!(dashboard(&req), Response::ok("dashboard"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod guard;
mod logging;
mod login;
mod registry;
mod request;

pub mod web;

pub use config::{
    LoginConfig, PluginSettings, SettingValue, DEFAULT_CALLBACK_KEY, DEFAULT_LOGGED_IN_KEY,
    DEFAULT_LOGIN_ROUTE,
};
pub use context::{handler, is_truthy, Handler, RequestContext};
pub use error::{Error, ErrorKind};
pub use guard::{GuardContext, GuardFactory};
pub use login::{
    callback_url, login_factory, login_guard, login_location, login_params, LOGIN_CONDITION,
};
pub use registry::{ExtensionItem, GuardRegistry};
pub use request::QueryParams;
