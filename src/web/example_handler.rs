//! Example guards and routes built on the [`RequestAdapter`].
//!
//! **These examples are for documentation and testing only.** They show how
//! an application registers a custom condition next to the built-in `login`
//! guard and wires guarded handlers into a route table.

use std::sync::Arc;

use crate::context::{handler, Handler, RequestContext};
use crate::error::Error;
use crate::guard::{GuardContext, GuardFactory};
use crate::registry::GuardRegistry;
use crate::request::QueryParams;

use super::{RequestAdapter, Response};

/// Session key the `role` condition compares against.
pub const ROLE_SESSION_KEY: &str = "role";

/// Route requests failing the `role` condition are sent to.
pub const FORBIDDEN_ROUTE: &str = "/forbidden";

/// Factory for a `role` condition.
///
/// The guarded handler runs only when the session's `role` equals one of
/// the condition arguments. Other requests are redirected to
/// [`FORBIDDEN_ROUTE`]. With no arguments every request is refused.
///
/// # Examples
///
/// ```
/// use route_guard::{handler, GuardRegistry};
/// use route_guard::web::{example_handler::require_role, RequestAdapter, Response};
///
/// let mut registry = GuardRegistry::<RequestAdapter>::default();
/// registry.register("role", require_role());
///
/// let admin = registry
///     .needs_with("role", &["admin"], handler(|_req: &RequestAdapter| Response::ok("dashboard")))
///     .unwrap();
///
/// let mut req = RequestAdapter::get("/admin");
/// req.set_session("role", "admin");
/// assert_eq!(admin(&req), Response::ok("dashboard"));
///
/// req.set_session("role", "student");
/// assert_eq!(admin(&req).location(), Some("/forbidden"));
/// ```
pub fn require_role<C>() -> GuardFactory<C>
where
    C: RequestContext + 'static,
{
    Arc::new(|_ctx: &GuardContext, args: &[String], protected: Handler<C>| {
        let allowed = args.to_vec();
        handler(move |req: &C| {
            let role = req.session_value(ROLE_SESSION_KEY);
            match role {
                Some(role) if allowed.contains(&role) => protected(req),
                _ => req.redirect(req.uri_for(FORBIDDEN_ROUTE, &QueryParams::new())),
            }
        })
    })
}

/// A guarded route table: paths mapped to installed handlers.
pub struct ExampleRoutes {
    routes: Vec<(&'static str, Handler<RequestAdapter>)>,
}

impl ExampleRoutes {
    /// Builds the example application's routes.
    ///
    /// - `/` is public
    /// - `/private` needs `login`
    /// - `/admin` needs `login` and then `role admin`
    ///
    /// # Errors
    ///
    /// Returns `UnknownCondition` if `registry` lacks `login` or `role`.
    pub fn build(registry: &GuardRegistry<RequestAdapter>) -> Result<Self, Error> {
        let home = handler(|_req: &RequestAdapter| Response::ok("home"));
        let private = handler(|req: &RequestAdapter| {
            let user = req.session_value("user").unwrap_or_default();
            Response::ok(format!("private page for {}", user))
        });
        let admin = handler(|_req: &RequestAdapter| Response::ok("admin dashboard"));

        let admin = registry.needs_with("role", &["admin"], admin)?;

        Ok(Self {
            routes: vec![
                ("/", home),
                ("/private", registry.needs("login", private)?),
                ("/admin", registry.needs("login", admin)?),
            ],
        })
    }

    /// Dispatches `req` to the handler installed for its path.
    pub fn dispatch(&self, req: &RequestAdapter) -> Response {
        match self.routes.iter().find(|(path, _)| *path == req.path()) {
            Some((_, route)) => route(req),
            None => Response::Content {
                status: 404,
                body: "not found".to_string(),
            },
        }
    }

    /// Returns the paths in the table.
    pub fn paths(&self) -> Vec<&'static str> {
        self.routes.iter().map(|(path, _)| *path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> GuardRegistry<RequestAdapter> {
        let mut registry = GuardRegistry::default();
        registry.register("role", require_role());
        registry
    }

    #[test]
    fn routes_require_role_condition() {
        let registry = GuardRegistry::<RequestAdapter>::default();
        assert!(ExampleRoutes::build(&registry).is_err());
    }

    #[test]
    fn public_route_needs_nothing() {
        let routes = ExampleRoutes::build(&registry()).unwrap();
        assert_eq!(routes.dispatch(&RequestAdapter::get("/")), Response::ok("home"));
    }

    #[test]
    fn unknown_path_is_not_found() {
        let routes = ExampleRoutes::build(&registry()).unwrap();
        assert_eq!(routes.dispatch(&RequestAdapter::get("/nope")).status(), 404);
    }

    #[test]
    fn admin_checks_login_before_role() {
        let routes = ExampleRoutes::build(&registry()).unwrap();

        let anonymous = RequestAdapter::get("/admin");
        assert_eq!(
            routes.dispatch(&anonymous).location(),
            Some("/login?return_url=%2Fadmin")
        );

        let mut student = RequestAdapter::get("/admin");
        student.set_session("user", "bob");
        student.set_session("role", "student");
        assert_eq!(routes.dispatch(&student).location(), Some("/forbidden"));

        let mut admin = RequestAdapter::get("/admin");
        admin.set_session("user", "carol");
        admin.set_session("role", "admin");
        assert_eq!(routes.dispatch(&admin), Response::ok("admin dashboard"));
    }

    #[test]
    fn role_without_arguments_refuses_everyone() {
        let registry = registry();
        let guarded = registry
            .needs("role", handler(|_req: &RequestAdapter| Response::ok("x")))
            .unwrap();

        let mut req = RequestAdapter::get("/x");
        req.set_session("role", "admin");
        assert!(guarded(&req).is_redirect());
    }

    #[test]
    fn paths_lists_routes() {
        let routes = ExampleRoutes::build(&registry()).unwrap();
        assert_eq!(routes.paths(), vec!["/", "/private", "/admin"]);
    }
}
