//! Login redirect demonstration.
//!
//! This example shows the route-setup flow:
//! 1. Build a registry from environment settings
//! 2. Register a custom condition next to `login`
//! 3. Guard routes once at startup
//! 4. Dispatch anonymous and logged-in requests
//!
//! Run with: `cargo run --example login_redirect`
//! Override the login settings with `ROUTE_GUARD_*` environment variables.

use route_guard::web::example_handler::{require_role, ExampleRoutes};
use route_guard::web::{RequestAdapter, Response};
use route_guard::{handler, GuardRegistry, Handler, PluginSettings};

fn show(routes: &ExampleRoutes, label: &str, req: &RequestAdapter) {
    let response = routes.dispatch(req);
    match response.location() {
        Some(location) => println!("{:<28} -> {} {}", label, response.status(), location),
        None => println!(
            "{:<28} -> {} {}",
            label,
            response.status(),
            response.body().unwrap_or_default()
        ),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut registry = GuardRegistry::<RequestAdapter>::new(PluginSettings::from_env());
    registry.register("role", require_role());
    println!("Registered conditions: {:?}", registry.conditions());

    let routes = ExampleRoutes::build(&registry)?;
    println!("Routes: {:?}\n", routes.paths());

    show(&routes, "GET /", &RequestAdapter::get("/"));
    show(
        &routes,
        "GET /private?user=dagolden",
        &RequestAdapter::get("/private?user=dagolden"),
    );

    let mut alice = RequestAdapter::get("/private");
    alice.set_session("user", "alice");
    show(&routes, "GET /private (alice)", &alice);

    let mut bob = RequestAdapter::get("/admin");
    bob.set_session("user", "bob");
    bob.set_session("role", "student");
    show(&routes, "GET /admin (bob, student)", &bob);

    let mut carol = RequestAdapter::get("/admin");
    carol.set_session("user", "carol");
    carol.set_session("role", "admin");
    show(&routes, "GET /admin (carol, admin)", &carol);

    match registry.needs("staff", placeholder()) {
        Ok(_) => println!("\nunexpected: 'staff' resolved"),
        Err(err) => println!("\nMisconfigured route caught at startup: {}", err),
    }

    Ok(())
}

fn placeholder() -> Handler<RequestAdapter> {
    handler(|_req: &RequestAdapter| Response::ok("unreachable"))
}
