//! End-to-end login guard flows through the in-memory request adapter.

use route_guard::web::{RequestAdapter, Response, REDIRECT_STATUS};
use route_guard::{handler, GuardRegistry, Handler, PluginSettings, RequestContext};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn private_page() -> Handler<RequestAdapter> {
    handler(|req: &RequestAdapter| {
        Response::ok(format!("private:{}?{}", req.path(), req.query_string()))
    })
}

fn guarded_with(settings: PluginSettings) -> Handler<RequestAdapter> {
    init_tracing();
    GuardRegistry::<RequestAdapter>::new(settings)
        .needs("login", private_page())
        .expect("login is built in")
}

fn guarded() -> Handler<RequestAdapter> {
    guarded_with(PluginSettings::new())
}

#[test]
fn logged_in_request_reaches_handler_unchanged() {
    let mut req = RequestAdapter::get("/private?user=alice&page=2");
    req.set_session("user", "alice");

    assert_eq!(
        guarded()(&req),
        Response::ok("private:/private?user=alice&page=2")
    );
}

#[test]
fn anonymous_request_redirects_with_callback() {
    let req = RequestAdapter::get("/private?user=dagolden");
    let response = guarded()(&req);

    assert_eq!(response.status(), REDIRECT_STATUS);
    assert_eq!(
        response.location(),
        Some("/login?return_url=%2Fprivate%3Fuser%3Ddagolden&user=dagolden")
    );
}

#[test]
fn only_configured_passthrough_parameters_are_forwarded() {
    let req = RequestAdapter::get("/private?user=alice&other=1");
    let response = guarded()(&req);

    let location = response.location().expect("redirect");
    assert!(location.contains("user=alice"));
    assert!(!location.contains("&other=1"));
    assert!(location.contains("return_url=%2Fprivate%3Fuser%3Dalice%26other%3D1"));
}

#[test]
fn empty_passthrough_value_is_omitted() {
    let req = RequestAdapter::get("/private?user=");
    let response = guarded()(&req);

    assert_eq!(
        response.location(),
        Some("/login?return_url=%2Fprivate%3Fuser%3D")
    );
}

#[test]
fn empty_session_value_counts_as_logged_out() {
    let mut req = RequestAdapter::get("/private");
    req.set_session("user", "");

    assert!(guarded()(&req).is_redirect());
}

#[test]
fn logged_in_key_can_be_configured() {
    let guard = guarded_with(PluginSettings::new().with_text("logged_in_key", "account"));

    let mut req = RequestAdapter::get("/private");
    req.set_session("user", "alice");
    assert!(guard(&req).is_redirect());

    let mut req = RequestAdapter::get("/private");
    req.set_session("account", "alice");
    assert!(!guard(&req).is_redirect());
}

#[test]
fn login_route_and_callback_key_can_be_configured() {
    let guard = guarded_with(
        PluginSettings::new()
            .with_text("login_route", "/auth/signin?realm=staff")
            .with_text("callback_key", "next")
            .with_list("passthrough", ["user", "email"]),
    );

    let req = RequestAdapter::get("/reports?email=a%40b.c&user=bob");
    assert_eq!(
        guard(&req).location(),
        Some("/auth/signin?realm=staff&next=%2Freports%3Femail%3Da%2540b.c%26user%3Dbob&user=bob&email=a%40b.c")
    );
}

#[test]
fn absolute_urls_with_base_url() {
    let req = RequestAdapter::get("/private?user=dagolden")
        .with_base_url("http://localhost:3000")
        .unwrap();

    assert_eq!(
        guarded()(&req).location(),
        Some("http://localhost:3000/login?return_url=http%3A%2F%2Flocalhost%3A3000%2Fprivate%3Fuser%3Ddagolden&user=dagolden")
    );
}

#[test]
fn route_parameters_can_be_passed_through() {
    let guard = guarded_with(PluginSettings::new().with_list("passthrough", ["id"]));

    let mut req = RequestAdapter::get("/users/7");
    req.add_route_param("id", "7");

    assert_eq!(
        guard(&req).location(),
        Some("/login?return_url=%2Fusers%2F7&id=7")
    );
}

#[test]
fn environment_settings_feed_the_login_guard() {
    let settings = PluginSettings::from_lookup(|var| match var {
        "ROUTE_GUARD_LOGIN_ROUTE" => Some("/sso".to_string()),
        "ROUTE_GUARD_PASSTHROUGH" => Some("".to_string()),
        _ => None,
    });
    let guard = guarded_with(settings);

    let req = RequestAdapter::get("/private?user=alice");
    assert_eq!(
        guard(&req).location(),
        Some("/sso?return_url=%2Fprivate%3Fuser%3Dalice")
    );
}

#[test]
fn mounted_base_url_prefixes_login_and_callback() {
    let req = RequestAdapter::get("/private")
        .with_base_url("http://host/app/")
        .unwrap();

    assert_eq!(
        guarded()(&req).location(),
        Some("http://host/app/login?return_url=http%3A%2F%2Fhost%2Fapp%2Fprivate")
    );
}

#[test]
fn scheme_relative_path_cannot_escape_base_host() {
    let req = RequestAdapter::get("//evil.example/steal")
        .with_base_url("http://host/")
        .unwrap();

    assert_eq!(
        guarded()(&req).location(),
        Some("http://host/login?return_url=http%3A%2F%2Fhost%2Fevil.example%2Fsteal")
    );
}
