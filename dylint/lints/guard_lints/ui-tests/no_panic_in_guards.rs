// Test case for NO_PANIC_IN_GUARDS lint

fn session_user(session: Option<&str>) -> &str {
    session.unwrap()
}

fn logged_in_key(key: Option<String>) -> String {
    key.expect("logged_in_key configured")
}

fn check(truthy: bool) {
    if !truthy {
        panic!("anonymous request");
    }
}

fn route(name: &str) {
    match name {
        "login" => {}
        _ => unreachable!(),
    }
}

// Good: absence is a failed condition
fn guarded(session: Option<&str>) -> &str {
    match session {
        Some(user) if !user.is_empty() => user,
        _ => "/login",
    }
}


fn main() {
    let _ = session_user(Some("alice"));
    let _ = logged_in_key(Some("user".to_string()));
    check(true);
    route("login");
    let _ = guarded(None);
}
