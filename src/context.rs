use std::sync::Arc;

use crate::request::QueryParams;

/// The host framework's view of one inbound request.
///
/// Guards never talk to a web framework directly. Framework integrations
/// implement this trait for their per-request type, and every guarded
/// handler receives a reference to it.
///
/// The trait covers exactly what the built-in guards need:
/// - reading the current session
/// - the original request path, raw query string and parameters
/// - building URLs and issuing redirects
///
/// # Examples
///
/// ```
/// use route_guard::{QueryParams, RequestContext};
///
/// struct Minimal {
///     path: String,
/// }
///
/// impl RequestContext for Minimal {
///     type Response = String;
///
///     fn session_value(&self, _key: &str) -> Option<String> {
///         None
///     }
///     fn path(&self) -> &str {
///         &self.path
///     }
///     fn query_string(&self) -> &str {
///         ""
///     }
///     fn param(&self, _name: &str) -> Option<&str> {
///         None
///     }
///     fn uri_for(&self, path: &str, _query: &QueryParams) -> String {
///         path.to_string()
///     }
///     fn redirect(&self, url: String) -> String {
///         format!("302 {}", url)
///     }
/// }
/// ```
pub trait RequestContext {
    /// The host's response type.
    type Response;

    /// Reads `key` from the current request's session.
    fn session_value(&self, key: &str) -> Option<String>;

    /// Path of the original inbound request.
    fn path(&self) -> &str;

    /// Raw query string of the original request, without the leading `?`.
    fn query_string(&self) -> &str;

    /// Looks up a request parameter (query or route).
    fn param(&self, name: &str) -> Option<&str>;

    /// Builds a URL for `path` with `query` serialized as its query string.
    fn uri_for(&self, path: &str, query: &QueryParams) -> String;

    /// Produces a redirect response to `url`.
    fn redirect(&self, url: String) -> Self::Response;
}

/// A request handler installed on a route.
pub type Handler<C> = Arc<dyn Fn(&C) -> <C as RequestContext>::Response + Send + Sync>;

/// Wraps a closure as a [`Handler`].
pub fn handler<C, F>(f: F) -> Handler<C>
where
    C: RequestContext,
    F: Fn(&C) -> C::Response + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Session truthiness: present, non-empty and not `"0"`.
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_rules() {
        assert!(is_truthy(Some("alice")));
        assert!(is_truthy(Some("1")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(None));
    }
}
