//! In-memory host adapter implementing [`RequestContext`].

use std::collections::HashMap;

use url::{form_urlencoded, Url};

use crate::context::RequestContext;
use crate::request::QueryParams;

/// Status code used for redirects issued by the adapter.
pub const REDIRECT_STATUS: u16 = 302;

/// Response produced by handlers running on the [`RequestAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A regular response body
    Content {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
    /// A redirect to another URL
    Redirect {
        /// HTTP status code (3xx)
        status: u16,
        /// Target URL
        location: String,
    },
}

impl Response {
    /// A `200 OK` response with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Response::Content {
            status: 200,
            body: body.into(),
        }
    }

    /// A `302 Found` redirect to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Response::Redirect {
            status: REDIRECT_STATUS,
            location: location.into(),
        }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        match self {
            Response::Content { status, .. } | Response::Redirect { status, .. } => *status,
        }
    }

    /// Returns true for redirects.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Response::Redirect { .. })
    }

    /// Returns the redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            Response::Redirect { location, .. } => Some(location.as_str()),
            Response::Content { .. } => None,
        }
    }

    /// Returns the body, if this is a content response.
    pub fn body(&self) -> Option<&str> {
        match self {
            Response::Content { body, .. } => Some(body.as_str()),
            Response::Redirect { .. } => None,
        }
    }
}

/// Framework-free request context.
///
/// `RequestAdapter` holds simple, owned request data: the request target,
/// the parameters parsed from it, extra route parameters and the session.
/// Framework integrations can convert their own request types into it, or
/// use it as a template for implementing [`RequestContext`] directly.
///
/// Without a base URL, `uri_for` produces path-relative URLs; with one it
/// produces absolute URLs.
///
/// # Examples
///
/// ```
/// use route_guard::{QueryParams, RequestContext};
/// use route_guard::web::RequestAdapter;
///
/// let mut req = RequestAdapter::get("/private?user=alice&lang=en");
/// req.set_session("user", "alice");
///
/// assert_eq!(req.path(), "/private");
/// assert_eq!(req.query_string(), "user=alice&lang=en");
/// assert_eq!(req.param("lang"), Some("en"));
/// assert_eq!(req.session_value("user").as_deref(), Some("alice"));
///
/// let mut query = QueryParams::new();
/// query.insert("next", "/a b");
/// assert_eq!(req.uri_for("/login", &query), "/login?next=%2Fa+b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    /// Request path
    path: String,
    /// Raw query string, without `?`
    query_string: String,
    /// Query and route parameters
    params: HashMap<String, String>,
    /// Session values for this request
    session: HashMap<String, String>,
    /// Base for absolute URLs
    base_url: Option<Url>,
}

impl RequestAdapter {
    /// Creates an adapter for a `GET` of `target` (path plus optional query).
    pub fn get(target: &str) -> Self {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        Self::new(path, query)
    }

    /// Creates an adapter from a path and raw query string.
    ///
    /// Query parameters are decoded into the parameter map; a repeated
    /// name keeps its last value.
    pub fn new(path: impl Into<String>, query_string: impl Into<String>) -> Self {
        let query_string = query_string.into();
        let params = form_urlencoded::parse(query_string.as_bytes())
            .into_owned()
            .collect();

        Self {
            path: path.into(),
            query_string,
            params,
            session: HashMap::new(),
            base_url: None,
        }
    }

    /// Makes `uri_for` produce absolute URLs under `base`.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `base` is not an absolute URL.
    pub fn with_base_url(mut self, base: &str) -> Result<Self, url::ParseError> {
        self.base_url = Some(Url::parse(base)?);
        Ok(self)
    }

    /// Sets a session value for this request.
    pub fn set_session(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.session.insert(key.into(), value.into());
    }

    /// Removes a session value.
    pub fn remove_session(&mut self, key: &str) {
        self.session.remove(key);
    }

    /// Adds a route parameter (e.g. `id` from `/users/:id`).
    ///
    /// Route parameters take precedence over query parameters of the same name.
    pub fn add_route_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns all request parameters.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Places `route` under the base URL's path.
    ///
    /// Leading slashes collapse to one, so a path like `//host/x` stays on
    /// this host instead of reading as a scheme-relative URL.
    fn locate(&self, route: &str) -> String {
        let relative = route.trim_start_matches('/');
        match &self.base_url {
            Some(base) => {
                let mut url = base.clone();
                let prefix = base.path().trim_end_matches('/');
                url.set_path(&format!("{}/{}", prefix, relative));
                url.set_query(None);
                url.set_fragment(None);
                url.to_string()
            }
            None if route.starts_with('/') => format!("/{}", relative),
            None => route.to_string(),
        }
    }
}

impl RequestContext for RequestAdapter {
    type Response = Response;

    fn session_value(&self, key: &str) -> Option<String> {
        self.session.get(key).cloned()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query_string(&self) -> &str {
        &self.query_string
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn uri_for(&self, path: &str, query: &QueryParams) -> String {
        let (route, existing) = path.split_once('?').unwrap_or((path, ""));

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in form_urlencoded::parse(existing.as_bytes()) {
            if !query.contains(&name) {
                serializer.append_pair(&name, &value);
            }
        }
        for (name, value) in query.iter() {
            serializer.append_pair(name, value);
        }
        let encoded = serializer.finish();

        let mut url = self.locate(route);
        if !encoded.is_empty() {
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    fn redirect(&self, url: String) -> Response {
        Response::redirect(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_splits_path_and_query() {
        let req = RequestAdapter::get("/private?user=alice&other=1");
        assert_eq!(req.path(), "/private");
        assert_eq!(req.query_string(), "user=alice&other=1");
        assert_eq!(req.params().len(), 2);
    }

    #[test]
    fn get_without_query() {
        let req = RequestAdapter::get("/");
        assert_eq!(req.path(), "/");
        assert_eq!(req.query_string(), "");
        assert!(req.params().is_empty());
    }

    #[test]
    fn query_params_are_decoded() {
        let req = RequestAdapter::get("/search?q=a+b%21");
        assert_eq!(req.param("q"), Some("a b!"));
    }

    #[test]
    fn route_params_override_query() {
        let mut req = RequestAdapter::get("/users/7?id=1");
        req.add_route_param("id", "7");
        assert_eq!(req.param("id"), Some("7"));
    }

    #[test]
    fn session_values_can_be_removed() {
        let mut req = RequestAdapter::get("/");
        req.set_session("user", "alice");
        req.remove_session("user");
        assert_eq!(req.session_value("user"), None);
    }

    #[test]
    fn uri_for_without_query() {
        let req = RequestAdapter::get("/");
        assert_eq!(req.uri_for("/login", &QueryParams::new()), "/login");
    }

    #[test]
    fn uri_for_merges_existing_route_query() {
        let req = RequestAdapter::get("/");
        let mut query = QueryParams::new();
        query.insert("return_url", "/x");
        query.insert("realm", "new");

        assert_eq!(
            req.uri_for("/login?realm=staff&lang=en", &query),
            "/login?lang=en&return_url=%2Fx&realm=new"
        );
    }

    #[test]
    fn uri_for_with_base_url_is_absolute() {
        let req = RequestAdapter::get("/private")
            .with_base_url("http://localhost:3000/")
            .unwrap();
        assert_eq!(
            req.uri_for("/private", &QueryParams::new()),
            "http://localhost:3000/private"
        );
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        for base in ["http://host/app/", "http://host/app"] {
            let req = RequestAdapter::get("/").with_base_url(base).unwrap();
            assert_eq!(
                req.uri_for("/login", &QueryParams::new()),
                "http://host/app/login"
            );
        }
    }

    #[test]
    fn double_slash_path_stays_on_base_host() {
        let req = RequestAdapter::get("//evil.example/steal")
            .with_base_url("http://host/")
            .unwrap();
        assert_eq!(
            req.uri_for(req.path(), &QueryParams::new()),
            "http://host/evil.example/steal"
        );
    }

    #[test]
    fn double_slash_path_stays_relative_without_base() {
        let req = RequestAdapter::get("//evil.example/steal");
        assert_eq!(
            req.uri_for(req.path(), &QueryParams::new()),
            "/evil.example/steal"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(RequestAdapter::get("/").with_base_url("not a url").is_err());
    }

    #[test]
    fn response_accessors() {
        let ok = Response::ok("hi");
        assert_eq!(ok.status(), 200);
        assert_eq!(ok.body(), Some("hi"));
        assert!(!ok.is_redirect());

        let redirect = Response::redirect("/login");
        assert_eq!(redirect.status(), 302);
        assert_eq!(redirect.location(), Some("/login"));
        assert_eq!(redirect.body(), None);
    }
}
