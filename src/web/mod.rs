//! Framework-free web integration surface.
//!
//! Guards only see the host through [`RequestContext`](crate::RequestContext).
//! This module provides an in-memory implementation of it:
//! - [`RequestAdapter`]: request path, query, parameters and session
//! - [`Response`]: content or redirect responses
//!
//! # Integration Model
//!
//! Framework-specific code should either:
//! 1. Implement `RequestContext` for its own per-request type, or
//! 2. Build a `RequestAdapter` from the framework request and convert the
//!    returned `Response` back into the framework's response type.
//!
//! In both cases routes are guarded once at startup through
//! [`GuardRegistry::needs`](crate::GuardRegistry::needs) and the returned
//! handler is installed in the router.
//!
//! # Example Flow
//!
//! ```
//! use route_guard::{handler, GuardRegistry};
//! use route_guard::web::{RequestAdapter, Response};
//!
//! let registry = GuardRegistry::<RequestAdapter>::default();
//! let private = registry
//!     .needs("login", handler(|_req: &RequestAdapter| Response::ok("private")))
//!     .unwrap();
//!
//! let mut req = RequestAdapter::get("/private");
//! req.set_session("user", "alice");
//! assert_eq!(private(&req), Response::ok("private"));
//! ```

mod adapter;
pub mod example_handler;

pub use adapter::{RequestAdapter, Response, REDIRECT_STATUS};
