//! Lints for route-guard library code.
//!
//! ## Implemented Lints
//!
//! - `NO_PANIC_IN_GUARDS`: Forbids `.unwrap()`, `.expect()`, `panic!`,
//!   `unreachable!`, `todo!` and `unimplemented!` outside test code. A guard
//!   runs on every request and answers with a pass or a redirect; failures
//!   belong at route setup, as `Result`.

#![feature(rustc_private)]
#![warn(unused_extern_crates)]

extern crate rustc_ast;
extern crate rustc_lint;
extern crate rustc_session;
extern crate rustc_span;

use rustc_ast::{Attribute, Expr, ExprKind, Item, MacCall};
use rustc_lint::{EarlyContext, EarlyLintPass, LintContext};
use rustc_session::{declare_tool_lint, impl_lint_pass};
use rustc_span::{sym, Span};

declare_tool_lint! {
    /// **What it does:** Forbids panicking calls in non-test library code:
    /// `.unwrap()`, `.expect()`, `panic!`, `unreachable!`, `todo!` and
    /// `unimplemented!`.
    ///
    /// **Why is this bad?** Guarded handlers run inside the host's request path:
    /// - A panic takes down the request (or the worker) instead of redirecting
    /// - Unknown conditions and malformed extension lists are reported as
    ///   `Error` values at route setup, never at request time
    /// - Missing session values mean "logged out", not "bug"
    ///
    /// **Known problems:** Items under `#[cfg(test)]` or `#[test]` are skipped,
    /// doc-test code is not linted.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad - panics on an anonymous request
    /// let user = req.session_value("user").unwrap();
    ///
    /// // Good - absence is a redirect
    /// if !is_truthy(req.session_value("user").as_deref()) {
    ///     return req.redirect(login_location(req, &config));
    /// }
    /// ```
    pub guard_lints::NO_PANIC_IN_GUARDS,
    Deny,
    "panicking call in guard library code; return a redirect or an `Error` instead"
}

#[derive(Default)]
pub struct NoPanicInGuards {
    test_depth: usize,
}

impl_lint_pass!(NoPanicInGuards => [NO_PANIC_IN_GUARDS]);

impl EarlyLintPass for NoPanicInGuards {
    fn check_item(&mut self, _cx: &EarlyContext<'_>, item: &Item) {
        if is_test_item(&item.attrs) {
            self.test_depth += 1;
        }
    }

    fn check_item_post(&mut self, _cx: &EarlyContext<'_>, item: &Item) {
        if is_test_item(&item.attrs) {
            self.test_depth = self.test_depth.saturating_sub(1);
        }
    }

    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if self.test_depth > 0 {
            return;
        }
        match &expr.kind {
            ExprKind::MethodCall(call) => {
                check_method(cx, call.seg.ident.name.as_str(), call.seg.ident.span)
            }
            ExprKind::MacCall(mac) => check_macro(cx, mac, expr.span),
            _ => {}
        }
    }
}

// `#[test]` or `#[cfg(test)]`
fn is_test_item(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.has_name(sym::test)
            || (attr.has_name(sym::cfg)
                && attr
                    .meta_item_list()
                    .is_some_and(|list| list.iter().any(|meta| meta.has_name(sym::test))))
    })
}

fn check_method(cx: &EarlyContext<'_>, name: &str, span: Span) {
    let help = match name {
        "unwrap" => "propagate with `?`, or treat `None` as a failed condition",
        "expect" => "propagate with `?` and return an `Error` at route setup",
        _ => return,
    };
    cx.span_lint(NO_PANIC_IN_GUARDS, span, |diag| {
        diag.help(help);
        diag.note("a guarded handler must answer every request without panicking");
    });
}

fn check_macro(cx: &EarlyContext<'_>, mac: &MacCall, span: Span) {
    let path = &mac.path;

    if path.segments.len() != 1 {
        return;
    }

    let help = match path.segments[0].ident.name.as_str() {
        "panic" => "return `req.redirect(..)` or an `Error` instead",
        "unreachable" => "model the case in the types, or redirect",
        "todo" | "unimplemented" => "finish the guard before registering it",
        _ => return,
    };
    cx.span_lint(NO_PANIC_IN_GUARDS, span, |diag| {
        diag.help(help);
        diag.note("a guarded handler must answer every request without panicking");
    });
}

#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn register_lints(_sess: &rustc_session::Session, lint_store: &mut rustc_lint::LintStore) {
    lint_store.register_lints(&[&NO_PANIC_IN_GUARDS]);
    lint_store.register_early_pass(|| Box::new(NoPanicInGuards::default()));
}

#[unsafe(no_mangle)]
pub fn dylint_version() -> *mut std::os::raw::c_char {
    std::ffi::CString::new(dylint_linting::DYLINT_VERSION)
        .expect("version string contains null byte")
        .into_raw()
}
