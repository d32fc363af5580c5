//! Running a single handler.
//!
//! # Responsibilities
//! - Look up the handler by name and call it exactly once
//! - Turn errors and panics into [`RenderError`]
//! - Keep panic diagnostics off the process output for the call's duration
//!
//! # Design Decisions
//! - Failures are logged at error level and reported as `None`; startup
//!   carries on with the remaining handlers
//! - A wrapping panic hook is installed once; it stays silent only on the
//!   thread currently inside a handler call and forwards everything else to
//!   the hook it replaced

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use thiserror::Error;

use crate::observability::metrics;
use crate::render::context::RenderContext;
use crate::render::handler::HandlerRegistry;
use crate::render::tree::RenderTree;

static QUIET_HOOK: Once = Once::new();

thread_local! {
    static IN_HANDLER: Cell<bool> = const { Cell::new(false) };
}

/// Errors that can occur while executing a handler.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No handler registered under this name.
    #[error("no render handler named '{0}'")]
    UnknownHandler(String),

    /// Handler returned an error.
    #[error("render handler '{handler}' failed: {message}")]
    Failed { handler: String, message: String },

    /// Handler panicked.
    #[error("render handler '{handler}' panicked: {message}")]
    Panicked { handler: String, message: String },
}

impl RenderError {
    pub fn handler(&self) -> &str {
        match self {
            RenderError::UnknownHandler(handler) => handler,
            RenderError::Failed { handler, .. } | RenderError::Panicked { handler, .. } => handler,
        }
    }
}

/// Execute `name` and return its tree, or the reason it failed.
pub fn try_execute(registry: &HandlerRegistry, name: &str) -> Result<RenderTree, RenderError> {
    let handler = registry
        .get(name)
        .ok_or_else(|| RenderError::UnknownHandler(name.to_string()))?;

    let mut cx = RenderContext::new();
    match call_quietly(|| handler.render(&mut cx)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(RenderError::Failed {
                handler: name.to_string(),
                message: e.to_string(),
            })
        }
        Err(payload) => {
            return Err(RenderError::Panicked {
                handler: name.to_string(),
                message: panic_message(&*payload),
            })
        }
    }

    tracing::trace!(
        handler = %name,
        nodes = cx.tree().len(),
        listeners = cx.listeners().len(),
        console_lines = cx.console_output().len(),
        "Handler rendered"
    );
    Ok(cx.into_tree())
}

/// Execute `name`, logging any failure. `None` means the handler produced
/// nothing usable.
pub fn execute(registry: &HandlerRegistry, name: &str) -> Option<RenderTree> {
    match try_execute(registry, name) {
        Ok(tree) => Some(tree),
        Err(error) => {
            tracing::error!(handler = %error.handler(), error = %error, "Render failed");
            metrics::record_render_failure();
            None
        }
    }
}

/// Run `f`, catching a panic without reporting it. Panics on other threads
/// still reach the previous hook.
fn call_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_HOOK.call_once(wrap_panic_hook);

    let outer = IN_HANDLER.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    IN_HANDLER.with(|flag| flag.set(outer));
    result
}

fn wrap_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !IN_HANDLER.with(Cell::get) {
            previous(info);
        }
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::{RenderNode, BODY_ROOT};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_execute_returns_seeded_tree() {
        let mut registry = HandlerRegistry::new();
        registry.register("Home", |cx: &mut RenderContext| {
            cx.insert(RenderNode::new("title", "h1").parent(BODY_ROOT).text("Home"));
            Ok(())
        });

        let tree = execute(&registry, "Home").unwrap();
        let ids: Vec<_> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["body", "head", "title"]);
    }

    #[test]
    fn test_handler_called_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut registry = HandlerRegistry::new();
        registry.register("Flaky", move |_cx: &mut RenderContext| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("boom".into())
        });

        assert!(execute(&registry, "Flaky").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failures_are_classified() {
        let mut registry = HandlerRegistry::new();
        registry.register("Broken", |_cx: &mut RenderContext| Err("missing data".into()));
        registry.register("Panics", |_cx: &mut RenderContext| panic!("window is not defined"));

        match try_execute(&registry, "Broken") {
            Err(RenderError::Failed { handler, message }) => {
                assert_eq!(handler, "Broken");
                assert_eq!(message, "missing data");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        match try_execute(&registry, "Panics") {
            Err(RenderError::Panicked { message, .. }) => {
                assert_eq!(message, "window is not defined");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            try_execute(&registry, "Missing"),
            Err(RenderError::UnknownHandler(name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_panic_hook_is_restored() {
        let mut registry = HandlerRegistry::new();
        registry.register("Panics", |_cx: &mut RenderContext| panic!("{}", String::from("formatted")));

        match try_execute(&registry, "Panics") {
            Err(RenderError::Panicked { message, .. }) => assert_eq!(message, "formatted"),
            other => panic!("unexpected result: {:?}", other),
        }

        let result = panic::catch_unwind(|| panic!("after"));
        assert!(result.is_err());
    }

    #[test]
    fn test_other_threads_keep_their_panic_output() {
        QUIET_HOOK.call_once(wrap_panic_hook);
        let original = panic::take_hook();

        let unrelated = Arc::new(AtomicUsize::new(0));
        let from_handler = Arc::new(AtomicUsize::new(0));
        let (u, h) = (unrelated.clone(), from_handler.clone());
        panic::set_hook(Box::new(move |info| {
            match info.payload().downcast_ref::<&str>() {
                Some(&"unrelated failure") => u.fetch_add(1, Ordering::SeqCst),
                Some(&"handler failure") => h.fetch_add(1, Ordering::SeqCst),
                _ => 0,
            };
        }));
        wrap_panic_hook();

        let entered = Arc::new(Barrier::new(2));
        let released = Arc::new(Barrier::new(2));
        let other = {
            let (entered, released) = (entered.clone(), released.clone());
            thread::spawn(move || {
                entered.wait();
                let result = panic::catch_unwind(|| panic!("unrelated failure"));
                released.wait();
                result.is_err()
            })
        };

        let mut registry = HandlerRegistry::new();
        registry.register("Waits", move |_cx: &mut RenderContext| {
            entered.wait();
            released.wait();
            panic!("handler failure")
        });
        let outcome = try_execute(&registry, "Waits");
        let other_panicked = other.join().unwrap();

        let _ = panic::take_hook();
        panic::set_hook(original);

        assert!(matches!(outcome, Err(RenderError::Panicked { .. })));
        assert!(other_panicked);
        assert_eq!(unrelated.load(Ordering::SeqCst), 1);
        assert_eq!(from_handler.load(Ordering::SeqCst), 0);
    }
}
