//! Data dispatcher: fans every snapshot out to all registered handlers.
//!
//! Handlers run in registration order and each receives the full snapshot;
//! they look up their own source and no-op when it is absent. A handler that
//! fails (returns an error or panics) is logged and recorded in the
//! [`DispatchReport`], and the remaining handlers still run: widgets update
//! independent subtrees, so one broken widget must not blank the dashboard.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use dex_domain::error::{DexError, NotFoundError};
use dex_domain::name::WidgetName;
use dex_domain::snapshot::Snapshot;
use dex_domain::view::Element;

use crate::age_tracker::AgeTracker;
use crate::registry::WidgetRegistry;

/// What a handler may touch while processing a snapshot.
pub struct HandlerContext<'a> {
    /// The subtree owned by the handler's widget, and nothing else.
    pub view: &'a mut Element,
    /// Shared age storage.
    pub ages: &'a mut AgeTracker,
}

/// Reacts to every snapshot.
pub trait SnapshotHandler: Send {
    /// Update the owning widget from `snapshot`.
    ///
    /// # Errors
    ///
    /// Any error is isolated to this handler by the dispatcher.
    fn handle(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError>;
}

struct Registration {
    owner: WidgetName,
    handler: Box<dyn SnapshotHandler>,
}

/// One handler that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerFailure {
    pub widget: String,
    pub message: String,
}

/// Summary of a single [`DataDispatcher::dispatch`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Number of handlers that were invoked.
    pub invoked: usize,
    /// Handlers that returned an error or panicked.
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered list of snapshot handlers, each bound to the widget it updates.
#[derive(Default)]
pub struct DataDispatcher {
    handlers: Vec<Registration>,
}

impl DataDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler that updates the view of `owner`.
    pub fn on_snapshot(&mut self, owner: WidgetName, handler: Box<dyn SnapshotHandler>) {
        self.handlers.push(Registration { owner, handler });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler with `snapshot`, in registration order.
    pub fn dispatch(
        &mut self,
        snapshot: &Snapshot,
        registry: &mut WidgetRegistry,
        ages: &mut AgeTracker,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for registration in &mut self.handlers {
            let owner = registration.owner.as_str();
            let Some(view) = registry.view_mut(&registration.owner) else {
                let err = NotFoundError {
                    entity: "Widget",
                    id: owner.to_string(),
                };
                tracing::warn!(widget = owner, error = %err, "handler owner is not registered");
                report.failures.push(HandlerFailure {
                    widget: owner.to_string(),
                    message: err.to_string(),
                });
                continue;
            };

            let mut cx = HandlerContext {
                view,
                ages: &mut *ages,
            };
            report.invoked += 1;

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                registration.handler.handle(snapshot, &mut cx)
            }));

            let message = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => {
                    tracing::warn!(widget = owner, error = %err, "snapshot handler failed");
                    err.to_string()
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!(widget = owner, panic = %message, "snapshot handler panicked");
                    message
                }
            };
            report.failures.push(HandlerFailure {
                widget: owner.to_string(),
                message,
            });
        }

        tracing::debug!(
            sources = snapshot.len(),
            invoked = report.invoked,
            failed = report.failures.len(),
            "dispatched snapshot"
        );
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "handler panicked".to_string()
    }
}
