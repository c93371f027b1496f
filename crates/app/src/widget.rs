//! Widget: a named, titled dashboard section with a snapshot handler.

use dex_domain::error::DexError;
use dex_domain::snapshot::Snapshot;
use dex_domain::view::Element;
use dex_domain::widget::WidgetDescriptor;

use crate::dispatcher::{HandlerContext, SnapshotHandler};

/// A pluggable dashboard widget.
///
/// Implementations live in the `dex-widgets` crate. [`Dashboard::install`]
/// calls the methods in order:
///
/// 1. [`descriptor`](Self::descriptor): registered with the widget registry
/// 2. [`mount`](Self::mount): the subtree created once and owned from then on
/// 3. [`tracked_ages`](Self::tracked_ages): labels declared in the age tracker
/// 4. [`update`](Self::update): invoked for every snapshot afterwards
///
/// [`Dashboard::install`]: crate::dashboard::Dashboard::install
pub trait Widget: Send {
    fn descriptor(&self) -> &WidgetDescriptor;

    /// Build the initial view subtree.
    fn mount(&self) -> Element;

    /// Age labels this widget keeps up to date.
    fn tracked_ages(&self) -> Vec<String> {
        Vec::new()
    }

    /// Update the widget's subtree and age entries from `snapshot`.
    ///
    /// Must be a no-op when the widget's source is absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the source is present but malformed, or the
    /// subtree no longer has an element the widget expects.
    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError>;
}

/// Adapts a [`Widget`] to the dispatcher's [`SnapshotHandler`] interface.
pub struct WidgetHandler<W>(pub W);

impl<W: Widget> SnapshotHandler for WidgetHandler<W> {
    fn handle(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        self.0.update(snapshot, cx)
    }
}

impl Widget for Box<dyn Widget> {
    fn descriptor(&self) -> &WidgetDescriptor {
        (**self).descriptor()
    }

    fn mount(&self) -> Element {
        (**self).mount()
    }

    fn tracked_ages(&self) -> Vec<String> {
        (**self).tracked_ages()
    }

    fn update(&mut self, snapshot: &Snapshot, cx: &mut HandlerContext<'_>) -> Result<(), DexError> {
        (**self).update(snapshot, cx)
    }
}
