//! Widget registry: the ordered set of installed widgets.
//!
//! Each entry pairs a [`WidgetDescriptor`] with the view subtree the widget
//! owns. Iteration order is registration order and drives the rendering
//! order of the page and the navigation list. There is no removal.

use dex_domain::error::{DexError, ValidationError};
use dex_domain::name::WidgetName;
use dex_domain::view::Element;
use dex_domain::widget::WidgetDescriptor;

/// A widget's descriptor together with its view anchor.
#[derive(Debug, Clone)]
pub struct RegisteredWidget {
    pub descriptor: WidgetDescriptor,
    pub view: Element,
}

/// Ordered, name-unique collection of widgets.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: Vec<RegisteredWidget>,
}

impl WidgetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a widget.
    ///
    /// The root of `view` is given the widget's name as its id so the anchor
    /// is uniquely identifiable on the page.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateWidget`] if a widget with the same
    /// name is already registered.
    pub fn register(
        &mut self,
        descriptor: WidgetDescriptor,
        mut view: Element,
    ) -> Result<(), DexError> {
        descriptor.validate()?;
        if self.contains(&descriptor.name) {
            return Err(ValidationError::DuplicateWidget(descriptor.name.to_string()).into());
        }
        view.id = Some(descriptor.name.to_string());
        self.widgets.push(RegisteredWidget { descriptor, view });
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &WidgetName) -> bool {
        self.widgets
            .iter()
            .any(|widget| &widget.descriptor.name == name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredWidget> {
        self.widgets
            .iter()
            .find(|widget| widget.descriptor.name.as_str() == name)
    }

    /// Mutable access to the view owned by `name`.
    pub fn view_mut(&mut self, name: &WidgetName) -> Option<&mut Element> {
        self.widgets
            .iter_mut()
            .find(|widget| &widget.descriptor.name == name)
            .map(|widget| &mut widget.view)
    }

    /// Widgets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredWidget> {
        self.widgets.iter()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.widgets.iter().map(|widget| &widget.descriptor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
