//! Widget descriptor: identifies a dashboard section.
//!
//! Descriptors are created at startup, never mutated, and live as long as the
//! dashboard. Their registration order is the rendering order of the page
//! and of the navigation list.

use serde::{Deserialize, Serialize};

use crate::error::{DexError, ValidationError};
use crate::name::WidgetName;

/// Name and human-readable title of a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    pub name: WidgetName,
    pub title: String,
}

impl WidgetDescriptor {
    /// Create a builder for constructing a [`WidgetDescriptor`].
    #[must_use]
    pub fn builder() -> WidgetDescriptorBuilder {
        WidgetDescriptorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Validation`] when the title is empty.
    pub fn validate(&self) -> Result<(), DexError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`WidgetDescriptor`].
#[derive(Debug, Default)]
pub struct WidgetDescriptorBuilder {
    name: Option<String>,
    title: Option<String>,
}

impl WidgetDescriptorBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder, validate, and return a [`WidgetDescriptor`].
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Validation`] if the name is missing or malformed,
    /// or the title is missing or blank.
    pub fn build(self) -> Result<WidgetDescriptor, DexError> {
        let descriptor = WidgetDescriptor {
            name: WidgetName::new(self.name.unwrap_or_default())?,
            title: self.title.unwrap_or_default(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
