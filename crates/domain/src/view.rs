//! View tree: the retained element structure a widget owns.
//!
//! A widget creates its subtree once when it is installed and afterwards
//! mutates it in place: setting the text of identified elements, or clearing
//! a container and appending fresh rows. Adapters turn the tree into markup.
//!
//! Ids are local to the widget that owns the subtree. Adapters scope them by
//! widget name when several subtrees share one page. An element bound to an
//! age label shows that label's current age instead of its own text.

use serde::Serialize;

use crate::error::NotFoundError;

/// Element kinds used by dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    Span,
    Pre,
    Table,
    Tr,
    Th,
    Td,
}

impl Tag {
    /// The HTML tag name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Pre => "pre",
            Self::Table => "table",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
        }
    }
}

/// A single node in a widget's view tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: Tag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Age label whose value this element displays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            class: None,
            text: None,
            age: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    #[must_use]
    pub fn span() -> Self {
        Self::new(Tag::Span)
    }

    /// A table row whose cells hold the given texts.
    #[must_use]
    pub fn row<I, S>(cell: Tag, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts.into_iter().fold(Self::new(Tag::Tr), |row, text| {
            row.child(Self::new(cell).with_text(text))
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Bind this element to the age tracked under `label`.
    #[must_use]
    pub fn with_age(mut self, label: impl Into<String>) -> Self {
        self.age = Some(label.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for the element with `id` (including `self`).
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Like [`find_mut`](Self::find_mut) but a missing element is an error.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no element carries `id`.
    pub fn require_mut(&mut self, id: &str) -> Result<&mut Element, NotFoundError> {
        self.find_mut(id).ok_or_else(|| NotFoundError {
            entity: "Element",
            id: id.to_string(),
        })
    }

    /// Replace the text of the element with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no element carries `id`.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), NotFoundError> {
        self.require_mut(id)?.text = Some(text.into());
        Ok(())
    }

    /// Remove all children of the element with `id`, then append `rows`.
    ///
    /// Re-rendering the same data therefore never accumulates rows.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no element carries `id`.
    pub fn replace_children(
        &mut self,
        id: &str,
        rows: impl IntoIterator<Item = Element>,
    ) -> Result<(), NotFoundError> {
        let target = self.require_mut(id)?;
        target.children.clear();
        target.children.extend(rows);
        Ok(())
    }

    /// Concatenated text of this element and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}
