//! A toy widget assembled from named parts, specified in
//! `tests/widget_spec.rs`.

use thiserror::Error;

/// Errors raised while assembling a widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// A part with the same name is already attached.
    #[error("part {0:?} is already attached")]
    DuplicatePart(String),
    /// The widget already holds its maximum number of parts.
    #[error("widget is full ({0} parts)")]
    Full(usize),
}

/// A named collection of parts with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    name: String,
    capacity: usize,
    parts: Vec<String>,
}

impl Widget {
    /// Creates an empty widget.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            parts: Vec::new(),
        }
    }

    /// The widget's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached parts, in attachment order.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns `true` when no more parts fit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.parts.len() >= self.capacity
    }

    /// Attaches a part.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Full`] when the widget is at capacity and
    /// [`WidgetError::DuplicatePart`] when `part` is already attached.
    pub fn attach(&mut self, part: impl Into<String>) -> Result<(), WidgetError> {
        let part = part.into();
        if self.is_full() {
            return Err(WidgetError::Full(self.capacity));
        }
        if self.parts.contains(&part) {
            return Err(WidgetError::DuplicatePart(part));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Detaches a part, returning whether it was attached.
    pub fn detach(&mut self, part: &str) -> bool {
        let before = self.parts.len();
        self.parts.retain(|attached| attached != part);
        self.parts.len() != before
    }
}
