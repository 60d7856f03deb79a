//! Nested `describe` / `it` labels currently in scope.

use std::fmt;

/// Prefix prepended to the label of every `it` block.
pub const IT_PREFIX: &str = "it ";

/// Ordered stack of the labels of the blocks currently executing.
///
/// Labels are only joined when a failure needs describing, so pushing is
/// cheap and the rendered text always reflects the stack at failure time.
///
/// # Examples
///
/// ```
/// use spec_bdd::DescriptionStack;
///
/// let mut stack = DescriptionStack::default();
/// stack.push("Widget");
/// stack.push("it creates");
/// assert_eq!(stack.render(), " Widget it creates");
/// assert_eq!(stack.pop().as_deref(), Some("it creates"));
/// assert_eq!(stack.depth(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescriptionStack {
    labels: Vec<String>,
}

impl DescriptionStack {
    /// Pushes a label onto the stack.
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Removes the innermost label.
    pub fn pop(&mut self) -> Option<String> {
        self.labels.pop()
    }

    /// Number of labels in scope.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when no block is in scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels from outermost to innermost.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Drops every label.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Joins the labels, each preceded by a single space.
    #[must_use]
    pub fn render(&self) -> String {
        self.labels
            .iter()
            .fold(String::new(), |text, label| text + " " + label)
    }
}

impl fmt::Display for DescriptionStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_stack_renders_empty_text() {
        let stack = DescriptionStack::default();
        assert!(stack.is_empty());
        assert_eq!(stack.render(), "");
    }

    #[rstest]
    #[case(&["Widget"], " Widget")]
    #[case(&["Widget", "when empty", "it reports zero"], " Widget when empty it reports zero")]
    fn render_joins_labels_in_order(#[case] labels: &[&str], #[case] expected: &str) {
        let mut stack = DescriptionStack::default();
        for label in labels {
            stack.push(*label);
        }
        assert_eq!(stack.render(), expected);
        assert_eq!(stack.to_string(), expected);
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut stack = DescriptionStack::default();
        stack.push("a");
        stack.push("b");
        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.pop(), None);
    }
}
