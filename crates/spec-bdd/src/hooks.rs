//! Single-slot before/after hooks run around every `it` block.

use std::fmt;

use crate::Spec;

/// Callback registered with [`Spec::before`] or [`Spec::after`].
pub type Hook = Box<dyn FnMut(&mut Spec)>;

/// Which of the two hook slots to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Runs before the body of every `it` block.
    Before,
    /// Runs after the body of every `it` block.
    After,
}

impl HookKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One optional hook per kind; registering replaces the previous hook.
#[derive(Default)]
pub(crate) struct HookSlots {
    before: Option<Hook>,
    after: Option<Hook>,
}

impl HookSlots {
    fn slot_mut(&mut self, kind: HookKind) -> &mut Option<Hook> {
        match kind {
            HookKind::Before => &mut self.before,
            HookKind::After => &mut self.after,
        }
    }

    pub(crate) fn register(&mut self, kind: HookKind, hook: Hook) {
        if self.slot_mut(kind).replace(hook).is_some() {
            log::trace!("replaced {kind} hook");
        }
    }

    pub(crate) fn is_set(&self, kind: HookKind) -> bool {
        match kind {
            HookKind::Before => self.before.is_some(),
            HookKind::After => self.after.is_some(),
        }
    }

    /// Removes the hook so it can run with mutable access to the suite.
    pub(crate) fn take(&mut self, kind: HookKind) -> Option<Hook> {
        self.slot_mut(kind).take()
    }

    /// Puts a hook back after it ran, unless it registered a replacement.
    pub(crate) fn restore(&mut self, kind: HookKind, hook: Hook) {
        let slot = self.slot_mut(kind);
        if slot.is_none() {
            *slot = Some(hook);
        }
    }
}

impl fmt::Debug for HookSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSlots")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}
