//! Layout warnings.
//!
//! Bad CSS never aborts layout: the offending value is replaced by a safe
//! default and a [`Warning`] is recorded instead. Warnings are collected into a
//! [`Diagnostics`] value owned by a single layout pass, so two passes running
//! on different threads never share state.
//!
//! Recording deduplicates: the same warning is only kept once per pass, in the
//! order it was first seen.

use std::cell::RefCell;
use std::collections::HashSet;

use thiserror::Error;

/// A recoverable problem found while resolving styles for layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Warning {
    /// A length could not be parsed at all (e.g. `width: asdf`).
    #[error("invalid length '{value}' for {property}")]
    InvalidLength {
        /// Property name, e.g. `width`.
        property: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A number was followed by a unit the engine does not know.
    #[error("unsupported unit '{unit}' in {property}: {value}")]
    UnsupportedUnit {
        /// Property name.
        property: String,
        /// The unrecognised unit suffix.
        unit: String,
        /// The full raw value.
        value: String,
    },

    /// A keyword that is not valid for the property.
    #[error("unknown keyword '{value}' for {property}")]
    UnknownKeyword {
        /// Property name.
        property: String,
        /// The raw keyword.
        value: String,
    },

    /// A `var()` reference that names no custom property and has no fallback,
    /// or that nests too deeply.
    #[error("unresolved var() in {property}: {value}")]
    UnresolvedVariable {
        /// Property name.
        property: String,
        /// The raw value containing the reference.
        value: String,
    },

    /// The font-metrics provider had no font for the requested family list.
    #[error("no font found for '{families}', using approximate metrics")]
    MissingFont {
        /// The comma-joined family list that was requested.
        families: String,
    },
}

impl Warning {
    /// The engine component that produced this warning, used as a display
    /// prefix (`[trellis CSS]`, `[trellis Text]`).
    #[must_use]
    pub const fn component(&self) -> &'static str {
        match self {
            Self::MissingFont { .. } => "Text",
            _ => "CSS",
        }
    }
}

/// Deduplicating, insertion-ordered warning collector for one layout pass.
///
/// Recording takes `&self` so that read-only style accessors can report
/// problems without threading a mutable reference through every call.
#[derive(Debug, Default)]
pub struct Diagnostics {
    seen: RefCell<HashSet<Warning>>,
    warnings: RefCell<Vec<Warning>>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Repeats of an already-recorded warning are dropped.
    pub fn warn(&self, warning: Warning) {
        if self.seen.borrow_mut().insert(warning.clone()) {
            self.warnings.borrow_mut().push(warning);
        }
    }

    /// Number of distinct warnings recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }

    /// Consume the collector, returning the warnings in first-seen order.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings.into_inner()
    }
}
