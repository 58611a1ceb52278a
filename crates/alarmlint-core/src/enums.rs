//! Enum value resolution
//!
//! C enumerators without an explicit initializer take the previous value
//! plus one, starting from zero. This module resolves a declaration-order
//! sequence of raw enumerators into an [`EnumModel`] with every value made
//! explicit.

use std::path::PathBuf;

/// A source position in the alarm header (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File the declaration came from
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// An enumerator as it appears in the header, before value resolution.
///
/// `literal` is `Some` only when the declaration carries an explicit
/// integer constant initializer.
#[derive(Debug, Clone)]
pub struct RawEnumerator {
    /// Enumerator name
    pub name: String,
    /// Explicit integer initializer, if any
    pub literal: Option<i64>,
    /// Where the enumerator is declared
    pub location: SourceLocation,
}

/// An enumerator with its resolved integer value.
#[derive(Debug, Clone)]
pub struct Enumerator {
    /// Enumerator name
    pub name: String,
    /// Resolved value
    pub value: i64,
    /// Where the enumerator is declared
    pub location: SourceLocation,
}

/// One parsed `typedef enum` from the header: the typedef name plus the
/// ordered sequence of enumerators with resolved values.
///
/// Immutable once built; names are unique within one enum (the C compiler
/// enforces this on the input, so it is not re-checked here).
#[derive(Debug, Clone)]
pub struct EnumModel {
    /// The typedef name of the enum
    pub name: String,
    /// Enumerators in declaration order
    pub enumerators: Vec<Enumerator>,
}

impl EnumModel {
    /// Resolve raw enumerators into an `EnumModel` by folding C's
    /// auto-increment rule over the declaration order: an explicit literal
    /// resets the running counter, every enumerator records the counter,
    /// and the counter advances by one either way.
    pub fn resolve(name: impl Into<String>, raw: Vec<RawEnumerator>) -> Self {
        let enumerators = raw
            .into_iter()
            .scan(0i64, |counter, e| {
                if let Some(v) = e.literal {
                    *counter = v;
                }
                let value = *counter;
                *counter += 1;
                Some(Enumerator {
                    name: e.name,
                    value,
                    location: e.location,
                })
            })
            .collect();

        EnumModel {
            name: name.into(),
            enumerators,
        }
    }

    /// Number of enumerators
    pub fn len(&self) -> usize {
        self.enumerators.len()
    }

    /// Whether the enum has no enumerators
    pub fn is_empty(&self) -> bool {
        self.enumerators.is_empty()
    }
}
