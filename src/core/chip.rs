//! # Chips and Pools
//!
//! The value types every other module passes around.
//!
//! ```text
//! Chip
//! ├── label: String
//! └── kind: ChipKind
//!     ├── Condition(Condition)   // AND, OR, (, )   unbounded supply
//!     └── Identifier             // arbitrary label, unique system-wide
//! ```
//!
//! Identifiers live in exactly one place at a time: the sequence being built
//! or the [`IdentifierPool`]. Conditions are synthesized on demand and simply
//! dropped when removed, so they never enter a pool.

use std::fmt;

/// The closed set of condition symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    And,
    Or,
    Open,
    Close,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::And,
        Condition::Or,
        Condition::Open,
        Condition::Close,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Condition::And => "AND",
            Condition::Or => "OR",
            Condition::Open => "(",
            Condition::Close => ")",
        }
    }

    /// Parse a condition symbol. Matching is exact: `and` is an identifier.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AND" => Some(Condition::And),
            "OR" => Some(Condition::Or),
            "(" => Some(Condition::Open),
            ")" => Some(Condition::Close),
            _ => None,
        }
    }
}

/// Grammar class of a token, as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Open,
    Close,
    Op,
    Id,
}

impl TokenClass {
    /// Classify a raw label. Anything that is not a condition symbol is an identifier.
    pub fn of(label: &str) -> Self {
        match Condition::from_label(label) {
            Some(Condition::And | Condition::Or) => TokenClass::Op,
            Some(Condition::Open) => TokenClass::Open,
            Some(Condition::Close) => TokenClass::Close,
            None => TokenClass::Id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipKind {
    Condition(Condition),
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chip {
    pub label: String,
    pub kind: ChipKind,
}

impl Chip {
    pub fn identifier(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ChipKind::Identifier,
        }
    }

    pub fn condition(condition: Condition) -> Self {
        Self {
            label: condition.label().to_string(),
            kind: ChipKind::Condition(condition),
        }
    }

    /// Build a chip from a label, treating the four condition symbols as conditions.
    pub fn from_label(label: &str) -> Self {
        match Condition::from_label(label) {
            Some(condition) => Self::condition(condition),
            None => Self::identifier(label),
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == ChipKind::Identifier
    }

    pub fn class(&self) -> TokenClass {
        TokenClass::of(&self.label)
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Identifier chips that are available to be added to the sequence.
///
/// Keeps insertion order so chips returned from the sequence show up at the
/// end of the palette. Labels are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierPool {
    chips: Vec<Chip>,
}

impl IdentifierPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from labels, dropping duplicates and condition symbols.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = Self::new();
        for label in labels {
            let chip = Chip::from_label(label.as_ref());
            if chip.is_identifier() {
                pool.insert(chip);
            }
        }
        pool
    }

    pub fn contains(&self, label: &str) -> bool {
        self.chips.iter().any(|c| c.label == label)
    }

    /// Add an identifier to the end of the pool.
    ///
    /// Returns `false` (and leaves the pool alone) for conditions and for
    /// labels already present.
    pub fn insert(&mut self, chip: Chip) -> bool {
        if !chip.is_identifier() || self.contains(&chip.label) {
            return false;
        }
        self.chips.push(chip);
        true
    }

    /// Remove and return the identifier with the given label.
    pub fn take(&mut self, label: &str) -> Option<Chip> {
        let index = self.chips.iter().position(|c| c.label == label)?;
        Some(self.chips.remove(index))
    }

    /// Case-insensitive substring filter for the palette search box.
    /// A blank query matches everything.
    pub fn matching<'a>(&'a self, query: &str) -> Vec<&'a Chip> {
        let needle = query.trim().to_lowercase();
        self.chips
            .iter()
            .filter(|c| needle.is_empty() || c.label.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chip> {
        self.chips.iter()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}
