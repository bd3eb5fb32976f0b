//! Identifier management using string interning for efficient storage and comparison.
//!
//! This module provides the [`Id`] type used to name scene nodes. Node names
//! follow a dotted scheme (`table.Person.box`), so [`Id::suffixed`] exists to
//! build child names from a parent name.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning.
///
/// Scene nodes are named with `Id`s; comparison is a symbol comparison and
/// the string form is recovered through [`fmt::Display`].
///
/// # Examples
///
/// ```
/// use sigma_core::identifier::Id;
///
/// let table_id = Id::new("table.Person");
/// let box_id = table_id.suffixed("box");
/// assert_eq!(box_id, "table.Person.box");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Creates a dotted child identifier from this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigma_core::identifier::Id;
    ///
    /// let parent = Id::new("table.Person");
    /// assert_eq!(parent.suffixed("name"), "table.Person.name");
    /// ```
    pub fn suffixed(&self, suffix: &str) -> Self {
        Self::new(&format!("{self}.{suffix}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let name = interner.resolve(self.0).unwrap_or("<unknown>");
        write!(f, "{name}")
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        interner.resolve(self.0) == Some(*other)
    }
}
