//! Category registry model
//!
//! Categories are plain, case-sensitive names kept in insertion order. The
//! registry is a pure value: persistence is handled by the storage layer and
//! orchestration by `CategoryService`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The categories a fresh installation starts with
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Healthcare",
    "Education",
    "Other",
];

/// Maximum length of a category name, in bytes
pub const MAX_NAME_LEN: usize = 50;

/// The ordered set of category names
///
/// Persisted as a plain JSON array. Duplicates in stored data are dropped on
/// load, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::from_names(DEFAULT_CATEGORIES)
    }
}

impl CategoryRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Create a registry from names, keeping the first occurrence of duplicates
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::empty();
        for name in names {
            registry.add(name);
        }
        registry
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append a category; a name already present is left alone
    ///
    /// Returns `true` if the name was inserted.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Rename a category in place, preserving its position
    ///
    /// Returns `Ok(false)` when nothing changed: `old` is not present or
    /// `old == new`. Renaming onto another existing category is rejected.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<bool, CategoryValidationError> {
        if old == new || !self.contains(old) {
            return Ok(false);
        }
        if self.contains(new) {
            return Err(CategoryValidationError::DuplicateName(new.to_string()));
        }

        for name in self.names.iter_mut().filter(|n| n.as_str() == old) {
            *name = new.to_string();
        }
        Ok(true)
    }

    /// Remove every occurrence of `name`
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }
}

impl From<Vec<String>> for CategoryRegistry {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<CategoryRegistry> for Vec<String> {
    fn from(registry: CategoryRegistry) -> Self {
        registry.names
    }
}

impl<'a> IntoIterator for &'a CategoryRegistry {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Check whether `name` is one of the built-in default categories
pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name)
}

/// Trim and validate a user-supplied category name
pub fn normalize_name(name: &str) -> Result<&str, CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(name.len()));
    }
    Ok(name)
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    DuplicateName(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::DuplicateName(name) => write!(f, "Category '{}' already exists", name),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
