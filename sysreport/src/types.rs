//! Collected data types

use std::fmt;

/// Single row shown when no supported package manager is installed
pub const NO_MANAGER_MESSAGE: &str = "No supported package manager found";

// ============================================================================
// System Info
// ============================================================================

/// Value of a single system metric
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Text(s) => f.write_str(s),
            InfoValue::Integer(n) => write!(f, "{}", n),
            InfoValue::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for InfoValue {
    fn from(value: String) -> Self {
        InfoValue::Text(value)
    }
}

impl From<&str> for InfoValue {
    fn from(value: &str) -> Self {
        InfoValue::Text(value.to_string())
    }
}

impl From<u64> for InfoValue {
    fn from(value: u64) -> Self {
        InfoValue::Integer(value)
    }
}

impl From<usize> for InfoValue {
    fn from(value: usize) -> Self {
        InfoValue::Integer(value as u64)
    }
}

impl From<f64> for InfoValue {
    fn from(value: f64) -> Self {
        InfoValue::Float(value)
    }
}

/// Ordered metric name -> value mapping
///
/// Built once per run and never mutated afterwards; insertion order is the
/// row order of the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemInfo {
    entries: Vec<(String, InfoValue)>,
}

impl SystemInfo {
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<InfoValue>> FromIterator<(K, V)> for SystemInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Package List
// ============================================================================

/// Result of querying the installed package inventory
#[derive(Debug, Clone, PartialEq)]
pub enum PackageList {
    /// Package names in manager output order
    Installed(Vec<String>),
    /// None of the known managers is present or answered
    NoManager,
    /// Invoking a manager failed at the OS level
    Failed(String),
}

impl PackageList {
    /// Rows as they appear on the packages sheet
    pub fn rows(&self) -> Vec<String> {
        match self {
            PackageList::Installed(names) => names.clone(),
            PackageList::NoManager => vec![NO_MANAGER_MESSAGE.to_string()],
            PackageList::Failed(message) => vec![message.clone()],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PackageList::Installed(names) => names.len(),
            PackageList::NoManager | PackageList::Failed(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
