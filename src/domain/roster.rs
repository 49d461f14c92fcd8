//! The allow-list of participants.
//!
//! [`Roster`] is built once at startup from configuration and shared
//! read-only for the lifetime of the process.

use std::collections::HashSet;

/// Names permitted to register, in configuration order.
///
/// Construction trims each name, drops empty entries and removes
/// duplicates (first occurrence wins). Lookups are exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// The allow-list used when none is configured.
    pub const DEFAULT_NAMES: [&'static str; 5] =
        ["Omar", "Abdullah", "Salman", "Mohammed", "Aroob"];

    /// Builds a roster from any iterator of names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .filter(|n| seen.insert(n.clone()))
            .collect();
        Self { names }
    }

    /// Parses a comma-separated list such as `"Omar, Salman,Aroob"`.
    #[must_use]
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Returns `true` if `name` may register.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns the allowed names in configuration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of allowed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names are allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names that `registrant` could still be assigned: every allowed
    /// name that is neither in `assigned` nor the registrant itself.
    #[must_use]
    pub fn available_receivers<'a, I>(&self, registrant: &str, assigned: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let assigned: HashSet<&str> = assigned.into_iter().collect();
        self.names
            .iter()
            .filter(|n| n.as_str() != registrant && !assigned.contains(n.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_five_names() {
        let roster = Roster::default();
        assert_eq!(roster.len(), 5);
        assert!(roster.contains("Omar"));
        assert!(roster.contains("Aroob"));
        assert!(!roster.contains("Zaid"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let roster = Roster::default();
        assert!(!roster.contains("omar"));
        assert!(!roster.contains(" Omar"));
    }

    #[test]
    fn from_csv_trims_and_deduplicates() {
        let roster = Roster::from_csv(" Omar, Salman ,,Omar,Aroob ");
        assert_eq!(roster.names(), ["Omar", "Salman", "Aroob"]);
    }

    #[test]
    fn empty_csv_yields_empty_roster() {
        assert!(Roster::from_csv(" , ,").is_empty());
    }

    #[test]
    fn available_receivers_excludes_self_and_assigned() {
        let roster = Roster::default();
        let available = roster.available_receivers("Omar", ["Salman", "Aroob"]);
        assert_eq!(available, ["Abdullah", "Mohammed"]);
    }

    #[test]
    fn available_receivers_can_be_empty() {
        let roster = Roster::new(["Omar", "Salman"]);
        assert!(roster.available_receivers("Omar", ["Salman"]).is_empty());
    }
}
