//! The persisted entry type and case-insensitive name handling.

/// A single `(name, encrypted secret)` pair in the vault.
///
/// `secret` is the base64 token produced by the cipher, or the empty
/// string sentinel for "no secret".  The name keeps its original
/// spelling on disk; only comparisons are case-folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub secret: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Case-insensitive name match, applied consistently to lookup,
    /// replacement, and uniqueness checks.
    pub fn matches(&self, name: &str) -> bool {
        fold(&self.name) == fold(name)
    }
}

/// Canonical form of a name for comparison.
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_is_case_insensitive() {
        let e = Entry::new("GitHub", "abc");
        assert!(e.matches("github"));
        assert!(e.matches("GITHUB"));
        assert!(!e.matches("gitlab"));
    }

    #[test]
    fn matches_handles_non_ascii() {
        let e = Entry::new("Café", "x");
        assert!(e.matches("café"));
        assert!(e.matches("CAFÉ"));
    }
}
