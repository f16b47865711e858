//! Header lookup view
//!
//! Requests keep their headers as raw wire lines, order and duplicates
//! preserved. `HeaderView` is an on-demand index over those lines for callers
//! that need specific values; it never mutates or reorders the raw form.

/// Case-insensitive lookup over raw header lines
///
/// Entries borrow from the lines they were parsed out of. Lines without a
/// colon, or with an empty name, stay in the raw form but get no entry here.
#[derive(Debug, Clone)]
pub struct HeaderView<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> HeaderView<'a> {
    /// Build a view over raw `Name: Value` lines
    pub fn parse(lines: &'a [String]) -> Self {
        let entries = lines
            .iter()
            .filter_map(|line| {
                let colon = line.find(':')?;
                let name = line[..colon].trim();
                let value = line[colon + 1..].trim();
                if name.is_empty() {
                    return None;
                }
                Some((name, value))
            })
            .collect();

        HeaderView { entries }
    }

    /// Get the first value for a header (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, v)| v)
    }

    /// Get all values for a header (case-insensitive)
    pub fn get_all(&self, name: &str) -> Vec<&'a str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, v)| v)
            .collect()
    }

    /// Count how many times a header appears
    pub fn count(&self, name: &str) -> usize {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .count()
    }

    /// Check if a header exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries were indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().copied()
    }
}
