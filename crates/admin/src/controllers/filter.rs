//! Search term plus facet filtering over a loaded collection.

use super::Resource;

/// The sentinel facet value meaning "no constraint".
pub const ALL: &str = "all";

/// One facet constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Is(String),
}

impl Facet {
    /// Parse a select-box value; `all` (any case) and blanks mean no constraint.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Is(value.to_owned())
        }
    }
}

/// A search term and any number of facet constraints.
///
/// ```
/// use selam_admin::controllers::ListFilter;
///
/// let filter = ListFilter::new().term("engineer").facet("status", "published");
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    term: String,
    facets: Vec<(String, Facet)>,
}

impl ListFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term. Matching is case-insensitive.
    #[must_use]
    pub fn term(mut self, term: &str) -> Self {
        self.term = term.trim().to_lowercase();
        self
    }

    /// Constrain `key` to `value`. Setting a facet twice keeps the last value.
    #[must_use]
    pub fn facet(mut self, key: &str, value: &str) -> Self {
        let facet = Facet::parse(value);
        if let Some(slot) = self.facets.iter_mut().find(|(k, _)| k == key) {
            slot.1 = facet;
        } else {
            self.facets.push((key.to_owned(), facet));
        }
        self
    }

    /// Whether the filter accepts everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.facets.iter().all(|(_, f)| *f == Facet::All)
    }

    /// Whether `record` passes the term and every facet.
    #[must_use]
    pub fn matches<R: Resource>(&self, record: &R) -> bool {
        let term_ok = self.term.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.term));

        term_ok
            && self.facets.iter().all(|(key, facet)| match facet {
                Facet::All => true,
                Facet::Is(wanted) => record
                    .facet(key)
                    .is_some_and(|actual| actual.eq_ignore_ascii_case(wanted)),
            })
    }

    /// Records passing the filter, in collection order.
    #[must_use]
    pub fn apply<'a, R: Resource>(&self, records: &'a [R]) -> Vec<&'a R> {
        if self.is_empty() {
            return records.iter().collect();
        }
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_parse() {
        assert_eq!(Facet::parse("all"), Facet::All);
        assert_eq!(Facet::parse("ALL"), Facet::All);
        assert_eq!(Facet::parse(" "), Facet::All);
        assert_eq!(Facet::parse("draft"), Facet::Is("draft".to_string()));
    }

    #[test]
    fn test_setting_facet_twice_replaces() {
        let filter = ListFilter::new()
            .facet("status", "draft")
            .facet("status", "all");
        assert!(filter.is_empty());
    }
}
