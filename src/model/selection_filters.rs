use crate::error::Result;
use crate::model::boot_source_selection::{check_not_empty, Field};

/// The glob pattern matching everything. An omitted filter resolves to the
/// single-element list `["*"]`; an empty list is never valid.
pub const WILDCARD: &str = "*";

/// Optional pattern filters for creating a selection. Whatever is left
/// unset imports everything for that dimension.
///
/// ```
/// use maas_client::SelectionFilters;
///
/// let filters = SelectionFilters::new()
///     .with_arches(["amd64", "arm64"])
///     .with_labels(["release"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionFilters {
    /// Architecture glob patterns, e.g. "amd64".
    pub arches: Option<Vec<String>>,
    /// Subarchitecture glob patterns, e.g. "hwe-20.04".
    pub subarches: Option<Vec<String>>,
    /// Label glob patterns, e.g. "release" or "daily".
    pub labels: Option<Vec<String>>,
}

impl SelectionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arches<I, S>(mut self, arches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arches = Some(arches.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_subarches<I, S>(mut self, subarches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subarches = Some(subarches.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Turn the filters into the concrete lists sent to the service:
    /// `None` becomes `["*"]`, an explicitly supplied list must be
    /// non-empty.
    pub(crate) fn resolve(self) -> Result<(Vec<String>, Vec<String>, Vec<String>)> {
        let arches = resolve_one(Field::Arches, self.arches)?;
        let subarches = resolve_one(Field::Subarches, self.subarches)?;
        let labels = resolve_one(Field::Labels, self.labels)?;
        Ok((arches, subarches, labels))
    }
}

fn resolve_one(field: Field, filter: Option<Vec<String>>) -> Result<Vec<String>> {
    match filter {
        None => Ok(vec![WILDCARD.to_string()]),
        Some(items) => {
            check_not_empty(field, &items)?;
            Ok(items)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_unset_filters_resolve_to_the_wildcard() {
        let (arches, subarches, labels) = SelectionFilters::new().resolve().unwrap();
        assert_eq!(arches, vec![WILDCARD.to_string()]);
        assert_eq!(subarches, vec![WILDCARD.to_string()]);
        assert_eq!(labels, vec![WILDCARD.to_string()]);
    }

    #[test]
    fn test_explicit_filters_pass_through() {
        let filters = SelectionFilters::new()
            .with_arches(["amd64", "arm64"])
            .with_subarches(["hwe-20.04"]);
        let (arches, subarches, labels) = filters.resolve().unwrap();
        assert_eq!(arches, vec!["amd64".to_string(), "arm64".to_string()]);
        assert_eq!(subarches, vec!["hwe-20.04".to_string()]);
        assert_eq!(labels, vec![WILDCARD.to_string()]);
    }

    #[test]
    fn test_explicit_empty_lists_are_rejected() {
        let filters = SelectionFilters::new().with_labels(Vec::<String>::new());
        let err = filters.resolve().unwrap_err();
        assert!(matches!(
            err,
            Error::TypeValidation {
                field: "labels",
                ..
            }
        ));
    }
}
