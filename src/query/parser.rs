use crate::error::QueryError;
use crate::index::types::FieldValue;

/// A contiguous window over the ordered result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Validate signed pagination input from a request layer.
    ///
    /// Negative values are rejected rather than clamped.
    pub fn checked(offset: i64, limit: i64) -> Result<Self, QueryError> {
        let offset = usize::try_from(offset).map_err(|_| QueryError::InvalidArgument {
            name: "offset",
            value: offset,
        })?;
        let limit = usize::try_from(limit).map_err(|_| QueryError::InvalidArgument {
            name: "limit",
            value: limit,
        })?;
        Ok(Self { offset, limit })
    }
}

/// A lookup: optional free text, exact-match filters, and a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Free text; records matching any of its terms are kept
    pub phrase: Option<String>,
    /// `(field, value)` pairs, all of which must match, in evaluation order
    pub filters: Vec<(String, FieldValue)>,
    pub page: Page,
}

impl Query {
    pub fn new(page: Page) -> Self {
        Self {
            phrase: None,
            filters: Vec::new(),
            page,
        }
    }

    pub fn phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }
}

/// Parse a `field=value` filter argument.
///
/// The value is taken verbatim (everything after the first `=`) and always
/// as text. An empty field name is malformed; an empty value is allowed.
pub fn parse_filter(arg: &str) -> Result<(String, FieldValue), QueryError> {
    match arg.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), FieldValue::from(value)))
        }
        _ => Err(QueryError::MalformedFilter(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_checked_accepts_non_negative() {
        assert_eq!(Page::checked(0, 20).unwrap(), Page::new(0, 20));
        assert_eq!(Page::checked(40, 0).unwrap(), Page::new(40, 0));
    }

    #[test]
    fn test_page_checked_rejects_negative() {
        assert_eq!(
            Page::checked(-1, 20),
            Err(QueryError::InvalidArgument {
                name: "offset",
                value: -1
            })
        );
        assert_eq!(
            Page::checked(0, -5),
            Err(QueryError::InvalidArgument {
                name: "limit",
                value: -5
            })
        );
    }

    #[test]
    fn test_query_builder() {
        let query = Query::new(Page::new(0, 10))
            .phrase("fir")
            .filter("family", "Pinaceae")
            .filter("plant_type", "Tree");

        assert_eq!(query.phrase.as_deref(), Some("fir"));
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[0].0, "family");
        assert_eq!(query.filters[1].1, FieldValue::from("Tree"));
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("family=Rosaceae").unwrap(),
            ("family".to_string(), FieldValue::from("Rosaceae"))
        );
        assert_eq!(
            parse_filter("usda_hardiness_zone=8-10=a").unwrap(),
            ("usda_hardiness_zone".to_string(), FieldValue::from("8-10=a"))
        );
        assert_eq!(
            parse_filter("family=").unwrap(),
            ("family".to_string(), FieldValue::from(""))
        );
    }

    #[test]
    fn test_parse_filter_malformed() {
        assert!(matches!(
            parse_filter("family"),
            Err(QueryError::MalformedFilter(_))
        ));
        assert!(matches!(
            parse_filter("=Rosaceae"),
            Err(QueryError::MalformedFilter(_))
        ));
    }
}
