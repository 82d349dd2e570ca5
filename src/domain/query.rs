//! Query translator
//!
//! Turns the raw query-string parameters of a list request (search keyword,
//! pagination controls, sort specification) plus a resource tag into a
//! structured [`QueryOptions`] descriptor that the repositories execute.
//!
//! Invalid input never fails a request here: unknown sort fields fall back to
//! `createdAt:desc`, non-numeric pagination values fall back to defaults and
//! an unknown resource tag degrades to an empty filter with the base sortable
//! set. Hard failures are reserved for the integrity checks in the services.

use serde::Deserialize;

/// Page size applied when `limit` is absent or unparseable.
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw list-endpoint parameters, exactly as they arrive on the query string.
///
/// Everything is kept as an optional string so that garbage input can degrade
/// to a default instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub page: Option<String>,
    pub order: Option<String>,
    pub pagination: Option<String>,
}

impl ListParams {
    /// Pagination is on unless explicitly disabled with `pagination=false`.
    pub fn paginate(&self) -> bool {
        self.pagination.as_deref() != Some("false")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One validated entry of the `order` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Filter predicate for a list query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Match every record
    #[default]
    All,
    /// Case-insensitive substring match, OR-combined across `fields`
    Search {
        fields: &'static [&'static str],
        term: String,
    },
}

/// The query descriptor consumed verbatim by the repository layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub filter: Filter,
    pub order: Vec<SortKey>,
    pub offset: u64,
    pub limit: u64,
}

/// Per-resource field configuration: which fields the search keyword matches
/// against and which fields are accepted in the `order` parameter.
#[derive(Debug)]
pub struct ResourceFields {
    pub searchable: &'static [&'static str],
    pub sortable: &'static [&'static str],
}

const SECTION_FIELDS: ResourceFields = ResourceFields {
    searchable: &["name", "description"],
    sortable: &["name", "description", "id", "createdAt", "updatedAt"],
};

const BOOK_FIELDS: ResourceFields = ResourceFields {
    searchable: &["title", "author", "summary"],
    sortable: &[
        "title",
        "author",
        "date",
        "summary",
        "copies",
        "id",
        "createdAt",
        "updatedAt",
    ],
};

// Unknown resource tag: nothing searchable, base sort fields only.
const UNKNOWN_FIELDS: ResourceFields = ResourceFields {
    searchable: &[],
    sortable: &["id", "createdAt", "updatedAt"],
};

/// Look up the field configuration for a resource tag.
pub fn resource_fields(tag: &str) -> &'static ResourceFields {
    match tag {
        "sections" => &SECTION_FIELDS,
        "books" => &BOOK_FIELDS,
        _ => &UNKNOWN_FIELDS,
    }
}

/// Build the query descriptor for a list request.
pub fn translate(tag: &str, params: &ListParams) -> QueryOptions {
    let fields = resource_fields(tag);

    let filter = match &params.search {
        Some(term) if !term.is_empty() && !fields.searchable.is_empty() => Filter::Search {
            fields: fields.searchable,
            term: term.clone(),
        },
        _ => Filter::All,
    };

    // Zero is treated as absent, like the original's falsy-coalescing parse
    let limit = parse_number(&params.limit)
        .filter(|v| *v != 0)
        .unwrap_or(DEFAULT_LIMIT);
    let mut offset = parse_number(&params.offset).unwrap_or(0);

    // A 1-based page takes precedence over any explicit offset. Saturate so
    // an absurd page number clamps instead of overflowing.
    if let Some(page) = parse_number(&params.page) {
        if page >= 1 {
            offset = limit.saturating_mul(page - 1);
        }
    }

    let order = match params.order.as_deref() {
        Some(raw) if !raw.is_empty() => build_order(fields, raw),
        _ => Vec::new(),
    };

    QueryOptions {
        filter,
        order,
        offset,
        limit,
    }
}

fn parse_number(value: &Option<String>) -> Option<u64> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

fn build_order(fields: &'static ResourceFields, raw: &str) -> Vec<SortKey> {
    raw.split(',')
        .map(|entry| {
            let mut parts = entry.split(':');
            let field = parts.next().unwrap_or("").trim();
            let direction = match parts.next().map(str::trim) {
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
            match fields.sortable.iter().find(|f| **f == field) {
                Some(field) => SortKey { field, direction },
                // Unknown field degrades to the default ordering entry.
                None => SortKey {
                    field: "createdAt",
                    direction: SortDirection::Desc,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        let mut p = ListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "search" => p.search = value,
                "limit" => p.limit = value,
                "offset" => p.offset = value,
                "page" => p.page = value,
                "order" => p.order = value,
                "pagination" => p.pagination = value,
                other => panic!("unknown param {}", other),
            }
        }
        p
    }

    #[test]
    fn defaults_when_no_params() {
        let opts = translate("sections", &ListParams::default());
        assert_eq!(opts.filter, Filter::All);
        assert!(opts.order.is_empty());
        assert_eq!(opts.offset, 0);
        assert_eq!(opts.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn search_uses_resource_fields() {
        let opts = translate("sections", &params(&[("search", "Fic")]));
        match opts.filter {
            Filter::Search { fields, term } => {
                assert_eq!(fields, &["name", "description"]);
                assert_eq!(term, "Fic");
            }
            other => panic!("expected search filter, got {:?}", other),
        }

        let opts = translate("books", &params(&[("search", "gatsby")]));
        match opts.filter {
            Filter::Search { fields, .. } => assert_eq!(fields, &["title", "author", "summary"]),
            other => panic!("expected search filter, got {:?}", other),
        }
    }

    #[test]
    fn unknown_resource_has_empty_filter_and_base_sort_fields() {
        let opts = translate("loans", &params(&[("search", "x"), ("order", "name:asc")]));
        assert_eq!(opts.filter, Filter::All);
        // `name` is not sortable for an unknown resource
        assert_eq!(
            opts.order,
            vec![SortKey {
                field: "createdAt",
                direction: SortDirection::Desc,
            }]
        );

        let opts = translate("loans", &params(&[("order", "updatedAt:desc")]));
        assert_eq!(
            opts.order,
            vec![SortKey {
                field: "updatedAt",
                direction: SortDirection::Desc,
            }]
        );
    }

    #[test]
    fn invalid_sort_field_falls_back_to_created_at_desc() {
        let opts = translate("books", &params(&[("order", "price:asc,title:desc")]));
        assert_eq!(
            opts.order,
            vec![
                SortKey {
                    field: "createdAt",
                    direction: SortDirection::Desc,
                },
                SortKey {
                    field: "title",
                    direction: SortDirection::Desc,
                },
            ]
        );
    }

    #[test]
    fn missing_direction_sorts_ascending() {
        let opts = translate("sections", &params(&[("order", "name")]));
        assert_eq!(
            opts.order,
            vec![SortKey {
                field: "name",
                direction: SortDirection::Asc,
            }]
        );
    }

    #[test]
    fn page_overrides_offset() {
        let opts = translate(
            "books",
            &params(&[("page", "3"), ("limit", "10"), ("offset", "55")]),
        );
        assert_eq!(opts.offset, 20);
        assert_eq!(opts.limit, 10);
    }

    #[test]
    fn page_zero_keeps_explicit_offset() {
        let opts = translate("books", &params(&[("page", "0"), ("offset", "5")]));
        assert_eq!(opts.offset, 5);
    }

    #[test]
    fn huge_page_number_saturates_instead_of_overflowing() {
        let opts = translate(
            "books",
            &params(&[("page", &u64::MAX.to_string()), ("limit", "10")]),
        );
        assert_eq!(opts.offset, u64::MAX);
        assert_eq!(opts.limit, 10);
    }

    #[test]
    fn zero_limit_degrades_to_default() {
        let opts = translate("books", &params(&[("limit", "0")]));
        assert_eq!(opts.limit, DEFAULT_LIMIT);

        // A zero limit still backs the page calculation with the default
        let opts = translate("books", &params(&[("limit", "0"), ("page", "3")]));
        assert_eq!(opts.limit, DEFAULT_LIMIT);
        assert_eq!(opts.offset, 2 * DEFAULT_LIMIT);
    }

    #[test]
    fn non_numeric_values_degrade_to_defaults() {
        let opts = translate(
            "sections",
            &params(&[("limit", "lots"), ("offset", "-3"), ("page", "first")]),
        );
        assert_eq!(opts.limit, DEFAULT_LIMIT);
        assert_eq!(opts.offset, 0);
    }

    #[test]
    fn empty_order_yields_empty_sort_list() {
        let opts = translate("sections", &params(&[("order", "")]));
        assert!(opts.order.is_empty());
    }

    #[test]
    fn pagination_flag() {
        assert!(ListParams::default().paginate());
        assert!(!params(&[("pagination", "false")]).paginate());
        // Anything other than the literal "false" keeps pagination on
        assert!(params(&[("pagination", "0")]).paginate());
    }
}
