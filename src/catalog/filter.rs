//! Filter State
//!
//! Every user-controlled catalog parameter plus its URL query string form.
//! Only non-default fields are serialized, always in `FilterField::ALL` order.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::FilterError;
use crate::models::{CategoryId, StoreStatus};

/// Characters escaped in query string values (everything but unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Literal used for the "starts with a digit" alphabet bucket
pub const DIGITS_MARKER: &str = "0-9";

/// Sort order of the store list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    #[default]
    Default,
    NameAsc,
    NameDesc,
    Popular,
    /// Cashback stores only, highest percent first
    Cashback,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Popular,
        SortOption::Cashback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::Popular => "popular",
            SortOption::Cashback => "cashback",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|opt| opt.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Default => "Sort: Default",
            SortOption::NameAsc => "Sort: Name (A-Z)",
            SortOption::NameDesc => "Sort: Name (Z-A)",
            SortOption::Popular => "Sort: Most Popular",
            SortOption::Cashback => "Sort: Highest Cashback",
        }
    }
}

/// First-character filter on store names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlphaFilter {
    /// Uppercase ASCII letter
    Letter(char),
    /// Any decimal digit
    Digits,
}

impl AlphaFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s == DIGITS_MARKER {
            return Some(AlphaFilter::Digits);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(AlphaFilter::Letter(c.to_ascii_uppercase())),
            _ => None,
        }
    }

    /// Query string / button value
    pub fn as_value(&self) -> String {
        match self {
            AlphaFilter::Letter(c) => c.to_string(),
            AlphaFilter::Digits => DIGITS_MARKER.to_string(),
        }
    }

    /// Anchored pattern sent as a `name_like` constraint
    pub fn name_pattern(&self) -> String {
        match self {
            AlphaFilter::Letter(c) => format!("^{}", c),
            AlphaFilter::Digits => "^[0-9]".to_string(),
        }
    }

    /// Same test the pattern expresses, applied locally
    #[cfg(test)]
    pub fn matches(&self, name: &str) -> bool {
        let Some(first) = name.chars().next() else {
            return false;
        };
        match self {
            AlphaFilter::Letter(c) => first.to_ascii_uppercase() == *c,
            AlphaFilter::Digits => first.is_ascii_digit(),
        }
    }

    /// Buttons in display order: digits bucket then A-Z
    pub fn all() -> Vec<AlphaFilter> {
        std::iter::once(AlphaFilter::Digits)
            .chain(('A'..='Z').map(AlphaFilter::Letter))
            .collect()
    }
}

/// Names of the serialized filter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Sort,
    Category,
    Alpha,
    Status,
    Cashback,
    Promoted,
    Shareable,
    Bookmarked,
    Search,
}

impl FilterField {
    /// Serialization order
    pub const ALL: [FilterField; 9] = [
        FilterField::Sort,
        FilterField::Category,
        FilterField::Alpha,
        FilterField::Status,
        FilterField::Cashback,
        FilterField::Promoted,
        FilterField::Shareable,
        FilterField::Bookmarked,
        FilterField::Search,
    ];

    /// Query string key
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Sort => "sort",
            FilterField::Category => "category",
            FilterField::Alpha => "alpha",
            FilterField::Status => "status",
            FilterField::Cashback => "cashback",
            FilterField::Promoted => "promoted",
            FilterField::Shareable => "shareable",
            FilterField::Bookmarked => "bookmarked",
            FilterField::Search => "search",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// A single field change
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Sort(SortOption),
    Category(Option<CategoryId>),
    Alpha(Option<AlphaFilter>),
    Status(Option<StoreStatus>),
    CashbackOnly(bool),
    PromotedOnly(bool),
    ShareableOnly(bool),
    BookmarkedOnly(bool),
    Search(String),
}

impl FilterUpdate {
    /// Build an update from a field key and raw value.
    /// An empty value resets the field to its default.
    pub fn parse(field: &str, value: &str) -> Result<Self, FilterError> {
        let field = FilterField::parse(field).ok_or_else(|| FilterError::UnknownField(field.to_string()))?;
        let invalid = || FilterError::InvalidValue {
            field: field.key(),
            value: value.to_string(),
        };

        let update = match field {
            FilterField::Sort if value.is_empty() => FilterUpdate::Sort(SortOption::Default),
            FilterField::Sort => FilterUpdate::Sort(SortOption::parse(value).ok_or_else(invalid)?),
            FilterField::Category if value.is_empty() => FilterUpdate::Category(None),
            FilterField::Category => FilterUpdate::Category(Some(value.parse().map_err(|_| invalid())?)),
            FilterField::Alpha if value.is_empty() => FilterUpdate::Alpha(None),
            FilterField::Alpha => FilterUpdate::Alpha(Some(AlphaFilter::parse(value).ok_or_else(invalid)?)),
            FilterField::Status if value.is_empty() => FilterUpdate::Status(None),
            FilterField::Status => FilterUpdate::Status(Some(StoreStatus::parse(value).ok_or_else(invalid)?)),
            FilterField::Cashback => FilterUpdate::CashbackOnly(parse_bool(value).ok_or_else(invalid)?),
            FilterField::Promoted => FilterUpdate::PromotedOnly(parse_bool(value).ok_or_else(invalid)?),
            FilterField::Shareable => FilterUpdate::ShareableOnly(parse_bool(value).ok_or_else(invalid)?),
            FilterField::Bookmarked => FilterUpdate::BookmarkedOnly(parse_bool(value).ok_or_else(invalid)?),
            FilterField::Search => FilterUpdate::Search(value.to_string()),
        };
        Ok(update)
    }

    #[cfg(test)]
    pub fn field(&self) -> FilterField {
        match self {
            FilterUpdate::Sort(_) => FilterField::Sort,
            FilterUpdate::Category(_) => FilterField::Category,
            FilterUpdate::Alpha(_) => FilterField::Alpha,
            FilterUpdate::Status(_) => FilterField::Status,
            FilterUpdate::CashbackOnly(_) => FilterField::Cashback,
            FilterUpdate::PromotedOnly(_) => FilterField::Promoted,
            FilterUpdate::ShareableOnly(_) => FilterField::Shareable,
            FilterUpdate::BookmarkedOnly(_) => FilterField::Bookmarked,
            FilterUpdate::Search(_) => FilterField::Search,
        }
    }
}

/// Current values of all catalog controls
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub sort: SortOption,
    pub category: Option<CategoryId>,
    pub alpha: Option<AlphaFilter>,
    pub status: Option<StoreStatus>,
    pub cashback_only: bool,
    pub promoted_only: bool,
    pub shareable_only: bool,
    pub bookmarked_only: bool,
    pub search: String,
    /// 1-based page of the most recent request; not serialized
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            sort: SortOption::Default,
            category: None,
            alpha: None,
            status: None,
            cashback_only: false,
            promoted_only: false,
            shareable_only: false,
            bookmarked_only: false,
            search: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Apply one field change; always restarts at page 1
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Sort(sort) => self.sort = sort,
            FilterUpdate::Category(category) => self.category = category,
            FilterUpdate::Alpha(alpha) => self.alpha = alpha,
            FilterUpdate::Status(status) => self.status = status,
            FilterUpdate::CashbackOnly(on) => self.cashback_only = on,
            FilterUpdate::PromotedOnly(on) => self.promoted_only = on,
            FilterUpdate::ShareableOnly(on) => self.shareable_only = on,
            FilterUpdate::BookmarkedOnly(on) => self.bookmarked_only = on,
            FilterUpdate::Search(term) => self.search = term,
        }
        self.page = 1;
    }

    /// True when no control differs from its default
    pub fn is_default(&self) -> bool {
        self.serialized_pairs().is_empty()
    }

    /// Serialized value of a field, None when at default
    fn field_value(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::Sort => (self.sort != SortOption::Default).then(|| self.sort.as_str().to_string()),
            FilterField::Category => self.category.map(|id| id.to_string()),
            FilterField::Alpha => self.alpha.map(|alpha| alpha.as_value()),
            FilterField::Status => self.status.map(|status| status.as_str().to_string()),
            FilterField::Cashback => self.cashback_only.then(|| "1".to_string()),
            FilterField::Promoted => self.promoted_only.then(|| "1".to_string()),
            FilterField::Shareable => self.shareable_only.then(|| "1".to_string()),
            FilterField::Bookmarked => self.bookmarked_only.then(|| "1".to_string()),
            FilterField::Search => (!self.search.is_empty()).then(|| self.search.clone()),
        }
    }

    fn serialized_pairs(&self) -> Vec<(&'static str, String)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| self.field_value(field).map(|value| (field.key(), value)))
            .collect()
    }

    /// Minimal query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.serialized_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(&value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a query string, with or without `?`.
    /// Unknown keys are ignored; bad values leave the field at its default.
    pub fn from_query_string(qs: &str) -> Self {
        let mut state = Self::default();
        let qs = qs.strip_prefix('?').unwrap_or(qs);

        for pair in qs.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);
            if let Ok(update) = FilterUpdate::parse(&key, &value) {
                state.apply(update);
            }
        }
        state
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" => Some(true),
        "" | "0" | "false" => Some(false),
        _ => None,
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
