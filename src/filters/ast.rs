use chrono::NaiveDate;

/// Conversation fields a filter can test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Project id or derived project name (substring), or `standalone`
    Project,
    /// Model slug (substring)
    Model,
    /// Conversation title (substring)
    Title,
    /// Any message content (substring)
    Text,
    /// Created on or after a date (YYYY-MM-DD)
    Since,
    /// Archived flag (true/false)
    Archived,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Project,
        FilterField::Model,
        FilterField::Title,
        FilterField::Text,
        FilterField::Since,
        FilterField::Archived,
    ];

    /// Case-insensitive lookup by field name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Project => "project",
            FilterField::Model => "model",
            FilterField::Title => "title",
            FilterField::Text => "text",
            FilterField::Since => "since",
            FilterField::Archived => "archived",
        }
    }
}

/// Parsed filter value; substring needles are stored lower-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Needle(String),
    Date(NaiveDate),
    Flag(bool),
}

/// Logical operators for combining filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Both conditions must match (default between different fields)
    And,
    /// Either condition matches (default within same field)
    Or,
}

/// Single field:value filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: FilterField,
    pub value: FilterValue,
}

/// Filters joined by operators, evaluated left to right.
///
/// `operators.len()` is always `filters.len() - 1` for a non-empty expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    pub filters: Vec<FieldFilter>,
    pub operators: Vec<FilterOperator>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
