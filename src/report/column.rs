use std::fmt;
use std::str::FromStr;

/// How a column's values are typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Data,
    Currency,
    /// Reference to another record type, e.g. `Link/Employee`
    Link(String),
}

/// A report column, written in the compact `Label:Type:Width` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub field_type: FieldType,
    pub width: Option<u32>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColumnError {
    #[error("column spec has no label: '{0}'")]
    MissingLabel(String),
    #[error("invalid column width '{width}' in '{spec}'")]
    InvalidWidth { spec: String, width: String },
}

impl Column {
    pub fn new(label: &str, field_type: FieldType) -> Self {
        Column {
            label: label.to_string(),
            field_type,
            width: None,
        }
    }

    pub fn is_currency(&self) -> bool {
        self.field_type == FieldType::Currency
    }
}

impl FromStr for Column {
    type Err = ColumnError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parts = spec.splitn(3, ':');
        let label = parts.next().unwrap_or_default().trim();
        if label.is_empty() {
            return Err(ColumnError::MissingLabel(spec.to_string()));
        }
        let field_type = match parts.next().unwrap_or_default().trim() {
            "Currency" => FieldType::Currency,
            other => match other.strip_prefix("Link/") {
                Some(target) => FieldType::Link(target.to_string()),
                None => FieldType::Data,
            },
        };
        let width = match parts.next().map(str::trim).filter(|w| !w.is_empty()) {
            Some(w) => Some(w.parse().map_err(|_| ColumnError::InvalidWidth {
                spec: spec.to_string(),
                width: w.to_string(),
            })?),
            None => None,
        };
        Ok(Column {
            label: label.to_string(),
            field_type,
            width,
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field_type = match &self.field_type {
            FieldType::Data => String::new(),
            FieldType::Currency => "Currency".to_string(),
            FieldType::Link(target) => format!("Link/{}", target),
        };
        let width = self.width.map(|w| w.to_string()).unwrap_or_default();
        write!(f, "{}:{}:{}", self.label, field_type, width)
    }
}

const COMPARISON_COLUMNS: &[&str] = &[
    "Employee:Link/Employee:120",
    "Employee Name::160",
    "Company:Link/Company:140",
    "Tax (Old):Currency:120",
    "Tax (New):Currency:120",
    "Difference (Old - New):Currency:120",
    "Recommended::120",
];

/// Columns of the tax regime comparison report
pub fn comparison_columns() -> Vec<Column> {
    COMPARISON_COLUMNS
        .iter()
        .filter_map(|spec| spec.parse().ok())
        .collect()
}
