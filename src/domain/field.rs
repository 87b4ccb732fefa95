//! Field Entity
//!
//! A board column. Built-in columns read task attributes directly; user-added
//! columns read `Task::custom_values` through their accessor key, so there is a
//! single accessor model for header, rows and layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::FieldId;

/// Column width in layout units, rendered as a grid track size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnWidth {
    /// Share of the remaining space (`1fr`)
    Fraction(u16),
    /// Fixed size (`150px`)
    Fixed(u16),
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Fraction(n) => write!(f, "{}fr", n),
            ColumnWidth::Fixed(n) => write!(f, "{}px", n),
        }
    }
}

impl FromStr for ColumnWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |digits: &str| {
            digits
                .parse::<u16>()
                .map_err(|e| format!("invalid column width '{}': {}", s, e))
        };
        if let Some(digits) = s.strip_suffix("fr") {
            Ok(ColumnWidth::Fraction(parse(digits)?))
        } else if let Some(digits) = s.strip_suffix("px") {
            Ok(ColumnWidth::Fixed(parse(digits)?))
        } else {
            Err(format!("invalid column width '{}': expected <n>fr or <n>px", s))
        }
    }
}

impl TryFrom<String> for ColumnWidth {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColumnWidth> for String {
    fn from(width: ColumnWidth) -> Self {
        width.to_string()
    }
}

/// Value kind of a user-added column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Date,
    User,
    Project,
}

/// Which task attribute a column shows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "accessor", rename_all = "snake_case")]
pub enum FieldAccessor {
    Title,
    DueDate,
    Collaborators,
    Project,
    Visibility,
    Custom { key: String, kind: FieldKind },
}

impl FieldAccessor {
    /// Stable key, matching the task attribute or custom value key
    pub fn key(&self) -> &str {
        match self {
            FieldAccessor::Title => "title",
            FieldAccessor::DueDate => "due_date",
            FieldAccessor::Collaborators => "collaborators",
            FieldAccessor::Project => "project",
            FieldAccessor::Visibility => "is_private",
            FieldAccessor::Custom { key, .. } => key,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, FieldAccessor::Custom { .. })
    }
}

/// Derive an accessor key from a display name: lower-cased, trimmed, and
/// each whitespace run collapsed to a single underscore. Edge whitespace never
/// reaches the key, so `" Foo"` and `"Foo"` read the same custom value.
pub fn accessor_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Unique identifier
    pub id: FieldId,
    /// Header label
    pub name: String,
    pub enabled: bool,
    /// Fixed at creation; never changes when toggling
    pub order_position: u32,
    pub width: ColumnWidth,
    pub accessor: FieldAccessor,
}

impl Field {
    pub fn new(
        id: FieldId,
        name: impl Into<String>,
        order_position: u32,
        width: ColumnWidth,
        accessor: FieldAccessor,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            order_position,
            width,
            accessor,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            enabled: !self.enabled,
            ..self.clone()
        }
    }
}

impl Entity for Field {
    type Id = FieldId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width_display_and_parse() {
        assert_eq!(ColumnWidth::Fraction(1).to_string(), "1fr");
        assert_eq!(ColumnWidth::Fixed(150).to_string(), "150px");
        assert_eq!("24px".parse::<ColumnWidth>(), Ok(ColumnWidth::Fixed(24)));
        assert_eq!(" 2fr ".parse::<ColumnWidth>(), Ok(ColumnWidth::Fraction(2)));
        assert!("wide".parse::<ColumnWidth>().is_err());
        assert!("-3px".parse::<ColumnWidth>().is_err());
    }

    #[test]
    fn test_column_width_serde_uses_track_string() {
        let json = serde_json::to_string(&ColumnWidth::Fixed(100)).unwrap();
        assert_eq!(json, "\"100px\"");
        let width: ColumnWidth = serde_json::from_str("\"1fr\"").unwrap();
        assert_eq!(width, ColumnWidth::Fraction(1));
    }

    #[test]
    fn test_accessor_key_normalization() {
        assert_eq!(accessor_key("Story Points"), "story_points");
        assert_eq!(accessor_key("  Due   next\tweek "), "due_next_week");
        assert_eq!(accessor_key("Owner"), "owner");
    }

    #[test]
    fn test_builtin_accessor_keys() {
        assert_eq!(FieldAccessor::Title.key(), "title");
        assert_eq!(FieldAccessor::Visibility.key(), "is_private");
        let custom = FieldAccessor::Custom {
            key: "story_points".into(),
            kind: FieldKind::Text,
        };
        assert_eq!(custom.key(), "story_points");
        assert!(custom.is_custom());
    }

    #[test]
    fn test_toggle_keeps_position() {
        let field = Field::new(
            FieldId::new("dueDate"),
            "Due date",
            1,
            ColumnWidth::Fixed(150),
            FieldAccessor::DueDate,
        );
        let toggled = field.toggled();
        assert!(!toggled.enabled);
        assert_eq!(toggled.order_position, 1);
    }
}
