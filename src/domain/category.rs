//! Domain types representing expense and income categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;

/// Swatch color applied when a category carries none.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

/// A category record as held by the data-access collaborator.
///
/// Only `id` is guaranteed; every other field may be missing on records that were
/// created elsewhere, so views normalize through [`CategoryFields::from_category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "Id")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<CategoryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl Category {
    /// Builds a stored record from complete form data.
    pub fn from_fields(id: Uuid, fields: &CategoryFields) -> Self {
        Self {
            id,
            name: fields.name.clone(),
            kind: fields.kind,
            color: Some(fields.color.clone()),
            is_default: Some(fields.is_default),
        }
    }

    /// Overwrites every mutable field, leaving the identifier untouched.
    pub fn apply(&mut self, fields: &CategoryFields) {
        self.name = fields.name.clone();
        self.kind = fields.kind;
        self.color = Some(fields.color.clone());
        self.is_default = Some(fields.is_default);
    }

    pub fn is_default(&self) -> bool {
        self.is_default.unwrap_or(false)
    }

    pub fn is_income(&self) -> bool {
        self.kind == Some(CategoryKind::Income)
    }

    /// Stored color, or the default swatch when missing or blank.
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|color| !color.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        let kind = if self.is_income() {
            CategoryKind::Income
        } else {
            CategoryKind::Expense
        };
        format!("{} ({})", self.name, kind)
    }
}

/// Complete field set submitted to `create` and `update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFields {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<CategoryKind>,
    pub color: String,
    pub is_default: bool,
}

impl Default for CategoryFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: Some(CategoryKind::Expense),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            is_default: false,
        }
    }
}

impl CategoryFields {
    /// Normalizes a possibly partial record into complete form data.
    ///
    /// Each field falls back to its default independently; blank strings count as
    /// missing.
    pub fn from_category(source: Option<&Category>) -> Self {
        let defaults = Self::default();
        let Some(category) = source else {
            return defaults;
        };
        Self {
            name: category.name.clone(),
            kind: category.kind.or(defaults.kind),
            color: category
                .color
                .clone()
                .filter(|color| !color.is_empty())
                .unwrap_or(defaults.color),
            is_default: category.is_default.unwrap_or(defaults.is_default),
        }
    }

    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 2] = [CategoryKind::Expense, CategoryKind::Income];

    /// Wire value, as used by the `type` field.
    pub fn value(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Expense => "Expense",
            CategoryKind::Income => "Income",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category type `{0}` (expected expense or income)")]
pub struct UnknownCategoryKind(pub String);

impl FromStr for CategoryKind {
    type Err = UnknownCategoryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(CategoryKind::Expense),
            "income" => Ok(CategoryKind::Income),
            _ => Err(UnknownCategoryKind(s.to_string())),
        }
    }
}

/// Reads a stored `type`, treating blank or unrecognized values as unset.
fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<CategoryKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Returns true for `#rrggbb` strings.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(name: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: None,
            color: None,
            is_default: None,
        }
    }

    #[test]
    fn fields_default_without_source() {
        let fields = CategoryFields::from_category(None);
        assert_eq!(fields.name, "");
        assert_eq!(fields.kind, Some(CategoryKind::Expense));
        assert_eq!(fields.color, DEFAULT_CATEGORY_COLOR);
        assert!(!fields.is_default);
    }

    #[test]
    fn fields_fill_each_missing_value_independently() {
        let mut category = partial("Salary");
        category.kind = Some(CategoryKind::Income);
        category.color = Some(String::new());

        let fields = CategoryFields::from_category(Some(&category));
        assert_eq!(fields.name, "Salary");
        assert_eq!(fields.kind, Some(CategoryKind::Income));
        assert_eq!(fields.color, DEFAULT_CATEGORY_COLOR);
        assert!(!fields.is_default);
    }

    #[test]
    fn fields_keep_existing_values() {
        let mut category = partial("Rent");
        category.color = Some("#ff0000".into());
        category.is_default = Some(true);

        let fields = CategoryFields::from_category(Some(&category));
        assert_eq!(fields.color, "#ff0000");
        assert!(fields.is_default);
        assert_eq!(fields.kind, Some(CategoryKind::Expense));
    }

    #[test]
    fn deserializes_remote_shape() {
        let json = r#"{"Id":"6f1c1e8e-8f5a-4c1b-9a7e-2d0e3b6f4a11","name":"Food","type":"income","isDefault":true}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Food");
        assert_eq!(category.kind, Some(CategoryKind::Income));
        assert!(category.is_default());
        assert_eq!(category.display_color(), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn fields_serialize_with_type_key() {
        let value = serde_json::to_value(CategoryFields::default()).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["isDefault"], false);
        assert_eq!(value["color"], DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Income".parse::<CategoryKind>(), Ok(CategoryKind::Income));
        assert_eq!(" expense ".parse::<CategoryKind>(), Ok(CategoryKind::Expense));
        assert!("transfer".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn hex_color_check() {
        assert!(is_hex_color("#3b82f6"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("3b82f6"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#12345g"));
    }

    #[test]
    fn display_label_falls_back_to_expense() {
        let category = partial("Misc");
        assert_eq!(category.display_label(), "Misc (Expense)");
    }

    #[test]
    fn stray_type_values_read_as_unset() {
        let records: Vec<Category> = serde_json::from_str(
            r#"[
                { "Id": "0b8a4c1e-2f57-4c55-9d7e-4a1f2b3c4d5e", "name": "A", "type": "transfer" },
                { "Id": "1c9b5d2f-3a68-4d66-8e8f-5b2a3c4d5e6f", "name": "B", "type": "" },
                { "Id": "2dac6e3a-4b79-4e77-9f9a-6c3b4d5e6f7a", "name": "C", "type": null },
                { "Id": "3ebd7f4b-5c8a-4f88-8a0b-7d4c5e6f7a8b", "name": "D", "type": "Income" }
            ]"#,
        )
        .unwrap();
        let kinds: Vec<_> = records.iter().map(|record| record.kind).collect();
        assert_eq!(kinds, vec![None, None, None, Some(CategoryKind::Income)]);
    }
}
