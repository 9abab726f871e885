//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, form::Editable};

/// Server-assigned identifier for a category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Wrap a server-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The symbols a category can be displayed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    /// 🚗
    #[serde(rename = "🚗")]
    Car,
    /// 🛒
    #[serde(rename = "🛒")]
    ShoppingCart,
    /// 🧾
    #[serde(rename = "🧾")]
    Receipt,
    /// 📈
    #[serde(rename = "📈")]
    ChartIncreasing,
}

impl Icon {
    /// Every icon, in the order they are offered to the user.
    pub const ALL: [Icon; 4] = [
        Icon::Car,
        Icon::ShoppingCart,
        Icon::Receipt,
        Icon::ChartIncreasing,
    ];

    /// The symbol shown for the icon, also its wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Car => "🚗",
            Icon::ShoppingCart => "🛒",
            Icon::Receipt => "🧾",
            Icon::ChartIncreasing => "📈",
        }
    }
}

impl FromStr for Icon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| Error::InvalidFormInput(format!("\"{s}\" is not an available icon")))
    }
}

impl Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category for grouping transactions (e.g., 'Groceries', 'Fuel').
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// `None` until the server-assigned identifier is known.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    /// The name shown to the user, e.g. "Groceries".
    #[serde(default)]
    pub label: String,
    /// The symbol shown next to the label.
    #[serde(default, deserialize_with = "lenient_icon")]
    pub icon: Option<Icon>,
}

impl Category {
    /// Build a category from the fields of `draft`.
    pub fn from_draft(id: Option<CategoryId>, draft: CategoryDraft) -> Self {
        Self {
            id,
            label: draft.label,
            icon: draft.icon,
        }
    }
}

impl Editable for Category {
    type Id = CategoryId;
    type Draft = CategoryDraft;

    fn id(&self) -> Option<&CategoryId> {
        self.id.as_ref()
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            label: self.label.clone(),
            icon: self.icon,
        }
    }
}

/// The editable fields of a category, also the request body sent to the
/// finance API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryDraft {
    /// The name shown to the user.
    pub label: String,
    /// The symbol shown next to the label, if any.
    pub icon: Option<Icon>,
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

impl TryFrom<CategoryFormData> for CategoryDraft {
    type Error = Error;

    fn try_from(form: CategoryFormData) -> Result<Self, Self::Error> {
        let icon = match form.icon.trim() {
            "" => None,
            icon => Some(icon.parse()?),
        };

        Ok(Self {
            label: form.label,
            icon,
        })
    }
}

/// Icons the client does not know about are treated as no icon.
fn lenient_icon<'de, D>(deserializer: D) -> Result<Option<Icon>, D::Error>
where
    D: Deserializer<'de>,
{
    let icon = Option::<String>::deserialize(deserializer)?;

    Ok(icon.and_then(|icon| icon.parse().ok()))
}
