//! Core transaction domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, category::CategoryId, form::Editable};

/// Server-assigned identifier for a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap a server-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: TransactionId,
    /// The amount in euros.
    pub amount: f64,
    /// What the money was spent on or earned from.
    #[serde(default)]
    pub description: String,
    /// The day the transaction happened.
    #[serde(with = "calendar_date")]
    pub date: Date,
    /// The category the transaction belongs to, if any.
    #[serde(default, with = "optional_category_id")]
    pub category_id: Option<CategoryId>,
}

impl Editable for Transaction {
    type Id = TransactionId;
    type Draft = TransactionDraft;

    fn id(&self) -> Option<&TransactionId> {
        Some(&self.id)
    }

    fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
            category_id: self.category_id.clone(),
        }
    }
}

/// The editable fields of a transaction, also the request body sent to the
/// finance API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    /// The amount in euros.
    pub amount: f64,
    /// What the money was spent on or earned from.
    pub description: String,
    /// The day the transaction happened.
    #[serde(with = "calendar_date")]
    pub date: Date,
    /// The category the transaction belongs to, if any.
    #[serde(with = "optional_category_id")]
    pub category_id: Option<CategoryId>,
}

impl Default for TransactionDraft {
    /// An empty transaction dated today.
    fn default() -> Self {
        Self {
            amount: 0.0,
            description: String::new(),
            date: OffsetDateTime::now_utc().date(),
            category_id: None,
        }
    }
}

/// Form data for transaction creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionFormData {
    pub amount: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub category_id: String,
}

impl TryFrom<TransactionFormData> for TransactionDraft {
    type Error = Error;

    fn try_from(form: TransactionFormData) -> Result<Self, Self::Error> {
        let amount = form
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| {
                Error::InvalidFormInput(format!("\"{}\" is not a valid amount", form.amount))
            })?;

        let date = calendar_date::parse(&form.date).map_err(|_| {
            Error::InvalidFormInput(format!("\"{}\" is not a valid date", form.date))
        })?;

        let category_id = match form.category_id.trim() {
            "" => None,
            id => Some(CategoryId::new(id)),
        };

        Ok(Self {
            amount,
            description: form.description,
            date,
            category_id,
        })
    }
}

/// Dates are sent as `YYYY-MM-DD`. Dates received from the finance API may
/// also be full ISO-8601 timestamps, in which case only the date is kept.
pub(crate) mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{
        Date, OffsetDateTime, PrimitiveDateTime,
        format_description::{
            BorrowedFormatItem,
            well_known::{Iso8601, Rfc3339},
        },
        macros::format_description,
    };

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    /// Parse a `YYYY-MM-DD` date, nothing else.
    pub fn parse(text: &str) -> Result<Date, time::error::Parse> {
        Date::parse(text.trim(), FORMAT)
    }

    /// Parse a `YYYY-MM-DD` date or an ISO-8601 timestamp.
    pub fn parse_date_or_timestamp(text: &str) -> Result<Date, time::error::Parse> {
        let text = text.trim();

        parse(text)
            .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|timestamp| timestamp.date()))
            .or_else(|_| {
                PrimitiveDateTime::parse(text, &Iso8601::DEFAULT).map(|timestamp| timestamp.date())
            })
    }

    pub fn format(date: &Date) -> Result<String, time::error::Format> {
        date.format(FORMAT)
    }

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = format(date).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_date_or_timestamp(&text).map_err(D::Error::custom)
    }
}

/// No category is sent as the empty string. Either the empty string or `null`
/// is accepted from the finance API.
mod optional_category_id {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::category::CategoryId;

    pub fn serialize<S>(id: &Option<CategoryId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(id.as_ref().map(|id| id.as_ref()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = Option::<String>::deserialize(deserializer)?;

        Ok(id.filter(|id| !id.is_empty()).map(CategoryId::new))
    }
}
