//! Frontend Models
//!
//! Data structures matching the stores/categories collections of the REST API.

use serde::{Deserialize, Deserializer, Serialize};

/// Store identifier
pub type StoreId = u32;

/// Category identifier
pub type CategoryId = u32;

/// Publication status of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StoreStatus {
    #[default]
    #[serde(rename = "publish", alias = "published")]
    Published,
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "trash", alias = "trashed")]
    Trashed,
}

impl StoreStatus {
    pub const ALL: [StoreStatus; 3] = [StoreStatus::Published, StoreStatus::Draft, StoreStatus::Trashed];

    /// Value used by the API and the URL query string
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Published => "publish",
            StoreStatus::Draft => "draft",
            StoreStatus::Trashed => "trash",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "publish" | "published" => Some(StoreStatus::Published),
            "draft" => Some(StoreStatus::Draft),
            "trash" | "trashed" => Some(StoreStatus::Trashed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoreStatus::Published => "Published",
            StoreStatus::Draft => "Draft",
            StoreStatus::Trashed => "Trashed",
        }
    }
}

/// Whether the cashback figure is exact or a maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    Upto,
    #[default]
    #[serde(other)]
    Flat,
}

/// Whether cashback is a percentage or a fixed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    #[default]
    Percent,
    #[serde(other)]
    Fixed,
}

/// Store data structure (matches the `stores` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub status: StoreStatus,
    #[serde(default, deserialize_with = "flag")]
    pub cashback_enabled: bool,
    #[serde(default)]
    pub rate_type: RateType,
    #[serde(default)]
    pub amount_type: AmountType,
    #[serde(default, deserialize_with = "number")]
    pub cashback_percent: f64,
    #[serde(default, deserialize_with = "number")]
    pub cashback_amount: f64,
    /// Free-text fallback shown when there is no structured offer
    #[serde(default, rename = "cashback")]
    pub cashback_text: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_promoted: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_shareable: bool,
    #[serde(default, deserialize_with = "count")]
    pub visits: u64,
    #[serde(default, deserialize_with = "category_ids")]
    pub cats: Vec<CategoryId>,
    #[serde(default)]
    pub homepage: String,
}

impl Store {
    /// Human-readable cashback line, e.g. "Up to 7.5% Cashback"
    pub fn cashback_label(&self) -> String {
        if !self.cashback_enabled {
            return if self.cashback_text.is_empty() {
                "No cashback available".to_string()
            } else {
                self.cashback_text.clone()
            };
        }

        let prefix = match self.rate_type {
            RateType::Upto => "Up to ",
            RateType::Flat => "",
        };
        let amount = match self.amount_type {
            AmountType::Percent => format!("{}%", format_number(self.cashback_percent)),
            AmountType::Fixed => format!("₹{}", format_number(self.cashback_amount)),
        };
        format!("{}{} Cashback", prefix, amount)
    }
}

/// Category data structure (matches the `categories` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Accept `0`/`1`, booleans and `"0"`/`"1"` for flag fields
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
        Flag::Text(s) => matches!(s.as_str(), "1" | "true"),
        Flag::Null(()) => false,
    })
}

/// Accept numbers, numeric strings and null
fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Num(f64),
        Text(String),
        Null(()),
    }

    Ok(match Number::deserialize(deserializer)? {
        Number::Num(n) => n,
        Number::Text(s) => s.trim().parse().unwrap_or(0.0),
        Number::Null(()) => 0.0,
    })
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(deserializer)?;
    Ok(if value.is_finite() && value > 0.0 { value as u64 } else { 0 })
}

/// Accept a single id, a numeric string, or an array of either
fn category_ids<'de, D>(deserializer: D) -> Result<Vec<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(CategoryId),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ids {
        Many(Vec<Id>),
        One(Id),
        Null(()),
    }

    fn to_id(id: Id) -> Option<CategoryId> {
        match id {
            Id::Num(n) => Some(n),
            Id::Text(s) => s.trim().parse().ok(),
        }
    }

    Ok(match Ids::deserialize(deserializer)? {
        Ids::Many(ids) => ids.into_iter().filter_map(to_id).collect(),
        Ids::One(id) => to_id(id).into_iter().collect(),
        Ids::Null(()) => Vec::new(),
    })
}

#[cfg(test)]
pub(crate) fn make_store(id: StoreId, name: &str) -> Store {
    Store {
        id,
        name: name.to_string(),
        logo: String::new(),
        status: StoreStatus::Published,
        cashback_enabled: false,
        rate_type: RateType::Flat,
        amount_type: AmountType::Percent,
        cashback_percent: 0.0,
        cashback_amount: 0.0,
        cashback_text: String::new(),
        is_promoted: false,
        is_shareable: false,
        visits: 0,
        cats: Vec::new(),
        homepage: String::new(),
    }
}
