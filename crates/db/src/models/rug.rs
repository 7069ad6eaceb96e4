//! Rug entity model and DTOs.

use rugcat_core::filter::CatalogItem;
use rugcat_core::types::{Cents, DbId, Timestamp};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `rugs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rug {
    pub id: DbId,
    pub rug_number: String,
    pub name: Option<String>,
    pub length_cm: i64,
    pub width_cm: i64,
    pub color: Option<String>,
    pub price_cents: Cents,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CatalogItem for Rug {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn length_cm(&self) -> i64 {
        self.length_cm
    }
    fn width_cm(&self) -> i64 {
        self.width_cm
    }
    fn price_cents(&self) -> Cents {
        self.price_cents
    }
}

/// DTO for a partial update. Absent keys keep the stored value.
///
/// The nullable text columns take `Option<Option<String>>`: `Some(None)` is
/// an explicit `null` and clears the column. Sizes and price accept a JSON
/// number or a numeric string but never `null`, since those columns are
/// required. The rug number is immutable and not part of the DTO.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRug {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "whole_number")]
    pub length_cm: Option<i64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub width_cm: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "whole_number")]
    pub price_cents: Option<Cents>,
    #[serde(default, deserialize_with = "present")]
    pub image_path: Option<Option<String>>,
}

/// Wrap whatever the key holds, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `200`, `200.0` and `" 200 "` all read as 200. Fractions, other text
/// and `null` are errors.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Some(n),
        Raw::Float(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Some(f as i64),
        Raw::Float(_) => None,
        Raw::Text(text) => text.trim().parse().ok(),
    };
    value
        .map(Some)
        .ok_or_else(|| D::Error::custom("expected a whole number"))
}
