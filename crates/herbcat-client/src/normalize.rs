//! Conversion from raw wire records to the canonical [`herbcat_core`] model.
//!
//! Nothing here fails: a field with an unexpected shape becomes its safe
//! default (empty list, unavailable price, no timestamp) and is logged.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use herbcat_core::{Category, CategoryIndex, Price, Product};
use rust_decimal::Decimal;

use crate::types::{RawCategory, RawProduct, WireId, WireList, WirePrice};

/// Converts a list field into its canonical ordered form.
///
/// Plain arrays pass through unchanged, the legacy `{"values": [...]}` shape
/// is unwrapped, and a JSON string holding either shape is decoded once.
/// Absent or unrecognized values yield an empty list.
#[must_use]
pub fn normalize_field(raw: Option<WireList>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(WireList::Plain(values) | WireList::Wrapped { values }) => values,
        Some(WireList::Encoded(text)) => match serde_json::from_str::<WireList>(&text) {
            Ok(WireList::Plain(values) | WireList::Wrapped { values }) => values,
            _ => {
                tracing::debug!(raw = %text, "string list field is not an encoded list");
                Vec::new()
            }
        },
        Some(WireList::Unrecognized(value)) => {
            if !value.is_null() {
                tracing::debug!(raw = %value, "unrecognized list field shape");
            }
            Vec::new()
        }
    }
}

/// Coerces a wire price into a [`Price`].
///
/// Numbers are taken as-is and strings are parsed as decimals (plain or
/// scientific notation). Anything else, including an empty string, is
/// [`Price::Unavailable`].
#[must_use]
pub fn coerce_price(raw: Option<&WirePrice>) -> Price {
    let parsed = match raw {
        Some(WirePrice::Number(n)) => parse_decimal(&n.to_string()),
        Some(WirePrice::Text(text)) => parse_decimal(text.trim()),
        Some(WirePrice::Unrecognized(_)) | None => None,
    };
    parsed.map_or(Price::Unavailable, Price::Amount)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_timestamp(
    raw: Option<&str>,
    product_id: i64,
    field: &'static str,
) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(product_id, field, raw, error = %e, "unparsable timestamp");
            None
        }
    }
}

/// Joins a raw product with the category index and normalizes its fields.
///
/// The raw record is left untouched and a new [`Product`] is returned, so
/// the same raw list can be enriched again against a rebuilt index.
#[must_use]
pub fn enrich_product(raw: &RawProduct, index: &CategoryIndex) -> Product {
    let id = raw
        .id
        .as_ref()
        .and_then(WireId::as_i64)
        .unwrap_or_else(|| {
            tracing::warn!("product record has no usable id; using 0");
            0
        });

    let category_id = raw.category_id.as_ref().and_then(WireId::as_i64);
    let category_name = match category_id {
        Some(cid) => {
            let name = index.lookup(cid);
            if name.is_empty() {
                tracing::debug!(product_id = id, category_id = cid, "category not found");
            }
            name.to_owned()
        }
        None => String::new(),
    };

    let price = coerce_price(raw.price.as_ref());
    if !price.is_available() {
        tracing::debug!(product_id = id, "price unavailable");
    }

    Product {
        id,
        name: raw.name.clone().unwrap_or_default(),
        latin_name: raw.latin_name.clone().unwrap_or_default(),
        price,
        category_id,
        category_name,
        composition: normalize_field(raw.composition.clone()),
        utilization: normalize_field(raw.utilization.clone()),
        image_ref: raw.image.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        created_at: parse_timestamp(raw.created_at.as_deref(), id, "created_at"),
        updated_at: parse_timestamp(raw.updated_at.as_deref(), id, "updated_at"),
    }
}

/// Enriches every record, preserving order and length.
#[must_use]
pub fn enrich_all(raw: &[RawProduct], index: &CategoryIndex) -> Vec<Product> {
    raw.iter().map(|p| enrich_product(p, index)).collect()
}

/// Converts a raw category, skipping ones without a usable id.
#[must_use]
pub fn normalize_category(raw: RawCategory) -> Option<Category> {
    let Some(id) = raw.id.as_ref().and_then(WireId::as_i64) else {
        tracing::warn!(name = ?raw.name, "category without usable id skipped");
        return None;
    };
    Some(Category {
        id,
        name: raw.name.unwrap_or_default(),
    })
}

/// Encodes a list in the legacy wrapped shape used on the write path,
/// e.g. `{"values":["Kunyit","Asam"]}`.
#[must_use]
pub fn encode_wrapped(values: &[String]) -> String {
    serde_json::json!({ "values": values }).to_string()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
