//! Wire types for the catalog backend's JSON responses.
//!
//! ## Observed shapes
//!
//! ### List fields (`composition`, `utilization`)
//! Older records carry a wrapped object `{"values": ["..."]}`; newer ones a
//! plain array `["..."]`. Because the write path sends the wrapped form as a
//! JSON-encoded multipart field, some records come back as that string,
//! e.g. `"{\"values\":[\"Kunyit\"]}"`. Anything else is kept as
//! [`WireList::Unrecognized`] and normalizes to an empty list.
//!
//! ### `price`
//! Either a JSON number (`15000`) or a numeric string (`"15000.00"`).
//!
//! ### Ids
//! `id` and `category_id` are integers, but string-encoded integers have
//! been seen on records written through multipart forms.
//!
//! ### Key casing
//! Keys are `snake_case`; `camelCase` spellings are accepted as aliases.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level response from `GET /product`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    /// Kept as raw values so one malformed record cannot fail the list.
    #[serde(rename = "Products")]
    pub products: Vec<Value>,
}

/// Top-level response from `GET /product-category`.
#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    #[serde(rename = "ProductCategory")]
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A product record exactly as the backend sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<WireId>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(default, alias = "latinName", deserialize_with = "lenient_text")]
    pub latin_name: Option<String>,

    #[serde(default)]
    pub price: Option<WirePrice>,

    #[serde(default, alias = "categoryId")]
    pub category_id: Option<WireId>,

    #[serde(default)]
    pub composition: Option<WireList>,

    #[serde(default)]
    pub utilization: Option<WireList>,

    /// Image path or URL as stored by the backend.
    #[serde(
        default,
        alias = "imageRef",
        alias = "image_url",
        deserialize_with = "lenient_text"
    )]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    /// RFC 3339 timestamp string.
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_text")]
    pub created_at: Option<String>,

    #[serde(default, alias = "updatedAt", deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
}

/// Known wire shapes of a list field.
///
/// Variant order matters: `serde(untagged)` tries them top to bottom and
/// `Unrecognized` accepts anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireList {
    Plain(Vec<String>),
    Wrapped { values: Vec<String> },
    /// A JSON document of one of the shapes above, sent as a string.
    Encoded(String),
    Unrecognized(Value),
}

/// Wire shape of `price`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Number(serde_json::Number),
    Text(String),
    Unrecognized(Value),
}

/// Wire shape of an integer id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
    Unrecognized(Value),
}

impl WireId {
    /// Returns the id when it is an integer or a string holding one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            WireId::Int(id) => Some(*id),
            WireId::Text(raw) => raw.trim().parse().ok(),
            WireId::Unrecognized(_) => None,
        }
    }
}

/// Accepts a string field; any other JSON type is treated as absent so one
/// mistyped field does not fail the whole record.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        None | Some(Value::Null) => None,
        Some(other) => {
            tracing::debug!(raw = %other, "non-string text field ignored");
            None
        }
    })
}

/// Decodes one element of [`ProductsResponse::products`].
///
/// Typed decoding only fails for records that are not objects or that
/// repeat a field under two spellings. Such a record is not dropped: each
/// known key is read on its own, so only the unreadable fields fall back to
/// their defaults and the catalog keeps its length.
#[must_use]
pub fn decode_raw_product(value: Value) -> RawProduct {
    let err = match serde_json::from_value::<RawProduct>(value.clone()) {
        Ok(raw) => return raw,
        Err(err) => err,
    };

    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);
    let raw = RawProduct {
        id: field(fields, &["id"]),
        name: text(fields, &["name"]),
        latin_name: text(fields, &["latin_name", "latinName"]),
        price: field(fields, &["price"]),
        category_id: field(fields, &["category_id", "categoryId"]),
        composition: field(fields, &["composition"]),
        utilization: field(fields, &["utilization"]),
        image: text(fields, &["image", "imageRef", "image_url"]),
        description: text(fields, &["description"]),
        created_at: text(fields, &["created_at", "createdAt"]),
        updated_at: text(fields, &["updated_at", "updatedAt"]),
    };
    tracing::warn!(
        id = ?raw.id.as_ref().and_then(WireId::as_i64),
        error = %err,
        "malformed product record; decoded field by field"
    );
    raw
}

/// First of `keys` present in `fields` that decodes as `T`.
fn field<T: DeserializeOwned>(fields: &Map<String, Value>, keys: &[&str]) -> Option<T> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(|v| serde_json::from_value(v.clone()).ok())
}

fn text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(|v| v.as_str().map(str::to_owned))
}
