//! Create/update payloads for the product write endpoints.
//!
//! Values arrive as the user entered them (strings from form inputs). They
//! are validated here, before any request is built, and encoded the way the
//! backend expects a multipart body: scalars as text fields, list fields as
//! JSON strings in the legacy `{"values": [...]}` shape, and the image as an
//! optional binary part.
//!
//! Updates are sparse: only fields that differ from the product as last
//! fetched are sent, so a save cannot clobber fields someone else changed.

use std::str::FromStr;

use herbcat_core::{Price, Product, ValidationError};
use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;

use crate::error::ClientError;
use crate::normalize::encode_wrapped;

/// Multipart field names understood by the backend.
pub mod field {
    pub const NAME: &str = "name";
    pub const LATIN_NAME: &str = "latin_name";
    pub const PRICE: &str = "price";
    pub const CATEGORY_ID: &str = "category_id";
    pub const COMPOSITION: &str = "composition";
    pub const UTILIZATION: &str = "utilization";
    pub const DESCRIPTION: &str = "description";
    pub const IMAGE: &str = "image";
}

/// An image chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type, e.g. `"image/jpeg"`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Form input for a new product.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub latin_name: String,
    pub price: String,
    /// The selected category id as entered; must be numeric.
    pub category_id: String,
    pub composition: Vec<String>,
    pub utilization: Vec<String>,
    pub description: String,
    pub image: Option<ImageUpload>,
}

/// Edited values for an existing product. `None` means the field was not
/// touched.
#[derive(Debug, Clone, Default)]
pub struct ProductEdit {
    pub name: Option<String>,
    pub latin_name: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
    pub composition: Option<Vec<String>>,
    pub utilization: Option<Vec<String>>,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

/// A wire-ready request body: ordered text fields plus an optional image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirePayload {
    fields: Vec<(&'static str, String)>,
    image: Option<ImageUpload>,
}

impl WirePayload {
    fn push(&mut self, name: &'static str, value: String) {
        self.fields.push((name, value));
    }

    /// Text fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Returns the value of the text field `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(n, _)| *n).collect()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    /// `true` when there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.image.is_none()
    }

    /// Builds the multipart form for the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the image MIME type is not a valid
    /// MIME string.
    pub fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            form = form.part(field::IMAGE, part);
        }
        Ok(form)
    }
}

/// Builds the payload for `POST /product`.
///
/// `name`, `price` and `category_id` are required. Every scalar is sent as
/// a string, list fields are wrapped, and the image is attached only when
/// one was chosen.
///
/// # Errors
///
/// - [`ValidationError::MissingField`] when a required field is blank.
/// - [`ValidationError::InvalidCategory`] when the category is not numeric.
/// - [`ValidationError::InvalidPrice`] when the price is not a decimal.
pub fn build_create(draft: ProductDraft) -> Result<WirePayload, ValidationError> {
    let name = require_text(&draft.name, field::NAME)?;
    let price = parse_price(&draft.price)?;
    let category_id = parse_category(&draft.category_id)?;

    let mut payload = WirePayload::default();
    payload.push(field::NAME, name);
    payload.push(field::LATIN_NAME, draft.latin_name.trim().to_owned());
    payload.push(field::PRICE, price.to_string());
    payload.push(field::CATEGORY_ID, category_id.to_string());
    payload.push(field::COMPOSITION, encode_wrapped(&draft.composition));
    payload.push(field::UTILIZATION, encode_wrapped(&draft.utilization));
    payload.push(field::DESCRIPTION, draft.description.trim().to_owned());
    payload.image = draft.image;
    Ok(payload)
}

/// Builds the sparse payload for `PUT /product/:id`.
///
/// Only fields whose edited value differs from `original` are included.
/// Prices compare numerically (`"12.50"` equals `12.5`). An edit with no
/// differences yields an empty payload.
///
/// # Errors
///
/// Same rules as [`build_create`], applied to the fields that were edited.
pub fn build_update(
    original: &Product,
    edit: ProductEdit,
) -> Result<WirePayload, ValidationError> {
    let mut payload = WirePayload::default();

    if let Some(name) = edit.name {
        let name = require_text(&name, field::NAME)?;
        if name != original.name {
            payload.push(field::NAME, name);
        }
    }

    if let Some(latin_name) = edit.latin_name {
        let latin_name = latin_name.trim().to_owned();
        if latin_name != original.latin_name {
            payload.push(field::LATIN_NAME, latin_name);
        }
    }

    if let Some(price) = edit.price {
        let price = parse_price(&price)?;
        if Price::Amount(price) != original.price {
            payload.push(field::PRICE, price.to_string());
        }
    }

    if let Some(category) = edit.category_id {
        let category_id = parse_category(&category)?;
        if Some(category_id) != original.category_id {
            payload.push(field::CATEGORY_ID, category_id.to_string());
        }
    }

    if let Some(composition) = edit.composition {
        if composition != original.composition {
            payload.push(field::COMPOSITION, encode_wrapped(&composition));
        }
    }

    if let Some(utilization) = edit.utilization {
        if utilization != original.utilization {
            payload.push(field::UTILIZATION, encode_wrapped(&utilization));
        }
    }

    if let Some(description) = edit.description {
        let description = description.trim().to_owned();
        if description != original.description {
            payload.push(field::DESCRIPTION, description);
        }
    }

    payload.image = edit.image;
    Ok(payload)
}

fn require_text(raw: &str, name: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(name));
    }
    Ok(trimmed.to_owned())
}

fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = require_text(raw, field::PRICE)?;
    Decimal::from_str(&trimmed).map_err(|_| ValidationError::InvalidPrice(trimmed))
}

fn parse_category(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = require_text(raw, field::CATEGORY_ID)?;
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidCategory(trimmed))
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
