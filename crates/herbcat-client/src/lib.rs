//! Boundary between the catalog backend and the canonical model: wire
//! types, normalization and enrichment, write payloads, and the HTTP client.

pub mod client;
pub mod error;
pub mod normalize;
pub mod payload;
mod retry;
pub mod types;

pub use client::CatalogClient;
pub use error::ClientError;
pub use normalize::{coerce_price, enrich_all, enrich_product, normalize_field};
pub use payload::{build_create, build_update, ImageUpload, ProductDraft, ProductEdit, WirePayload};
pub use types::{RawProduct, WireList, WirePrice};
