//! Write command handlers: create, update and delete a product.
//!
//! Input is validated into a wire payload before any request is sent. A
//! 409 from the backend is reported as "already exists" instead of a
//! generic failure.

use std::path::{Path, PathBuf};

use clap::Args;
use herbcat_client::{
    build_create, build_update, CatalogClient, ClientError, ImageUpload, ProductDraft, ProductEdit,
};

#[derive(Debug, Args)]
pub(crate) struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub latin_name: String,
    /// Decimal price, e.g. 25000 or 12.50
    #[arg(long)]
    pub price: String,
    /// Category id
    #[arg(long)]
    pub category: String,
    /// Composition entry; repeat for several
    #[arg(long)]
    pub composition: Vec<String>,
    /// Utilization entry; repeat for several
    #[arg(long)]
    pub utilization: Vec<String>,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub latin_name: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Replaces the whole composition list; repeat for several entries
    #[arg(long)]
    pub composition: Option<Vec<String>>,
    /// Replaces the whole utilization list; repeat for several entries
    #[arg(long)]
    pub utilization: Option<Vec<String>>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Guesses an image MIME type from the file extension.
pub(crate) fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

async fn load_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read image {}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_owned();
    Ok(ImageUpload {
        file_name,
        mime_type: guess_mime(path).to_owned(),
        bytes,
    })
}

async fn load_optional_image(path: Option<&Path>) -> anyhow::Result<Option<ImageUpload>> {
    match path {
        Some(path) => Ok(Some(load_image(path).await?)),
        None => Ok(None),
    }
}

/// Turns a conflict into the user-facing "already exists" message; other
/// errors pass through unchanged.
fn describe_write_error(err: ClientError, subject: &str) -> anyhow::Error {
    if err.is_conflict() {
        anyhow::anyhow!("{subject} already exists ({err})")
    } else {
        anyhow::Error::new(err)
    }
}

/// Creates a product from command-line fields.
///
/// # Errors
///
/// Returns an error if validation fails, the image cannot be read, or the
/// backend rejects the request.
pub(crate) async fn run_create(client: &CatalogClient, args: CreateArgs) -> anyhow::Result<()> {
    let image = load_optional_image(args.image.as_deref()).await?;
    let subject = format!("product '{}'", args.name.trim());

    let draft = ProductDraft {
        name: args.name,
        latin_name: args.latin_name,
        price: args.price,
        category_id: args.category,
        composition: args.composition,
        utilization: args.utilization,
        description: args.description,
        image,
    };
    let payload = build_create(draft)?;

    client
        .create_product(payload)
        .await
        .map_err(|e| describe_write_error(e, &subject))?;

    println!("created {subject}");
    Ok(())
}

/// Updates product `id`, sending only the fields that differ from the
/// current backend record.
///
/// # Errors
///
/// Returns an error if the product does not exist, validation fails, the
/// image cannot be read, or the backend rejects the request.
pub(crate) async fn run_update(
    client: &CatalogClient,
    id: i64,
    args: UpdateArgs,
) -> anyhow::Result<()> {
    let catalog = client.fetch_catalog().await?;
    let original = catalog
        .find(id)
        .ok_or_else(|| anyhow::anyhow!("product {id} not found"))?;

    let image = load_optional_image(args.image.as_deref()).await?;
    let edit = ProductEdit {
        name: args.name,
        latin_name: args.latin_name,
        price: args.price,
        category_id: args.category,
        composition: args.composition,
        utilization: args.utilization,
        description: args.description,
        image,
    };
    let payload = build_update(original, edit)?;

    if payload.is_empty() {
        println!("nothing to update for product {id}");
        return Ok(());
    }

    let mut changed = payload.field_names();
    if payload.image().is_some() {
        changed.push("image");
    }
    let changed = changed.join(", ");
    client
        .update_product(id, payload)
        .await
        .map_err(|e| describe_write_error(e, &format!("product '{}'", original.name)))?;

    println!("updated product {id} ({changed})");
    Ok(())
}

/// Deletes product `id`.
///
/// # Errors
///
/// Returns an error if the backend rejects the request.
pub(crate) async fn run_delete(client: &CatalogClient, id: i64) -> anyhow::Result<()> {
    client.delete_product(id).await?;
    println!("deleted product {id}");
    Ok(())
}
