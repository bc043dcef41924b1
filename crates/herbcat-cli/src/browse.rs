//! Read-only command handlers: listing, preview, categories and detail.
//!
//! Every handler fetches a fresh catalog snapshot and renders it either as a
//! fixed-width table or, with `--json`, as pretty-printed JSON.

use herbcat_client::CatalogClient;
use herbcat_core::{CatalogQuery, Category, Product};

const NAME_WIDTH: usize = 28;
const LATIN_WIDTH: usize = 26;
const CATEGORY_WIDTH: usize = 20;

/// Shortens `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_owned()
    }
}

/// Category column value; products with an unknown category show a dash.
pub(crate) fn category_label(product: &Product) -> &str {
    if product.category_name.is_empty() {
        "-"
    } else {
        &product.category_name
    }
}

pub(crate) fn product_header() -> String {
    format!(
        "{:<6}{:<NAME_WIDTH$}  {:<LATIN_WIDTH$}  {:<CATEGORY_WIDTH$}  PRICE",
        "ID", "NAME", "LATIN NAME", "CATEGORY"
    )
}

pub(crate) fn product_row(product: &Product) -> String {
    format!(
        "{:<6}{:<NAME_WIDTH$}  {:<LATIN_WIDTH$}  {:<CATEGORY_WIDTH$}  {}",
        product.id,
        truncate(&product.name, NAME_WIDTH),
        truncate(&product.latin_name, LATIN_WIDTH),
        truncate(category_label(product), CATEGORY_WIDTH),
        product.price
    )
}

fn print_products(products: &[&Product], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", product_header());
    for product in products {
        println!("{}", product_row(product));
    }
    Ok(())
}

/// Lists products matching `query`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub(crate) async fn run_list(
    client: &CatalogClient,
    query: &CatalogQuery,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = client.fetch_catalog().await?;
    let results = catalog.query(query);
    tracing::debug!(
        matched = results.len(),
        total = catalog.len(),
        sort = %query.sort_key,
        category = %query.category_filter,
        "catalog query"
    );
    print_products(&results, json)
}

/// Shows the home-page preview: the first `limit` products by name.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub(crate) async fn run_preview(
    client: &CatalogClient,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = client.fetch_catalog().await?;
    print_products(&catalog.preview(limit), json)
}

/// Lists categories as returned by the backend.
///
/// # Errors
///
/// Returns an error if the category list cannot be fetched.
pub(crate) async fn run_categories(client: &CatalogClient, json: bool) -> anyhow::Result<()> {
    let categories: Vec<Category> = client.fetch_categories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }

    println!("{:<6}NAME", "ID");
    for category in &categories {
        println!("{:<6}{}", category.id, category.name);
    }
    Ok(())
}

/// Multi-line detail view for one product.
pub(crate) fn product_detail(product: &Product) -> String {
    let mut lines = vec![
        format!("#{} {}", product.id, product.name),
        format!("Latin name:  {}", product.latin_name),
        format!("Category:    {}", category_label(product)),
        format!("Price:       {}", product.price),
    ];
    if !product.composition.is_empty() {
        lines.push(format!("Composition: {}", product.composition.join(", ")));
    }
    if !product.utilization.is_empty() {
        lines.push(format!("Utilization: {}", product.utilization.join(", ")));
    }
    if !product.image_ref.is_empty() {
        lines.push(format!("Image:       {}", product.image_ref));
    }
    if !product.description.is_empty() {
        lines.push(String::new());
        lines.push(product.description.clone());
    }
    lines.join("\n")
}

/// Shows one product by id.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or no product has `id`.
pub(crate) async fn run_show(client: &CatalogClient, id: i64, json: bool) -> anyhow::Result<()> {
    let catalog = client.fetch_catalog().await?;
    let product = catalog
        .find(id)
        .ok_or_else(|| anyhow::anyhow!("product {id} not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(product)?);
    } else {
        println!("{}", product_detail(product));
    }
    Ok(())
}
