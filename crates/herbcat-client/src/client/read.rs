use herbcat_core::{Catalog, Category, CategoryIndex};
use serde::de::DeserializeOwned;

use super::{check_status, CatalogClient, CATEGORIES_PATH, PRODUCTS_PATH};
use crate::error::ClientError;
use crate::normalize::{enrich_all, normalize_category};
use crate::retry::retry_with_backoff;
use crate::types::{decode_raw_product, CategoriesResponse, ProductsResponse, RawProduct};

impl CatalogClient {
    /// Fetches the raw product list from `GET /product`.
    ///
    /// Records are decoded one by one; a malformed record is kept with
    /// default fields instead of failing the list.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`], [`ClientError::Http`] or a 5xx
    ///   [`ClientError::UnexpectedStatus`] after all retries are exhausted.
    /// - [`ClientError::NotFound`] or another non-2xx status (not retried).
    /// - [`ClientError::Deserialize`] if the envelope is not
    ///   `{"Products": [...]}`.
    pub async fn fetch_products(&self) -> Result<Vec<RawProduct>, ClientError> {
        let response: ProductsResponse = self.get_json(PRODUCTS_PATH, "product list").await?;
        Ok(response
            .products
            .into_iter()
            .map(decode_raw_product)
            .collect())
    }

    /// Fetches the category list from `GET /product-category`.
    ///
    /// Categories without a usable id are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_products`], with the envelope
    /// `{"ProductCategory": [...]}`.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response: CategoriesResponse =
            self.get_json(CATEGORIES_PATH, "category list").await?;
        Ok(response
            .categories
            .into_iter()
            .filter_map(normalize_category)
            .collect())
    }

    /// Fetches products and categories concurrently and builds an enriched
    /// [`Catalog`] snapshot.
    ///
    /// Both requests must succeed before enrichment runs. The category index
    /// is built from scratch on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::FetchJoin`] wrapping the first failure of
    /// either request. No partial catalog is produced.
    pub async fn fetch_catalog(&self) -> Result<Catalog, ClientError> {
        let products = async {
            self.fetch_products()
                .await
                .map_err(|e| ClientError::FetchJoin {
                    resource: "products",
                    source: Box::new(e),
                })
        };
        let categories = async {
            self.fetch_categories()
                .await
                .map_err(|e| ClientError::FetchJoin {
                    resource: "categories",
                    source: Box::new(e),
                })
        };

        let (raw_products, categories) = tokio::try_join!(products, categories)?;

        let index = CategoryIndex::build(&categories);
        let products = enrich_all(&raw_products, &index);
        tracing::info!(
            products = products.len(),
            categories = categories.len(),
            "catalog snapshot built"
        );

        Ok(Catalog::new(categories, products))
    }

    async fn get_json<T>(&self, path: &str, context: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let request = self.authorize(self.client.get(url.clone()));
                let response = check_status(request.send().await?, &url).await?;
                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
                    context: format!("{context} from {url}"),
                    source: e,
                })
            }
        })
        .await
    }
}
