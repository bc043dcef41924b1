use reqwest::Method;

use super::{check_status, CatalogClient, PRODUCTS_PATH};
use crate::error::ClientError;
use crate::payload::WirePayload;

impl CatalogClient {
    /// Creates a product with `POST /product`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Conflict`] on HTTP 409 (e.g. duplicate name).
    /// - [`ClientError::UnexpectedStatus`] or [`ClientError::Http`] on other
    ///   failures. Writes are not retried.
    pub async fn create_product(&self, payload: WirePayload) -> Result<(), ClientError> {
        self.send_payload(Method::POST, PRODUCTS_PATH, payload)
            .await
    }

    /// Updates a product with `PUT /product/:id`.
    ///
    /// The payload is sent as given; build it with
    /// [`crate::payload::build_update`] to send only changed fields.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the product no longer exists.
    /// - [`ClientError::Conflict`] on HTTP 409.
    /// - [`ClientError::UnexpectedStatus`] or [`ClientError::Http`] otherwise.
    pub async fn update_product(&self, id: i64, payload: WirePayload) -> Result<(), ClientError> {
        self.send_payload(Method::PUT, &format!("{PRODUCTS_PATH}/{id}"), payload)
            .await
    }

    /// Deletes a product with `DELETE /product/:id`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the product does not exist.
    /// - [`ClientError::Conflict`] if the backend refuses the delete.
    /// - [`ClientError::UnexpectedStatus`] or [`ClientError::Http`] otherwise.
    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("{PRODUCTS_PATH}/{id}"))?;
        let request = self.authorize(self.client.delete(url.clone()));
        check_status(request.send().await?, &url).await?;
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }

    async fn send_payload(
        &self,
        method: Method,
        path: &str,
        payload: WirePayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(path)?;
        let fields = payload.field_names();
        let form = payload.into_form()?;

        let request = self.authorize(self.client.request(method.clone(), url.clone()));
        check_status(request.multipart(form).send().await?, &url).await?;
        tracing::info!(%method, %url, ?fields, "product payload accepted");
        Ok(())
    }
}
