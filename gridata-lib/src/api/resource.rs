//! Resource CRUD operations
//!
//! A [`Resource`] binds a collection name to a client and exposes the CRUD
//! surface against `odata/{resource}` endpoints. Resources own no state; an
//! operation is a pure function of (resource name, query options) to
//! request, so reads are idempotent and safe to re-issue.
//!
//! # Example
//!
//! ```ignore
//! use gridata_lib::api::{Encoding, UpdateMode};
//! use gridata_lib::api::query::QueryOptions;
//!
//! let employees = client.resource("employees");
//!
//! let page: Envelope<Vec<Employee>> = employees
//!     .read(&QueryOptions::new().top(10).include_count())
//!     .await?;
//!
//! employees.update(&changes, 7, Encoding::Json, UpdateMode::Merge).await?;
//! ```

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ODataClient;
use crate::api::multipart::form_from_value;
use crate::api::query::QueryOptions;
use crate::client::Payload;
use crate::error::ApiError;
use crate::error::Error;
use crate::response::Envelope;

/// How a request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// JSON body (`Content-Type: application/json`).
    #[default]
    Json,
    /// Flattened multipart form (`Content-Type: multipart/form-data`),
    /// array-valued fields expanded with numeric indices.
    Multipart,
}

/// Update semantics for [`Resource::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Partial merge (PATCH): only the supplied fields change.
    #[default]
    Merge,
    /// Full replace (PUT): the record is replaced wholesale.
    Replace,
}

/// A named backend collection exposed via CRUD endpoints.
#[derive(Clone)]
pub struct Resource {
    client: ODataClient,
    name: String,
}

impl ODataClient {
    /// Binds a collection name, returning its CRUD surface.
    pub fn resource(&self, name: impl Into<String>) -> Resource {
        Resource {
            client: self.clone(),
            name: name.into(),
        }
    }
}

impl Resource {
    /// The collection name (the `{resource}` path segment).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key a caller-side request layer should de-duplicate and supersede
    /// reads by: resource name plus the serialized query.
    pub fn request_key(&self, query: &QueryOptions) -> String {
        format!("{}{}", self.name, query.to_query_string())
    }

    fn collection_url(&self) -> String {
        format!("{}/odata/{}", self.client.base_url(), self.name)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Creates a record with a POST to `odata/{resource}`.
    pub async fn create<T>(&self, data: &T, encoding: Encoding) -> Result<Envelope<T>, Error>
    where
        T: Serialize + DeserializeOwned,
    {
        let url = self.collection_url();
        let payload = encode(data, encoding)?;
        let response = self.client.request(Method::POST, &url, payload).await?;
        decode(response).await
    }

    /// Reads a page of records from `odata/{resource}{?query}`.
    pub async fn read<T>(&self, query: &QueryOptions) -> Result<Envelope<Vec<T>>, Error>
    where
        T: DeserializeOwned,
    {
        self.read_with(query, &[], None).await
    }

    /// Reads a page of records, with pre-formatted extra query fragments
    /// appended (joined by `&`) and an optional sub-resource path segment
    /// inserted before the query string.
    pub async fn read_with<T>(
        &self,
        query: &QueryOptions,
        extra_query: &[String],
        sub_path: Option<&str>,
    ) -> Result<Envelope<Vec<T>>, Error>
    where
        T: DeserializeOwned,
    {
        let mut qs = query.to_query_string();
        if !extra_query.is_empty() {
            let separator = if qs.is_empty() { "?" } else { "&" };
            qs.push_str(separator);
            qs.push_str(&extra_query.join("&"));
        }

        let url = match sub_path {
            Some(path) => format!("{}/{}{}", self.collection_url(), path, qs),
            None => format!("{}{}", self.collection_url(), qs),
        };

        let response = self.client.request(Method::GET, &url, Payload::None).await?;
        decode(response).await
    }

    /// Reads a single record from `odata/{resource}/{id}{?query}`.
    pub async fn read_by_id<T>(&self, id: i64, query: &QueryOptions) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.item_url(id), query.to_query_string());
        let response = self.client.request(Method::GET, &url, Payload::None).await?;
        decode(response).await
    }

    /// Updates a record: PATCH for [`UpdateMode::Merge`], PUT for
    /// [`UpdateMode::Replace`]. Same encoding rule as [`Resource::create`].
    pub async fn update<T>(
        &self,
        data: &T,
        id: i64,
        encoding: Encoding,
        mode: UpdateMode,
    ) -> Result<(), Error>
    where
        T: Serialize,
    {
        let method = match mode {
            UpdateMode::Merge => Method::PATCH,
            UpdateMode::Replace => Method::PUT,
        };
        let payload = encode(data, encoding)?;
        self.client.request(method, &self.item_url(id), payload).await?;
        Ok(())
    }

    /// Deletes a record with a DELETE to `odata/{resource}/{id}`.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), Error> {
        self.client
            .request(Method::DELETE, &self.item_url(id), Payload::None)
            .await?;
        Ok(())
    }
}

fn encode<T: Serialize>(data: &T, encoding: Encoding) -> Result<Payload, Error> {
    match encoding {
        Encoding::Json => {
            let body = serde_json::to_string(data).map_err(ApiError::Encode)?;
            Ok(Payload::Json(body))
        }
        Encoding::Multipart => {
            let value = serde_json::to_value(data).map_err(ApiError::Encode)?;
            Ok(Payload::Multipart(form_from_value(&value)))
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let body = response.text().await.map_err(ApiError::from)?;
    serde_json::from_str(&body).map_err(|e| {
        Error::Api(ApiError::parse_with_body(
            format!("Failed to decode response: {e}"),
            body,
        ))
    })
}
