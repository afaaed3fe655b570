use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use url::{ParseError, Url};

use crate::errors::StoreError;
use crate::record::{Collection, Record};

pub mod mock;

/// How long an insert may take, from connecting to reading the response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub trait Store: Send + Sync {
    /// Appends a record to the given collection.
    fn insert(&self, collection: Collection, record: Record) -> BoxFuture<Result<(), StoreError>>;
}

/// A store that appends records to a Supabase project through its REST
/// interface.
pub struct SupabaseStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseStore {
    /// Creates a new instance. `base_url` is the project URL.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        mut base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| StoreError::Client { source })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Gets the URL records in the given collection are posted to.
    pub fn endpoint(&self, collection: Collection) -> Result<Url, ParseError> {
        self.base_url.join(&format!("rest/v1/{}", collection))
    }
}

impl Store for SupabaseStore {
    fn insert(&self, collection: Collection, record: Record) -> BoxFuture<Result<(), StoreError>> {
        insert(self, collection, record).boxed()
    }
}

async fn insert(store: &SupabaseStore, collection: Collection, record: Record) -> Result<(), StoreError> {
    let url = store
        .endpoint(collection)
        .map_err(|source| StoreError::Endpoint {
            collection: collection.to_string(),
            source,
        })?;

    let body = serde_json::to_vec(&record).map_err(|source| StoreError::Encoding { source })?;

    let response = store
        .client
        .post(url)
        .header("apikey", &store.api_key)
        .header(AUTHORIZATION, format!("Bearer {}", store.api_key))
        .header(CONTENT_TYPE, "application/json")
        .header("Prefer", "return=minimal")
        .body(body)
        .send()
        .await
        .map_err(|source| StoreError::Request { source })?;

    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    // the body is only for the logs
    let body = response.text().await.unwrap_or_default();

    Err(StoreError::Rejected {
        status: status.as_u16(),
        body,
    })
}
