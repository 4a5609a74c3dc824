//! HTTP access to the resume backend. No other module builds requests;
//! section editors go through [`ResourceApi`].
//!
//! Failed calls are not retried.
use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ClientError;

/// CRUD transport for one resume section resource (`education`, `award`, ...).
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(&self, resource: &str) -> Result<Value, ClientError>;
    async fn get_one(&self, resource: &str, id: &str) -> Result<Value, ClientError>;
    async fn create(&self, resource: &str, body: Value) -> Result<Value, ClientError>;
    async fn update(&self, resource: &str, id: &str, body: Value) -> Result<Value, ClientError>;
    async fn delete(&self, resource: &str, id: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Items(Vec<DetailItem>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    msg: String,
}

/// Extracts the display message from an error body.
/// `{"detail": "..."}` is used as-is; a list of field errors is joined with `", "`.
pub fn detail_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Detail::Message(message),
        }) => message,
        Ok(ErrorBody {
            detail: Detail::Items(items),
        }) => items
            .into_iter()
            .map(|i| i.msg)
            .collect::<Vec<_>>()
            .join(", "),
        Ok(ErrorBody {
            detail: Detail::Other(value),
        }) => value.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Maps a non-success status and its body onto the client error taxonomy.
pub fn error_for_status(status: StatusCode, body: &str) -> ClientError {
    let message = detail_message(body);
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        s if s.is_client_error() => ClientError::Rejected {
            status: s.as_u16(),
            message,
        },
        s => ClientError::Unexpected {
            status: s.as_u16(),
            message,
        },
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(config.http_timeout).build()?,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, path).query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    /// POST without a body, for action endpoints such as revoke/unrevoke.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::POST, path)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    /// DELETE, tolerating both `204 No Content` and a JSON acknowledgement.
    pub async fn delete_path(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.request(Method::DELETE, path).send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::POST, path).multipart(form))
            .await
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Backend returned {}: {}", status, body);
    Err(error_for_status(status, &body))
}

pub fn collection_path(resource: &str) -> String {
    format!("/api/{resource}/")
}

pub fn item_path(resource: &str, id: &str) -> String {
    format!("/api/{resource}/{id}")
}

#[async_trait]
impl ResourceApi for ApiClient {
    async fn list(&self, resource: &str) -> Result<Value, ClientError> {
        self.get(&collection_path(resource)).await
    }

    async fn get_one(&self, resource: &str, id: &str) -> Result<Value, ClientError> {
        self.get(&item_path(resource, id)).await
    }

    async fn create(&self, resource: &str, body: Value) -> Result<Value, ClientError> {
        self.post(&collection_path(resource), &body).await
    }

    async fn update(&self, resource: &str, id: &str, body: Value) -> Result<Value, ClientError> {
        self.put(&item_path(resource, id), &body).await
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<(), ClientError> {
        self.delete_path(&item_path(resource, id)).await.map(|_| ())
    }
}
