use anyhow::Context;
use async_trait::async_trait;
use banner_scheduler::{ItemId, ScheduleStore, ScheduleUpdate, StoreError, StoredItem};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use std::time::Duration;

use crate::api::dto::ErrorBody;

const BANNERS_PATH: &str = "/banners";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP adapter for the banner document store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| {
                StoreError::Unknown(format!("Failed to build URL for path {}: {}", path, e))
            })
    }

    fn banner_url(&self, id: &ItemId) -> Result<Url, StoreError> {
        let mut url = self.endpoint(BANNERS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| StoreError::unknown("API URL cannot carry a path"))?
            .push(id.as_str());
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        call_name: &str,
        id: Option<&ItemId>,
    ) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to call {}: {}", call_name, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let error = status_error(status, body.into_message(), id);
        tracing::warn!("{} returned {}: {}", call_name, status, error);
        Err(error)
    }
}

/// Map a non-2xx response onto the port's error kinds.
fn status_error(status: StatusCode, message: Option<String>, id: Option<&ItemId>) -> StoreError {
    let message = message.unwrap_or_else(|| status.to_string());
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => StoreError::NotFound(id.clone()),
        (s, _) if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            StoreError::Unavailable(message)
        }
        (s, _) if s.is_client_error() => StoreError::Rejected(message),
        _ => StoreError::Unknown(message),
    }
}

#[async_trait]
impl ScheduleStore for ApiClient {
    async fn fetch_items(&self) -> Result<Vec<StoredItem>, StoreError> {
        let response = self
            .send(
                self.client.get(self.endpoint(BANNERS_PATH)?),
                "GET /banners",
                None,
            )
            .await?;

        response
            .json::<Vec<StoredItem>>()
            .await
            .map_err(|e| {
                StoreError::Unknown(format!("Failed to parse GET /banners response: {}", e))
            })
    }

    async fn update_schedule(
        &self,
        id: &ItemId,
        update: &ScheduleUpdate,
    ) -> Result<(), StoreError> {
        let response = self
            .send(
                self.client.patch(self.banner_url(id)?).json(update),
                "PATCH /banners/{id}",
                Some(id),
            )
            .await?;

        let _ = response.bytes().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_url_escapes_the_id() {
        let client = ApiClient::new("http://localhost:8080/", None).unwrap();
        let url = client.banner_url(&ItemId::new("summer sale/1")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/banners/summer%20sale%2F1");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ApiClient::new("not a url", None).is_err());
    }

    #[test]
    fn statuses_map_to_store_errors() {
        let id = ItemId::new("a");

        assert_eq!(
            status_error(StatusCode::NOT_FOUND, None, Some(&id)),
            StoreError::NotFound(id.clone())
        );
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, Some("bad window".to_string()), Some(&id)),
            StoreError::Rejected("bad window".to_string())
        );
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, None, None),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, None, None),
            StoreError::Rejected(_)
        ));
    }

    #[test]
    fn error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "locked", "error": "conflict"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("locked"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": " "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
