//! Remote employee resource: the `EmployeeApi` seam and its HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Employee, EmployeeId},
    protocol::EmployeePayload,
};
use tracing::{debug, info};
use url::Url;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list_employees(&self) -> ApiResult<Vec<Employee>>;
    /// Returns the record as echoed by the server, carrying its new id.
    async fn create_employee(&self, payload: &EmployeePayload) -> ApiResult<Employee>;
    async fn update_employee(
        &self,
        id: EmployeeId,
        payload: &EmployeePayload,
    ) -> ApiResult<Employee>;
    async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()>;
}

pub struct HttpEmployeeApi {
    http: Client,
    base_url: Url,
}

impl HttpEmployeeApi {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Url {
        self.base_url.clone()
    }

    fn item_url(&self, id: EmployeeId) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base urls, so segments are available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }
}

/// Validates an API base url: absolute http(s) with a hierarchical path.
pub fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ApiError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: "url cannot carry a resource path".to_string(),
        });
    }
    Ok(url)
}

async fn send_checked(
    endpoint: &Url,
    request: reqwest::RequestBuilder,
) -> ApiResult<Response> {
    let response = request.send().await.map_err(|source| ApiError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(endpoint: &Url, response: Response) -> ApiResult<T> {
    response.json().await.map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        let endpoint = self.collection_url();
        debug!(%endpoint, "employee api: list");
        let response = send_checked(&endpoint, self.http.get(endpoint.clone())).await?;
        let employees: Vec<Employee> = decode(&endpoint, response).await?;
        info!(count = employees.len(), "employee api: list ok");
        Ok(employees)
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> ApiResult<Employee> {
        let endpoint = self.collection_url();
        debug!(%endpoint, "employee api: create");
        let response =
            send_checked(&endpoint, self.http.post(endpoint.clone()).json(payload)).await?;
        let created: Employee = decode(&endpoint, response).await?;
        info!(employee_id = created.id.0, "employee api: create ok");
        Ok(created)
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        payload: &EmployeePayload,
    ) -> ApiResult<Employee> {
        let endpoint = self.item_url(id);
        debug!(%endpoint, employee_id = id.0, "employee api: update");
        let response =
            send_checked(&endpoint, self.http.put(endpoint.clone()).json(payload)).await?;
        let echoed: Employee = decode(&endpoint, response).await?;
        info!(employee_id = id.0, "employee api: update ok");
        Ok(echoed)
    }

    async fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
        let endpoint = self.item_url(id);
        debug!(%endpoint, employee_id = id.0, "employee api: delete");
        send_checked(&endpoint, self.http.delete(endpoint.clone())).await?;
        info!(employee_id = id.0, "employee api: delete ok");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
