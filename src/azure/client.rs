//! Thin REST client for the Azure Resource Manager control plane.
//!
//! Implements the [`ResourceApi`] and [`SqlApi`] capability traits over plain
//! HTTPS. Every request carries a freshly acquired bearer token; there is no
//! retry or caching layer here, faults surface directly to the caller.
//!
//! Long-running creates (`createOrUpdateServer`, `createOrUpdateDatabase`)
//! follow the ARM async-operation protocol: the initial PUT answers 201/202
//! with an `Azure-AsyncOperation` (or `Location`) header, which is polled,
//! honoring `Retry-After`, until the operation reaches a terminal state.

use crate::azure::api::{ResourceApi, SqlApi};
use crate::azure::credentials::{acquire_arm_token, SharedCredential};
use crate::azure::models::{
    CheckNameRequest, Database, DatabaseParams, ErrorResponse, ListResult, NameAvailability,
    OperationStatus, ResourceGroup, ResourceGroupParams, ServerParams, SqlServer,
};
use crate::constants::{
    ARM_BASE_URL, DEFAULT_LRO_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT, RESOURCES_API_VERSION,
    SQL_API_VERSION, SQL_SERVER_RESOURCE_TYPE,
};
use crate::error::ServerError;
use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// ARM REST client bound to one credential and one subscription.
pub struct ArmClient {
    http: reqwest::Client,
    credential: SharedCredential,
    subscription_id: String,
    base_url: String,
}

impl ArmClient {
    /// Create a client bound to the given credential and subscription.
    pub fn new(credential: SharedCredential, subscription_id: &str) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServerError::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            credential,
            subscription_id: subscription_id.to_string(),
            base_url: ARM_BASE_URL.to_string(),
        })
    }

    /// Override the ARM endpoint. Used by sovereign clouds and tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn subscription_url(&self, suffix: &str, api_version: &str) -> String {
        format!(
            "{}/subscriptions/{}{}?api-version={}",
            self.base_url, self.subscription_id, suffix, api_version
        )
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ServerError> {
        let token = acquire_arm_token(&self.credential).await?;

        let mut request = self.http.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!("ARM {} {}", method, url);
        let response = request.send().await?;
        Ok(response)
    }

    /// Turn a non-success response into a [`ServerError`].
    async fn fail(response: Response) -> ServerError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error);
        let code = detail.as_ref().and_then(|d| d.code.clone());
        let message = detail
            .and_then(|d| d.message)
            .unwrap_or_else(|| format!("ARM request failed with status {}", status));

        if status == StatusCode::NOT_FOUND {
            return ServerError::NotFound(message);
        }
        ServerError::api(status.as_u16(), code, message)
    }

    async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ServerError> {
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ServerError::invalid_response(e.to_string()))
    }

    /// GET a pageable listing, following `nextLink` until exhausted.
    async fn get_all<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>, ServerError> {
        let mut items = Vec::new();
        let mut url = Some(first_url);

        while let Some(current) = url.take() {
            let response = self.send(Method::GET, &current, None).await?;
            let page: ListResult<T> = Self::expect_json(response).await?;
            items.extend(page.value);
            url = page.next_link;
        }

        Ok(items)
    }

    /// Drive a long-running PUT to its terminal state.
    ///
    /// 200/201 without an async header means the operation completed inline.
    async fn wait_for_completion(&self, response: Response) -> Result<(), ServerError> {
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let async_url = header(&response, "azure-asyncoperation");
        let location_url = header(&response, "location");
        let mut delay = retry_after(&response).unwrap_or(DEFAULT_LRO_POLL_INTERVAL);

        let Some(poll_url) = async_url.clone().or(location_url) else {
            // Completed synchronously.
            return Ok(());
        };
        let is_operation_status = async_url.is_some();

        loop {
            tokio::time::sleep(delay).await;

            let response = self.send(Method::GET, &poll_url, None).await?;
            if !response.status().is_success() {
                return Err(Self::fail(response).await);
            }
            delay = retry_after(&response).unwrap_or(DEFAULT_LRO_POLL_INTERVAL);

            if is_operation_status {
                let status: OperationStatus = Self::expect_json(response).await?;
                if !status.is_terminal() {
                    debug!("Operation in progress: {}", status.status);
                    continue;
                }
                if status.succeeded() {
                    return Ok(());
                }
                let message = status
                    .error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| format!("operation ended in state {}", status.status));
                return Err(ServerError::operation(message));
            }

            // Location-based polling: 202 means still running, 200 means done.
            match response.status() {
                StatusCode::ACCEPTED => continue,
                _ => return Ok(()),
            }
        }
    }
}

/// Read a response header as an owned string.
fn header(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Parse a `Retry-After` header into a Duration.
fn retry_after(response: &Response) -> Option<Duration> {
    header(response, "retry-after")?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl ResourceApi for ArmClient {
    async fn list_resource_groups(&self) -> Result<Vec<ResourceGroup>, ServerError> {
        let url = self.subscription_url("/resourcegroups", RESOURCES_API_VERSION);
        self.get_all(url).await
    }

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        params: ResourceGroupParams,
    ) -> Result<ResourceGroup, ServerError> {
        let url = self.subscription_url(&format!("/resourcegroups/{}", name), RESOURCES_API_VERSION);
        let body = serde_json::to_value(&params)
            .map_err(|e| ServerError::invalid_response(e.to_string()))?;

        let response = self.send(Method::PUT, &url, Some(body)).await?;
        Self::expect_json(response).await
    }
}

#[async_trait]
impl SqlApi for ArmClient {
    async fn list_servers(
        &self,
        resource_group: Option<&str>,
    ) -> Result<Vec<SqlServer>, ServerError> {
        let url = match resource_group {
            Some(rg) => self.subscription_url(
                &format!("/resourceGroups/{}/providers/Microsoft.Sql/servers", rg),
                SQL_API_VERSION,
            ),
            None => self.subscription_url("/providers/Microsoft.Sql/servers", SQL_API_VERSION),
        };
        self.get_all(url).await
    }

    async fn get_server(
        &self,
        resource_group: &str,
        server_name: &str,
    ) -> Result<SqlServer, ServerError> {
        let url = self.subscription_url(
            &format!(
                "/resourceGroups/{}/providers/Microsoft.Sql/servers/{}",
                resource_group, server_name
            ),
            SQL_API_VERSION,
        );
        let response = self.send(Method::GET, &url, None).await?;
        Self::expect_json(response).await
    }

    async fn check_server_name_availability(
        &self,
        server_name: &str,
    ) -> Result<NameAvailability, ServerError> {
        let url = self.subscription_url(
            "/providers/Microsoft.Sql/checkNameAvailability",
            SQL_API_VERSION,
        );
        let request = CheckNameRequest {
            name: server_name.to_string(),
            resource_type: SQL_SERVER_RESOURCE_TYPE.to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| ServerError::invalid_response(e.to_string()))?;

        let response = self.send(Method::POST, &url, Some(body)).await?;
        Self::expect_json(response).await
    }

    async fn create_or_update_server(
        &self,
        resource_group: &str,
        server_name: &str,
        params: ServerParams,
    ) -> Result<SqlServer, ServerError> {
        let url = self.subscription_url(
            &format!(
                "/resourceGroups/{}/providers/Microsoft.Sql/servers/{}",
                resource_group, server_name
            ),
            SQL_API_VERSION,
        );
        let body = serde_json::to_value(&params)
            .map_err(|e| ServerError::invalid_response(e.to_string()))?;

        let response = self.send(Method::PUT, &url, Some(body)).await?;
        self.wait_for_completion(response).await?;

        // Fetch the terminal state of the server for the confirmation text.
        self.get_server(resource_group, server_name).await.map_err(|e| {
            warn!("Server created but readback failed: {}", e);
            e
        })
    }

    async fn list_databases(
        &self,
        resource_group: &str,
        server_name: &str,
    ) -> Result<Vec<Database>, ServerError> {
        let url = self.subscription_url(
            &format!(
                "/resourceGroups/{}/providers/Microsoft.Sql/servers/{}/databases",
                resource_group, server_name
            ),
            SQL_API_VERSION,
        );
        self.get_all(url).await
    }

    async fn create_or_update_database(
        &self,
        resource_group: &str,
        server_name: &str,
        database_name: &str,
        params: DatabaseParams,
    ) -> Result<Database, ServerError> {
        let url = self.subscription_url(
            &format!(
                "/resourceGroups/{}/providers/Microsoft.Sql/servers/{}/databases/{}",
                resource_group, server_name, database_name
            ),
            SQL_API_VERSION,
        );
        let body = serde_json::to_value(&params)
            .map_err(|e| ServerError::invalid_response(e.to_string()))?;

        let response = self.send(Method::PUT, &url, Some(body)).await?;
        self.wait_for_completion(response).await?;

        let get_url = self.subscription_url(
            &format!(
                "/resourceGroups/{}/providers/Microsoft.Sql/servers/{}/databases/{}",
                resource_group, server_name, database_name
            ),
            SQL_API_VERSION,
        );
        let response = self.send(Method::GET, &get_url, None).await?;
        Self::expect_json(response).await
    }
}
