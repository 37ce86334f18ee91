use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::core::client::kube_resources::{Deployment, Pod};
use crate::core::client::mappers::build_deployment_resource;
use crate::core::config::ConsoleConfig;
use crate::domain::deployment::dto::create_deployment_response::{
    CreateDeploymentResponse, ServerErrorBody,
};
use crate::domain::deployment::dto::deployment_form::DeploymentForm;
use crate::domain::deployment::dto::deployment_summary::DeploymentSummary;
use crate::errors::{transport_error, ConsoleError, ConsoleResult};

/// Namespace-scoped operations against the orchestration API.
///
/// Every call either succeeds or yields a [`ConsoleError`]; nothing is
/// retried and no state is kept between calls.
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Deployments in server order.
    async fn list_deployments(&self, namespace: &str) -> ConsoleResult<Vec<DeploymentSummary>>;

    async fn create_deployment(
        &self,
        namespace: &str,
        form: &DeploymentForm,
    ) -> ConsoleResult<CreateDeploymentResponse>;

    /// `replicas` is forwarded untouched, negative values included.
    async fn scale_deployment(&self, namespace: &str, name: &str, replicas: i64)
        -> ConsoleResult<()>;

    async fn delete_deployment(&self, namespace: &str, name: &str) -> ConsoleResult<()>;

    async fn get_deployment(&self, namespace: &str, name: &str) -> ConsoleResult<Deployment>;

    async fn list_pods(&self, namespace: &str) -> ConsoleResult<Vec<Pod>>;
}

pub struct HttpDeploymentClient {
    client: Client,
    api_base: String,
}

impl HttpDeploymentClient {
    pub fn new(config: &ConsoleConfig) -> ConsoleResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConsoleError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.api_base))
    }

    pub fn with_client(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn deployments_url(&self, namespace: &str) -> String {
        format!("{}/deployments/{}", self.api_base, encode(namespace))
    }

    fn deployment_url(&self, namespace: &str, name: &str) -> String {
        format!("{}/{}", self.deployments_url(namespace), encode(name))
    }

    fn pods_url(&self, namespace: &str) -> String {
        format!("{}/pods/{}", self.api_base, encode(namespace))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ConsoleResult<T> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let resp = ensure_success(resp)?;

        resp.json::<T>()
            .await
            .map_err(|e| transport_error(format!("Failed to decode response from {}: {}", url, e)))
    }
}

/// Non-2xx → `ConsoleError::Server` without reading a structured body.
fn ensure_success(resp: Response) -> ConsoleResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    warn!("Request to {} failed with status {}", resp.url(), status);
    Err(ConsoleError::Server {
        status: status.as_u16(),
        message: None,
    })
}

#[async_trait]
impl DeploymentApi for HttpDeploymentClient {
    async fn list_deployments(&self, namespace: &str) -> ConsoleResult<Vec<DeploymentSummary>> {
        let deployments: Vec<DeploymentSummary> =
            self.get_json(&self.deployments_url(namespace)).await?;

        debug!(
            "Fetched {} deployment(s) in namespace '{}'",
            deployments.len(),
            namespace
        );
        Ok(deployments)
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        form: &DeploymentForm,
    ) -> ConsoleResult<CreateDeploymentResponse> {
        let resource = build_deployment_resource(form)?;
        let url = self.deployments_url(namespace);

        debug!("POST {} (deployment '{}')", url, form.name);
        let resp = self.client.post(&url).json(&resource).send().await?;

        let status = resp.status();
        if !status.is_success() {
            // The create endpoint answers `{ "error": "..." }` on failure.
            let body = resp.json::<ServerErrorBody>().await.ok();
            let message = body.and_then(|b| b.error);
            warn!(
                "Create of deployment '{}' in '{}' rejected with {}: {:?}",
                form.name, namespace, status, message
            );
            return Err(ConsoleError::Server {
                status: status.as_u16(),
                message,
            });
        }

        // Success bodies are informational only.
        let created = resp
            .json::<CreateDeploymentResponse>()
            .await
            .unwrap_or_default();

        debug!(
            "Created deployment '{}' in namespace '{}'",
            created.name.as_deref().unwrap_or(&form.name),
            namespace
        );
        Ok(created)
    }

    async fn scale_deployment(
        &self,
        namespace: &str,
        name: &str,
        replicas: i64,
    ) -> ConsoleResult<()> {
        let url = format!("{}/scale", self.deployment_url(namespace, name));

        debug!("POST {}?replicas={}", url, replicas);
        let resp = self
            .client
            .post(&url)
            .query(&[("replicas", replicas)])
            .send()
            .await?;
        ensure_success(resp)?;

        debug!("Scaled deployment {}/{} to {}", namespace, name, replicas);
        Ok(())
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> ConsoleResult<()> {
        let url = self.deployment_url(namespace, name);

        debug!("DELETE {}", url);
        let resp = self.client.delete(&url).send().await?;
        ensure_success(resp)?;

        debug!("Deleted deployment {}/{}", namespace, name);
        Ok(())
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> ConsoleResult<Deployment> {
        let deployment: Deployment = self.get_json(&self.deployment_url(namespace, name)).await?;

        debug!("Fetched deployment: {}/{}", namespace, name);
        Ok(deployment)
    }

    async fn list_pods(&self, namespace: &str) -> ConsoleResult<Vec<Pod>> {
        let pods: Vec<Pod> = self.get_json(&self.pods_url(namespace)).await?;

        debug!("Fetched {} pod(s) in namespace '{}'", pods.len(), namespace);
        Ok(pods)
    }
}
