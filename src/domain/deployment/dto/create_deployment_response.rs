use serde::Deserialize;

/// Body of a successful create call: `{ "message": ..., "name": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateDeploymentResponse {
    pub message: Option<String>,
    pub name: Option<String>,
}

/// Structured error body. Only the create endpoint is expected to send one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorBody {
    pub error: Option<String>,
}
