// HTTP client for the orchestration API
pub mod deployment_client;

// Resource schema and form → resource mapping
pub mod kube_resources;
pub mod mappers;

pub use deployment_client::{DeploymentApi, HttpDeploymentClient};
