//! Maps operator form input onto the orchestration API's Deployment resource
use std::collections::BTreeMap;

use crate::core::client::kube_resources::{
    Container, ContainerPort, Deployment, DeploymentSpec, LabelSelector, ObjectMeta, PodSpec,
    PodTemplateSpec, Quantity, ResourceRequirements,
};
use crate::domain::deployment::dto::deployment_form::DeploymentForm;
use crate::errors::ConsoleResult;

/// Label key shared by metadata, selector and pod template.
pub const APP_LABEL: &str = "app";

/// Port exposed by the single container of every created deployment.
pub const CONTAINER_PORT: i32 = 80;

/// Builds the full apps/v1 Deployment document for a create call.
///
/// The name doubles as the `app` label value on metadata, selector and pod
/// template. The single container gets identical requests and limits.
pub fn build_deployment_resource(form: &DeploymentForm) -> ConsoleResult<Deployment> {
    let replicas = form.parsed_replicas()?;
    let labels = app_labels(&form.name);

    let quantities = BTreeMap::from([
        ("cpu".to_string(), Quantity(form.cpu_request.clone())),
        ("memory".to_string(), Quantity(form.memory_request.clone())),
    ]);

    let container = Container {
        name: form.name.clone(),
        image: Some(form.image.clone()),
        ports: Some(vec![ContainerPort {
            container_port: CONTAINER_PORT,
            ..Default::default()
        }]),
        resources: Some(ResourceRequirements {
            requests: Some(quantities.clone()),
            limits: Some(quantities),
            ..Default::default()
        }),
        ..Default::default()
    };

    Ok(Deployment {
        metadata: ObjectMeta {
            name: Some(form.name.clone()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn app_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(APP_LABEL.to_string(), name.to_string())])
}
