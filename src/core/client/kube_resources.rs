/// Re-export the Kubernetes resource types the console builds and reads.
/// The orchestration API speaks the upstream apps/v1 and core/v1 schema.

pub use k8s_openapi::api::core::v1::{
    Container,
    ContainerPort,
    Pod,
    PodSpec,
    PodTemplateSpec,
    ResourceRequirements,
};

pub use k8s_openapi::api::apps::v1::{
    Deployment,
    DeploymentSpec,
};

pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector,
    ObjectMeta,
};
