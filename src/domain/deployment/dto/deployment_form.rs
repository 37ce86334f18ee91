use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::{ConsoleError, ConsoleResult};

/// The five operator-entered fields of the create form.
///
/// `replicas` stays text until submission, mirroring what the operator typed.
/// `cpu_request` / `memory_request` use the orchestration API's quantity
/// syntax (`500m`, `256Mi`) and are applied as both requests and limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeploymentForm {
    #[validate(length(min = 1, message = "Deployment name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Container image is required"))]
    pub image: String,

    #[validate(custom(function = "validate_replicas"))]
    pub replicas: String,

    #[validate(length(min = 1, message = "CPU request is required"))]
    pub cpu_request: String,

    #[validate(length(min = 1, message = "Memory request is required"))]
    pub memory_request: String,
}

impl DeploymentForm {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        replicas: impl Into<String>,
        cpu_request: impl Into<String>,
        memory_request: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            replicas: replicas.into(),
            cpu_request: cpu_request.into(),
            memory_request: memory_request.into(),
        }
    }

    /// Integer replica count, rejected when negative or not a number.
    pub fn parsed_replicas(&self) -> ConsoleResult<i32> {
        parse_replicas(&self.replicas).ok_or_else(|| {
            ConsoleError::InvalidForm(format!(
                "replicas: expected a non-negative integer, got '{}'",
                self.replicas
            ))
        })
    }

    /// Strips surrounding whitespace from every field, so blank input fails
    /// the `min = 1` rules and nothing padded reaches the server.
    pub fn trim(&mut self) {
        for field in [
            &mut self.name,
            &mut self.image,
            &mut self.replicas,
            &mut self.cpu_request,
            &mut self.memory_request,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
    }

    /// Resets every field, as after a successful submission.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn parse_replicas(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|r| *r >= 0)
}

fn validate_replicas(raw: &str) -> Result<(), ValidationError> {
    match parse_replicas(raw) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("replicas")
            .with_message(Cow::Borrowed("Replicas must be a non-negative integer"))),
    }
}
