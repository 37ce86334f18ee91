//! Operator console for namespace-scoped deployments behind an orchestration
//! REST API: list, create, scale and delete, with a full re-fetch after every
//! accepted change.

pub mod app_state;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod shell;
