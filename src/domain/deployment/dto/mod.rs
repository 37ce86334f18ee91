pub mod create_deployment_response;
pub mod deployment_form;
pub mod deployment_summary;
