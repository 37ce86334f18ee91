use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::client::deployment_client::DeploymentApi;
use crate::core::client::kube_resources::{Deployment, Pod};
use crate::core::state::runtime::notifications::{NotificationCenter, Severity};
use crate::domain::console::service::confirmer::Confirmer;
use crate::domain::console::view::{render_rows, DeploymentRow, RowAction};
use crate::domain::deployment::dto::deployment_form::DeploymentForm;
use crate::errors::ConsoleError;

pub const LIST_FAILED: &str = "Failed to fetch deployments";
pub const CREATE_FAILED: &str = "Failed to create deployment";
pub const SCALE_FAILED: &str = "Failed to scale deployment";
pub const DELETE_FAILED: &str = "Failed to delete deployment";
pub const PODS_FAILED: &str = "Failed to fetch pods";
pub const CREATE_SUCCEEDED: &str = "Deployment created successfully";

/// Result of one operator action as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the call.
    Applied,
    /// The call failed; the rendered rows were left untouched.
    Failed,
    /// The operator declined confirmation; nothing was sent.
    Declined,
}

/// Mediates between operator intent, the deployment client and the rendered
/// rows.
///
/// The rows are only ever replaced wholesale from a fresh listing, and a
/// listing is only requested after the mutating call it follows has
/// completed. Each action produces exactly one notification for its own
/// outcome.
pub struct ViewController<C, F> {
    client: C,
    confirmer: F,
    namespace: String,
    rows: Vec<DeploymentRow>,
    notifications: NotificationCenter,
}

impl<C: DeploymentApi, F: Confirmer> ViewController<C, F> {
    pub fn new(
        client: C,
        confirmer: F,
        namespace: impl Into<String>,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            client,
            confirmer,
            namespace: namespace.into(),
            rows: Vec::new(),
            notifications,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn rows(&self) -> &[DeploymentRow] {
        &self.rows
    }

    pub fn find_row(&self, name: &str) -> Option<&DeploymentRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn initialize(&mut self) -> ActionOutcome {
        info!("Loading deployments for namespace '{}'", self.namespace);
        self.refresh_deployments().await
    }

    /// Replaces every row from a fresh listing. On failure the previous rows
    /// stay visible.
    pub async fn refresh_deployments(&mut self) -> ActionOutcome {
        match self.client.list_deployments(&self.namespace).await {
            Ok(deployments) => {
                self.rows = render_rows(&deployments);
                debug!("Rendered {} deployment row(s)", self.rows.len());
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("Refresh of namespace '{}' failed: {}", self.namespace, e);
                self.notify(Severity::Error, e.user_message(LIST_FAILED))
                    .await;
                ActionOutcome::Failed
            }
        }
    }

    pub async fn scale_up(&mut self, row: &DeploymentRow) -> ActionOutcome {
        self.perform(row.scale_up()).await
    }

    pub async fn scale_down(&mut self, row: &DeploymentRow) -> ActionOutcome {
        self.perform(row.scale_down()).await
    }

    pub async fn delete(&mut self, row: &DeploymentRow) -> ActionOutcome {
        self.perform(row.delete()).await
    }

    pub async fn perform(&mut self, action: RowAction) -> ActionOutcome {
        match action {
            RowAction::Scale { name, target } => self.scale(&name, target).await,
            RowAction::Delete { name } => self.delete_after_confirmation(&name).await,
        }
    }

    /// Submits the create form. The form is cleared only on success so a
    /// rejected submission can be corrected and resent.
    pub async fn create_deployment(&mut self, form: &mut DeploymentForm) -> ActionOutcome {
        form.trim();
        if let Err(errors) = form.validate() {
            let err = ConsoleError::from(errors);
            warn!("Rejected create form: {}", err);
            self.notify(Severity::Error, err.user_message(CREATE_FAILED))
                .await;
            return ActionOutcome::Failed;
        }

        match self.client.create_deployment(&self.namespace, form).await {
            Ok(created) => {
                info!(
                    "Created deployment '{}' in '{}': {}",
                    form.name,
                    self.namespace,
                    created.message.as_deref().unwrap_or("accepted")
                );
                self.notify(Severity::Success, CREATE_SUCCEEDED).await;
                form.clear();
                self.refresh_deployments().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("Create of deployment '{}' failed: {}", form.name, e);
                self.notify(Severity::Error, e.user_message(CREATE_FAILED))
                    .await;
                ActionOutcome::Failed
            }
        }
    }

    /// Full resource of one deployment, read-only.
    pub async fn describe(&self, name: &str) -> Option<Deployment> {
        match self.client.get_deployment(&self.namespace, name).await {
            Ok(deployment) => Some(deployment),
            Err(e) => {
                warn!("Describe of deployment '{}' failed: {}", name, e);
                let fallback = format!("Failed to fetch deployment {}", name);
                self.notify(Severity::Error, e.user_message(&fallback)).await;
                None
            }
        }
    }

    pub async fn pods(&self) -> Option<Vec<Pod>> {
        match self.client.list_pods(&self.namespace).await {
            Ok(pods) => Some(pods),
            Err(e) => {
                warn!("Pod listing in '{}' failed: {}", self.namespace, e);
                self.notify(Severity::Error, e.user_message(PODS_FAILED))
                    .await;
                None
            }
        }
    }

    async fn scale(&mut self, name: &str, target: i64) -> ActionOutcome {
        match self
            .client
            .scale_deployment(&self.namespace, name, target)
            .await
        {
            Ok(()) => {
                info!("Scaled deployment '{}' to {} replicas", name, target);
                self.notify(
                    Severity::Success,
                    format!("Scaled deployment {} to {} replicas", name, target),
                )
                .await;
                self.refresh_deployments().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("Scale of deployment '{}' to {} failed: {}", name, target, e);
                self.notify(Severity::Error, SCALE_FAILED).await;
                ActionOutcome::Failed
            }
        }
    }

    async fn delete_after_confirmation(&mut self, name: &str) -> ActionOutcome {
        let prompt = format!("Are you sure you want to delete deployment {}?", name);
        if !self.confirmer.confirm(&prompt).await {
            debug!("Delete of deployment '{}' declined", name);
            return ActionOutcome::Declined;
        }

        match self.client.delete_deployment(&self.namespace, name).await {
            Ok(()) => {
                info!("Deleted deployment '{}' from '{}'", name, self.namespace);
                self.notify(Severity::Success, format!("Deleted deployment {}", name))
                    .await;
                self.refresh_deployments().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("Delete of deployment '{}' failed: {}", name, e);
                self.notify(Severity::Error, DELETE_FAILED).await;
                ActionOutcome::Failed
            }
        }
    }

    async fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.notifications.show(message, severity).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::kube_resources::ObjectMeta;
    use crate::domain::console::service::confirmer::AutoConfirm;
    use crate::domain::deployment::dto::create_deployment_response::CreateDeploymentResponse;
    use crate::domain::deployment::dto::deployment_summary::DeploymentSummary;
    use crate::errors::ConsoleResult;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tracing_subscriber::{fmt, EnvFilter};

    #[derive(Default)]
    struct MockDeploymentApi {
        server: Mutex<Vec<DeploymentSummary>>,
        calls: Mutex<Vec<String>>,
        failing: Mutex<Vec<&'static str>>,
        create_error: Mutex<Option<String>>,
    }

    impl MockDeploymentApi {
        fn with(deployments: Vec<DeploymentSummary>) -> Self {
            Self {
                server: Mutex::new(deployments),
                ..Default::default()
            }
        }

        fn fail(&self, op: &'static str) {
            self.failing.lock().unwrap().push(op);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, op: &'static str, call: String) -> ConsoleResult<()> {
            self.calls.lock().unwrap().push(call);
            if self.failing.lock().unwrap().contains(&op) {
                return Err(ConsoleError::Server {
                    status: 500,
                    message: None,
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DeploymentApi for MockDeploymentApi {
        async fn list_deployments(&self, namespace: &str) -> ConsoleResult<Vec<DeploymentSummary>> {
            self.record("list", format!("list:{}", namespace))?;
            Ok(self.server.lock().unwrap().clone())
        }

        async fn create_deployment(
            &self,
            _namespace: &str,
            form: &DeploymentForm,
        ) -> ConsoleResult<CreateDeploymentResponse> {
            self.record("create", format!("create:{}", form.name))?;
            if let Some(message) = self.create_error.lock().unwrap().clone() {
                return Err(ConsoleError::Server {
                    status: 409,
                    message: Some(message),
                });
            }
            let replicas = form.parsed_replicas()?;
            self.server
                .lock()
                .unwrap()
                .push(DeploymentSummary::new(form.name.clone(), replicas));
            Ok(CreateDeploymentResponse {
                message: Some(CREATE_SUCCEEDED.into()),
                name: Some(form.name.clone()),
            })
        }

        async fn scale_deployment(
            &self,
            _namespace: &str,
            name: &str,
            replicas: i64,
        ) -> ConsoleResult<()> {
            self.record("scale", format!("scale:{}:{}", name, replicas))?;
            let replicas = match i32::try_from(replicas) {
                Ok(r) if r >= 0 => r,
                _ => {
                    return Err(ConsoleError::Server {
                        status: 422,
                        message: None,
                    })
                }
            };
            for d in self.server.lock().unwrap().iter_mut() {
                if d.name == name {
                    d.replicas = replicas;
                }
            }
            Ok(())
        }

        async fn delete_deployment(&self, _namespace: &str, name: &str) -> ConsoleResult<()> {
            self.record("delete", format!("delete:{}", name))?;
            self.server.lock().unwrap().retain(|d| d.name != name);
            Ok(())
        }

        async fn get_deployment(&self, _namespace: &str, name: &str) -> ConsoleResult<Deployment> {
            self.record("get", format!("get:{}", name))?;
            let exists = self.server.lock().unwrap().iter().any(|d| d.name == name);
            if !exists {
                return Err(ConsoleError::Server {
                    status: 404,
                    message: None,
                });
            }
            Ok(Deployment {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            })
        }

        async fn list_pods(&self, namespace: &str) -> ConsoleResult<Vec<Pod>> {
            self.record("pods", format!("pods:{}", namespace))?;
            Ok(Vec::new())
        }
    }

    fn controller(
        deployments: Vec<DeploymentSummary>,
        confirm: bool,
    ) -> ViewController<MockDeploymentApi, AutoConfirm> {
        let _ = fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();

        ViewController::new(
            MockDeploymentApi::with(deployments),
            AutoConfirm(confirm),
            "default",
            NotificationCenter::new(),
        )
    }

    async fn messages(c: &ViewController<MockDeploymentApi, AutoConfirm>) -> Vec<(Severity, String)> {
        c.notifications()
            .active()
            .await
            .into_iter()
            .map(|n| (n.severity, n.message))
            .collect()
    }

    fn list_calls(c: &ViewController<MockDeploymentApi, AutoConfirm>) -> usize {
        c.client()
            .calls()
            .iter()
            .filter(|call| call.starts_with("list:"))
            .count()
    }

    #[tokio::test]
    async fn initialize_renders_the_listing() {
        let mut c = controller(
            vec![DeploymentSummary::new("web", 2), DeploymentSummary::new("api", 1)],
            true,
        );

        assert_eq!(c.initialize().await, ActionOutcome::Applied);
        assert_eq!(c.client().calls(), vec!["list:default"]);
        assert_eq!(c.rows().len(), 2);
        assert_eq!(c.rows()[0].name, "web");
        assert!(messages(&c).await.is_empty());
    }

    #[tokio::test]
    async fn scale_up_refreshes_exactly_once() {
        let mut c = controller(vec![DeploymentSummary::new("web", 2)], true);
        c.initialize().await;

        let row = c.find_row("web").cloned().unwrap();
        assert_eq!(c.scale_up(&row).await, ActionOutcome::Applied);

        assert_eq!(
            c.client().calls(),
            vec!["list:default", "scale:web:3", "list:default"]
        );
        assert_eq!(c.rows()[0].replicas, 3);
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Success, "Scaled deployment web to 3 replicas".to_string())]
        );
    }

    #[tokio::test]
    async fn scale_down_from_zero_is_sent_and_failure_keeps_rows() {
        let mut c = controller(vec![DeploymentSummary::new("idle", 0)], true);
        c.initialize().await;
        let before = c.rows().to_vec();

        let row = c.find_row("idle").cloned().unwrap();
        assert_eq!(c.scale_down(&row).await, ActionOutcome::Failed);

        assert!(c.client().calls().contains(&"scale:idle:-1".to_string()));
        assert_eq!(list_calls(&c), 1);
        assert_eq!(c.rows(), before.as_slice());
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Error, SCALE_FAILED.to_string())]
        );
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut c = controller(vec![DeploymentSummary::new("web", 1)], false);
        c.initialize().await;

        let row = c.find_row("web").cloned().unwrap();
        assert_eq!(c.delete(&row).await, ActionOutcome::Declined);

        assert_eq!(c.client().calls(), vec!["list:default"]);
        assert_eq!(c.rows().len(), 1);
        assert!(messages(&c).await.is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_row() {
        let mut c = controller(
            vec![DeploymentSummary::new("web", 1), DeploymentSummary::new("api", 1)],
            true,
        );
        c.initialize().await;

        let row = c.find_row("web").cloned().unwrap();
        assert_eq!(c.delete(&row).await, ActionOutcome::Applied);

        assert_eq!(list_calls(&c), 2);
        assert_eq!(c.rows().len(), 1);
        assert_eq!(c.rows()[0].name, "api");
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Success, "Deleted deployment web".to_string())]
        );
    }

    #[tokio::test]
    async fn failed_delete_notifies_without_refresh() {
        let mut c = controller(vec![DeploymentSummary::new("web", 1)], true);
        c.initialize().await;
        c.client().fail("delete");

        let row = c.find_row("web").cloned().unwrap();
        assert_eq!(c.delete(&row).await, ActionOutcome::Failed);

        assert_eq!(list_calls(&c), 1);
        assert_eq!(c.rows().len(), 1);
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Error, DELETE_FAILED.to_string())]
        );
    }

    #[tokio::test]
    async fn create_success_clears_form_and_refreshes() {
        let mut c = controller(Vec::new(), true);
        c.initialize().await;

        let mut form = DeploymentForm::new("web", "nginx:latest", "3", "250m", "128Mi");
        assert_eq!(c.create_deployment(&mut form).await, ActionOutcome::Applied);

        assert_eq!(form, DeploymentForm::default());
        assert_eq!(list_calls(&c), 2);
        assert_eq!(c.rows()[0].name, "web");
        assert_eq!(c.rows()[0].replicas, 3);
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Success, CREATE_SUCCEEDED.to_string())]
        );
    }

    #[tokio::test]
    async fn create_rejection_shows_server_message_and_keeps_form() {
        let mut c = controller(vec![DeploymentSummary::new("web", 1)], true);
        c.initialize().await;
        *c.client().create_error.lock().unwrap() =
            Some("deployments.apps \"web\" already exists".into());

        let mut form = DeploymentForm::new("web", "nginx:latest", "1", "100m", "64Mi");
        let submitted = form.clone();
        assert_eq!(c.create_deployment(&mut form).await, ActionOutcome::Failed);

        assert_eq!(form, submitted);
        assert_eq!(list_calls(&c), 1);
        assert_eq!(
            messages(&c).await,
            vec![(
                Severity::Error,
                "deployments.apps \"web\" already exists".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn whitespace_only_fields_issue_no_request() {
        let mut c = controller(Vec::new(), true);

        let mut form = DeploymentForm::new("   ", "nginx:latest", "1", "100m", " ");
        assert_eq!(c.create_deployment(&mut form).await, ActionOutcome::Failed);

        assert!(c.client().calls().is_empty());
        let shown = messages(&c).await;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, Severity::Error);
    }

    #[tokio::test]
    async fn padded_fields_are_sent_trimmed() {
        let mut c = controller(Vec::new(), true);

        let mut form = DeploymentForm::new(" web ", " nginx:latest", "2 ", "100m", "64Mi");
        assert_eq!(c.create_deployment(&mut form).await, ActionOutcome::Applied);

        assert_eq!(c.client().calls()[0], "create:web");
        assert_eq!(c.rows()[0].name, "web");
    }

    #[tokio::test]
    async fn invalid_form_issues_no_request() {
        let mut c = controller(Vec::new(), true);

        let mut form = DeploymentForm::new("", "nginx:latest", "many", "100m", "64Mi");
        assert_eq!(c.create_deployment(&mut form).await, ActionOutcome::Failed);

        assert!(c.client().calls().is_empty());
        assert_eq!(form.replicas, "many");
        let shown = messages(&c).await;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, Severity::Error);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_stale_rows() {
        let mut c = controller(vec![DeploymentSummary::new("web", 2)], true);
        c.initialize().await;
        c.client().fail("list");

        assert_eq!(c.refresh_deployments().await, ActionOutcome::Failed);

        assert_eq!(c.rows().len(), 1);
        assert_eq!(c.rows()[0].name, "web");
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Error, LIST_FAILED.to_string())]
        );
    }

    #[tokio::test]
    async fn describe_and_pods_are_read_only() {
        let mut c = controller(vec![DeploymentSummary::new("web", 2)], true);
        c.initialize().await;

        let found = c.describe("web").await.expect("deployment");
        assert_eq!(found.metadata.name.as_deref(), Some("web"));
        assert!(c.describe("ghost").await.is_none());
        assert_eq!(c.pods().await.map(|p| p.len()), Some(0));

        assert_eq!(list_calls(&c), 1);
        assert_eq!(
            messages(&c).await,
            vec![(Severity::Error, "Failed to fetch deployment ghost".to_string())]
        );
    }
}
