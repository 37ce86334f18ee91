use async_trait::async_trait;
use tokio::io::{BufReader, Stdin};

use crate::core::client::deployment_client::HttpDeploymentClient;
use crate::core::config::ConsoleConfig;
use crate::core::state::runtime::notifications::NotificationCenter;
use crate::domain::console::service::{AutoConfirm, Confirmer, ViewController};
use crate::errors::ConsoleResult;
use crate::shell::{shared_stdin, SharedLines, TerminalConfirmer};

/// Confirmation source picked at startup.
pub enum SessionConfirmer {
    Prompt(TerminalConfirmer<BufReader<Stdin>>),
    Auto(AutoConfirm),
}

#[async_trait]
impl Confirmer for SessionConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        match self {
            SessionConfirmer::Prompt(c) => c.confirm(prompt).await,
            SessionConfirmer::Auto(c) => c.confirm(prompt).await,
        }
    }
}

pub type ConsoleController = ViewController<HttpDeploymentClient, SessionConfirmer>;

pub struct ConsoleState {
    pub controller: ConsoleController,
    pub input: SharedLines<BufReader<Stdin>>,
}

/// Wires the HTTP client, notification center and operator input together.
/// `assume_yes` skips delete confirmation.
pub fn build_console_state(config: &ConsoleConfig, assume_yes: bool) -> ConsoleResult<ConsoleState> {
    let client = HttpDeploymentClient::new(config)?;
    let input = shared_stdin();

    let confirmer = if assume_yes {
        SessionConfirmer::Auto(AutoConfirm(true))
    } else {
        SessionConfirmer::Prompt(TerminalConfirmer::new(input.clone()))
    };

    let controller = ViewController::new(
        client,
        confirmer,
        config.namespace.clone(),
        NotificationCenter::new(),
    );

    Ok(ConsoleState { controller, input })
}
