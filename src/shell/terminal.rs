use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::client::deployment_client::DeploymentApi;
use crate::core::state::runtime::notifications::{NotificationEvent, NotificationPhase};
use crate::domain::console::service::{Confirmer, ViewController};
use crate::domain::console::view::DeploymentRow;
use crate::domain::deployment::dto::deployment_form::DeploymentForm;
use crate::shell::commands::{parse_line, ShellCommand};
use crate::shell::output;

/// Operator input shared by the command loop and the confirmation prompt.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

pub fn shared_stdin() -> SharedLines<BufReader<Stdin>> {
    shared_lines(BufReader::new(tokio::io::stdin()))
}

pub fn shared_lines<R: AsyncBufRead + Unpin>(reader: R) -> SharedLines<R> {
    Arc::new(Mutex::new(reader.lines()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Exit,
}

/// Asks on stdout and reads the answer from the operator's input stream.
pub struct TerminalConfirmer<R> {
    input: SharedLines<R>,
}

impl<R> TerminalConfirmer<R> {
    pub fn new(input: SharedLines<R>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Confirmer for TerminalConfirmer<R> {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = std::io::stdout().flush();

        let mut input = self.input.lock().await;
        match input.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Runs the interactive session until `quit`, end of input or Ctrl-C.
pub async fn run<C, F, R>(
    controller: &mut ViewController<C, F>,
    input: SharedLines<R>,
) -> Result<()>
where
    C: DeploymentApi,
    F: Confirmer,
    R: AsyncBufRead + Unpin + Send,
{
    let (interrupt, watcher) = spawn_interrupt_watcher();
    let result = run_until(controller, input, interrupt).await;
    watcher.abort();
    result
}

/// Same as [`run`], ended by `interrupt` flipping to `true` instead of by
/// the process signal. The interrupt is honoured while waiting for input,
/// while a command is in flight and during a confirmation prompt.
pub async fn run_until<C, F, R>(
    controller: &mut ViewController<C, F>,
    input: SharedLines<R>,
    mut interrupt: watch::Receiver<bool>,
) -> Result<()>
where
    C: DeploymentApi,
    F: Confirmer,
    R: AsyncBufRead + Unpin + Send,
{
    let printer = spawn_notification_printer(controller.notifications().subscribe());

    let initialized = tokio::select! {
        _ = controller.initialize() => true,
        _ = interrupted(&mut interrupt) => false,
    };
    let result = if initialized {
        command_loop(controller, &input, &mut interrupt).await
    } else {
        Ok(())
    };

    printer.abort();
    if *interrupt.borrow() {
        info!("Interrupted by operator");
    }
    info!("Console session ended");
    result
}

async fn command_loop<C, F, R>(
    controller: &mut ViewController<C, F>,
    input: &SharedLines<R>,
    interrupt: &mut watch::Receiver<bool>,
) -> Result<()>
where
    C: DeploymentApi,
    F: Confirmer,
    R: AsyncBufRead + Unpin + Send,
{
    output::print_rows(controller.namespace(), controller.rows());
    print_prompt(controller.namespace());

    loop {
        let line = {
            let mut lines = input.lock().await;
            tokio::select! {
                line = lines.next_line() => line?,
                _ = interrupted(interrupt) => None,
            }
        };

        let Some(line) = line else {
            return Ok(());
        };

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                debug!("Operator command: {:?}", command);
                let flow = tokio::select! {
                    flow = execute(controller, command) => flow?,
                    _ = interrupted(interrupt) => ShellFlow::Exit,
                };
                if flow == ShellFlow::Exit {
                    return Ok(());
                }
            }
            Err(err) => {
                let _ = err.print();
            }
        }

        print_prompt(controller.namespace());
    }
}

fn spawn_interrupt_watcher() -> (watch::Receiver<bool>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(true);
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });
    (rx, handle)
}

/// Resolves once the interrupt is raised. A dropped sender never resolves.
async fn interrupted(interrupt: &mut watch::Receiver<bool>) {
    let raised = interrupt.wait_for(|raised| *raised).await.is_ok();
    if !raised {
        std::future::pending::<()>().await;
    }
}

/// Dispatches one parsed command against the controller.
pub async fn execute<C, F>(
    controller: &mut ViewController<C, F>,
    command: ShellCommand,
) -> Result<ShellFlow>
where
    C: DeploymentApi,
    F: Confirmer,
{
    match command {
        ShellCommand::List => {
            controller.refresh_deployments().await;
        }
        ShellCommand::Create(args) => {
            let mut form: DeploymentForm = args.into();
            controller.create_deployment(&mut form).await;
        }
        ShellCommand::Up { name } => {
            if let Some(row) = lookup(controller, &name) {
                controller.scale_up(&row).await;
            }
        }
        ShellCommand::Down { name } => {
            if let Some(row) = lookup(controller, &name) {
                controller.scale_down(&row).await;
            }
        }
        ShellCommand::Delete { name } => {
            if let Some(row) = lookup(controller, &name) {
                controller.delete(&row).await;
            }
        }
        ShellCommand::Describe { name } => {
            if let Some(deployment) = controller.describe(&name).await {
                output::print_deployment(&deployment)?;
            }
            return Ok(ShellFlow::Continue);
        }
        ShellCommand::Pods => {
            if let Some(pods) = controller.pods().await {
                output::print_pods(controller.namespace(), &pods);
            }
            return Ok(ShellFlow::Continue);
        }
        ShellCommand::Quit => return Ok(ShellFlow::Exit),
    }

    output::print_rows(controller.namespace(), controller.rows());
    Ok(ShellFlow::Continue)
}

/// Row actions only apply to what is currently rendered.
fn lookup<C, F>(controller: &ViewController<C, F>, name: &str) -> Option<DeploymentRow>
where
    C: DeploymentApi,
    F: Confirmer,
{
    let row = controller.find_row(name).cloned();
    if row.is_none() {
        output::print_info(&format!(
            "No deployment named '{}' is listed; run `list` to refresh",
            name
        ));
    }
    row
}

fn spawn_notification_printer(
    mut events: broadcast::Receiver<NotificationEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) if event.phase == NotificationPhase::Visible => {
                    output::print_notification(&event);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Skipped {} notification event(s)", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn print_prompt(namespace: &str) {
    print!("{}> ", namespace);
    let _ = std::io::stdout().flush();
}
