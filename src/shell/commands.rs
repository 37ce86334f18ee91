//! Interactive command grammar, one command per input line.

use clap::{Args, Parser, Subcommand};

use crate::domain::deployment::dto::deployment_form::DeploymentForm;

#[derive(Debug, Parser)]
#[command(name = "", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Re-fetch and show the deployments
    #[command(aliases = ["ls", "refresh"])]
    List,

    /// Create a deployment
    Create(CreateArgs),

    /// Scale a deployment up by one replica
    Up {
        /// Deployment name
        name: String,
    },

    /// Scale a deployment down by one replica
    Down {
        /// Deployment name
        name: String,
    },

    /// Delete a deployment (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Deployment name
        name: String,
    },

    /// Show the full resource of a deployment
    Describe {
        /// Deployment name
        name: String,
    },

    /// List pods in the namespace
    Pods,

    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

/// The create form, as command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct CreateArgs {
    /// Deployment name, also used as the `app` label
    pub name: String,

    /// Container image
    pub image: String,

    /// Number of replicas
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub replicas: String,

    /// CPU request and limit (e.g. 500m)
    #[arg(long, default_value = "100m")]
    pub cpu: String,

    /// Memory request and limit (e.g. 256Mi)
    #[arg(long, default_value = "128Mi")]
    pub memory: String,
}

impl From<CreateArgs> for DeploymentForm {
    fn from(args: CreateArgs) -> Self {
        DeploymentForm::new(args.name, args.image, args.replicas, args.cpu, args.memory)
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }

    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_not_a_command() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn row_actions_take_a_name() {
        assert_eq!(
            parse_line("up web").unwrap(),
            Some(ShellCommand::Up { name: "web".into() })
        );
        assert_eq!(
            parse_line("rm web").unwrap(),
            Some(ShellCommand::Delete { name: "web".into() })
        );
        assert_eq!(parse_line("ls").unwrap(), Some(ShellCommand::List));
        assert_eq!(parse_line("exit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn create_maps_onto_the_form() {
        let command = parse_line("create web nginx:latest --replicas 3 --cpu 250m --memory 128Mi")
            .unwrap()
            .unwrap();

        let ShellCommand::Create(args) = command else {
            panic!("expected create, got {:?}", command);
        };
        assert_eq!(
            DeploymentForm::from(args),
            DeploymentForm::new("web", "nginx:latest", "3", "250m", "128Mi")
        );
    }

    #[test]
    fn create_defaults_and_negative_replicas_reach_the_form() {
        let Some(ShellCommand::Create(args)) = parse_line("create api ghcr.io/acme/api:1.2 -r -1").unwrap()
        else {
            panic!("expected create");
        };

        assert_eq!(args.replicas, "-1");
        assert_eq!(args.cpu, "100m");
        assert_eq!(args.memory, "128Mi");
    }

    #[test]
    fn unknown_commands_are_errors() {
        assert!(parse_line("scale web 3").is_err());
        assert!(parse_line("up").is_err());
    }
}
