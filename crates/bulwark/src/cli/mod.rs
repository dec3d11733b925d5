//! CLI command definitions and handlers.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use serde::Serialize;

use bulwark_api::{Capability, SecurityContextConstraints, SecurityContextConstraintsList};
use bulwark_common::{BulwarkError, BulwarkPaths, BulwarkResult};

use crate::bootstrap::{SubjectGrants, bootstrap_security_context_constraints};
use crate::config::Config;

/// Bulwark - Bootstrap security context constraints
#[derive(Parser)]
#[command(name = "bulwark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Namespace hosting infrastructure controllers
    #[arg(long, global = true, env = "BULWARK_INFRA_NAMESPACE")]
    pub infra_namespace: Option<String>,

    /// Configuration file with extra grants
    #[arg(long, global = true, env = "BULWARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    #[default]
    Yaml,
}

/// Bulwark commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Render the bootstrap constraints as a List document
    Catalog {
        /// Output encoding
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the default group and user grants
    Grants {
        /// Output encoding
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Describe a single constraint
    Describe {
        /// Constraint name
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Group and user grants, as printed by `bulwark grants`.
#[derive(Debug, Serialize)]
struct GrantsDocument {
    groups: SubjectGrants,
    users: SubjectGrants,
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        let Self {
            infra_namespace,
            config,
            command,
            ..
        } = self;
        let grants = || resolve_grants(config.as_deref(), infra_namespace.as_deref());

        match command {
            Commands::Catalog { format, output } => {
                let (groups, users) = grants()?;
                let constraints = bootstrap_security_context_constraints(&groups, &users);
                let rendered = render(&SecurityContextConstraintsList::new(constraints), format)?;
                match output {
                    Some(path) => {
                        write_file(&path, &rendered)?;
                        tracing::info!(path = %path.display(), "Wrote bootstrap policy file");
                    }
                    None => print(&rendered)?,
                }
            }
            Commands::Grants { format } => {
                let (groups, users) = grants()?;
                let rendered = render(&GrantsDocument { groups, users }, format)?;
                print(&rendered)?;
            }
            Commands::Describe { name } => {
                let (groups, users) = grants()?;
                let constraints = bootstrap_security_context_constraints(&groups, &users);
                let scc = constraints
                    .into_iter()
                    .find(|scc| scc.name() == name)
                    .ok_or(BulwarkError::ConstraintNotFound { name })?;
                print(&describe(&scc))?;
            }
            // Needs no grants, so a broken config file must not block it.
            Commands::Completions { shell } => {
                clap_complete::generate(
                    shell,
                    &mut Self::command(),
                    "bulwark",
                    &mut std::io::stdout(),
                );
            }
        }

        Ok(())
    }
}

/// Default grants for the configured infrastructure namespace, with the
/// config file's grants appended. `infra_namespace` overrides the file.
fn resolve_grants(
    config: Option<&Path>,
    infra_namespace: Option<&str>,
) -> BulwarkResult<(SubjectGrants, SubjectGrants)> {
    let mut config = Config::resolve(config, &BulwarkPaths::new())?;
    if let Some(namespace) = infra_namespace {
        config = config.with_infra_namespace(namespace);
    }
    tracing::debug!(infra_namespace = %config.infra_namespace(), "Resolved grants");
    Ok(config.grants())
}

/// Human-readable summary of one constraint.
fn describe(scc: &SecurityContextConstraints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:        {}", scc.name());
    if let Some(description) = scc.description() {
        let _ = writeln!(out, "Description: {description}");
    }
    if let Some(priority) = scc.priority {
        let _ = writeln!(out, "Priority:    {priority}");
    }
    let _ = writeln!(out, "SELinux:     {:?}", scc.se_linux_context.type_);
    let _ = writeln!(out, "RunAsUser:   {:?}", scc.run_as_user.type_);
    let drops: Vec<&str> = scc
        .required_drop_capabilities
        .iter()
        .map(Capability::name)
        .collect();
    let _ = writeln!(out, "Drops:       {}", drops.join(","));
    let _ = writeln!(out, "Users:       {}", scc.users.join(","));
    let _ = writeln!(out, "Groups:      {}", scc.groups.join(","));
    let _ = writeln!(
        out,
        "Requires namespace allocation: {}",
        scc.requires_namespace_allocation()
    );
    out
}

/// Serialize `value` in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> BulwarkResult<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

fn write_file(path: &Path, contents: &str) -> BulwarkResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

fn print(contents: &str) -> BulwarkResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(contents.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
