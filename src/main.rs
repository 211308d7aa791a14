//! kubectl-nearby - find what runs next to a pod or node
//!
//! CLI entry point. Installed on `PATH`, kubectl picks it up as
//! `kubectl nearby`.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use kubectl_nearby::config::{resolve_namespace, Invocation, NearbySettings};
use kubectl_nearby::inventory::{KubeDirectory, Locator};

/// List pods on the same node, or nodes in the same zone
#[derive(Parser, Debug)]
#[command(name = "kubectl-nearby", version, about)]
struct Cli {
    /// Path to a TOML settings file (label keys, default namespace)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List pods on the same node as POD
    Pods {
        /// Name of the pod to start from
        pod: String,

        /// Namespace where the pod is located (defaults to the kubeconfig
        /// context namespace, otherwise 'default')
        #[arg(short, long)]
        namespace: Option<String>,

        /// Show colocated pods from all namespaces
        #[arg(short = 'A', long)]
        all_namespaces: bool,

        /// Path to the kubeconfig file (defaults to KUBECONFIG or ~/.kube/config)
        #[arg(long, visible_alias = "config-path")]
        kubeconfig: Option<PathBuf>,
    },
    /// List nodes in the same zone as NODE
    Nodes {
        /// Name of the node to start from
        node: String,

        /// Path to the kubeconfig file (defaults to KUBECONFIG or ~/.kube/config)
        #[arg(long, visible_alias = "config-path")]
        kubeconfig: Option<PathBuf>,
    },
}

impl Command {
    fn kubeconfig(&self) -> Option<&Path> {
        match self {
            Self::Pods { kubeconfig, .. } | Self::Nodes { kubeconfig, .. } => kubeconfig.as_deref(),
        }
    }

    /// Build the explicit per-run configuration.
    fn into_invocation(self, settings: NearbySettings, context_namespace: &str) -> Invocation {
        match self {
            Self::Pods {
                pod,
                namespace,
                all_namespaces,
                ..
            } => {
                let namespace =
                    resolve_namespace(namespace.as_deref(), &settings, Some(context_namespace));
                Invocation {
                    locator: Locator::workload(&pod, &namespace),
                    all_namespaces,
                    settings,
                }
            }
            Self::Nodes { node, .. } => Invocation {
                locator: Locator::node(&node),
                all_namespaces: false,
                settings,
            },
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<String> {
    let settings = NearbySettings::load(cli.settings.as_deref())?;
    let directory = KubeDirectory::connect(cli.command.kubeconfig())?;
    let context_namespace = directory.default_namespace().to_string();
    let invocation = cli.command.into_invocation(settings, &context_namespace);

    let report = kubectl_nearby::run(&invocation, &directory, chrono::Utc::now())?;
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
