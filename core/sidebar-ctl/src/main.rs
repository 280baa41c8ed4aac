//! sidebar-ctl: close Cursor's unified sidebar when the stored workspace
//! state says it is visible.
//!
//! ## Subcommands
//!
//! - `close`: resolve the workspace state DB, read the flag, dispatch the
//!   close command if the sidebar is visible
//! - `status`: print how the open folders resolve, without dispatching

mod close;
mod status;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sidebar-ctl")]
#[command(about = "Cursor unified-sidebar state tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Close the sidebar if the stored workspace state says it is visible
    Close {
        /// Open workspace folder, as a path or URI; repeatable.
        /// Defaults to the current directory.
        #[arg(long = "folder", value_name = "PATH|URI")]
        folders: Vec<String>,

        /// Override the workspaceStorage root
        #[arg(long, value_name = "DIR")]
        storage_root: Option<PathBuf>,

        /// Resolve and check state but skip the close dispatch
        #[arg(long)]
        dry_run: bool,
    },

    /// Print how the open folders resolve against workspaceStorage
    Status {
        /// Open workspace folder, as a path or URI; repeatable.
        /// Defaults to the current directory.
        #[arg(long = "folder", value_name = "PATH|URI")]
        folders: Vec<String>,

        /// Override the workspaceStorage root
        #[arg(long, value_name = "DIR")]
        storage_root: Option<PathBuf>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Close {
            folders,
            storage_root,
            dry_run,
        } => {
            // close never fails visibly: any problem is a logged no-op
            if let Err(e) = close::run(&folders, storage_root, dry_run) {
                tracing::warn!(error = %e, "close skipped");
            }
        }
        Commands::Status {
            folders,
            storage_root,
        } => {
            if let Err(e) = status::run(&folders, storage_root) {
                tracing::error!(error = %e, "status failed");
                std::process::exit(1);
            }
        }
    }
}

fn init_logging() {
    let debug_enabled = env::var("SIDEBAR_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
