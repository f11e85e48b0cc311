//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scadastore")]
#[command(about = "Diagram configuration store for SCADA monitoring", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Save a diagram snapshot under a name (replaces an existing one)
    Save {
        /// Configuration name
        name: String,

        /// JSON file with canvas, components and groups
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Print a saved configuration as JSON
    Load {
        /// Configuration name (case-sensitive)
        name: String,
    },

    /// List saved configurations, newest first
    List,

    /// Delete a saved configuration
    Delete {
        /// Configuration name (case-sensitive)
        name: String,
    },

    /// Export a saved configuration to <slug>.scada.json
    Export {
        /// Configuration name (case-sensitive)
        name: String,

        /// Output directory (default: configured export_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate a configuration file and optionally add it to the store
    Import {
        /// Configuration file to read
        file: PathBuf,

        /// Store the imported configuration
        #[arg(long)]
        save: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Store a session from a login response JSON file
    Login {
        /// File containing accessToken, userData and userAbilityRules
        response: PathBuf,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check whether the signed-in user holds a permission
    Can {
        permission: String,
    },

    /// Resolve a navigation through the route guards
    Route {
        /// Route path (e.g. /, /login)
        path: String,
    },

    /// Describe the REST request for a resource without sending it
    Api {
        /// HTTP method (get, post, put, patch, delete)
        method: String,

        /// Logical resource name (e.g. device, watertank, create)
        resource: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
}
