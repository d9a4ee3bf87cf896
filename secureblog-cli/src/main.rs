// SecureBlog - A security-minded blog client built with Rust
// Copyright (C) 2025 SecureBlog Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use clap::{Parser, Subcommand};
use secureblog_client::Configuration;
use secureblog_core::ApiError;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[derive(Parser, Debug)]
#[command(name = "secureblog")]
#[command(about = "SecureBlog command line client")]
struct Cli {
    /// Backend base URL (overrides configuration files and environment)
    #[arg(long)]
    api_url: Option<String>,

    /// Email to log in with before running the command
    #[arg(long, env = "SECUREBLOG_EMAIL")]
    email: Option<String>,

    /// Password for --email (will prompt if not provided)
    #[arg(long, env = "SECUREBLOG_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Log level
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in with --email and show the authenticated user
    Login,

    /// End the current session
    Logout,

    /// Show the current session
    Session,

    /// Show the profile of the logged-in user
    Me,

    /// Create a new account
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,
        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
        /// Accept the privacy policy and terms of use
        #[arg(long)]
        consent: bool,
    },

    /// Post management commands
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Comment management commands
    Comments {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// User management commands
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Show a dashboard (requires a logged-in user)
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PostCommands {
    /// List posts, optionally filtered by title or content
    List {
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a post with its comments
    Show { id: String },

    /// Publish a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Update fields of an existing post
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Delete a post
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum CommentCommands {
    /// Add a comment to a post
    Add { post_id: String, content: String },

    /// Show a single comment
    Show { post_id: String, id: String },

    /// Delete a comment
    Delete { post_id: String, id: String },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// List all users
    List,

    /// Show a user profile
    Show { id: String },

    /// Update a user profile
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DashboardCommands {
    /// Your posts and activity
    User,
    /// Site-wide statistics (admin only)
    Admin,
}

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Configuration::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            std::process::exit(1);
        }
    };
    let development_mode = config.development_mode;

    if let Err(error) = commands::run(cli, config).await {
        eprintln!("Error: {}", describe_error(&error, development_mode));
        std::process::exit(1);
    }
}

/// Backend errors go through the user-facing filter; local ones print as is
fn describe_error(error: &anyhow::Error, development_mode: bool) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(api_error) => api_error.display_message(development_mode),
        None => format!("{:#}", error),
    }
}
