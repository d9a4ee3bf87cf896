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

use anyhow::{anyhow, bail, Context, Result};
use secureblog_client::configuration::normalize_base_url;
use secureblog_client::dashboard::{load_admin_dashboard, load_user_dashboard};
use secureblog_client::{check_route, ApiClient, Configuration};
use secureblog_core::guard::{GuardState, RouteRequirements};
use secureblog_core::models::{
    AuthResponse, CommentDraft, CreatePostRequest, UpdatePostRequest, UpdateUserRequest, User,
};
use secureblog_core::sanitize::sanitize_text;
use secureblog_core::search::filter_posts;
use secureblog_core::validators::{password_strength, LoginForm, RegisterForm};
use std::io::{self, Write};
use tracing::{info, warn};

use crate::output;
use crate::{Cli, CommentCommands, Commands, DashboardCommands, PostCommands, UserCommands};

pub async fn run(cli: Cli, mut config: Configuration) -> Result<()> {
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = normalize_base_url(api_url);
    }
    let client = ApiClient::from_configuration(&config)?;
    info!("Using backend at {}", client.base_url());

    // Cookies only live for this process, so log in first when asked to
    let logged_in = match cli.email {
        Some(email) => Some(login(&client, email, cli.password).await?),
        None => None,
    };

    match cli.command {
        Commands::Login => {
            let response =
                logged_in.ok_or_else(|| anyhow!("Pass --email (or set SECUREBLOG_EMAIL) to log in"))?;
            if let Some(message) = &response.message {
                println!("{}", sanitize_text(message));
            }
            match &response.user {
                Some(user) => println!("Logged in as {}", output::user_line(user)),
                None => println!("Logged in"),
            }
        }
        Commands::Logout => {
            let response = client.auth().logout().await?;
            println!("{}", sanitize_text(response.message.as_deref().unwrap_or("Logged out")));
        }
        Commands::Session => {
            let session = client.auth().session().await?;
            println!("{}", output::session_summary(&session));
        }
        Commands::Me => {
            let user = client.auth().current_user().await?;
            println!("{}", output::user_line(&user));
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
            consent,
        } => {
            let (password, confirm_password) = match password {
                Some(password) => {
                    let confirm = confirm_password.unwrap_or_else(|| password.clone());
                    (password, confirm)
                }
                None => (
                    prompt_password("Password: ")?,
                    prompt_password("Confirm password: ")?,
                ),
            };

            let strength = password_strength(&password);
            if !strength.label().is_empty() {
                println!("Password strength: {}", strength.label());
            }

            let payload = RegisterForm {
                name,
                email,
                password,
                confirm_password,
                consent,
            }
            .validate()?;

            let response = client
                .auth()
                .register_with_timeout(&payload, config.register_timeout())
                .await?;
            println!(
                "{}",
                sanitize_text(response.message.as_deref().unwrap_or("Account created"))
            );
        }
        Commands::Posts { command } => posts(&client, command).await?,
        Commands::Comments { command } => comments(&client, command).await?,
        Commands::Users { command } => users(&client, command).await?,
        Commands::Dashboard { command } => dashboard(&client, command).await?,
    }

    Ok(())
}

async fn login(client: &ApiClient, email: String, password: Option<String>) -> Result<AuthResponse> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let credentials = LoginForm { email, password }.validate()?;
    Ok(client.auth().login(&credentials).await?)
}

fn prompt_password(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    rpassword::read_password().context("Failed to read password")
}

async fn posts(client: &ApiClient, command: PostCommands) -> Result<()> {
    match command {
        PostCommands::List { search } => {
            let posts = client.posts().list().await?;
            let matches = filter_posts(&posts, search.as_deref().unwrap_or(""));
            if matches.is_empty() {
                println!("No posts found");
            }
            for post in matches {
                println!("{}", output::post_line(post));
            }
        }
        PostCommands::Show { id } => {
            let post = client.posts().get(&id).await?;
            if let Err(problem) = post.check_integrity() {
                warn!("Post {} is inconsistent: {}", post.id, problem);
            }
            print!("{}", output::post_detail(&post));
        }
        PostCommands::Create {
            title,
            content,
            image_url,
        } => {
            let request = CreatePostRequest {
                title,
                content,
                image_url,
            };
            let post = client.posts().create(&request).await?;
            println!("Created post {}", output::post_line(&post));
        }
        PostCommands::Update {
            id,
            title,
            content,
            image_url,
        } => {
            let request = UpdatePostRequest {
                title,
                content,
                image_url,
            };
            if request == UpdatePostRequest::default() {
                bail!("Nothing to update: pass at least one of --title, --content, --image-url");
            }
            let post = client.posts().update(&id, &request).await?;
            println!("Updated post {}", output::post_line(&post));
        }
        PostCommands::Delete { id } => {
            let response = client.posts().delete(&id).await?;
            println!(
                "{}",
                sanitize_text(response.message.as_deref().unwrap_or("Post deleted"))
            );
        }
    }

    Ok(())
}

async fn comments(client: &ApiClient, command: CommentCommands) -> Result<()> {
    match command {
        CommentCommands::Add { post_id, content } => {
            let request = CommentDraft::new(&content)?.into_request();
            let comment = client.comments().create(&post_id, &request).await?;
            println!("Added {}", output::comment_line(&comment));
        }
        CommentCommands::Show { post_id, id } => {
            let comment = client.comments().get(&post_id, &id).await?;
            println!("{}", output::comment_line(&comment));
        }
        CommentCommands::Delete { post_id, id } => {
            let response = client.comments().delete(&post_id, &id).await?;
            println!(
                "{}",
                sanitize_text(response.message.as_deref().unwrap_or("Comment deleted"))
            );
        }
    }

    Ok(())
}

async fn users(client: &ApiClient, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List => {
            let users = client.users().list().await?;
            if users.is_empty() {
                println!("No users found");
            }
            for user in &users {
                println!("{}", output::user_line(user));
            }
        }
        UserCommands::Show { id } => {
            let user = client.users().get(&id).await?;
            println!("{}", output::user_line(&user));
        }
        UserCommands::Update { id, name, email } => {
            let request = UpdateUserRequest { name, email };
            if request.is_empty() {
                bail!("Nothing to update: pass --name or --email");
            }
            let user = client.users().update(&id, &request).await?;
            println!("Updated {}", output::user_line(&user));
        }
    }

    Ok(())
}

async fn dashboard(client: &ApiClient, command: DashboardCommands) -> Result<()> {
    match command {
        DashboardCommands::User => {
            let user = authorize(client, RouteRequirements::authenticated()).await?;
            let dashboard = load_user_dashboard(client, &user).await?;
            print!("{}", output::user_dashboard(&user, &dashboard));
        }
        DashboardCommands::Admin => {
            authorize(client, RouteRequirements::admin()).await?;
            let stats = load_admin_dashboard(client).await?;
            print!("{}", output::admin_dashboard(&stats));
        }
    }

    Ok(())
}

/// Run the route guard and turn anything but an authorized user into an error
async fn authorize(client: &ApiClient, requirements: RouteRequirements) -> Result<User> {
    let guard = check_route(client, requirements).await;

    match guard.state() {
        GuardState::Authorized(Some(user)) => Ok(user.clone()),
        GuardState::Authorized(None) => bail!("This page requires a logged-in user"),
        GuardState::Checking => {
            bail!("Could not verify your session. Check your connection and try again.")
        }
        state => {
            let target = state.redirect_path().unwrap_or("/");
            bail!("Access denied, redirecting to {}", target)
        }
    }
}
