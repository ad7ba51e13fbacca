//! CLI administration tool for the API access portal.
//!
//! Provides commands for managing users and their session tokens, and for
//! reviewing access requests. Reviews happen here only; the web portal never
//! changes a request's status.
//!
//! # Usage
//!
//! ```bash
//! # Create a user and print a session token for them
//! cargo run --bin admin -- user create --username acme --email dev@acme.test
//!
//! # Issue another token, list and revoke tokens
//! cargo run --bin admin -- token create acme
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke 3
//!
//! # Review access requests
//! cargo run --bin admin -- request list --status pending
//! cargo run --bin admin -- request approve acme
//! cargo run --bin admin -- request deny acme
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `api_access_portal::config`); `DATABASE_URL` and
//! `TOKEN_SIGNING_SECRET` are the ones this tool actually uses.

use api_access_portal::application::services::{AccessRequestService, AuthService};
use api_access_portal::config;
use api_access_portal::domain::entities::{AccessRequest, AccessStatus, NewUser, User};
use api_access_portal::domain::repositories::UserRepository;
use api_access_portal::infrastructure::persistence::{
    PgAccessRequestRepository, PgUserRepository,
};
use api_access_portal::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the API access portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Review API access requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user and issue their first session token
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new session token for a user
    Create {
        username: String,

        /// Token name (e.g., "Laptop")
        #[arg(short, long, default_value = "Portal sign-in")]
        name: String,
    },

    /// List all tokens
    List,

    /// Revoke a token by ID
    Revoke { id: i64 },
}

#[derive(Subcommand)]
enum RequestAction {
    /// List access requests, newest first
    List {
        /// Only show requests with this status (pending, denied, approved)
        #[arg(short, long)]
        status: Option<AccessStatus>,
    },

    /// Approve a user's access request
    Approve { username: String },

    /// Deny a user's access request
    Deny { username: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = server::connect(&config).await?;

    let pool_arc = Arc::new(pool.clone());
    let users = Arc::new(PgUserRepository::new(pool_arc.clone()));
    let auth = AuthService::new(users.clone(), config.token_signing_secret.clone());
    let requests =
        AccessRequestService::new(Arc::new(PgAccessRequestRepository::new(pool_arc)));

    match cli.command {
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                email,
                yes,
            } => create_user(users.as_ref(), &auth, username, email, yes).await?,
        },
        Commands::Token { action } => match action {
            TokenAction::Create { username, name } => {
                create_token(users.as_ref(), &auth, &username, &name).await?
            }
            TokenAction::List => list_tokens(users.as_ref()).await?,
            TokenAction::Revoke { id } => revoke_token(users.as_ref(), id).await?,
        },
        Commands::Request { action } => match action {
            RequestAction::List { status } => list_requests(&requests, status).await?,
            RequestAction::Approve { username } => {
                review_request(users.as_ref(), &requests, &username, AccessStatus::Approved).await?
            }
            RequestAction::Deny { username } => {
                review_request(users.as_ref(), &requests, &username, AccessStatus::Denied).await?
            }
        },
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn find_user(users: &dyn UserRepository, username: &str) -> Result<User> {
    users
        .find_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{username}' not found"))
}

fn print_token(token: &str) {
    println!();
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Sign in at /login with this token.".bright_white());
    println!();
}

/// Creates a user with interactive prompts and issues a first token.
///
/// # Flow
///
/// 1. Prompt for username and email (or use provided)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Store the user
/// 4. Issue a session token and display it once
async fn create_user(
    users: &dyn UserRepository,
    auth: &AuthService,
    username: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = users
        .create_user(NewUser { username, email })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    let (token, _) = auth
        .issue_token(user.id, "Portal sign-in")
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!("{}", "✅ User created successfully!".green().bold());
    print_token(&token);

    Ok(())
}

async fn create_token(
    users: &dyn UserRepository,
    auth: &AuthService,
    username: &str,
    name: &str,
) -> Result<()> {
    println!("{}", "🔑 Create Session Token".bright_blue().bold());
    println!();

    let user = find_user(users, username).await?;
    let (token, _) = auth
        .issue_token(user.id, name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!("  User: {}", user.username.cyan());
    println!("  Name: {}", name.cyan());
    print_token(&token);

    Ok(())
}

/// Lists all session tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Session Tokens
///
///   ID   User ID  Name                       Last used          Status
///   ─────────────────────────────────────────────────────────────────────
///   1    4        Portal sign-in             2026-01-15 10:30   ACTIVE
///   2    4        Laptop                     never              REVOKED
/// ```
async fn list_tokens(users: &dyn UserRepository) -> Result<()> {
    println!("{}", "📋 Session Tokens".bright_blue().bold());
    println!();

    let tokens = users
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<8} {:<26} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "User ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<8} {:<26} {:<18} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes a token by ID with confirmation prompt.
async fn revoke_token(users: &dyn UserRepository, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke Session Token".bright_blue().bold());
    println!();

    let token = users
        .find_token(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token:   {}", token.name.cyan());
    println!("  ID:      {}", token.id.to_string().bright_black());
    println!("  User ID: {}", token.user_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    users
        .revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

fn colored_status(status: AccessStatus) -> ColoredString {
    match status {
        AccessStatus::Pending => status.as_str().yellow(),
        AccessStatus::Denied => status.as_str().red(),
        AccessStatus::Approved => status.as_str().green(),
    }
}

fn print_request(request: &AccessRequest) {
    println!("  Company:  {}", request.company_name.cyan());
    println!("  Website:  {}", request.website);
    println!("  Address:  {}", request.company_address.replace('\n', ", "));
    println!("  Reason:   {}", request.reason);
    println!("  From:     {}", request.base_url.bright_black());
    println!("  Status:   {}", colored_status(request.status));
}

async fn list_requests(
    requests: &AccessRequestService,
    status: Option<AccessStatus>,
) -> Result<()> {
    println!("{}", "📋 API Access Requests".bright_blue().bold());
    println!();

    let list = requests
        .list(status)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list requests: {}", e))?;

    if list.is_empty() {
        println!("{}", "  No requests found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<8} {:<30} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "User ID".bright_white().bold(),
        "Company".bright_white().bold(),
        "Submitted".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for request in &list {
        println!(
            "  {:<4} {:<8} {:<30} {:<18} {}",
            request.id.to_string().bright_black(),
            request.user_id.to_string().bright_black(),
            request.company_name.cyan(),
            request
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            colored_status(request.status)
        );
    }

    println!();
    println!("  Total: {}", list.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Moves a user's request to `status` after showing it and asking for confirmation.
async fn review_request(
    users: &dyn UserRepository,
    requests: &AccessRequestService,
    username: &str,
    status: AccessStatus,
) -> Result<()> {
    println!("{}", "📝 Review API Access Request".bright_blue().bold());
    println!();

    let user = find_user(users, username).await?;
    let request = requests
        .get_for_user(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  User:     {} <{}>", user.username.cyan(), user.email);
    print_request(&request);
    println!();

    if request.status == status {
        println!(
            "{}",
            format!("⚠️  This request is already {status}").yellow()
        );
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Mark this request as {status}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let updated = requests
        .review(user.id, status)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update request: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Request is now".green().bold(),
        colored_status(updated.status)
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let pending: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_access_requests WHERE status = 'pending'")
                    .fetch_one(pool)
                    .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Pending requests: {}",
                pending.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
