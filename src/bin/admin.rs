//! CLI administration tool for minishort.
//!
//! Provides commands for managing user accounts, inspecting links and
//! performing database checks without going through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for anything not given)
//! cargo run --bin admin -- user create --username alice
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Show the links owned by a user
//! cargo run --bin admin -- links alice
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` or `DB_PATH` (default `data.db`), plus
//! the pool settings. See [`minishort::config`].

use minishort::application::services::{AuthService, LinkService};
use minishort::config;
use minishort::domain::entities::Credentials;
use minishort::infrastructure::persistence::{
    SqliteLinkRepository, SqliteUserRepository, schema,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing minishort.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// List the links owned by a user
    Links {
        /// Owner's username
        username: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted without echo if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = schema::connect(&config).await?;
    schema::init(&pool, false).await?;

    let pool = Arc::new(pool);
    let auth_service = AuthService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let link_service = LinkService::new(Arc::new(SqliteLinkRepository::new(pool.clone())));

    match cli.command {
        Commands::User { action } => handle_user_action(action, &auth_service).await?,
        Commands::Links { username } => list_links(&link_service, &username).await?,
        Commands::Stats => handle_stats(&auth_service, &link_service).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config.database_url).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(
    action: UserAction,
    auth_service: &AuthService<SqliteUserRepository>,
) -> Result<()> {
    match action {
        UserAction::Create {
            username,
            password,
            yes,
        } => create_user(auth_service, username, password, yes).await,
        UserAction::List => list_users(auth_service).await,
    }
}

/// Creates a user through the same path as web registration.
///
/// The password is hashed before storage; it is never printed.
async fn create_user(
    auth_service: &AuthService<SqliteUserRepository>,
    username: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = match password {
        Some(p) => {
            println!("{}", "⚠️  Password given on the command line".yellow());
            p
        }
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    println!();
    println!("  Username: {}", username.cyan());
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

    let user = auth_service
        .register(Credentials::new(username, password))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created:".green().bold(),
        user.username.cyan()
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// ```text
/// 📋 Users
///
///   ID  Username                       Password
///   ──────────────────────────────────────────────
///   1   alice                          hashed
///   2   bob                            LEGACY
/// ```
async fn list_users(auth_service: &AuthService<SqliteUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = auth_service
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Password".bright_white().bold()
    );
    println!("  {}", "─".repeat(46).bright_black());

    for user in &users {
        // Cleartext rows from before hashing are upgraded at their next login.
        let storage = if user.password_hash.starts_with("$argon2") {
            "hashed".green()
        } else {
            "LEGACY".red()
        };

        println!(
            "  {:<4} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            storage
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Lists the links owned by `username`, oldest first.
async fn list_links(link_service: &LinkService<SqliteLinkRepository>, username: &str) -> Result<()> {
    println!(
        "{} {}",
        "🔗 Links of".bright_blue().bold(),
        username.cyan().bold()
    );
    println!();

    let links = link_service
        .list_for_user(username)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    for link in &links {
        println!(
            "  {}  {} {}",
            link.short_id.bright_yellow(),
            "→".bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays user and link counts.
async fn handle_stats(
    auth_service: &AuthService<SqliteUserRepository>,
    link_service: &LinkService<SqliteLinkRepository>,
) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count = auth_service
        .user_count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    let links_count = link_service
        .link_count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Users: {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(pool)
                .await?;

            println!("  Database: {}", database_url.bright_white());
            println!("  SQLite:   {}", version.bright_white());
            println!("  Journal:  {}", journal_mode.bright_white());
            println!();
        }
    }

    Ok(())
}
