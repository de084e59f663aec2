//! CLI administration tool for cocktail-lab.
//!
//! Provides commands for issuing member tokens, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for member 7
//! cargo run --bin admin -- token create --member 7
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke 3
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
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use cocktail_lab::application::services::AuthService;
use cocktail_lab::application::services::auth_service::generate_token;
use cocktail_lab::config::{Config, mask_connection_string};
use cocktail_lab::domain::repositories::MemberTokenRepository;
use cocktail_lab::infrastructure::persistence::PgMemberTokenRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing cocktail-lab.
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
    /// Manage member bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token for a member
    Create {
        /// Member number the token authenticates as
        #[arg(short, long)]
        member: i64,

        /// Token label (e.g., "mobile app")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token by ID
    Revoke { id: i64 },
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

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL or DB_USER/DB_PASSWORD/DB_NAME must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgMemberTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            member,
            name,
            token,
            yes,
        } => {
            let secret = config
                .token_signing_secret
                .clone()
                .filter(|s| !s.is_empty())
                .context("TOKEN_SIGNING_SECRET must be set to issue tokens")?;
            let auth_service = AuthService::new(repo, secret);
            create_token(&auth_service, member, name, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { id } => {
            revoke_token(repo, id).await?;
        }
    }

    Ok(())
}

/// Issues a member token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for token label (or use provided)
/// 2. Generate random token or use provided value
/// 3. Display token details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Store the HMAC-SHA256 hash
/// 6. Display usage instructions
///
/// # Security
///
/// - Only the keyed hash is stored in the database
/// - Raw token is displayed once and cannot be retrieved later
async fn create_token(
    auth_service: &AuthService<PgMemberTokenRepository>,
    member_no: i64,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue Member Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token label")
            .with_initial_text("web")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Member: {}", member_no.to_string().cyan());
    println!("  Label:  {}", token_name.cyan());
    println!("  Token:  {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    auth_service
        .register_token(member_no, &token_name, &token_value)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Start the server with AUTH_MODE=token and send:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all member tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Member Tokens
///
///   ID  Member   Label                    Created              Status
///   ───────────────────────────────────────────────────────────────────
///   1   7        web                      2025-01-15 10:30     ACTIVE
///   2   12       mobile                   2025-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgMemberTokenRepository>) -> Result<()> {
    println!("{}", "📋 Member Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create --member <no>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<8} {:<24} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Member".bright_white().bold(),
        "Label".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<4} {:<8} {:<24} {:<20} {}",
            token.id.to_string().bright_black(),
            token.member_no.to_string().cyan(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by ID after confirmation (default: No).
async fn revoke_token(repo: Arc<PgMemberTokenRepository>, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke Member Token".bright_blue().bold());
    println!();

    let token = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Label:  {}", token.name.cyan());
    println!("  Member: {}", token.member_no.to_string().cyan());
    println!("  ID:     {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays cocktail, like, member and token counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let cocktails_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cocktails")
        .fetch_one(pool)
        .await?;

    let members_count: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT member_no) FROM cocktails")
            .fetch_one(pool)
            .await?;

    let likes_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cocktail_likes")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM member_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Cocktails:     {}",
        cocktails_count.to_string().bright_green().bold()
    );
    println!(
        "  Creators:      {}",
        members_count.to_string().bright_green().bold()
    );
    println!(
        "  Likes:         {}",
        likes_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
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

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
