//! CLI administration tool for shortcode-service.
//!
//! Creates short links, prints click statistics and runs database checks
//! directly against PostgreSQL, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link (prompts for the URL when omitted)
//! cargo run --bin admin -- create https://example.com --validity 60 --code promo
//!
//! # Show click history for a code
//! cargo run --bin admin -- stats promo
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `PUBLIC_BASE_URL` (optional): prefix used to print full short links

use shortcode_service::application::services::{LinkService, StatsService};
use shortcode_service::config::Config;
use shortcode_service::infrastructure::persistence::PgMappingStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortcode-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Validity in minutes (default: 30)
        #[arg(short, long)]
        validity: Option<i64>,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show statistics for a short code
    Stats {
        /// The short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Create {
            url,
            validity,
            code,
        } => create_link(&pool, url, validity, code).await?,
        Commands::Stats { code } => show_stats(&pool, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Creates a short link through the same service the HTTP API uses.
async fn create_link(
    pool: &PgPool,
    url: Option<String>,
    validity: Option<i64>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let service = LinkService::new(Arc::new(PgMappingStore::new(Arc::new(pool.clone()))));

    let mapping = service
        .create_short_link(url, validity, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short link: {}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Code:    {}", mapping.code.bright_yellow().bold());

    if let Ok(base) = std::env::var("PUBLIC_BASE_URL") {
        println!(
            "  Link:    {}",
            service.get_short_url(&base, &mapping.code).cyan()
        );
    }

    println!("  Target:  {}", mapping.original_url);
    println!(
        "  Expires: {}",
        mapping
            .expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Prints a code's metadata and click history, most recent first.
async fn show_stats(pool: &PgPool, code: &str) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = StatsService::new(Arc::new(PgMappingStore::new(Arc::new(pool.clone()))));

    let stats = service
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let status = if stats.mapping.is_expired_at(chrono::Utc::now()) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Code:    {} {}", stats.mapping.code.cyan(), status);
    println!("  Target:  {}", stats.mapping.original_url);
    println!(
        "  Created: {}",
        stats.mapping.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Expires: {}",
        stats.mapping.expires_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Clicks:  {}",
        stats.total_clicks.to_string().bright_green().bold()
    );

    if stats.clicks.is_empty() {
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {:<20} {:<40} {:<30}",
        "Clicked".bright_white().bold(),
        "IP".bright_white().bold(),
        "Referrer".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for click in &stats.clicks {
        println!(
            "  {:<20} {:<40} {:<30}",
            click
                .clicked_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            click.ip.as_deref().unwrap_or("-"),
            click.referrer.as_deref().unwrap_or("-")
        );
    }
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
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let mappings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_mappings")
                .fetch_one(pool)
                .await?;

            let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Mappings:   {}",
                mappings_count.to_string().bright_green().bold()
            );
            println!(
                "  Clicks:     {}",
                clicks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
