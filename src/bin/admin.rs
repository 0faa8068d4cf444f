//! CLI administration tool for car-registry.
//!
//! Provides commands for issuing API tokens, generating signing secrets,
//! viewing statistics and performing database operations without requiring
//! HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Generate a JWT signing secret
//! cargo run --bin admin -- secret generate
//!
//! # Issue a token
//! cargo run --bin admin -- token issue --subject ci-pipeline --role USER
//!
//! # Inspect a token
//! cargo run --bin admin -- token decode "<token>"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Hard delete soft-removed cars now
//! cargo run --bin admin -- sweep
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (`stats`, `sweep`, `db`)
//! - `JWT_SECRET`: base64 signing secret (`token`)
//! - `JWT_ISSUER`: token issuer (default: `car-registry`)

use car_registry::application::services::{AuthService, CarService, Role};
use car_registry::application::workers::SoftRemovedSweep;
use car_registry::config::MIN_JWT_SECRET_BYTES;
use car_registry::domain::clock::SystemClock;
use car_registry::infrastructure::persistence::{
    PgBrandRepository, PgCarRepository, PgCountryRepository,
};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Duration};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing car-registry.
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
    /// Issue and inspect JWT tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage signing secrets
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Show statistics
    Stats,

    /// Hard delete every soft-removed car now
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a signed token
    Issue {
        /// Token subject (e.g., "ci-pipeline", "alice")
        #[arg(short, long)]
        subject: Option<String>,

        /// ADMIN or USER
        #[arg(short, long, default_value = "USER")]
        role: Role,

        /// Validity in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Verify a token and print its claims
    Decode {
        token: String,
    },
}

/// Secret subcommands.
#[derive(Subcommand)]
enum SecretAction {
    /// Generate a random base64 secret for `JWT_SECRET`
    Generate {
        /// Print only the secret
        #[arg(long)]
        raw: bool,
    },
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Secret { action } => handle_secret_action(action),
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Sweep { yes } => handle_sweep(connect().await?, yes).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn jwt_auth_service() -> Result<AuthService> {
    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "car-registry".to_string());

    AuthService::disabled()
        .with_jwt(&secret, issuer)
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    let auth = jwt_auth_service()?;

    match action {
        TokenAction::Issue {
            subject,
            role,
            ttl_hours,
            yes,
        } => issue_token(&auth, subject, role, ttl_hours, yes),
        TokenAction::Decode { token } => decode_token(&auth, &token),
    }
}

/// Issues a token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for subject (or use provided)
/// 2. Display token details
/// 3. Confirm (unless `--yes` flag)
/// 4. Sign and print the token with usage instructions
fn issue_token(
    auth: &AuthService,
    subject: Option<String>,
    role: Role,
    ttl_hours: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue API Token".bright_blue().bold());
    println!();

    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive");
    }

    let subject = match subject {
        Some(s) => s,
        None => Input::new()
            .with_prompt("Subject")
            .with_initial_text("ci-pipeline")
            .interact_text()?,
    };

    println!("{}", "Token details:".bright_white().bold());
    println!("  Subject: {}", subject.cyan());
    println!("  Role:    {}", role.to_string().cyan());
    println!("  Expires: in {} hours", ttl_hours.to_string().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token = auth
        .issue_token(&subject, role, Duration::hours(ttl_hours))
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!();
    println!("{}", "✅ Token issued".green().bold());
    println!();
    println!("  {}", token.bright_yellow());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/cars",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

fn decode_token(auth: &AuthService, token: &str) -> Result<()> {
    let claims = auth
        .decode_token(token)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let format_ts = |ts: i64| {
        DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| ts.to_string())
    };

    println!("{}", "✅ Token is valid".green().bold());
    println!();
    println!("  Subject: {}", claims.sub.cyan());
    println!("  Role:    {}", claims.role.to_string().cyan());
    println!("  Issuer:  {}", claims.iss.bright_black());
    println!("  ID:      {}", claims.jti.bright_black());
    println!("  Issued:  {}", format_ts(claims.iat));
    println!("  Expires: {}", format_ts(claims.exp));
    println!();

    Ok(())
}

/// Generates a random signing secret.
///
/// Twice the minimum length accepted by the server, base64 encoded.
fn handle_secret_action(action: SecretAction) {
    match action {
        SecretAction::Generate { raw } => {
            let mut bytes = vec![0u8; MIN_JWT_SECRET_BYTES * 2];
            rand::rng().fill(bytes.as_mut_slice());
            let secret = BASE64.encode(&bytes);

            if raw {
                println!("{secret}");
                return;
            }

            println!("{}", "✨ Generated JWT secret".green().bold());
            println!();
            println!("  JWT_SECRET={}", secret.bright_yellow());
            println!();
        }
    }
}

/// Displays car, brand and country counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let active_cars: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE NOT soft_removed")
            .fetch_one(pool)
            .await?;

    let removed_cars: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE soft_removed")
        .fetch_one(pool)
        .await?;

    let brands: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
        .fetch_one(pool)
        .await?;

    let countries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries")
        .fetch_one(pool)
        .await?;

    println!(
        "  Active cars:        {}",
        active_cars.to_string().bright_green().bold()
    );
    println!(
        "  Soft-removed cars:  {}",
        removed_cars.to_string().yellow().bold()
    );
    println!(
        "  Brands:             {}",
        brands.to_string().bright_green().bold()
    );
    println!(
        "  Countries:          {}",
        countries.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Runs the soft-removed sweep once against the database.
async fn handle_sweep(pool: PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Sweep Soft-removed Cars".bright_blue().bold());
    println!();

    let pool = Arc::new(pool);
    let cars = Arc::new(CarService::new(
        Arc::new(PgCarRepository::new(pool.clone())),
        Arc::new(PgBrandRepository::new(pool.clone())),
        Arc::new(PgCountryRepository::new(pool)),
        Arc::new(SystemClock),
    ));

    let pending = cars
        .get_all_soft_removed_cars()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if pending.is_empty() {
        println!("{}", "  Nothing to sweep".yellow());
        return Ok(());
    }

    println!(
        "  {} soft-removed cars will be deleted permanently",
        pending.len().to_string().bright_white().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete them now?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let report = SoftRemovedSweep::new(cars)
        .sweep()
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!();
    println!(
        "{} removed {}, failed {}",
        "✅ Sweep finished:".green().bold(),
        report.removed.to_string().bright_green(),
        report.failed.to_string().red()
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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
