//! Administrator provisioning
//!
//! ```bash
//! cargo run --bin create-admin -- --username ops --password 'secret'
//! ```
//!
//! Applies pending migrations first, so it can seed an empty database.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use domain_admin::{AdminError, AdminService};
use infra_db::{create_pool_from_url, run_migrations, PostgresAdminAdapter};

#[derive(Parser, Debug)]
#[command(name = "create-admin", about = "Create an administrator account")]
struct Args {
    /// Login name, unique across administrators
    #[arg(long)]
    username: String,

    /// Plain-text password; stored only as an argon2 hash
    #[arg(long, env = "CREATE_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "API_DATABASE_URL", default_value = "postgres://localhost/flightclaim")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();

    let pool = create_pool_from_url(&args.database_url)
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await.context("database migrations failed")?;

    let admins = AdminService::new(Arc::new(PostgresAdminAdapter::new(pool)));
    match admins.register(&args.username, &args.password).await {
        Ok(account) => {
            println!("Administrator '{}' created ({})", account.username, account.id);
            Ok(())
        }
        Err(AdminError::DuplicateUsername(_)) => {
            anyhow::bail!("administrator '{}' already exists", args.username)
        }
        Err(e) => Err(e).context("could not create administrator"),
    }
}
