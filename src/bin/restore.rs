//! Replays an SQL dump (`INSERT` statements) into the configured database.
//!
//! Usage: `restore [dump.sql]`. Without an argument the dump path comes from
//! the configuration (`backup_insert.sql` by default).

use anyhow::{Context, Result};
use magazin_incaltaminte::{
    config::Config,
    database::{create_pool, run_migrations},
};
use sea_orm::{ConnectionTrait, TransactionTrait};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_toml()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to load configuration")?;
    let dump_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.database.dump_path.clone());

    let script = std::fs::read_to_string(&dump_path)
        .with_context(|| format!("Cannot read dump file {dump_path}"))?;

    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    println!("Incepem restaurarea datelor...");
    log::info!("Restoring {} into {}", dump_path, config.database.url);

    let txn = pool.begin().await?;
    txn.execute_unprepared(&script)
        .await
        .with_context(|| format!("Failed to execute {dump_path}"))?;
    txn.commit().await?;

    println!("Restaurarea a fost finalizata cu succes!");
    Ok(())
}
