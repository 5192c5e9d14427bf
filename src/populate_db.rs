// populate_db.rs
// Creates the dashboard test account if it does not exist yet

use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use neurodetect_api::common::{database::connect_pool, migrations::run_migrations, AppConfig};
use neurodetect_api::seed::populate_test_user;
use neurodetect_api::services::AccountStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Logs go to stderr; stdout carries only the status line.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let pool = connect_pool(&config.database_url).await?;
    // Never reset here, whatever RESET_DB says.
    run_migrations(&pool, false).await?;

    let outcome = populate_test_user(&AccountStore::new(pool)).await?;
    println!("{}", outcome.message());

    Ok(())
}
