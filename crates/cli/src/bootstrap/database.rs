use cobalt_dns_domain::StoreConfig;
use sqlx::migrate::Migrator;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::path::Path;
use tracing::{error, info};

pub async fn init_store_pool(cfg: &StoreConfig) -> anyhow::Result<MySqlPool> {
    info!("connecting to record store");

    let pool = MySqlPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect(&cfg.dsn)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to connect to record store");
            anyhow::anyhow!(e)
        })?;

    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;

    info!(
        max_connections = cfg.max_connections,
        "record store ready, migrations applied"
    );
    Ok(pool)
}
