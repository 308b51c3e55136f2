use backoffice::config::Config;
use backoffice::errors::StartupError;
use backoffice::{build_services, create_pool, run_migrations};

fn main() -> Result<(), StartupError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.pool_size)?;
    let applied = run_migrations(&pool)?;
    log::info!("Schema up to date ({} migration(s) applied)", applied);

    let (_customers, _orders) = build_services(&pool, &config);
    log::info!(
        "Customer and order services ready (pool size {}, slips due in {} days)",
        config.pool_size,
        config.boleto_due_days
    );
    Ok(())
}
