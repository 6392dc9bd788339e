use std::io;
use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;
use purchase_service::application::payment_registry::PaymentRegistry;
use purchase_service::config::AppConfig;
use purchase_service::domain::clock::{Clock, SystemClock};
use purchase_service::infrastructure::diesel_store::DieselStore;
use purchase_service::infrastructure::in_memory::InMemoryStore;
use purchase_service::{build_server, create_pool, run_migrations, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let payments = PaymentRegistry::with_default_methods();
    log::info!("Payment methods: {:?}", payments.method_names());

    let state = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).map_err(io::Error::other)?;
            run_migrations(&pool).map_err(io::Error::other)?;
            AppState::new(Arc::new(DieselStore::new(pool)), clock, payments)
        }
        None => {
            log::warn!("DATABASE_URL is not set; records are kept in memory");
            AppState::new(Arc::new(InMemoryStore::with_sample_data()), clock, payments)
        }
    };

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(web::Data::new(state), &config.host, config.port)?.await
}
