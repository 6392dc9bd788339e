pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::customer_service::CustomerService;
use application::order_service::OrderService;
use application::payment_registry::PaymentRegistry;
use application::product_service::ProductService;
use application::random_service::RandomService;
use domain::clock::Clock;
use domain::ports::{CustomerRepository, NumberRepository, OrderRepository, ProductRepository};
use handlers::ApiDoc;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Services shared by every request handler.
pub struct AppState {
    pub customers: CustomerService,
    pub orders: OrderService,
    pub products: ProductService,
    pub numbers: RandomService,
}

impl AppState {
    /// Wires every service to one record store.
    pub fn new<S>(store: Arc<S>, clock: Arc<dyn Clock>, payments: PaymentRegistry) -> Self
    where
        S: CustomerRepository + OrderRepository + ProductRepository + NumberRepository,
    {
        Self {
            customers: CustomerService::new(store.clone(), store.clone(), clock),
            orders: OrderService::new(store.clone(), payments),
            products: ProductService::new(store.clone()),
            numbers: RandomService::new(store),
        }
    }
}

/// Registers every route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::get().to(handlers::customers::list_customers))
            .route(
                "/{id}/can-purchase",
                web::get().to(handlers::customers::can_purchase),
            ),
    )
    .service(web::scope("/orders").route("", web::post().to(handlers::orders::pay_order)))
    .service(web::scope("/products").route("", web::get().to(handlers::products::list_products)))
    .service(web::scope("/numbers").route("", web::post().to(handlers::numbers::next_number)));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
