pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::catalog_service::CatalogService;
use application::order_service::OrderService;
use infrastructure::catalog_repo::DieselCatalogRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        let catalog = CatalogService::new(DieselCatalogRepository::new(pool.clone()));
        let orders = OrderService::new(DieselOrderRepository::new(pool.clone()));
        App::new()
            .app_data(web::Data::new(catalog))
            .app_data(web::Data::new(orders))
            .wrap(Logger::default())
            .service(
                web::scope("/products")
                    .route("", web::post().to(handlers::products::create_product))
                    .route(
                        "/{id}/options",
                        web::post().to(handlers::products::create_option_axis),
                    )
                    .route(
                        "/{id}/options",
                        web::get().to(handlers::products::list_option_axes),
                    )
                    .route(
                        "/{id}/variants/generate",
                        web::post().to(handlers::products::generate_variants),
                    )
                    .route(
                        "/{id}/variants",
                        web::post().to(handlers::products::create_variants),
                    )
                    .route(
                        "/{id}/variants",
                        web::get().to(handlers::products::list_variants),
                    ),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{id}/cancel",
                        web::post().to(handlers::orders::cancel_order),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
