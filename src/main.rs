use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use meapi::config::{AllowedOrigins, AppConfig};
use meapi::create_pool;
use meapi::db::seed::seed_if_empty;
use meapi::handlers;
use meapi::rate_limit::{self, FixedWindowLimiter};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database ready, migrations applied");

    match seed_if_empty(&db, &config.seed_file).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!("Seeding skipped"),
        Err(e) => tracing::warn!("Seeding failed: {e}"),
    }

    let db_data = web::Data::new(db);
    let admin_data = web::Data::new(config.admin.clone());
    let limiter_data = web::Data::new(
        FixedWindowLimiter::new(config.rate_limit_per_minute, config.rate_limit_window())
            .trust_forwarded(config.trust_proxy_headers),
    );

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(from_fn(rate_limit::enforce))
            .wrap(build_cors(&config.allowed_origins))
            .app_data(db_data.clone())
            .app_data(admin_data.clone())
            .app_data(limiter_data.clone())
            .configure(handlers::init_routes);

        // Registered last so the API routes take precedence over `/`.
        if config.frontend_dir.is_dir() {
            app = app.service(Files::new("/", &config.frontend_dir).index_file("index.html"));
        }

        app
    })
    .bind(&bind_addr)?
    .run()
    .await
}

fn build_cors(origins: &AllowedOrigins) -> Cors {
    let cors = match origins {
        AllowedOrigins::Any => Cors::default().allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin)),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}
