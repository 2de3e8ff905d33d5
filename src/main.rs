use actix_cors::Cors;
use actix_web::{cookie::Key, middleware::{DefaultHeaders, Logger}, web, App, HttpServer};
use clap::Parser;
use elmavize_backend::{config::Config, configure_routes, helper::db_helpers, session_middleware};
use std::convert::TryFrom;
use std::path::PathBuf;
use tera::Tera;

#[derive(Parser, Debug)]
#[command(name = "elmavize_server", author, version, about = "Starts the Elma Vize web server.")]
struct Cli {
    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

fn build_cors(allowed_origins: &str) -> Cors {
    let methods = vec!["GET", "POST", "PUT", "PATCH", "DELETE"];
    let headers = vec![
        actix_web::http::header::AUTHORIZATION,
        actix_web::http::header::ACCEPT,
        actix_web::http::header::CONTENT_TYPE,
    ];

    let cors = if allowed_origins.trim() == "*" {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(methods)
        .allowed_headers(headers)
        .supports_credentials()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let tera = Tera::new("templates/**/*.html").expect("Tera initialization failed");

    let db_path = config.database_file();
    if !db_path.exists() {
        log::error!(
            "Database '{}' not found. Run 'cargo run --bin setup_cli -- --env-file <path> db setup' first.",
            db_path.display()
        );
        return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "database file missing"));
    }
    let pool = db_helpers::build_pool(&db_path)
        .expect("FATAL: Failed to create Rusqlite connection pool.");

    let session_key_bytes = hex::decode(&config.session_secret_key)
        .expect("FATAL: SESSION_SECRET_KEY in .env is not a valid hex string.");
    let session_key = Key::try_from(session_key_bytes.as_slice())
        .expect("FATAL: The decoded SESSION_SECRET_KEY is not long enough (minimum 64 bytes required).");

    let server_address = format!("{}:{}", config.web.host, config.web.port);
    log::info!("Server starting at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(session_key.clone(), config.use_secure_cookies))
            .wrap(build_cors(&config.allowed_origins))
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-XSS-Protection", "1; mode=block")),
            )
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(pool.clone()))
            .configure(configure_routes)
    })
    .bind(server_address)?
    .run()
    .await
}
