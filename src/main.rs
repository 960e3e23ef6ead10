use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use claude_server::api::{configure_routes, AppState};
use claude_server::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    // A missing .env is fine, the variables may come from the real environment
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    if app_config.api_key.is_none() {
        log::warn!("ANTHROPIC_API_KEY is not set; /api/claude will answer 500 until it is");
    }

    let port = app_config.port;
    let state = AppState::new(app_config);

    println!("🚀 Claude Code Server listening on port {}", port);
    println!("📊 Open http://localhost:{} to use the web interface", port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::new("%r %s %Dms"))
            .configure(configure_routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
