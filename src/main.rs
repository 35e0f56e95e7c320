use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use dotenvy::dotenv;
use tracing_actix_web::TracingLogger;

use ghlfeed::{
    api, config::AppConfig, db, errors::AppError, observability, observability::RedactedRootSpan,
    publish, AppState, DbPool,
};

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Publish the newest feed items once and exit instead of serving
    #[clap(long)]
    publish_once: bool,
}

fn main() -> std::io::Result<()> {
    dotenv().ok();
    observability::init_logging();

    let args = Args::parse();
    let config = AppConfig::from_env().map_err(io_error)?;

    let db_pool = db::initialize_db_pool(&config.database_url).map_err(io_error)?;
    db::run_migrations(&db_pool).map_err(io_error)?;

    if args.publish_once {
        return publish_once(config, db_pool);
    }

    run_server(config, db_pool)
}

fn io_error(err: AppError) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

#[actix_web::main]
async fn publish_once(config: AppConfig, db_pool: DbPool) -> std::io::Result<()> {
    let state = AppState::new(config);
    match publish::publish_from_rss(&state, &db_pool).await {
        Ok(results) => {
            let body = serde_json::json!({ "status": "success", "results": results });
            println!("{body:#}");
            Ok(())
        }
        Err(failure) => {
            eprintln!(
                "Publish failed after {} post(s): {}",
                failure.published.len(),
                failure.error
            );
            Err(io_error(failure.error))
        }
    }
}

#[actix_web::main]
async fn run_server(config: AppConfig, db_pool: DbPool) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let port = config.port;
    tracing::info!("Starting server at http://{}:{}", bind, port);

    let state = web::Data::new(AppState::new(config));
    let db_pool = web::Data::new(db_pool);

    HttpServer::new(move || {
        // The selector page is served from another origin
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::<RedactedRootSpan>::new())
            .wrap(cors)
            .app_data(state.clone())
            .app_data(db_pool.clone())
            .configure(api::routes::configure)
    })
    .bind((bind.as_str(), port))?
    .run()
    .await
}
