use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use blog_api::application::post_service::PostService;
use blog_api::data::post_repository::PostgresPostRepository;
use blog_api::infrastructure::config::AppConfig;
use blog_api::infrastructure::database::{create_pool, run_migrations};
use blog_api::infrastructure::logging::init_logging;
use blog_api::presentation::handlers;
use blog_api::presentation::middleware::RequestIdMiddleware;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let post_repo = Arc::new(PostgresPostRepository::new(pool));
    let post_service = PostService::new(post_repo);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(post_service.clone()))
            .service(handlers::post::list_posts)
            .service(handlers::post::get_post)
            .service(handlers::post::create_post)
            .service(handlers::post::update_post)
            .service(handlers::post::delete_post)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
