//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::books::{
    create_book, delete_book, get_book, list_books, toggle_bookmark, toggle_upvote,
    trending_books, update_book,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::reviews::{
    create_review, delete_review, list_reviews, toggle_dislike, toggle_like, update_review,
};
use crate::inbound::http::users::{
    bookmarked_books, current_user, login, register, statistics, update_profile,
};
use crate::middleware::Trace;
use crate::outbound::identity::HttpTokenVerifier;
use crate::outbound::persistence::{DocumentStore, StoreConfig};
use state_builders::build_http_state;

fn build_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600);
    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// Connect to the store, wire the services, and start the HTTP server.
///
/// The returned [`Server`] resolves when the server shuts down; the caller
/// awaits it from `main`.
pub async fn run(config: AppConfig) -> std::io::Result<Server> {
    let store = DocumentStore::connect(StoreConfig::new(&config.mongodb_uri, &config.database))
        .await
        .map_err(std::io::Error::other)?;
    let verifier = HttpTokenVerifier::new(&config.identity).map_err(std::io::Error::other)?;

    let http_state = web::Data::new(build_http_state(&store, Arc::new(verifier)));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let allowed_origins = config.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let cors = build_cors(&allowed_origins);
        // Trending must register before the `{book_id}` routes so the literal
        // segment wins the match.
        let api = web::scope("/api/v1")
            .wrap(cors)
            .service(register)
            .service(login)
            .service(current_user)
            .service(update_profile)
            .service(statistics)
            .service(bookmarked_books)
            .service(trending_books)
            .service(create_book)
            .service(list_books)
            .service(get_book)
            .service(update_book)
            .service(delete_book)
            .service(toggle_upvote)
            .service(toggle_bookmark)
            .service(create_review)
            .service(list_reviews)
            .service(update_review)
            .service(delete_review)
            .service(toggle_like)
            .service(toggle_dislike);

        let app = App::new()
            .app_data(http_state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(live)
            .service(ready);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(("0.0.0.0", config.port))?;

    health_state.mark_ready();
    Ok(server.run())
}
