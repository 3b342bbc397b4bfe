//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::comments::{
    create_comment, delete_comment, get_comment, list_comments, update_comment,
};
use backend::inbound::http::contributors::{add_contributor, list_contributors, remove_contributor};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::issues::{
    create_issue, delete_issue, get_issue, list_issues, update_issue,
};
use backend::inbound::http::projects::{
    create_project, delete_project, get_project, list_projects, update_project,
};
use backend::inbound::http::users::{current_user, login};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the HTTP server from configuration and shared health state.
///
/// # Errors
///
/// Returns [`std::io::Error`] when binding the listen address fails.
pub fn create_server(
    config: ServerConfig,
    health_state: web::Data<HealthState>,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool,
    } = config;

    let http_state = build_http_state(&db_pool);

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".to_owned())
            .cookie_secure(cookie_secure)
            .cookie_same_site(same_site)
            .build();

        let api = web::scope("/api/v1")
            .app_data(web::Data::new(http_state.clone()))
            .service(login)
            .service(current_user)
            .service(list_projects)
            .service(create_project)
            .service(get_project)
            .service(update_project)
            .service(delete_project)
            .service(list_contributors)
            .service(add_contributor)
            .service(remove_contributor)
            .service(list_issues)
            .service(create_issue)
            .service(get_issue)
            .service(update_issue)
            .service(delete_issue)
            .service(list_comments)
            .service(create_comment)
            .service(get_comment)
            .service(update_comment)
            .service(delete_comment);

        let app = App::new()
            .app_data(health_state.clone())
            .wrap(session)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
