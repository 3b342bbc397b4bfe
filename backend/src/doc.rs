//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the shared
//! error schema wrappers, and the session-cookie security scheme. Swagger
//! UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Issue tracker backend API",
        description = "HTTP interface for session-authenticated project, issue, and comment tracking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::contributors::list_contributors,
        crate::inbound::http::contributors::add_contributor,
        crate::inbound::http::contributors::remove_contributor,
        crate::inbound::http::issues::list_issues,
        crate::inbound::http::issues::create_issue,
        crate::inbound::http::issues::get_issue,
        crate::inbound::http::issues::update_issue,
        crate::inbound::http::issues::delete_issue,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn the_document_contains_every_endpoint_family() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/projects"));
        assert!(
            paths
                .iter()
                .any(|p| p.as_str() == "/api/v1/projects/{project_id}/issues/{issue_id}")
        );
        assert!(paths.iter().any(|p| p.as_str()
            == "/api/v1/projects/{project_id}/issues/{issue_id}/comments/{comment_id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/health/ready"));
    }

    #[test]
    fn the_session_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
