//! OpenAPI document for the REST endpoints.

use utoipa::OpenApi;

use super::handlers::{register, system};

/// Generated OpenAPI description, served under `/api-docs/openapi.json`
/// when the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "secret-santa", description = "Secret Santa registration service"),
    paths(register::register, system::health_handler),
    tags(
        (name = "Registration", description = "Participant registration"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_both_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/register"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
