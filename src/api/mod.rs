pub mod admin;
pub mod ingredients;
pub mod public;
pub mod recipes;
pub mod tags;
pub mod users;

use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Parse the `assigned_only` query parameter. Absent means false; any
/// integer is accepted, with non-zero meaning true.
pub(crate) fn parse_assigned_only(raw: Option<&str>) -> Result<bool, String> {
    match raw {
        None => Ok(false),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(|v| v != 0)
            .map_err(|_| format!("Invalid assigned_only value: {}", s)),
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        admin::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned_only_absent_is_false() {
        assert_eq!(parse_assigned_only(None), Ok(false));
    }

    #[test]
    fn test_assigned_only_zero_and_one() {
        assert_eq!(parse_assigned_only(Some("0")), Ok(false));
        assert_eq!(parse_assigned_only(Some("1")), Ok(true));
    }

    #[test]
    fn test_assigned_only_other_integers_truthy() {
        assert_eq!(parse_assigned_only(Some("2")), Ok(true));
        assert_eq!(parse_assigned_only(Some("-1")), Ok(true));
    }

    #[test]
    fn test_assigned_only_garbage_rejected() {
        assert!(parse_assigned_only(Some("yes")).is_err());
        assert!(parse_assigned_only(Some("")).is_err());
    }
}
