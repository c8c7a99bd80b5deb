use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Villa as it appears on the wire.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VillaTransferDoc {
    /// Assigned by the server; must be 0 on create.
    pub id: i32,
    /// Required, at most 30 characters, unique ignoring case.
    pub first_name: String,
    pub last_name: Option<String>,
    pub details: Option<String>,
    pub rate: f64,
    pub occupancy: i32,
    pub square_footage: i32,
    pub image_url: Option<String>,
    pub amenities: Option<String>,
}

/// One RFC 6902 operation. `value` is used by add/replace/test, `from` by move/copy.
#[derive(ToSchema)]
pub struct PatchOperationDoc {
    #[schema(example = "replace")]
    pub op: String,
    #[schema(example = "/firstName")]
    pub path: String,
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
    pub from: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub status: u16,
    pub error: String,
    pub detail: Option<String>,
    /// Field name to messages, present on validation failures.
    pub errors: Option<std::collections::HashMap<String, Vec<String>>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::villas::list,
        crate::routes::villas::get,
        crate::routes::villas::create,
        crate::routes::villas::update,
        crate::routes::villas::patch,
        crate::routes::villas::delete,
    ),
    components(
        schemas(
            HealthResponse,
            VillaTransferDoc,
            PatchOperationDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "villa", description = "Villa listings")
    )
)]
pub struct ApiDoc;
