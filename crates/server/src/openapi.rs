use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Illustrative payload; any flat object of string, number or boolean values is accepted.
#[derive(ToSchema)]
pub struct StudentFieldsDoc {
    pub name: String,
    pub phone: Option<String>,
    pub dob: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::create_student,
        crate::routes::students::replace_student,
        crate::routes::students::patch_student,
        crate::routes::students::delete_student,
        crate::routes::decode::decode_query,
        crate::routes::decode::decode_body,
    ),
    components(
        schemas(
            HealthResponse,
            StudentFieldsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students"),
        (name = "decode")
    )
)]
pub struct ApiDoc;
