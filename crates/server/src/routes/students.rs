use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::errors::ServiceError;
use service::students::{StudentFields, StudentRecord};
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability::{
    NOT_FOUND_TOTAL, STUDENTS_CREATED_TOTAL, STUDENTS_DELETED_TOTAL, STUDENTS_REPLACED_TOTAL,
};
use crate::state::AppState;

fn not_found(id: u64) -> JsonApiError {
    NOT_FOUND_TOTAL.inc();
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("student {} not found", id)))
}

#[utoipa::path(
    get, path = "/api/students", tag = "students",
    responses((status = 200, description = "All students ordered by id"))
)]
pub async fn list_students(State(state): State<AppState>) -> Json<Vec<StudentRecord>> {
    Json(state.students.list().await)
}

#[utoipa::path(
    get, path = "/api/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StudentRecord>, JsonApiError> {
    match state.students.get(id).await {
        Ok(rec) => Ok(Json(rec)),
        Err(ServiceError::NotFound(_)) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post, path = "/api/students", tag = "students",
    request_body = crate::openapi::StudentFieldsDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 422, description = "Body is not an object of primitive values")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(fields): Json<StudentFields>,
) -> Result<(StatusCode, Json<StudentRecord>), JsonApiError> {
    let rec = state.students.create(fields).await?;
    STUDENTS_CREATED_TOTAL.inc();
    info!(id = rec.id, "student created");
    Ok((StatusCode::CREATED, Json(rec)))
}

#[utoipa::path(
    put, path = "/api/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student ID")),
    request_body = crate::openapi::StudentFieldsDoc,
    responses(
        (status = 200, description = "Replaced (or created when absent)"),
        (status = 400, description = "Invalid id")
    )
)]
pub async fn replace_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(fields): Json<StudentFields>,
) -> Result<Json<StudentRecord>, JsonApiError> {
    let rec = state.students.replace(id, fields).await?;
    STUDENTS_REPLACED_TOTAL.inc();
    info!(id, "student replaced");
    Ok(Json(rec))
}

#[utoipa::path(
    patch, path = "/api/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student ID")),
    request_body = crate::openapi::StudentFieldsDoc,
    responses(
        (status = 200, description = "Merged"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn patch_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(fields): Json<StudentFields>,
) -> Result<Json<StudentRecord>, JsonApiError> {
    match state.students.patch(id, fields).await {
        Ok(rec) => {
            STUDENTS_REPLACED_TOTAL.inc();
            info!(id, "student patched");
            Ok(Json(rec))
        }
        Err(ServiceError::NotFound(_)) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete, path = "/api/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, JsonApiError> {
    if state.students.delete(id).await {
        STUDENTS_DELETED_TOTAL.inc();
        info!(id, "student deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
