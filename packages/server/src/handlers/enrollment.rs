use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{enrollment, user_course_progress};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::course::find_course;
use crate::models::enrollment::{
    EnrollResponse, ProgressResponse, UpdateProgressRequest, validate_update_progress,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{id}/enroll",
    tag = "Enrollment",
    operation_id = "enrollCourse",
    summary = "Enroll in a course",
    description = "Idempotently enrolls the authenticated user and initializes their progress record. Repeat calls report the existing enrollment instead of failing. No payment status is checked on this path: paid courses are enrollable here too.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollResponse),
        (status = 200, description = "Already enrolled", body = EnrollResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(course_id, user_id = auth_user.user_id))]
pub async fn enroll(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_course(&state.db, course_id).await?;

    let created = ensure_enrolled(&state.db, auth_user.user_id, course_id).await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Successfully enrolled!")
    } else {
        (StatusCode::OK, "You are already enrolled in this course.")
    };

    Ok((
        status,
        Json(EnrollResponse {
            course_id,
            created,
            message: message.to_string(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}/progress",
    tag = "Enrollment",
    operation_id = "updateProgress",
    summary = "Record course progress",
    description = "Upserts the authenticated user's completion percentage for an enrolled course.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Progress recorded", body = ProgressResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Course not found or not enrolled (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(course_id, user_id = auth_user.user_id))]
pub async fn update_progress(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    AppJson(payload): AppJson<UpdateProgressRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    validate_update_progress(&payload)?;

    find_course(&state.db, course_id).await?;

    enrollment::Entity::find_by_id((auth_user.user_id, course_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Not enrolled in this course".into()))?;

    let progress = user_course_progress::ActiveModel {
        user_id: Set(auth_user.user_id),
        course_id: Set(course_id),
        progress_percentage: Set(payload.progress_percentage),
    };

    user_course_progress::Entity::insert(progress)
        .on_conflict(
            sea_orm::sea_query::OnConflict::columns([
                user_course_progress::Column::UserId,
                user_course_progress::Column::CourseId,
            ])
            .update_column(user_course_progress::Column::ProgressPercentage)
            .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    Ok(Json(ProgressResponse {
        course_id,
        progress_percentage: payload.progress_percentage,
    }))
}

/// Idempotently create the enrollment and its progress record for a
/// (user, course) pair. Returns whether the enrollment was newly created.
///
/// Both inserts lean on the composite primary keys: a racing duplicate
/// resolves to `RecordNotInserted` instead of an error.
pub(crate) async fn ensure_enrolled<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    course_id: i32,
) -> Result<bool, AppError> {
    let new_enrollment = enrollment::ActiveModel {
        user_id: Set(user_id),
        course_id: Set(course_id),
        enrolled_at: Set(chrono::Utc::now()),
    };

    let created = match enrollment::Entity::insert(new_enrollment)
        .on_conflict(
            sea_orm::sea_query::OnConflict::columns([
                enrollment::Column::UserId,
                enrollment::Column::CourseId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await
    {
        Ok(_) => true,
        Err(DbErr::RecordNotInserted) => false,
        Err(e) => return Err(e.into()),
    };

    let new_progress = user_course_progress::ActiveModel {
        user_id: Set(user_id),
        course_id: Set(course_id),
        progress_percentage: Set(0),
    };

    match user_course_progress::Entity::insert(new_progress)
        .on_conflict(
            sea_orm::sea_query::OnConflict::columns([
                user_course_progress::Column::UserId,
                user_course_progress::Column::CourseId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await
    {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e.into()),
    }

    if created {
        tracing::info!(user_id, course_id, "Enrolled user in course");
    }

    Ok(created)
}
