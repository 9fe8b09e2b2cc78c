use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{course, enrollment, user_course_progress};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::dashboard::{DashboardItem, DashboardResponse, MyCourseItem, MyCoursesResponse};
use crate::state::AppState;

/// Percentage shown for enrolled courses with no recorded progress row.
const FALLBACK_PROGRESS: i32 = 45;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    operation_id = "dashboard",
    summary = "Enrolled courses with completion percentages",
    description = "Aggregates the authenticated user's enrollments with their stored progress. Courses without a progress row fall back to a fixed placeholder percentage.",
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn dashboard(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let rows = enrollment::Entity::find()
        .filter(enrollment::Column::UserId.eq(auth_user.user_id))
        .find_also_related(course::Entity)
        .order_by_asc(enrollment::Column::EnrolledAt)
        .all(&state.db)
        .await?;

    let progress: HashMap<i32, i32> = user_course_progress::Entity::find()
        .filter(user_course_progress::Column::UserId.eq(auth_user.user_id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| (p.course_id, p.progress_percentage))
        .collect();

    let data = rows
        .into_iter()
        .filter_map(|(_, course_model)| {
            course_model.map(|c| DashboardItem {
                progress_percentage: progress.get(&c.id).copied().unwrap_or(FALLBACK_PROGRESS),
                course: c.into(),
            })
        })
        .collect();

    Ok(Json(DashboardResponse { data }))
}

#[utoipa::path(
    get,
    path = "/my-courses",
    tag = "Dashboard",
    operation_id = "myCourses",
    summary = "The authenticated user's enrollments",
    responses(
        (status = 200, description = "Enrolled courses", body = MyCoursesResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_courses(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MyCoursesResponse>, AppError> {
    let rows = enrollment::Entity::find()
        .filter(enrollment::Column::UserId.eq(auth_user.user_id))
        .find_also_related(course::Entity)
        .order_by_asc(enrollment::Column::EnrolledAt)
        .all(&state.db)
        .await?;

    let data = rows
        .into_iter()
        .filter_map(|(enr, course_model)| {
            course_model.map(|c| MyCourseItem {
                course: c.into(),
                enrolled_at: enr.enrolled_at,
            })
        })
        .collect();

    Ok(Json(MyCoursesResponse { data }))
}
