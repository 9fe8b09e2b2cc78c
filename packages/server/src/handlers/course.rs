use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{
    course, course_module, enrollment, payment, review, user, user_course_progress, video,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, OptionalAuthUser};
use crate::extractors::json::{AppJson, AppQuery};
use crate::models::course::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Courses",
    operation_id = "createCourse",
    summary = "Create a new course",
    description = "Creates a new course in the catalog. Requires `course:create` permission. A paid flag with a zero price is accepted; the pairing is not enforced.",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseSummary),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_course(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("course:create")?;
    validate_create_course(&payload)?;

    let now = chrono::Utc::now();
    let new_course = course::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        is_paid: Set(payload.is_paid),
        price: Set(payload.price),
        thumbnail: Set(payload.thumbnail),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_course.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(CourseSummary::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Courses",
    operation_id = "listCourses",
    summary = "List courses with pagination and search",
    description = "Public listing of the full catalog with optional case-insensitive title search. Supports sorting by `created_at` (default, desc), `title`, or `price`.",
    params(CourseListQuery),
    responses(
        (status = 200, description = "List of courses", body = CourseListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_courses(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CourseListQuery>,
) -> Result<Json<CourseListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = course::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(course::Column::Title)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let sort_by = query.sort_by.as_deref().unwrap_or("created_at");
    let sort_order = if query.sort_order.as_deref() == Some("asc") {
        Order::Asc
    } else {
        Order::Desc
    };
    let sort_column = match sort_by {
        "created_at" => course::Column::CreatedAt,
        "title" => course::Column::Title,
        "price" => course::Column::Price,
        _ => {
            return Err(AppError::Validation(
                "sort_by must be one of: created_at, title, price".into(),
            ));
        }
    };

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    select = select.order_by(sort_column, sort_order);
    let total_pages = total.div_ceil(per_page);

    let data = select
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(CourseSummary::from)
        .collect();

    Ok(Json(CourseListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/featured",
    tag = "Courses",
    operation_id = "featuredCourses",
    summary = "Home-page course selection",
    description = "Public. Returns the first four catalog courses, oldest first.",
    responses(
        (status = 200, description = "Featured courses", body = FeaturedCoursesResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn featured_courses(
    State(state): State<AppState>,
) -> Result<Json<FeaturedCoursesResponse>, AppError> {
    let data = course::Entity::find()
        .order_by_asc(course::Column::Id)
        .limit(FEATURED_COURSE_COUNT)
        .all(&state.db)
        .await?
        .into_iter()
        .map(CourseSummary::from)
        .collect();

    Ok(Json(FeaturedCoursesResponse { data }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Courses",
    operation_id = "getCourse",
    summary = "Course detail",
    description = "Public. Returns the course with its module/video tree (playback URLs resolved) and reviews. When the request carries a valid token, `user_review` holds the caller's earliest review.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_course(
    OptionalAuthUser(auth_user): OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course_model = find_course(&state.db, id).await?;

    let modules = course_module::Entity::find()
        .filter(course_module::Column::CourseId.eq(id))
        .order_by_asc(course_module::Column::Id)
        .all(&state.db)
        .await?;

    let module_ids: Vec<i32> = modules.iter().map(|m| m.id).collect();
    let mut videos_by_module: HashMap<i32, Vec<VideoResponse>> = HashMap::new();
    if !module_ids.is_empty() {
        let videos = video::Entity::find()
            .filter(video::Column::ModuleId.is_in(module_ids))
            .order_by_asc(video::Column::Id)
            .all(&state.db)
            .await?;
        for v in videos {
            videos_by_module
                .entry(v.module_id)
                .or_default()
                .push(v.into());
        }
    }

    let modules = modules
        .into_iter()
        .map(|m| ModuleResponse {
            videos: videos_by_module.remove(&m.id).unwrap_or_default(),
            id: m.id,
            course_id: m.course_id,
            title: m.title,
        })
        .collect();

    let review_rows = review::Entity::find()
        .filter(review::Column::CourseId.eq(id))
        .find_also_related(user::Entity)
        .order_by_asc(review::Column::Id)
        .all(&state.db)
        .await?;

    let reviews: Vec<ReviewResponse> = review_rows
        .into_iter()
        .map(|(r, reviewer)| ReviewResponse {
            id: r.id,
            course_id: r.course_id,
            user_id: r.user_id,
            username: reviewer.map(|u| u.username).unwrap_or_default(),
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        })
        .collect();

    let user_review = auth_user
        .as_ref()
        .and_then(|u| reviews.iter().find(|r| r.user_id == u.user_id).cloned());

    Ok(Json(CourseDetailResponse {
        id: course_model.id,
        title: course_model.title,
        description: course_model.description,
        is_paid: course_model.is_paid,
        price: course_model.price,
        thumbnail: course_model.thumbnail,
        created_at: course_model.created_at,
        updated_at: course_model.updated_at,
        modules,
        reviews,
        user_review,
    }))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Courses",
    operation_id = "updateCourse",
    summary = "Update an existing course",
    description = "Partially updates a course using PATCH semantics. Requires `course:edit` permission. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseSummary),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_course(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCourseRequest>,
) -> Result<Json<CourseSummary>, AppError> {
    auth_user.require_permission("course:edit")?;
    validate_update_course(&payload)?;

    if payload == UpdateCourseRequest::default() {
        let existing = find_course(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let existing = find_course(&state.db, id).await?;
    let mut active: course::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(is_paid) = payload.is_paid {
        active.is_paid = Set(is_paid);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(thumbnail) = payload.thumbnail {
        active.thumbnail = Set(thumbnail);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Courses",
    operation_id = "deleteCourse",
    summary = "Delete a course",
    description = "Permanently deletes a course and cascade-deletes its modules, videos, reviews, enrollments, progress records, and payment log entries. Requires `course:delete` permission.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_course(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("course:delete")?;

    let txn = state.db.begin().await?;
    find_course_for_update(&txn, id).await?;

    let module_ids: Vec<i32> = course_module::Entity::find()
        .filter(course_module::Column::CourseId.eq(id))
        .select_only()
        .column(course_module::Column::Id)
        .into_tuple::<i32>()
        .all(&txn)
        .await?;

    if !module_ids.is_empty() {
        video::Entity::delete_many()
            .filter(video::Column::ModuleId.is_in(module_ids))
            .exec(&txn)
            .await?;
    }
    course_module::Entity::delete_many()
        .filter(course_module::Column::CourseId.eq(id))
        .exec(&txn)
        .await?;
    review::Entity::delete_many()
        .filter(review::Column::CourseId.eq(id))
        .exec(&txn)
        .await?;
    enrollment::Entity::delete_many()
        .filter(enrollment::Column::CourseId.eq(id))
        .exec(&txn)
        .await?;
    user_course_progress::Entity::delete_many()
        .filter(user_course_progress::Column::CourseId.eq(id))
        .exec(&txn)
        .await?;
    payment::Entity::delete_many()
        .filter(payment::Column::CourseId.eq(id))
        .exec(&txn)
        .await?;
    course::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/modules",
    tag = "Course Content",
    operation_id = "createModule",
    summary = "Add a module to a course",
    description = "Requires `course:edit` permission.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Module created", body = ModuleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(course_id))]
pub async fn create_module(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    AppJson(payload): AppJson<CreateModuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("course:edit")?;
    validate_create_module(&payload)?;

    find_course(&state.db, course_id).await?;

    let new_module = course_module::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        course_id: Set(course_id),
        ..Default::default()
    };

    let model = new_module.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(ModuleResponse {
            id: model.id,
            course_id: model.course_id,
            title: model.title,
            videos: Vec::new(),
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/{id}/modules/{module_id}",
    tag = "Course Content",
    operation_id = "updateModule",
    summary = "Rename a module",
    description = "Requires `course:edit` permission.",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("module_id" = i32, Path, description = "Module ID"),
    ),
    request_body = UpdateModuleRequest,
    responses(
        (status = 200, description = "Module updated", body = ModuleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Module not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(course_id, module_id))]
pub async fn update_module(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((course_id, module_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateModuleRequest>,
) -> Result<Json<ModuleResponse>, AppError> {
    auth_user.require_permission("course:edit")?;
    validate_update_module(&payload)?;

    let existing = find_module(&state.db, course_id, module_id).await?;

    let model = if let Some(title) = payload.title {
        let mut active: course_module::ActiveModel = existing.into();
        active.title = Set(title.trim().to_string());
        active.update(&state.db).await?
    } else {
        existing
    };

    let videos = video::Entity::find()
        .filter(video::Column::ModuleId.eq(module_id))
        .order_by_asc(video::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(VideoResponse::from)
        .collect();

    Ok(Json(ModuleResponse {
        id: model.id,
        course_id: model.course_id,
        title: model.title,
        videos,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}/modules/{module_id}",
    tag = "Course Content",
    operation_id = "deleteModule",
    summary = "Delete a module and its videos",
    description = "Requires `course:edit` permission.",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("module_id" = i32, Path, description = "Module ID"),
    ),
    responses(
        (status = 204, description = "Module deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Module not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(course_id, module_id))]
pub async fn delete_module(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((course_id, module_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("course:edit")?;

    let txn = state.db.begin().await?;
    let existing = find_module(&txn, course_id, module_id).await?;

    video::Entity::delete_many()
        .filter(video::Column::ModuleId.eq(module_id))
        .exec(&txn)
        .await?;
    let active: course_module::ActiveModel = existing.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/modules/{module_id}/videos",
    tag = "Course Content",
    operation_id = "createVideo",
    summary = "Add a video to a module",
    description = "Requires `course:edit` permission. The source link is required and never empty; embed and thumbnail URLs are derived from it when the video is served.",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("module_id" = i32, Path, description = "Module ID"),
    ),
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Module not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(course_id, module_id))]
pub async fn create_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((course_id, module_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("course:edit")?;
    validate_create_video(&payload)?;

    find_module(&state.db, course_id, module_id).await?;

    let new_video = video::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        youtube_url: Set(payload.youtube_url.trim().to_string()),
        allow_embed: Set(payload.allow_embed.unwrap_or(true)),
        thumbnail_url: Set(payload.thumbnail_url),
        module_id: Set(module_id),
        ..Default::default()
    };

    let model = new_video.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(VideoResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}/modules/{module_id}/videos/{video_id}",
    tag = "Course Content",
    operation_id = "updateVideo",
    summary = "Update a video",
    description = "Requires `course:edit` permission.",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("module_id" = i32, Path, description = "Module ID"),
        ("video_id" = i32, Path, description = "Video ID"),
    ),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(course_id, module_id, video_id))]
pub async fn update_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((course_id, module_id, video_id)): Path<(i32, i32, i32)>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    auth_user.require_permission("course:edit")?;
    validate_update_video(&payload)?;

    let existing = find_video(&state.db, course_id, module_id, video_id).await?;

    if payload == UpdateVideoRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: video::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(ref url) = payload.youtube_url {
        active.youtube_url = Set(url.trim().to_string());
    }
    if let Some(allow_embed) = payload.allow_embed {
        active.allow_embed = Set(allow_embed);
    }
    if let Some(thumbnail_url) = payload.thumbnail_url {
        active.thumbnail_url = Set(thumbnail_url);
    }

    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}/modules/{module_id}/videos/{video_id}",
    tag = "Course Content",
    operation_id = "deleteVideo",
    summary = "Delete a video",
    description = "Requires `course:edit` permission.",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("module_id" = i32, Path, description = "Module ID"),
        ("video_id" = i32, Path, description = "Video ID"),
    ),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(course_id, module_id, video_id))]
pub async fn delete_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((course_id, module_id, video_id)): Path<(i32, i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("course:edit")?;

    let existing = find_video(&state.db, course_id, module_id, video_id).await?;
    let active: video::ActiveModel = existing.into();
    active.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/reviews",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Leave a review on a course",
    description = "Ratings are capped to 1-5. There is no uniqueness rule: the same student may review a course repeatedly, and every review is kept.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(course_id, user_id = auth_user.user_id))]
pub async fn create_review(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    AppJson(payload): AppJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_review(&payload)?;

    find_course(&state.db, course_id).await?;

    let new_review = review::ActiveModel {
        course_id: Set(course_id),
        user_id: Set(auth_user.user_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_review.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            id: model.id,
            course_id: model.course_id,
            user_id: model.user_id,
            username: auth_user.username,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
        }),
    ))
}

pub(crate) async fn find_course<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<course::Model, AppError> {
    course::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))
}

async fn find_course_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<course::Model, AppError> {
    use sea_orm::sea_query::LockType;
    course::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))
}

async fn find_module<C: ConnectionTrait>(
    db: &C,
    course_id: i32,
    module_id: i32,
) -> Result<course_module::Model, AppError> {
    course_module::Entity::find_by_id(module_id)
        .filter(course_module::Column::CourseId.eq(course_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Module not found".into()))
}

async fn find_video<C: ConnectionTrait>(
    db: &C,
    course_id: i32,
    module_id: i32,
    video_id: i32,
) -> Result<video::Model, AppError> {
    let model = video::Entity::find_by_id(video_id)
        .filter(video::Column::ModuleId.eq(module_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))?;

    // The module must actually hang off the course named in the path.
    find_module(db, course_id, module_id).await?;

    Ok(model)
}
