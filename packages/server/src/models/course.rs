use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::utils::video as video_link;

pub use super::shared::{Pagination, escape_like};
use super::shared::{double_option, validate_title};

/// Number of courses shown on the home/featured listing.
pub const FEATURED_COURSE_COUNT: u64 = 4;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub price: f64,
    pub thumbnail: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_paid: Option<bool>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail: Option<Option<String>>,
}

/// Course as it appears in listings and dashboards.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CourseSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_paid: bool,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CourseListResponse {
    pub data: Vec<CourseSummary>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FeaturedCoursesResponse {
    pub data: Vec<CourseSummary>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct CourseListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Full course detail: content tree plus reviews.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CourseDetailResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_paid: bool,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<ModuleResponse>,
    pub reviews: Vec<ReviewResponse>,
    /// The requesting user's earliest review of this course, when
    /// authenticated and present.
    pub user_review: Option<ReviewResponse>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateModuleRequest {
    pub title: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ModuleResponse {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub videos: Vec<VideoResponse>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
    pub youtube_url: String,
    pub allow_embed: Option<bool>,
    pub thumbnail_url: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub youtube_url: Option<String>,
    pub allow_embed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail_url: Option<Option<String>>,
}

/// Video with its playback URLs resolved.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoResponse {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    pub youtube_url: String,
    pub allow_embed: bool,
    /// URL usable inside an inline player frame.
    pub embed_url: String,
    /// Hand-set thumbnail when present, otherwise derived from the source
    /// link; empty when neither resolves.
    pub thumbnail_url: String,
}

impl From<crate::entity::video::Model> for VideoResponse {
    fn from(m: crate::entity::video::Model) -> Self {
        let embed_url = video_link::embed_url(&m.youtube_url);
        let thumbnail_url = match m.thumbnail_url {
            Some(custom) if !custom.trim().is_empty() => custom,
            _ => video_link::thumbnail_url(&m.youtube_url),
        };
        Self {
            id: m.id,
            module_id: m.module_id,
            title: m.title,
            youtube_url: m.youtube_url,
            allow_embed: m.allow_embed,
            embed_url,
            thumbnail_url,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateReviewRequest {
    /// Star rating, 1-5.
    #[schema(example = 5)]
    pub rating: i32,
    pub comment: String,
}

#[derive(Clone, Serialize, utoipa::ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    /// Reviewer's username, empty if the account no longer resolves.
    pub username: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::course::Model> for CourseSummary {
    fn from(m: crate::entity::course::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            is_paid: m.is_paid,
            price: m.price,
            thumbnail: m.thumbnail,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_course(req: &CreateCourseRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    validate_price(req.price)?;
    Ok(())
}

pub fn validate_update_course(req: &UpdateCourseRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref description) = req.description {
        validate_description(description)?;
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() || description.len() > 100_000 {
        return Err(AppError::Validation(
            "Description must be non-empty and at most 100KB".into(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation("Price must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_module(req: &CreateModuleRequest) -> Result<(), AppError> {
    validate_title(&req.title)
}

pub fn validate_update_module(req: &UpdateModuleRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    Ok(())
}

pub fn validate_create_video(req: &CreateVideoRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    if req.youtube_url.trim().is_empty() {
        return Err(AppError::Validation("youtube_url must not be empty".into()));
    }
    Ok(())
}

pub fn validate_update_video(req: &UpdateVideoRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref url) = req.youtube_url
        && url.trim().is_empty()
    {
        return Err(AppError::Validation("youtube_url must not be empty".into()));
    }
    Ok(())
}

pub fn validate_create_review(req: &CreateReviewRequest) -> Result<(), AppError> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }
    if req.comment.trim().is_empty() || req.comment.len() > 5_000 {
        return Err(AppError::Validation(
            "Comment must be non-empty and at most 5000 characters".into(),
        ));
    }
    Ok(())
}
