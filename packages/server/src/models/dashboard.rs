use chrono::{DateTime, Utc};
use serde::Serialize;

use super::course::CourseSummary;

/// One enrolled course with its completion percentage.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DashboardItem {
    pub course: CourseSummary,
    /// Stored progress, or the fixed fallback when none was recorded yet.
    pub progress_percentage: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DashboardResponse {
    pub data: Vec<DashboardItem>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MyCourseItem {
    pub course: CourseSummary,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MyCoursesResponse {
    pub data: Vec<MyCourseItem>,
}
