use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Outcome of an enrollment request. The operation is idempotent; `created`
/// distinguishes a first enrollment from a repeat.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EnrollResponse {
    pub course_id: i32,
    pub created: bool,
    #[schema(example = "Successfully enrolled!")]
    pub message: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateProgressRequest {
    /// Completion percentage, 0-100.
    #[schema(example = 60)]
    pub progress_percentage: i32,
}

pub fn validate_update_progress(req: &UpdateProgressRequest) -> Result<(), AppError> {
    if !(0..=100).contains(&req.progress_percentage) {
        return Err(AppError::Validation(
            "progress_percentage must be between 0 and 100".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProgressResponse {
    pub course_id: i32,
    pub progress_percentage: i32,
}
