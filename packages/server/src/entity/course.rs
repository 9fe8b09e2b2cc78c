use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: String,
    pub is_paid: bool,
    /// Price in major currency units. `is_paid` with a zero price is
    /// representable; nothing enforces the pairing.
    pub price: f64,
    pub thumbnail: Option<String>,

    #[sea_orm(has_many)]
    pub modules: HasMany<super::course_module::Entity>,

    #[sea_orm(has_many)]
    pub reviews: HasMany<super::review::Entity>,

    #[sea_orm(has_many)]
    pub enrollments: HasMany<super::enrollment::Entity>,

    #[sea_orm(has_many)]
    pub user_progress: HasMany<super::user_course_progress::Entity>,

    #[sea_orm(has_many)]
    pub payments: HasMany<super::payment::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
