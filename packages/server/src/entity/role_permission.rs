use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grant of a catalog permission (`course:create`, `course:edit`,
/// `course:delete`) to a role. Seeded at startup; login copies the role's
/// grants into the token claims.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role_permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub role: String,
    #[sea_orm(primary_key)]
    pub permission: String,
    #[sea_orm(belongs_to, from = "role", to = "name")]
    pub role_ref: Option<super::role::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
