use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    /// Source link as entered by the instructor; never empty. Embed and
    /// thumbnail URLs are derived from it at read time.
    pub youtube_url: String,
    pub allow_embed: bool,
    /// Optional hand-set thumbnail, overriding the derived one.
    pub thumbnail_url: Option<String>,

    pub module_id: i32,
    #[sea_orm(belongs_to, from = "module_id", to = "id")]
    pub module: Option<super::course_module::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
