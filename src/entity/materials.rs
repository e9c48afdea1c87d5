//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub title: String,
    pub blob_ref: String,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id"
    )]
    Session,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::Material;
        use chrono::{DateTime, Utc};

        Material {
            id: self.id,
            session_id: self.session_id,
            title: self.title,
            blob_ref: self.blob_ref,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
