//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub learner_id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub blob_ref: Option<String>,
    pub submitted_at: i64,
    pub status: String,
    pub grade: Option<String>,
    pub feedback: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LearnerId",
        to = "super::users::Column::Id"
    )]
    Learner,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentStatus};
        use chrono::{DateTime, Utc};

        Assignment {
            id: self.id,
            session_id: self.session_id,
            learner_id: self.learner_id,
            instructor_id: self.instructor_id,
            title: self.title,
            description: self.description,
            blob_ref: self.blob_ref,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0).unwrap_or_default(),
            status: super::parse_column(
                "assignments",
                self.id,
                &self.status,
                AssignmentStatus::Pending,
            ),
            grade: self.grade,
            feedback: self.feedback,
        }
    }
}
