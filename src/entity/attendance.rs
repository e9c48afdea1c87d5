//! 考勤实体
//!
//! 日期以 `YYYY-MM-DD` 文本存储，便于按日期比较与排序。

use sea_orm::entity::prelude::*;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub learner_id: i64,
    pub date: String,
    pub status: String,
    pub created_at: i64,
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
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance_record(self) -> crate::models::attendance::entities::AttendanceRecord {
        use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
        use chrono::{DateTime, NaiveDate, Utc};

        AttendanceRecord {
            id: self.id,
            session_id: self.session_id,
            learner_id: self.learner_id,
            date: NaiveDate::parse_from_str(&self.date, DATE_FORMAT).unwrap_or_default(),
            status: super::parse_column(
                "attendance",
                self.id,
                &self.status,
                AttendanceStatus::Absent,
            ),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
