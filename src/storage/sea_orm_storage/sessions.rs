//! 场次存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, classify_db_err, query_err};
use crate::entity::sessions::{ActiveModel, Column, Entity as Sessions, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::sessions::entities::{NewSession, Session, SessionListing, SessionStatus};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建场次
    pub async fn create_session_impl(&self, session: NewSession) -> Result<Session> {
        let model = ActiveModel {
            title: Set(session.title),
            description: Set(session.description),
            instructor_id: Set(session.instructor_id),
            scheduled_at: Set(session.scheduled_at),
            meeting_ref: Set(session.meeting_ref),
            status: Set(SessionStatus::Scheduled.to_string()),
            created_at: Set(session.created_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "创建场次失败", ClassroomError::Validation))?;

        Ok(result.into_session())
    }

    /// 通过 ID 获取场次
    pub async fn get_session_by_id_impl(&self, id: i64) -> Result<Option<Session>> {
        let result = Sessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("查询场次失败"))?;

        Ok(result.map(|m| m.into_session()))
    }

    /// 列出教师自己的场次
    pub async fn list_sessions_by_instructor_impl(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<Session>> {
        let models = Sessions::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .order_by_asc(Column::ScheduledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询场次列表失败"))?;

        Ok(models.into_iter().map(|m| m.into_session()).collect())
    }

    /// 列出全部场次（附教师姓名）
    pub async fn list_sessions_with_instructor_impl(&self) -> Result<Vec<SessionListing>> {
        let models = Sessions::find()
            .order_by_asc(Column::ScheduledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询场次列表失败"))?;

        self.attach_instructor_names(models).await
    }

    /// 为场次补充教师姓名
    pub(crate) async fn attach_instructor_names(
        &self,
        models: Vec<Model>,
    ) -> Result<Vec<SessionListing>> {
        let mut instructor_ids: Vec<i64> = models.iter().map(|m| m.instructor_id).collect();
        instructor_ids.sort_unstable();
        instructor_ids.dedup();

        let names: HashMap<i64, String> = if instructor_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(instructor_ids))
                .all(&self.db)
                .await
                .map_err(query_err("查询教师信息失败"))?
                .into_iter()
                .map(|u| (u.id, u.full_name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let instructor_name = names.get(&m.instructor_id).cloned().unwrap_or_default();
                SessionListing {
                    session: m.into_session(),
                    instructor_name,
                }
            })
            .collect())
    }
}
