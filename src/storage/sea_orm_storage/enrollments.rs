//! 选课存储操作

use super::{SeaOrmStorage, classify_db_err, query_err};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::sessions::{
    Column as SessionColumn, Entity as Sessions, Relation as SessionRelation,
};
use crate::entity::users::{Column as UserColumn, Entity as Users, Relation as UserRelation};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    accounts::entities::Account,
    enrollments::entities::Enrollment,
    sessions::entities::{SessionListing, SessionStatus},
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 选课
    pub async fn create_enrollment_impl(
        &self,
        learner_id: i64,
        session_id: i64,
        enrolled_at: i64,
    ) -> Result<Enrollment> {
        let model = ActiveModel {
            learner_id: Set(learner_id),
            session_id: Set(session_id),
            enrolled_at: Set(enrolled_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "选课失败", ClassroomError::AlreadyEnrolled))?;

        Ok(result.into_enrollment())
    }

    /// 获取选课记录
    pub async fn get_enrollment_impl(
        &self,
        learner_id: i64,
        session_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::LearnerId.eq(learner_id))
                    .add(Column::SessionId.eq(session_id)),
            )
            .one(&self.db)
            .await
            .map_err(query_err("查询选课记录失败"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 学员已选的场次
    pub async fn list_enrolled_sessions_impl(
        &self,
        learner_id: i64,
    ) -> Result<Vec<SessionListing>> {
        let models = Sessions::find()
            .join(JoinType::InnerJoin, SessionRelation::Enrollments.def())
            .filter(Column::LearnerId.eq(learner_id))
            .order_by_asc(SessionColumn::ScheduledAt)
            .order_by_asc(SessionColumn::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询已选场次失败"))?;

        self.attach_instructor_names(models).await
    }

    /// 学员可选的场次：已排期且未选
    pub async fn list_available_sessions_impl(
        &self,
        learner_id: i64,
    ) -> Result<Vec<SessionListing>> {
        let enrolled = Query::select()
            .column(Column::SessionId)
            .from(Enrollments)
            .and_where(Column::LearnerId.eq(learner_id))
            .to_owned();

        let models = Sessions::find()
            .filter(SessionColumn::Status.eq(SessionStatus::Scheduled.to_string()))
            .filter(SessionColumn::Id.not_in_subquery(enrolled))
            .order_by_asc(SessionColumn::ScheduledAt)
            .order_by_asc(SessionColumn::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询可选场次失败"))?;

        self.attach_instructor_names(models).await
    }

    /// 场次的已选学员
    pub async fn list_enrolled_learners_impl(&self, session_id: i64) -> Result<Vec<Account>> {
        let models = Users::find()
            .join(JoinType::InnerJoin, UserRelation::Enrollments.def())
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(UserColumn::FullName)
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询已选学员失败"))?;

        Ok(models.into_iter().map(|m| m.into_account()).collect())
    }
}
