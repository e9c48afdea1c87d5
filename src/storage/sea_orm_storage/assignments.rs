//! 作业存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, classify_db_err, query_err};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::entity::sessions::{Entity as Sessions, Model as SessionModel};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::assignments::entities::{
    Assignment, AssignmentListing, AssignmentStatus, NewAssignment, ReviewRecord,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 提交作业
    pub async fn create_assignment_impl(&self, assignment: NewAssignment) -> Result<Assignment> {
        let model = ActiveModel {
            session_id: Set(assignment.session_id),
            learner_id: Set(assignment.learner_id),
            instructor_id: Set(assignment.instructor_id),
            title: Set(assignment.title),
            description: Set(assignment.description),
            blob_ref: Set(assignment.blob_ref),
            submitted_at: Set(assignment.submitted_at),
            status: Set(AssignmentStatus::Pending.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "提交作业失败", ClassroomError::Validation))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("查询作业失败"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 批阅作业，布置教师不匹配时不更新任何行
    pub async fn review_assignment_impl(
        &self,
        id: i64,
        instructor_id: i64,
        review: ReviewRecord,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::update_many()
            .col_expr(Column::Status, Expr::value(review.status.to_string()))
            .col_expr(Column::Grade, Expr::value(review.grade))
            .col_expr(Column::Feedback, Expr::value(review.feedback))
            .filter(Column::Id.eq(id))
            .filter(Column::InstructorId.eq(instructor_id))
            .exec(&self.db)
            .await
            .map_err(query_err("批阅作业失败"))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(id).await
    }

    /// 教师布置的作业，最新提交在前
    pub async fn list_assignments_by_instructor_impl(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<AssignmentListing>> {
        let rows = Assignments::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .find_also_related(Sessions)
            .all(&self.db)
            .await
            .map_err(query_err("查询作业列表失败"))?;

        self.attach_assignment_context(rows).await
    }

    /// 学员自己的作业，可限定场次
    pub async fn list_assignments_by_learner_impl(
        &self,
        learner_id: i64,
        session_id: Option<i64>,
    ) -> Result<Vec<AssignmentListing>> {
        let mut select = Assignments::find().filter(Column::LearnerId.eq(learner_id));
        if let Some(session_id) = session_id {
            select = select.filter(Column::SessionId.eq(session_id));
        }

        let rows = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .find_also_related(Sessions)
            .all(&self.db)
            .await
            .map_err(query_err("查询作业列表失败"))?;

        self.attach_assignment_context(rows).await
    }

    async fn attach_assignment_context(
        &self,
        rows: Vec<(Model, Option<SessionModel>)>,
    ) -> Result<Vec<AssignmentListing>> {
        let mut learner_ids: Vec<i64> = rows.iter().map(|(a, _)| a.learner_id).collect();
        learner_ids.sort_unstable();
        learner_ids.dedup();

        let names: HashMap<i64, String> = if learner_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(learner_ids))
                .all(&self.db)
                .await
                .map_err(query_err("查询学员信息失败"))?
                .into_iter()
                .map(|u| (u.id, u.full_name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(assignment, session)| {
                let learner_name = names
                    .get(&assignment.learner_id)
                    .cloned()
                    .unwrap_or_default();
                AssignmentListing {
                    assignment: assignment.into_assignment(),
                    session_title: session.map(|s| s.title).unwrap_or_default(),
                    learner_name,
                }
            })
            .collect())
    }
}
