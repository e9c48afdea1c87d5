//! 考勤存储操作

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::{SeaOrmStorage, classify_db_err, query_err};
use crate::entity::attendance::{ActiveModel, Column, DATE_FORMAT, Entity as Attendance};
use crate::entity::sessions::Entity as Sessions;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::attendance::entities::{
    AttendanceSheetRow, AttendanceStatus, LearnerAttendance,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 替换某场次某日的考勤：先删后插，同一事务
    pub async fn replace_attendance_impl(
        &self,
        session_id: i64,
        date: NaiveDate,
        entries: &BTreeMap<i64, AttendanceStatus>,
        created_at: i64,
    ) -> Result<usize> {
        let date = date.format(DATE_FORMAT).to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_err("开启事务失败"))?;

        Attendance::delete_many()
            .filter(
                Condition::all()
                    .add(Column::SessionId.eq(session_id))
                    .add(Column::Date.eq(date.clone())),
            )
            .exec(&txn)
            .await
            .map_err(query_err("清除旧考勤失败"))?;

        for (learner_id, status) in entries {
            let model = ActiveModel {
                session_id: Set(session_id),
                learner_id: Set(*learner_id),
                date: Set(date.clone()),
                status: Set(status.to_string()),
                created_at: Set(created_at),
                ..Default::default()
            };
            model
                .insert(&txn)
                .await
                .map_err(|e| classify_db_err(e, "写入考勤失败", ClassroomError::Validation))?;
        }

        txn.commit().await.map_err(query_err("提交考勤事务失败"))?;

        Ok(entries.len())
    }

    /// 某日考勤表：已选学员，未记录者状态为空
    pub async fn attendance_sheet_impl(
        &self,
        session_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceSheetRow>> {
        let learners = self.list_enrolled_learners_impl(session_id).await?;

        let statuses: HashMap<i64, AttendanceStatus> = Attendance::find()
            .filter(
                Condition::all()
                    .add(Column::SessionId.eq(session_id))
                    .add(Column::Date.eq(date.format(DATE_FORMAT).to_string())),
            )
            .all(&self.db)
            .await
            .map_err(query_err("查询考勤失败"))?
            .into_iter()
            .filter_map(|m| {
                let status = m.status.parse::<AttendanceStatus>().ok()?;
                Some((m.learner_id, status))
            })
            .collect();

        Ok(learners
            .into_iter()
            .map(|learner| AttendanceSheetRow {
                status: statuses.get(&learner.id).copied(),
                learner_id: learner.id,
                username: learner.username,
                full_name: learner.full_name,
            })
            .collect())
    }

    /// 学员考勤历史，日期倒序
    pub async fn list_attendance_by_learner_impl(
        &self,
        learner_id: i64,
    ) -> Result<Vec<LearnerAttendance>> {
        let rows = Attendance::find()
            .filter(Column::LearnerId.eq(learner_id))
            .order_by_desc(Column::Date)
            .order_by_asc(Column::SessionId)
            .find_also_related(Sessions)
            .all(&self.db)
            .await
            .map_err(query_err("查询考勤历史失败"))?;

        let mut instructor_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(_, s)| s.as_ref().map(|s| s.instructor_id))
            .collect();
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

        Ok(rows
            .into_iter()
            .map(|(record, session)| {
                let (session_title, instructor_name) = match session {
                    Some(s) => {
                        let name = names.get(&s.instructor_id).cloned().unwrap_or_default();
                        (s.title, name)
                    }
                    None => (String::new(), String::new()),
                };
                LearnerAttendance {
                    record: record.into_attendance_record(),
                    session_title,
                    instructor_name,
                }
            })
            .collect())
    }
}
