use serde::Serialize;

use super::entities::{Session, SessionListing};
use crate::models::{
    accounts::entities::Account, assignments::entities::Assignment,
    materials::entities::Material,
};

// 教师视角：场次 + 已选学员 + 资料
#[derive(Debug, Clone, Serialize)]
pub struct InstructorSessionView {
    pub session: Session,
    pub learners: Vec<Account>,
    pub materials: Vec<Material>,
}

// 学员视角：场次 + 资料 + 自己在该场次的作业
#[derive(Debug, Clone, Serialize)]
pub struct LearnerSessionView {
    pub session: SessionListing,
    pub materials: Vec<Material>,
    pub assignments: Vec<Assignment>,
}
