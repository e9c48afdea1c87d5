//! 授权判定
//!
//! 所有业务操作在写入前调用 [`authorize`]：先做角色粗检，再做归属细检。
//! 判定是纯函数，不访问存储；归属信息由调用方查询后传入。

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::Role;

/// 调用者身份，显式传入每个业务操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub account_id: i64,
    pub role: Role,
}

impl Caller {
    pub fn new(account_id: i64, role: Role) -> Self {
        Self { account_id, role }
    }
}

/// 归属约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// 仅检查角色
    Unscoped,
    /// 资源归属于指定账号
    OwnedBy(i64),
    /// 调用者是否已选该场次
    Enrolled(bool),
}

pub fn authorize(caller: &Caller, allowed: &[Role], ownership: Ownership) -> Result<()> {
    if !allowed.contains(&caller.role) {
        info!(
            "Access denied for account {} (role: {}). Allowed roles: {:?}",
            caller.account_id, caller.role, allowed
        );
        return Err(ClassroomError::unauthorized(format!(
            "role {} is not allowed",
            caller.role
        )));
    }

    match ownership {
        Ownership::Unscoped => Ok(()),
        Ownership::OwnedBy(owner_id) if owner_id == caller.account_id => Ok(()),
        Ownership::OwnedBy(owner_id) => {
            info!(
                "Access denied for account {}: resource owned by {}",
                caller.account_id, owner_id
            );
            Err(ClassroomError::forbidden(format!(
                "account {} does not own this resource",
                caller.account_id
            )))
        }
        Ownership::Enrolled(true) => Ok(()),
        Ownership::Enrolled(false) => {
            info!(
                "Access denied for account {}: not enrolled",
                caller.account_id
            );
            Err(ClassroomError::forbidden(format!(
                "account {} is not enrolled in this session",
                caller.account_id
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_outside_allowed_set_is_unauthorized() {
        let learner = Caller::new(3, Role::Learner);
        let err = authorize(&learner, Role::instructor_roles(), Ownership::Unscoped).unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));

        // 角色检查先于归属检查
        let err = authorize(&learner, Role::admin_roles(), Ownership::OwnedBy(3)).unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));
    }

    #[test]
    fn test_owner_mismatch_is_forbidden() {
        let instructor = Caller::new(2, Role::Instructor);
        assert!(authorize(&instructor, Role::instructor_roles(), Ownership::OwnedBy(2)).is_ok());
        let err =
            authorize(&instructor, Role::instructor_roles(), Ownership::OwnedBy(9)).unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
    }

    #[test]
    fn test_enrollment_gate() {
        let learner = Caller::new(5, Role::Learner);
        assert!(authorize(&learner, Role::learner_roles(), Ownership::Enrolled(true)).is_ok());
        let err =
            authorize(&learner, Role::learner_roles(), Ownership::Enrolled(false)).unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
    }

    #[test]
    fn test_admin_unscoped() {
        let admin = Caller::new(1, Role::Admin);
        assert!(authorize(&admin, Role::all_roles(), Ownership::Unscoped).is_ok());
        assert!(authorize(&admin, Role::admin_roles(), Ownership::Unscoped).is_ok());
    }
}
