//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod assignments;
pub mod attendance;
pub mod enrollments;
pub mod materials;
pub mod sessions;
pub mod users;

use std::str::FromStr;

use tracing::warn;

/// 解析库中的枚举文本列，无法识别时记录告警并使用回退值
pub(crate) fn parse_column<T: FromStr>(table: &str, id: i64, raw: &str, fallback: T) -> T {
    raw.parse().unwrap_or_else(|_| {
        warn!("{table}#{id} 含无法识别的取值 {raw:?}，按回退值处理");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::entities::Role;

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("users", 1, "admin", Role::Learner), Role::Admin);
        assert_eq!(parse_column("users", 2, "superuser", Role::Learner), Role::Learner);
    }
}
