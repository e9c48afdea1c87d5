use serde::{Deserialize, Serialize};

// 账号角色，创建后不可变更
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,      // 管理员
    Instructor, // 教师
    Learner,    // 学员
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const LEARNER: &'static str = "learner";

    pub fn admin_roles() -> &'static [Role] {
        &[Self::Admin]
    }
    pub fn instructor_roles() -> &'static [Role] {
        &[Self::Instructor]
    }
    pub fn learner_roles() -> &'static [Role] {
        &[Self::Learner]
    }
    pub fn all_roles() -> &'static [Role] {
        &[Self::Admin, Self::Instructor, Self::Learner]
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Role>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的角色: '{s}'. 支持的角色: admin, instructor, learner"
            ))
        })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "{}", Role::ADMIN),
            Role::Instructor => write!(f, "{}", Role::INSTRUCTOR),
            Role::Learner => write!(f, "{}", Role::LEARNER),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Role::ADMIN => Ok(Role::Admin),
            Role::INSTRUCTOR => Ok(Role::Instructor),
            Role::LEARNER => Ok(Role::Learner),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

// 账号实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 写入存储层的新账号（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: i64,
}

// 账号变更（密码已哈希）
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub username: String,
    pub full_name: String,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::all_roles() {
            assert_eq!(role.to_string().parse::<Role>(), Ok(*role));
        }
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<Role>("\"teacher\"").unwrap_err();
        assert!(err.to_string().contains("teacher"));
        let role: Role = serde_json::from_str("\"learner\"").unwrap();
        assert_eq!(role, Role::Learner);
    }

    #[test]
    fn test_account_hides_password_hash() {
        let account = Account {
            id: 1,
            username: "alice".into(),
            password_hash: "secret-hash".into(),
            full_name: "Alice".into(),
            role: Role::Learner,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
