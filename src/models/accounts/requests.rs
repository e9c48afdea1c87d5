use super::entities::Role;
use serde::Deserialize;

// 账号创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

// 账号更新请求，password 为空时保留原密码
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccountRequest {
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub password: Option<String>,
}

// 账号列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountListParams {
    pub role: Option<Role>,
}
