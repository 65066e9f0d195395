use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{AdminRole, admin_entity};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "superadmin")]
    pub username: String,
    #[schema(example = "changeme")]
    pub password: String,
}

/// 管理员信息（不含密码哈希）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: i64,
    pub username: String,
    pub role: AdminRole,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<admin_entity::Model> for AdminResponse {
    fn from(m: admin_entity::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            role: m.role,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// 访问令牌有效期 (秒)
    pub expires_in: i64,
    pub user: AdminResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAdminRequest {
    #[schema(example = "operator01")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
}
