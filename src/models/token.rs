use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::token_entity;

/// Token 状态（由 is_used / expires_at 计算，不落库）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Unused,
    Used,
    Expired,
}

impl TokenStatus {
    pub fn of(token: &token_entity::Model, now: DateTime<Utc>) -> Self {
        if token.is_used {
            TokenStatus::Used
        } else if token.expires_at <= now {
            TokenStatus::Expired
        } else {
            TokenStatus::Unused
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token_id: String,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub status: TokenStatus,
}

impl TokenResponse {
    pub fn from_model(m: token_entity::Model, now: DateTime<Utc>) -> Self {
        let status = TokenStatus::of(&m, now);
        Self {
            token_id: m.token_id,
            is_used: m.is_used,
            used_at: m.used_at,
            expires_at: m.expires_at,
            created_by: m.created_by,
            created_at: m.created_at,
            status,
        }
    }
}

/// 新建 Token 的返回
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTokenResponse {
    #[schema(example = "3F9A1C0B7E2D")]
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<token_entity::Model> for CreatedTokenResponse {
    fn from(m: token_entity::Model) -> Self {
        Self {
            token_id: m.token_id,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }
    }
}

/// Token 列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TokenQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<TokenStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(is_used: bool, expires_in: Duration) -> token_entity::Model {
        let now = Utc::now();
        token_entity::Model {
            id: 1,
            token_id: "ABCDEF123456".into(),
            is_used,
            used_at: None,
            expires_at: now + expires_in,
            created_by: 1,
            created_at: now,
        }
    }

    #[test]
    fn test_token_status() {
        let now = Utc::now();
        assert_eq!(TokenStatus::of(&token(false, Duration::hours(1)), now), TokenStatus::Unused);
        assert_eq!(TokenStatus::of(&token(true, Duration::hours(1)), now), TokenStatus::Used);
        assert_eq!(TokenStatus::of(&token(false, Duration::seconds(-1)), now), TokenStatus::Expired);
        // 已使用的 token 即使过期也算 used
        assert_eq!(TokenStatus::of(&token(true, Duration::seconds(-1)), now), TokenStatus::Used);
    }
}
