use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{prize_entity, spin_result_entity};

/// 客户端提交的兑换码
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default)]
    #[schema(example = "3F9A1C0B7E2D")]
    pub token_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// 抽中的奖品（隐藏概率等配置字段）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WonPrize {
    pub position: i32,
    pub name: String,
    pub description: String,
}

impl From<&prize_entity::Model> for WonPrize {
    fn from(m: &prize_entity::Model) -> Self {
        Self {
            position: m.position,
            name: m.name.clone(),
            description: m.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub prize: WonPrize,
    /// 转盘最终停止角度 (度)
    pub spin_angle: f64,
    pub token_used: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinResultResponse {
    pub id: i64,
    pub token_id: String,
    pub prize_position: i32,
    pub prize_name: String,
    pub spin_angle: f64,
    pub prize_table_version: i64,
    pub created_at: DateTime<Utc>,
}

impl From<spin_result_entity::Model> for SpinResultResponse {
    fn from(m: spin_result_entity::Model) -> Self {
        Self {
            id: m.id,
            token_id: m.token_id,
            prize_position: m.prize_position,
            prize_name: m.prize_name,
            spin_angle: m.spin_angle,
            prize_table_version: m.prize_table_version,
            created_at: m.created_at,
        }
    }
}

/// 后台仪表盘统计
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tokens: u64,
    pub used_tokens: u64,
    pub expired_tokens: u64,
    pub active_tokens: u64,
    pub total_spins: u64,
    pub total_admins: u64,
}
