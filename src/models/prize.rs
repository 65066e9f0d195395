use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 奖品信息（公开列表与后台共用）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeResponse {
    /// 转盘格子 1..=8
    pub position: i32,
    pub name: String,
    pub description: String,
    /// 中奖概率 (百分比)
    pub probability: f64,
    pub version: i64,
    pub updated_by: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        Self {
            position: m.position,
            name: m.name,
            description: m.description,
            probability: m.probability,
            version: m.version,
            updated_by: m.updated_by,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeInput {
    #[schema(example = 1)]
    pub position: i32,
    #[schema(example = "Free Coffee")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = 12.5)]
    pub probability: f64,
}

/// 整表替换，必须恰好 8 项
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkUpdatePrizesRequest {
    pub prizes: Vec<PrizeInput>,
}

/// 单格修改
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub probability: f64,
}
