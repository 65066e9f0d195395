use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 一次性抽奖 Token
/// - is_used 一旦为 true 不再回退
/// - 过期不落库，由 `is_used = false && expires_at < now` 计算得出
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 对外展示的兑换码 (唯一)
    #[sea_orm(unique)]
    pub token_id: String,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    /// 创建该 token 的管理员 ID
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl Model {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.expires_at < now
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
