use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 转盘奖品配置实体
/// 概念说明:
/// - position: 转盘格子 1..=8，每格一条
/// - probability: 百分比 0..=100，8 格合计 100
/// - version: 奖品表版本，整表替换或单格修改时递增，表版本取各行最大值
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub position: i32,
    pub name: String,
    pub description: String,
    pub probability: f64,
    pub version: i64,
    /// 最后修改的管理员 (种子数据为空)
    pub updated_by: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
