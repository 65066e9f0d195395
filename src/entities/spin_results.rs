use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 抽奖结果实体
/// 说明:
/// - 每个 token 兑换成功产生一条记录，写入后不再修改
/// - prize_name 冗余存储，奖品配置后续修改仍可回溯
/// - prize_table_version 记录抽奖时使用的奖品表版本
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "spin_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub token_id: String,
    pub prize_position: i32,
    pub prize_name: String,
    /// 前端转盘最终停止的角度 (度)
    pub spin_angle: f64,
    pub prize_table_version: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
