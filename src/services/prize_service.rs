use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::wheel::{PROBABILITY_TOLERANCE, SEGMENT_COUNT, validate_probabilities};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashSet;

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 按格子顺序读取整张奖品表（每次请求现读，不做缓存）
    pub async fn load_table<C: ConnectionTrait>(conn: &C) -> Result<Vec<prizes::Model>, sea_orm::DbErr> {
        prizes::Entity::find()
            .order_by_asc(prizes::Column::Position)
            .all(conn)
            .await
    }

    /// 奖品表版本 = 各行 version 的最大值
    pub fn table_version(table: &[prizes::Model]) -> i64 {
        table.iter().map(|p| p.version).max().unwrap_or(0)
    }

    pub async fn list_prizes(&self) -> AppResult<Vec<PrizeResponse>> {
        let list = Self::load_table(&self.pool).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 整表替换：恰好 8 项、格子 1..=8 不重复、名称非空、概率合计 100
    pub async fn bulk_update(
        &self,
        admin_id: i64,
        request: BulkUpdatePrizesRequest,
    ) -> AppResult<Vec<PrizeResponse>> {
        let inputs = request.prizes;
        if inputs.len() != SEGMENT_COUNT {
            return Err(AppError::ValidationError(format!(
                "Must provide exactly {SEGMENT_COUNT} prizes"
            )));
        }

        let mut seen = HashSet::new();
        for input in &inputs {
            validate_position(input.position)?;
            if !seen.insert(input.position) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate prize position {}",
                    input.position
                )));
            }
            if input.name.trim().is_empty() {
                return Err(AppError::ValidationError("Prize name is required".into()));
            }
        }
        let probabilities: Vec<f64> = inputs.iter().map(|p| p.probability).collect();
        validate_probabilities(&probabilities)?;

        let txn = self.pool.begin().await?;

        let version = Self::table_version(&Self::load_table(&txn).await?) + 1;
        prizes::Entity::delete_many().exec(&txn).await?;

        let now = Utc::now();
        for input in inputs {
            prizes::ActiveModel {
                position: Set(input.position),
                name: Set(input.name.trim().to_string()),
                description: Set(input.description.unwrap_or_default()),
                probability: Set(input.probability),
                version: Set(version),
                updated_by: Set(Some(admin_id)),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let table = Self::load_table(&txn).await?;
        txn.commit().await?;

        log::info!("Prize table replaced by admin {admin_id}, version {version}");
        Ok(table.into_iter().map(Into::into).collect())
    }

    /// 单格修改（不存在则新建）
    pub async fn update_prize(
        &self,
        admin_id: i64,
        position: i32,
        request: UpdatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        validate_position(position)?;
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Prize name is required".into()));
        }
        if !request.probability.is_finite() || !(0.0..=100.0).contains(&request.probability) {
            return Err(AppError::ValidationError(
                "Probability must be between 0-100".into(),
            ));
        }

        let txn = self.pool.begin().await?;
        let table = Self::load_table(&txn).await?;
        let version = Self::table_version(&table) + 1;
        let now = Utc::now();

        let updated = match table.iter().find(|p| p.position == position).cloned() {
            Some(existing) => {
                let mut am = existing.into_active_model();
                am.name = Set(request.name.trim().to_string());
                am.description = Set(request.description.unwrap_or_default());
                am.probability = Set(request.probability);
                am.version = Set(version);
                am.updated_by = Set(Some(admin_id));
                am.updated_at = Set(now);
                am.update(&txn).await?
            }
            None => {
                prizes::ActiveModel {
                    position: Set(position),
                    name: Set(request.name.trim().to_string()),
                    description: Set(request.description.unwrap_or_default()),
                    probability: Set(request.probability),
                    version: Set(version),
                    updated_by: Set(Some(admin_id)),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        let total: f64 = table
            .iter()
            .filter(|p| p.position != position)
            .map(|p| p.probability)
            .sum::<f64>()
            + updated.probability;
        if (total - 100.0).abs() > PROBABILITY_TOLERANCE {
            log::warn!("Prize probabilities now sum to {total:.2}% after updating position {position}");
        }

        log::info!("Prize at position {position} updated by admin {admin_id}");
        Ok(updated.into())
    }
}

fn validate_position(position: i32) -> AppResult<()> {
    if !(1..=SEGMENT_COUNT as i32).contains(&position) {
        return Err(AppError::ValidationError(format!(
            "Prize position must be between 1-{SEGMENT_COUNT}"
        )));
    }
    Ok(())
}
