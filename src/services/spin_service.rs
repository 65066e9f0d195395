use crate::entities::{spin_result_entity as spin_results, token_entity as tokens};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::PrizeService;
use crate::utils::normalize_token_code;
use crate::utils::wheel::{select_weighted, spin_angle};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct SpinService {
    pool: DatabaseConnection,
}

impl SpinService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 校验 token 可否兑换（无副作用）
    pub async fn verify_token(&self, raw_token_id: &str) -> AppResult<VerifyTokenResponse> {
        let token_id = require_token_id(raw_token_id)?;
        let token = find_token(&self.pool, &token_id).await?;
        ensure_redeemable(&token, Utc::now())?;

        Ok(VerifyTokenResponse {
            token_id: token.token_id,
            expires_at: token.expires_at,
        })
    }

    /// 抽奖 (Spin)
    ///
    /// 逻辑:
    /// 1. 校验 token 存在、未使用、未过期
    /// 2. 读取 8 格奖品表并按概率抽取
    /// 3. 条件更新占用 token (where is_used = false and expires_at >= now)，
    ///    并发兑换时只有一个请求能更新成功
    /// 4. 同一事务内写入抽奖结果，任一步失败整体回滚
    pub async fn spin(&self, raw_token_id: &str) -> AppResult<SpinResponse> {
        let token_id = require_token_id(raw_token_id)?;
        let txn = self.pool.begin().await?;

        let token = find_token(&txn, &token_id).await?;
        ensure_redeemable(&token, Utc::now())?;

        let table = PrizeService::load_table(&txn).await?;
        let table_version = PrizeService::table_version(&table);

        // thread_rng 不能跨 await 持有
        let (prize, angle) = {
            let mut rng = rand::thread_rng();
            let prize = select_weighted(&table, &mut rng)?;
            let angle = spin_angle(prize.position, &mut rng);
            (prize, angle)
        };

        let now = Utc::now();
        if let Err(e) = claim_token(&txn, &token, now).await {
            txn.rollback().await?;
            return Err(e);
        }

        spin_results::ActiveModel {
            token_id: Set(token.token_id.clone()),
            prize_position: Set(prize.position),
            prize_name: Set(prize.name.clone()),
            spin_angle: Set(angle),
            prize_table_version: Set(table_version),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Token {} redeemed: position {} ({}), angle {angle:.2}",
            token.token_id,
            prize.position,
            prize.name
        );

        Ok(SpinResponse {
            prize: WonPrize::from(prize),
            spin_angle: angle,
            token_used: true,
        })
    }

    /// 分页获取抽奖结果（倒序）
    pub async fn list_results(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<SpinResultResponse>> {
        let total = spin_results::Entity::find().count(&self.pool).await?;

        let items = spin_results::Entity::find()
            .order_by_desc(spin_results::Column::CreatedAt)
            .order_by_desc(spin_results::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(PaginatedResponse::new(items, params, total))
    }
}

fn require_token_id(raw: &str) -> AppResult<String> {
    let token_id = normalize_token_code(raw);
    if token_id.is_empty() {
        return Err(AppError::ValidationError("Token is required".into()));
    }
    Ok(token_id)
}

async fn find_token<C: ConnectionTrait>(conn: &C, token_id: &str) -> AppResult<tokens::Model> {
    tokens::Entity::find()
        .filter(tokens::Column::TokenId.eq(token_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid token".into()))
}

/// 条件更新占用 token (where is_used = false and expires_at >= now)。
/// `token` 可能是旧快照，更新不到行时按库中最新状态报错。
pub(crate) async fn claim_token<C: ConnectionTrait>(
    conn: &C,
    token: &tokens::Model,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let claimed = tokens::Entity::update_many()
        .col_expr(tokens::Column::IsUsed, Expr::value(true))
        .col_expr(tokens::Column::UsedAt, Expr::value(now))
        .filter(tokens::Column::Id.eq(token.id))
        .filter(tokens::Column::IsUsed.eq(false))
        .filter(tokens::Column::ExpiresAt.gte(now))
        .exec(conn)
        .await?;

    if claimed.rows_affected != 1 {
        // 被并发请求抢先使用，或恰好在此刻过期
        log::warn!("Token {} lost a concurrent redemption", token.token_id);
        let current = find_token(conn, &token.token_id).await?;
        ensure_redeemable(&current, now)?;
        return Err(AppError::TokenAlreadyUsed);
    }
    Ok(())
}

/// 顺序固定：已使用优先于过期
fn ensure_redeemable(token: &tokens::Model, now: DateTime<Utc>) -> AppResult<()> {
    if token.is_used {
        return Err(AppError::TokenAlreadyUsed);
    }
    if token.is_expired_at(now) {
        return Err(AppError::TokenExpired);
    }
    Ok(())
}
