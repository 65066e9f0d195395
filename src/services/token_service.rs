use crate::entities::token_entity as tokens;
use crate::error::AppResult;
use crate::models::*;
use crate::utils::generate_token_code;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

#[derive(Clone)]
pub struct TokenService {
    pool: DatabaseConnection,
    token_ttl: Duration,
}

impl TokenService {
    pub fn new(pool: DatabaseConnection, token_ttl_hours: i64) -> Self {
        Self {
            pool,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// 新建一个一次性 token
    pub async fn create_token(&self, created_by: i64) -> AppResult<CreatedTokenResponse> {
        let now = Utc::now();
        let model = tokens::ActiveModel {
            token_id: Set(generate_token_code()),
            is_used: Set(false),
            used_at: Set(None),
            expires_at: Set(now + self.token_ttl),
            created_by: Set(created_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Token {} created by admin {created_by}, expires at {}",
            model.token_id,
            model.expires_at
        );
        Ok(model.into())
    }

    /// 分页获取 token（新建的在前），可按状态过滤
    pub async fn list_tokens(&self, query: &TokenQuery) -> AppResult<PaginatedResponse<TokenResponse>> {
        let params = PaginationParams::new(query.page, query.limit);
        let now = Utc::now();

        let base_query = Self::filter_by_status(tokens::Entity::find(), query.status, now);

        let total = base_query.clone().count(&self.pool).await?;

        let items = base_query
            .order_by_desc(tokens::Column::CreatedAt)
            .order_by_desc(tokens::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|m| TokenResponse::from_model(m, now))
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// 删除过期超过 `retention` 的 token，返回删除条数
    pub async fn purge_expired(&self, retention: Duration) -> AppResult<u64> {
        let cutoff = Utc::now() - retention;
        let result = tokens::Entity::delete_many()
            .filter(tokens::Column::ExpiresAt.lt(cutoff))
            .exec(&self.pool)
            .await?;
        Ok(result.rows_affected)
    }

    fn filter_by_status(
        select: Select<tokens::Entity>,
        status: Option<TokenStatus>,
        now: DateTime<Utc>,
    ) -> Select<tokens::Entity> {
        match status {
            Some(TokenStatus::Used) => select.filter(tokens::Column::IsUsed.eq(true)),
            Some(TokenStatus::Unused) => select
                .filter(tokens::Column::IsUsed.eq(false))
                .filter(tokens::Column::ExpiresAt.gt(now)),
            Some(TokenStatus::Expired) => select
                .filter(tokens::Column::IsUsed.eq(false))
                .filter(tokens::Column::ExpiresAt.lte(now)),
            None => select,
        }
    }
}
