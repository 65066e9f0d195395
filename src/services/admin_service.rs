use crate::entities::{
    AdminRole, admin_entity as admins, spin_result_entity as spin_results, token_entity as tokens,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, validate_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 普通管理员列表（新建的在前）
    pub async fn list_admins(&self) -> AppResult<Vec<AdminResponse>> {
        let list = admins::Entity::find()
            .filter(admins::Column::Role.eq(AdminRole::Admin))
            .order_by_desc(admins::Column::CreatedAt)
            .order_by_desc(admins::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create_admin(
        &self,
        created_by: i64,
        request: CreateAdminRequest,
    ) -> AppResult<AdminResponse> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }
        validate_password(&request.password)?;

        let exists = admins::Entity::find()
            .filter(admins::Column::Username.eq(username))
            .count(&self.pool)
            .await?;
        if exists > 0 {
            return Err(AppError::ValidationError(
                "Username already exists".to_string(),
            ));
        }

        let admin = admins::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash_password(&request.password)?),
            role: Set(AdminRole::Admin),
            created_by: Set(Some(created_by)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Admin {} created by {created_by}", admin.username);
        Ok(admin.into())
    }

    /// 删除管理员，超级管理员不可删除
    pub async fn delete_admin(&self, admin_id: i64) -> AppResult<()> {
        let admin = admins::Entity::find_by_id(admin_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if admin.role == AdminRole::SuperAdmin {
            return Err(AppError::ValidationError(
                "Cannot delete SuperAdmin".to_string(),
            ));
        }

        admins::Entity::delete_by_id(admin.id)
            .exec(&self.pool)
            .await?;

        log::info!("Admin {} deleted", admin.username);
        Ok(())
    }

    /// 仪表盘统计
    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let now = Utc::now();

        let total_tokens = tokens::Entity::find().count(&self.pool).await?;
        let used_tokens = tokens::Entity::find()
            .filter(tokens::Column::IsUsed.eq(true))
            .count(&self.pool)
            .await?;
        let expired_tokens = tokens::Entity::find()
            .filter(tokens::Column::IsUsed.eq(false))
            .filter(tokens::Column::ExpiresAt.lte(now))
            .count(&self.pool)
            .await?;
        let active_tokens = tokens::Entity::find()
            .filter(tokens::Column::IsUsed.eq(false))
            .filter(tokens::Column::ExpiresAt.gt(now))
            .count(&self.pool)
            .await?;
        let total_spins = spin_results::Entity::find().count(&self.pool).await?;
        let total_admins = admins::Entity::find()
            .filter(admins::Column::Role.eq(AdminRole::Admin))
            .count(&self.pool)
            .await?;

        Ok(DashboardStats {
            total_tokens,
            used_tokens,
            expired_tokens,
            active_tokens,
            total_spins,
            total_admins,
        })
    }
}
