use crate::entities::{AdminRole, Capability, admin_entity as admins};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let admin = admins::Entity::find()
            .filter(admins::Column::Username.eq(username))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

        if !verify_password(&request.password, &admin.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self
            .jwt_service
            .generate_access_token(admin.id, &admin.username, admin.role)?;

        log::info!("Admin {} logged in", admin.username);

        Ok(LoginResponse {
            token,
            expires_in: self.jwt_service.get_expires_in(),
            user: AdminResponse::from(admin),
        })
    }

    /// 根据令牌中的身份加载管理员并校验权限。
    /// 角色以数据库为准，已删除的账号即使令牌未过期也无法继续操作。
    pub async fn authorize(
        &self,
        claims: Option<&Claims>,
        capability: Option<Capability>,
    ) -> AppResult<admins::Model> {
        let claims =
            claims.ok_or_else(|| AppError::AuthError("Access token required".to_string()))?;
        let admin_id = claims.admin_id()?;

        let admin = admins::Entity::find_by_id(admin_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid token".to_string()))?;

        if let Some(capability) = capability
            && !admin.role.can(capability)
        {
            let message = match capability {
                Capability::ManageAdmins => "SuperAdmin access required",
                _ => "Admin access required",
            };
            return Err(AppError::Forbidden(message.to_string()));
        }

        Ok(admin)
    }

    /// 不存在超级管理员时创建一个，返回是否新建
    pub async fn ensure_superadmin(&self, username: &str, password: &str) -> AppResult<bool> {
        let existing = admins::Entity::find()
            .filter(admins::Column::Role.eq(AdminRole::SuperAdmin))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError(
                "Superadmin username is required".to_string(),
            ));
        }
        validate_password(password)?;

        admins::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
            role: Set(AdminRole::SuperAdmin),
            created_by: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Bootstrapped superadmin account {username}");
        Ok(true)
    }
}
