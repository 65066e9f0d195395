use crate::entities::Capability;
use crate::middlewares::get_current_claims;
use crate::models::*;
use crate::services::{AdminService, AuthService, SpinService, TokenService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/admin/tokens",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Token 创建成功", body = CreatedTokenResponse),
        (status = 401, description = "未认证"),
        (status = 403, description = "权限不足")
    )
)]
pub async fn create_token(
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        let admin = auth_service
            .authorize(claims.as_ref(), Some(Capability::ManageTokens))
            .await?;
        token_service.create_token(admin.id).await
    }
    .await;

    match result {
        Ok(token) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            token,
            "Token created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/tokens",
    tag = "admin",
    params(
        ("page" = Option<u64>, Query, description = "页码，从 1 开始"),
        ("limit" = Option<u64>, Query, description = "每页数量，默认 50"),
        ("status" = Option<TokenStatus>, Query, description = "unused / used / expired")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Token 列表"),
        (status = 401, description = "未认证"),
        (status = 403, description = "权限不足")
    )
)]
pub async fn list_tokens(
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
    req: HttpRequest,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        auth_service
            .authorize(claims.as_ref(), Some(Capability::ManageTokens))
            .await?;
        token_service.list_tokens(&query).await
    }
    .await;

    match result {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/spin-results",
    tag = "admin",
    params(
        ("page" = Option<u64>, Query, description = "页码，从 1 开始"),
        ("limit" = Option<u64>, Query, description = "每页数量，默认 50")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "抽奖记录（新的在前）"),
        (status = 401, description = "未认证"),
        (status = 403, description = "权限不足")
    )
)]
pub async fn list_spin_results(
    auth_service: web::Data<AuthService>,
    spin_service: web::Data<SpinService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        auth_service
            .authorize(claims.as_ref(), Some(Capability::ViewResults))
            .await?;
        spin_service.list_results(&query).await
    }
    .await;

    match result {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "仪表盘统计", body = DashboardStats),
        (status = 401, description = "未认证"),
        (status = 403, description = "权限不足")
    )
)]
pub async fn stats(
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        auth_service
            .authorize(claims.as_ref(), Some(Capability::ViewResults))
            .await?;
        admin_service.dashboard_stats().await
    }
    .await;

    match result {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "普通管理员列表", body = [AdminResponse]),
        (status = 401, description = "未认证"),
        (status = 403, description = "需要超级管理员")
    )
)]
pub async fn list_users(
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        auth_service
            .authorize(claims.as_ref(), Some(Capability::ManageAdmins))
            .await?;
        admin_service.list_admins().await
    }
    .await;

    match result {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(users))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    request_body = CreateAdminRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "管理员创建成功", body = AdminResponse),
        (status = 400, description = "参数不合法或用户名已存在"),
        (status = 401, description = "未认证"),
        (status = 403, description = "需要超级管理员")
    )
)]
pub async fn create_user(
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    request: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        let admin = auth_service
            .authorize(claims.as_ref(), Some(Capability::ManageAdmins))
            .await?;
        admin_service
            .create_admin(admin.id, request.into_inner())
            .await
    }
    .await;

    match result {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            user,
            "Admin created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "管理员 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 400, description = "不能删除超级管理员"),
        (status = 403, description = "需要超级管理员"),
        (status = 404, description = "管理员不存在")
    )
)]
pub async fn delete_user(
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        auth_service
            .authorize(claims.as_ref(), Some(Capability::ManageAdmins))
            .await?;
        admin_service.delete_admin(id.into_inner()).await
    }
    .await;

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Admin deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/tokens", web::post().to(create_token))
            .route("/tokens", web::get().to(list_tokens))
            .route("/spin-results", web::get().to(list_spin_results))
            .route("/stats", web::get().to(stats))
            .route("/users", web::get().to(list_users))
            .route("/users", web::post().to(create_user))
            .route("/users/{id}", web::delete().to(delete_user)),
    );
}
