use crate::models::*;
use crate::services::SpinService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/spin/verify-token",
    tag = "spin",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token 可用", body = VerifyTokenResponse),
        (status = 400, description = "Token 为空、已使用或已过期"),
        (status = 404, description = "Token 不存在")
    )
)]
pub async fn verify_token(
    spin_service: web::Data<SpinService>,
    request: web::Json<TokenRequest>,
) -> Result<HttpResponse> {
    match spin_service.verify_token(&request.token_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            response,
            "Token is valid",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin/spin",
    tag = "spin",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "抽奖成功", body = SpinResponse),
        (status = 400, description = "Token 为空、已使用或已过期"),
        (status = 404, description = "Token 不存在"),
        (status = 429, description = "请求过于频繁"),
        (status = 500, description = "奖品配置错误")
    )
)]
pub async fn spin(
    spin_service: web::Data<SpinService>,
    request: web::Json<TokenRequest>,
) -> Result<HttpResponse> {
    match spin_service.spin(&request.token_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

/// `limiter` 只作用于抽奖相关接口
pub fn spin_config(cfg: &mut web::ServiceConfig, limiter: crate::middlewares::RateLimiter) {
    cfg.service(
        web::scope("/spin")
            .wrap(limiter)
            .route("/verify-token", web::post().to(verify_token))
            .route("/spin", web::post().to(spin)),
    );
}
