pub mod admin;
pub mod auth;
pub mod prize;
pub mod spin;

pub use admin::admin_config;
pub use auth::auth_config;
pub use prize::prize_config;
pub use spin::spin_config;

use crate::error::AppError;
use actix_web::{HttpResponse, Result, web};
use serde_json::json;

pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now(),
    })))
}

/// 请求体、路径、查询参数解析失败时也返回统一的错误结构
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );
}

/// 挂载 `/api` 下的全部路由
pub fn api_config(cfg: &mut web::ServiceConfig, spin_limiter: crate::middlewares::RateLimiter) {
    cfg.service(
        web::scope("/api")
            .configure(|cfg| spin_config(cfg, spin_limiter))
            .configure(prize_config)
            .configure(auth_config)
            .configure(admin_config),
    );
}
