use crate::entities::Capability;
use crate::middlewares::get_current_claims;
use crate::models::*;
use crate::services::{AuthService, PrizeService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prize",
    responses(
        (status = 200, description = "按格子顺序返回奖品", body = [PrizeResponse])
    )
)]
pub async fn list_prizes(prize_service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match prize_service.list_prizes().await {
        Ok(prizes) => Ok(HttpResponse::Ok().json(ApiResponse::success(prizes))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/bulk-update",
    tag = "prize",
    request_body = BulkUpdatePrizesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "奖品表已替换", body = [PrizeResponse]),
        (status = 400, description = "奖品数量、格子或概率不合法"),
        (status = 401, description = "未认证"),
        (status = 403, description = "权限不足")
    )
)]
pub async fn bulk_update(
    auth_service: web::Data<AuthService>,
    prize_service: web::Data<PrizeService>,
    req: HttpRequest,
    request: web::Json<BulkUpdatePrizesRequest>,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        let admin = auth_service
            .authorize(claims.as_ref(), Some(Capability::ManagePrizes))
            .await?;
        prize_service.bulk_update(admin.id, request.into_inner()).await
    }
    .await;

    match result {
        Ok(prizes) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            prizes,
            "Prizes updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/{position}",
    tag = "prize",
    params(
        ("position" = i32, Path, description = "转盘格子 1-8")
    ),
    request_body = UpdatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "奖品已更新", body = PrizeResponse),
        (status = 400, description = "参数不合法"),
        (status = 401, description = "未认证"),
        (status = 403, description = "权限不足")
    )
)]
pub async fn update_prize(
    auth_service: web::Data<AuthService>,
    prize_service: web::Data<PrizeService>,
    req: HttpRequest,
    position: web::Path<i32>,
    request: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    let claims = get_current_claims(&req);
    let result = async {
        let admin = auth_service
            .authorize(claims.as_ref(), Some(Capability::ManagePrizes))
            .await?;
        prize_service
            .update_prize(admin.id, position.into_inner(), request.into_inner())
            .await
    }
    .await;

    match result {
        Ok(prize) => Ok(HttpResponse::Ok().json(ApiResponse::success(prize))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::get().to(list_prizes))
            .route("/bulk-update", web::put().to(bulk_update))
            .route("/{position}", web::put().to(update_prize)),
    );
}
