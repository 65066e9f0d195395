use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::AdminRole;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::spin::verify_token,
        handlers::spin::spin,
        handlers::prize::list_prizes,
        handlers::prize::bulk_update,
        handlers::prize::update_prize,
        handlers::auth::login,
        handlers::auth::verify,
        handlers::auth::logout,
        handlers::admin::create_token,
        handlers::admin::list_tokens,
        handlers::admin::list_spin_results,
        handlers::admin::stats,
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::delete_user,
    ),
    components(
        schemas(
            ApiError,
            TokenRequest,
            VerifyTokenResponse,
            WonPrize,
            SpinResponse,
            SpinResultResponse,
            PrizeResponse,
            PrizeInput,
            BulkUpdatePrizesRequest,
            UpdatePrizeRequest,
            LoginRequest,
            LoginResponse,
            AdminResponse,
            AdminRole,
            CreateAdminRequest,
            TokenStatus,
            TokenResponse,
            CreatedTokenResponse,
            DashboardStats,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "spin", description = "Token verification and wheel spin"),
        (name = "prize", description = "Prize table"),
        (name = "auth", description = "Admin authentication"),
        (name = "admin", description = "Token, result and admin user management"),
    ),
    info(
        title = "Spin Wheel Backend API",
        version = "1.0.0",
        description = "Prize wheel REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
