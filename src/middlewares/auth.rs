use crate::error::AppError;
use crate::utils::{Claims, JwtService};
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

// 公开路径配置
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    // 仅 GET 公开的路径（同一路径的写操作仍需认证）
    read_only_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/health",
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
                "/api/auth/login",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/", "/api/spin/"],
            read_only_paths: vec!["/api/prizes"],
        }
    }

    fn is_public(&self, method: &Method, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }

        if self
            .prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
        {
            return true;
        }

        *method == Method::GET
            && self
                .read_only_paths
                .iter()
                .any(|&p| path.trim_end_matches('/') == p)
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if self.public_paths.is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        match token {
            Some(token) => match self.jwt_service.verify_access_token(&token) {
                Ok(claims) => {
                    // 将令牌身份放入请求扩展，handler 中再按角色鉴权
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(_) => {
                    let error = AppError::AuthError("Invalid or expired token".to_string());
                    Box::pin(async move { Err(error.into()) })
                }
            },
            None => {
                let error = AppError::AuthError("Access token required".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

/// 从请求扩展中取出已验证的令牌身份
pub fn get_current_claims(req: &actix_web::HttpRequest) -> Option<Claims> {
    req.extensions().get::<Claims>().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        let paths = PublicPaths::new();
        assert!(paths.is_public(&Method::POST, "/api/spin/spin"));
        assert!(paths.is_public(&Method::POST, "/api/spin/verify-token"));
        assert!(paths.is_public(&Method::POST, "/api/auth/login"));
        assert!(paths.is_public(&Method::GET, "/api/prizes"));
        assert!(paths.is_public(&Method::GET, "/health"));
    }

    #[test]
    fn test_protected_paths() {
        let paths = PublicPaths::new();
        assert!(!paths.is_public(&Method::PUT, "/api/prizes/bulk-update"));
        assert!(!paths.is_public(&Method::PUT, "/api/prizes/3"));
        assert!(!paths.is_public(&Method::GET, "/api/admin/tokens"));
        assert!(!paths.is_public(&Method::GET, "/api/auth/verify"));
        assert!(!paths.is_public(&Method::POST, "/api/auth/logout"));
    }
}
