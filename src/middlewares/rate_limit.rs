use crate::error::AppError;
use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::collections::HashMap;
use std::future::{Ready, ready};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// 超过该数量的客户端记录时顺带清理过期窗口
const EVICT_THRESHOLD: usize = 10_000;

/// 固定窗口计数器，按客户端 IP 计数
#[derive(Clone)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    message: &'static str,
    counters: Arc<Mutex<HashMap<String, (Instant, u32)>>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32, message: &'static str) -> Self {
        Self {
            window,
            max_requests,
            message,
            counters: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 记一次请求，返回是否放行
    pub fn check(&self, key: &str, now: Instant) -> bool {
        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if counters.len() > EVICT_THRESHOLD {
            let window = self.window;
            counters.retain(|_, (started, _)| now.duration_since(*started) < window);
        }

        let entry = counters.entry(key.to_string()).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }
        if entry.1 >= self.max_requests {
            return false;
        }
        entry.1 += 1;
        true
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterService {
            service,
            limiter: self.clone(),
        }))
    }
}

pub struct RateLimiterService<S> {
    service: S,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        if !self.limiter.check(&client, Instant::now()) {
            log::warn!("Rate limit exceeded for {client} on {}", req.path());
            // 以普通 429 响应返回，外层 CORS 会补上跨域头
            let error = AppError::RateLimited(self.limiter.message.to_string());
            let response = req
                .into_response(error.error_response())
                .map_into_right_body();
            return Box::pin(async move { Ok(response) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
