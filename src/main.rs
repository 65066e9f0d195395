use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::time::Duration;

use spinwheel_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, RateLimiter, create_cors},
    services::*,
    swagger::swagger_config,
    tasks,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");

    // 创建数据库连接
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to connect to database");

    // 运行数据库迁移（含默认奖品表）
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let admin_service = AdminService::new(pool.clone());
    let token_service = TokenService::new(pool.clone(), config.spin.token_ttl_hours);
    let prize_service = PrizeService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone());

    // 首次启动时创建超级管理员
    match (
        config.bootstrap.superadmin_username.as_deref(),
        config.bootstrap.superadmin_password.as_deref(),
    ) {
        (Some(username), Some(password)) => {
            if let Err(e) = auth_service.ensure_superadmin(username, password).await {
                log::error!("Failed to bootstrap superadmin: {e}");
            }
        }
        _ => log::debug!("No superadmin bootstrap credentials configured"),
    }

    // 启动后台任务
    tasks::spawn_all(
        token_service.clone(),
        config.spin.cleanup_interval_secs,
        chrono::Duration::hours(config.spin.expired_token_retention_hours),
    );

    // 限流计数需要在所有 worker 之间共享，在闭包外创建
    let global_limiter = RateLimiter::new(
        Duration::from_secs(config.rate_limit.global_window_secs),
        config.rate_limit.global_max_requests,
        "Too many requests from this IP, please try again later",
    );
    let spin_limiter = RateLimiter::new(
        Duration::from_secs(config.rate_limit.spin_window_secs),
        config.rate_limit.spin_max_requests,
        "Too many spin attempts, please try again later",
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let cors_origins = config.server.cors_allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(global_limiter.clone())
            .wrap(create_cors(&cors_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(spin_service.clone()))
            .configure(handlers::extractor_config)
            .configure(swagger_config)
            .route("/health", web::get().to(handlers::health))
            .configure(|cfg| handlers::api_config(cfg, spin_limiter.clone()))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
