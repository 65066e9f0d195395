#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use spinwheel_backend::entities::{AdminRole, admin_entity, token_entity};
use spinwheel_backend::utils::{JwtService, hash_password};

pub const JWT_SECRET: &str = "test-secret";

/// 内存 SQLite，单连接保证所有查询落在同一个库上
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn jwt_service() -> JwtService {
    JwtService::new(JWT_SECRET, 3600)
}

pub async fn insert_token(
    db: &DatabaseConnection,
    token_id: &str,
    is_used: bool,
    expires_at: DateTime<Utc>,
) -> token_entity::Model {
    token_entity::ActiveModel {
        token_id: Set(token_id.to_string()),
        is_used: Set(is_used),
        used_at: Set(is_used.then(Utc::now)),
        expires_at: Set(expires_at),
        created_by: Set(1),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert token")
}

pub async fn insert_fresh_token(db: &DatabaseConnection, token_id: &str) -> token_entity::Model {
    insert_token(db, token_id, false, Utc::now() + Duration::hours(48)).await
}

pub async fn insert_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: AdminRole,
) -> admin_entity::Model {
    admin_entity::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password).expect("hash password")),
        role: Set(role),
        created_by: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert admin")
}

pub fn bearer_for(admin: &admin_entity::Model) -> String {
    let token = jwt_service()
        .generate_access_token(admin.id, &admin.username, admin.role)
        .expect("sign token");
    format!("Bearer {token}")
}

/// 与 main 中相同的中间件与路由装配，限流阈值由调用方指定
#[macro_export]
macro_rules! test_app {
    ($db:expr, $spin_limit:expr) => {{
        use actix_web::{App, web};
        use spinwheel_backend::{handlers, middlewares::*, services::*};
        use std::time::Duration as StdDuration;

        let db = $db.clone();
        let jwt_service = common::jwt_service();
        actix_web::test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service.clone()))
                .wrap(RateLimiter::new(
                    StdDuration::from_secs(900),
                    10_000,
                    "Too many requests",
                ))
                .app_data(web::Data::new(AuthService::new(db.clone(), jwt_service)))
                .app_data(web::Data::new(AdminService::new(db.clone())))
                .app_data(web::Data::new(TokenService::new(db.clone(), 48)))
                .app_data(web::Data::new(PrizeService::new(db.clone())))
                .app_data(web::Data::new(SpinService::new(db.clone())))
                .configure(handlers::extractor_config)
                .route("/health", web::get().to(handlers::health))
                .configure(|cfg| {
                    handlers::api_config(
                        cfg,
                        RateLimiter::new(StdDuration::from_secs(60), $spin_limit, "Too many spin attempts"),
                    )
                }),
        )
        .await
    }};
}
