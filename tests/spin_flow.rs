mod common;

use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use spinwheel_backend::entities::{prize_entity, spin_result_entity, token_entity};
use spinwheel_backend::error::AppError;
use spinwheel_backend::models::*;
use spinwheel_backend::services::{PrizeService, SpinService, TokenService};
use spinwheel_backend::utils::wheel::{SEGMENT_ANGLE, SEGMENT_COUNT};

fn landing_segment(angle: f64) -> i32 {
    let index = (angle.rem_euclid(360.0) / SEGMENT_ANGLE).round() as i32;
    index % SEGMENT_COUNT as i32 + 1
}

fn only_position_one() -> BulkUpdatePrizesRequest {
    BulkUpdatePrizesRequest {
        prizes: (1..=8)
            .map(|position| PrizeInput {
                position,
                name: format!("Prize {position}"),
                description: None,
                probability: if position == 1 { 100.0 } else { 0.0 },
            })
            .collect(),
    }
}

#[actix_web::test]
async fn test_verify_reports_token_state() {
    let db = common::setup_db().await;
    let spin_service = SpinService::new(db.clone());

    common::insert_fresh_token(&db, "AAAAAAAAAAAA").await;
    common::insert_token(&db, "BBBBBBBBBBBB", true, Utc::now() + Duration::hours(1)).await;
    common::insert_token(&db, "CCCCCCCCCCCC", false, Utc::now() - Duration::seconds(1)).await;

    let ok = spin_service.verify_token(" aaaaaaaaaaaa ").await.unwrap();
    assert_eq!(ok.token_id, "AAAAAAAAAAAA");

    assert!(matches!(
        spin_service.verify_token("BBBBBBBBBBBB").await,
        Err(AppError::TokenAlreadyUsed)
    ));
    assert!(matches!(
        spin_service.verify_token("CCCCCCCCCCCC").await,
        Err(AppError::TokenExpired)
    ));
    assert!(matches!(
        spin_service.verify_token("DDDDDDDDDDDD").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        spin_service.verify_token("").await,
        Err(AppError::ValidationError(_))
    ));
}

#[actix_web::test]
async fn test_spin_marks_token_used_and_records_result() {
    let db = common::setup_db().await;
    let spin_service = SpinService::new(db.clone());
    let token = common::insert_fresh_token(&db, "A1B2C3D4E5F6").await;

    let response = spin_service.spin("A1B2C3D4E5F6").await.unwrap();
    assert!(response.token_used);
    assert!((1..=8).contains(&response.prize.position));
    assert_eq!(landing_segment(response.spin_angle), response.prize.position);

    let stored = token_entity::Entity::find_by_id(token.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_used);
    assert!(stored.used_at.is_some());

    let results = spin_result_entity::Entity::find().all(&db).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].token_id, "A1B2C3D4E5F6");
    assert_eq!(results[0].prize_position, response.prize.position);
    assert_eq!(results[0].prize_table_version, 1);
}

#[actix_web::test]
async fn test_second_spin_fails_without_new_result() {
    let db = common::setup_db().await;
    let spin_service = SpinService::new(db.clone());
    common::insert_fresh_token(&db, "A1B2C3D4E5F6").await;

    spin_service.spin("A1B2C3D4E5F6").await.unwrap();
    assert!(matches!(
        spin_service.spin("A1B2C3D4E5F6").await,
        Err(AppError::TokenAlreadyUsed)
    ));

    let count = spin_result_entity::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn test_spin_rejects_expired_token() {
    let db = common::setup_db().await;
    let spin_service = SpinService::new(db.clone());
    common::insert_token(&db, "EXPIRED00001", false, Utc::now() - Duration::seconds(1)).await;

    assert!(matches!(
        spin_service.spin("EXPIRED00001").await,
        Err(AppError::TokenExpired)
    ));
    let count = spin_result_entity::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn test_overlapping_spins_redeem_once() {
    let db = common::setup_db().await;
    let spin_service = SpinService::new(db.clone());
    common::insert_fresh_token(&db, "RACE00000001").await;

    let (first, second) = tokio::join!(
        spin_service.spin("RACE00000001"),
        spin_service.spin("RACE00000001")
    );

    let outcomes = [first, second];
    let won = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(won, 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::TokenAlreadyUsed)))
    );

    let count = spin_result_entity::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn test_spin_with_incomplete_prize_table_is_config_error() {
    let db = common::setup_db().await;
    let spin_service = SpinService::new(db.clone());
    let token = common::insert_fresh_token(&db, "CONFIG000001").await;

    prize_entity::Entity::delete_many()
        .filter(prize_entity::Column::Position.eq(8))
        .exec(&db)
        .await
        .unwrap();

    assert!(matches!(
        spin_service.spin("CONFIG000001").await,
        Err(AppError::ConfigError(_))
    ));

    // 事务回滚，token 仍可用
    let stored = token_entity::Entity::find_by_id(token.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_used);
}

#[actix_web::test]
async fn test_full_weight_on_first_segment_always_wins() {
    let db = common::setup_db().await;
    let prize_service = PrizeService::new(db.clone());
    let spin_service = SpinService::new(db.clone());

    prize_service.bulk_update(1, only_position_one()).await.unwrap();

    for i in 0..5 {
        let code = format!("ONLYONE{i:05}");
        common::insert_fresh_token(&db, &code).await;
        let response = spin_service.spin(&code).await.unwrap();
        assert_eq!(response.prize.position, 1);
        assert_eq!(response.prize.name, "Prize 1");
    }

    let results = spin_result_entity::Entity::find().all(&db).await.unwrap();
    assert!(results.iter().all(|r| r.prize_table_version == 2));
}

#[actix_web::test]
async fn test_bulk_update_validation() {
    let db = common::setup_db().await;
    let prize_service = PrizeService::new(db.clone());

    let mut too_few = only_position_one();
    too_few.prizes.pop();
    assert!(matches!(
        prize_service.bulk_update(1, too_few).await,
        Err(AppError::ValidationError(_))
    ));

    let mut duplicate = only_position_one();
    duplicate.prizes[7].position = 1;
    assert!(matches!(
        prize_service.bulk_update(1, duplicate).await,
        Err(AppError::ValidationError(_))
    ));

    let mut bad_total = only_position_one();
    bad_total.prizes[1].probability = 5.0;
    assert!(matches!(
        prize_service.bulk_update(1, bad_total).await,
        Err(AppError::ValidationError(_))
    ));

    // 失败的请求不改变原表
    let prizes = prize_service.list_prizes().await.unwrap();
    assert_eq!(prizes.len(), 8);
    assert!(prizes.iter().all(|p| p.version == 1));
}

#[actix_web::test]
async fn test_update_single_prize_bumps_version() {
    let db = common::setup_db().await;
    let prize_service = PrizeService::new(db.clone());

    let updated = prize_service
        .update_prize(
            1,
            3,
            UpdatePrizeRequest {
                name: "Free Coffee".into(),
                description: Some("One cup".into()),
                probability: 15.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.position, 3);
    assert_eq!(updated.name, "Free Coffee");
    assert_eq!(updated.version, 2);
    assert_eq!(updated.updated_by, Some(1));

    assert!(matches!(
        prize_service
            .update_prize(
                1,
                9,
                UpdatePrizeRequest {
                    name: "Nope".into(),
                    description: None,
                    probability: 1.0,
                },
            )
            .await,
        Err(AppError::ValidationError(_))
    ));
}

#[actix_web::test]
async fn test_token_listing_and_purge() {
    let db = common::setup_db().await;
    let token_service = TokenService::new(db.clone(), 48);

    let created = token_service.create_token(1).await.unwrap();
    assert_eq!(created.token_id.len(), 12);
    assert!(created.token_id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

    common::insert_token(&db, "USED00000001", true, Utc::now() + Duration::hours(1)).await;
    common::insert_token(&db, "OLD000000001", false, Utc::now() - Duration::hours(30)).await;
    common::insert_token(&db, "RECENT000001", false, Utc::now() - Duration::hours(1)).await;

    let query = |status| TokenQuery {
        page: None,
        limit: None,
        status,
    };
    assert_eq!(token_service.list_tokens(&query(None)).await.unwrap().pagination.total, 4);
    assert_eq!(
        token_service
            .list_tokens(&query(Some(TokenStatus::Unused)))
            .await
            .unwrap()
            .items[0]
            .token_id,
        created.token_id
    );
    assert_eq!(
        token_service
            .list_tokens(&query(Some(TokenStatus::Expired)))
            .await
            .unwrap()
            .pagination
            .total,
        2
    );
    assert_eq!(
        token_service
            .list_tokens(&query(Some(TokenStatus::Used)))
            .await
            .unwrap()
            .pagination
            .total,
        1
    );

    let purged = token_service.purge_expired(Duration::hours(24)).await.unwrap();
    assert_eq!(purged, 1);
    let remaining = token_entity::Entity::find().count(&db).await.unwrap();
    assert_eq!(remaining, 3);
}
