//! Integration tests for `RugRepo` against a real database.

use std::time::Duration;

use rugcat_core::reconcile::{NewRug, UpsertOutcome};
use rugcat_db::models::rug::UpdateRug;
use rugcat_db::repositories::RugRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_rug(number: &str, price_cents: i64) -> NewRug {
    NewRug {
        rug_number: number.to_string(),
        name: Some("Nain".to_string()),
        length_cm: 141,
        width_cm: 72,
        color: None,
        price_cents,
        image_path: None,
    }
}

async fn insert_unpriced(pool: &PgPool, number: &str) {
    sqlx::query(
        "INSERT INTO rugs (rug_number, length_cm, width_cm, price_cents) VALUES ($1, 100, 100, 0)",
    )
    .bind(number)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_health_check(pool: PgPool) {
    rugcat_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_creates_then_updates_same_row(pool: PgPool) {
    let first = RugRepo::upsert(&pool, &new_rug("1073", 148_092)).await.unwrap();
    assert_eq!(
        UpsertOutcome::classify(first.created_at, first.updated_at),
        UpsertOutcome::Created
    );

    tokio::time::sleep(Duration::from_millis(20)).await;

    let mut changed = new_rug("1073", 150_000);
    changed.color = Some("rot".to_string());
    let second = RugRepo::upsert(&pool, &changed).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.price_cents, 150_000);
    assert_eq!(second.color.as_deref(), Some("rot"));
    assert_eq!(
        UpsertOutcome::classify(second.created_at, second.updated_at),
        UpsertOutcome::Updated
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rugs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_overwrites_image_with_null(pool: PgPool) {
    let mut rug = new_rug("1073", 100);
    rug.image_path = Some("images/a.jpg".to_string());
    RugRepo::upsert(&pool, &rug).await.unwrap();

    rug.image_path = None;
    let stored = RugRepo::upsert(&pool, &rug).await.unwrap();
    assert_eq!(stored.image_path, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_size_check_constraint(pool: PgPool) {
    let mut rug = new_rug("1", 100);
    rug.width_cm = 0;
    assert!(RugRepo::upsert(&pool, &rug).await.is_err());
}

// ---------------------------------------------------------------------------
// Catalog reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sellable_excludes_unpriced(pool: PgPool) {
    RugRepo::upsert(&pool, &new_rug("1", 100)).await.unwrap();
    RugRepo::upsert(&pool, &new_rug("2", 200)).await.unwrap();
    insert_unpriced(&pool, "3").await;

    assert_eq!(RugRepo::count_sellable(&pool).await.unwrap(), 2);
    let all = RugRepo::list_all_sellable(&pool).await.unwrap();
    assert!(all.iter().all(|r| r.price_cents > 0));
    assert_eq!(RugRepo::list_all(&pool).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sellable_pages_newest_first(pool: PgPool) {
    for n in 1..=5 {
        RugRepo::upsert(&pool, &new_rug(&n.to_string(), 100)).await.unwrap();
    }

    let first = RugRepo::list_sellable(&pool, 0, 2).await.unwrap();
    let numbers: Vec<_> = first.iter().map(|r| r.rug_number.as_str()).collect();
    assert_eq!(numbers, vec!["5", "4"]);

    let last = RugRepo::list_sellable(&pool, 4, 2).await.unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].rug_number, "1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_rug_number(pool: PgPool) {
    RugRepo::upsert(&pool, &new_rug("1073", 100)).await.unwrap();
    assert!(RugRepo::find_by_rug_number(&pool, "1073").await.unwrap().is_some());
    assert!(RugRepo::find_by_rug_number(&pool, "9999").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_partial_only_touches_given_fields(pool: PgPool) {
    RugRepo::upsert(&pool, &new_rug("1073", 100)).await.unwrap();

    let input = UpdateRug {
        color: Some(Some("blau".to_string())),
        price_cents: Some(999),
        ..Default::default()
    };
    let updated = RugRepo::update_partial(&pool, "1073", &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.color.as_deref(), Some("blau"));
    assert_eq!(updated.price_cents, 999);
    assert_eq!(updated.name.as_deref(), Some("Nain"));
    assert_eq!(updated.length_cm, 141);

    let missing = RugRepo::update_partial(&pool, "nope", &input).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_partial_clears_with_explicit_null(pool: PgPool) {
    RugRepo::upsert(&pool, &new_rug("1073", 100)).await.unwrap();

    let input = UpdateRug {
        name: Some(None),
        ..Default::default()
    };
    let updated = RugRepo::update_partial(&pool, "1073", &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, None);
    assert_eq!(updated.price_cents, 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_image_path(pool: PgPool) {
    RugRepo::upsert(&pool, &new_rug("1073", 100)).await.unwrap();

    assert!(RugRepo::set_image_path(&pool, "1073", "images/x.jpg").await.unwrap());
    assert!(!RugRepo::set_image_path(&pool, "nope", "images/x.jpg").await.unwrap());

    let rug = RugRepo::find_by_rug_number(&pool, "1073").await.unwrap().unwrap();
    assert_eq!(rug.image_path.as_deref(), Some("images/x.jpg"));
}
