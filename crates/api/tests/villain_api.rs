//! HTTP-level integration tests for the villain admin.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get_auth, post_auth, post_json_auth, put_json_auth};
use heroes_db::repositories::{OriginRepo, VillainRepo};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_villain(pool: &PgPool, token: &str, name: &str, origin_id: i64) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/admin/villains",
        token,
        json!({"name": name, "origin_id": origin_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_make_unique_deletes_duplicates(pool: PgPool) {
    let admin = common::admin(&pool).await;
    let earth = OriginRepo::create(&pool, "Earth").await.unwrap();

    let target = create_villain(&pool, &admin.token, "X", earth.id).await;
    for _ in 0..3 {
        create_villain(&pool, &admin.token, "X", earth.id).await;
    }
    create_villain(&pool, &admin.token, "Y", earth.id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/admin/villains/{}/make-unique", target["id"]),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 3);
    assert_eq!(json["data"]["villain"]["is_unique"], true);
    assert_eq!(json["data"]["message"], "This villain is now unique");

    assert_eq!(VillainRepo::count_by_name(&pool, "X").await.unwrap(), 1);
    assert_eq!(VillainRepo::count_by_name(&pool, "Y").await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_make_unique_without_duplicates(pool: PgPool) {
    let admin = common::admin(&pool).await;
    let earth = OriginRepo::create(&pool, "Earth").await.unwrap();
    let only = create_villain(&pool, &admin.token, "Y", earth.id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/admin/villains/{}/make-unique", only["id"]),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 0);
    assert_eq!(json["data"]["villain"]["is_unique"], true);

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/admin/villains/999999/make-unique", &admin.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_ignores_added_on(pool: PgPool) {
    let staff = common::staff(&pool).await;
    let earth = OriginRepo::create(&pool, "Earth").await.unwrap();
    let villain = create_villain(&pool, &staff.token, "Old Name", earth.id).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/villains/{}", villain["id"]),
        &staff.token,
        json!({"name": "New Name", "added_on": "2001-01-01T00:00:00Z"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "New Name");
    assert_eq!(json["data"]["added_on"], villain["added_on"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_is_trimmed_before_dedup(pool: PgPool) {
    let admin = common::admin(&pool).await;
    let earth = OriginRepo::create(&pool, "Earth").await.unwrap();
    let joker = create_villain(&pool, &admin.token, "Joker", earth.id).await;
    let other = create_villain(&pool, &admin.token, "Clown", earth.id).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/villains/{}", other["id"]),
        &admin.token,
        json!({"name": "  Joker "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Joker");

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/admin/villains/{}/make-unique", joker["id"]),
        &admin.token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["deleted"], 1);
    assert_eq!(VillainRepo::count_by_name(&pool, "Joker").await.unwrap(), 1);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/villains/{}", joker["id"]),
        &admin.token,
        json!({"name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_get_villain(pool: PgPool) {
    let staff = common::staff(&pool).await;
    let earth = OriginRepo::create(&pool, "Earth").await.unwrap();
    let villain = create_villain(&pool, &staff.token, "Vex", earth.id).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/villains", &staff.token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["origin"], "Earth");

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/admin/villains/{}", villain["id"]),
        &staff.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_villains_csv(pool: PgPool) {
    let staff = common::staff(&pool).await;
    let earth = OriginRepo::create(&pool, "Earth").await.unwrap();
    let villain = create_villain(&pool, &staff.token, "Quote \"Q\"", earth.id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/admin/villains/actions/export-csv",
        &staff.token,
        json!({"ids": [villain["id"]]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=villain.csv"
    );

    let text = body_text(response).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,name,category,origin,added_on,is_unique");
    assert!(lines[1].starts_with(&format!("{},\"Quote \"\"Q\"\"\",,Earth,", villain["id"])));
    assert!(lines[1].ends_with(",false"));
}
