use crudkit_core::id::{EntityId, IdKind};
use crudkit_data::entity::{Entity, RelationDef, SqlRow};
use crudkit_data::repository::Repository;
use crudkit_data::value::SqlValue;
use crudkit_data_sqlx::SqliteRepository;
use crudkit_http::{crud_routes, CrudController};
use crudkit_test::TestApp;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
struct User {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Email")]
    email: String,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<NoteView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct NoteView {
    id: u32,
    body: String,
}

impl Entity for User {
    const ID_KIND: IdKind = IdKind::Uint;

    fn table() -> &'static str {
        "users"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "email"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.email.as_str().into()]
    }

    fn id(&self) -> EntityId {
        EntityId::Uint(self.id.into())
    }

    fn set_id(&mut self, id: EntityId) {
        if let EntityId::Uint(n) = id {
            self.id = n as u32;
        }
    }

    fn soft_delete_column() -> Option<&'static str> {
        Some("deleted_at")
    }

    fn relations() -> &'static [RelationDef] {
        &[RelationDef {
            name: "notes",
            table: "notes",
            foreign_key: "user_id",
            columns: &["id", "body"],
        }]
    }

    fn attach_related(&mut self, relation: &str, rows: Vec<SqlRow>) {
        if relation != "notes" {
            return;
        }
        self.notes = rows
            .iter()
            .map(|row| NoteView {
                id: row.get("id").and_then(SqlValue::as_int).unwrap_or(0) as u32,
                body: row
                    .get("body")
                    .and_then(SqlValue::as_text)
                    .unwrap_or("")
                    .to_owned(),
            })
            .collect();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
struct Tag {
    id: String,
    label: String,
}

impl Entity for Tag {
    const ID_KIND: IdKind = IdKind::Text;

    fn table() -> &'static str {
        "tags"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "label"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.as_str().into(), self.label.as_str().into()]
    }

    fn id(&self) -> EntityId {
        EntityId::Text(self.id.clone())
    }

    fn set_id(&mut self, id: EntityId) {
        if let EntityId::Text(s) = id {
            self.id = s;
        }
    }
}

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            deleted_at TEXT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            body TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("CREATE TABLE tags (id TEXT PRIMARY KEY, label TEXT NOT NULL DEFAULT '')")
        .execute(&pool)
        .await
        .unwrap();
    pool
}

async fn user_app() -> (TestApp, SqlitePool) {
    let pool = setup_pool().await;
    let repo = SqliteRepository::<User>::new(pool.clone());
    let app = TestApp::new(crud_routes(CrudController::new(repo)));
    (app, pool)
}

#[tokio::test]
async fn scenario_a_create_then_get_round_trips() {
    let (app, _pool) = user_app().await;

    app.post("/")
        .json(&json!({ "Email": "test@example.com" }))
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "item": { "ID": 1, "Email": "test@example.com" } }));

    app.get("/1")
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "item": { "ID": 1, "Email": "test@example.com" } }));
}

#[tokio::test]
async fn scenario_b_textual_param_against_numeric_key_is_400() {
    let (app, _pool) = user_app().await;

    app.get("/abc")
        .send()
        .await
        .assert_bad_request()
        .assert_json(json!({ "err": "id type mismatch" }));
}

#[tokio::test]
async fn scenario_c_delete_missing_is_500() {
    let (app, _pool) = user_app().await;

    app.delete("/999")
        .send()
        .await
        .assert_internal_error()
        .assert_json(json!({ "err": "no rows found" }));
}

#[tokio::test]
async fn get_all_on_empty_collection_is_404() {
    let (app, _pool) = user_app().await;

    app.get("/")
        .send()
        .await
        .assert_not_found()
        .assert_json(json!({ "err": "no rows found" }));
}

#[tokio::test]
async fn get_all_lists_created_entities() {
    let (app, _pool) = user_app().await;

    app.post("/")
        .json(&json!({ "Email": "a@example.com" }))
        .send()
        .await
        .assert_ok();
    app.post("/")
        .json(&json!({ "Email": "b@example.com" }))
        .send()
        .await
        .assert_ok();

    app.get("/").send().await.assert_ok().assert_json(json!({
        "all": [
            { "ID": 1, "Email": "a@example.com" },
            { "ID": 2, "Email": "b@example.com" },
        ]
    }));
}

#[tokio::test]
async fn get_missing_entity_is_404() {
    let (app, _pool) = user_app().await;

    app.get("/999")
        .send()
        .await
        .assert_not_found()
        .assert_json(json!({ "err": "no rows found" }));
}

#[tokio::test]
async fn create_empty_model_is_500() {
    let (app, _pool) = user_app().await;

    app.post("/")
        .json(&json!({}))
        .send()
        .await
        .assert_internal_error()
        .assert_json(json!({ "err": "model cannot be empty" }));
}

#[tokio::test]
async fn create_duplicate_key_is_500() {
    let (app, _pool) = user_app().await;

    app.post("/")
        .json(&json!({ "Email": "a@example.com" }))
        .send()
        .await
        .assert_ok();
    app.post("/")
        .json(&json!({ "Email": "a@example.com" }))
        .send()
        .await
        .assert_internal_error()
        .assert_json(json!({ "err": "duplicated key" }));
}

#[tokio::test]
async fn update_overwrites_and_reports_updated() {
    let (app, _pool) = user_app().await;

    app.post("/")
        .json(&json!({ "Email": "old@example.com" }))
        .send()
        .await
        .assert_ok();

    app.put("/1")
        .json(&json!({ "Email": "new@example.com" }))
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "message": "updated" }));

    app.get("/1")
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "item": { "ID": 1, "Email": "new@example.com" } }));
}

#[tokio::test]
async fn update_missing_entity_is_404() {
    let (app, _pool) = user_app().await;

    app.put("/999")
        .json(&json!({ "Email": "x@example.com" }))
        .send()
        .await
        .assert_not_found()
        .assert_json(json!({ "err": "no rows found" }));
}

#[tokio::test]
async fn update_with_invalid_id_is_400() {
    let (app, _pool) = user_app().await;

    app.put("/abc")
        .json(&json!({ "Email": "x@example.com" }))
        .send()
        .await
        .assert_bad_request()
        .assert_json(json!({ "err": "id type mismatch" }));
}

#[tokio::test]
async fn delete_reports_deleted_and_removes_the_row() {
    let (app, pool) = user_app().await;

    app.post("/")
        .json(&json!({ "Email": "a@example.com" }))
        .send()
        .await
        .assert_ok();

    app.delete("/1")
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "message": "deleted" }));

    // Default deletion is permanent: gone even from the unscoped view.
    let repo = SqliteRepository::<User>::new(pool);
    assert!(repo.get_unscoped(&EntityId::Uint(1)).await.is_err());
}

#[tokio::test]
async fn soft_delete_variant_keeps_the_row_unscoped() {
    let pool = setup_pool().await;
    let repo = SqliteRepository::<User>::new(pool.clone());
    let controller = CrudController::builder(repo.clone()).soft_delete().build();
    let app = TestApp::new(crud_routes(controller));

    app.post("/")
        .json(&json!({ "Email": "a@example.com" }))
        .send()
        .await
        .assert_ok();
    app.delete("/1").send().await.assert_ok();

    app.get("/1")
        .send()
        .await
        .assert_not_found()
        .assert_json(json!({ "err": "no rows found" }));
    let kept = repo.get_unscoped(&EntityId::Uint(1)).await.unwrap();
    assert_eq!(kept.email, "a@example.com");
}

#[tokio::test]
async fn configured_preload_shows_up_in_the_item_body() {
    let pool = setup_pool().await;
    let repo = SqliteRepository::<User>::new(pool.clone());
    let controller = CrudController::builder(repo).preload("notes").build();
    let app = TestApp::new(crud_routes(controller));

    app.post("/")
        .json(&json!({ "Email": "a@example.com" }))
        .send()
        .await
        .assert_ok();
    sqlx::query("INSERT INTO notes (user_id, body) VALUES (1, 'hello')")
        .execute(&pool)
        .await
        .unwrap();

    app.get("/1").send().await.assert_ok().assert_json(json!({
        "item": {
            "ID": 1,
            "Email": "a@example.com",
            "notes": [ { "id": 1, "body": "hello" } ],
        }
    }));
}

#[tokio::test]
async fn text_keyed_controller_accepts_text_and_rejects_numeric_ids() {
    let pool = setup_pool().await;
    let repo = SqliteRepository::<Tag>::new(pool);
    let app = TestApp::new(crud_routes(CrudController::new(repo)));

    app.post("/")
        .json(&json!({ "id": "rust", "label": "Rust" }))
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "item": { "id": "rust", "label": "Rust" } }));

    app.get("/rust")
        .send()
        .await
        .assert_ok()
        .assert_json(json!({ "item": { "id": "rust", "label": "Rust" } }));

    app.get("/42")
        .send()
        .await
        .assert_bad_request()
        .assert_json(json!({ "err": "id type mismatch" }));
}
