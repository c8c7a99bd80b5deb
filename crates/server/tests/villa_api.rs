use std::net::SocketAddr;

use axum::Router;
use configs::DatabaseConfig;
use reqwest::{header::LOCATION, StatusCode as HttpStatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn villa_url(&self) -> String { format!("{}/api/Villa", self.base_url) }

    fn villa(&self, id: impl std::fmt::Display) -> String { format!("{}/api/Villa/{}", self.base_url, id) }
}

/// Each test gets its own in-memory database and listener.
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_and_migrate(&DatabaseConfig::sqlite_memory()).await?;
    let app: Router = routes::build_router(ServerState::new(db), CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client { reqwest::Client::new() }

fn lake_house() -> Value {
    json!({"firstName": "Lake House", "rate": 199.99, "occupancy": 4})
}

async fn create(app: &TestApp, body: &Value) -> anyhow::Result<Value> {
    let res = client().post(app.villa_url()).json(body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_get_delete_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.villa_url()).json(&lake_house()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok()).map(str::to_string);
    let created = res.json::<Value>().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(location.as_deref(), Some("/api/Villa/1"));

    let res = c.get(app.villa(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["firstName"], "Lake House");
    assert_eq!(body["rate"], 199.99);
    assert_eq!(body["occupancy"], 4);
    assert_eq!(body["squareFootage"], 0);
    assert!(body["lastName"].is_null());

    let res = c.delete(app.villa(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(app.villa(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_list_returns_array() -> anyhow::Result<()> {
    let app = start_server().await?;
    let empty = client().get(app.villa_url()).send().await?.json::<Value>().await?;
    assert_eq!(empty, json!([]));

    create(&app, &lake_house()).await?;
    create(&app, &json!({"firstName": "Beach Hut", "rate": 80.0})).await?;

    let res = client().get(app.villa_url()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Value>().await?;
    let names: Vec<&str> = list.as_array().unwrap().iter().filter_map(|v| v["firstName"].as_str()).collect();
    assert_eq!(names, vec!["Lake House", "Beach Hut"]);
    Ok(())
}

#[tokio::test]
async fn e2e_get_zero_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.villa(0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 400);
    Ok(())
}

#[tokio::test]
async fn e2e_create_rejections() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create(&app, &lake_house()).await?;

    // duplicate name, different case
    let res = c.post(app.villa_url()).json(&json!({"firstName": "LAKE HOUSE", "rate": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // caller-assigned id
    let res = c.post(app.villa_url()).json(&json!({"id": 7, "firstName": "Cabin", "rate": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);

    // name too long
    let res = c.post(app.villa_url()).json(&json!({"firstName": "x".repeat(31), "rate": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["errors"]["firstName"].is_array());

    // no body
    let res = c.post(app.villa_url()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // body present but missing the required rate
    let res = c.post(app.villa_url()).json(&json!({"firstName": "Cabin"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    let detail = body["detail"].as_str().unwrap_or_default();
    assert!(detail.contains("rate"), "detail: {detail}");

    let list = c.get(app.villa_url()).send().await?.json::<Value>().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn e2e_put_replaces_record() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create(&app, &lake_house()).await?;

    let res = c.put(app.villa(1)).json(&json!({"id": 2, "firstName": "Lake House", "rate": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.put(app.villa(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let next = json!({"id": 1, "firstName": "Lake Lodge", "rate": 250.0, "occupancy": 8, "amenities": "sauna"});
    let res = c.put(app.villa(1)).json(&next).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let body = c.get(app.villa(1)).send().await?.json::<Value>().await?;
    assert_eq!(body["firstName"], "Lake Lodge");
    assert_eq!(body["amenities"], "sauna");
    assert_eq!(body["occupancy"], 8);

    let res = c.put(app.villa(99)).json(&json!({"id": 99, "firstName": "Ghost", "rate": 1.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_patch_applies_json_patch() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create(&app, &lake_house()).await?;

    let doc = json!([
        {"op": "replace", "path": "/rate", "value": 120.0},
        {"op": "add", "path": "/details", "value": "Quiet"}
    ]);
    let res = c
        .patch(app.villa(1))
        .header("content-type", "application/json-patch+json")
        .body(doc.to_string())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let body = c.get(app.villa(1)).send().await?.json::<Value>().await?;
    assert_eq!(body["rate"], 120.0);
    assert_eq!(body["details"], "Quiet");
    Ok(())
}

#[tokio::test]
async fn e2e_patch_rejections_leave_row_untouched() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create(&app, &lake_house()).await?;

    let res = c
        .patch(app.villa(1))
        .json(&json!([
            {"op": "replace", "path": "/occupancy", "value": 10},
            {"op": "replace", "path": "/nope", "value": 1}
        ]))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["errors"]["nope"].is_array());

    let row = c.get(app.villa(1)).send().await?.json::<Value>().await?;
    assert_eq!(row["occupancy"], 4);

    let res = c.patch(app.villa(0)).json(&json!([])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.patch(app.villa(42)).json(&json!([])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.patch(app.villa(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_delete_rejections() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().delete(app.villa(0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = client().delete(app.villa(5)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/api/Villa/{id}"]["patch"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_put_rename_onto_existing_name_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create(&app, &lake_house()).await?;
    create(&app, &json!({"firstName": "Beach Hut", "rate": 80.0})).await?;

    let res = c.put(app.villa(2)).json(&json!({"id": 2, "firstName": "lake HOUSE", "rate": 80.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .patch(app.villa(2))
        .json(&json!([{"op": "replace", "path": "/firstName", "value": "LAKE HOUSE"}]))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let row = c.get(app.villa(2)).send().await?.json::<Value>().await?;
    assert_eq!(row["firstName"], "Beach Hut");
    Ok(())
}
