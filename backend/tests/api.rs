use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use socialmint::db::MemoryStore;
use socialmint::handlers::AppState;
use socialmint::utils::StoreBackend;
use socialmint::{server, Config};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let config = Config {
        port: 0,
        store_backend: StoreBackend::Memory,
        allowed_origins: Vec::new(),
    };
    server::create_router(AppState::new(Arc::new(MemoryStore::new())), &config)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn user_lifecycle() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "walletaddress": "0xABC", "username": "alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["walletaddress"], "0xABC");
    assert_eq!(created["username"], "alice");
    assert_eq!(created["email"], "a@x.com");
    assert!(created["created_at"].is_string());
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(&app, "PUT", &format!("/users/{}", id), Some(json!({ "bio": "hi" }))).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = created.clone();
    expected["bio"] = json!("hi");
    assert_eq!(updated, expected);

    let (status, body) = send(&app, "DELETE", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User deleted" }));

    let (status, body) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "User not found!" }));
}

#[tokio::test]
async fn list_returns_ok_with_every_document() {
    let app = app();
    let (status, body) = send(&app, "GET", "/chats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for message in ["gm", "gn"] {
        let (status, _) = send(
            &app,
            "POST",
            "/chats",
            Some(json!({ "sender_id": Uuid::new_v4(), "receiver_id": Uuid::new_v4(), "message": message })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/chats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_likes_are_both_stored() {
    let app = app();
    let like = json!({ "nft_id": Uuid::new_v4(), "user_id": Uuid::new_v4() });

    let (first_status, first) = send(&app, "POST", "/likes", Some(like.clone())).await;
    let (second_status, second) = send(&app, "POST", "/likes", Some(like)).await;
    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_ne!(first["_id"], second["_id"]);

    let (_, all) = send(&app, "GET", "/likes", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_required_field_is_rejected_and_not_stored() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/comments",
        Some(json!({ "nft_id": Uuid::new_v4(), "user_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("text"));

    let (_, all) = send(&app, "GET", "/comments", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn malformed_reference_id_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/eventAttendances",
        Some(json!({ "event_id": "not-an-id", "user_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/blogs")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = app();
    let unknown = format!("/events/{}", Uuid::new_v4());

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, &unknown, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Event not found!");
    }
    let (status, _) = send(&app, "PUT", &unknown, Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // an invalid patch does not hide a missing document
    let (status, body) = send(&app, "PUT", &unknown, Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Event not found!" }));

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/events/xyz", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("xyz"));
    }
    let (status, _) = send(&app, "PUT", "/events/xyz", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_keeps_untouched_fields() {
    let app = app();
    let (_, nft) = send(
        &app,
        "POST",
        "/nfts",
        Some(json!({
            "user_id": Uuid::new_v4(),
            "metadata_uri": "ipfs://meta",
            "title": "First mint",
            "description": "gm",
            "media_url": "https://cdn.example/1.png",
            "txid": "TX1"
        })),
    )
    .await;
    let id = nft["_id"].as_str().unwrap();

    let (status, updated) = send(&app, "PUT", &format!("/nfts/{}", id), Some(json!({ "title": "Renamed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Renamed");
    for field in ["_id", "user_id", "metadata_uri", "description", "media_url", "txid", "created_at"] {
        assert_eq!(updated[field], nft[field], "{} changed", field);
    }

    let (status, _) = send(&app, "PUT", &format!("/nfts/{}", id), Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_wallet_address_is_rejected() {
    let app = app();
    let user = json!({ "walletaddress": "0xABC", "username": "alice", "email": "a@x.com" });
    let (status, _) = send(&app, "POST", "/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/users", Some(user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("duplicate key"));
}

#[tokio::test]
async fn health_reports_backend() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "backend": "memory" }));
}

struct EntityCase {
    prefix: &'static str,
    name: &'static str,
    body: Value,
    required: &'static str,
    timestamp: &'static str,
    patch: (&'static str, Value),
}

fn entity_cases() -> Vec<EntityCase> {
    let id = || json!(Uuid::new_v4());
    vec![
        EntityCase {
            prefix: "/users",
            name: "User",
            body: json!({ "walletaddress": "0xCAFE", "username": "carol", "email": "c@x.com" }),
            required: "email",
            timestamp: "created_at",
            patch: ("username", json!("caroline")),
        },
        EntityCase {
            prefix: "/nfts",
            name: "NFT",
            body: json!({
                "user_id": id(),
                "metadata_uri": "ipfs://meta",
                "title": "First mint",
                "media_url": "https://cdn.example/1.png",
                "txid": "TX1"
            }),
            required: "txid",
            timestamp: "created_at",
            patch: ("title", json!("Renamed")),
        },
        EntityCase {
            prefix: "/blogs",
            name: "Blog",
            body: json!({
                "user_id": id(),
                "title": "Hello",
                "content": "First post",
                "metadata_uri": "ipfs://blog",
                "txid": "TX2"
            }),
            required: "content",
            timestamp: "created_at",
            patch: ("title", json!("Hello again")),
        },
        EntityCase {
            prefix: "/events",
            name: "Event",
            body: json!({
                "user_id": id(),
                "title": "Meetup",
                "description": "Monthly meetup",
                "date_time": "2025-10-01T18:00",
                "nft_id": id(),
                "qr_code_url": "https://cdn.example/qr.png"
            }),
            required: "qr_code_url",
            timestamp: "created_at",
            patch: ("description", json!("Moved online")),
        },
        EntityCase {
            prefix: "/eventAttendances",
            name: "EventAttendance",
            body: json!({ "event_id": id(), "user_id": id() }),
            required: "event_id",
            timestamp: "scanned_at",
            patch: ("user_id", id()),
        },
        EntityCase {
            prefix: "/likes",
            name: "Like",
            body: json!({ "nft_id": id(), "user_id": id() }),
            required: "nft_id",
            timestamp: "created_at",
            patch: ("user_id", id()),
        },
        EntityCase {
            prefix: "/comments",
            name: "Comment",
            body: json!({ "nft_id": id(), "user_id": id(), "text": "nice" }),
            required: "text",
            timestamp: "created_at",
            patch: ("text", json!("very nice")),
        },
        EntityCase {
            prefix: "/chats",
            name: "Chat",
            body: json!({ "sender_id": id(), "receiver_id": id(), "message": "gm" }),
            required: "message",
            timestamp: "created_at",
            patch: ("message", json!("gn")),
        },
    ]
}

#[tokio::test]
async fn every_entity_supports_the_crud_contract() {
    let app = app();

    for case in entity_cases() {
        let prefix = case.prefix;

        let mut incomplete = case.body.clone();
        incomplete.as_object_mut().unwrap().remove(case.required);
        let (status, body) = send(&app, "POST", prefix, Some(incomplete)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", prefix);
        assert!(body["error"].as_str().unwrap().contains(case.required), "{}", prefix);
        let (_, all) = send(&app, "GET", prefix, None).await;
        assert_eq!(all, json!([]), "{} stored an invalid document", prefix);

        let before = Utc::now();
        let (status, created) = send(&app, "POST", prefix, Some(case.body.clone())).await;
        assert_eq!(status, StatusCode::CREATED, "{}", prefix);
        let id = created["_id"].as_str().unwrap().to_string();
        let stamped: DateTime<Utc> = created[case.timestamp].as_str().unwrap().parse().unwrap();
        assert!(stamped >= before, "{} timestamp predates the call", prefix);
        for (field, value) in case.body.as_object().unwrap() {
            assert_eq!(&created[field], value, "{}.{}", prefix, field);
        }

        let item = format!("{}/{}", prefix, id);
        let (status, fetched) = send(&app, "GET", &item, None).await;
        assert_eq!(status, StatusCode::OK, "{}", prefix);
        assert_eq!(fetched, created, "{}", prefix);

        let (field, value) = case.patch.clone();
        let mut patch = serde_json::Map::new();
        patch.insert(field.to_string(), value.clone());
        let (status, updated) = send(&app, "PUT", &item, Some(Value::Object(patch))).await;
        assert_eq!(status, StatusCode::OK, "{}", prefix);
        let mut expected = created.clone();
        expected[field] = value;
        assert_eq!(updated, expected, "{}", prefix);
        let (_, fetched) = send(&app, "GET", &item, None).await;
        assert_eq!(fetched, expected, "{}", prefix);

        let (status, body) = send(&app, "DELETE", &item, None).await;
        assert_eq!(status, StatusCode::OK, "{}", prefix);
        assert_eq!(body, json!({ "message": format!("{} deleted", case.name) }));

        let (status, body) = send(&app, "GET", &item, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", prefix);
        assert_eq!(body, json!({ "message": format!("{} not found!", case.name) }));
    }
}

#[tokio::test]
async fn empty_update_body_leaves_document_unchanged() {
    let app = app();
    let (_, created) = send(
        &app,
        "POST",
        "/comments",
        Some(json!({ "nft_id": Uuid::new_v4(), "user_id": Uuid::new_v4(), "text": "nice" })),
    )
    .await;
    let item = format!("/comments/{}", created["_id"].as_str().unwrap());

    let request = Request::builder().method("PUT").uri(item.as_str()).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, created);

    let (status, body) = send(&app, "PUT", &item, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}
