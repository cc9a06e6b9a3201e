// Интеграционные тесты TopologyClient поверх wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netatlas_client::types::{DeviceCreate, DeviceUpdate, LinkCreate};
use netatlas_client::TopologyClient;

// ── Помощники ───────────────────────────────────────────────────────

async fn setup() -> (MockServer, TopologyClient) {
    let server = MockServer::start().await;
    let client = TopologyClient::new(&format!("{}/api", server.uri())).unwrap();
    (server, client)
}

fn device_body(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "type": "switch",
        "ip": null,
        "status": "up",
        "x": 0.0,
        "y": 0.0,
        "createdAt": "2026-01-01T00:00:00+00:00"
    })
}

// ── Happy-path тесты ────────────────────────────────────────────────

#[tokio::test]
async fn test_topology_view() {
    let (server, client) = setup().await;

    let body = json!({
        "nodes": [
            {
                "id": "d1",
                "position": { "x": 10.0, "y": 20.0 },
                "data": { "name": "SW1", "type": "switch", "ip": "10.0.0.1", "status": "up" }
            }
        ],
        "edges": [
            {
                "id": "l1",
                "source": "d1",
                "target": "d1",
                "label": null,
                "status": "warn",
                "sourceHandle": "right",
                "targetHandle": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/topology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let view = client.topology().await.unwrap();

    assert_eq!(view.nodes.len(), 1);
    assert_eq!(view.nodes[0].data.name, "SW1");
    assert_eq!(view.nodes[0].position.x, 10.0);
    assert_eq!(view.edges.len(), 1);
    assert_eq!(view.edges[0].source, "d1");
    assert_eq!(view.edges[0].source_handle.as_deref(), Some("right"));
}

#[tokio::test]
async fn test_create_device_sends_only_given_fields() {
    let (server, client) = setup().await;

    // В теле не должно быть ip/status/x/y — сервер сам подставит умолчания
    Mock::given(method("POST"))
        .and(path("/api/devices"))
        .and(body_json(json!({ "name": "SW1", "type": "switch" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(device_body("d1", "SW1")))
        .mount(&server)
        .await;

    let device = client
        .create_device(&DeviceCreate {
            name: "SW1".into(),
            device_type: "switch".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(device.id, "d1");
    assert_eq!(device.status, "up");
}

#[tokio::test]
async fn test_status_patch_is_narrow() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/devices/d1"))
        .and(body_json(json!({ "status": "down" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_body("d1", "SW1")))
        .mount(&server)
        .await;

    let patch = DeviceUpdate {
        status: Some("down".into()),
        ..Default::default()
    };
    client.update_device("d1", &patch).await.unwrap();
}

#[tokio::test]
async fn test_update_position_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/devices/d1/position"))
        .and(body_json(json!({ "x": 120.0, "y": 340.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_body("d1", "SW1")))
        .mount(&server)
        .await;

    client.update_position("d1", 120.0, 340.0).await.unwrap();
}

#[tokio::test]
async fn test_delete_device_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/devices/d1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_device("d1").await.unwrap();
}

// ── Разбор ошибок ───────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Устройство не найдено" })),
        )
        .mount(&server)
        .await;

    let err = client.get_device("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Устройство не найдено"));
}

#[tokio::test]
async fn test_duplicate_link_maps_to_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/links"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "error": "Связь между этими точками крепления уже существует" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create_link(&LinkCreate {
            from_id: "d1".into(),
            to_id: "d2".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_health_lives_at_server_root() {
    let (server, client) = setup().await;

    // /health, а не /api/health
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "db": true })))
        .mount(&server)
        .await;

    let health = client.health().await.unwrap();
    assert!(health.ok);
    assert!(health.db);
}
