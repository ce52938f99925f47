use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common_database::MockDatabaseClient;
use common_redis::MockRedisClient;
use pulse::server::serve;
use pulse::state::AppContext;

// Drives the real serve loop on an ephemeral port, with the shutdown future
// wired to a channel instead of process signals so the drain sequence can be
// exercised in-process.
#[tokio::test]
async fn serve_answers_then_drains_and_refuses_new_connections() {
    let time = Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap();
    let database = MockDatabaseClient::new()
        .server_time_ret(Ok(time))
        .connection_check_ret(Ok(()));
    let context = AppContext::for_testing(
        Arc::new(database),
        Arc::new(MockRedisClient::new()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (trigger, fired) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve(context, listener, async move {
        fired.await.ok();
    }));

    // Fresh connection per request, so the post-shutdown probe cannot ride
    // a kept-alive socket.
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();

    let health = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    assert_eq!(health.text().await.unwrap(), r#"{"ok":true}"#);

    let db_test = client
        .get(format!("http://{addr}/db-test"))
        .send()
        .await
        .unwrap();
    assert_eq!(db_test.status(), 200);
    let body: serde_json::Value = db_test.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["time"], "2024-05-17T10:30:00Z");

    trigger.send(()).unwrap();
    server.await.unwrap();

    // The listener is gone; a fresh connection must be refused.
    let refused = client.get(format!("http://{addr}/health")).send().await;
    assert!(refused.is_err());
}

#[tokio::test]
async fn unknown_routes_are_not_served() {
    let context = AppContext::for_testing(
        Arc::new(MockDatabaseClient::new()),
        Arc::new(MockRedisClient::new()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (trigger, fired) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve(context, listener, async move {
        fired.await.ok();
    }));

    let response = reqwest::get(format!("http://{addr}/nonexistent"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    trigger.send(()).unwrap();
    server.await.unwrap();
}
