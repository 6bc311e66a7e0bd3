//! # HTTP Flows
//!
//! Drives a running node over a real socket, the way the browser client does.

#[cfg(test)]
mod tests {
    use papyrus_node::config::NodeConfig;
    use papyrus_node::NodeRuntime;
    use serde_json::{json, Value};
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Response {
        status: u16,
        headers: String,
        body: Value,
    }

    async fn start_node(seed: bool) -> (NodeRuntime, SocketAddr) {
        let mut config = NodeConfig::default();
        config.gateway.http.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.gateway.http.port = 0;
        config.seed.welcome_stream = seed;

        let mut runtime = NodeRuntime::new(config).unwrap();
        let addr = runtime.start().await.unwrap();
        (runtime, addr)
    }

    async fn request(
        addr: SocketAddr,
        method: &str,
        path: &str,
        body: Option<Value>,
        extra_headers: &str,
    ) -> Response {
        let payload = body.map(|b| b.to_string()).unwrap_or_default();
        let raw = format!(
            "{method} {path} HTTP/1.1\r\n\
             Host: localhost\r\n\
             Connection: close\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             {extra_headers}\r\n\
             {payload}",
            payload.len()
        );

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        let mut text = String::new();
        stream.read_to_string(&mut text).await.unwrap();

        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
        Response {
            status,
            headers: head.to_ascii_lowercase(),
            body: serde_json::from_str(body).unwrap_or(Value::Null),
        }
    }

    async fn call(addr: SocketAddr, method: &str, path: &str, body: Option<Value>) -> Response {
        request(addr, method, path, body, "").await
    }

    fn contents(detail: &Value) -> Vec<String> {
        detail["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["content"].as_str().unwrap().to_string())
            .collect()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    /// Create, fill, reorder and read back a stream over HTTP.
    #[tokio::test]
    async fn test_reorder_scenario_over_http() {
        let (mut node, addr) = start_node(false).await;

        let created = call(addr, "POST", "/api/streams", Some(json!({"name": "Notes"}))).await;
        assert_eq!(created.status, 201);
        let stream_id = created.body["id"].as_str().unwrap().to_string();

        let mut block_ids = Vec::new();
        for (order, content) in ["hello", "world"].iter().enumerate() {
            let block = call(
                addr,
                "POST",
                "/api/blocks",
                Some(json!({
                    "streamId": stream_id,
                    "type": "markdown",
                    "content": content,
                    "order": order,
                })),
            )
            .await;
            assert_eq!(block.status, 201);
            block_ids.push(block.body["id"].as_str().unwrap().to_string());
        }

        let reordered = call(
            addr,
            "POST",
            "/api/blocks/reorder",
            Some(json!({"updates": [
                {"id": block_ids[0], "order": 1},
                {"id": block_ids[1], "order": 0},
            ]})),
        )
        .await;
        assert_eq!(reordered.status, 200);
        assert_eq!(reordered.body, json!({"success": true, "updated": 2}));

        let detail = call(addr, "GET", &format!("/api/streams/{stream_id}"), None).await;
        assert_eq!(detail.status, 200);
        assert_eq!(contents(&detail.body), vec!["world", "hello"]);

        node.shutdown().await;
    }

    /// Context flags and order stay independent across toggles and moves.
    #[tokio::test]
    async fn test_context_flag_survives_move() {
        let (mut node, addr) = start_node(true).await;

        let list = call(addr, "GET", "/api/streams", None).await;
        let stream_id = list.body[0]["id"].as_str().unwrap().to_string();
        let detail = call(addr, "GET", &format!("/api/streams/{stream_id}"), None).await;
        let prompt_id = detail.body["blocks"][1]["id"].as_str().unwrap().to_string();

        let toggled = call(
            addr,
            "PATCH",
            &format!("/api/blocks/{prompt_id}"),
            Some(json!({"inContext": false})),
        )
        .await;
        assert_eq!(toggled.status, 200);
        assert_eq!(toggled.body["order"], 1);

        let moved = call(
            addr,
            "POST",
            &format!("/api/blocks/{prompt_id}/move"),
            Some(json!({"direction": "up"})),
        )
        .await;
        assert_eq!(moved.status, 200);
        let first = &moved.body["blocks"][0];
        assert_eq!(first["id"], prompt_id.as_str());
        assert_eq!(first["order"], 0);
        assert_eq!(first["inContext"], false);
        assert_eq!(first["type"], "prompt");

        node.shutdown().await;
    }

    /// Error bodies keep the `{"error": ...}` shape end to end.
    #[tokio::test]
    async fn test_error_shapes_over_http() {
        let (mut node, addr) = start_node(false).await;

        let missing = call(addr, "GET", "/api/streams/nope", None).await;
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body, json!({"error": "Stream not found"}));

        let blank = call(addr, "POST", "/api/streams", Some(json!({"name": "  "}))).await;
        assert_eq!(blank.status, 400);
        assert!(blank.body["error"].is_string());

        let orphan = call(
            addr,
            "POST",
            "/api/blocks",
            Some(json!({"streamId": "nope", "type": "markdown", "content": "x", "order": 0})),
        )
        .await;
        assert_eq!(orphan.status, 404);

        let list = call(addr, "GET", "/api/streams", None).await;
        assert_eq!(list.body, json!([]));

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let (mut node, addr) = start_node(false).await;

        let response = request(
            addr,
            "GET",
            "/api/streams",
            None,
            "Origin: http://localhost:5173\r\n",
        )
        .await;
        assert_eq!(response.status, 200);
        assert!(response.headers.contains("access-control-allow-origin: *"));

        node.shutdown().await;
    }
}
