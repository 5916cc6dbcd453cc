use acctmgr::admin::{Console, EntityCondition, Status};
use acctmgr::api::{
    EntityStore, Federation, FederationCondition, FederationFlags, RestStore, StoreError,
};
use acctmgr::commands::federation::add_command;
use acctmgr::config::StorageConfig;
use acctmgr::ui::AutoConfirm;
use anyhow::Result;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// One request as received by the local accounting service
#[derive(Debug)]
struct Received {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Received {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serve one canned reply per connection, in order, and hand back what was
/// received once every reply has been sent
async fn serve(replies: Vec<(u16, &'static str)>) -> Result<(String, JoinHandle<Vec<Received>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let mut received = Vec::new();
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            received.push(read_request(&mut socket).await);
            let reply = format!(
                "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        received
    });

    Ok((url, handle))
}

async fn read_request(socket: &mut TcpStream) -> Received {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let read = socket.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before headers were complete");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8(buffer[..head_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buffer.len() < body_start + length {
        let read = socket.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before body was complete");
        buffer.extend_from_slice(&chunk[..read]);
    }
    let body = String::from_utf8(buffer[body_start..body_start + length].to_vec()).unwrap();

    Received {
        request_line,
        headers,
        body,
    }
}

fn store_for(url: &str, token: Option<&str>) -> Result<RestStore> {
    RestStore::new(&StorageConfig {
        url: url.to_string(),
        token: token.map(str::to_string),
        timeout_secs: 5,
    })
}

#[tokio::test]
async fn test_get_sends_condition_and_decodes_records() -> Result<()> {
    let (url, server) = serve(vec![(
        200,
        r#"{"federations":[{"name":"fed1","flags":0},{"name":"fed2","flags":5,"deleted":true}]}"#,
    )])
    .await?;
    let mut store = store_for(&url, Some("secret"))?;

    let (condition, _) = FederationCondition::default().with_names("fed1,fed2");
    let condition = condition.with_deleted();
    let records = EntityStore::<Federation>::get(&mut store, &condition).await?;

    assert_eq!(
        records,
        vec![
            Federation::new("fed1"),
            Federation {
                flags: FederationFlags(5),
                deleted: true,
                ..Federation::new("fed2")
            },
        ]
    );

    let received = server.await?;
    assert_eq!(
        received[0].request_line,
        "GET /federations?name=fed1%2Cfed2&with_deleted=true HTTP/1.1"
    );
    assert_eq!(received[0].header("authorization"), Some("Bearer secret"));
    Ok(())
}

#[tokio::test]
async fn test_get_without_names_sends_no_query() -> Result<()> {
    let (url, server) = serve(vec![(200, r#"{"federations":[]}"#)]).await?;
    let mut store = store_for(&format!("{}/", url), None)?;

    let records =
        EntityStore::<Federation>::get(&mut store, &FederationCondition::default()).await?;

    assert!(records.is_empty());
    let received = server.await?;
    assert_eq!(received[0].request_line, "GET /federations HTTP/1.1");
    assert_eq!(received[0].header("authorization"), None);
    Ok(())
}

#[tokio::test]
async fn test_get_rejects_reply_without_collection() -> Result<()> {
    let (url, server) = serve(vec![(200, r#"{"error":"schema changed"}"#)]).await?;
    let mut store = store_for(&url, None)?;

    let result =
        EntityStore::<Federation>::get(&mut store, &FederationCondition::default()).await;

    assert!(matches!(result, Err(StoreError::Decode(_))), "got {:?}", result);
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_get_maps_error_status() -> Result<()> {
    let (url, server) = serve(vec![(500, "database unavailable")]).await?;
    let mut store = store_for(&url, None)?;

    let result =
        EntityStore::<Federation>::get(&mut store, &FederationCondition::default()).await;

    match result {
        Err(StoreError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_create_and_commit_bodies() -> Result<()> {
    let (url, server) = serve(vec![(200, "{}"), (200, "{}"), (200, "{}")]).await?;
    let mut store = store_for(&url, Some("secret"))?;

    EntityStore::<Federation>::create(&mut store, &[Federation::new("fed1")]).await?;
    EntityStore::<Federation>::commit(&mut store, true).await?;
    EntityStore::<Federation>::commit(&mut store, false).await?;

    let received = server.await?;
    assert_eq!(received[0].request_line, "POST /federations HTTP/1.1");
    assert_eq!(
        received[0].json(),
        json!({"federations": [{"name": "fed1", "flags": 0}]})
    );
    assert_eq!(received[0].header("authorization"), Some("Bearer secret"));

    assert_eq!(received[1].request_line, "POST /commit HTTP/1.1");
    assert_eq!(received[1].json(), json!({"apply": true}));
    assert_eq!(received[2].json(), json!({"apply": false}));
    Ok(())
}

#[tokio::test]
async fn test_malformed_lookup_aborts_add() -> Result<()> {
    let (url, server) = serve(vec![(200, r#"{"error":"schema changed"}"#)]).await?;
    let mut store = store_for(&url, None)?;
    let mut confirm = AutoConfirm::yes();
    let mut out = Vec::new();
    let mut err = Vec::new();

    let status = {
        let mut console = Console::new(&mut out, &mut err);
        add_command(&mut store, &mut confirm, &mut console, &["fed1".to_string()]).await?
    };

    assert_eq!(status, Status::Error);
    assert_eq!(
        String::from_utf8(err)?,
        " Problem getting federations from database.  Contact your admin.\n"
    );
    // Only the lookup reached the service
    assert_eq!(server.await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_add_round_trip() -> Result<()> {
    let (url, server) = serve(vec![
        (200, r#"{"federations":[{"name":"fed1","flags":0}]}"#),
        (200, "{}"),
        (200, "{}"),
    ])
    .await?;
    let mut store = store_for(&url, None)?;
    let mut confirm = AutoConfirm::yes();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let args = vec!["fed1".to_string(), "fed2".to_string()];

    let status = {
        let mut console = Console::new(&mut out, &mut err);
        add_command(&mut store, &mut confirm, &mut console, &args).await?
    };

    assert_eq!(status, Status::Success);
    let received = server.await?;
    assert_eq!(
        received[0].request_line,
        "GET /federations?name=fed1%2Cfed2 HTTP/1.1"
    );
    assert_eq!(received[1].json(), json!({"federations": [{"name": "fed2", "flags": 0}]}));
    assert_eq!(received[2].json(), json!({"apply": true}));
    Ok(())
}

#[test]
fn test_condition_for_names_matches_query() {
    let condition = FederationCondition::for_names(vec!["a".into()]);
    assert_eq!(condition.query_pairs(), vec![("name", "a".to_string())]);
}
