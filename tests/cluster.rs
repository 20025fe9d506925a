//! Three-node cluster tests.
//!
//! Every node runs in-process on ephemeral ports. Peer addresses are known
//! before any node starts because all listeners are bound up front.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::net::TcpListener;

use tricache::cluster::{NodeId, PeerConfig};
use tricache::config::NodeConfig;

struct Listeners {
    client: TcpListener,
    rpc: TcpListener,
}

async fn bind_pair() -> Listeners {
    Listeners {
        client: TcpListener::bind("127.0.0.1:0").await.unwrap(),
        rpc: TcpListener::bind("127.0.0.1:0").await.unwrap(),
    }
}

/// Starts nodes 1..=3 and returns their front-end addresses. Nodes listed
/// in `down` are never started; their RPC port is released so peers get a
/// refused connection.
async fn start_cluster(down: &[u8]) -> Vec<SocketAddr> {
    let mut pairs = Vec::new();
    for _ in 0..3 {
        pairs.push(bind_pair().await);
    }
    let rpc_addrs: Vec<SocketAddr> = pairs.iter().map(|p| p.rpc.local_addr().unwrap()).collect();
    let client_addrs: Vec<SocketAddr> =
        pairs.iter().map(|p| p.client.local_addr().unwrap()).collect();

    for (i, pair) in pairs.into_iter().enumerate() {
        let id = NodeId::new(i as u8 + 1).unwrap();
        if down.contains(&id.get()) {
            continue;
        }
        let peers = id.peers().map(|p| PeerConfig {
            id: p,
            rpc_addr: rpc_addrs[usize::from(p.get()) - 1],
        });
        let config = NodeConfig {
            id,
            client_addr: client_addrs[i],
            rpc_addr: rpc_addrs[i],
            peers,
            peer_timeout: Duration::from_secs(3),
        };
        tokio::spawn(async move {
            tricache::node::serve(config, pair.client, pair.rpc).await.unwrap();
        });
    }
    client_addrs
}

async fn set(client: &Client, node: SocketAddr, body: &str) -> StatusCode {
    client
        .post(format!("http://{}/", node))
        .body(body.to_string())
        .send()
        .await
        .unwrap()
        .status()
}

async fn get(client: &Client, node: SocketAddr, key: &str) -> Option<String> {
    let resp = client
        .get(format!("http://{}/{}", node, key))
        .send()
        .await
        .unwrap();
    if resp.status() == StatusCode::NOT_FOUND {
        return None;
    }
    let body: serde_json::Value = resp.json().await.unwrap();
    body.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

async fn eventually_get(client: &Client, node: SocketAddr, key: &str, want: Option<&str>) -> bool {
    for _ in 0..100 {
        if get(client, node, key).await.as_deref() == want {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn test_write_on_one_node_reaches_both_peers() {
    let nodes = start_cluster(&[]).await;
    let client = Client::new();

    assert_eq!(set(&client, nodes[0], r#"{"color":"red"}"#).await, StatusCode::OK);
    assert_eq!(get(&client, nodes[0], "color").await.as_deref(), Some("red"));
    assert!(eventually_get(&client, nodes[1], "color", Some("red")).await);
    assert!(eventually_get(&client, nodes[2], "color", Some("red")).await);
}

#[tokio::test]
async fn test_delete_propagates_from_any_node() {
    let nodes = start_cluster(&[]).await;
    let client = Client::new();

    set(&client, nodes[1], r#"{"gone":"soon"}"#).await;
    assert!(eventually_get(&client, nodes[2], "gone", Some("soon")).await);

    let resp = client
        .delete(format!("http://{}/gone", nodes[2]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.text().await.unwrap(), "1");

    for node in &nodes {
        assert!(eventually_get(&client, *node, "gone", None).await);
    }
}

#[tokio::test]
async fn test_unreachable_peer_does_not_block_writes() {
    let nodes = start_cluster(&[2]).await;
    let client = Client::new();

    let started = std::time::Instant::now();
    assert_eq!(set(&client, nodes[0], r#"{"k":"v"}"#).await, StatusCode::OK);
    assert!(started.elapsed() < Duration::from_secs(1));

    assert_eq!(get(&client, nodes[0], "k").await.as_deref(), Some("v"));
    assert!(eventually_get(&client, nodes[2], "k", Some("v")).await);
}

#[tokio::test]
async fn test_malformed_write_changes_nothing_anywhere() {
    let nodes = start_cluster(&[]).await;
    let client = Client::new();

    assert_eq!(set(&client, nodes[0], r#"{k:"v"}"#).await, StatusCode::BAD_REQUEST);
    tokio::time::sleep(Duration::from_millis(200)).await;
    for node in &nodes {
        assert_eq!(get(&client, *node, "k").await, None);
    }
}

#[tokio::test]
async fn test_concurrent_writers_leave_one_value_per_node() {
    let nodes = start_cluster(&[]).await;
    let client = Client::new();

    let writes = (0..20).map(|i| {
        let client = client.clone();
        let node = nodes[i % 3];
        async move { set(&client, node, &format!(r#"{{"race":"w{}"}}"#, i)).await }
    });
    for status in futures::future::join_all(writes).await {
        assert_eq!(status, StatusCode::OK);
    }

    for node in &nodes {
        let value = get(&client, *node, "race").await.expect("every node holds a value");
        let n: usize = value.trim_start_matches('w').parse().unwrap();
        assert!(n < 20);
    }
}
