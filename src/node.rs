use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::api::{ApiState, Metrics, PeerRouterBuilder, RouterBuilder};
use crate::config::NodeConfig;
use crate::replication::{PeerLink, Replicator};
use crate::service::CacheService;
use crate::store::Store;

/// Assembles an empty store, one peer link per configured peer, the
/// replicator and the mutation service.
pub fn build_state(config: &NodeConfig) -> anyhow::Result<ApiState> {
    let metrics = Metrics::new().context("failed to register metrics")?;

    let links = config
        .peers
        .iter()
        .map(|peer| {
            PeerLink::new(peer, config.peer_timeout)
                .with_context(|| format!("failed to create link to {}", peer.id))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    for peer in &config.peers {
        tracing::info!(peer = %peer.id, addr = %peer.rpc_addr, "peer link ready");
    }

    let replicator = Replicator::new(links, metrics.clone());
    let service = CacheService::new(Arc::new(Store::new()), replicator, metrics.clone());

    Ok(ApiState { service, metrics })
}

/// Serves the front-end and the peer RPC surface on already bound
/// listeners until either server fails.
pub async fn serve(
    config: NodeConfig,
    client_listener: TcpListener,
    rpc_listener: TcpListener,
) -> anyhow::Result<()> {
    let state = build_state(&config)?;

    tracing::info!(
        node = %config.id,
        client_addr = %client_listener.local_addr()?,
        rpc_addr = %rpc_listener.local_addr()?,
        peer_timeout_ms = config.peer_timeout.as_millis() as u64,
        "node starting"
    );

    let client_app = RouterBuilder::with_state(state.clone());
    let peer_app = PeerRouterBuilder::with_state(state);

    tokio::try_join!(
        async {
            axum::serve(client_listener, client_app)
                .await
                .context("front-end server stopped")
        },
        async {
            axum::serve(rpc_listener, peer_app)
                .await
                .context("peer RPC server stopped")
        },
    )?;

    Ok(())
}

/// Binds both configured addresses and serves. Failing to bind either one
/// aborts startup.
pub async fn run(config: NodeConfig) -> anyhow::Result<()> {
    let client_listener = TcpListener::bind(config.client_addr)
        .await
        .with_context(|| format!("failed to bind front-end address {}", config.client_addr))?;
    let rpc_listener = TcpListener::bind(config.rpc_addr)
        .await
        .with_context(|| format!("failed to bind peer RPC address {}", config.rpc_addr))?;

    serve(config, client_listener, rpc_listener).await
}
