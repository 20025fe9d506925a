use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::cluster::{NodeId, PeerConfig};
use crate::error::ConfigError;

pub const DEFAULT_PEER_TIMEOUT_MS: u64 = 3000;

#[derive(Parser, Debug)]
#[command(name = "tricache", about = "Three-node replicated in-memory cache")]
pub struct CliArgs {
    /// Which of the three cluster members this process is (1, 2 or 3).
    #[arg(long)]
    pub node: u8,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Deadline for each call to a peer, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_PEER_TIMEOUT_MS)]
    pub peer_timeout_ms: u64,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// `pretty`, `compact` or `json`.
    #[arg(long, default_value = "compact")]
    pub log_format: String,
}

/// Everything a node needs to know about itself and its peers. Built once
/// at startup and handed to each component; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub id: NodeId,
    pub client_addr: SocketAddr,
    pub rpc_addr: SocketAddr,
    pub peers: [PeerConfig; 2],
    pub peer_timeout: Duration,
}

impl NodeConfig {
    /// Derives the fixed address layout for `id` on `host`.
    pub fn for_node(id: NodeId, host: IpAddr, peer_timeout: Duration) -> Self {
        let peers = id.peers().map(|peer| PeerConfig {
            id: peer,
            rpc_addr: peer.rpc_addr(host),
        });
        NodeConfig {
            id,
            client_addr: id.client_addr(host),
            rpc_addr: id.rpc_addr(host),
            peers,
            peer_timeout,
        }
    }
}

impl TryFrom<&CliArgs> for NodeConfig {
    type Error = ConfigError;

    fn try_from(args: &CliArgs) -> Result<Self, Self::Error> {
        let id = NodeId::new(args.node)?;
        let host: IpAddr = args
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(args.host.clone()))?;
        Ok(NodeConfig::for_node(
            id,
            host,
            Duration::from_millis(args.peer_timeout_ms),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(node: u8, host: &str) -> CliArgs {
        CliArgs {
            node,
            host: host.to_string(),
            peer_timeout_ms: DEFAULT_PEER_TIMEOUT_MS,
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
        }
    }

    #[test]
    fn test_node_one_layout() {
        let cfg = NodeConfig::try_from(&args(1, "127.0.0.1")).unwrap();
        assert_eq!(cfg.client_addr.to_string(), "127.0.0.1:9527");
        assert_eq!(cfg.rpc_addr.to_string(), "127.0.0.1:9530");
        let peers: Vec<String> = cfg.peers.iter().map(|p| p.rpc_addr.to_string()).collect();
        assert_eq!(peers, vec!["127.0.0.1:9531", "127.0.0.1:9532"]);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_node_three_dials_one_and_two() {
        let cfg = NodeConfig::try_from(&args(3, "127.0.0.1")).unwrap();
        let peers: Vec<u8> = cfg.peers.iter().map(|p| p.id.get()).collect();
        assert_eq!(peers, vec![1, 2]);
        assert_eq!(cfg.client_addr.port(), 9529);
    }

    #[test]
    fn test_invalid_selector_and_host() {
        assert!(matches!(
            NodeConfig::try_from(&args(7, "127.0.0.1")),
            Err(ConfigError::InvalidNode(7))
        ));
        assert!(matches!(
            NodeConfig::try_from(&args(1, "not-an-ip")),
            Err(ConfigError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_cli_parses_flags() {
        let parsed = CliArgs::try_parse_from(["tricache", "--node", "2", "--peer-timeout-ms", "500"])
            .unwrap();
        assert_eq!(parsed.node, 2);
        assert_eq!(parsed.host, "127.0.0.1");
        assert_eq!(parsed.peer_timeout_ms, 500);
    }
}
