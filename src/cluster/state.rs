use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::error::ConfigError;

const CLIENT_BASE_PORT: u16 = 9527;
const RPC_BASE_PORT: u16 = 9530;

/// One of the three fixed cluster members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u8);

impl NodeId {
    pub const ALL: [NodeId; 3] = [NodeId(1), NodeId(2), NodeId(3)];

    pub fn new(selector: u8) -> Result<Self, ConfigError> {
        match selector {
            1..=3 => Ok(NodeId(selector)),
            other => Err(ConfigError::InvalidNode(other)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The two other members, in ascending order.
    pub fn peers(self) -> [NodeId; 2] {
        match self.0 {
            1 => [NodeId(2), NodeId(3)],
            2 => [NodeId(1), NodeId(3)],
            _ => [NodeId(1), NodeId(2)],
        }
    }

    pub fn client_addr(self, host: IpAddr) -> SocketAddr {
        SocketAddr::new(host, CLIENT_BASE_PORT + u16::from(self.0 - 1))
    }

    pub fn rpc_addr(self, host: IpAddr) -> SocketAddr {
        SocketAddr::new(host, RPC_BASE_PORT + u16::from(self.0 - 1))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// A peer this node dials for replication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerConfig {
    pub id: NodeId,
    pub rpc_addr: SocketAddr,
}
