use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tokio::time::timeout;

use crate::cluster::{NodeId, PeerConfig};
use crate::error::PeerError;
use crate::util::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, Mutation, SetReply, SetRequest,
};

/// Outbound RPC channel to one peer.
///
/// The underlying client is built once at startup and cloned into every
/// replication task; clones share one connection pool. Every call is
/// bounded by `deadline`, measured from issuance, and is dropped (which
/// cancels the in-flight request) when it expires.
#[derive(Debug, Clone)]
pub struct PeerLink {
    id: NodeId,
    base_url: String,
    client: Client,
    deadline: Duration,
}

impl PeerLink {
    pub fn new(peer: &PeerConfig, deadline: Duration) -> Result<Self, PeerError> {
        let client = Client::builder().timeout(deadline).build()?;
        Ok(PeerLink {
            id: peer.id,
            base_url: format!("http://{}", peer.rpc_addr),
            client,
            deadline,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub async fn get_cache(&self, key: &str) -> Result<GetReply, PeerError> {
        self.call("/cache/get", &GetRequest { key: key.to_string() })
            .await
    }

    pub async fn set_cache(&self, key: &str, value: &str) -> Result<(), PeerError> {
        let req = SetRequest {
            key: key.to_string(),
            value: value.to_string(),
        };
        let _: SetReply = self.call("/cache/set", &req).await?;
        Ok(())
    }

    /// Returns how many entries the peer removed (0 or 1).
    pub async fn delete_cache(&self, key: &str) -> Result<u32, PeerError> {
        let reply: DeleteReply = self
            .call("/cache/delete", &DeleteRequest { key: key.to_string() })
            .await?;
        Ok(reply.num)
    }

    /// Forwards one replicated mutation to the peer.
    pub async fn apply(&self, mutation: &Mutation) -> Result<(), PeerError> {
        match mutation {
            Mutation::Set { key, value } => self.set_cache(key, value).await,
            Mutation::Delete { key } => self.delete_cache(key).await.map(|_| ()),
        }
    }

    async fn call<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, PeerError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        match timeout(self.deadline, self.send(&url, body)).await {
            Ok(result) => result,
            Err(_) => Err(PeerError::Timeout(self.deadline)),
        }
    }

    async fn send<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, PeerError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PeerError::Status(status));
        }
        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(PeerError::Decode)
    }
}
