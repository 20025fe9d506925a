use serde::{Deserialize, Serialize};

/// A local write that must be forwarded to both peers. Carries no version,
/// timestamp or origin; each node applies whatever arrives last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Set { key: String, value: String },
    Delete { key: String },
}

impl Mutation {
    pub fn op(&self) -> &'static str {
        match self {
            Mutation::Set { .. } => "set",
            Mutation::Delete { .. } => "delete",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Mutation::Set { key, .. } | Mutation::Delete { key } => key,
        }
    }
}

// Peer RPC bodies: GetCache, SetCache, DeleteCache.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    pub key: String,
}

/// `value` is `None` when the key is absent, so an empty string stays a
/// real value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReply {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReply {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReply {
    pub num: u32,
}
