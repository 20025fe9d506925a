use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid node selector {0}: only nodes 1, 2 and 3 exist")]
    InvalidNode(u8),
    #[error("invalid host '{0}'")]
    InvalidHost(String),
}

/// Failure of a single peer invocation. These never reach a client of the
/// originating node; the replication path logs and drops them.
#[derive(thiserror::Error, Debug)]
pub enum PeerError {
    #[error("deadline of {0:?} exceeded")]
    Timeout(std::time::Duration),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("peer answered with status {0}")]
    Status(StatusCode),
    #[error("undecodable reply: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Rejection of a front-end write body.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("body is not a JSON object: {0}")]
    NotAnObject(String),
    #[error("expected exactly one key/value pair, found {0}")]
    PairCount(usize),
    #[error("value for key '{0}' is not a string")]
    NonStringValue(String),
}
