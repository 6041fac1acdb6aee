use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque session identifier issued by the service.
pub type SessionId = String;

/// Body of `POST /download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPayload {
    pub query: String,
    pub count: u32,
    pub min_size: String,
}

/// Reply to `POST /download`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Job status on the wire. The service also reports transitional names
/// (`starting`, `searching`, `downloading`) which fold into the non-terminal
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[serde(alias = "starting")]
    Pending,
    #[serde(alias = "searching", alias = "downloading")]
    Running,
    Completed,
    Failed,
}

/// Reply to `GET /status/{session_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusSnapshot {
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub downloaded: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub message: String,
}

/// Reply to `GET /open-folder/{session_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct OpenFolderReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the service attaches to non-2xx replies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub(crate) struct ErrorReply {
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connection failure.
    #[error("connection failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered but signaled failure.
    #[error("{0}")]
    Service(String),
    /// The server answered with a body we could not parse.
    #[error("malformed response: {0}")]
    Payload(#[from] serde_json::Error),
    /// Local filesystem failure while saving the artifact.
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}
