//! Grab client: HTTP access to the bulk image-download service.
mod client;
mod types;

pub use client::{ClientSettings, HttpSessionClient, SessionApi};
pub use types::{
    ClientError, JobPayload, JobStatus, OpenFolderReply, SessionId, StartReply, StatusSnapshot,
};
