use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use grab_logging::grab_debug;
use reqwest::header::CONTENT_DISPOSITION;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::types::{
    ClientError, ErrorReply, JobPayload, OpenFolderReply, SessionId, StartReply, StatusSnapshot,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The remote operations the session coordinator depends on. Holds no
/// session state; the active id lives in the core state machine.
#[async_trait::async_trait]
pub trait SessionApi: Send + Sync {
    /// Issues the job-start request and returns the assigned session id.
    async fn start_job(&self, request: &JobPayload) -> Result<SessionId, ClientError>;
    /// Issues one status poll for the session.
    async fn poll_status(&self, session_id: &str) -> Result<StatusSnapshot, ClientError>;
    /// Constructs (does not fetch) the artifact location for the session.
    fn artifact_url(&self, session_id: &str) -> Url;
    /// Best-effort request to open the server-side download folder.
    async fn open_folder(&self, session_id: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpSessionClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl HttpSessionClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.settings.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    /// Streams the packaged artifact into `dir`, using the filename from
    /// Content-Disposition and falling back to `{session_id}.zip`.
    pub async fn download_artifact(
        &self,
        session_id: &str,
        dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        let response = self.client.get(self.artifact_url(session_id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await?;
            let reply: ErrorReply = serde_json::from_slice(&bytes).unwrap_or_default();
            return Err(ClientError::Service(
                reply.error.unwrap_or_else(|| format!("server returned {status}")),
            ));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_filename)
            .unwrap_or_else(|| format!("{session_id}.zip"));
        let path = dir.join(filename);

        let mut file = tokio::fs::File::create(&path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        grab_debug!("artifact for session {} saved to {:?}", session_id, path);
        Ok(path)
    }
}

#[async_trait::async_trait]
impl SessionApi for HttpSessionClient {
    async fn start_job(&self, request: &JobPayload) -> Result<SessionId, ClientError> {
        grab_debug!(
            "start_job query={:?} count={} min_size={}",
            request.query,
            request.count,
            request.min_size
        );
        let response = self
            .client
            .post(self.endpoint(&["download"]))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let reply: StartReply = match serde_json::from_slice(&bytes) {
            Ok(reply) => reply,
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => return Err(ClientError::Service(format!("server returned {status}"))),
        };

        match reply {
            StartReply {
                success: true,
                session_id: Some(session_id),
                ..
            } => Ok(session_id),
            StartReply { error, .. } => Err(ClientError::Service(
                error.unwrap_or_else(|| "Download failed to start".to_owned()),
            )),
        }
    }

    async fn poll_status(&self, session_id: &str) -> Result<StatusSnapshot, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["status", session_id]))
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let reply: ErrorReply = serde_json::from_slice(&bytes).unwrap_or_default();
            return Err(ClientError::Service(
                reply.error.unwrap_or_else(|| format!("server returned {status}")),
            ));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn artifact_url(&self, session_id: &str) -> Url {
        self.endpoint(&["download", session_id])
    }

    async fn open_folder(&self, session_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["open-folder", session_id]))
            .send()
            .await?;
        let reply: OpenFolderReply = response.json().await.unwrap_or_default();
        if reply.success {
            Ok(())
        } else {
            Err(ClientError::Service(
                reply
                    .message
                    .unwrap_or_else(|| "Could not open folder".to_owned()),
            ))
        }
    }
}

fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_owned())
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']))
}

#[cfg(test)]
mod tests {
    use super::disposition_filename;

    #[test]
    fn filename_is_taken_from_disposition_header() {
        assert_eq!(
            disposition_filename("attachment; filename=\"cats_images.zip\""),
            Some("cats_images.zip".to_owned())
        );
        assert_eq!(
            disposition_filename("attachment; filename=plain.zip"),
            Some("plain.zip".to_owned())
        );
    }

    #[test]
    fn traversal_and_empty_names_are_ignored() {
        assert_eq!(disposition_filename("attachment; filename=\"../x.zip\""), None);
        assert_eq!(disposition_filename("attachment; filename=\"\""), None);
        assert_eq!(disposition_filename("inline"), None);
    }
}
