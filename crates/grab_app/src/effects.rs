use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use grab_client::{HttpSessionClient, JobPayload, SessionApi};
use grab_core::{Effect, JobStatus, Msg, Snapshot};
use grab_logging::{grab_info, grab_warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const POLL_PERIOD: Duration = Duration::from_secs(1);
const BANNER_LIFETIME: Duration = Duration::from_secs(5);

/// Executes the effects the core requests, reporting outcomes back as
/// messages. Owns the poll timer, the single cancellable resource.
pub struct EffectRunner {
    api: Arc<HttpSessionClient>,
    msg_tx: UnboundedSender<Msg>,
    output_dir: PathBuf,
    poll_timer: Option<JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<HttpSessionClient>,
        msg_tx: UnboundedSender<Msg>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            msg_tx,
            output_dir,
            poll_timer: None,
        }
    }

    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::StartJob(request) => {
                grab_info!(
                    "StartJob query={:?} count={} min_size={}",
                    request.query,
                    request.count,
                    request.min_size
                );
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                let payload = JobPayload {
                    query: request.query,
                    count: request.count,
                    min_size: request.min_size,
                };
                tokio::spawn(async move {
                    let msg = match api.start_job(&payload).await {
                        Ok(session_id) => Msg::JobStarted { session_id },
                        Err(err) => Msg::JobStartFailed {
                            message: err.to_string(),
                        },
                    };
                    let _ = tx.send(msg);
                });
            }
            Effect::PollStatus(session_id) => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match api.poll_status(&session_id).await {
                        Ok(snapshot) => Msg::PollArrived {
                            session_id,
                            snapshot: map_snapshot(snapshot),
                        },
                        Err(err) => {
                            // Skipped tick; the poller retries next period.
                            grab_warn!("Status check for session {} failed: {}", session_id, err);
                            Msg::PollFailed { session_id }
                        }
                    };
                    let _ = tx.send(msg);
                });
            }
            Effect::ArmTimer => {
                if self.poll_timer.is_some() {
                    return;
                }
                let tx = self.msg_tx.clone();
                self.poll_timer = Some(tokio::spawn(async move {
                    let mut interval = tokio::time::interval(POLL_PERIOD);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    // The first tick of a tokio interval fires immediately.
                    interval.tick().await;
                    loop {
                        interval.tick().await;
                        if tx.send(Msg::PollTimerFired).is_err() {
                            break;
                        }
                    }
                }));
            }
            Effect::DisarmTimer => {
                // take() guarantees the handle is cleared exactly once.
                if let Some(handle) = self.poll_timer.take() {
                    handle.abort();
                }
            }
            Effect::FetchArtifact(session_id) => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                let dir = self.output_dir.clone();
                tokio::spawn(async move {
                    let msg = match api.download_artifact(&session_id, &dir).await {
                        Ok(path) => Msg::ArtifactSaved {
                            path: path.display().to_string(),
                        },
                        Err(err) => Msg::ArtifactFailed {
                            message: format!("Error downloading ZIP file: {err}"),
                        },
                    };
                    let _ = tx.send(msg);
                });
            }
            Effect::OpenFolder(session_id) => {
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = api.open_folder(&session_id).await {
                        grab_warn!("Open folder for session {} failed: {}", session_id, err);
                        let _ = tx.send(Msg::OpenFolderFailed);
                    }
                });
            }
            Effect::DismissBannerLater { seq } => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(BANNER_LIFETIME).await;
                    let _ = tx.send(Msg::BannerExpired { seq });
                });
            }
        }
    }
}

fn map_snapshot(snapshot: grab_client::StatusSnapshot) -> Snapshot {
    Snapshot {
        status: map_status(snapshot.status),
        progress: snapshot.progress,
        total: snapshot.total,
        downloaded: snapshot.downloaded,
        failed: snapshot.failed,
        message: snapshot.message,
    }
}

fn map_status(status: grab_client::JobStatus) -> JobStatus {
    match status {
        grab_client::JobStatus::Pending => JobStatus::Pending,
        grab_client::JobStatus::Running => JobStatus::Running,
        grab_client::JobStatus::Completed => JobStatus::Completed,
        grab_client::JobStatus::Failed => JobStatus::Failed,
    }
}
