use crate::form::JobRequest;
use crate::state::SessionId;

/// IO requested by [`crate::update`]; executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the job-start request.
    StartJob(JobRequest),
    /// Issue one status poll for the session.
    PollStatus(SessionId),
    /// Start the recurring 1-second poll timer.
    ArmTimer,
    /// Cancel the poll timer. Emitted exactly once per Active poller.
    DisarmTimer,
    /// Retrieve the packaged artifact for a completed session.
    FetchArtifact(SessionId),
    /// Best-effort request to open the server-side folder.
    OpenFolder(SessionId),
    /// Dismiss the banner with this sequence number after 5 seconds.
    DismissBannerLater { seq: u64 },
}
