#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query field.
    QueryEdited(String),
    /// User edited the count field (raw text, clamped live).
    CountEdited(String),
    /// User picked a minimum-size option.
    MinSizeSelected(String),
    /// User pressed the submit control.
    SubmitPressed,
    /// Job-start request succeeded.
    JobStarted { session_id: crate::SessionId },
    /// Job-start request failed (transport or service error).
    JobStartFailed { message: String },
    /// The 1-second poll timer fired.
    PollTimerFired,
    /// A status poll came back for the named session.
    PollArrived {
        session_id: crate::SessionId,
        snapshot: crate::Snapshot,
    },
    /// A status poll failed; the tick is skipped and polling continues.
    PollFailed { session_id: crate::SessionId },
    /// User asked for the packaged artifact.
    ArtifactRequested,
    /// The artifact was saved locally.
    ArtifactSaved { path: String },
    /// The artifact retrieval failed.
    ArtifactFailed { message: String },
    /// User asked to open the download folder on the server side.
    OpenFolderRequested,
    /// The open-folder request failed (best-effort, non-fatal).
    OpenFolderFailed,
    /// A scheduled banner dismiss fired.
    BannerExpired { seq: u64 },
    /// User pressed the reset ("new download") control.
    ResetPressed,
    /// Fallback for placeholder wiring.
    NoOp,
}
