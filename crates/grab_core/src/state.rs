use crate::form::{JobRequest, DEFAULT_COUNT, DEFAULT_MIN_SIZE};
use crate::view_model::{AppViewModel, BannerView, ProgressView};

/// Opaque session identifier assigned by the remote service.
pub type SessionId = String;

/// The poller's explicit lifecycle. The timer is armed only in `Active` and
/// must be disarmed exactly once on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Active,
    Stopped,
}

/// Job status as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Once a terminal status is observed, polling stops.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One status poll result. Superseded by the next poll; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: JobStatus,
    pub progress: u32,
    pub total: u32,
    pub downloaded: u32,
    pub failed: u32,
    pub message: String,
}

/// Raw form fields as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub query: String,
    pub count: String,
    pub min_size: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            query: String::new(),
            count: DEFAULT_COUNT.to_owned(),
            min_size: DEFAULT_MIN_SIZE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// The single transient status message. The sequence number lets a delayed
/// dismiss timer recognize that a newer banner has replaced the one it was
/// scheduled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    pub seq: u64,
}

/// Whole-app state: the form, the single-session cell, and the poller
/// machine. All mutation goes through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) form: FormState,
    /// Set while a job-start request is outstanding; doubles as the source
    /// of the "started" banner text.
    pub(crate) pending: Option<JobRequest>,
    pub(crate) session: Option<SessionId>,
    pub(crate) snapshot: Option<Snapshot>,
    pub(crate) poller: PollerState,
    /// Reentrancy guard: a tick is skipped while a poll is outstanding.
    pub(crate) poll_in_flight: bool,
    pub(crate) banner: Option<Banner>,
    pub(crate) banner_seq: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poller(&self) -> PollerState {
        self.poller
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// Returns whether the state changed visibly since the last call, and
    /// clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.pending.is_some() || self.poller == PollerState::Active;
        AppViewModel {
            form: self.form.clone(),
            submit_enabled: !busy,
            submit_label: if busy { "Starting..." } else { "Start Download" },
            progress: self.session.as_ref().map(|_| self.progress_view()),
            banner: self.banner.as_ref().map(|banner| BannerView {
                kind: banner.kind,
                text: banner.text.clone(),
            }),
        }
    }

    fn progress_view(&self) -> ProgressView {
        match &self.snapshot {
            Some(snapshot) => ProgressView {
                percent: percent(snapshot.progress, snapshot.total),
                text: progress_text(snapshot),
                artifact_ready: snapshot.status == JobStatus::Completed,
            },
            None => ProgressView {
                percent: 0.0,
                text: "Initializing...".to_owned(),
                artifact_ready: false,
            },
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Installs a banner, replacing any prior one, and returns its sequence
    /// number for dismiss scheduling.
    pub(crate) fn set_banner(&mut self, kind: BannerKind, text: impl Into<String>) -> u64 {
        self.banner_seq += 1;
        self.banner = Some(Banner {
            kind,
            text: text.into(),
            seq: self.banner_seq,
        });
        self.dirty = true;
        self.banner_seq
    }
}

fn percent(progress: u32, total: u32) -> f64 {
    if total > 0 {
        f64::from(progress) / f64::from(total) * 100.0
    } else {
        0.0
    }
}

fn progress_text(snapshot: &Snapshot) -> String {
    let mut text = if snapshot.message.is_empty() {
        "Processing...".to_owned()
    } else {
        snapshot.message.clone()
    };
    if snapshot.total > 0 {
        text.push_str(&format!(
            " ({}/{} downloaded",
            snapshot.downloaded, snapshot.total
        ));
        if snapshot.failed > 0 {
            text.push_str(&format!(", {} failed", snapshot.failed));
        }
        text.push(')');
    }
    text
}
