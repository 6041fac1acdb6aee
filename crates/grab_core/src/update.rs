use crate::{form, AppState, BannerKind, Effect, JobStatus, Msg, PollerState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryEdited(text) => {
            state.form.query = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::CountEdited(raw) => {
            state.form.count = form::clamp_count(&raw);
            state.mark_dirty();
            Vec::new()
        }
        Msg::MinSizeSelected(value) => {
            state.form.min_size = value;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitPressed => {
            // One session at a time: a second start while one is underway is
            // rejected rather than silently replacing the live session.
            if state.pending.is_some() || state.poller == PollerState::Active {
                state.set_banner(BannerKind::Error, "A download is already in progress");
                return (state, Vec::new());
            }
            match form::validate(&state.form) {
                Ok(request) => {
                    state.pending = Some(request.clone());
                    state.mark_dirty();
                    vec![Effect::StartJob(request)]
                }
                Err(err) => {
                    // Blocked before any network call is made.
                    state.set_banner(BannerKind::Error, err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::JobStarted { session_id } => {
            let Some(request) = state.pending.take() else {
                // A reset beat the response; the session is not ours anymore.
                return (state, Vec::new());
            };
            state.session = Some(session_id);
            state.snapshot = None;
            state.poll_in_flight = false;
            state.poller = PollerState::Active;
            let seq = state.set_banner(
                BannerKind::Success,
                format!(
                    "Started downloading {} images for \"{}\"",
                    request.count, request.query
                ),
            );
            vec![Effect::ArmTimer, Effect::DismissBannerLater { seq }]
        }
        Msg::JobStartFailed { message } => {
            if state.pending.take().is_none() {
                return (state, Vec::new());
            }
            state.set_banner(BannerKind::Error, message);
            Vec::new()
        }
        Msg::PollTimerFired => {
            if state.poller != PollerState::Active || state.poll_in_flight {
                return (state, Vec::new());
            }
            match &state.session {
                Some(session_id) => {
                    state.poll_in_flight = true;
                    vec![Effect::PollStatus(session_id.clone())]
                }
                None => Vec::new(),
            }
        }
        Msg::PollArrived {
            session_id,
            snapshot,
        } => {
            if state.session.as_ref() != Some(&session_id) {
                // Late reply for a session that was reset or replaced.
                return (state, Vec::new());
            }
            state.poll_in_flight = false;
            if state.poller != PollerState::Active {
                return (state, Vec::new());
            }
            let status = snapshot.status;
            let message = snapshot.message.clone();
            state.snapshot = Some(snapshot);
            state.mark_dirty();
            if !status.is_terminal() {
                return (state, Vec::new());
            }
            state.poller = PollerState::Stopped;
            let mut effects = vec![Effect::DisarmTimer];
            if status == JobStatus::Completed {
                let seq = state.set_banner(BannerKind::Success, message);
                effects.push(Effect::DismissBannerLater { seq });
            } else {
                state.set_banner(BannerKind::Error, message);
            }
            effects
        }
        Msg::PollFailed { session_id } => {
            // Skip this tick; the loop retries at the next one.
            if state.session.as_ref() == Some(&session_id) {
                state.poll_in_flight = false;
            }
            Vec::new()
        }
        Msg::ArtifactRequested => {
            let completed = matches!(
                state.snapshot.as_ref().map(|s| s.status),
                Some(JobStatus::Completed)
            );
            match &state.session {
                Some(session_id) if completed => vec![Effect::FetchArtifact(session_id.clone())],
                _ => Vec::new(),
            }
        }
        Msg::ArtifactSaved { path } => {
            let seq = state.set_banner(BannerKind::Success, format!("Saved {path}"));
            vec![Effect::DismissBannerLater { seq }]
        }
        Msg::ArtifactFailed { message } => {
            state.set_banner(BannerKind::Error, message);
            Vec::new()
        }
        Msg::OpenFolderRequested => match &state.session {
            Some(session_id) => vec![Effect::OpenFolder(session_id.clone())],
            None => Vec::new(),
        },
        Msg::OpenFolderFailed => {
            state.set_banner(BannerKind::Error, "Could not open folder");
            Vec::new()
        }
        Msg::BannerExpired { seq } => {
            // Only the banner this dismiss was scheduled for; a newer one
            // stays up for its own lifetime.
            if state.banner.as_ref().is_some_and(|b| b.seq == seq) {
                state.banner = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResetPressed => {
            let mut effects = Vec::new();
            if state.poller == PollerState::Active {
                effects.push(Effect::DisarmTimer);
            }
            state.form = Default::default();
            state.pending = None;
            state.session = None;
            state.snapshot = None;
            state.poll_in_flight = false;
            state.poller = PollerState::Idle;
            state.banner = None;
            state.mark_dirty();
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
