//! Grab core: pure session state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{
    clamp_count, validate, JobRequest, ValidationError, COUNT_MAX, COUNT_MIN, DEFAULT_COUNT,
    DEFAULT_MIN_SIZE,
};
pub use msg::Msg;
pub use state::{
    AppState, Banner, BannerKind, FormState, JobStatus, PollerState, SessionId, Snapshot,
};
pub use update::update;
pub use view_model::{AppViewModel, BannerView, ProgressView};
