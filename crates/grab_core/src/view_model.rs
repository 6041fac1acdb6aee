use crate::state::{BannerKind, FormState};

/// Everything the renderer needs, derived from [`crate::AppState`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub form: FormState,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    /// Present while a session exists; removed on reset.
    pub progress: Option<ProgressView>,
    pub banner: Option<BannerView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Fill percentage; 0 when the total is still unknown.
    pub percent: f64,
    pub text: String,
    /// The artifact control is revealed only for completed sessions.
    pub artifact_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub text: String,
}
