use colored::Colorize;
use grab_core::{AppViewModel, BannerKind};
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal presentation of the session view model: an indicatif progress
/// bar plus banner lines printed above it.
pub struct Renderer {
    bar: Option<ProgressBar>,
    last_banner: Option<(BannerKind, String)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            bar: None,
            last_banner: None,
        }
    }

    /// Applies a view model to the terminal. Safe to call repeatedly with
    /// unchanged views; only differences produce output.
    pub fn apply(&mut self, view: &AppViewModel) {
        match &view.progress {
            Some(progress) => {
                let bar = self.bar.get_or_insert_with(new_bar);
                bar.set_position(progress.percent.round() as u64);
                bar.set_message(progress.text.clone());
            }
            None => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
        }

        let banner = view
            .banner
            .as_ref()
            .map(|banner| (banner.kind, banner.text.clone()));
        if banner != self.last_banner {
            if let Some((kind, text)) = &banner {
                let line = match kind {
                    BannerKind::Success => text.green().to_string(),
                    BannerKind::Error => text.red().bold().to_string(),
                };
                self.println(line);
            }
            self.last_banner = banner;
        }
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {percent:>3}% {msg}") {
        bar.set_style(style);
    }
    bar
}
