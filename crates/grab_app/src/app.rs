use std::sync::Arc;

use anyhow::bail;
use grab_client::{ClientSettings, HttpSessionClient};
use grab_core::{update, AppState, Msg, PollerState};
use grab_logging::grab_info;
use tokio::sync::mpsc;

use crate::cli::Cli;
use crate::effects::EffectRunner;
use crate::render::Renderer;

/// Drives one download session: seeds the form from the command line,
/// submits it, then loops over messages until the session settles or the
/// user interrupts.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let api = Arc::new(HttpSessionClient::new(ClientSettings::new(
        cli.server.clone(),
    ))?);
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
    let mut runner = EffectRunner::new(api, msg_tx.clone(), cli.output.clone());
    let mut renderer = Renderer::new();
    let mut state = AppState::new();

    for msg in [
        Msg::QueryEdited(cli.query.clone()),
        Msg::CountEdited(cli.count.clone()),
        Msg::MinSizeSelected(cli.min_size.clone()),
        Msg::SubmitPressed,
    ] {
        dispatch(&mut state, msg, &mut runner, &mut renderer);
    }
    if state.view().submit_enabled {
        // Validation rejected the submission; the banner holds the reason.
        bail!(banner_text(&state, "invalid input"));
    }

    let mut artifact_requested = false;
    loop {
        tokio::select! {
            maybe_msg = msg_rx.recv() => {
                let Some(msg) = maybe_msg else { break };
                let settled = match &msg {
                    Msg::ArtifactSaved { .. } => Some(Ok(())),
                    Msg::ArtifactFailed { message } => Some(Err(message.clone())),
                    Msg::JobStartFailed { message } => Some(Err(message.clone())),
                    _ => None,
                };
                dispatch(&mut state, msg, &mut runner, &mut renderer);
                if let Some(result) = settled {
                    return result.map_err(|message| anyhow::anyhow!(message));
                }

                if state.poller() == PollerState::Stopped {
                    let completed = state
                        .view()
                        .progress
                        .as_ref()
                        .is_some_and(|progress| progress.artifact_ready);
                    if completed && !artifact_requested {
                        artifact_requested = true;
                        // The CLI is its own browser: retrieve the artifact
                        // as soon as the session completes.
                        dispatch(&mut state, Msg::ArtifactRequested, &mut runner, &mut renderer);
                        if cli.open_folder {
                            dispatch(
                                &mut state,
                                Msg::OpenFolderRequested,
                                &mut runner,
                                &mut renderer,
                            );
                        }
                    } else if !completed {
                        bail!(banner_text(&state, "download failed"));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                grab_info!("Interrupted; resetting session");
                dispatch(&mut state, Msg::ResetPressed, &mut runner, &mut renderer);
                break;
            }
        }
    }

    Ok(())
}

/// One turn of the state machine: update, render if anything visible
/// changed, then hand the effects to the runner.
fn dispatch(state: &mut AppState, msg: Msg, runner: &mut EffectRunner, renderer: &mut Renderer) {
    let current = std::mem::take(state);
    let (mut next, effects) = update(current, msg);
    if next.consume_dirty() {
        renderer.apply(&next.view());
    }
    *state = next;
    for effect in effects {
        runner.run(effect);
    }
}

fn banner_text(state: &AppState, fallback: &str) -> String {
    state
        .view()
        .banner
        .map(|banner| banner.text)
        .unwrap_or_else(|| fallback.to_owned())
}
