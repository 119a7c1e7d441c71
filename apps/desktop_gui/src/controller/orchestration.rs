//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::AppState;

pub const QUEUE_FULL_MESSAGE: &str = "UI command queue is full; please retry";
pub const BACKEND_DISCONNECTED_MESSAGE: &str =
    "Backend command processor disconnected (possible startup/runtime failure)";

/// Queues `cmd` for the backend. A command that cannot be queued is folded
/// back into `state` as a failed result, so nothing is silently lost.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    state: &mut AppState,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            state.command_undeliverable(cmd, QUEUE_FULL_MESSAGE.to_string());
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "backend command queue disconnected");
            state.command_undeliverable(cmd, BACKEND_DISCONNECTED_MESSAGE.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    use crate::controller::reducer::ViewKind;

    #[test]
    fn queued_command_reaches_backend_receiver() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        let (mut state, cmd) = AppState::new(ViewKind::Card);
        dispatch_backend_command(&cmd_tx, cmd, &mut state);
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::LoadEmployees { .. })
        ));
        assert!(state.view.fetch.is_loading());
    }

    #[test]
    fn disconnected_backend_fails_the_initial_load() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        drop(cmd_rx);
        let (mut state, cmd) = AppState::new(ViewKind::Card);
        dispatch_backend_command(&cmd_tx, cmd, &mut state);
        assert!(state
            .view
            .fetch
            .error()
            .is_some_and(|message| message.contains(BACKEND_DISCONNECTED_MESSAGE)));
    }

    #[test]
    fn full_queue_fails_the_load_without_blocking() {
        let (cmd_tx, _cmd_rx) = bounded::<BackendCommand>(1);
        let (mut state, first) = AppState::new(ViewKind::Table);
        cmd_tx.try_send(first).expect("room for one");
        let second = state.reload();
        dispatch_backend_command(&cmd_tx, second, &mut state);
        assert!(state
            .view
            .fetch
            .error()
            .is_some_and(|message| message.contains(QUEUE_FULL_MESSAGE)));
    }
}
