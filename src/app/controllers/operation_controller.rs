use super::super::*;
use crate::system::{jj, Task, TaskOutcome};
use std::collections::VecDeque;

/// 효과 적용
///
/// `Refresh`처럼 오퍼레이션을 다시 거치는 효과는 후속 효과를 큐 뒤에 붙인다.
pub(in crate::app) fn apply(app: &mut App, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();

    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::Load { change_id } => app.tasks.spawn(Task::Load { change_id }),
            Effect::RunAsync {
                command,
                on_success,
            } => {
                app.set_toast(&format!("Running {}", command.display()));
                app.tasks.spawn(Task::Command {
                    command,
                    on_success,
                });
            }
            Effect::RunInteractive {
                command,
                on_success,
            } => {
                if app.pending_interactive.is_some() {
                    log::warn!("replacing pending interactive command");
                }
                app.pending_interactive = Some(InteractiveRequest {
                    command,
                    on_success,
                });
            }
            Effect::ShowDiff { title, text } => {
                app.dialog = Some(DialogKind::diff(title, &text));
            }
            Effect::SelectedItemChanged(item) => app.registry.set_selected(item),
            Effect::Close => app.quit(),
            Effect::Refresh => queue.extend(app.update_operation(Msg::Refresh)),
            Effect::StartSquash { change_id, files } => {
                log::info!("handing off squash of {} files from {}", files.len(), change_id);
                app.handoff = Some(ExitHandoff::Squash(jj::squash(&change_id, &files)));
                app.quit();
            }
            Effect::UpdateRevset(revset) => {
                app.handoff = Some(ExitHandoff::Revset(revset));
            }
            Effect::CommandFailed { title, output } => {
                app.dialog = Some(DialogKind::error(title, output));
            }
        }
    }
}

/// 백그라운드 작업 결과 처리
pub(in crate::app) fn handle_outcome(app: &mut App, outcome: TaskOutcome<Effect>) {
    match outcome {
        TaskOutcome::StatusLoaded { change_id, summary } => {
            app.dispatch(Msg::StatusLoaded { change_id, summary })
        }
        TaskOutcome::LoadFailed { change_id, error } => {
            if change_id != app.operation.revision().change_id {
                log::info!("ignoring failed load for stale revision {}", change_id);
                return;
            }
            log::warn!("failed to load {}: {}", change_id, error);
            // 기존 목록은 그대로 두고 다시 시도할 수 있게 한다
            app.dialog = Some(DialogKind::error("Failed to load changes", error.to_string()));
        }
        TaskOutcome::CommandSucceeded {
            command,
            on_success,
        } => {
            app.set_toast(&format!("jj {} finished", command.subcommand()));
            apply(app, on_success);
        }
        TaskOutcome::CommandFailed { command, error } => {
            log::warn!("{} failed: {}", command.display(), error);
            app.dialog = Some(DialogKind::error(
                format!("jj {} failed", command.subcommand()),
                error.to_string(),
            ));
        }
    }
}
