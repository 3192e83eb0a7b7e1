//! 리비전 상세 뷰 (변경 파일 목록)
//!
//! 키 입력을 액션으로 바꾸고, 파괴적인 작업은 확인 게이트를 거쳐 효과로 내보낸다.

use super::operation::{Effect, Msg, Operation, OperationContext};
use crate::core::actions::{find_action, generate_command_bar_items, Action};
use crate::core::status_parser;
use crate::models::{CheckedItem, Revision, SelectionList};
use crate::system::jj;
use crate::ui::components::{
    compose, CommandItem, ComposedView, ConfirmOption, ConfirmationGate, GateOutcome,
    SelectionHints,
};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent};

const SPLIT_HINTS: SelectionHints = SelectionHints {
    selected: "stays as is",
    unselected: "moves to the new revision",
};
const RESTORE_HINTS: SelectionHints = SelectionHints {
    selected: "gets restored",
    unselected: "stays as is",
};
const ABSORB_HINTS: SelectionHints = SelectionHints {
    selected: "might get absorbed into parents",
    unselected: "stays as is",
};

pub struct DetailsOperation {
    revision: Revision,
    list: SelectionList,
    gate: ConfirmationGate<Effect>,
}

impl DetailsOperation {
    pub fn new(revision: Revision) -> Self {
        Self {
            revision,
            list: SelectionList::new(),
            gate: ConfirmationGate::new(),
        }
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub fn list(&self) -> &SelectionList {
        &self.list
    }

    #[cfg(test)]
    pub fn gate(&self) -> &ConfirmationGate<Effect> {
        &self.gate
    }

    fn checked_item(&self, file: &str) -> CheckedItem {
        CheckedItem::new(
            self.revision.change_id.clone(),
            self.revision.commit_id.clone(),
            file,
        )
    }

    fn load_effect(&self) -> Effect {
        Effect::Load {
            change_id: self.revision.change_id.clone(),
        }
    }

    /// 커서 항목 변경 알림
    fn cursor_changed(&self) -> Vec<Effect> {
        self.list
            .current()
            .map(|item| vec![Effect::SelectedItemChanged(self.checked_item(&item.file_name))])
            .unwrap_or_default()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut OperationContext<'_>) -> Vec<Effect> {
        if self.gate.is_active() {
            return match self.gate.handle_key(key.code) {
                GateOutcome::Triggered(effects) => effects,
                GateOutcome::Cancelled => {
                    log::debug!("confirmation cancelled");
                    Vec::new()
                }
                GateOutcome::Ignored => Vec::new(),
            };
        }

        let Some(action) = find_action(key.modifiers, key.code) else {
            return Vec::new();
        };
        let before = self.list.cursor();
        let mut effects = self.execute(action, ctx);
        if self.list.cursor() != before {
            effects.extend(self.cursor_changed());
        }
        effects
    }

    fn execute(&mut self, action: Action, ctx: &mut OperationContext<'_>) -> Vec<Effect> {
        log::trace!("{}: {}", self.name(), action.label());
        match action {
            Action::MoveUp => {
                self.list.cursor_up();
                Vec::new()
            }
            Action::MoveDown => {
                self.list.cursor_down();
                Vec::new()
            }
            Action::Close => vec![Effect::Close],
            Action::Refresh => vec![self.load_effect()],
            Action::ToggleSelect => self.toggle_select(ctx),
            Action::Diff => self.diff(ctx),
            Action::Split => self.confirm_split(false),
            Action::SplitParallel => self.confirm_split(true),
            Action::Restore => self.confirm_restore(),
            Action::Absorb => self.confirm_absorb(),
            Action::Squash => self.squash(),
            Action::ShowFilesHistory => self.files_history(),
            // 종료는 호스트가 먼저 처리
            Action::Quit => Vec::new(),
        }
    }

    fn toggle_select(&mut self, ctx: &mut OperationContext<'_>) -> Vec<Effect> {
        let Some(file) = self.list.current().map(|item| item.file_name.clone()) else {
            return Vec::new();
        };
        let Some(checked) = self.list.toggle_current_selected() else {
            return Vec::new();
        };

        let item = self.checked_item(&file);
        if checked {
            ctx.registry.add(item);
        } else {
            ctx.registry.remove(&item);
        }
        Vec::new()
    }

    fn diff(&self, ctx: &mut OperationContext<'_>) -> Vec<Effect> {
        let Some(item) = self.list.current() else {
            return Vec::new();
        };
        let command = jj::diff(&self.revision.change_id, &item.file_name);
        match ctx.runner.run_sync(&command) {
            Ok(text) => vec![Effect::ShowDiff {
                title: item.display_name.clone(),
                text,
            }],
            Err(err) => vec![Effect::CommandFailed {
                title: "Diff failed".to_string(),
                output: err.to_string(),
            }],
        }
    }

    fn confirm_split(&mut self, parallel: bool) -> Vec<Effect> {
        let files = self.list.effective_selection();
        let Some(current) = self.list.current().map(|item| item.file_name.clone()) else {
            return Vec::new();
        };
        let change_id = self.revision.change_id.clone();

        let yes = Effect::RunAsync {
            command: jj::split(&change_id, &files, parallel),
            on_success: vec![Effect::Refresh],
        };
        let mut options = vec![yes_option(yes)];
        if !parallel {
            options.push(interactive_option(Effect::RunInteractive {
                command: jj::split_interactive(&change_id, &current),
                on_success: vec![Effect::Refresh],
            }));
        }
        options.push(no_option());

        let prompt = if parallel {
            "Are you sure you want to split the selected files in parallel?"
        } else {
            "Are you sure you want to split the selected files?"
        };
        self.gate.activate(prompt, SPLIT_HINTS, options);
        Vec::new()
    }

    fn confirm_restore(&mut self) -> Vec<Effect> {
        let files = self.list.effective_selection();
        let Some(current) = self.list.current().map(|item| item.file_name.clone()) else {
            return Vec::new();
        };
        let change_id = self.revision.change_id.clone();

        self.gate.activate(
            "Are you sure you want to restore the selected files?",
            RESTORE_HINTS,
            vec![
                yes_option(Effect::RunAsync {
                    command: jj::restore(&change_id, &files),
                    on_success: vec![Effect::Refresh],
                }),
                interactive_option(Effect::RunInteractive {
                    command: jj::restore_interactive(&change_id, &current),
                    on_success: vec![Effect::Refresh],
                }),
                no_option(),
            ],
        );
        Vec::new()
    }

    fn confirm_absorb(&mut self) -> Vec<Effect> {
        let files = self.list.effective_selection();
        if files.is_empty() {
            return Vec::new();
        }

        self.gate.activate(
            "Are you sure you want to absorb changes from the selected files?",
            ABSORB_HINTS,
            vec![
                yes_option(Effect::RunAsync {
                    command: jj::absorb(&self.revision.change_id, &files),
                    on_success: vec![Effect::Refresh],
                }),
                no_option(),
            ],
        );
        Vec::new()
    }

    fn squash(&self) -> Vec<Effect> {
        let files = self.list.effective_selection();
        if files.is_empty() {
            return Vec::new();
        }
        vec![Effect::StartSquash {
            change_id: self.revision.change_id.clone(),
            files,
        }]
    }

    fn files_history(&self) -> Vec<Effect> {
        match self.list.current() {
            Some(item) => vec![
                Effect::Close,
                Effect::UpdateRevset(jj::files_revset(&item.file_name)),
            ],
            None => Vec::new(),
        }
    }

    /// 조회 결과 반영
    ///
    /// 체크 상태는 결과가 도착한 시점의 목록에서 이름으로 옮긴다.
    fn status_loaded(
        &mut self,
        change_id: String,
        summary: &str,
        ctx: &mut OperationContext<'_>,
    ) -> Vec<Effect> {
        if change_id != self.revision.change_id {
            log::info!(
                "discarding status for {} (showing {})",
                change_id,
                self.revision.change_id
            );
            return Vec::new();
        }

        let selected = self.list.checked_names();
        self.list.replace(status_parser::parse(summary), &selected);
        ctx.registry.clear();
        let checked: Vec<CheckedItem> = self
            .list
            .checked_names()
            .iter()
            .map(|name| self.checked_item(name))
            .collect();
        for item in checked {
            ctx.registry.add(item);
        }
        log::debug!("loaded {} files for {}", self.list.len(), change_id);
        self.cursor_changed()
    }
}

fn yes_option(effect: Effect) -> ConfirmOption<Effect> {
    ConfirmOption::new("Yes", vec![KeyCode::Char('y')], "y", vec![effect])
}

fn interactive_option(effect: Effect) -> ConfirmOption<Effect> {
    ConfirmOption::new("Interactive", vec![KeyCode::Char('i')], "i", vec![effect])
}

fn no_option() -> ConfirmOption<Effect> {
    ConfirmOption::new(
        "No",
        vec![KeyCode::Char('n'), KeyCode::Esc],
        "n/esc",
        Vec::new(),
    )
}

impl Operation for DetailsOperation {
    fn init(&mut self) -> Vec<Effect> {
        vec![self.load_effect()]
    }

    fn update(&mut self, msg: Msg, ctx: &mut OperationContext<'_>) -> Vec<Effect> {
        match msg {
            Msg::Key(key) => self.handle_key(key, ctx),
            Msg::Refresh => vec![self.load_effect()],
            Msg::StatusLoaded { change_id, summary } => {
                self.status_loaded(change_id, &summary, ctx)
            }
        }
    }

    fn render(&self, theme: &Theme, total_height: u16) -> ComposedView {
        compose(&self.list, &self.gate, theme, total_height)
    }

    fn name(&self) -> &'static str {
        "details"
    }

    fn is_focused(&self) -> bool {
        true
    }

    fn is_overlay(&self) -> bool {
        self.gate.is_active()
    }

    fn short_help(&self) -> Vec<CommandItem> {
        match self.gate.pending() {
            Some(pending) => pending
                .options
                .iter()
                .map(|option| CommandItem::new(option.help, option.label))
                .collect(),
            None => generate_command_bar_items(),
        }
    }
}
