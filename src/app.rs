use crate::core::actions::{find_action, Action};
use crate::models::{CheckedItems, Revision, SelectionRegistry};
use crate::system::{CommandRunner, JjCommand, JjRunner, TaskQueue, TaskRunner};
use crate::ui::components::dialog::diff_viewport_height;
use crate::ui::components::{CommandItem, ComposedView};
use crate::ui::{DialogKind, LayoutManager, LayoutMode, Theme, ThemeManager};
use crate::utils::error::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod controllers;
mod details;
mod operation;

pub use details::DetailsOperation;
pub use operation::{Effect, Msg, Operation, OperationContext};

/// 메인 루프에서 처리할 대화형 명령 요청
///
/// 터미널을 잠시 넘겨줘야 하므로 `main`이 꺼내서 실행한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveRequest {
    pub command: JjCommand,
    pub on_success: Vec<Effect>,
}

/// 종료 후 다른 뷰로 넘길 작업
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitHandoff {
    /// 스쿼시 명령 (대상 리비전 선택은 받는 쪽 몫)
    Squash(JjCommand),
    /// 리비전 목록에 적용할 revset
    Revset(String),
}

impl ExitHandoff {
    /// 표준 출력으로 내보낼 텍스트
    pub fn output(&self) -> String {
        match self {
            ExitHandoff::Squash(command) => command.display(),
            ExitHandoff::Revset(revset) => revset.clone(),
        }
    }
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 현재 표시 중인 다이얼로그 (에러/메시지/diff)
    pub dialog: Option<DialogKind>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
    operation: DetailsOperation,
    registry: CheckedItems,
    runner: Box<dyn CommandRunner>,
    tasks: Box<dyn TaskQueue<Effect>>,
    pending_interactive: Option<InteractiveRequest>,
    handoff: Option<ExitHandoff>,
    repository: Option<PathBuf>,
}

impl App {
    const TOAST_SECS: u64 = 3;

    pub fn new(revision: Revision, runner: JjRunner, theme_manager: ThemeManager) -> Result<Self> {
        let repository = runner.repository().cloned();
        let tasks = TaskRunner::new(runner.clone())?;
        let mut app = Self::with_parts(revision, Box::new(runner), Box::new(tasks));
        app.theme_manager = theme_manager;
        app.repository = repository;
        app.start();
        Ok(app)
    }

    fn with_parts(
        revision: Revision,
        runner: Box<dyn CommandRunner>,
        tasks: Box<dyn TaskQueue<Effect>>,
    ) -> Self {
        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager: ThemeManager::new(),
            dialog: None,
            toast_message: None,
            operation: DetailsOperation::new(revision),
            registry: CheckedItems::new(),
            runner,
            tasks,
            pending_interactive: None,
            handoff: None,
            repository: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(
        revision: Revision,
        runner: Box<dyn CommandRunner>,
        tasks: Box<dyn TaskQueue<Effect>>,
    ) -> Self {
        let mut app = Self::with_parts(revision, runner, tasks);
        app.start();
        app
    }

    /// 첫 조회 시작
    fn start(&mut self) {
        let effects = self.operation.init();
        self.apply_effects(effects);
    }

    /// 종료
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn operation(&self) -> &DetailsOperation {
        &self.operation
    }

    #[cfg(test)]
    pub fn registry(&self) -> &CheckedItems {
        &self.registry
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn repository(&self) -> Option<&Path> {
        self.repository.as_deref()
    }

    #[cfg(test)]
    pub fn handoff(&self) -> Option<&ExitHandoff> {
        self.handoff.as_ref()
    }

    pub fn take_handoff(&mut self) -> Option<ExitHandoff> {
        self.handoff.take()
    }

    /// 백그라운드 작업 실행 중 여부
    pub fn is_busy(&self) -> bool {
        self.tasks.in_flight() > 0
    }

    /// 레이아웃 모드 반환
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    pub fn theme(&self) -> &Theme {
        self.theme_manager.current()
    }

    /// 다이얼로그 활성 여부
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// diff 뷰어 한 화면 줄 수
    pub fn diff_viewport(&self) -> usize {
        let (width, height) = self.layout.terminal_size();
        diff_viewport_height(Rect::new(0, 0, width, height))
    }

    /// 키 입력 처리: 전역 종료 → 다이얼로그 → 오퍼레이션
    pub fn handle_key(&mut self, key: KeyEvent) {
        if find_action(key.modifiers, key.code) == Some(Action::Quit) {
            self.quit();
            return;
        }
        if self.is_dialog_active() {
            controllers::dialog_controller::handle_key(self, key.code);
            return;
        }
        if self.operation.is_focused() {
            self.dispatch(Msg::Key(key));
        }
    }

    /// 오퍼레이션에 메시지를 전달하고 결과 효과 적용
    pub fn dispatch(&mut self, msg: Msg) {
        let effects = self.update_operation(msg);
        self.apply_effects(effects);
    }

    fn update_operation(&mut self, msg: Msg) -> Vec<Effect> {
        let mut ctx = OperationContext {
            runner: self.runner.as_ref(),
            registry: &mut self.registry,
        };
        self.operation.update(msg, &mut ctx)
    }

    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        controllers::operation_controller::apply(self, effects);
    }

    /// 완료된 백그라운드 작업 결과 반영
    pub fn poll_tasks(&mut self) {
        for outcome in self.tasks.drain() {
            controllers::operation_controller::handle_outcome(self, outcome);
        }
    }

    pub fn take_pending_interactive(&mut self) -> Option<InteractiveRequest> {
        self.pending_interactive.take()
    }

    /// 대화형 명령 종료 후 처리
    pub fn finish_interactive(&mut self, request: InteractiveRequest, result: Result<()>) {
        match result {
            Ok(()) => {
                self.set_toast(&format!("jj {} finished", request.command.subcommand()));
                self.apply_effects(request.on_success);
            }
            Err(err) => {
                log::warn!("interactive command failed: {}", err);
                self.dialog = Some(DialogKind::error(
                    format!("jj {} failed", request.command.subcommand()),
                    err.to_string(),
                ));
            }
        }
    }

    /// 본문 합성
    pub fn render_body(&self, total_height: u16) -> ComposedView {
        self.operation.render(self.theme(), total_height)
    }

    /// 커맨드 바 항목
    pub fn short_help(&self) -> Vec<CommandItem> {
        self.operation.short_help()
    }

    pub fn checked_count(&self) -> usize {
        self.registry.checked().len()
    }

    /// 커서가 가리키는 파일 (레지스트리 기준)
    pub fn current_file(&self) -> Option<&str> {
        self.registry.selected().map(|item| item.file.as_str())
    }

    /// 확인 프롬프트 표시 중 여부
    pub fn is_confirming(&self) -> bool {
        self.operation.is_overlay()
    }

    /// 토스트 메시지 설정
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= Self::TOAST_SECS {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 가져오기 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed().as_secs() < Self::TOAST_SECS {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }
}
