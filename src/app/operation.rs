//! 오퍼레이션 인터페이스
//!
//! 오퍼레이션은 메시지를 받아 상태를 바꾸고, 바깥에서 처리할 효과를 데이터로 돌려준다.
//! 프로세스 실행, 다이얼로그 표시, 종료 같은 부수 효과는 호스트(`App`)가 적용한다.

use crate::models::{CheckedItem, SelectionRegistry};
use crate::system::{CommandRunner, JjCommand};
use crate::ui::components::{CommandItem, ComposedView};
use crate::ui::Theme;
use crossterm::event::KeyEvent;

/// 호스트가 적용할 효과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// 스냅샷 + 상태 조회 (백그라운드)
    Load { change_id: String },
    /// 백그라운드 실행, 성공 시 `on_success` 적용
    RunAsync {
        command: JjCommand,
        on_success: Vec<Effect>,
    },
    /// 터미널을 넘겨주고 실행, 성공 시 `on_success` 적용
    RunInteractive {
        command: JjCommand,
        on_success: Vec<Effect>,
    },
    ShowDiff {
        title: String,
        text: String,
    },
    /// 커서 항목 변경 알림 (다른 뷰 동기화용)
    SelectedItemChanged(CheckedItem),
    /// 뷰 닫기
    Close,
    /// 전체 재조회 요청
    Refresh,
    /// 스쿼시 작업으로 인계
    StartSquash {
        change_id: String,
        files: Vec<String>,
    },
    /// 리비전 목록의 revset 교체
    UpdateRevset(String),
    CommandFailed {
        title: String,
        output: String,
    },
}

/// 오퍼레이션 입력 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Key(KeyEvent),
    Refresh,
    /// 백그라운드 조회 결과 (요청 당시 change id 태그)
    StatusLoaded { change_id: String, summary: String },
}

/// 오퍼레이션에 주입되는 협력자
pub struct OperationContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub registry: &'a mut dyn SelectionRegistry,
}

pub trait Operation {
    /// 활성화 시 첫 효과 (보통 조회)
    fn init(&mut self) -> Vec<Effect>;
    fn update(&mut self, msg: Msg, ctx: &mut OperationContext<'_>) -> Vec<Effect>;
    fn render(&self, theme: &Theme, total_height: u16) -> ComposedView;
    fn name(&self) -> &'static str;
    fn is_focused(&self) -> bool;
    /// 확인 오버레이처럼 입력을 가로채는 상태인지
    fn is_overlay(&self) -> bool;
    fn short_help(&self) -> Vec<CommandItem>;
}
