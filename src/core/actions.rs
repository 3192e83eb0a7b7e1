//! 액션 시스템: 키 바인딩과 커맨드바의 단일 진실 원천
//!
//! 상세 뷰의 모든 키 바인딩과 커맨드바 항목이
//! 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 상세 뷰에서 가능한 모든 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    // View
    Close,
    Refresh,
    Diff,
    // Selection
    ToggleSelect,
    // Revision operations
    Split,
    SplitParallel,
    Squash,
    Restore,
    Absorb,
    ShowFilesHistory,
    // System
    Quit,
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub label: &'static str,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    ActionDef {
        action: Action::MoveUp,
        label: "Move up",
        command_bar: Some(CommandBarEntry {
            key: "j/k",
            label: "Move",
            priority: 90,
        }),
    },
    ActionDef {
        action: Action::MoveDown,
        label: "Move down",
        command_bar: None,
    },
    ActionDef {
        action: Action::Close,
        label: "Close",
        command_bar: Some(CommandBarEntry {
            key: "esc",
            label: "Close",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::Refresh,
        label: "Refresh",
        command_bar: None,
    },
    ActionDef {
        action: Action::Diff,
        label: "Diff",
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "Diff",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::ToggleSelect,
        label: "Select",
        command_bar: Some(CommandBarEntry {
            key: "space/m",
            label: "Select",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::Split,
        label: "Split",
        command_bar: Some(CommandBarEntry {
            key: "s",
            label: "Split",
            priority: 40,
        }),
    },
    ActionDef {
        action: Action::SplitParallel,
        label: "Split parallel",
        command_bar: Some(CommandBarEntry {
            key: "S",
            label: "Split parallel",
            priority: 41,
        }),
    },
    ActionDef {
        action: Action::Squash,
        label: "Squash",
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Squash",
            priority: 50,
        }),
    },
    ActionDef {
        action: Action::Restore,
        label: "Restore",
        command_bar: Some(CommandBarEntry {
            key: "r",
            label: "Restore",
            priority: 60,
        }),
    },
    ActionDef {
        action: Action::Absorb,
        label: "Absorb",
        command_bar: Some(CommandBarEntry {
            key: "A",
            label: "Absorb",
            priority: 70,
        }),
    },
    ActionDef {
        action: Action::ShowFilesHistory,
        label: "Revisions changing file",
        command_bar: Some(CommandBarEntry {
            key: "*",
            label: "History",
            priority: 80,
        }),
    },
    ActionDef {
        action: Action::Quit,
        label: "Quit",
        command_bar: None,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Esc,
            modifiers: None,
            action: Action::Close,
        },
        KeyBinding {
            code: KeyCode::Char('h'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Close,
        },
        // 탐색
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Diff,
        },
        // 선택
        KeyBinding {
            code: KeyCode::Char(' '),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ToggleSelect,
        },
        KeyBinding {
            code: KeyCode::Char('m'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ToggleSelect,
        },
        // 리비전 조작 (대문자는 SHIFT 유무와 무관하게 매칭)
        KeyBinding {
            code: KeyCode::Char('s'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Split,
        },
        KeyBinding {
            code: KeyCode::Char('S'),
            modifiers: None,
            action: Action::SplitParallel,
        },
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Squash,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Restore,
        },
        KeyBinding {
            code: KeyCode::Char('A'),
            modifiers: None,
            action: Action::Absorb,
        },
        KeyBinding {
            code: KeyCode::Char('*'),
            modifiers: None,
            action: Action::ShowFilesHistory,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    for binding in key_bindings() {
        let code_matches = binding.code == code;
        let mod_matches = match binding.modifiers {
            None => true, // any modifier
            Some(required) => modifiers == required,
        };
        if code_matches && mod_matches {
            return Some(binding.action);
        }
    }
    None
}

impl Action {
    /// 액션 레이블
    pub fn label(&self) -> &'static str {
        ACTION_DEFS
            .iter()
            .find(|d| d.action == *self)
            .map(|d| d.label)
            .unwrap_or("")
    }
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}
