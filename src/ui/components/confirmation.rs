// Confirmation gate - 확인 오버레이
//
// 활성 상태에서는 모든 키 입력을 옵션 바인딩에만 매칭한다.
// 옵션에 없는 Esc 는 부작용 없이 닫는다.

use crate::ui::Theme;
use crossterm::event::KeyCode;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// 확인 블록 높이 (프롬프트 + 옵션)
pub const CONFIRMATION_HEIGHT: u16 = 2;

/// 선택/미선택 파일이 작업 후 어떻게 되는지 설명
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionHints {
    pub selected: &'static str,
    pub unselected: &'static str,
}

/// 확인 옵션 (레이블, 키, 결과 효과)
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmOption<E> {
    pub label: &'static str,
    pub keys: Vec<KeyCode>,
    /// 키 표시 문자열 (`y`, `n/esc`)
    pub help: &'static str,
    pub effects: Vec<E>,
}

impl<E> ConfirmOption<E> {
    pub fn new(label: &'static str, keys: Vec<KeyCode>, help: &'static str, effects: Vec<E>) -> Self {
        Self {
            label,
            keys,
            help,
            effects,
        }
    }

    fn matches(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }
}

/// 대기 중인 확인 요청
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirmation<E> {
    pub prompt: String,
    pub hints: SelectionHints,
    pub options: Vec<ConfirmOption<E>>,
}

/// 키 처리 결과
#[derive(Debug, PartialEq)]
pub enum GateOutcome<E> {
    /// 옵션에 없는 키 (상태 유지)
    Ignored,
    Cancelled,
    /// 옵션 선택, 게이트는 닫힘
    Triggered(Vec<E>),
}

#[derive(Debug)]
pub struct ConfirmationGate<E> {
    pending: Option<PendingConfirmation<E>>,
}

impl<E> Default for ConfirmationGate<E> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<E> ConfirmationGate<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingConfirmation<E>> {
        self.pending.as_ref()
    }

    pub fn hints(&self) -> Option<SelectionHints> {
        self.pending.as_ref().map(|p| p.hints)
    }

    /// Inactive -> Active
    pub fn activate(
        &mut self,
        prompt: impl Into<String>,
        hints: SelectionHints,
        options: Vec<ConfirmOption<E>>,
    ) {
        if self.pending.is_some() {
            log::warn!("confirmation already active, replacing it");
        }
        self.pending = Some(PendingConfirmation {
            prompt: prompt.into(),
            hints,
            options,
        });
    }

    /// 부작용 없이 닫기
    pub fn close(&mut self) {
        self.pending = None;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> GateOutcome<E> {
        let Some(pending) = self.pending.as_ref() else {
            return GateOutcome::Ignored;
        };

        if let Some(index) = pending.options.iter().position(|o| o.matches(code)) {
            let triggered = self
                .pending
                .take()
                .map(|p| p.options.into_iter().nth(index));
            return match triggered.flatten() {
                Some(option) => GateOutcome::Triggered(option.effects),
                None => GateOutcome::Cancelled,
            };
        }

        if code == KeyCode::Esc {
            self.close();
            return GateOutcome::Cancelled;
        }
        GateOutcome::Ignored
    }

    /// 오버레이 높이 (비활성이면 0)
    pub fn height(&self) -> u16 {
        if self.is_active() {
            CONFIRMATION_HEIGHT
        } else {
            0
        }
    }

    /// 프롬프트 줄과 옵션 줄
    pub fn render_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let Some(pending) = self.pending.as_ref() else {
            return Vec::new();
        };

        let bg = theme.bg_primary.to_color();
        let prompt = Line::from(Span::styled(
            pending.prompt.clone(),
            Style::default()
                .fg(theme.warning.to_color())
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));

        let key_style = Style::default()
            .fg(theme.accent.to_color())
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(theme.fg_primary.to_color()).bg(bg);

        let mut spans = Vec::new();
        for (i, option) in pending.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", label_style));
            }
            spans.push(Span::styled(format!("[{}]", option.help), key_style));
            spans.push(Span::styled(format!(" {}", option.label), label_style));
        }

        vec![prompt, Line::from(spans)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINTS: SelectionHints = SelectionHints {
        selected: "stays as is",
        unselected: "moves to the new revision",
    };

    fn yes_no() -> Vec<ConfirmOption<&'static str>> {
        vec![
            ConfirmOption::new("Yes", vec![KeyCode::Char('y')], "y", vec!["run"]),
            ConfirmOption::new("No", vec![KeyCode::Char('n'), KeyCode::Esc], "n/esc", vec![]),
        ]
    }

    #[test]
    fn test_inactive_ignores_keys() {
        let mut gate: ConfirmationGate<&str> = ConfirmationGate::new();
        assert_eq!(gate.handle_key(KeyCode::Char('y')), GateOutcome::Ignored);
        assert_eq!(gate.height(), 0);
    }

    #[test]
    fn test_trigger_returns_effects_and_closes() {
        let mut gate = ConfirmationGate::new();
        gate.activate("Sure?", HINTS, yes_no());
        assert!(gate.is_active());
        assert_eq!(gate.height(), CONFIRMATION_HEIGHT);

        assert_eq!(
            gate.handle_key(KeyCode::Char('y')),
            GateOutcome::Triggered(vec!["run"])
        );
        assert!(!gate.is_active());
    }

    #[test]
    fn test_unbound_key_keeps_gate_active() {
        let mut gate = ConfirmationGate::new();
        gate.activate("Sure?", HINTS, yes_no());
        assert_eq!(gate.handle_key(KeyCode::Char('x')), GateOutcome::Ignored);
        assert!(gate.is_active());
        assert_eq!(gate.hints(), Some(HINTS));
    }

    #[test]
    fn test_option_bound_to_esc_wins_over_cancel() {
        let mut gate = ConfirmationGate::new();
        gate.activate("Sure?", HINTS, yes_no());
        assert_eq!(gate.handle_key(KeyCode::Esc), GateOutcome::Triggered(vec![]));
    }

    #[test]
    fn test_implicit_esc_cancels() {
        let mut gate = ConfirmationGate::new();
        gate.activate(
            "Sure?",
            HINTS,
            vec![ConfirmOption::new("Yes", vec![KeyCode::Char('y')], "y", vec!["run"])],
        );
        assert_eq!(gate.handle_key(KeyCode::Esc), GateOutcome::Cancelled);
        assert!(!gate.is_active());
    }

    #[test]
    fn test_render_lines() {
        let mut gate = ConfirmationGate::new();
        gate.activate("Are you sure?", HINTS, yes_no());
        let lines = gate.render_lines(&Theme::dark());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "Are you sure?");
        assert_eq!(lines[1].to_string(), "[y] Yes  [n/esc] No");
    }
}
