use super::super::*;
use crossterm::event::KeyCode;

/// 다이얼로그가 열려 있을 때의 키 처리
pub(in crate::app) fn handle_key(app: &mut App, code: KeyCode) {
    let viewport = app.diff_viewport();
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };

    let mut close = false;
    if dialog.is_diff() {
        let page = viewport.max(1) as isize;
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => close = true,
            KeyCode::Char('j') | KeyCode::Down => dialog.scroll_by(1, viewport),
            KeyCode::Char('k') | KeyCode::Up => dialog.scroll_by(-1, viewport),
            KeyCode::Char(' ') | KeyCode::PageDown => dialog.scroll_by(page, viewport),
            KeyCode::Char('b') | KeyCode::PageUp => dialog.scroll_by(-page, viewport),
            KeyCode::Char('g') | KeyCode::Home => dialog.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => dialog.scroll_to_bottom(viewport),
            _ => {}
        }
    } else {
        // 메시지/에러
        close = matches!(
            code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
        );
    }

    if close {
        app.close_dialog();
    }
}
