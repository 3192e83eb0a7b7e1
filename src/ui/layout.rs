// Layout system
//
// 상태바(1줄) | 파일 목록 + 확인 오버레이 | 커맨드바(1줄)
// 최소 크기보다 작으면 경고 화면만 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 6;

/// 상태바 + 커맨드바 높이
pub const FIXED_CHROME: u16 = 2;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Normal,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    pub status_bar: Rect,
    /// 파일 목록과 확인 오버레이 영역
    pub body: Rect,
    pub command_bar: Rect,
    /// 경고 메시지 영역 (TooSmall 모드에서 사용)
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::Normal,
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else {
            LayoutMode::Normal
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = match self.mode {
            LayoutMode::TooSmall => LayoutAreas {
                warning: area,
                ..Default::default()
            },
            LayoutMode::Normal => Self::calculate_areas(area),
        };
    }

    fn calculate_areas(area: Rect) -> LayoutAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // 상태바
                Constraint::Min(1),    // 본문
                Constraint::Length(1), // 커맨드바
            ])
            .split(area);

        LayoutAreas {
            status_bar: chunks[0],
            body: chunks[1],
            command_bar: chunks[2],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn is_too_small(&self) -> bool {
        matches!(self.mode, LayoutMode::TooSmall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_mode() {
        assert_eq!(LayoutManager::determine_mode(80, 24), LayoutMode::Normal);
        assert_eq!(LayoutManager::determine_mode(40, 6), LayoutMode::Normal);
        assert_eq!(LayoutManager::determine_mode(39, 24), LayoutMode::TooSmall);
        assert_eq!(LayoutManager::determine_mode(80, 5), LayoutMode::TooSmall);
    }

    #[test]
    fn test_areas_reserve_chrome() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 80, 24));

        let areas = manager.areas();
        assert_eq!(areas.status_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.body, Rect::new(0, 1, 80, 22));
        assert_eq!(areas.command_bar, Rect::new(0, 23, 80, 1));
        assert_eq!(areas.body.height, 24 - FIXED_CHROME);
    }

    #[test]
    fn test_too_small_uses_whole_area_for_warning() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 20, 4));
        assert!(manager.is_too_small());
        assert_eq!(manager.areas().warning, Rect::new(0, 0, 20, 4));
        assert_eq!(manager.terminal_size(), (20, 4));
    }
}
