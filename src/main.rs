mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::App;
use clap::Parser;
use crate::core::config::{self, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use models::Revision;
use ratatui::{backend::Backend, backend::CrosstermBackend, Frame, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use system::{jj, CommandRunner, JjCommand, JjRunner};
use ui::{CommandBar, Dialog, LayoutMode, StatusBar, ThemeManager, WarningScreen};
use utils::error::{JjDetailsError, Result};

const LOG_ENV: &str = "JJDETAILS_LOG";

/// 리비전의 변경 파일을 살펴보고 split/restore/absorb 를 실행하는 터미널 뷰
#[derive(Parser, Debug)]
#[command(name = "jjdetails", version, about)]
struct Cli {
    /// 조회할 리비전 (revset)
    #[arg(short = 'r', long, default_value = "@")]
    revision: String,

    /// 저장소 경로
    #[arg(short = 'R', long)]
    repository: Option<PathBuf>,

    /// 설정 파일 경로
    #[arg(long)]
    config: Option<PathBuf>,

    /// 테마 이름 (설정 파일 값보다 우선)
    #[arg(long)]
    theme: Option<String>,

    /// 로그 파일 경로
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone());

    let config = Config::load(cli.config.as_deref())?;
    let theme_manager = load_themes(cli.theme.as_deref().unwrap_or(&config.theme));

    let runner = JjRunner::new(config.jj_binary.clone(), cli.repository.clone());
    let revision = resolve_revision(&runner, &cli.revision)?;
    log::info!("showing {} ({})", revision.change_id, revision.commit_id);

    // Create app
    let mut app = App::new(revision, runner, theme_manager)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    // 다른 뷰로 넘길 작업은 터미널 복구 후 출력
    if let Some(handoff) = app.take_handoff() {
        println!("{}", handoff.output());
    }

    Ok(())
}

/// 로그는 파일로 보낸다 (stderr 는 TUI 가 사용)
fn init_logging(log_file: Option<PathBuf>) {
    let Some(path) = log_file.or_else(config::default_log_file) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn load_themes(name: &str) -> ThemeManager {
    let mut theme_manager = ThemeManager::new();
    if let Err(err) = theme_manager.load_themes_from_config_dir() {
        log::warn!("failed to load user themes: {}", err);
    }
    if let Err(err) = theme_manager.switch_theme(name) {
        log::warn!("{} (available: {})", err, theme_manager.available_themes().join(", "));
    }
    theme_manager
}

/// revset 을 change id / commit id 로 해석
fn resolve_revision(runner: &JjRunner, revset: &str) -> Result<Revision> {
    let output = runner.run_sync(&jj::resolve_revision(revset))?;
    Revision::parse_log_output(&output)
        .ok_or_else(|| JjDetailsError::InvalidRevision(revset.to_string()))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.clear_expired_toast();

        terminal.draw(|f| {
            let size = f.area();

            // 레이아웃 업데이트
            app.layout.update(size);

            match app.layout_mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .theme(app.theme());
                    f.render_widget(warning, size);
                }
                LayoutMode::Normal => render_main_ui(f, app),
            }
        })?;

        // 백그라운드 작업 중에는 결과를 빨리 반영
        let poll_timeout = if app.is_busy() {
            Duration::from_millis(30)
        } else {
            Duration::from_millis(200)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.poll_tasks();

        if let Some(request) = app.take_pending_interactive() {
            let result = run_interactive(terminal, app.runner(), &request.command);
            app.finish_interactive(request, result);
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// TUI 를 잠시 내리고 대화형 명령 실행
fn run_interactive<B: Backend>(
    terminal: &mut Terminal<B>,
    runner: &dyn CommandRunner,
    command: &JjCommand,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Clear(ClearType::All))?;

    let result = runner.run_interactive(command);

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    terminal.clear()?;
    result
}

fn indicator(app: &App) -> Option<String> {
    if app.is_busy() {
        Some("running".to_string())
    } else if app.is_confirming() {
        Some("confirm".to_string())
    } else {
        None
    }
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme();
    let operation = app.operation();

    let status_bar = StatusBar::new()
        .revision(operation.revision().short_change_id())
        .current_file(app.current_file())
        .repository(app.repository())
        .file_count(operation.list().len())
        .checked_count(app.checked_count())
        .toast(app.toast_display())
        .theme(theme);
    f.render_widget(status_bar, areas.status_bar);

    f.render_widget(app.render_body(f.area().height), areas.body);

    let command_bar = CommandBar::new()
        .commands(app.short_help())
        .indicator(indicator(app))
        .theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
