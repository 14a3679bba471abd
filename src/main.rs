mod build_info;
mod ui;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use lucky_drop::commentary::{CommentaryRequest, CommentaryTask};
use lucky_drop::engine::{DrawKind, GachaEngine, MachineState, SpinEvent};
use lucky_drop::machine_store::MachineStore;
use lucky_drop::missions::{self, MISSIONS};
use lucky_drop::prizes::PrizePool;
use lucky_drop::profile_store::{ProfileStore, UserProfile};
use lucky_drop::settings::SystemSettings;
use lucky_drop::shop::{self, SHOP_ITEMS};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use ui::login_scene::{LoginAction, LoginForm};

const TOAST_SECONDS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Machine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Machine,
    History,
    Missions,
    Shop,
}

struct App {
    screen: Screen,
    tab: Tab,
    login: LoginForm,
    profile: Option<UserProfile>,
    engine: GachaEngine,
    pool: PrizePool,
    settings: SystemSettings,
    commentary: Option<String>,
    commentary_task: Option<CommentaryTask>,
    toast: Option<(String, Instant)>,
}

impl App {
    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    fn expire_toast(&mut self) {
        if let Some((_, since)) = &self.toast {
            if since.elapsed() >= Duration::from_secs(TOAST_SECONDS) {
                self.toast = None;
            }
        }
    }
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "lucky-drop {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Lucky Drop - Terminal Mystery Box Machine\n");
                println!("Usage: lucky-drop [--version | --help]");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'lucky-drop --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Shared machine config: catalog and tuning, seeded on first run
    let machine_store = MachineStore::new()?;
    let config = machine_store.load_or_default();
    if !machine_store.machine_exists() {
        machine_store.save(&config)?;
    }

    let profile_store = ProfileStore::new()?;

    let mut app = App {
        screen: Screen::Login,
        tab: Tab::Machine,
        login: LoginForm::new(),
        profile: None,
        engine: GachaEngine::new(),
        pool: PrizePool::from_catalog(&config.prizes),
        settings: config.settings,
        commentary: None,
        commentary_task: None,
        toast: None,
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &profile_store);

    // Save whatever session is live before leaving
    if let Some(profile) = &app.profile {
        let _ = profile_store.save_profile(profile);
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    profile_store: &ProfileStore,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_step = Instant::now();

    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Advance the spin animation on its own schedule
        if let Some(delay) = app.engine.tick_delay() {
            if last_step.elapsed() >= delay {
                if let Some(profile) = app.profile.as_mut() {
                    let event = app
                        .engine
                        .tick(&mut profile.session, Utc::now().timestamp_millis());
                    last_step = Instant::now();

                    if let Some(SpinEvent::Landed { summary, .. }) = event {
                        profile_store.save_profile(profile)?;
                        ring_bell(&app.settings);

                        let message = if summary.has_legendary {
                            format!("LEGENDARY! +{} coins", summary.coins_earned)
                        } else {
                            format!("+{} coins", summary.coins_earned)
                        };
                        app.show_toast(message);

                        if !app.engine.is_batch() {
                            if let Some(drawn) = app.engine.results().first() {
                                app.commentary = None;
                                app.commentary_task = Some(CommentaryTask::spawn(
                                    CommentaryRequest::from(&drawn.prize),
                                ));
                            }
                        }
                    }
                }
            }
        }

        // Collect finished commentary, if any
        if let Some(task) = app.commentary_task.as_mut() {
            if let Some(line) = task.try_take() {
                app.commentary = Some(line);
                app.commentary_task = None;
            }
        }

        app.expire_toast();

        if !event::poll(Duration::from_millis(10))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.screen {
            Screen::Login => match app.login.handle_key(key) {
                LoginAction::Quit => return Ok(()),
                LoginAction::Submit => submit_login(app, profile_store),
                LoginAction::None => {}
            },
            Screen::Machine => {
                if handle_machine_key(app, profile_store, key.code, &mut rng)? {
                    return Ok(());
                }
            }
        }
    }
}

fn submit_login(app: &mut App, profile_store: &ProfileStore) {
    let result = if app.login.register_mode {
        profile_store.register(
            &app.login.username,
            &app.login.password,
            Utc::now().timestamp_millis(),
        )
    } else {
        profile_store.login(&app.login.username, &app.login.password)
    };

    match result {
        Ok(profile) => {
            let greeting = format!("Welcome, {}!", profile.username);
            app.profile = Some(profile);
            app.screen = Screen::Machine;
            app.tab = Tab::Machine;
            app.login = LoginForm::new();
            app.show_toast(greeting);
        }
        Err(e) => app.login.error = Some(e.to_string()),
    }
}

/// Handles one key on the machine screen. Returns true to quit the app.
fn handle_machine_key(
    app: &mut App,
    profile_store: &ProfileStore,
    code: KeyCode,
    rng: &mut impl rand::Rng,
) -> io::Result<bool> {
    // The result modal swallows everything except its close keys
    if app.engine.state() == MachineState::Result {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.engine.close_result();
            // Abandon any in-flight commentary; its line must not reach a
            // closed modal
            app.commentary_task = None;
            app.commentary = None;
        }
        return Ok(false);
    }

    let spinning = app.engine.state() == MachineState::Spinning;

    match code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('l') if !spinning => {
            if let Some(profile) = app.profile.take() {
                profile_store.save_profile(&profile)?;
            }
            app.engine = GachaEngine::new();
            app.commentary_task = None;
            app.commentary = None;
            app.screen = Screen::Login;
        }
        KeyCode::Char('s') | KeyCode::Char('b') if app.tab == Tab::Machine => {
            let kind = if code == KeyCode::Char('s') {
                DrawKind::Single
            } else {
                DrawKind::Batch
            };
            if let Some(profile) = app.profile.as_mut() {
                match app.engine.start_draw(
                    kind,
                    &app.pool,
                    &mut profile.session,
                    &app.settings,
                    rng,
                ) {
                    Ok(()) => {}
                    Err(e) => app.show_toast(e.to_string()),
                }
            }
        }
        KeyCode::Char('m') if !spinning => app.tab = Tab::Machine,
        KeyCode::Char('h') if !spinning => app.tab = Tab::History,
        KeyCode::Char('i') if !spinning => app.tab = Tab::Missions,
        KeyCode::Char('p') if !spinning => app.tab = Tab::Shop,
        KeyCode::Char(c @ '1'..='4') if app.tab == Tab::Missions => {
            let slot = c as usize - '1' as usize;
            if let (Some(profile), Some(mission)) = (app.profile.as_mut(), MISSIONS.get(slot)) {
                if missions::claim(mission, &mut profile.session) {
                    profile_store.save_profile(profile)?;
                    app.show_toast(format!("Claimed: +{} coins", mission.reward_coins));
                } else {
                    app.show_toast("Nothing to claim there yet");
                }
            }
        }
        KeyCode::Char(c @ '1'..='3') if app.tab == Tab::Shop => {
            let slot = c as usize - '1' as usize;
            if let (Some(profile), Some(item)) = (app.profile.as_mut(), SHOP_ITEMS.get(slot)) {
                match shop::buy(item, &mut profile.session) {
                    Ok(()) => {
                        profile_store.save_profile(profile)?;
                        app.show_toast(format!("Bought {}", item.name));
                    }
                    Err(e) => app.show_toast(e.to_string()),
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Terminal bell as the win chime; the tick sound is left to the visuals.
fn ring_bell(settings: &SystemSettings) {
    if settings.volume > 0.0 {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();

    if app.screen == Screen::Login {
        app.login.draw(frame, area);
        return;
    }

    let Some(profile) = app.profile.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Tab bar
            Constraint::Min(10),   // Content
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "LUCKY DROP OS 4.0",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("({})", profile.username),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("build {}", build_info::BUILD_COMMIT),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    draw_tab_bar(frame, app, chunks[1]);

    match app.tab {
        Tab::Machine => ui::machine_scene::draw_machine_scene(
            frame,
            chunks[2],
            &app.pool,
            &app.engine,
            &profile.session,
            &app.settings,
        ),
        Tab::History => ui::panels::draw_history(frame, chunks[2], &profile.session),
        Tab::Missions => ui::panels::draw_missions(frame, chunks[2], &profile.session),
        Tab::Shop => ui::panels::draw_shop(frame, chunks[2], &profile.session),
    }

    if app.engine.state() == MachineState::Result {
        ui::result_modal::draw_result_modal(
            frame,
            area,
            app.engine.results(),
            app.commentary.as_deref(),
            app.commentary_task.is_some(),
        );
    }

    if let Some((message, _)) = &app.toast {
        let toast = Paragraph::new(Span::styled(
            format!(" {} ", message),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(toast, chunks[0]);
    }
}

fn draw_tab_bar(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let tabs = [
        (Tab::Machine, "[m] Machine"),
        (Tab::History, "[h] History"),
        (Tab::Missions, "[i] Missions"),
        (Tab::Shop, "[p] Shop"),
    ];

    let mut spans = Vec::new();
    for (tab, label) in tabs {
        let style = if app.tab == tab {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(
        "[l] Logout",
        Style::default().fg(Color::DarkGray),
    ));

    let bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(bar, area);
}
