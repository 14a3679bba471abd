//! The main machine screen: 3x3 prize grid, buff indicator and status footer.

use crate::ui::rarity_color;
use lucky_drop::engine::{GachaEngine, MachineState};
use lucky_drop::prizes::PrizePool;
use lucky_drop::session::SessionState;
use lucky_drop::settings::SystemSettings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_machine_scene(
    frame: &mut Frame,
    area: Rect,
    pool: &PrizePool,
    engine: &GachaEngine,
    session: &SessionState,
    settings: &SystemSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(11),   // Prize grid
            Constraint::Length(1), // Buff indicator
            Constraint::Length(3), // Pity / coins footer
            Constraint::Length(1), // Controls
        ])
        .split(area);

    draw_grid(frame, chunks[0], pool, engine);
    draw_buff_line(frame, chunks[1], session);
    draw_status_footer(frame, chunks[2], session, settings);

    let controls = Paragraph::new("[s] Single draw  [b] 10x draw  [h/i/p] Tabs  [q] Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[3]);
}

/// Draws the 3x3 slot grid. The active slot lights up while spinning and
/// stays lit on the landed slot in the result state.
fn draw_grid(frame: &mut Frame, area: Rect, pool: &PrizePool, engine: &GachaEngine) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" LUCKY DROP ")
        .title_alignment(Alignment::Center);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let highlight = engine.state() != MachineState::Idle;

    for (row, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(*row_area);

        for (col, cell_area) in cells.iter().enumerate() {
            let index = row * 3 + col;
            draw_slot(frame, *cell_area, pool, engine, index, highlight);
        }
    }
}

fn draw_slot(
    frame: &mut Frame,
    area: Rect,
    pool: &PrizePool,
    engine: &GachaEngine,
    index: usize,
    highlight: bool,
) {
    let Some(prize) = pool.get(index) else {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let is_active = highlight && engine.active_index() == index;
    let border_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default().borders(Borders::ALL).style(border_style);
    let text = vec![
        Line::from(Span::styled(
            prize.name.clone(),
            Style::default().add_modifier(if is_active {
                Modifier::BOLD | Modifier::REVERSED
            } else {
                Modifier::empty()
            }),
        )),
        Line::from(Span::styled(
            prize.rarity.name(),
            Style::default().fg(rarity_color(prize.rarity)),
        )),
    ];
    let cell = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(cell, area);
}

fn draw_buff_line(frame: &mut Frame, area: Rect, session: &SessionState) {
    if session.buffs.guaranteed_rare {
        let line = Paragraph::new(Span::styled(
            "* Rare protocol active: next draw is Rare or better *",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(line, area);
    }
}

fn draw_status_footer(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    settings: &SystemSettings,
) {
    let threshold = settings.effective_pity_threshold();
    let pity_text = if threshold == 0 {
        format!("Pity: {}/-", session.pity_counter)
    } else {
        format!("Pity: {}/{}", session.pity_counter, threshold)
    };

    // Warn when pity is close to firing
    let pity_style = if threshold > 0 && session.pity_counter + 10 >= threshold {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(pity_text, pity_style),
        Span::raw("   "),
        Span::styled(
            format!("Coins: {}", session.coins),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Draws: {}", session.total_draws()),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
