//! History, missions and shop tab rendering.

use crate::ui::rarity_color;
use lucky_drop::missions::{self, MISSIONS};
use lucky_drop::prizes::Rarity;
use lucky_drop::session::SessionState;
use lucky_drop::shop::SHOP_ITEMS;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use chrono::{TimeZone, Utc};

pub fn draw_history(frame: &mut Frame, area: Rect, session: &SessionState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Draw History (newest first) ");
    let inner_height = block.inner(area).height as usize;

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!(
            "Total: {}   Common: {}   Rare: {}   Legendary: {}",
            session.total_draws(),
            session.draws_of_rarity(Rarity::Common),
            session.draws_of_rarity(Rarity::Rare),
            session.draws_of_rarity(Rarity::Legendary),
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::raw(""));

    for entry in session.history.iter().take(inner_height.saturating_sub(2)) {
        let when = Utc
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|t| t.format("%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "??-?? ??:??".to_string());
        lines.push(Line::from(vec![
            Span::styled(format!("{}  ", when), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<10}", entry.rarity.name()),
                Style::default().fg(rarity_color(entry.rarity)),
            ),
            Span::raw(entry.prize_name.clone()),
        ]));
    }

    if session.history.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing yet. Go pull something!",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn draw_missions(frame: &mut Frame, area: Rect, session: &SessionState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Missions ([1-4] claim) ");

    let mut lines: Vec<Line> = Vec::new();
    for (slot, mission) in MISSIONS.iter().enumerate() {
        let progress = missions::progress(mission, session);
        let claimed = session.has_claimed_mission(mission.id);
        let complete = missions::is_complete(mission, session);

        let status = if claimed {
            Span::styled("[claimed]", Style::default().fg(Color::DarkGray))
        } else if complete {
            Span::styled(
                "[ready!]",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("[{}/{}]", progress, mission.target),
                Style::default().fg(Color::Cyan),
            )
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{}. {:<16}", slot + 1, mission.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            status,
            Span::styled(
                format!("  +{} coins", mission.reward_coins),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", mission.description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn draw_shop(frame: &mut Frame, area: Rect, session: &SessionState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Black Market ([1-3] buy) ");

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!("Balance: {} coins", session.coins),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::raw(""));

    for (slot, item) in SHOP_ITEMS.iter().enumerate() {
        let affordable = session.coins >= item.price;
        let price_style = if affordable {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}. {:<16}", slot + 1, item.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{} coins", item.price), price_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", item.description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::raw(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left),
        area,
    );
}
