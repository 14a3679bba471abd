//! Result overlay shown once the reel lands.

use crate::ui::{centered_rect, rarity_color, throbber};
use lucky_drop::engine::DrawnPrize;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draws the result modal over the machine scene.
///
/// `commentary` is `None` while the announcer is still thinking; the modal
/// renders immediately and a throbber fills the slot until the line arrives.
pub fn draw_result_modal(
    frame: &mut Frame,
    area: Rect,
    results: &[DrawnPrize],
    commentary: Option<&str>,
    commentary_pending: bool,
) {
    let modal_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, modal_area);

    let has_legendary = results.iter().any(|d| d.prize.is_legendary());
    let title = if results.len() > 1 {
        " 10x RESULTS "
    } else if has_legendary {
        " !!! JACKPOT !!! "
    } else {
        " RESULT "
    };

    let border_color = if has_legendary {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_alignment(Alignment::Center);

    let mut lines: Vec<Line> = vec![Line::raw("")];

    if results.len() == 1 {
        let drawn = &results[0];
        lines.push(Line::from(Span::styled(
            drawn.prize.name.clone(),
            Style::default()
                .fg(rarity_color(drawn.prize.rarity))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("[{}]", drawn.prize.rarity.name()),
            Style::default().fg(rarity_color(drawn.prize.rarity)),
        )));
        if drawn.pity_fired {
            lines.push(Line::from(Span::styled(
                "Pity guarantee honored!",
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            drawn.prize.description.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::raw(""));

        match commentary {
            Some(text) => lines.push(Line::from(Span::styled(
                format!("\u{1F399} {}", text),
                Style::default().fg(Color::Green),
            ))),
            None if commentary_pending => lines.push(Line::from(Span::styled(
                format!(
                    "{} {}",
                    throbber::spinner_char(),
                    throbber::waiting_message(results[0].prize.id.len() as u64)
                ),
                Style::default().fg(Color::DarkGray),
            ))),
            None => {}
        }
    } else {
        for drawn in results {
            let mut spans = vec![
                Span::styled(
                    format!("{:<12}", drawn.prize.rarity.name()),
                    Style::default().fg(rarity_color(drawn.prize.rarity)),
                ),
                Span::raw(drawn.prize.name.clone()),
            ];
            if drawn.pity_fired {
                spans.push(Span::styled("  (pity)", Style::default().fg(Color::Red)));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Close",
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(body, modal_area);
}
