//! Ruble Clicker screen: stats, click panel, upgrades, notifications.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::{BUY_BASE, CLICK_RUBLE, RESET_PROGRESS, SHOW_CARD};
use super::config::ClickerConfig;
use super::logic::{can_afford, format_number, price};
use super::state::{ClickerState, Purchase};

const HEADER_HEIGHT: u16 = 4;
/// Five purchases, card, reset, plus borders.
const UPGRADES_HEIGHT: u16 = 9;

pub fn render(
    state: &ClickerState,
    config: &ClickerConfig,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if is_narrow_layout(area.width) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(7),
                Constraint::Length(UPGRADES_HEIGHT),
                Constraint::Min(3),
            ])
            .split(area);
        render_header(state, config, f, chunks[0]);
        render_click_panel(state, f, chunks[1], click_state);
        render_upgrades(state, config, f, chunks[2], click_state);
        render_log(state, f, chunks[3]);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(7),
                Constraint::Length(UPGRADES_HEIGHT),
            ])
            .split(columns[0]);
        render_header(state, config, f, left[0]);
        render_click_panel(state, f, left[1], click_state);
        render_upgrades(state, config, f, left[2], click_state);
        render_log(state, f, columns[1]);
    }
}

fn render_header(state: &ClickerState, config: &ClickerConfig, f: &mut Frame, area: Rect) {
    let rate = state.automation_rate(config);
    let mut clicks_line = vec![
        Span::styled("👆 Кликов ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format_number(state.clicks),
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        ),
    ];
    if rate > 0 {
        clicks_line.push(Span::styled(
            format!("  (+{}/сек)", rate),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("💰 Рублей ", Style::default().fg(Color::Green)),
            Span::styled(
                format_number(state.currency),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(clicks_line),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Рубль-Кликер "),
    );
    f.render_widget(widget, area);
}

fn render_click_panel(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut border = Style::default().fg(if state.premium_border_owned {
        Color::Yellow
    } else {
        Color::Cyan
    });
    if state.haptic_pulse > 0 {
        border = border.fg(Color::White).add_modifier(Modifier::BOLD);
    }
    let borders_type = if state.premium_border_owned {
        ratzilla::ratatui::widgets::BorderType::Double
    } else {
        ratzilla::ratatui::widgets::BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(borders_type)
        .border_style(border);
    let inner = block.inner(area);

    let mut label = Vec::new();
    if state.double_active {
        label.push(Span::styled(
            format!("2X ({}с) ", state.double_secs_left()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    label.push(Span::styled(
        "[C] КЛИК ₽",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    // Button label on the middle row.
    let mut rows: Vec<Line> = vec![Line::from(""); (inner.height / 2) as usize];
    rows.push(Line::from(label));
    let widget = Paragraph::new(rows).alignment(Alignment::Center).block(block);
    f.render_widget(widget, area);

    // Floating ₽ at its percent position inside the panel.
    if inner.width > 0 && inner.height > 0 {
        let (px, py) = state.icon_pos;
        let x = inner.x + (inner.width.saturating_sub(1) as u32 * px as u32 / 100) as u16;
        let y = inner.y + (inner.height.saturating_sub(1) as u32 * py as u32 / 100) as u16;
        let icon = Paragraph::new(Span::styled(
            "₽",
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(icon, Rect::new(x, y, 1, 1));
    }

    // The whole panel is the button.
    click_state
        .borrow_mut()
        .add_click_target(area, CLICK_RUBLE);
}

/// Status column for a purchase row.
fn purchase_status(state: &ClickerState, config: &ClickerConfig, kind: Purchase) -> String {
    match kind {
        Purchase::Automation if state.is_maxed(config) => {
            format!("ур. {} — макс.", state.automation_level)
        }
        Purchase::DoubleBoost if state.double_active => {
            format!("активно ещё {}с", state.double_secs_left())
        }
        Purchase::PremiumBorder | Purchase::Haptic if price(state, config, kind).is_none() => {
            "✔ куплено".to_string()
        }
        _ => {
            let cost = match price(state, config, kind) {
                Some((cost, true)) => format!("{} кликов", format_number(cost)),
                Some((cost, false)) => format!("{}₽", format_number(cost)),
                None => String::new(),
            };
            match kind {
                Purchase::Automation => format!("ур. {} | {}", state.automation_level, cost),
                Purchase::ClickBoost => format!("{} | текущий: {}", cost, state.click_multiplier),
                _ => cost,
            }
        }
    }
}

fn purchase_line<'a>(state: &ClickerState, config: &ClickerConfig, kind: Purchase) -> Line<'a> {
    let affordable = can_afford(state, config, kind);
    let (key_style, name_style) = if affordable {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };
    Line::from(vec![
        Span::styled(format!(" [{}] ", kind.key()), key_style),
        Span::styled(kind.name().to_string(), name_style),
        Span::styled(
            format!("  {}", purchase_status(state, config, kind)),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn hint_line<'a>(key: char, label: &'a str, style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" [{}] ", key), style.add_modifier(Modifier::BOLD)),
        Span::styled(label, style),
    ])
}

fn render_upgrades(
    state: &ClickerState,
    config: &ClickerConfig,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for (i, &kind) in Purchase::all().iter().enumerate() {
        cl.push_clickable(purchase_line(state, config, kind), BUY_BASE + i as u16);
    }
    cl.push_clickable(
        hint_line('V', "Карта 💳", Style::default().fg(Color::Magenta)),
        SHOW_CARD,
    );
    let reset_style = if state.reset_armed {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(hint_line('R', "Сброс прогресса", reset_style), RESET_PROGRESS);

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Апгрейды ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(state: &ClickerState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Лог "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
