use crate::tui::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(10),   // Tree / details
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_main_area(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if app.mode == Mode::Help {
        draw_help(f, f.area());
    }
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.mode == Mode::Query {
        (app.input.as_str(), Style::default().fg(Color::Yellow))
    } else {
        (app.session.query(), Style::default().fg(Color::DarkGray))
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search (/: edit, keyword or /Pip/Path, ?: help) "),
    );

    f.render_widget(input, area);

    if app.mode == Mode::Query {
        f.set_cursor_position((area.x + app.input.chars().count() as u16 + 1, area.y + 1));
    }
}

fn draw_main_area(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    draw_tree(f, app, chunks[0]);
    draw_details(f, app, chunks[1]);
}

fn draw_tree(f: &mut Frame, app: &App, area: Rect) {
    let store = app.session.store();
    let state = app.session.state();
    let visible = app.visible();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|node| {
            let marker = if !store.has_children(node.id) {
                "  "
            } else if state.is_expanded(node.id) {
                "▾ "
            } else {
                "▸ "
            };

            let name_style = if state.is_highlighted(node.id) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if store.has_children(node.id) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::raw("  ".repeat(node.level)),
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(node.name.clone(), name_style),
                Span::styled(format!("  {}", node.field_no), Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({}/{}) ", app.title, visible.len(), store.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut list_state = ListState::default().with_selected(if visible.is_empty() {
        None
    } else {
        Some(app.selected)
    });

    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::Blue);

    let content = match app.selected_node() {
        Some(node) => {
            let description = if node.description.is_empty() {
                Span::styled("(no definition)", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(node.description.clone())
            };

            let mut lines = vec![
                Line::from(Span::styled(
                    node.name.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![Span::styled("Field:  ", label), Span::raw(node.field_no.clone())]),
                Line::from(vec![
                    Span::styled("Level:  ", label),
                    Span::raw(node.level.to_string()),
                ]),
            ];

            if let Some((property, type_name)) = node.split_name() {
                lines.push(Line::from(vec![
                    Span::styled("Role:   ", label),
                    Span::raw(property.to_string()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Type:   ", label),
                    Span::raw(type_name.to_string()),
                ]));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(description));
            Text::from(lines)
        }
        None => Text::raw("No node selected"),
    };

    let details = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(" Definition "))
        .wrap(Wrap { trim: false });

    f.render_widget(details, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}

const HELP_LINES: &[(&str, &str)] = &[
    ("j / k, ↓ / ↑", "move"),
    ("gg / G", "first / last"),
    ("Ctrl+d / Ctrl+u", "page down / up"),
    ("Enter / Space", "expand or collapse"),
    ("e / c", "expand all / collapse all"),
    ("r", "reset view"),
    ("/", "edit search"),
    ("n / N", "next / previous match"),
    ("q / Esc", "quit"),
];

fn draw_help(f: &mut Frame, area: Rect) {
    let width = 48.min(area.width);
    let height = (HELP_LINES.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:18}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}
