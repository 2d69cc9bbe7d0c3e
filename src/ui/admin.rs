use crate::app::App;
use crate::ui::layout::{calculate_admin_chunks, centered_rect};
use crate::ui::dates::format_result_date;
use crate::utils::{format_duration, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

fn score_color(score: u32) -> Color {
    if score >= 16 {
        Color::Green
    } else if score >= 12 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_card(f: &mut Frame, area: ratatui::layout::Rect, title: &str, value: Line) {
    let card = Paragraph::new(value)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(card, area);
}

pub fn draw_admin(f: &mut Frame, app: &App) {
    let layout = calculate_admin_chunks(f.area());
    let review = &app.review;

    let title = Paragraph::new("Admin Panel - Results")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    draw_card(
        f,
        layout.count_card,
        "Students",
        Line::from(Span::styled(review.count().to_string(), bold)),
    );
    draw_card(
        f,
        layout.average_card,
        "Average Score",
        Line::from(Span::styled(review.average_display(), bold)),
    );
    let sheet = match &app.config.sheet_url {
        Some(url) => Line::from(truncate_string(url, layout.sheet_card.width.saturating_sub(2) as usize)),
        None => Line::from(Span::styled(
            "not configured",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    };
    draw_card(f, layout.sheet_card, "Online Sheet", sheet);

    if review.is_empty() {
        let empty = Paragraph::new("No results recorded yet.")
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, layout.table_area);
    } else {
        let header = Row::new(vec!["Date", "Name", "ID", "Score", "Time"]).style(bold);
        let rows: Vec<Row> = review
            .results
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(format_result_date(r)),
                    Cell::from(truncate_string(&r.user.name, 30)),
                    Cell::from(r.user.id_number.clone()),
                    Cell::from(format!("{} / {}", r.score, r.total_questions))
                        .style(Style::default().fg(score_color(r.score))),
                    Cell::from(format_duration(r.time_spent_secs)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(18),
                Constraint::Min(12),
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected(Some(app.admin_view.selected_row));
        f.render_stateful_widget(table, layout.table_area, &mut state);
    }

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);
    let mut footer = vec![
        Span::styled("e", if review.can_export() { key_style } else { disabled }),
        Span::from(" Export CSV  "),
        Span::styled("d", if review.can_clear() { key_style } else { disabled }),
        Span::from(" Delete All  "),
        Span::styled("r", key_style),
        Span::from(" Reload  "),
        Span::styled("Esc", key_style),
        Span::from(" Back"),
    ];
    if let Some(message) = &app.admin_view.message {
        footer.push(Span::from("  |  "));
        footer.push(Span::styled(message.clone(), Style::default().fg(Color::Yellow)));
    }
    let help = Paragraph::new(Line::from(footer))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);

    if app.admin_view.confirm_clear {
        draw_clear_confirmation(f);
    }
}

pub fn draw_clear_confirmation(f: &mut Frame) {
    let area = centered_rect(60, 7, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from("Delete ALL stored results?"),
        Line::from("This action cannot be undone."),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Yes, delete  "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" No, keep them"),
        ]),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Delete Results")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, area);
}
