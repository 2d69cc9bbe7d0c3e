use crate::models::{FormField, PasswordPrompt, WelcomeForm, QUIZ_DURATION};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn draw_input(f: &mut Frame, area: Rect, title: &str, value: &str, placeholder: &str, focused: bool) {
    let (text, style) = if value.is_empty() {
        (
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        (value.to_string(), Style::default())
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    );
    f.render_widget(input, area);

    if focused {
        let cursor_x = area.x + 1 + value.chars().count() as u16;
        f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

pub fn draw_welcome(f: &mut Frame, form: &WelcomeForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Mathematics Assessment")
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let typing = form.admin_prompt.is_none();
    draw_input(
        f,
        chunks[1],
        "Full Name",
        &form.name,
        "e.g. Juan Pérez",
        typing && form.focus == FormField::Name,
    );
    draw_input(
        f,
        chunks[2],
        "ID Number",
        &form.id_number,
        "e.g. 0912345678",
        typing && form.focus == FormField::IdNumber,
    );

    if let Some(error) = &form.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[3]);
    }

    let rules = vec![
        Line::from("• The test has 20 questions."),
        Line::from("• Each correct answer is worth 1 point."),
        Line::from(format!("• Time limit: {} minutes.", QUIZ_DURATION / 60)),
        Line::from("• You cannot go back to previous questions."),
    ];
    let instructions = Paragraph::new(rules)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Instructions"));
    f.render_widget(instructions, chunks[4]);

    let help_text = vec![Line::from(vec![
        Span::styled("Tab", key_style()),
        Span::from(" Switch Field  "),
        Span::styled("Enter", key_style()),
        Span::from(" Start  "),
        Span::styled("F2", key_style()),
        Span::from(" Admin Access  "),
        Span::styled("Esc", key_style()),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[5]);

    if let Some(prompt) = &form.admin_prompt {
        draw_admin_prompt(f, prompt);
    }
}

fn draw_admin_prompt(f: &mut Frame, prompt: &PasswordPrompt) {
    let area = centered_rect(60, 9, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Admin Access")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let intro = Paragraph::new("Enter the password to open the results panel.")
        .wrap(Wrap { trim: true });
    f.render_widget(intro, rows[0]);

    let masked = "*".repeat(prompt.input.chars().count());
    let input = Paragraph::new(masked.as_str())
        .block(Block::default().borders(Borders::ALL).title("Password"));
    f.render_widget(input, rows[1]);
    f.set_cursor_position((rows[1].x + 1 + masked.len() as u16, rows[1].y + 1));

    if let Some(error) = &prompt.error {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error, rows[2]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Enter", key_style()),
        Span::from(" Sign In  "),
        Span::styled("Esc", key_style()),
        Span::from(" Cancel"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(help, rows[3]);
}
