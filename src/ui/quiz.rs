use crate::app::App;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::format_clock;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

const LOW_TIME_SECS: u32 = 60;

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let Some(question) = app.controller.current_question() else {
        return;
    };
    let state = app.controller.state();
    let total = app.controller.questions().len();
    let layout = calculate_quiz_chunks(f.area());

    let participant = state
        .user
        .as_ref()
        .map(|u| u.name.as_str())
        .unwrap_or_default();
    let clock_style = if state.time_remaining_secs <= LOW_TIME_SECS {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                "Question {} / {}",
                state.current_question_index + 1,
                total
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!("  -  {}  -  ", participant)),
        Span::styled(format!("⏱ {}", format_clock(state.time_remaining_secs)), clock_style),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let ratio = if total == 0 {
        0.0
    } else {
        state.current_question_index as f64 / total as f64
    };
    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(ratio)
        .label("");
    f.render_widget(progress, layout.progress_area);

    let prompt = Paragraph::new(Text::from(question.prompt.as_str()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    let view = &app.quiz_view;
    let mut options = Text::default();
    for (i, option) in question.options.iter().enumerate() {
        let marker = if view.cursor == i { "▶" } else { " " };
        let style = match view.locked {
            Some(_) if i == question.correct_option => {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            }
            Some(locked) if i == locked => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if view.cursor == i => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            None => Style::default(),
        };
        options.push_line(Line::from(Span::styled(
            format!("{} {}. {}", marker, i + 1, option),
            style,
        )));
        options.push_line(Line::from(""));
    }

    if let Some(locked) = view.locked {
        let (verdict, color) = if locked == question.correct_option {
            ("Correct!", Color::Green)
        } else {
            ("Incorrect", Color::Red)
        };
        options.push_line(Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        options.push_line(Line::from(question.explanation.as_str()));
    }

    let options_title = if view.locked.is_some() {
        "Options (Enter for next question)"
    } else {
        "Options (Enter to answer)"
    };
    let options = Paragraph::new(options)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options, layout.options_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = if view.locked.is_some() {
        vec![Line::from(vec![
            Span::styled("Enter", key_style),
            Span::from(if state.current_question_index + 1 == total {
                " Finish  "
            } else {
                " Next Question  "
            }),
            Span::styled("Ctrl+C", key_style),
            Span::from(" Exit App"),
        ])]
    } else {
        vec![Line::from(vec![
            Span::styled("↑/↓", key_style),
            Span::from(" Navigate  "),
            Span::styled("1-4", key_style),
            Span::from(" Choose  "),
            Span::styled("Enter", key_style),
            Span::from(" Answer  "),
            Span::styled("Ctrl+C", key_style),
            Span::from(" Exit App"),
        ])]
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
