use crate::app::App;
use crate::models::{percentage, DispatchStatus};
use crate::ui::layout::centered_rect;
use crate::utils::{format_duration, share_text, Grade};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn dispatch_banner(status: DispatchStatus, error: Option<&str>) -> Option<Line<'static>> {
    let (text, color) = match status {
        DispatchStatus::Idle => return None,
        DispatchStatus::Saving => ("Saving result to the cloud...".to_string(), Color::Blue),
        DispatchStatus::Success => ("Result saved successfully".to_string(), Color::Green),
        DispatchStatus::Error => (
            match error {
                Some(e) => format!("Could not save to the cloud ({})", e),
                None => "Could not save to the cloud".to_string(),
            },
            Color::Red,
        ),
    };
    Some(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
}

fn score_breakdown(score: u32, total: u32) -> String {
    format!("Correct: {}    Incorrect: {}", score, total.saturating_sub(score))
}

pub fn draw_summary(f: &mut Frame, app: &App) {
    let state = app.controller.state();
    let total = app.controller.questions().len() as u32;
    let pct = percentage(state.score, total);
    let grade = Grade::from_percentage(pct);
    let elapsed = state.time_spent_secs();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = match &state.user {
        Some(user) => format!("Results - {} ({})", user.name, user.id_number),
        None => "Results".to_string(),
    };
    let title = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let grade_color = match grade {
        Grade::Excellent => Color::Green,
        Grade::Good => Color::Yellow,
        Grade::NeedsWork => Color::Red,
    };

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(Span::styled(
        format!("{} / {}", state.score, total),
        Style::default()
            .fg(grade_color)
            .add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(format!("{}%", pct)));
    summary_text.push_line(Line::from(score_breakdown(state.score, total)));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(Span::styled(
        grade.message(),
        Style::default().fg(grade_color),
    )));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(format!("Time used: {}", format_duration(elapsed))));
    summary_text.push_line(Line::from(""));
    if let Some(banner) = dispatch_banner(app.dispatcher.status(), app.dispatcher.last_error()) {
        summary_text.push_line(banner);
    }
    if let Some(error) = app.dispatcher.local_error() {
        summary_text.push_line(Line::from(Span::styled(
            format!("Local copy could not be saved: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let summary = Paragraph::new(summary_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, chunks[1]);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("s", key_style),
        Span::from(" Share Result  "),
        Span::styled("r", key_style),
        Span::from(" Back to Start  "),
        Span::styled("Esc", key_style),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    if app.show_share
        && let Some(user) = &state.user
    {
        let area = centered_rect(70, 9, f.area());
        f.render_widget(Clear, area);
        let share = Paragraph::new(share_text(user, state.score, total, elapsed))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Share (any key to close)")
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(share, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_hidden_when_idle() {
        assert!(dispatch_banner(DispatchStatus::Idle, None).is_none());
    }

    #[test]
    fn test_score_breakdown() {
        assert_eq!(score_breakdown(19, 20), "Correct: 19    Incorrect: 1");
        assert_eq!(score_breakdown(0, 20), "Correct: 0    Incorrect: 20");
    }

    #[test]
    fn test_banner_includes_error() {
        let line = dispatch_banner(DispatchStatus::Error, Some("no remote endpoint configured")).unwrap();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("no remote endpoint configured"));
    }
}
