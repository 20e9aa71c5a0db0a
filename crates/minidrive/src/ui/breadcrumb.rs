//! Breadcrumb bar rendering

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const SEPARATOR: &str = " › ";

/// Breadcrumb as plain text, e.g. `My Drive › Projects › Web App`
pub fn plain(path: &[String]) -> String {
    path.join(SEPARATOR)
}

/// Styled breadcrumb bar.
///
/// Each element is prefixed with the number that jumps to it.
/// The back arrow is dimmed when there is nothing to go back to.
pub fn line(path: &[String], can_go_back: bool) -> Line<'static> {
    let back_style = if can_go_back {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled("← ", back_style)];
    let last = path.len().saturating_sub(1);

    for (index, name) in path.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::Gray)));
        }

        spans.push(Span::styled(
            format!("{}:", index),
            Style::default().fg(Color::DarkGray),
        ));

        let label = if index == 0 {
            format!("⌂ {}", name)
        } else {
            name.clone()
        };

        let style = if index == last {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
    }

    Line::from(spans)
}
