use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::drill::Drill;
use crate::selection::Mode;

const HORIZONTAL_MARGIN: u16 = 5;

/// Discovery is yellow until every combination has been typed once, then the
/// drill phase turns the accents green. Recolored only on reconfiguration.
pub fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Discovery => Color::Yellow,
        Mode::Drill => Color::Green,
    }
}

impl Widget for &Drill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let word = self.session().word();
        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let word_fits = word.slug.width() <= max_chars_per_line as usize;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length((area.height.saturating_sub(7)) / 2),
                    Constraint::Length(1), // mode line
                    Constraint::Length(1),
                    Constraint::Length(1), // the word
                    Constraint::Length(1),
                    Constraint::Length(3), // progress gauge
                    Constraint::Min(0),    // legend
                ]
                .as_ref(),
            )
            .split(area);

        let mode_line = Paragraph::new(Span::styled(
            format!("{} · {} words", self.mode(), self.words_completed()),
            Style::default()
                .fg(mode_color(self.mode()))
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        mode_line.render(chunks[1], buf);

        let typed = self.session().typed();
        let spans = word
            .letters
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                if idx < typed {
                    Span::styled(c.to_string(), green_bold_style)
                } else if idx == typed {
                    Span::styled(c.to_string(), underlined_dim_bold_style)
                } else {
                    Span::styled(c.to_string(), dim_bold_style)
                }
            })
            .collect::<Vec<Span>>();

        let word_widget = Paragraph::new(Line::from(spans))
            .alignment(if word_fits {
                // short combinations sit centered for a zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });
        word_widget.render(chunks[3], buf);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(mode_color(self.mode())))
            .ratio(self.meter.ratio())
            .label(format!("{}", self.meter.target()));
        gauge.render(chunks[5], buf);

        let legend = Paragraph::new(Span::styled(
            "(→) scoreboard / (tab) settings / (esc)ape",
            italic_style,
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[6], buf);
    }
}
