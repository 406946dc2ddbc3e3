// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Render the stopwatch panel.
//!
//! Shows the split time, the current lap and lap count, and the two buttons
//! with their current labels.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    model::RunningState,
    render::icons::{ICON_EMPTY, ICON_LAP, ICON_RUNNING, ICON_STOPPED},
};

/// Renders the main stopwatch widget.
pub(crate) fn draw_stopwatch(f: &mut Frame, area: Rect, app: &App) {
    let running_state = app.stopwatch.running_state();

    let (icon, time_colour) = match running_state {
        RunningState::Running => (ICON_RUNNING, app.theme.running_colour),
        RunningState::Stopped => (ICON_STOPPED, app.theme.stopped_colour),
        RunningState::Empty => (ICON_EMPTY, app.theme.stopped_colour),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .title(format!(" {} {} ", icon, app.stopwatch.name()))
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let display = &app.display;

    let split = Paragraph::new(Span::styled(
        &display.split_time,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .fg(time_colour)
    .alignment(Alignment::Center);
    f.render_widget(split, chunks[1]);

    let lap_line = Line::from(vec![
        Span::styled(format!("{} Lap {} ", ICON_LAP, display.lap_number), Style::default().fg(Color::White)),
        Span::styled(&display.lap_time, Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.lap_fg),
    ]);
    f.render_widget(Paragraph::new(lap_line).alignment(Alignment::Center), chunks[3]);

    let buttons_line = Line::from(vec![
        Span::styled("[space] ", Style::default()).fg(app.theme.key_hint_fg),
        Span::styled(display.primary_label.to_string(), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.button_fg),
        Span::raw("    "),
        Span::styled("[enter] ", Style::default()).fg(app.theme.key_hint_fg),
        Span::styled(display.secondary_label.to_string(), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.button_fg),
    ]);
    f.render_widget(Paragraph::new(buttons_line).alignment(Alignment::Center), chunks[5]);
}
