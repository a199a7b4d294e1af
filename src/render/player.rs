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

//! Render the stream player interface.
//!
//! This module provides the visual representation of the playback session:
//! the selected broadcast, the playback clock, and the volume and position
//! gauges. Loading and error conditions take over the line below the
//! broadcast info, so the listing itself stays untouched by playback
//! trouble.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    model::session::SessionState,
    render::icons::{ICON_MUTED, ICON_VOLUME, state_icon},
    util,
};

/// Renders the main player widget including broadcast info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[0]);

    if let Some(broadcast) = session.selected() {
        let icon = state_icon(session.state());

        let info_line = Line::from(vec![
            Span::styled(
                format!(" {} ", icon),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(Color::White),
            Span::styled(
                broadcast.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(theme.accent_colour),
            Span::raw(" published "),
            Span::styled(
                util::format::format_date_long(broadcast.published),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(theme.accent_colour),
            Span::raw(format!(
                " ({}, {})",
                broadcast.media_kind.label(),
                util::format::format_file_size(broadcast.file_size_mb)
            )),
        ]);
        f.render_widget(Paragraph::new(info_line), info_chunks[0]);

        if session.duration() > 0.0 {
            let duration = session.duration() as u64;
            let position = session.position() as u64;
            let remaining = duration.saturating_sub(position);

            let time_line = Line::from(vec![
                Span::styled(
                    util::format::format_time(position),
                    Style::default().add_modifier(Modifier::BOLD),
                )
                .fg(theme.accent_colour),
                Span::styled(" / ", Style::default().add_modifier(Modifier::BOLD))
                    .fg(Color::White),
                Span::styled(
                    util::format::format_time(duration),
                    Style::default().add_modifier(Modifier::BOLD),
                )
                .fg(theme.accent_colour),
                Span::styled(" (-", Style::default().add_modifier(Modifier::BOLD))
                    .fg(Color::White),
                Span::styled(
                    util::format::format_time(remaining),
                    Style::default().add_modifier(Modifier::BOLD),
                )
                .fg(theme.accent_colour),
                Span::styled(")", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            ]);

            let time_p = Paragraph::new(time_line).alignment(Alignment::Right);

            f.render_widget(time_p, info_chunks[1]);
        }
    }

    draw_status(f, chunks[1], app);

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[2]);

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(control_chunks[1]);

    let volume_icon = if session.muted() {
        ICON_MUTED
    } else {
        ICON_VOLUME
    };
    f.render_widget(Paragraph::new(volume_icon), volume_layout[0]);

    let volume_fg = if session.muted() {
        theme.border_colour
    } else {
        theme.accent_colour
    };

    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(volume_fg)
                .bg(theme.gauge_track_colour),
        )
        .ratio(session.volume())
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[1]);

    let volume_label = Paragraph::new(format!(" {:.0}%", session.volume() * 100.0))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, volume_layout[2]);

    let position_fg = if session.state() == SessionState::Errored {
        theme.error_colour
    } else {
        theme.accent_colour
    };

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(position_fg)
                .bg(theme.gauge_track_colour),
        )
        .ratio(session.progress())
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}

/// Renders the loading and error line. Empty for the steady states.
fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;

    match session.state() {
        SessionState::Loading => {
            f.render_widget(
                Paragraph::new(" fetching stream from the gateway \u{2026}")
                    .style(Style::default().fg(app.theme.table_date_fg)),
                area,
            );
        }

        SessionState::Errored => {
            let message = session
                .last_error()
                .map(|error| error.to_string())
                .unwrap_or_else(|| "playback failed".to_string());

            let error_line = Line::from(vec![
                Span::styled(format!(" {message}"), Style::default().fg(app.theme.error_colour)),
                Span::styled(
                    "  (press r to retry)",
                    Style::default().fg(app.theme.table_date_fg),
                ),
            ]);
            f.render_widget(Paragraph::new(error_line), area);
        }

        _ => {}
    }
}
