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

//! Render the broadcast details panel.
//!
//! This module provides a floating panel describing the broadcast under the
//! browser cursor: its catalog record, the addresses it resolves to on the
//! gateway, and its playback state when it is the current selection.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{
    App,
    render::icons::{kind_icon, state_icon},
    util,
};

pub(crate) fn draw_details(f: &mut Frame, area: Rect, app: &App) {
    let Some(broadcast) = app.browser.selected_row() else {
        return;
    };

    let theme = &app.theme;
    let gateway = &app.config.gateway_url;

    let label_style = Style::default().fg(theme.table_date_fg);
    let value_style = Style::default().fg(theme.table_title_fg);

    let row = |label: &'static str, value: Span<'static>| {
        Line::from(vec![Span::styled(format!("{label:<18}"), label_style), value])
    };

    let artwork = broadcast
        .artwork_url(gateway, app.config.fallback_artwork.as_deref())
        .unwrap_or_else(|| "none".to_string());

    let mut lines = vec![
        row(
            "Title",
            Span::styled(
                broadcast.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(theme.accent_colour),
        ),
        row(
            "Published",
            Span::styled(
                util::format::format_date_long(broadcast.published),
                value_style,
            ),
        ),
        row(
            "Media",
            Span::styled(
                format!(
                    "{} {}, {}",
                    kind_icon(broadcast.media_kind),
                    broadcast.media_kind.label(),
                    util::format::format_file_size(broadcast.file_size_mb)
                ),
                value_style,
            ),
        ),
        row(
            "Content address",
            Span::styled(broadcast.content_address.clone(), value_style),
        ),
        row(
            "Stream",
            Span::styled(broadcast.stream_url(gateway), value_style),
        ),
        row("Artwork", Span::styled(artwork, value_style)),
    ];

    if app.session.is_selected(broadcast.id) {
        let session = &app.session;
        lines.push(Line::from(""));
        lines.push(row(
            "Playback",
            Span::styled(
                format!(
                    "{} {} / {}",
                    state_icon(session.state()),
                    util::format::format_time(session.position() as u64),
                    util::format::format_time(session.duration() as u64)
                ),
                value_style,
            ),
        ));
    }

    let height = lines.len() as u16 + 2;
    let popup = centered_rect(area, 70, height);

    let block = Block::default()
        .title(format!(" Broadcast {} ", broadcast.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_colour))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(theme.background_colour));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A rectangle of the given height, centered in `area` and spanning the
/// given percentage of its width.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
