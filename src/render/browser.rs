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

//! Render the archive browser interface.
//!
//! This module provides the visual representation of the broadcast archive:
//! the year filter bar and the listing of broadcasts, with the row belonging
//! to the current playback selection marked by its session state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
};

use crate::{App, render::icons::state_icon, util};

pub(crate) fn draw_archive(f: &mut Frame, area: Rect, app: &mut App) {
    let container = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(area);

    draw_header(f, container[0], app);
    draw_filter_bar(f, container[1], app);
    draw_listing(f, container[2], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let shown = app.browser.rows.len();
    let total = app.catalog.len();

    let count = if shown == total {
        format!("{total} broadcasts")
    } else {
        format!("{shown} of {total} broadcasts")
    };

    let header = Line::from(vec![
        Span::styled(
            "Broadcast Archive",
            Style::default().add_modifier(Modifier::BOLD),
        )
        .fg(app.theme.accent_colour),
        Span::raw("  "),
        Span::styled(count, Style::default().fg(app.theme.table_date_fg)),
    ]);

    f.render_widget(Paragraph::new(header), area);
}

/// Renders the year filter chips, `All` first then the archive years, with
/// the active chip inverted.
fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Year:",
        Style::default().fg(app.theme.table_date_fg),
    )];

    for chip in app.browser.filter_chips() {
        let style = if chip == app.browser.year_filter {
            Style::default()
                .fg(Color::Black)
                .bg(app.theme.accent_colour)
        } else {
            Style::default().fg(app.theme.table_date_fg)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", chip.label()), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_listing(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let session = &app.session;

    if app.browser.rows.is_empty() {
        f.render_widget(
            Paragraph::new("no broadcasts to show")
                .style(Style::default().fg(theme.table_date_fg)),
            area,
        );
        return;
    }

    let rows = app.browser.rows.iter().map(|broadcast| {
        let selected = session.is_selected(broadcast.id);
        let indicator = if selected {
            Line::from(state_icon(session.state()))
                .style(Style::default().fg(theme.accent_colour))
        } else {
            Line::from("")
        };

        let title_fg = if selected {
            theme.accent_colour
        } else {
            theme.table_title_fg
        };

        let size = util::format::format_file_size(broadcast.file_size_mb);

        Row::new(vec![
            Cell::from(indicator),
            Cell::from(
                Line::from(broadcast.id.to_string())
                    .style(Style::default().fg(theme.table_index_fg))
                    .alignment(Alignment::Right),
            ),
            Cell::from(
                Line::from(broadcast.published.to_string())
                    .style(Style::default().fg(theme.table_date_fg)),
            ),
            Cell::from(
                Line::from(broadcast.title.as_str()).style(Style::default().fg(title_fg)),
            ),
            Cell::from(
                Line::from(size)
                    .style(Style::default().fg(theme.table_size_fg))
                    .alignment(Alignment::Right),
            ),
            Cell::from(
                Line::from(broadcast.media_kind.label())
                    .style(Style::default().fg(theme.table_kind_fg)),
            ),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Percentage(60),
            Constraint::Length(9),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from(""),
            Cell::from(Line::from("#").alignment(Alignment::Right)),
            Cell::from("Date"),
            Cell::from("Title"),
            Cell::from(Line::from("Size").alignment(Alignment::Right)),
            Cell::from("Kind"),
        ])
        .style(Style::default().bold().fg(theme.accent_colour))
        .bottom_margin(1),
    )
    .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
    .block(Block::default());

    f.render_stateful_widget(table, area, &mut app.browser.table_state);
}
