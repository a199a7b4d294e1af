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

//! Archive browser state management.
//!
//! This module provides state for the archive browser widget: the filtered
//! listing currently on screen, the active year filter, and the cursor the
//! user moves through the rows. The cursor is deliberately separate from the
//! playback selection, so browsing never interrupts what is playing.

use ratatui::widgets::TableState;

use crate::model::Broadcast;
use crate::model::catalog::{self, Catalog, YearFilter};

pub(crate) struct ArchiveBrowser {
    pub(crate) rows: Vec<Broadcast>,
    pub(crate) year_filter: YearFilter,
    years: Vec<i32>,

    pub(crate) table_state: TableState,
}

impl ArchiveBrowser {
    pub(crate) fn new() -> Self {
        Self {
            rows: vec![],
            year_filter: YearFilter::All,
            years: vec![],
            table_state: TableState::default(),
        }
    }

    /// Rebuilds the listing after the catalog changed. The active filter is
    /// kept when its year still exists, otherwise it falls back to `All`.
    pub(crate) fn set_catalog(&mut self, catalog: &Catalog) {
        self.years = catalog.years();
        if let YearFilter::Year(year) = self.year_filter
            && !self.years.contains(&year)
        {
            self.year_filter = YearFilter::All;
        }
        self.refresh(catalog);
    }

    pub(crate) fn set_filter(&mut self, catalog: &Catalog, filter: YearFilter) {
        self.year_filter = filter;
        self.refresh(catalog);
    }

    /// Advances the filter bar one chip to the right, from `All` through the
    /// years newest to oldest, wrapping back to `All`.
    pub(crate) fn cycle_filter_forward(&mut self, catalog: &Catalog) {
        let chips = self.filter_chips();
        let current = chips.iter().position(|chip| *chip == self.year_filter);
        if let Some(index) = catalog::next_index(current, chips.len()) {
            self.set_filter(catalog, chips[index]);
        }
    }

    pub(crate) fn cycle_filter_backward(&mut self, catalog: &Catalog) {
        let chips = self.filter_chips();
        let current = chips.iter().position(|chip| *chip == self.year_filter);
        if let Some(index) = catalog::previous_index(current, chips.len()) {
            self.set_filter(catalog, chips[index]);
        }
    }

    /// The filter bar contents, `All` first then the catalog years.
    pub(crate) fn filter_chips(&self) -> Vec<YearFilter> {
        let mut chips = vec![YearFilter::All];
        chips.extend(self.years.iter().map(|year| YearFilter::Year(*year)));
        chips
    }

    fn refresh(&mut self, catalog: &Catalog) {
        self.rows = catalog
            .filter_by_year(self.year_filter)
            .into_iter()
            .cloned()
            .collect();
        self.table_state.select((!self.rows.is_empty()).then_some(0));
    }

    /// The row under the cursor.
    pub(crate) fn selected_row(&self) -> Option<&Broadcast> {
        let index = self.table_state.selected()?;
        self.rows.get(index)
    }

    pub(crate) fn next_row(&mut self) {
        let next = catalog::next_index(self.table_state.selected(), self.rows.len());
        self.table_state.select(next);
    }

    pub(crate) fn previous_row(&mut self) {
        let previous = catalog::previous_index(self.table_state.selected(), self.rows.len());
        self.table_state.select(previous);
    }

    pub(crate) fn first_row(&mut self) {
        self.table_state.select((!self.rows.is_empty()).then_some(0));
    }

    pub(crate) fn last_row(&mut self) {
        let last = self.rows.len().checked_sub(1);
        self.table_state.select(last);
    }

    /// Moves the cursor onto the given broadcast if the filter shows it.
    pub(crate) fn focus_row_by_id(&mut self, id: i64) {
        if let Some(index) = self.rows.iter().position(|row| row.id == id) {
            self.table_state.select(Some(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewBroadcast;
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        let broadcast = |id: i64, date: &str| {
            Broadcast::new(
                id,
                NewBroadcast {
                    content_address: format!("Qm{id}"),
                    title: format!("Broadcast {id}"),
                    file_size_mb: 10.0,
                    published: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                    artwork_address: None,
                },
            )
        };
        Catalog::new(vec![
            broadcast(1, "2023-01-01"),
            broadcast(2, "2024-06-01"),
            broadcast(3, "2023-08-10"),
        ])
    }

    fn row_ids(browser: &ArchiveBrowser) -> Vec<i64> {
        browser.rows.iter().map(|row| row.id).collect()
    }

    #[test]
    fn catalog_load_shows_all_rows_with_the_cursor_on_the_first() {
        let catalog = catalog();
        let mut browser = ArchiveBrowser::new();
        browser.set_catalog(&catalog);

        assert_eq!(row_ids(&browser), vec![2, 3, 1]);
        assert_eq!(browser.selected_row().unwrap().id, 2);
    }

    #[test]
    fn year_filter_restricts_the_rows() {
        let catalog = catalog();
        let mut browser = ArchiveBrowser::new();
        browser.set_catalog(&catalog);

        browser.set_filter(&catalog, YearFilter::Year(2023));
        assert_eq!(row_ids(&browser), vec![3, 1]);

        browser.set_filter(&catalog, YearFilter::All);
        assert_eq!(row_ids(&browser), vec![2, 3, 1]);
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let catalog = catalog();
        let mut browser = ArchiveBrowser::new();
        browser.set_catalog(&catalog);

        browser.last_row();
        assert_eq!(browser.selected_row().unwrap().id, 1);
        browser.next_row();
        assert_eq!(browser.selected_row().unwrap().id, 2);
        browser.previous_row();
        assert_eq!(browser.selected_row().unwrap().id, 1);
    }

    #[test]
    fn filter_chips_cycle_through_all_and_the_years() {
        let catalog = catalog();
        let mut browser = ArchiveBrowser::new();
        browser.set_catalog(&catalog);

        assert_eq!(browser.year_filter, YearFilter::All);
        browser.cycle_filter_forward(&catalog);
        assert_eq!(browser.year_filter, YearFilter::Year(2024));
        browser.cycle_filter_forward(&catalog);
        assert_eq!(browser.year_filter, YearFilter::Year(2023));
        browser.cycle_filter_forward(&catalog);
        assert_eq!(browser.year_filter, YearFilter::All);

        browser.cycle_filter_backward(&catalog);
        assert_eq!(browser.year_filter, YearFilter::Year(2023));
    }

    #[test]
    fn focus_follows_a_broadcast_only_when_visible() {
        let catalog = catalog();
        let mut browser = ArchiveBrowser::new();
        browser.set_catalog(&catalog);

        browser.focus_row_by_id(1);
        assert_eq!(browser.selected_row().unwrap().id, 1);

        browser.set_filter(&catalog, YearFilter::Year(2024));
        browser.focus_row_by_id(1);
        assert_eq!(browser.selected_row().unwrap().id, 2);
    }
}
