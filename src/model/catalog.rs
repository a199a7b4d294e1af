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

//! Broadcast catalog queries.
//!
//! The catalog is the read-only view over the archive: records are ingested
//! once, ordered newest first, and every lookup and filter works against that
//! fixed listing. Ties on the published date keep their ingestion order, so
//! repeated loads of the same archive always present the same listing.

use crate::error::ArchiveError;
use crate::model::Broadcast;

/// Year filter applied to the catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum YearFilter {
    All,
    Year(i32),
}

impl YearFilter {
    pub(crate) fn label(self) -> String {
        match self {
            YearFilter::All => "All".to_string(),
            YearFilter::Year(year) => year.to_string(),
        }
    }
}

pub(crate) struct Catalog {
    broadcasts: Vec<Broadcast>,
}

impl Catalog {
    /// Ingests records and fixes the catalog ordering, newest published date
    /// first. The sort is stable so records sharing a date stay in the order
    /// the backing store produced them.
    pub(crate) fn new(mut records: Vec<Broadcast>) -> Self {
        records.sort_by(|a, b| b.published.cmp(&a.published));
        Self {
            broadcasts: records,
        }
    }

    pub(crate) fn empty() -> Self {
        Self { broadcasts: vec![] }
    }

    /// The full listing in catalog order.
    pub(crate) fn broadcasts(&self) -> &[Broadcast] {
        &self.broadcasts
    }

    pub(crate) fn len(&self) -> usize {
        self.broadcasts.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.broadcasts.is_empty()
    }

    pub(crate) fn find_by_id(&self, id: i64) -> Result<&Broadcast, ArchiveError> {
        self.broadcasts
            .iter()
            .find(|broadcast| broadcast.id == id)
            .ok_or_else(|| ArchiveError::NotFound(format!("id {id}")))
    }

    pub(crate) fn find_by_content_address(
        &self,
        address: &str,
    ) -> Result<&Broadcast, ArchiveError> {
        self.broadcasts
            .iter()
            .find(|broadcast| broadcast.content_address == address)
            .ok_or_else(|| ArchiveError::NotFound(format!("content address {address}")))
    }

    /// The listing restricted to one publication year. `YearFilter::All` is
    /// the identity and returns the catalog order untouched; a year filter
    /// preserves the relative order of the records it keeps.
    pub(crate) fn filter_by_year(&self, filter: YearFilter) -> Vec<&Broadcast> {
        self.broadcasts
            .iter()
            .filter(|broadcast| match filter {
                YearFilter::All => true,
                YearFilter::Year(year) => broadcast.year() == year,
            })
            .collect()
    }

    /// Distinct publication years, newest first, for the filter bar.
    pub(crate) fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.broadcasts.iter().map(Broadcast::year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}

/// The index after `current` in a listing of `len` rows, wrapping from the
/// last row back to the first. With no current row the first row is next.
pub(crate) fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(i) if i >= len - 1 => Some(0),
        Some(i) => Some(i + 1),
        None => Some(0),
    }
}

/// The index before `current`, wrapping from the first row to the last.
pub(crate) fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(0) | None => Some(len - 1),
        Some(i) => Some(i - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewBroadcast;
    use chrono::NaiveDate;

    fn broadcast(id: i64, date: &str) -> Broadcast {
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
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            broadcast(1, "2023-01-01"),
            broadcast(2, "2024-06-01"),
            broadcast(3, "2023-08-10"),
            broadcast(4, "2023-08-10"),
        ])
    }

    fn ids(list: &[&Broadcast]) -> Vec<i64> {
        list.iter().map(|b| b.id).collect()
    }

    #[test]
    fn listing_is_newest_first_with_stable_ties() {
        let catalog = sample();
        let listed: Vec<i64> = catalog.broadcasts().iter().map(|b| b.id).collect();
        assert_eq!(listed, vec![2, 3, 4, 1]);
    }

    #[test]
    fn all_filter_is_the_identity() {
        let catalog = sample();
        assert_eq!(ids(&catalog.filter_by_year(YearFilter::All)), vec![2, 3, 4, 1]);
    }

    #[test]
    fn year_filter_keeps_catalog_order() {
        let catalog = sample();
        assert_eq!(
            ids(&catalog.filter_by_year(YearFilter::Year(2023))),
            vec![3, 4, 1]
        );
        assert!(catalog.filter_by_year(YearFilter::Year(1999)).is_empty());
    }

    #[test]
    fn years_are_distinct_and_newest_first() {
        assert_eq!(sample().years(), vec![2024, 2023]);
    }

    #[test]
    fn lookups_report_not_found() {
        let catalog = sample();
        assert_eq!(catalog.find_by_id(2).unwrap().content_address, "Qm2");
        assert!(matches!(
            catalog.find_by_id(99),
            Err(ArchiveError::NotFound(_))
        ));

        assert_eq!(catalog.find_by_content_address("Qm3").unwrap().id, 3);
        assert!(matches!(
            catalog.find_by_content_address("QmMissing"),
            Err(ArchiveError::NotFound(_))
        ));
    }

    #[test]
    fn adjacent_indices_wrap_around() {
        assert_eq!(next_index(Some(0), 3), Some(1));
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(previous_index(Some(0), 3), Some(2));
        assert_eq!(previous_index(Some(2), 3), Some(1));
        assert_eq!(previous_index(None, 3), Some(2));
        assert_eq!(next_index(None, 0), None);
        assert_eq!(previous_index(Some(1), 0), None);
    }

    #[test]
    fn two_record_archive_lists_and_wraps_as_published() {
        let catalog = Catalog::new(vec![
            broadcast(1, "2023-01-01"),
            broadcast(2, "2024-06-01"),
        ]);
        let listed: Vec<i64> = catalog.broadcasts().iter().map(|b| b.id).collect();
        assert_eq!(listed, vec![2, 1]);

        // From id 1 (row 1) the next wraps to id 2 (row 0) and back.
        let position = catalog.broadcasts().iter().position(|b| b.id == 1);
        let next = next_index(position, catalog.len()).unwrap();
        assert_eq!(catalog.broadcasts()[next].id, 2);
        let next = next_index(Some(next), catalog.len()).unwrap();
        assert_eq!(catalog.broadcasts()[next].id, 1);
    }
}
