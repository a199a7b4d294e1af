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

use chrono::NaiveDate;

/// Formats a duration in seconds into a human-readable clock string.
///
/// Durations under an hour render as `MM:SS`; anything longer gains an
/// hours component. Archived broadcasts routinely run for several hours.
///
/// # Arguments
///
/// * `total_seconds` - The duration to format, represented as a 64-bit integer.
pub(crate) fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Formats a file size given in megabytes, promoting to gigabytes past
/// 1024 MB.
pub(crate) fn format_file_size(size_mb: f64) -> String {
    if size_mb >= 1024.0 {
        format!("{:.1} GB", size_mb / 1024.0)
    } else {
        format!("{:.1} MB", size_mb)
    }
}

/// Formats a publication date in the long form used by the player and the
/// details panel, e.g. `June 5, 2023`.
pub(crate) fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_durations_render_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn long_durations_gain_an_hours_component() {
        assert_eq!(format_time(3600), "1:00:00");
        assert_eq!(format_time(7325), "2:02:05");
    }

    #[test]
    fn file_sizes_promote_to_gigabytes() {
        assert_eq!(format_file_size(87.3), "87.3 MB");
        assert_eq!(format_file_size(1536.0), "1.5 GB");
    }

    #[test]
    fn dates_render_in_long_form() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 5).unwrap();
        assert_eq!(format_date_long(date), "June 5, 2023");
    }
}
