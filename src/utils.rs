//! Utility functions for path handling and calendar dates.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

/// Constructs a file system path by joining a directory path with a file name.
///
/// # Arguments
///
/// * `dir_path` - The base directory path
/// * `file_name` - The file or subdirectory name to append
///
/// # Returns
///
/// A `String` containing the joined path. Non UTF-8 components are replaced
/// lossily.
///
/// # Examples
///
/// ```
/// # use waterbuddy::utils::get_path;
/// let path = get_path("/home/user", "waterbuddy.json");
/// assert_eq!(path, "/home/user/waterbuddy.json");
/// ```
pub fn get_path(dir_path: &str, file_name: &str) -> String {
    let path_buf: PathBuf = [dir_path, file_name].iter().collect();
    path_buf.to_string_lossy().into_owned()
}

/// Returns the current calendar day in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns the calendar days from `start` to `end`, both included.
///
/// An empty vector is returned when `start` is after `end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path_with_file() {
        let path = get_path("/var/data", "waterbuddy.json");
        #[cfg(unix)]
        assert_eq!(path, "/var/data/waterbuddy.json");
        #[cfg(windows)]
        assert_eq!(path, "\\var\\data\\waterbuddy.json");
    }

    #[test]
    fn test_get_path_relative_paths() {
        let path = get_path(".", "data");
        #[cfg(unix)]
        assert_eq!(path, "./data");
        #[cfg(windows)]
        assert_eq!(path, ".\\data");
    }

    #[test]
    fn test_get_path_with_spaces() {
        let path = get_path("/home/my folder", "my file.json");
        #[cfg(unix)]
        assert_eq!(path, "/home/my folder/my file.json");
        #[cfg(windows)]
        assert_eq!(path, "\\home\\my folder\\my file.json");
    }

    #[test]
    fn test_date_range_includes_both_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let range = date_range(start, end);

        assert_eq!(range.len(), 4);
        assert_eq!(range[0], start);
        assert_eq!(range[2], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(range[3], end);
    }

    #[test]
    fn test_date_range_empty_when_reversed() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(date_range(start, end).is_empty());
    }
}
