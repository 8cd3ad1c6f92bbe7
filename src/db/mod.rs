pub mod appointments;
pub mod clients;
pub mod products;
pub mod services;
pub mod users;

use chrono::{SecondsFormat, Utc};

/// Timestamps are stored as fixed-width RFC 3339 strings, so the
/// `ORDER BY updated_at DESC` in the list queries sorts chronologically.
pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_sort_lexicographically() {
        let a = now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = now();
        assert!(b > a);
        assert_eq!(a.len(), b.len());
    }
}
