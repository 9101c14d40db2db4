// Recency ranking
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use clankfeed_api::RawCast;
use tracing::warn;

use crate::{Error, Result};

/// Number of posts in a feed page
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Parse a cast timestamp.
///
/// RFC 3339 first; an ISO-8601 date-time without an offset is read as UTC.
pub fn parse_timestamp(cast: &RawCast) -> Result<DateTime<FixedOffset>> {
    let id = cast.hash.clone().unwrap_or_default();
    let value = cast
        .timestamp
        .as_deref()
        .ok_or_else(|| Error::InvalidTimestamp {
            id: id.clone(),
            value: String::new(),
        })?;

    DateTime::parse_from_rfc3339(value)
        .ok()
        .or_else(|| parse_naive_utc(value))
        .ok_or_else(|| Error::InvalidTimestamp {
            id,
            value: value.to_string(),
        })
}

fn parse_naive_utc(value: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(FixedOffset::east_opt(0)?.from_utc_datetime(&naive))
}

/// Newest first, stable on ties, truncated to `page_size`.
///
/// Casts whose timestamp does not parse are logged and left out.
pub fn rank(casts: Vec<RawCast>, page_size: usize) -> Vec<RawCast> {
    let mut dated: Vec<(DateTime<FixedOffset>, RawCast)> = casts
        .into_iter()
        .filter_map(|cast| match parse_timestamp(&cast) {
            Ok(ts) => Some((ts, cast)),
            Err(e) => {
                warn!("Skipping cast in ranking: {}", e);
                None
            }
        })
        .collect();

    // sort_by is stable, so equal instants keep input order
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));
    dated.truncate(page_size);

    dated.into_iter().map(|(_, cast)| cast).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(hash: &str, timestamp: &str) -> RawCast {
        RawCast {
            hash: Some(hash.to_string()),
            text: Some("@clanker deploy".to_string()),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        }
    }

    fn hashes(casts: &[RawCast]) -> Vec<&str> {
        casts.iter().filter_map(|c| c.hash.as_deref()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let input = vec![
            cast("old", "2024-01-01T00:00:00Z"),
            cast("new", "2024-03-01T00:00:00.000Z"),
            cast("mid", "2024-02-01T00:00:00+00:00"),
        ];

        assert_eq!(hashes(&rank(input, DEFAULT_PAGE_SIZE)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_offsets_compare_as_instants() {
        // 10:00+02:00 is 08:00Z, earlier than 09:00Z
        let input = vec![
            cast("plus_two", "2024-01-01T10:00:00+02:00"),
            cast("utc", "2024-01-01T09:00:00Z"),
        ];

        assert_eq!(hashes(&rank(input, DEFAULT_PAGE_SIZE)), vec!["utc", "plus_two"]);
    }

    #[test]
    fn test_timestamps_without_offset_are_utc() {
        let input = vec![
            cast("zulu", "2024-11-20T10:00:00Z"),
            cast("naive", "2024-11-20T10:30:00.000"),
            cast("naive_whole", "2024-11-20T09:00:00"),
        ];

        assert_eq!(hashes(&rank(input, DEFAULT_PAGE_SIZE)), vec!["naive", "zulu", "naive_whole"]);

        let parsed = parse_timestamp(&cast("x", "2024-11-20T10:00:00")).unwrap();
        assert_eq!(parsed, DateTime::parse_from_rfc3339("2024-11-20T10:00:00Z").unwrap());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let input = vec![
            cast("a", "2024-01-01T00:00:00Z"),
            cast("b", "2024-01-01T00:00:00Z"),
            cast("c", "2024-01-01T00:00:00Z"),
        ];

        assert_eq!(hashes(&rank(input, DEFAULT_PAGE_SIZE)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_truncates_to_page_size() {
        let input: Vec<RawCast> = (0..40)
            .map(|i| cast(&format!("c{}", i), &format!("2024-01-01T00:{:02}:00Z", i)))
            .collect();

        let ranked = rank(input, DEFAULT_PAGE_SIZE);
        assert_eq!(ranked.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(ranked[0].hash.as_deref(), Some("c39"));

        let instants: Vec<_> = ranked.iter().map(|c| parse_timestamp(c).unwrap()).collect();
        assert!(instants.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_short_input_keeps_everything() {
        let input = vec![cast("a", "2024-01-01T00:00:00Z"), cast("b", "2024-01-02T00:00:00Z")];
        assert_eq!(rank(input, DEFAULT_PAGE_SIZE).len(), 2);
    }

    #[test]
    fn test_unparseable_timestamps_are_excluded() {
        let mut missing = cast("missing", "");
        missing.timestamp = None;
        let input = vec![
            cast("good", "2024-01-01T00:00:00Z"),
            cast("bad", "yesterday"),
            missing,
        ];

        assert_eq!(hashes(&rank(input, DEFAULT_PAGE_SIZE)), vec!["good"]);
    }

    #[test]
    fn test_parse_timestamp_error_carries_context() {
        match parse_timestamp(&cast("0xbad", "not a date")) {
            Err(Error::InvalidTimestamp { id, value }) => {
                assert_eq!(id, "0xbad");
                assert_eq!(value, "not a date");
            }
            other => panic!("expected InvalidTimestamp, got {:?}", other),
        }
    }
}
