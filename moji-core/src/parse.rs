//! Leaf parsers for the provider's textual fields.

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone};

use crate::{error::TemporalParseError, model::WindLevel};

/// Fixed layouts used by the provider for temporal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `YYYY-MM-DD HH:MM:SS`, used by update-time fields.
    Full,
    /// `YYYY-MM-DD`, used by predicted dates. Resolves to local midnight.
    DateOnly,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Full => "YYYY-MM-DD HH:MM:SS",
            Layout::DateOnly => "YYYY-MM-DD",
        }
    }

    fn chrono_format(&self) -> &'static str {
        match self {
            Layout::Full => "%Y-%m-%d %H:%M:%S",
            Layout::DateOnly => "%Y-%m-%d",
        }
    }

    /// Digits where the layout has a letter, everything else must match literally.
    fn matches_shape(&self, input: &str) -> bool {
        let pattern = self.as_str().as_bytes();
        let input = input.as_bytes();

        pattern.len() == input.len()
            && pattern.iter().zip(input).all(|(p, c)| {
                if p.is_ascii_alphabetic() {
                    c.is_ascii_digit()
                } else {
                    p == c
                }
            })
    }
}

/// Split on `-`; the first segment sets both bounds, a second one overrides `high`
/// and any further segments are ignored.
/// Segments that fail to parse are ignored, so this never fails.
pub fn parse_wind_level(input: &str) -> WindLevel {
    let mut tokens = input.split('-');
    let (mut low, mut high) = (0, 0);

    if let Some(Ok(val)) = tokens.next().map(str::parse::<i32>) {
        low = val;
        high = val;
    }

    if let Some(Ok(val)) = tokens.next().map(str::parse::<i32>) {
        high = val;
    }

    WindLevel::new(low, high)
}

/// Parse `input` in the local time zone using exactly the given layout.
pub fn parse_local(input: &str, layout: Layout) -> Result<DateTime<Local>, TemporalParseError> {
    if !layout.matches_shape(input) {
        return Err(TemporalParseError::Layout {
            input: input.to_string(),
            layout: layout.as_str(),
        });
    }

    let out_of_range = || TemporalParseError::OutOfRange {
        input: input.to_string(),
    };

    let naive = match layout {
        Layout::Full => NaiveDateTime::parse_from_str(input, layout.chrono_format())
            .map_err(|_| out_of_range())?,
        Layout::DateOnly => chrono::NaiveDate::parse_from_str(input, layout.chrono_format())
            .map_err(|_| out_of_range())?
            .and_time(NaiveTime::MIN),
    };

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        // Repeated wall-clock hour: take the first occurrence.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(TemporalParseError::Nonexistent {
            input: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn single_wind_level() {
        for n in [0, 1, 3, 12, 17] {
            assert_eq!(parse_wind_level(&n.to_string()), WindLevel::single(n));
        }
    }

    #[test]
    fn ranged_wind_level() {
        assert_eq!(parse_wind_level("3-4"), WindLevel::new(3, 4));
        assert_eq!(parse_wind_level("0-12"), WindLevel::new(0, 12));
    }

    #[test]
    fn garbled_wind_level_defaults_to_zero() {
        for input in ["", "abc", "-", "微风", " 3"] {
            assert_eq!(parse_wind_level(input), WindLevel::default(), "{input:?}");
        }
    }

    #[test]
    fn bad_upper_bound_keeps_first_segment() {
        assert_eq!(parse_wind_level("3-x"), WindLevel::single(3));
        assert_eq!(parse_wind_level("3-"), WindLevel::single(3));
    }

    #[test]
    fn segments_after_the_second_are_ignored() {
        let level = parse_wind_level("3-4-5");
        assert_eq!((level.low(), level.high()), (3, 4));
        assert_eq!(parse_wind_level("2-x-9"), WindLevel::single(2));
    }

    #[test]
    fn bad_lower_bound_still_reads_upper() {
        assert_eq!(parse_wind_level("x-4"), WindLevel::new(0, 4));
    }

    #[test]
    fn full_layout_parses_local_time() {
        let dt = parse_local("2016-09-01 10:00:00", Layout::Full).expect("valid timestamp");
        let expected = Local
            .with_ymd_and_hms(2016, 9, 1, 10, 0, 0)
            .single()
            .expect("unambiguous local time");

        assert_eq!(dt, expected);
    }

    #[test]
    fn full_layout_keeps_seconds() {
        let dt = parse_local("2016-09-01 10:20:37", Layout::Full).expect("valid timestamp");
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 20, 37));
    }

    #[test]
    fn date_only_layout_resolves_to_midnight() {
        let dt = parse_local("2016-09-01", Layout::DateOnly).expect("valid date");
        assert_eq!((dt.year(), dt.month(), dt.day()), (2016, 9, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn formatting_a_parsed_timestamp_gives_back_the_input() {
        for input in ["2016-01-31 23:59:59", "2020-02-29 00:00:00", "1999-12-31 12:30:05"] {
            let dt = parse_local(input, Layout::Full).expect("valid timestamp");
            assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), input);
        }
    }

    #[test]
    fn out_of_range_components_fail() {
        for input in ["2016-13-01 00:00:00", "2016-02-30 00:00:00", "2016-09-01 24:00:00"] {
            let err = parse_local(input, Layout::Full).unwrap_err();
            assert!(matches!(err, TemporalParseError::OutOfRange { .. }), "{input}");
        }
        assert!(parse_local("2015-02-29", Layout::DateOnly).is_err());
    }

    #[test]
    fn wrong_layout_fails() {
        let inputs = [
            "2016-09-01",
            "",
            "2016-9-1 10:00:00",
            "2016-09-01T10:00:00",
            "2016-09-01 10:00",
        ];
        for input in inputs {
            let err = parse_local(input, Layout::Full).unwrap_err();
            assert!(matches!(err, TemporalParseError::Layout { .. }), "{input:?}");
        }
        assert!(parse_local("2016-09-01 10:00:00", Layout::DateOnly).is_err());
        assert!(parse_local("+016-09-01", Layout::DateOnly).is_err());
    }
}
