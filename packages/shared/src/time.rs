//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Offset-less ISO-8601 date-time layouts, tried after RFC 3339. Seconds are optional.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset date-time without seconds (`2025-09-22T22:00+09:00`)
const OFFSET_MINUTES_LAYOUT: &str = "%Y-%m-%dT%H:%M%:z";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given instant
    pub fn new(fixed_time: DateTime<Utc>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Parse an ISO-8601 timestamp sent by the backend.
///
/// Accepts, in order:
/// - an RFC 3339 instant or offset date-time (`2025-09-22T13:00:00Z`,
///   `2025-09-22T22:00:00+09:00`), normalized to UTC
/// - the same forms without seconds (`2025-09-22T13:00Z`, `2025-09-22T22:00+09:00`)
/// - an offset-less date-time (`2025-09-22T13:00:00.123456`, `2025-09-22T13:00`),
///   read as UTC
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(input, OFFSET_MINUTES_LAYOUT) {
        return Some(dt.with_timezone(&Utc));
    }

    // `Z` is UTC, so what remains is an offset-less date-time
    let local = input
        .strip_suffix('Z')
        .or_else(|| input.strip_suffix('z'))
        .unwrap_or(input);

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(local, layout).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a timestamp, substituting the clock's "now" when it cannot be read.
///
/// The substitution is lossy; it is logged at debug level only.
pub fn parse_timestamp_or_now(input: &str, clock: &dyn Clock) -> DateTime<Utc> {
    parse_timestamp(input).unwrap_or_else(|| {
        tracing::debug!("Unparsable timestamp {:?}, substituting current time", input);
        clock.now()
    })
}

/// Format an instant as RFC 3339 with second precision (UTC, `Z` suffix)
pub fn to_rfc3339_seconds(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_system_clock_returns_current_time() {
        // テスト項目: SystemClock が現在時刻を返す
        // given (前提条件):
        let clock = SystemClock;
        let before = Utc::now();

        // when (操作):
        let now = clock.now();

        // then (期待する結果):
        let after = Utc::now();
        assert!(now >= before);
        assert!(now <= after);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::new(fixed_instant());

        // when (操作):
        let first = clock.now();
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, fixed_instant());
        assert_eq!(second, fixed_instant());
    }

    #[test]
    fn test_parse_timestamp_utc_instant() {
        // テスト項目: Z 付きの ISO-8601 文字列が UTC として解釈される
        // given (前提条件):
        let input = "2025-09-22T13:00:00Z";

        // when (操作):
        let result = parse_timestamp(input);

        // then (期待する結果):
        assert_eq!(result, Some(Utc.with_ymd_and_hms(2025, 9, 22, 13, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_with_offset_is_normalized() {
        // テスト項目: オフセット付きの文字列が UTC に正規化される
        // given (前提条件):
        let input = "2025-09-22T22:00:00+09:00";

        // when (操作):
        let result = parse_timestamp(input);

        // then (期待する結果):
        assert_eq!(result, Some(Utc.with_ymd_and_hms(2025, 9, 22, 13, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_without_offset_reads_as_utc() {
        // テスト項目: オフセットなしの文字列が UTC として解釈される（小数秒を含む）
        // given (前提条件):
        let input = "2025-09-22T13:00:00.123456";

        // when (操作):
        let result = parse_timestamp(input).unwrap();

        // then (期待する結果):
        assert_eq!(result.timestamp(), 1758546000);
        assert_eq!(result.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_parse_timestamp_without_seconds() {
        // テスト項目: 秒を省略した ISO-8601 文字列も各形式で解釈される
        // given (前提条件):
        let expected = Utc.with_ymd_and_hms(2025, 9, 22, 13, 0, 0).unwrap();
        let inputs = [
            "2025-09-22T13:00Z",
            "2025-09-22T13:00",
            "2025-09-22T22:00+09:00",
            "2025-09-22T08:00-05:00",
            "2025-09-22 13:00",
        ];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert_eq!(parse_timestamp(input), Some(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_timestamp_naive_with_z_suffix() {
        // テスト項目: Z 付きの小数秒を含む文字列が UTC として解釈される
        // given (前提条件):
        let input = "2025-09-22T13:00:00.5Z";

        // when (操作):
        let result = parse_timestamp(input).unwrap();

        // then (期待する結果):
        assert_eq!(result.timestamp(), 1758546000);
        assert_eq!(result.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        // テスト項目: 解釈できない文字列は None になる
        // given (前提条件):
        let inputs = [
            "",
            "yesterday",
            "2025-13-40T99:00:00Z",
            "2025-09-22",
            "2025-09-22T13",
            "Z",
        ];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert_eq!(parse_timestamp(input), None, "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_timestamp_or_now_falls_back_to_clock() {
        // テスト項目: 解釈できない場合は Clock の現在時刻が使われる
        // given (前提条件):
        let clock = FixedClock::new(fixed_instant());

        // when (操作):
        let result = parse_timestamp_or_now("not-a-date", &clock);

        // then (期待する結果):
        assert_eq!(result, fixed_instant());
    }

    #[test]
    fn test_to_rfc3339_seconds_format() {
        // テスト項目: 秒精度の RFC 3339 形式に変換される
        // given (前提条件):
        let dt = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(123);

        // when (操作):
        let result = to_rfc3339_seconds(&dt);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01T00:00:00Z");
    }
}
