use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Bar key: an instant guaranteed to be UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Convert a provider `t` field (milliseconds since the Unix epoch).
    pub fn from_unix_millis(millis: i64) -> Result<Self, ValidationError> {
        let nanos = i128::from(millis) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map(Self)
            .map_err(|_| ValidationError::TimestampOutOfRange { value: millis })
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| {
            ValidationError::TimestampNotUtc {
                value: input.to_owned(),
            }
        })?;

        if parsed.offset() != UtcOffset::UTC {
            return Err(ValidationError::TimestampNotUtc {
                value: input.to_owned(),
            });
        }

        Ok(Self(parsed))
    }

    /// Milliseconds since the Unix epoch, saturating at the `i64` bounds.
    pub fn unix_millis(self) -> i64 {
        let millis = self.0.unix_timestamp_nanos() / 1_000_000;
        i64::try_from(millis).unwrap_or(if millis < 0 { i64::MIN } else { i64::MAX })
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_epoch_millis_to_utc_instant() {
        let ts = UtcDateTime::from_unix_millis(1_700_000_000_000).expect("in range");
        assert_eq!(ts.format_rfc3339(), "2023-11-14T22:13:20Z");
        assert_eq!(ts.unix_millis(), 1_700_000_000_000);
    }

    #[test]
    fn keeps_sub_second_precision() {
        let ts = UtcDateTime::from_unix_millis(1_700_000_000_250).expect("in range");
        assert_eq!(ts.format_rfc3339(), "2023-11-14T22:13:20.25Z");
    }

    #[test]
    fn rejects_out_of_range_millis() {
        let err = UtcDateTime::from_unix_millis(i64::MAX).expect_err("must fail");
        assert!(matches!(err, ValidationError::TimestampOutOfRange { .. }));
    }

    #[test]
    fn parsed_extremes_convert_to_millis() {
        let late = UtcDateTime::parse("9999-12-31T23:59:59.999Z").expect("valid");
        assert_eq!(late.unix_millis(), 253_402_300_799_999);

        let early = UtcDateTime::parse("0000-01-01T00:00:00Z").expect("valid");
        assert_eq!(early.unix_millis(), -62_167_219_200_000);
        assert_eq!(UtcDateTime::from_unix_millis(early.unix_millis()), Ok(early));
    }

    #[test]
    fn rejects_non_utc_timestamp() {
        let err = UtcDateTime::parse("2024-01-01T01:00:00+01:00").expect_err("must fail");
        assert!(matches!(err, ValidationError::TimestampNotUtc { .. }));
    }
}
