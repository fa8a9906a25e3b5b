use std::fmt::{Display, Formatter};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Inclusive calendar range for ranged aggregate queries. `from <= to` always
/// holds for a constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: Date,
    to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::InvalidDateRange {
                from: format_iso_date(from),
                to: format_iso_date(to),
            });
        }
        Ok(Self { from, to })
    }

    pub fn parse_iso(from: &str, to: &str) -> Result<Self, ValidationError> {
        Self::new(parse_iso_date(from)?, parse_iso_date(to)?)
    }

    pub const fn from(&self) -> Date {
        self.from
    }

    pub const fn to(&self) -> Date {
        self.to
    }

    pub fn from_iso(&self) -> String {
        format_iso_date(self.from)
    }

    pub fn to_iso(&self) -> String {
        format_iso_date(self.to)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from_iso(), self.to_iso())
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DateRange", 2)?;
        state.serialize_field("from", &self.from_iso())?;
        state.serialize_field("to", &self.to_iso())?;
        state.end()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| {
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn serializes_and_parses_back_to_the_same_dates() {
        let range = DateRange::new(date!(2023 - 11 - 28), date!(2023 - 11 - 29)).expect("valid");
        assert_eq!(range.from_iso(), "2023-11-28");
        assert_eq!(range.to_iso(), "2023-11-29");

        let echoed = DateRange::parse_iso(&range.from_iso(), &range.to_iso()).expect("parses");
        assert_eq!(echoed, range);
    }

    #[test]
    fn same_day_range_is_allowed() {
        let day = date!(2024 - 02 - 29);
        let range = DateRange::new(day, day).expect("single day is valid");
        assert_eq!(range.from(), range.to());
    }

    #[test]
    fn rejects_from_after_to() {
        let err = DateRange::new(date!(2023 - 11 - 29), date!(2023 - 11 - 28)).expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::InvalidDateRange {
                from: String::from("2023-11-29"),
                to: String::from("2023-11-28"),
            }
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(
            parse_iso_date("11/28/2023"),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_iso_date("2023-02-30"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn serializes_as_iso_strings() {
        let range = DateRange::parse_iso("2023-01-03", "2023-01-31").expect("valid");
        let value = serde_json::to_value(range).expect("serializes");
        assert_eq!(value, serde_json::json!({ "from": "2023-01-03", "to": "2023-01-31" }));
    }
}
