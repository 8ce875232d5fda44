//! Shared values exposed to every course template during one render pass.

use std::fmt::{self, Write as _};

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::AppError;

/// Run name reserved for the shared default policy directory.
pub const RESERVED_RUN_NAME: &str = "_base";

/// Date format accepted on the command line.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used throughout OLX attributes.
pub const OLX_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A calendar timestamp without zone, treated as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The same calendar day at 23:59:59.
    pub fn end_of_day(self) -> Self {
        self.0.date().and_hms_opt(23, 59, 59).map(Self).unwrap_or(self)
    }

    pub fn unix_seconds(&self) -> i64 {
        self.0.and_utc().timestamp()
    }

    /// Format with a strftime pattern, rejecting malformed patterns instead of panicking.
    pub fn strftime(&self, pattern: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(pattern))?;
        Ok(out)
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`, the form OLX expects for start/end attributes.
    pub fn to_olx(&self) -> String {
        self.0.format(OLX_TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

/// Parse a `YYYY-MM-DD` argument into a midnight timestamp.
pub fn parse_date(input: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::InvalidDate(input.to_string()))
}

/// Values shared by every template in a render pass.
///
/// Construction validates the run name and date window; the value is
/// immutable afterwards. The end date always points at 23:59:59 of its day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    run_name: String,
    start_date: Timestamp,
    end_date: Timestamp,
    run_suffix: Option<String>,
    is_public: bool,
}

impl RenderContext {
    pub fn new(
        run_name: impl Into<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        run_suffix: Option<String>,
        is_public: bool,
    ) -> Result<Self, AppError> {
        let run_name = run_name.into();
        validate_run_name(&run_name)?;

        if end_date < start_date {
            return Err(AppError::validation(format!(
                "End date [{}] must be greater than or equal to start date [{}].",
                end_date.format(DATE_INPUT_FORMAT),
                start_date.format(DATE_INPUT_FORMAT)
            )));
        }

        Ok(Self {
            run_name,
            start_date: Timestamp::new(start_date),
            end_date: Timestamp::new(end_date).end_of_day(),
            run_suffix,
            is_public,
        })
    }

    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub fn start_date(&self) -> Timestamp {
        self.start_date
    }

    pub fn end_date(&self) -> Timestamp {
        self.end_date
    }

    pub fn run_suffix(&self) -> Option<&str> {
        self.run_suffix.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }
}

fn validate_run_name(run_name: &str) -> Result<(), AppError> {
    if run_name.is_empty() {
        return Err(AppError::validation("Run name must not be empty."));
    }
    if run_name == RESERVED_RUN_NAME {
        return Err(AppError::validation(
            "This run name is reserved.  Please choose another one.",
        ));
    }
    // The name becomes a path component under policies/ and a branch suffix.
    if run_name == "." || run_name == ".." || run_name.contains(['/', '\\']) {
        return Err(AppError::validation(format!(
            "Invalid run name '{}': must not contain path separators",
            run_name
        )));
    }
    Ok(())
}
