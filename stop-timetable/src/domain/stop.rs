//! Stop and locality identifier types.

use std::fmt;

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code: {reason}")]
pub struct InvalidStopCode {
    reason: &'static str,
}

/// Error returned when parsing an invalid locality identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid locality id: {reason}")]
pub struct InvalidLocalityId {
    reason: &'static str,
}

/// Shared validation for the opaque identifiers used by the dataset.
///
/// Both ATCO codes and gazetteer ids are compared byte-for-byte against the
/// schedule files, so we only reject values that can never match anything.
fn validate(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("must not be empty");
    }
    if s.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace");
    }
    Ok(())
}

/// An ATCO code identifying one physical stop.
///
/// The code is opaque: no structure is assumed beyond being a non-empty
/// token, since operators publish codes in several regional formats.
///
/// # Examples
///
/// ```
/// use stop_timetable::domain::StopCode;
///
/// let stop = StopCode::parse("4000SY00123").unwrap();
/// assert_eq!(stop.as_str(), "4000SY00123");
///
/// assert!(StopCode::parse("").is_err());
/// assert!(StopCode::parse("4000 SY").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        validate(s).map_err(|reason| InvalidStopCode { reason })?;
        Ok(StopCode(s.to_string()))
    }

    /// Returns the stop code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A gazetteer locality identifier, grouping stops into an area.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalityId(String);

impl LocalityId {
    /// Parse a locality identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLocalityId> {
        validate(s).map_err(|reason| InvalidLocalityId { reason })?;
        Ok(LocalityId(s.to_string()))
    }

    /// Returns the locality identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LocalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalityId({})", self.0)
    }
}

impl fmt::Display for LocalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The stop being queried: its own code plus the locality it sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopIdentity {
    pub code: StopCode,
    pub locality: LocalityId,
}

impl StopIdentity {
    pub fn new(code: StopCode, locality: LocalityId) -> Self {
        Self { code, locality }
    }
}
