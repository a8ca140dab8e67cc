//! Login ids: the structured, human-legible identifier of an employee.
//!
//! A login id is five fixed-width segments concatenated without separators:
//!
//! ```text
//! EMP  TE  AVLE  2024  0001
//! tag  org person year serial
//! ```
//!
//! Everything up to the year is derived deterministically from the
//! employee's attributes ([`LoginPrefix`]); the serial disambiguates
//! employees sharing an organization and join year and is chosen by the
//! [`allocator`](crate::allocator).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constant tag every login id starts with.
pub const TAG: &str = "EMP";
/// Characters taken from the organization name.
pub const ORGANIZATION_WIDTH: usize = 2;
/// Characters taken from each of the given and family names.
pub const NAME_WIDTH: usize = 2;
/// Digits in the year segment.
pub const YEAR_WIDTH: usize = 4;
/// Digits in the serial segment.
pub const SERIAL_WIDTH: usize = 4;
/// Largest serial that fits the serial segment.
pub const MAX_SERIAL: u16 = 9999;
/// Pads name segments whose source is shorter than the segment width.
pub const FILLER: char = 'X';

const TAG_WIDTH: usize = 3;
const PERSON_WIDTH: usize = 2 * NAME_WIDTH;
const LENGTH: usize = TAG_WIDTH + ORGANIZATION_WIDTH + PERSON_WIDTH + YEAR_WIDTH + SERIAL_WIDTH;

/// Takes the first `width` alphanumeric characters of `name`, uppercased.
///
/// Unlike a plain "first characters" rule, whitespace and punctuation are
/// skipped, so "A Corp" yields `AC` and "A/S Nordic" yields `AS`. Segments
/// must stay safe to embed in file names. Shorter inputs are right-padded
/// with [`FILLER`], so the result always has exactly `width` characters.
pub fn prefix_segment(name: &str, width: usize) -> String {
    let mut segment: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(width)
        .flat_map(char::to_uppercase)
        .take(width)
        .collect();
    let missing = width.saturating_sub(segment.chars().count());
    segment.extend(std::iter::repeat(FILLER).take(missing));
    segment
}

/// Extracts the trailing serial of a stored login id.
///
/// Returns `None` for ids that are too short or whose last four characters
/// are not all ASCII digits; such records carry no usable serial.
pub fn trailing_serial(login_id: &str) -> Option<u16> {
    let start = login_id.len().checked_sub(SERIAL_WIDTH)?;
    let suffix = login_id.get(start..)?;
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// The deterministic part of a login id: tag, organization, person, year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginPrefix {
    organization: String,
    person: String,
    year: i32,
}

impl LoginPrefix {
    /// Derives the prefix from an employee's attributes.
    #[must_use]
    pub fn derive(organization: &str, given_name: &str, family_name: &str, joined_on: NaiveDate) -> Self {
        let mut person = prefix_segment(given_name, NAME_WIDTH);
        person.push_str(&prefix_segment(family_name, NAME_WIDTH));
        Self {
            organization: prefix_segment(organization, ORGANIZATION_WIDTH),
            person,
            year: joined_on.year(),
        }
    }

    /// The two-character organization segment.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The four-character person segment.
    #[must_use]
    pub fn person(&self) -> &str {
        &self.person
    }

    /// The join year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for LoginPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAG}{}{}{:04}", self.organization, self.person, self.year)
    }
}

/// Why a string is not a well-formed login id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseLoginIdError {
    /// Wrong number of characters.
    #[error("login id must be {LENGTH} characters, got {0}")]
    Length(usize),
    /// Does not start with [`TAG`].
    #[error("login id must start with {TAG}")]
    Tag,
    /// Organization or person segment contains a non-alphanumeric character.
    #[error("login id name segments must be alphanumeric")]
    NameSegment,
    /// Year or serial segment is not numeric.
    #[error("login id must end with a 4-digit year and a 4-digit serial")]
    Digits,
}

/// A complete, well-formed login id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoginId(String);

impl LoginId {
    /// Joins a prefix and a serial into a login id.
    ///
    /// Returns `None` when `serial` is zero or above [`MAX_SERIAL`], or when
    /// the year does not fit four digits.
    #[must_use]
    pub fn compose(prefix: &LoginPrefix, serial: u16) -> Option<Self> {
        if serial == 0 || serial > MAX_SERIAL || !(0..=9999).contains(&prefix.year) {
            return None;
        }
        Some(Self(format!("{prefix}{serial:04}")))
    }

    /// The serial segment.
    #[must_use]
    pub fn serial(&self) -> u16 {
        trailing_serial(&self.0).unwrap_or_default()
    }

    /// Borrows the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LoginId {
    type Err = ParseLoginIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != LENGTH {
            return Err(ParseLoginIdError::Length(chars.len()));
        }
        let (tag, rest) = chars.split_at(TAG_WIDTH);
        if tag.iter().copied().ne(TAG.chars()) {
            return Err(ParseLoginIdError::Tag);
        }
        let (names, digits) = rest.split_at(ORGANIZATION_WIDTH + PERSON_WIDTH);
        if !names.iter().all(|c| c.is_alphanumeric()) {
            return Err(ParseLoginIdError::NameSegment);
        }
        if !digits.iter().all(char::is_ascii_digit) {
            return Err(ParseLoginIdError::Digits);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for LoginId {
    type Error = ParseLoginIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LoginId> for String {
    fn from(id: LoginId) -> Self {
        id.0
    }
}
