//! Domain types for the seat-selection flow.
//!
//! Value objects for trips, seats and passengers. Seat records mirror the
//! JSON returned by the trip lookup service (camelCase keys, extra keys
//! ignored), so they deserialize straight off the wire.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of the trip whose seats are being chosen
///
/// Taken verbatim from the `tripId` query parameter of the view.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    /// Creates a `TripId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat number, unique within a trip (e.g. `A101`)
///
/// The lookup service may send seat numbers as JSON strings or integers;
/// both decode to the same textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SeatNumber(String);

impl SeatNumber {
    /// Creates a `SeatNumber`
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Returns the seat number as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeatNumber {
    fn from(number: &str) -> Self {
        Self::new(number)
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SeatNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// Identifier of the bus operating a trip
///
/// Kept in whatever JSON form the lookup service uses, so it passes through
/// to the payment step unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusId {
    /// Numeric identifier
    Number(u64),
    /// Textual identifier
    Text(String),
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// Money Value Object (minor units to avoid floating point drift)
// ============================================================================

/// A non-negative amount of money in minor units (paise)
///
/// On the wire prices are JSON numbers in major units (`500`, `499.5`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Creates a `Money` value from whole major units
    #[must_use]
    pub const fn checked_from_major(major: u64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    /// Creates a `Money` value from a fractional major-unit amount,
    /// rounding to the nearest minor unit
    ///
    /// Returns `None` for negative, non-finite, or out-of-range amounts.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )] // range checked before the cast
    pub fn from_major_f64(major: f64) -> Option<Self> {
        if !major.is_finite() || major < 0.0 {
            return None;
        }
        let minor = (major * 100.0).round();
        if minor >= u64::MAX as f64 {
            return None;
        }
        Some(Self(minor as u64))
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Multiplies the amount by a seat count, saturating on overflow
    #[must_use]
    pub fn times(self, count: usize) -> Self {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        Self(self.0.saturating_mul(count))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = (self.0 / 100, self.0 % 100);
        if minor == 0 {
            write!(f, "{major}")
        } else {
            write!(f, "{major}.{minor:02}")
        }
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            #[allow(clippy::cast_precision_loss)] // display-precision amounts
            let major = self.0 as f64 / 100.0;
            serializer.serialize_f64(major)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let major = f64::deserialize(deserializer)?;
        Self::from_major_f64(major)
            .ok_or_else(|| de::Error::custom(format!("invalid price: {major}")))
    }
}

// ============================================================================
// Seats
// ============================================================================

/// Booking status of a seat, as reported by the lookup service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    /// Seat can be selected
    Available,
    /// Seat is taken; clicks on it are ignored
    Booked,
    /// Any other status the service reports; only `BOOKED` locks a seat
    #[serde(other)]
    Other,
}

impl SeatStatus {
    /// Whether a seat with this status may be selected
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        !matches!(self, Self::Booked)
    }
}

/// Trip details embedded in each seat record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFare {
    /// Per-seat price; every seat of a trip shares it
    pub price: Money,
}

/// Bus details embedded in each seat record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusRef {
    /// Bus identifier
    pub bus_id: BusId,
}

/// One bookable seat on a trip's bus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Seat number, unique within the trip
    pub seat_number: SeatNumber,
    /// Booking status
    pub status: SeatStatus,
    /// Trip the seat belongs to
    pub trip: TripFare,
    /// Bus the seat belongs to
    pub bus: BusRef,
}

impl Seat {
    /// Creates a seat record
    #[must_use]
    pub fn new(seat_number: impl Into<String>, status: SeatStatus, price: Money, bus_id: BusId) -> Self {
        Self {
            seat_number: SeatNumber::new(seat_number),
            status,
            trip: TripFare { price },
            bus: BusRef { bus_id },
        }
    }

    /// Whether the seat may be selected
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.status.is_selectable()
    }

    /// Per-seat price
    #[must_use]
    pub const fn price(&self) -> Money {
        self.trip.price
    }
}

// ============================================================================
// Passengers
// ============================================================================

/// One of the contact fields collected per passenger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Ten-digit phone number
    Phone,
}

impl PassengerField {
    /// All fields, in form column order
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Phone];

    /// Lowercase field name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for PassengerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown passenger field name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown passenger field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for PassengerField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Contact details for the passenger occupying one selected seat
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
}

impl PassengerRecord {
    /// Value of one field
    #[must_use]
    pub fn get(&self, field: PassengerField) -> &str {
        match field {
            PassengerField::Name => &self.name,
            PassengerField::Email => &self.email,
            PassengerField::Phone => &self.phone,
        }
    }

    /// Overwrite one field
    pub fn set(&mut self, field: PassengerField, value: String) {
        match field {
            PassengerField::Name => self.name = value,
            PassengerField::Email => self.email = value,
            PassengerField::Phone => self.phone = value,
        }
    }

    /// Whether every field holds a non-empty value
    ///
    /// Whitespace counts as a value; format checks happen elsewhere.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        PassengerField::ALL.iter().all(|field| !self.get(*field).is_empty())
    }
}
