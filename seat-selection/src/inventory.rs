//! Seat inventory for the current trip and the lookup service behind it.

use crate::config::ApiConfig;
use crate::types::{BusId, Seat, SeatNumber, TripId};
use reqwest::StatusCode;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Seats of one trip, in the order the lookup service returned them
///
/// Replaced wholesale on every successful load; never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeatInventory {
    seats: Vec<Seat>,
}

impl SeatInventory {
    /// Seat with the given number
    #[must_use]
    pub fn find(&self, seat_number: &SeatNumber) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|seat| &seat.seat_number == seat_number)
    }

    /// Bus of the first seat; all seats of a trip share one bus
    #[must_use]
    pub fn bus_id(&self) -> Option<&BusId> {
        self.seats.first().map(|seat| &seat.bus.bus_id)
    }

    /// All seats
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Number of seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether nothing has been loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl From<Vec<Seat>> for SeatInventory {
    fn from(seats: Vec<Seat>) -> Self {
        Self { seats }
    }
}

/// Errors from loading a trip's seats
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request could not be built or sent, or timed out
    #[error("transport error: {0}")]
    Transport(String),

    /// Credential missing, expired or refused
    #[error("unauthorized (status {status})")]
    Unauthorized {
        /// HTTP status code (401 or 403)
        status: u16,
    },

    /// Service answered with a non-success status
    #[error("seat lookup failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not a seat list
    #[error("invalid seat data: {0}")]
    Decode(String),
}

/// Seat lookup service
///
/// Abstracts the remote trip/seat endpoint so the reducer can be driven by
/// an in-memory lookup in tests.
pub trait SeatLookup: Send + Sync {
    /// Load every seat of a trip
    fn load(
        &self,
        trip_id: &TripId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Seat>, FetchError>> + Send + '_>>;
}

/// [`SeatLookup`] backed by the bus service's customer API
///
/// `GET {base_url}/customer/trip/{tripId}` with a bearer credential.
#[derive(Clone, Debug)]
pub struct HttpSeatLookup {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpSeatLookup {
    /// Build a lookup from API settings
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// URL of a trip's seat list
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the base URL is unusable.
    pub fn trip_url(&self, trip_id: &TripId) -> Result<reqwest::Url, FetchError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::Transport(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::Transport(format!("base url {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(["customer", "trip", trip_id.as_str()]);
        Ok(url)
    }

    async fn fetch(&self, trip_id: &TripId) -> Result<Vec<Seat>, FetchError> {
        let url = self.trip_url(trip_id)?;
        tracing::debug!(%url, "Requesting seat list");

        let mut request = self.client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<Seat>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl SeatLookup for HttpSeatLookup {
    fn load(
        &self,
        trip_id: &TripId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Seat>, FetchError>> + Send + '_>> {
        let trip_id = trip_id.clone();
        Box::pin(async move { self.fetch(&trip_id).await })
    }
}
