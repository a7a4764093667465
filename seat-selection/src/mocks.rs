//! In-memory collaborators for development and testing.

use crate::booking::BookingPayload;
use crate::collaborators::{Notification, Notifier, PaymentHandoff};
use crate::inventory::{FetchError, SeatLookup};
use crate::types::{Seat, TripId};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

type Response = Result<Vec<Seat>, FetchError>;

/// Seat lookup serving canned responses per trip
///
/// Queued one-off answers are served first, in order. Trips without a
/// canned response fail with status 404.
#[derive(Debug, Default)]
pub struct InMemorySeatLookup {
    responses: Mutex<HashMap<TripId, Response>>,
    queued: Mutex<HashMap<TripId, VecDeque<(Response, Duration)>>>,
    delays: Mutex<HashMap<TripId, Duration>>,
    calls: AtomicUsize,
}

impl InMemorySeatLookup {
    /// Creates a lookup with no trips
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Serve these seats for a trip
    pub fn set_seats(&self, trip_id: &TripId, seats: Vec<Seat>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(trip_id.clone(), Ok(seats));
    }

    /// Fail loads of a trip
    pub fn set_failure(&self, trip_id: &TripId, error: FetchError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(trip_id.clone(), Err(error));
    }

    /// Hold loads of a trip for `delay` before answering
    pub fn set_delay(&self, trip_id: &TripId, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(trip_id.clone(), delay);
    }

    /// Answer the next unanswered load of a trip with `response` after `delay`
    pub fn queue_response(&self, trip_id: &TripId, response: Response, delay: Duration) {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(trip_id.clone())
            .or_default()
            .push_back((response, delay));
    }

    /// Number of loads served
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SeatLookup for InMemorySeatLookup {
    fn load(
        &self,
        trip_id: &TripId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Seat>, FetchError>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let queued = self
            .queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(trip_id)
            .and_then(VecDeque::pop_front);

        let (response, delay) = match queued {
            Some((response, delay)) => (response, Some(delay)),
            None => {
                let response = self
                    .responses
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(trip_id)
                    .cloned()
                    .unwrap_or(Err(FetchError::Status { status: 404 }));
                let delay = self
                    .delays
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(trip_id)
                    .copied();
                (response, delay)
            },
        };

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response
        })
    }
}

/// Notifier that remembers every notification
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages received so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Payment handoff that remembers every payload
#[derive(Debug, Default, Clone)]
pub struct RecordingPaymentHandoff {
    payloads: Arc<Mutex<Vec<BookingPayload>>>,
}

impl RecordingPaymentHandoff {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads handed off so far, oldest first
    #[must_use]
    pub fn payloads(&self) -> Vec<BookingPayload> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PaymentHandoff for RecordingPaymentHandoff {
    fn hand_off(&self, payload: BookingPayload) {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload);
    }
}
