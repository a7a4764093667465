//! Seat selection console
//!
//! Opens one trip against the bus service and drives the seat-selection
//! reducer from line commands on stdin.
//!
//! # Usage
//!
//! ```bash
//! SEATFLOW_USER_NAME=jane SEATFLOW_USER_ROLE=CUSTOMER SEATFLOW_JWT_TOKEN=... \
//!     cargo run --bin seat-selection -- <trip-id>
//! ```
//!
//! Commands: `seats`, `toggle <seat>`, `set <index> <name|email|phone> <value>`,
//! `reload`, `submit`, `quit`.

use seat_selection::{
    BookingPayload, Config, HttpSeatLookup, PassengerField, PaymentHandoff, SeatDisplay,
    SeatNumber, SeatSelectionAction, SeatSelectionEnvironment, SeatSelectionReducer,
    SeatSelectionState, SubmitOutcome, TracingNotifier, TripId,
};
use seatflow_core::environment::SystemClock;
use seatflow_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type SeatStore = Store<SeatSelectionState, SeatSelectionAction, SeatSelectionEnvironment, SeatSelectionReducer>;

/// Prints handed-off bookings as the JSON the payment view receives
struct StdoutPaymentHandoff;

impl PaymentHandoff for StdoutPaymentHandoff {
    fn hand_off(&self, payload: BookingPayload) {
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("Proceeding to payment with:\n{json}"),
            Err(error) => tracing::error!(%error, "Could not serialize booking payload"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Seats,
    Toggle(SeatNumber),
    Set {
        index: usize,
        field: PassengerField,
        value: String,
    },
    Reload,
    Submit,
    Quit,
}

const SET_USAGE: &str = "usage: set <index> <name|email|phone> <value>";

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    match word {
        "seats" => Ok(Command::Seats),
        "reload" => Ok(Command::Reload),
        "submit" => Ok(Command::Submit),
        "quit" | "exit" => Ok(Command::Quit),
        "toggle" if !rest.is_empty() => Ok(Command::Toggle(SeatNumber::new(rest))),
        "toggle" => Err("usage: toggle <seat>".to_string()),
        "set" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let index = parts
                .next()
                .and_then(|part| part.parse().ok())
                .ok_or(SET_USAGE)?;
            let field = parts
                .next()
                .and_then(|part| part.parse().ok())
                .ok_or(SET_USAGE)?;
            let value = parts.next().unwrap_or_default().to_string();
            Ok(Command::Set {
                index,
                field,
                value,
            })
        },
        _ => Err(format!("unknown command: {line}")),
    }
}

async fn print_view(store: &SeatStore) {
    let view = store
        .state(|state| {
            let mut out = String::new();
            out.push_str(&format!("Trip {}", state.trip_id()));
            if state.is_loading() {
                out.push_str(" (loading)");
            }
            out.push('\n');

            for (seat, display) in state.seat_view() {
                let mark = match display {
                    SeatDisplay::Available => ' ',
                    SeatDisplay::Selected => '*',
                    SeatDisplay::Booked => 'x',
                };
                out.push_str(&format!("  [{mark}] {} ₹{}\n", seat.seat_number, seat.price()));
            }

            let selected: Vec<String> = state
                .selection()
                .seat_numbers()
                .iter()
                .map(ToString::to_string)
                .collect();
            out.push_str(&format!("Selected seats: {}\n", selected.join(", ")));
            out.push_str(&format!("Total price: ₹{}\n", state.running_total()));

            for (index, record) in state.passengers().records().iter().enumerate() {
                out.push_str(&format!(
                    "  Passenger {} (seat {}): name={:?} email={:?} phone={:?}\n",
                    index + 1,
                    selected.get(index).map_or("?", String::as_str),
                    record.name,
                    record.email,
                    record.phone,
                ));
                if let Some(errors) = state.errors().get(index) {
                    for (field, message) in errors.iter() {
                        out.push_str(&format!("    {field}: {message}\n"));
                    }
                }
            }

            match state.last_submit() {
                Some(SubmitOutcome::HandedOff { seat_count, total_price }) => {
                    out.push_str(&format!("Booked {seat_count} seat(s) for ₹{total_price}\n"));
                },
                Some(SubmitOutcome::Rejected(rejection)) => {
                    out.push_str(&format!("Submit refused: {rejection}\n"));
                },
                Some(SubmitOutcome::AssemblyFailed(error)) => {
                    out.push_str(&format!("Submit failed: {error}\n"));
                },
                None => {},
            }
            out
        })
        .await;
    print!("{view}");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let trip_id = std::env::args()
        .nth(1)
        .map(TripId::new)
        .ok_or("usage: seat-selection <trip-id>")?;

    tracing::info!(
        api = %config.api.base_url,
        permitted = ?config.permitted_roles,
        "Configuration loaded"
    );

    let access = match config.guard_policy().authorize(&config.session.session()) {
        Ok(access) => access,
        Err(redirect) => {
            println!("Not allowed here; redirecting to {}", redirect.path());
            return Ok(());
        },
    };

    let environment = SeatSelectionEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(HttpSeatLookup::new(&config.api)?),
        Arc::new(TracingNotifier),
        Arc::new(StdoutPaymentHandoff),
    );
    let store = Store::new(
        SeatSelectionState::new(access, trip_id.clone()),
        SeatSelectionReducer::new(),
        environment,
    );

    store
        .send_cascading(SeatSelectionAction::OpenTrip { trip_id })
        .await?
        .wait()
        .await;
    print_view(&store).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let action = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Seats) => {
                print_view(&store).await;
                continue;
            },
            Ok(Command::Toggle(seat_number)) => SeatSelectionAction::ToggleSeat { seat_number },
            Ok(Command::Set {
                index,
                field,
                value,
            }) => SeatSelectionAction::EditPassengerField {
                index,
                field,
                value,
            },
            Ok(Command::Reload) => SeatSelectionAction::LoadSeats,
            Ok(Command::Submit) => SeatSelectionAction::Submit,
            Err(message) => {
                println!("{message}");
                continue;
            },
        };

        store.send_cascading(action).await?.wait().await;
        print_view(&store).await;
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
