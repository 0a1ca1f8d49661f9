//! Journey reconstruction from a connection index.

use tracing::warn;

use crate::domain::{Journey, Leg, StopId, TimetableLeg};
use crate::raptor::{Connection, ConnectionIndex};

/// One journey per round in which `destination` was reached, fewest legs
/// first.
///
/// Each journey is the best found using exactly that many legs, so later
/// journeys in the list arrive strictly earlier.
pub fn get_results(connections: &ConnectionIndex, destination: &StopId) -> Vec<Journey> {
    connections
        .rounds(destination)
        .filter_map(|(round, _)| reconstruct(connections, destination, round))
        .collect()
}

/// Follow connections back from `(destination, round)` to round 0.
fn reconstruct(connections: &ConnectionIndex, destination: &StopId, round: usize) -> Option<Journey> {
    let mut legs = Vec::with_capacity(round);
    let mut stop = destination.clone();

    for k in (1..=round).rev() {
        let Some(connection) = connections.get(&stop, k) else {
            warn!(%destination, round, %stop, k, "connection chain broken");
            return None;
        };

        let leg = match connection {
            Connection::Timetable {
                trip,
                board,
                alight,
            } => match TimetableLeg::new(trip.clone(), *board, *alight) {
                Ok(leg) => Leg::Timetable(leg),
                Err(err) => {
                    warn!(%destination, round, error = %err, "invalid connection");
                    return None;
                }
            },
            Connection::Transfer(transfer) => Leg::Transfer(transfer.clone()),
        };

        stop = leg.origin().clone();
        legs.push(leg);
    }

    legs.reverse();

    match Journey::new(legs) {
        Ok(journey) => Some(journey),
        Err(err) => {
            warn!(%destination, round, error = %err, "could not build journey");
            None
        }
    }
}
