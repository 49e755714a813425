//! Seat generation, manual booking (including infant/parent linkage), and
//! bulk auto-assignment. Bookings run under the flight lock and re-read the
//! seat before writing, so concurrent attempts on the same seat resolve to
//! one booking and one SeatConflict.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skyroster_core::error::{EntityKind, RosterError};
use skyroster_core::model::Seat;
use skyroster_core::repository::{FlightRepository, PassengerRepository, SeatRepository};
use skyroster_core::roster::{SeatMapResponse, SeatStatus};
use uuid::Uuid;

use crate::layout;
use crate::locks::FlightLocks;

pub struct SeatAssignmentEngine {
    flights: Arc<dyn FlightRepository>,
    passengers: Arc<dyn PassengerRepository>,
    seats: Arc<dyn SeatRepository>,
    locks: Arc<FlightLocks>,
}

impl SeatAssignmentEngine {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        passengers: Arc<dyn PassengerRepository>,
        seats: Arc<dyn SeatRepository>,
        locks: Arc<FlightLocks>,
    ) -> Self {
        Self {
            flights,
            passengers,
            seats,
            locks,
        }
    }

    /// Create the flight's physical seat rows from its aircraft
    /// configuration. Must not be invoked twice for the same flight.
    pub async fn generate_seats(
        &self,
        flight_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Seat>, RosterError> {
        let _guard = self.locks.acquire(flight_id).await;

        let (_, aircraft) = self
            .flights
            .find_with_aircraft(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;

        if !self.seats.for_flight(flight_id).await?.is_empty() {
            return Err(RosterError::LayoutAlreadyExists { flight_id });
        }

        let generated = layout::generate(&aircraft, flight_id, now);
        self.seats.save_all(&generated).await?;
        tracing::info!(%flight_id, seats = generated.len(), "seat layout generated");
        Ok(generated)
    }

    /// Book one seat for one passenger. Infant bookings link the parent
    /// passenger; the parent must exist but is not required to hold a seat
    /// on the same flight.
    pub async fn book_seat(
        &self,
        seat_id: Uuid,
        passenger_id: Uuid,
        is_infant_seat: bool,
        parent_passenger_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Seat, RosterError> {
        let located = self
            .seats
            .find(seat_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Seat,
                id: seat_id,
            })?;

        let _guard = self.locks.acquire(located.flight_id).await;

        // re-read under the flight lock; another booking may have won
        let mut seat = self
            .seats
            .find(seat_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Seat,
                id: seat_id,
            })?;

        if seat.is_occupied {
            return Err(RosterError::SeatOccupied {
                flight_id: seat.flight_id,
                seat_id,
            });
        }

        self.passengers
            .find(passenger_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Passenger,
                id: passenger_id,
            })?;

        if is_infant_seat {
            let parent_id =
                parent_passenger_id.ok_or(RosterError::MissingParentPassenger { seat_id })?;
            self.passengers
                .find(parent_id)
                .await?
                .ok_or(RosterError::NotFound {
                    entity: EntityKind::Passenger,
                    id: parent_id,
                })?;
            seat.is_infant_seat = true;
            seat.parent_passenger_id = Some(parent_id);
        }

        seat.passenger_id = Some(passenger_id);
        seat.is_occupied = true;
        seat.booked_at = Some(now);
        self.seats.save(&seat).await?;
        tracing::info!(%seat_id, %passenger_id, seat_number = %seat.seat_number, "seat booked");
        Ok(seat)
    }

    /// Pair waiting passengers to free seats strictly by list order and book
    /// each pair. No class preference, no optimization. Returns the number
    /// of seats booked.
    pub async fn auto_assign_seats(
        &self,
        flight_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, RosterError> {
        let _guard = self.locks.acquire(flight_id).await;

        self.flights
            .find_with_aircraft(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;

        let waiting = self.passengers.awaiting_seat(flight_id).await?;
        let available = self.seats.available_for_flight(flight_id).await?;

        if waiting.len() > available.len() {
            return Err(RosterError::InsufficientSeats {
                flight_id,
                requested: waiting.len(),
                available: available.len(),
            });
        }

        for (passenger, mut seat) in waiting.iter().zip(available) {
            seat.passenger_id = Some(passenger.id);
            seat.is_occupied = true;
            seat.booked_at = Some(now);
            self.seats.save(&seat).await?;
        }

        tracing::info!(%flight_id, booked = waiting.len(), "seats auto-assigned");
        Ok(waiting.len())
    }

    /// Seat map with availability counters for one flight.
    pub async fn seat_map(&self, flight_id: Uuid) -> Result<SeatMapResponse, RosterError> {
        let roster = self
            .flights
            .load_roster(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;

        let seats: Vec<SeatStatus> = roster
            .seats
            .iter()
            .map(|occupancy| SeatStatus {
                seat_id: occupancy.seat.id,
                seat_number: occupancy.seat.seat_number.clone(),
                seat_class: occupancy.seat.seat_class.as_str().to_string(),
                is_occupied: occupancy.seat.is_occupied,
                is_infant_seat: occupancy.seat.is_infant_seat,
                passenger_id: occupancy.seat.passenger_id,
                passenger_name: occupancy.passenger.as_ref().map(|p| p.full_name.clone()),
                parent_passenger_id: occupancy.seat.parent_passenger_id,
            })
            .collect();

        let occupied = seats.iter().filter(|s| s.is_occupied).count();
        Ok(SeatMapResponse {
            flight_id: roster.flight.id,
            flight_number: roster.flight.flight_number.clone(),
            aircraft_type: roster.aircraft.aircraft_type.clone(),
            total_seats: roster.aircraft.total_seats,
            available_seats: seats.len() - occupied,
            occupied_seats: occupied,
            seats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{self, InMemoryStore};

    fn engine_with(store: Arc<InMemoryStore>) -> SeatAssignmentEngine {
        SeatAssignmentEngine::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(FlightLocks::new()),
        )
    }

    fn seeded_flight(store: &InMemoryStore) -> Uuid {
        let aircraft = testutil::aircraft(8, 12);
        let flight = testutil::flight(&aircraft, 5000.0);
        let flight_id = flight.id;
        store.insert_aircraft(aircraft);
        store.insert_flight(flight);
        flight_id
    }

    #[tokio::test]
    async fn generates_once_then_conflicts() {
        let store = Arc::new(InMemoryStore::new());
        let flight_id = seeded_flight(&store);
        let engine = engine_with(store);

        let seats = engine.generate_seats(flight_id, Utc::now()).await.unwrap();
        assert_eq!(seats.len(), 20);

        let err = engine.generate_seats(flight_id, Utc::now()).await.unwrap_err();
        assert!(matches!(err, RosterError::LayoutAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn double_booking_fails_and_keeps_first_passenger() {
        let store = Arc::new(InMemoryStore::new());
        let flight_id = seeded_flight(&store);
        let engine = engine_with(store.clone());
        engine.generate_seats(flight_id, Utc::now()).await.unwrap();

        let first = testutil::passenger("First");
        let second = testutil::passenger("Second");
        let (first_id, second_id) = (first.id, second.id);
        store.insert_passenger(first);
        store.insert_passenger(second);

        let seat_id = store.seat_by_number(flight_id, "1A").unwrap().id;
        let booked = engine
            .book_seat(seat_id, first_id, false, None, Utc::now())
            .await
            .unwrap();
        assert!(booked.is_occupied);

        let err = engine
            .book_seat(seat_id, second_id, false, None, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::SeatOccupied { .. }));

        let seat = store.seat_by_number(flight_id, "1A").unwrap();
        assert_eq!(seat.passenger_id, Some(first_id));
    }

    #[tokio::test]
    async fn infant_booking_links_parent() {
        let store = Arc::new(InMemoryStore::new());
        let flight_id = seeded_flight(&store);
        let engine = engine_with(store.clone());
        engine.generate_seats(flight_id, Utc::now()).await.unwrap();

        let infant = testutil::passenger("Infant");
        let parent = testutil::passenger("Parent");
        let (infant_id, parent_id) = (infant.id, parent.id);
        store.insert_passenger(infant);
        store.insert_passenger(parent);

        let seat_id = store.seat_by_number(flight_id, "4A").unwrap().id;
        let seat = engine
            .book_seat(seat_id, infant_id, true, Some(parent_id), Utc::now())
            .await
            .unwrap();

        assert!(seat.is_infant_seat);
        assert_eq!(seat.parent_passenger_id, Some(parent_id));
    }

    #[tokio::test]
    async fn infant_booking_requires_parent() {
        let store = Arc::new(InMemoryStore::new());
        let flight_id = seeded_flight(&store);
        let engine = engine_with(store.clone());
        engine.generate_seats(flight_id, Utc::now()).await.unwrap();

        let infant = testutil::passenger("Infant");
        let infant_id = infant.id;
        store.insert_passenger(infant);

        let seat_id = store.seat_by_number(flight_id, "4B").unwrap().id;
        let err = engine
            .book_seat(seat_id, infant_id, true, None, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::MissingParentPassenger { .. }));

        let err = engine
            .book_seat(seat_id, infant_id, true, Some(Uuid::new_v4()), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RosterError::NotFound {
                entity: EntityKind::Passenger,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn auto_assign_pairs_by_list_order() {
        let store = Arc::new(InMemoryStore::new());
        let flight_id = seeded_flight(&store);
        let engine = engine_with(store.clone());
        engine.generate_seats(flight_id, Utc::now()).await.unwrap();

        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            let passenger = testutil::passenger(name);
            ids.push(passenger.id);
            store.insert_passenger(passenger.clone());
            store.mark_awaiting(flight_id, passenger.id);
        }

        let booked = engine.auto_assign_seats(flight_id, Utc::now()).await.unwrap();
        assert_eq!(booked, 3);

        // free seats are offered in layout order: 1A, 1B, 1C
        assert_eq!(store.seat_by_number(flight_id, "1A").unwrap().passenger_id, Some(ids[0]));
        assert_eq!(store.seat_by_number(flight_id, "1B").unwrap().passenger_id, Some(ids[1]));
        assert_eq!(store.seat_by_number(flight_id, "1C").unwrap().passenger_id, Some(ids[2]));
    }

    #[tokio::test]
    async fn auto_assign_fails_when_short_on_seats() {
        let store = Arc::new(InMemoryStore::new());
        let aircraft = testutil::aircraft(0, 2);
        let flight = testutil::flight(&aircraft, 1000.0);
        let flight_id = flight.id;
        store.insert_aircraft(aircraft);
        store.insert_flight(flight);

        let engine = engine_with(store.clone());
        engine.generate_seats(flight_id, Utc::now()).await.unwrap();

        for name in ["A", "B", "C"] {
            let passenger = testutil::passenger(name);
            store.insert_passenger(passenger.clone());
            store.mark_awaiting(flight_id, passenger.id);
        }

        let err = engine.auto_assign_seats(flight_id, Utc::now()).await.unwrap_err();
        assert!(matches!(
            err,
            RosterError::InsufficientSeats {
                requested: 3,
                available: 2,
                ..
            }
        ));

        // nothing was booked
        assert_eq!(store.occupied_count(flight_id), 0);
    }

    #[tokio::test]
    async fn seat_map_counts_availability() {
        let store = Arc::new(InMemoryStore::new());
        let flight_id = seeded_flight(&store);
        let engine = engine_with(store.clone());
        engine.generate_seats(flight_id, Utc::now()).await.unwrap();

        let passenger = testutil::passenger("P");
        let passenger_id = passenger.id;
        store.insert_passenger(passenger);
        let seat_id = store.seat_by_number(flight_id, "2D").unwrap().id;
        engine
            .book_seat(seat_id, passenger_id, false, None, Utc::now())
            .await
            .unwrap();

        let map = engine.seat_map(flight_id).await.unwrap();
        assert_eq!(map.total_seats, 20);
        assert_eq!(map.occupied_seats, 1);
        assert_eq!(map.available_seats, 19);
        let booked = map.seats.iter().find(|s| s.seat_number == "2D").unwrap();
        assert_eq!(booked.passenger_name.as_deref(), Some("P"));
    }
}
