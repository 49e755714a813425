//! Deterministic seat map construction from an aircraft's class/seat-count
//! configuration. Same configuration always yields the same seat list.

use chrono::{DateTime, Utc};
use skyroster_core::model::{Aircraft, Seat, SeatClass};
use uuid::Uuid;

const BUSINESS_ABREAST: i32 = 4; // columns A-D
const ECONOMY_ABREAST: i32 = 6; // columns A-F

/// Build the full seat list for one flight from the aircraft configuration.
///
/// Business seats fill rows of four starting at row 1; economy seats fill
/// rows of six starting at `business_class_seats / 4 + 2`. When the business
/// count is not a multiple of four, that offset can collide with or skip a
/// business row number. That numbering is inherited from the established
/// roster format and is kept as-is.
pub fn generate(aircraft: &Aircraft, flight_id: Uuid, now: DateTime<Utc>) -> Vec<Seat> {
    let mut seats =
        Vec::with_capacity((aircraft.business_class_seats + aircraft.economy_class_seats) as usize);

    for i in 0..aircraft.business_class_seats {
        let row = i / BUSINESS_ABREAST + 1;
        let col = column_letter(i % BUSINESS_ABREAST);
        seats.push(blank_seat(flight_id, format!("{row}{col}"), SeatClass::Business, now));
    }

    let economy_start_row = aircraft.business_class_seats / BUSINESS_ABREAST + 2;
    for i in 0..aircraft.economy_class_seats {
        let row = economy_start_row + i / ECONOMY_ABREAST;
        let col = column_letter(i % ECONOMY_ABREAST);
        seats.push(blank_seat(flight_id, format!("{row}{col}"), SeatClass::Economy, now));
    }

    seats
}

fn column_letter(index: i32) -> char {
    (b'A' + index as u8) as char
}

fn blank_seat(flight_id: Uuid, seat_number: String, seat_class: SeatClass, now: DateTime<Utc>) -> Seat {
    Seat {
        id: Uuid::new_v4(),
        flight_id,
        seat_number,
        seat_class,
        passenger_id: None,
        is_infant_seat: false,
        parent_passenger_id: None,
        is_occupied: false,
        booked_at: None,
        created_at: now,
    }
}
