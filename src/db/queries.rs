use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::models::{Booking, BookingStatus, PaymentStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

const BOOKING_COLUMNS: &str = "id, user_id, user_name, vendor_id, vendor_name, service_name, event_type, \
     service_date, amount, status, payment_status, notes, contact_phone, contact_email, created_at, updated_at";

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
        ),
        params![
            booking.id,
            booking.user_id,
            booking.user_name,
            booking.vendor_id,
            booking.vendor_name,
            booking.service_name,
            booking.event_type,
            booking.service_date.format(DATE_FORMAT).to_string(),
            booking.amount.to_string(),
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.notes,
            booking.contact_phone,
            booking.contact_email,
            booking.created_at.format(TIMESTAMP_FORMAT).to_string(),
            booking.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"))?;
    let row = stmt
        .query_row(params![id], |row| Ok(parse_booking_row(row)))
        .optional()?;
    row.transpose()
}

pub fn get_bookings_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<Booking>> {
    query_bookings(
        conn,
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ?1 ORDER BY rowid ASC"),
        params![user_id],
    )
}

pub fn get_bookings_for_vendor(conn: &Connection, vendor_id: &str) -> anyhow::Result<Vec<Booking>> {
    query_bookings(
        conn,
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE vendor_id = ?1 ORDER BY rowid ASC"),
        params![vendor_id],
    )
}

pub fn get_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    query_bookings(
        conn,
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY rowid ASC"),
        params![],
    )
}

/// Writes the mutable state of `booking`, but only if the row still carries
/// `expected_status`. Returns whether a row was updated.
pub fn update_booking_state(
    conn: &Connection,
    booking: &Booking,
    expected_status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, payment_status = ?2, updated_at = ?3
         WHERE id = ?4 AND status = ?5",
        params![
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.updated_at.format(TIMESTAMP_FORMAT).to_string(),
            booking.id,
            expected_status.as_str(),
        ],
    )?;
    Ok(count > 0)
}

fn query_bookings(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &Row<'_>) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let service_date: String = row.get(7)?;
    let amount: String = row.get(8)?;
    let status: String = row.get(9)?;
    let payment_status: String = row.get(10)?;
    let created_at: String = row.get(14)?;
    let updated_at: String = row.get(15)?;

    Ok(Booking {
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        vendor_id: row.get(3)?,
        vendor_name: row.get(4)?,
        service_name: row.get(5)?,
        event_type: row.get(6)?,
        service_date: NaiveDate::parse_from_str(&service_date, DATE_FORMAT)
            .with_context(|| format!("bad service_date for booking {id}"))?,
        amount: amount
            .parse::<Decimal>()
            .with_context(|| format!("bad amount for booking {id}"))?,
        status: BookingStatus::parse(&status)
            .with_context(|| format!("unknown status {status:?} for booking {id}"))?,
        payment_status: PaymentStatus::parse(&payment_status)
            .with_context(|| format!("unknown payment status {payment_status:?} for booking {id}"))?,
        notes: row.get(11)?,
        contact_phone: row.get(12)?,
        contact_email: row.get(13)?,
        created_at: NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
            .with_context(|| format!("bad created_at for booking {id}"))?,
        updated_at: NaiveDateTime::parse_from_str(&updated_at, TIMESTAMP_FORMAT)
            .with_context(|| format!("bad updated_at for booking {id}"))?,
        id,
    })
}
