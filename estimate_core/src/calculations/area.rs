//! # Area Aggregation
//!
//! Reduces rooms to total floor area. Area is summed across every floor;
//! the per-floor variant is for reporting only.

use crate::rooms::Room;
use crate::units::SqMeters;

/// Sum of `width × length` over all rooms. Empty input yields zero.
///
/// # Example
///
/// ```rust
/// use estimate_core::calculations::total_area;
/// use estimate_core::rooms::{Room, RoomType};
///
/// let rooms = vec![
///     Room::new(RoomType::Bedroom, "Bedroom 1", 3.0, 4.0, "floor-1"),
///     Room::new(RoomType::Kitchen, "Kitchen 1", 2.0, 2.5, "floor-1"),
/// ];
/// assert_eq!(total_area(&rooms).value(), 17.0);
/// assert_eq!(total_area(&[]).value(), 0.0);
/// ```
pub fn total_area(rooms: &[Room]) -> SqMeters {
    rooms.iter().map(Room::area).sum()
}

/// Area of the rooms on one floor
pub fn floor_area(rooms: &[Room], floor_id: &str) -> SqMeters {
    rooms
        .iter()
        .filter(|room| room.floor_id == floor_id)
        .map(Room::area)
        .sum()
}
