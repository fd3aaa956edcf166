//! # Rooms
//!
//! Rooms are the only input the estimator reads. Each room belongs to exactly
//! one floor and contributes `width_m × length_m` to the total floor area; its
//! position is layout information only.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "room-3f2a...",
//!   "type": "bedroom",
//!   "name": "Bedroom 1",
//!   "width_m": 3.0,
//!   "length_m": 4.0,
//!   "position": { "x": 20.0, "y": 20.0 },
//!   "floor_id": "floor-1"
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{Meters, SqMeters};

/// Default width of a newly placed room (m)
pub const DEFAULT_ROOM_WIDTH_M: f64 = 3.0;

/// Default length of a newly placed room (m)
pub const DEFAULT_ROOM_LENGTH_M: f64 = 4.0;

/// Kind of room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    Living,
    Dining,
    Office,
}

impl RoomType {
    /// All room types, in palette order
    pub const ALL: [RoomType; 6] = [
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Kitchen,
        RoomType::Living,
        RoomType::Dining,
        RoomType::Office,
    ];

    /// Lowercase key used in JSON and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Living => "living",
            RoomType::Dining => "dining",
            RoomType::Office => "office",
        }
    }

    /// Capitalized key, used as the stem of generated room names ("Living 2")
    pub fn name_stem(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Living => "Living",
            RoomType::Dining => "Dining",
            RoomType::Office => "Office",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Living => "Living Room",
            RoomType::Dining => "Dining Room",
            RoomType::Office => "Office",
        }
    }
}

impl FromStr for RoomType {
    type Err = EstimateError;

    /// Parse from common string representations ("living", "Living Room", "LIVING-ROOM")
    fn from_str(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "bedroom" => Ok(RoomType::Bedroom),
            "bathroom" | "bath" => Ok(RoomType::Bathroom),
            "kitchen" => Ok(RoomType::Kitchen),
            "living" | "livingroom" => Ok(RoomType::Living),
            "dining" | "diningroom" => Ok(RoomType::Dining),
            "office" => Ok(RoomType::Office),
            _ => Err(EstimateError::invalid_input(
                "room_type",
                s,
                "Expected one of: bedroom, bathroom, kitchen, living, dining, office",
            )),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Position of a room on the floor plan canvas (layout only)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A room on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: String,
    /// Kind of room
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// User-visible name (e.g., "Bedroom 1")
    pub name: String,
    /// Width in meters (positive)
    pub width_m: f64,
    /// Length in meters (positive)
    pub length_m: f64,
    /// Canvas position
    #[serde(default)]
    pub position: Position,
    /// Floor this room belongs to
    pub floor_id: String,
}

impl Room {
    /// Create a room with explicit dimensions and a fresh identifier.
    ///
    /// Dimensions are not checked here; [`crate::project::ProjectData::add_room`]
    /// rejects invalid ones before they reach the project.
    pub fn new(
        room_type: RoomType,
        name: impl Into<String>,
        width_m: f64,
        length_m: f64,
        floor_id: impl Into<String>,
    ) -> Self {
        Room {
            id: format!("room-{}", Uuid::new_v4()),
            room_type,
            name: name.into(),
            width_m,
            length_m,
            position: Position::default(),
            floor_id: floor_id.into(),
        }
    }

    /// Floor area of this room
    pub fn area(&self) -> SqMeters {
        Meters(self.width_m) * Meters(self.length_m)
    }
}

/// Partial update for a room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomUpdate {
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub name: Option<String>,
    pub width_m: Option<f64>,
    pub length_m: Option<f64>,
    pub position: Option<Position>,
    pub floor_id: Option<String>,
}

impl RoomUpdate {
    /// Update that only resizes the room
    pub fn resize(width_m: f64, length_m: f64) -> Self {
        RoomUpdate {
            width_m: Some(width_m),
            length_m: Some(length_m),
            ..Default::default()
        }
    }

    /// Whether this update can change the total floor area
    pub fn touches_area(&self) -> bool {
        self.width_m.is_some() || self.length_m.is_some()
    }
}

/// Reject dimensions that are non-finite or not strictly positive.
pub fn validate_dimension(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Dimension must be a positive number of meters",
        ));
    }
    Ok(())
}
