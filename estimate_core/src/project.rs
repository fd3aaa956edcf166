//! # Project Data
//!
//! `ProjectData` is the aggregate root of an estimate: floors, rooms, line
//! items, client details and the tax/discount/due-date terms. Every edit the
//! user can make is a method here.
//!
//! ## Structure
//!
//! ```text
//! ProjectData
//! ├── floors: Vec<Floor>        (never empty)
//! ├── rooms: Vec<Room>          (each references one floor)
//! ├── materials: Vec<Material>  (regenerated from rooms)
//! ├── labor: Vec<Labor>         (user managed)
//! ├── client: ClientInfo
//! ├── tax_percent / discount_percent / due_date
//! └── catalog: Catalog          (rates used for regeneration)
//! ```
//!
//! ## Edit Rules
//!
//! - Adding, updating or removing a room (or removing a floor with rooms)
//!   replaces the material list with a fresh estimate. Manual material edits
//!   do not survive the next room change.
//! - Moving a room does not touch materials.
//! - A rejected edit returns an error and leaves the project unchanged.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::project::ProjectData;
//! use estimate_core::rooms::RoomType;
//!
//! let mut project = ProjectData::default();
//! let floor = project.floors[0].id.clone();
//!
//! let room = project.new_room(RoomType::Bedroom, &floor);
//! assert_eq!(room.name, "Bedroom 1");
//! project.add_room(room).unwrap();
//!
//! assert_eq!(project.total_area().value(), 12.0);
//! assert_eq!(project.materials.len(), 6);
//! ```

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculations::{calculate_total_cost, estimate_labor_with, estimate_materials_with, floor_area, total_area};
use crate::calculations::CostSummary;
use crate::catalog::Catalog;
use crate::errors::{EstimateError, EstimateResult};
use crate::line_items::{validate_non_negative, Labor, LaborUpdate, Material, MaterialUpdate};
use crate::rooms::{validate_dimension, Position, Room, RoomType, RoomUpdate, DEFAULT_ROOM_LENGTH_M, DEFAULT_ROOM_WIDTH_M};
use crate::settings::EstimatorSettings;
use crate::units::SqMeters;

/// Identifier of the floor every new project starts with
pub const GROUND_FLOOR_ID: &str = "floor-1";

/// A building level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    /// 0 = ground floor
    pub level: i32,
}

impl Floor {
    /// The default ground floor
    pub fn ground() -> Self {
        Floor {
            id: GROUND_FLOOR_ID.to_string(),
            name: "Ground Floor".to_string(),
            level: 0,
        }
    }
}

/// Client contact block printed on the estimate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// Partial update for client details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfoUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Root container for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectData {
    pub floors: Vec<Floor>,
    pub rooms: Vec<Room>,
    pub materials: Vec<Material>,
    pub labor: Vec<Labor>,
    pub client: ClientInfo,
    /// Tax percentage applied to the subtotal
    pub tax_percent: f64,
    /// Discount percentage applied to the subtotal
    pub discount_percent: f64,
    pub due_date: NaiveDate,
    /// Rates used when regenerating line items
    pub catalog: Catalog,
}

impl Default for ProjectData {
    fn default() -> Self {
        ProjectData::with_settings(&EstimatorSettings::default())
    }
}

impl ProjectData {
    /// Create an empty project (one ground floor, no rooms) from settings.
    pub fn with_settings(settings: &EstimatorSettings) -> Self {
        ProjectData {
            floors: vec![Floor::ground()],
            rooms: Vec::new(),
            materials: Vec::new(),
            labor: Vec::new(),
            client: ClientInfo::default(),
            tax_percent: settings.default_tax_percent,
            discount_percent: settings.default_discount_percent,
            due_date: Utc::now().date_naive() + Duration::days(settings.due_in_days),
            catalog: settings.catalog.clone(),
        }
    }

    /// Parse a project from JSON and check its structural invariants.
    ///
    /// Missing fields take their defaults, so `{"rooms": [...]}` is a valid
    /// plan. Materials are taken as given; call
    /// [`refresh_material_estimates`](Self::refresh_material_estimates) to
    /// derive them from the rooms.
    pub fn from_json_str(text: &str) -> EstimateResult<Self> {
        Self::from_json_str_with(text, &EstimatorSettings::default())
    }

    /// Parse a project from JSON, taking every field the plan leaves out
    /// (tax, discount, due date, catalog...) from a project seeded by
    /// `settings`.
    pub fn from_json_str_with(text: &str, settings: &EstimatorSettings) -> EstimateResult<Self> {
        let invalid = |e: serde_json::Error| EstimateError::serialization(format!("Invalid project JSON: {}", e));

        let plan: serde_json::Value = serde_json::from_str(text).map_err(invalid)?;
        let serde_json::Value::Object(fields) = plan else {
            return Err(EstimateError::serialization("Invalid project JSON: expected an object"));
        };

        let mut seed = serde_json::to_value(ProjectData::with_settings(settings)).map_err(invalid)?;
        if let serde_json::Value::Object(seed_fields) = &mut seed {
            seed_fields.extend(fields);
        }

        let project: ProjectData = serde_json::from_value(seed).map_err(invalid)?;
        project.validate()?;
        Ok(project)
    }

    /// Check that at least one floor exists, floor ids are unique, every room
    /// is on a known floor with valid dimensions, and the catalog is valid.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.floors.is_empty() {
            return Err(EstimateError::invalid_input("floors", "[]", "A project needs at least one floor"));
        }
        for (i, floor) in self.floors.iter().enumerate() {
            if self.floors[..i].iter().any(|f| f.id == floor.id) {
                return Err(EstimateError::invalid_input("floors.id", &floor.id, "Duplicate floor identifier"));
            }
        }
        for room in &self.rooms {
            self.check_room(room)?;
        }
        validate_non_negative("tax_percent", self.tax_percent)?;
        validate_non_negative("discount_percent", self.discount_percent)?;
        self.catalog.validate()
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Total floor area over all floors
    pub fn total_area(&self) -> SqMeters {
        total_area(&self.rooms)
    }

    /// Floor area of one floor
    pub fn floor_area(&self, floor_id: &str) -> SqMeters {
        floor_area(&self.rooms, floor_id)
    }

    /// Cost summary for the current line items and terms
    pub fn cost_summary(&self) -> CostSummary {
        calculate_total_cost(self)
    }

    pub fn floor(&self, id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Rooms on one floor, in insertion order
    pub fn rooms_on_floor<'a>(&'a self, floor_id: &'a str) -> impl Iterator<Item = &'a Room> + 'a {
        self.rooms.iter().filter(move |r| r.floor_id == floor_id)
    }

    // ------------------------------------------------------------------
    // Floors
    // ------------------------------------------------------------------

    /// Add a floor one level above the highest existing one. Returns its id.
    pub fn add_floor(&mut self) -> String {
        let level = self.floors.iter().map(|f| f.level).max().map_or(0, |max| max + 1);
        let floor = Floor {
            id: format!("floor-{}", Uuid::new_v4()),
            name: format!("Floor {}", level),
            level,
        };
        let id = floor.id.clone();
        debug!(floor_id = %id, level, "floor added");
        self.floors.push(floor);
        id
    }

    /// Remove a floor and every room on it. The last floor cannot be removed.
    ///
    /// Materials are regenerated when rooms went with the floor, so they keep
    /// matching the remaining area. Returns the removed rooms.
    pub fn remove_floor(&mut self, id: &str) -> EstimateResult<Vec<Room>> {
        if self.floors.len() <= 1 {
            return Err(rejected(EstimateError::LastFloor { id: id.to_string() }));
        }
        if self.floor(id).is_none() {
            return Err(rejected(EstimateError::floor_not_found(id)));
        }

        self.floors.retain(|f| f.id != id);
        let (removed, kept): (Vec<Room>, Vec<Room>) = self.rooms.drain(..).partition(|r| r.floor_id == id);
        self.rooms = kept;

        debug!(floor_id = id, rooms_removed = removed.len(), "floor removed");
        if !removed.is_empty() {
            self.regenerate_materials();
        }
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    /// Build a default 3 m × 4 m room of `room_type` on `floor_id`, named
    /// after the number of rooms of that type already in the project.
    ///
    /// The room is not added; pass it to [`add_room`](Self::add_room).
    pub fn new_room(&self, room_type: RoomType, floor_id: &str) -> Room {
        let same_type = self.rooms.iter().filter(|r| r.room_type == room_type).count();
        let mut room = Room::new(
            room_type,
            format!("{} {}", room_type.name_stem(), same_type + 1),
            DEFAULT_ROOM_WIDTH_M,
            DEFAULT_ROOM_LENGTH_M,
            floor_id,
        );
        // cascade new rooms so they do not stack exactly on the canvas
        let offset = (self.rooms.len() % 10) as f64 * 10.0;
        room.position = Position {
            x: 20.0 + offset,
            y: 20.0 + offset,
        };
        room
    }

    /// Add a room and regenerate materials. Returns the room id.
    pub fn add_room(&mut self, room: Room) -> EstimateResult<String> {
        self.check_room(&room).map_err(rejected)?;
        if self.room(&room.id).is_some() {
            return Err(rejected(EstimateError::invalid_input(
                "room.id",
                &room.id,
                "A room with this identifier already exists",
            )));
        }

        let id = room.id.clone();
        debug!(room_id = %id, area = room.area().value(), "room added");
        self.rooms.push(room);
        self.regenerate_materials();
        Ok(id)
    }

    /// Apply a partial update to a room and regenerate materials.
    pub fn update_room(&mut self, id: &str, update: &RoomUpdate) -> EstimateResult<()> {
        let index = self.room_index(id).map_err(rejected)?;

        let mut room = self.rooms[index].clone();
        if let Some(room_type) = update.room_type {
            room.room_type = room_type;
        }
        if let Some(name) = &update.name {
            room.name = name.clone();
        }
        if let Some(width_m) = update.width_m {
            room.width_m = width_m;
        }
        if let Some(length_m) = update.length_m {
            room.length_m = length_m;
        }
        if let Some(position) = update.position {
            room.position = position;
        }
        if let Some(floor_id) = &update.floor_id {
            room.floor_id = floor_id.clone();
        }
        self.check_room(&room).map_err(rejected)?;

        self.rooms[index] = room;
        debug!(room_id = id, "room updated");
        self.regenerate_materials();
        Ok(())
    }

    /// Remove a room and regenerate materials. Returns the removed room.
    pub fn remove_room(&mut self, id: &str) -> EstimateResult<Room> {
        let index = self.room_index(id).map_err(rejected)?;
        let room = self.rooms.remove(index);
        debug!(room_id = id, "room removed");
        self.regenerate_materials();
        Ok(room)
    }

    /// Move a room on the canvas. Materials are left alone.
    pub fn update_room_position(&mut self, id: &str, x: f64, y: f64) -> EstimateResult<()> {
        let index = self.room_index(id).map_err(rejected)?;
        self.rooms[index].position = Position { x, y };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Materials
    // ------------------------------------------------------------------

    /// Replace materials with a fresh estimate from the current rooms.
    pub fn refresh_material_estimates(&mut self) {
        self.regenerate_materials();
    }

    /// Add a manual material line
    pub fn add_material(&mut self, material: Material) -> EstimateResult<()> {
        material.validate().map_err(rejected)?;
        if self.materials.iter().any(|m| m.id == material.id) {
            return Err(rejected(EstimateError::invalid_input(
                "material.id",
                &material.id,
                "A material with this identifier already exists",
            )));
        }
        self.materials.push(material);
        Ok(())
    }

    /// Edit a material line. The edit is lost on the next room change.
    pub fn update_material(&mut self, id: &str, update: &MaterialUpdate) -> EstimateResult<()> {
        let index = self
            .materials
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| rejected(EstimateError::material_not_found(id)))?;
        let updated = update.applied_to(&self.materials[index]).map_err(rejected)?;
        self.materials[index] = updated;
        Ok(())
    }

    pub fn remove_material(&mut self, id: &str) -> EstimateResult<Material> {
        let index = self
            .materials
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| rejected(EstimateError::material_not_found(id)))?;
        Ok(self.materials.remove(index))
    }

    // ------------------------------------------------------------------
    // Labor
    // ------------------------------------------------------------------

    /// Replace labor with the default estimate for the current floor area.
    pub fn populate_default_labor(&mut self) {
        let area = self.total_area();
        self.labor = estimate_labor_with(&self.catalog, area);
        debug!(area = area.value(), lines = self.labor.len(), "default labor populated");
    }

    /// Add a labor line
    pub fn add_labor(&mut self, labor: Labor) -> EstimateResult<()> {
        labor.validate().map_err(rejected)?;
        if self.labor.iter().any(|l| l.id == labor.id) {
            return Err(rejected(EstimateError::invalid_input(
                "labor.id",
                &labor.id,
                "A labor line with this identifier already exists",
            )));
        }
        self.labor.push(labor);
        Ok(())
    }

    pub fn update_labor(&mut self, id: &str, update: &LaborUpdate) -> EstimateResult<()> {
        let index = self
            .labor
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| rejected(EstimateError::labor_not_found(id)))?;
        let updated = update.applied_to(&self.labor[index]).map_err(rejected)?;
        self.labor[index] = updated;
        Ok(())
    }

    pub fn remove_labor(&mut self, id: &str) -> EstimateResult<Labor> {
        let index = self
            .labor
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| rejected(EstimateError::labor_not_found(id)))?;
        Ok(self.labor.remove(index))
    }

    // ------------------------------------------------------------------
    // Terms and client
    // ------------------------------------------------------------------

    pub fn update_client_info(&mut self, update: &ClientInfoUpdate) {
        let client = &mut self.client;
        if let Some(name) = &update.name {
            client.name = name.clone();
        }
        if let Some(address) = &update.address {
            client.address = address.clone();
        }
        if let Some(email) = &update.email {
            client.email = email.clone();
        }
        if let Some(phone) = &update.phone {
            client.phone = phone.clone();
        }
    }

    /// Set the tax percentage (must be finite and >= 0)
    pub fn set_tax(&mut self, tax_percent: f64) -> EstimateResult<()> {
        validate_non_negative("tax_percent", tax_percent).map_err(rejected)?;
        self.tax_percent = tax_percent;
        Ok(())
    }

    /// Set the discount percentage (must be finite and >= 0)
    pub fn set_discount(&mut self, discount_percent: f64) -> EstimateResult<()> {
        validate_non_negative("discount_percent", discount_percent).map_err(rejected)?;
        self.discount_percent = discount_percent;
        Ok(())
    }

    pub fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = due_date;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn regenerate_materials(&mut self) {
        let area = self.total_area();
        self.materials = estimate_materials_with(&self.catalog, area);
        debug!(area = area.value(), lines = self.materials.len(), "materials regenerated");
    }

    fn room_index(&self, id: &str) -> EstimateResult<usize> {
        self.rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EstimateError::room_not_found(id))
    }

    fn check_room(&self, room: &Room) -> EstimateResult<()> {
        validate_dimension("width_m", room.width_m)?;
        validate_dimension("length_m", room.length_m)?;
        if self.floor(&room.floor_id).is_none() {
            return Err(EstimateError::floor_not_found(&room.floor_id));
        }
        Ok(())
    }
}

/// Log a rejected edit and pass the error through
fn rejected(err: EstimateError) -> EstimateError {
    warn!(code = err.error_code(), "edit rejected: {}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_room(width: f64, length: f64) -> (ProjectData, String) {
        let mut project = ProjectData::default();
        let mut room = project.new_room(RoomType::Bedroom, GROUND_FLOOR_ID);
        room.width_m = width;
        room.length_m = length;
        let id = project.add_room(room).unwrap();
        (project, id)
    }

    fn quantity(project: &ProjectData, id: &str) -> f64 {
        project.materials.iter().find(|m| m.id == id).unwrap().quantity
    }

    #[test]
    fn test_default_project() {
        let project = ProjectData::default();
        assert_eq!(project.floors, vec![Floor::ground()]);
        assert!(project.rooms.is_empty());
        assert!(project.materials.is_empty());
        assert!(project.labor.is_empty());
        assert_eq!(project.tax_percent, 10.0);
        assert_eq!(project.discount_percent, 0.0);
        assert!(project.due_date > Utc::now().date_naive() + Duration::days(28));
    }

    #[test]
    fn test_new_room_naming_and_defaults() {
        let mut project = ProjectData::default();
        let first = project.new_room(RoomType::Living, GROUND_FLOOR_ID);
        assert_eq!(first.name, "Living 1");
        assert_eq!((first.width_m, first.length_m), (3.0, 4.0));
        project.add_room(first).unwrap();

        project.add_room(project.new_room(RoomType::Kitchen, GROUND_FLOOR_ID)).unwrap();
        let second = project.new_room(RoomType::Living, GROUND_FLOOR_ID);
        assert_eq!(second.name, "Living 2");
        assert_ne!(second.position, project.rooms[0].position);
    }

    #[test]
    fn test_add_room_regenerates_materials() {
        let (project, _) = project_with_room(3.0, 4.0);
        assert_eq!(project.total_area().value(), 12.0);
        assert_eq!(quantity(&project, "mat-1"), 2.0);
        assert_eq!(quantity(&project, "mat-2"), 14.0);
        assert_eq!(quantity(&project, "mat-4"), 960.0);
    }

    #[test]
    fn test_add_room_rejects_bad_input_without_change() {
        let (mut project, _) = project_with_room(3.0, 4.0);
        let before = project.clone();

        let mut zero_width = project.new_room(RoomType::Office, GROUND_FLOOR_ID);
        zero_width.width_m = 0.0;
        assert_eq!(project.add_room(zero_width).unwrap_err().error_code(), "INVALID_INPUT");

        let orphan = project.new_room(RoomType::Office, "floor-missing");
        assert_eq!(project.add_room(orphan).unwrap_err().error_code(), "FLOOR_NOT_FOUND");

        assert_eq!(project, before);
    }

    #[test]
    fn test_update_room_resizes_and_regenerates() {
        let (mut project, id) = project_with_room(3.0, 4.0);
        project.update_room(&id, &RoomUpdate::resize(5.0, 4.0)).unwrap();
        assert_eq!(project.total_area().value(), 20.0);
        assert_eq!(quantity(&project, "mat-4"), 1600.0);
    }

    #[test]
    fn test_update_room_rejects_negative_length() {
        let (mut project, id) = project_with_room(3.0, 4.0);
        let before = project.clone();
        let err = project.update_room(&id, &RoomUpdate::resize(3.0, -1.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(project, before);

        let err = project.update_room("room-nope", &RoomUpdate::resize(3.0, 3.0)).unwrap_err();
        assert_eq!(err.error_code(), "ROOM_NOT_FOUND");
    }

    #[test]
    fn test_manual_material_edit_overwritten_by_room_change() {
        let (mut project, id) = project_with_room(3.0, 4.0);
        let update = MaterialUpdate {
            quantity: Some(50.0),
            ..Default::default()
        };
        project.update_material("mat-1", &update).unwrap();
        assert_eq!(quantity(&project, "mat-1"), 50.0);

        project
            .update_room(
                &id,
                &RoomUpdate {
                    name: Some("Master Bedroom".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(quantity(&project, "mat-1"), 2.0);
    }

    #[test]
    fn test_move_room_keeps_manual_edits() {
        let (mut project, id) = project_with_room(3.0, 4.0);
        project
            .update_material(
                "mat-3",
                &MaterialUpdate {
                    quantity: Some(9.0),
                    ..Default::default()
                },
            )
            .unwrap();
        project.update_room_position(&id, 150.0, 80.0).unwrap();
        assert_eq!(quantity(&project, "mat-3"), 9.0);
        assert_eq!(project.room(&id).unwrap().position, Position { x: 150.0, y: 80.0 });
    }

    #[test]
    fn test_remove_room_back_to_zero() {
        let (mut project, id) = project_with_room(3.0, 4.0);
        let removed = project.remove_room(&id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(project.total_area().value(), 0.0);
        assert_eq!(project.materials.len(), 6);
        assert!(project.materials.iter().all(|m| m.quantity == 0.0));
        assert_eq!(project.cost_summary().materials_subtotal, 0.0);
    }

    #[test]
    fn test_add_floor_levels() {
        let mut project = ProjectData::default();
        let first = project.add_floor();
        let second = project.add_floor();
        assert_eq!(project.floor(&first).unwrap().level, 1);
        assert_eq!(project.floor(&first).unwrap().name, "Floor 1");
        assert_eq!(project.floor(&second).unwrap().level, 2);
        assert_eq!(project.floors.len(), 3);
    }

    #[test]
    fn test_cannot_remove_last_floor() {
        let (mut project, _) = project_with_room(3.0, 4.0);
        let before = project.clone();
        let err = project.remove_floor(GROUND_FLOOR_ID).unwrap_err();
        assert_eq!(err.error_code(), "LAST_FLOOR");
        assert_eq!(project, before);
    }

    #[test]
    fn test_remove_floor_drops_its_rooms() {
        let (mut project, ground_room) = project_with_room(3.0, 4.0);
        let upper = project.add_floor();
        let mut upstairs = project.new_room(RoomType::Office, &upper);
        upstairs.width_m = 5.0;
        upstairs.length_m = 5.0;
        project.add_room(upstairs).unwrap();
        assert_eq!(project.total_area().value(), 37.0);
        assert_eq!(project.floor_area(&upper).value(), 25.0);

        let removed = project.remove_floor(&upper).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(project.floors.len(), 1);
        assert_eq!(project.rooms.len(), 1);
        assert_eq!(project.rooms[0].id, ground_room);
        assert_eq!(project.total_area().value(), 12.0);
        assert_eq!(quantity(&project, "mat-4"), 960.0);
    }

    #[test]
    fn test_remove_unknown_floor() {
        let mut project = ProjectData::default();
        project.add_floor();
        let err = project.remove_floor("floor-x").unwrap_err();
        assert_eq!(err.error_code(), "FLOOR_NOT_FOUND");
        assert_eq!(project.floors.len(), 2);
    }

    #[test]
    fn test_labor_lifecycle() {
        let (mut project, _) = project_with_room(3.0, 4.0);
        project.populate_default_labor();
        assert_eq!(project.labor.len(), 5);
        assert_eq!(project.labor[0].hours, 24.0);

        let extra = Labor::custom("Cleanup", 4.0, 15.0);
        let extra_id = extra.id.clone();
        project.add_labor(extra).unwrap();
        assert!(project.add_labor(Labor::custom("Bad", 0.0, 15.0)).is_err());

        project
            .update_labor(
                &extra_id,
                &LaborUpdate {
                    rate: Some(20.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(project.labor.last().unwrap().line_total(), 80.0);

        project.remove_labor(&extra_id).unwrap();
        assert_eq!(project.labor.len(), 5);
        assert_eq!(project.remove_labor(&extra_id).unwrap_err().error_code(), "ITEM_NOT_FOUND");
    }

    #[test]
    fn test_material_add_remove() {
        let mut project = ProjectData::default();
        let rebar = Material::custom("Rebar", "pieces", 12.0, 40.0);
        let rebar_id = rebar.id.clone();
        project.add_material(rebar.clone()).unwrap();
        assert!(project.add_material(rebar).is_err());
        assert_eq!(project.cost_summary().materials_subtotal, 480.0);
        assert_eq!(project.remove_material(&rebar_id).unwrap().name, "Rebar");
        assert!(project.materials.is_empty());
    }

    #[test]
    fn test_terms() {
        let mut project = ProjectData::default();
        project.set_tax(12.0).unwrap();
        project.set_discount(5.0).unwrap();
        assert!(project.set_tax(-1.0).is_err());
        assert!(project.set_discount(f64::NAN).is_err());
        assert_eq!(project.tax_percent, 12.0);
        assert_eq!(project.discount_percent, 5.0);

        let due = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        project.set_due_date(due);
        assert_eq!(project.due_date, due);

        project.update_client_info(&ClientInfoUpdate {
            name: Some("Dela Cruz Family".into()),
            phone: Some("+63 912 345 6789".into()),
            ..Default::default()
        });
        assert_eq!(project.client.name, "Dela Cruz Family");
        assert_eq!(project.client.email, "");
    }

    #[test]
    fn test_from_json_minimal_plan() {
        let json = r#"{
            "rooms": [
                {"id": "r1", "type": "kitchen", "name": "Kitchen", "width_m": 3, "length_m": 4, "floor_id": "floor-1"}
            ],
            "tax_percent": 0
        }"#;
        let mut project = ProjectData::from_json_str(json).unwrap();
        assert_eq!(project.floors, vec![Floor::ground()]);
        assert_eq!(project.tax_percent, 0.0);
        assert!(project.materials.is_empty());
        project.refresh_material_estimates();
        assert_eq!(quantity(&project, "mat-3"), 5.0);
    }

    #[test]
    fn test_from_json_rejects_orphan_room() {
        let json = r#"{
            "rooms": [
                {"id": "r1", "type": "kitchen", "name": "Kitchen", "width_m": 3, "length_m": 4, "floor_id": "floor-9"}
            ]
        }"#;
        let err = ProjectData::from_json_str(json).unwrap_err();
        assert_eq!(err.error_code(), "FLOOR_NOT_FOUND");

        let err = ProjectData::from_json_str(r#"{"floors": []}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = ProjectData::from_json_str("not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_from_json_with_settings_fills_missing_terms() {
        let settings = EstimatorSettings {
            default_tax_percent: 12.0,
            default_discount_percent: 5.0,
            due_in_days: 7,
            ..EstimatorSettings::default()
        };

        let project = ProjectData::from_json_str_with(r#"{"rooms": []}"#, &settings).unwrap();
        assert_eq!(project.tax_percent, 12.0);
        assert_eq!(project.discount_percent, 5.0);
        assert!(project.due_date <= Utc::now().date_naive() + Duration::days(8));

        // values present in the plan win
        let project = ProjectData::from_json_str_with(r#"{"tax_percent": 3}"#, &settings).unwrap();
        assert_eq!(project.tax_percent, 3.0);
        assert_eq!(project.discount_percent, 5.0);

        let err = ProjectData::from_json_str_with("[1, 2]", &settings).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let (project, _) = project_with_room(2.5, 3.0);
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("\"due_date\""));
        let roundtrip = ProjectData::from_json_str(&json).unwrap();
        assert_eq!(roundtrip, project);
    }
}
