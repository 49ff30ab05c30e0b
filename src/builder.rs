//! Graph builder: validates room records and emits their triples.
//!
//! Building happens in two passes. [`parse_rooms`] turns the raw JSON room
//! list into typed [`RoomRecord`]s and rejects anything malformed; only then
//! does [`GraphBuilder::build_records`] write triples. A validation failure
//! therefore never leaves a half-built store behind.

use serde_json::{Map, Value};

use crate::error::{ValidationError, json_kind};
use crate::graph::{Literal, TripleStore};
use crate::resource::Resource;
use crate::vocab::Vocabulary;

/// Result type for payload validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// The appliance state that means "on". Anything else is off.
pub const ON_STATE: &str = "ON";

/// One validated room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub name: String,
    pub side: String,
    pub room_type: String,
    pub width: i64,
    pub height: i64,
    pub appliances: Vec<ApplianceRecord>,
    pub people: Vec<PersonRecord>,
}

/// An appliance entry of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceRecord {
    /// Raw display name, e.g. `"Ceiling Light"`.
    pub name: String,
    pub on: bool,
}

/// A person entry of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub x: i64,
    pub y: i64,
}

/// Validate every entry of a `rooms` array.
pub fn parse_rooms(rooms: &Value) -> ValidationResult<Vec<RoomRecord>> {
    let entries = rooms.as_array().ok_or_else(|| ValidationError::RoomsNotArray {
        found: json_kind(rooms),
    })?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| RoomRecord::from_json(index, entry))
        .collect()
}

impl RoomRecord {
    /// Validate one room record. `index` is its position in the `rooms` array.
    pub fn from_json(index: usize, value: &Value) -> ValidationResult<Self> {
        let obj = value.as_object().ok_or_else(|| ValidationError::RoomNotObject {
            index,
            found: json_kind(value),
        })?;

        let field = |name: &'static str| {
            obj.get(name)
                .ok_or(ValidationError::MissingField { index, field: name })
        };

        // Check presence of everything first so a record missing several
        // fields reports the first one in declaration order.
        for name in ["name", "side", "roomType", "w", "h"] {
            field(name)?;
        }

        let name = string_field(&format!("room #{index}"), "name", field("name")?)?;
        let location = format!("room \"{name}\"");

        let side = string_field(&location, "side", field("side")?)?;
        let room_type = string_field(&location, "roomType", field("roomType")?)?;
        let width = integer_field(&location, "w", field("w")?)?;
        let height = integer_field(&location, "h", field("h")?)?;

        let appliances = match optional_mapping(obj, &location, "appliances")? {
            Some(map) => map
                .iter()
                .map(|(appliance, state)| ApplianceRecord {
                    name: appliance.clone(),
                    on: state.as_str() == Some(ON_STATE),
                })
                .collect(),
            None => Vec::new(),
        };

        let people = match optional_mapping(obj, &location, "people")? {
            Some(map) => map
                .iter()
                .map(|(person, position)| PersonRecord::from_json(&location, person, position))
                .collect::<ValidationResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            name,
            side,
            room_type,
            width,
            height,
            appliances,
            people,
        })
    }
}

impl PersonRecord {
    fn from_json(room_location: &str, name: &str, position: &Value) -> ValidationResult<Self> {
        let location = format!("{room_location}, person \"{name}\"");
        let pos = position
            .as_object()
            .ok_or_else(|| ValidationError::NotAMapping {
                location: location.clone(),
                field: "position",
                found: json_kind(position),
            })?;

        let coord = |field: &'static str| -> ValidationResult<i64> {
            let value = pos.get(field).ok_or_else(|| ValidationError::MissingPosition {
                location: location.clone(),
                field,
            })?;
            integer_field(&location, field, value)
        };

        Ok(Self {
            name: name.to_string(),
            x: coord("x")?,
            y: coord("y")?,
        })
    }
}

fn string_field(location: &str, field: &'static str, value: &Value) -> ValidationResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::NotAString {
            location: location.to_string(),
            field,
            found: json_kind(value),
        })
}

fn integer_field(location: &str, field: &'static str, value: &Value) -> ValidationResult<i64> {
    as_integer(value).ok_or_else(|| ValidationError::NotAnInteger {
        location: location.to_string(),
        field,
        found: value.to_string(),
    })
}

fn optional_mapping<'a>(
    obj: &'a Map<String, Value>,
    location: &str,
    field: &'static str,
) -> ValidationResult<Option<&'a Map<String, Value>>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(ValidationError::NotAMapping {
            location: location.to_string(),
            field,
            found: json_kind(other),
        }),
    }
}

/// Interpret a JSON value as an integer.
///
/// Accepts integers, whole-valued floats and decimal strings.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Emits the triples describing a set of rooms.
pub struct GraphBuilder<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Validate a JSON `rooms` array and build its store.
    pub fn build(&self, rooms: &Value) -> ValidationResult<TripleStore> {
        let records = parse_rooms(rooms)?;
        Ok(self.build_records(&records))
    }

    /// Build the store for already-validated records.
    pub fn build_records(&self, records: &[RoomRecord]) -> TripleStore {
        let v = self.vocab;
        let mut store = TripleStore::new();

        for class in v.entity_classes() {
            store.add(class.clone(), v.rdf_type.clone(), v.class.clone());
        }

        for room in records {
            self.emit_room(&mut store, room);
        }

        tracing::debug!(
            rooms = records.len(),
            triples = store.len(),
            "graph built"
        );
        store
    }

    fn emit_room(&self, store: &mut TripleStore, room: &RoomRecord) {
        let v = self.vocab;
        let room_res = v.ns.resource(&room.name);

        store.add(room_res.clone(), v.rdf_type.clone(), v.room.clone());

        // Single-valued: a repeated room name overwrites these.
        let attrs: [(&Resource, Literal); 5] = [
            (&v.has_name, Literal::from(room.name.as_str())),
            (&v.has_side, Literal::from(room.side.as_str())),
            (&v.has_room_type, Literal::from(room.room_type.as_str())),
            (&v.has_width, Literal::Integer(room.width)),
            (&v.has_height, Literal::Integer(room.height)),
        ];
        for (predicate, literal) in attrs {
            store.set(room_res.clone(), predicate.clone(), literal);
        }

        for appliance in &room.appliances {
            let appliance_res = v.ns.resource(&appliance.name);
            store.add(appliance_res.clone(), v.rdf_type.clone(), v.appliance.clone());
            store.add(room_res.clone(), v.has_appliances.clone(), appliance_res.clone());
            store.add(
                appliance_res.clone(),
                v.has_appliance_type.clone(),
                Literal::from(appliance.name.as_str()),
            );
            let state = if appliance.on {
                &v.has_on_state_appliance
            } else {
                &v.has_off_state_appliance
            };
            store.add(room_res.clone(), state.clone(), appliance_res);
        }

        for person in &room.people {
            let person_res = v.ns.resource(&person.name);
            store.add(person_res.clone(), v.rdf_type.clone(), v.person.clone());
            store.add(room_res.clone(), v.has_person.clone(), person_res.clone());
            store.add(person_res.clone(), v.has_position_x.clone(), Literal::Integer(person.x));
            store.add(person_res, v.has_position_y.clone(), Literal::Integer(person.y));
        }

        tracing::debug!(
            room = %room.name,
            appliances = room.appliances.len(),
            people = room.people.len(),
            "room emitted"
        );
    }
}
