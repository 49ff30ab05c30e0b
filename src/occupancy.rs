//! Occupancy and lighting classification over a built graph.
//!
//! Three fixed pattern queries decide which rooms need a light toggled:
//!
//! - **rooms with people**: `(room, hasPerson, ?p)` has a match;
//! - **lights on, nobody home**: `(room, hasOnStateAppliance, ?a)` and
//!   `(?a, hasApplianceType, "Light")` match but the room has no people;
//! - **people in the dark**: the room has people, no light on, and at least
//!   one `"Light"` appliance switched off.
//!
//! A room with people and a light on is only in the first set: nothing needs
//! toggling there. Neither is an occupied room without any light, since
//! there is nothing to switch on: "has people and no light on" alone is not
//! enough for the third set. An occupied room holding only a fan, or a lamp
//! not typed `"Light"`, is in the first set only.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::{Literal, Term, TripleStore};
use crate::resource::Resource;
use crate::vocab::Vocabulary;

/// The appliance type literal that counts as a light. Matching is exact.
pub const LIGHT_TYPE: &str = "Light";

/// The three classification sets, each holding room names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightToggle {
    pub rooms_with_people: BTreeSet<String>,
    pub rooms_with_lights_on_and_no_people: BTreeSet<String>,
    pub rooms_with_people_and_lights_off: BTreeSet<String>,
}

/// Occupancy and lighting of a single room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomState {
    pub has_people: bool,
    /// Some `"Light"` appliance is on in this room.
    pub light_on: bool,
    /// Some `"Light"` appliance is off in this room.
    pub light_off: bool,
}

/// Evaluate the per-room patterns for `room`.
pub fn room_state(store: &TripleStore, vocab: &Vocabulary, room: &Resource) -> RoomState {
    let has_people = !store.objects(room, &vocab.has_person).is_empty();

    let light = Term::Literal(Literal::from(LIGHT_TYPE));
    let any_light = |state: &Resource| {
        store
            .objects(room, state)
            .into_iter()
            .filter_map(Term::as_resource)
            .any(|appliance| store.contains(appliance, &vocab.has_appliance_type, &light))
    };

    RoomState {
        has_people,
        light_on: any_light(&vocab.has_on_state_appliance),
        light_off: any_light(&vocab.has_off_state_appliance),
    }
}

/// Classify every room in `store`.
pub fn classify(store: &TripleStore, vocab: &Vocabulary) -> LightToggle {
    let mut toggle = LightToggle::default();

    for room in store.subjects_of_type(&vocab.room) {
        let Some(name) = store.value_of(&room, &vocab.has_name).map(Term::text) else {
            tracing::warn!(room = %room, "room has no name, skipping");
            continue;
        };
        let state = room_state(store, vocab, &room);

        if state.has_people {
            toggle.rooms_with_people.insert(name.clone());
        }
        if state.light_on && !state.has_people {
            toggle.rooms_with_lights_on_and_no_people.insert(name);
        } else if state.has_people && !state.light_on && state.light_off {
            toggle.rooms_with_people_and_lights_off.insert(name);
        }
    }

    toggle
}
