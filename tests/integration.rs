//! End-to-end tests for roomlight.
//!
//! These drive the public API from a JSON payload through graph building,
//! classification and export, and check the occupancy scenarios the light
//! controller relies on.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use roomlight::builder::GraphBuilder;
use roomlight::error::{RoomlightError, ValidationError};
use roomlight::export::ExportFormat;
use roomlight::graph::{Literal, Term};
use roomlight::occupancy::{LightToggle, classify};
use roomlight::pipeline::Pipeline;
use roomlight::vocab::Vocabulary;

fn room(name: &str) -> Value {
    json!({"name": name, "side": "north", "roomType": "generic", "w": 5, "h": 4})
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn toggle_for(rooms: Vec<Value>) -> LightToggle {
    Pipeline::default()
        .classify(&json!({ "rooms": rooms }))
        .unwrap()
}

#[test]
fn scenario_light_on_in_empty_kitchen() {
    let mut kitchen = room("Kitchen");
    kitchen["appliances"] = json!({"Light": "ON"});

    let toggle = toggle_for(vec![kitchen]);
    assert_eq!(toggle.rooms_with_people, set(&[]));
    assert_eq!(toggle.rooms_with_lights_on_and_no_people, set(&["Kitchen"]));
    assert_eq!(toggle.rooms_with_people_and_lights_off, set(&[]));
}

#[test]
fn scenario_person_in_bedroom_without_appliances() {
    let mut bedroom = room("Bedroom");
    bedroom["people"] = json!({"Alice": {"x": 1, "y": 2}});

    let toggle = toggle_for(vec![bedroom]);
    assert_eq!(toggle.rooms_with_people, set(&["Bedroom"]));
    assert_eq!(toggle.rooms_with_lights_on_and_no_people, set(&[]));
    // Nothing to switch on without a light.
    assert_eq!(toggle.rooms_with_people_and_lights_off, set(&[]));
}

#[test]
fn scenario_person_in_office_with_light_off() {
    let mut office = room("Office");
    office["appliances"] = json!({"Light": "OFF"});
    office["people"] = json!({"Bob": {"x": 3, "y": 3}});

    let toggle = toggle_for(vec![office]);
    assert_eq!(toggle.rooms_with_people, set(&["Office"]));
    assert_eq!(toggle.rooms_with_people_and_lights_off, set(&["Office"]));
    assert_eq!(toggle.rooms_with_lights_on_and_no_people, set(&[]));
}

#[test]
fn scenario_fan_is_not_a_light() {
    let mut den = room("Den");
    den["appliances"] = json!({"Fan": "ON"});

    let toggle = toggle_for(vec![den]);
    assert_eq!(toggle, LightToggle::default());
}

#[test]
fn occupied_lit_room_needs_no_toggle() {
    let mut lounge = room("Lounge");
    lounge["appliances"] = json!({"Light": "ON", "TV": "ON"});
    lounge["people"] = json!({"Carol": {"x": 0, "y": 0}});

    let toggle = toggle_for(vec![lounge]);
    assert_eq!(toggle.rooms_with_people, set(&["Lounge"]));
    assert!(toggle.rooms_with_lights_on_and_no_people.is_empty());
    assert!(toggle.rooms_with_people_and_lights_off.is_empty());
}

#[test]
fn toggle_sets_never_overlap() {
    let mut rooms = Vec::new();
    for (i, (light, person)) in [
        (None, false),
        (None, true),
        (Some("ON"), false),
        (Some("ON"), true),
        (Some("OFF"), false),
        (Some("OFF"), true),
    ]
    .into_iter()
    .enumerate()
    {
        let mut r = room(&format!("Room {i}"));
        if let Some(state) = light {
            r["appliances"] = json!({ "Light": state });
        }
        if person {
            r["people"] = json!({ format!("Person {i}"): {"x": i, "y": i} });
        }
        rooms.push(r);
    }

    let toggle = toggle_for(rooms);
    assert!(
        toggle
            .rooms_with_lights_on_and_no_people
            .is_disjoint(&toggle.rooms_with_people_and_lights_off)
    );
    assert_eq!(toggle.rooms_with_people, set(&["Room 1", "Room 3", "Room 5"]));
    assert_eq!(toggle.rooms_with_lights_on_and_no_people, set(&["Room 2"]));
    assert_eq!(toggle.rooms_with_people_and_lights_off, set(&["Room 5"]));
}

#[test]
fn single_room_round_trip() {
    let vocab = Vocabulary::default();
    let store = GraphBuilder::new(&vocab)
        .build(&json!([room("Living Room")]))
        .unwrap();

    let rooms = store.subjects_of_type(&vocab.room);
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].as_str(), "http://example.org/Living_Room");
    assert_eq!(
        store.value_of(&rooms[0], &vocab.has_name),
        Some(&Term::Literal(Literal::from("Living Room")))
    );
}

#[test]
fn room_names_keep_their_spaces_in_results() {
    let mut living = room("Living Room");
    living["appliances"] = json!({"Light": "ON"});
    let toggle = toggle_for(vec![living]);
    assert_eq!(toggle.rooms_with_lights_on_and_no_people, set(&["Living Room"]));
}

#[test]
fn shared_light_resource_is_aliased_across_rooms() {
    // Both rooms point at the same `ns1:Light` resource; the on/off
    // association is per room, so each room is still classified correctly.
    let mut kitchen = room("Kitchen");
    kitchen["appliances"] = json!({"Light": "ON"});
    let mut office = room("Office");
    office["appliances"] = json!({"Light": "OFF"});
    office["people"] = json!({"Dana": {"x": 1, "y": 1}});

    let vocab = Vocabulary::default();
    let store = GraphBuilder::new(&vocab)
        .build(&json!([kitchen, office]))
        .unwrap();
    assert_eq!(store.subjects_of_type(&vocab.appliance).len(), 1);

    let toggle = classify(&store, &vocab);
    assert_eq!(toggle.rooms_with_lights_on_and_no_people, set(&["Kitchen"]));
    assert_eq!(toggle.rooms_with_people_and_lights_off, set(&["Office"]));
}

#[test]
fn shared_person_counts_in_every_room() {
    let mut kitchen = room("Kitchen");
    kitchen["people"] = json!({"Alice": {"x": 1, "y": 1}});
    let mut hall = room("Hall");
    hall["appliances"] = json!({"Light": "OFF"});
    hall["people"] = json!({"Alice": {"x": 9, "y": 9}});

    let toggle = toggle_for(vec![kitchen, hall]);
    assert_eq!(toggle.rooms_with_people, set(&["Hall", "Kitchen"]));
    assert_eq!(toggle.rooms_with_people_and_lights_off, set(&["Hall"]));
}

#[test]
fn rebuilding_is_idempotent() {
    let mut kitchen = room("Kitchen");
    kitchen["appliances"] = json!({"Light": "ON"});
    kitchen["people"] = json!({"Eve": {"x": 2, "y": 2}});

    let vocab = Vocabulary::default();
    let once = GraphBuilder::new(&vocab)
        .build(&json!([kitchen.clone()]))
        .unwrap();
    let twice = GraphBuilder::new(&vocab)
        .build(&json!([kitchen.clone(), kitchen]))
        .unwrap();
    assert_eq!(once.len(), twice.len());
    assert_eq!(once.triples(), twice.triples());
}

#[test]
fn invalid_payloads_are_rejected() {
    let pipeline = Pipeline::default();

    let err = pipeline.generate(&json!({})).unwrap_err();
    assert!(matches!(
        err,
        RoomlightError::Validation(ValidationError::MissingRooms)
    ));

    let mut bad = room("Kitchen");
    bad["w"] = json!("wide");
    let err = pipeline
        .generate(&json!({ "rooms": [room("Hall"), bad] }))
        .unwrap_err();
    assert!(matches!(
        err,
        RoomlightError::Validation(ValidationError::NotAnInteger { field: "w", .. })
    ));
}

#[test]
fn turtle_response_contains_typed_literals() {
    let mut kitchen = room("Kitchen");
    kitchen["appliances"] = json!({"Light": "ON"});
    kitchen["people"] = json!({"Frank": {"x": 7, "y": 8}});

    let response = Pipeline::default()
        .generate(&json!({ "rooms": [kitchen] }))
        .unwrap();
    let ttl = &response.raw_rdf;

    assert!(ttl.contains("@prefix ns1: <http://example.org/> ."));
    assert!(ttl.contains("ns1:Kitchen a ns1:Room ;"));
    assert!(ttl.contains("ns1:hasWidth \"5\"^^xsd:integer"));
    assert!(ttl.contains("ns1:hasName \"Kitchen\""));
    assert!(ttl.contains("ns1:hasOnStateAppliance ns1:Light"));
    assert!(ttl.contains("ns1:Frank a ns1:Person ;"));
    assert!(ttl.contains("ns1:hasPositionX \"7\"^^xsd:integer"));
}

#[test]
fn export_is_deterministic() {
    let mut a = room("A");
    a["appliances"] = json!({"Light": "ON", "Fan": "OFF"});
    let mut b = room("B");
    b["people"] = json!({"Gus": {"x": 1, "y": 2}, "Hal": {"x": 3, "y": 4}});

    let pipeline = Pipeline::default().with_format(ExportFormat::NTriples);
    let first = pipeline
        .export(&json!({ "rooms": [a.clone(), b.clone()] }))
        .unwrap();
    let second = pipeline.export(&json!({ "rooms": [b, a] })).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_namespace() {
    let config = roomlight::config::RoomlightConfig {
        namespace: "urn:house:".into(),
        ..Default::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    let text = pipeline
        .with_format(ExportFormat::NTriples)
        .export(&json!({ "rooms": [room("Attic")] }))
        .unwrap();
    assert!(text.contains("<urn:house:Attic> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <urn:house:Room> ."));
}
