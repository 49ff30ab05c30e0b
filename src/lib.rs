// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # roomlight
//!
//! Turns a description of rooms, their appliances and the people in them into
//! a graph of typed facts, then queries that graph to decide which lights
//! should be toggled.
//!
//! ## Architecture
//!
//! - **Resources** (`resource`, `vocab`): namespace-minted IRIs and the fixed
//!   class/predicate vocabulary
//! - **Triple store** (`graph`): deduplicated, indexed `(subject, predicate, object)` facts
//! - **Builder** (`builder`): validates room records and emits their triples
//! - **Occupancy** (`occupancy`): occupancy and light-state classification
//! - **Export** (`export`): deterministic Turtle / N-Triples text
//! - **Pipeline** (`pipeline`): request-level build → classify → export
//!
//! ## Library usage
//!
//! ```
//! use roomlight::pipeline::Pipeline;
//!
//! let payload = serde_json::json!({
//!     "rooms": [{
//!         "name": "Kitchen", "side": "left", "roomType": "kitchen", "w": 4, "h": 3,
//!         "appliances": {"Light": "ON"}
//!     }]
//! });
//! let response = Pipeline::default().generate(&payload).unwrap();
//! assert!(response.light_toggle.rooms_with_lights_on_and_no_people.contains("Kitchen"));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod occupancy;
pub mod pipeline;
pub mod resource;
pub mod vocab;
