//! Fixed vocabulary: entity classes and predicates.
//!
//! Everything except `rdf:type` is minted under the configured [`Namespace`],
//! so a graph built with `urn:home:` uses `urn:home:Room`, `urn:home:hasName`
//! and so on.

use crate::resource::{Namespace, Resource};

/// `rdf:` namespace IRI.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdf:type`, the type-assertion predicate.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `xsd:` namespace IRI.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
/// Datatype IRI attached to integer literals.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// Resources for the entity classes and predicates of one graph.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub ns: Namespace,
    pub rdf_type: Resource,

    // Classes
    pub class: Resource,
    pub room: Resource,
    pub appliance: Resource,
    pub person: Resource,

    // Room attributes
    pub has_name: Resource,
    pub has_side: Resource,
    pub has_room_type: Resource,
    pub has_width: Resource,
    pub has_height: Resource,

    // Appliances
    pub has_appliances: Resource,
    pub has_appliance_type: Resource,
    pub has_on_state_appliance: Resource,
    pub has_off_state_appliance: Resource,

    // People
    pub has_person: Resource,
    pub has_position_x: Resource,
    pub has_position_y: Resource,
}

impl Vocabulary {
    pub fn new(ns: Namespace) -> Self {
        let r = |local: &str| ns.resource(local);
        Self {
            rdf_type: rdf_type(),
            class: r("Class"),
            room: r("Room"),
            appliance: r("Appliance"),
            person: r("Person"),
            has_name: r("hasName"),
            has_side: r("hasSide"),
            has_room_type: r("hasRoomType"),
            has_width: r("hasWidth"),
            has_height: r("hasHeight"),
            has_appliances: r("hasAppliances"),
            has_appliance_type: r("hasApplianceType"),
            has_on_state_appliance: r("hasOnStateAppliance"),
            has_off_state_appliance: r("hasOffStateAppliance"),
            has_person: r("hasPerson"),
            has_position_x: r("hasPositionX"),
            has_position_y: r("hasPositionY"),
            ns,
        }
    }

    /// The three entity classes, in the order their definitions are emitted.
    pub fn entity_classes(&self) -> [&Resource; 3] {
        [&self.appliance, &self.room, &self.person]
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(Namespace::default())
    }
}

/// The `rdf:type` resource.
pub fn rdf_type() -> Resource {
    Resource::known(RDF_TYPE)
}
