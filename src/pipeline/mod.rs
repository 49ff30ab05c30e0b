//! Request pipeline: payload → graph → classification + export.
//!
//! A [`Pipeline`] holds only immutable settings (vocabulary and export format).
//! Every call to [`Pipeline::generate`] builds and drops its own
//! [`TripleStore`], so one pipeline can serve concurrent requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::GraphBuilder;
use crate::config::RoomlightConfig;
use crate::error::{RoomlightResult, ValidationError};
use crate::export::{self, ExportFormat};
use crate::graph::TripleStore;
use crate::occupancy::{self, LightToggle};
use crate::vocab::Vocabulary;

/// Response document handed back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Canonical text of the full graph.
    #[serde(rename = "rawRDF")]
    pub raw_rdf: String,
    /// Which rooms need their lights toggled.
    #[serde(rename = "lightToggle")]
    pub light_toggle: LightToggle,
}

/// Build → classify → serialize, configured once.
#[derive(Debug, Clone)]
pub struct Pipeline {
    vocab: Vocabulary,
    format: ExportFormat,
}

impl Pipeline {
    pub fn new(vocab: Vocabulary, format: ExportFormat) -> Self {
        Self { vocab, format }
    }

    /// Pipeline for a loaded configuration.
    pub fn from_config(config: &RoomlightConfig) -> RoomlightResult<Self> {
        Ok(Self::new(config.vocabulary()?, config.format))
    }

    /// Same pipeline, different export format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate and build the graph for a request payload.
    ///
    /// The payload must be an object with a `rooms` key; this is checked
    /// before anything is built.
    pub fn build(&self, payload: &Value) -> RoomlightResult<TripleStore> {
        let rooms = rooms_of(payload)?;
        Ok(GraphBuilder::new(&self.vocab).build(rooms)?)
    }

    /// Classify the rooms of a payload without exporting the graph.
    pub fn classify(&self, payload: &Value) -> RoomlightResult<LightToggle> {
        let store = self.build(payload)?;
        Ok(occupancy::classify(&store, &self.vocab))
    }

    /// Serialize the graph of a payload without classifying it.
    pub fn export(&self, payload: &Value) -> RoomlightResult<String> {
        let store = self.build(payload)?;
        Ok(export::serialize(&store, &self.vocab, self.format))
    }

    /// Run the full request.
    pub fn generate(&self, payload: &Value) -> RoomlightResult<GenerateResponse> {
        let store = self.build(payload)?;
        let light_toggle = occupancy::classify(&store, &self.vocab);
        let raw_rdf = export::serialize(&store, &self.vocab, self.format);

        tracing::info!(
            triples = store.len(),
            rooms = store.subjects_of_type(&self.vocab.room).len(),
            with_people = light_toggle.rooms_with_people.len(),
            lights_on_no_people = light_toggle.rooms_with_lights_on_and_no_people.len(),
            people_lights_off = light_toggle.rooms_with_people_and_lights_off.len(),
            format = %self.format,
            "graph generated"
        );

        Ok(GenerateResponse {
            raw_rdf,
            light_toggle,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Vocabulary::default(), ExportFormat::default())
    }
}

/// The `rooms` value of a request payload.
pub fn rooms_of(payload: &Value) -> Result<&Value, ValidationError> {
    payload
        .as_object()
        .ok_or(ValidationError::NotAnObject)?
        .get("rooms")
        .ok_or(ValidationError::MissingRooms)
}
