use std::path::PathBuf;

use thiserror::Error;

use crate::db::SystemId;
use crate::dogma::{AttributeId, EffectId, TypeId};

/// Convenient result alias for the evetrade engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Raised when a required static-data table is absent from the dataset.
    #[error("unsupported dataset schema; missing table {table}")]
    UnsupportedSchema { table: String },

    /// Raised when a ship type is unknown or carries no dogma attributes.
    #[error("ship type {type_id} not found in static data")]
    ShipNotFound { type_id: TypeId },

    /// Raised when a ship exists but lacks the attribute a calculator needs.
    #[error("ship type {type_id} is missing required attribute {attribute_id}")]
    MissingRequiredAttribute {
        type_id: TypeId,
        attribute_id: AttributeId,
    },

    /// Raised for effect data that cannot be applied. Never fatal to a
    /// calculation; surfaced through result warnings instead.
    #[error("malformed effect {}: {reason}", format_effect(.effect_id))]
    MalformedEffect {
        effect_id: Option<EffectId>,
        reason: String,
    },

    /// Raised when a system name could not be found in the dataset.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a system identifier is not part of the loaded starmap.
    #[error("unknown system id: {id}")]
    UnknownSystemId { id: SystemId },

    /// Raised when no route could be found between two systems.
    #[error("no route found between {start} and {goal}")]
    NoRouteFound { start: SystemId, goal: SystemId },

    /// Raised when travel-time inputs are out of range.
    #[error("invalid travel parameter: {message}")]
    InvalidTravelParameter { message: String },

    /// Wrapper for SQLite errors, including files that are not databases.
    /// JSON blobs inside rows never fail a load; they become effect issues.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

fn format_effect(effect_id: &Option<EffectId>) -> String {
    match effect_id {
        Some(id) => id.to_string(),
        None => "<unknown>".to_string(),
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
