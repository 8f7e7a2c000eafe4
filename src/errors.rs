// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for weather operations

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Which event variant an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Firing incident or known issue
    Incident,
    /// Planned maintenance window
    PlannedMaintenance,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Incident => write!(f, "incident"),
            EventKind::PlannedMaintenance => write!(f, "planned maintenance"),
        }
    }
}

/// Errors that can occur while storing events or computing weather
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No event with this GUID exists in the store
    #[error("{kind} not found: {id}")]
    NotFound { kind: EventKind, id: Uuid },

    /// An event with this GUID already exists in the store
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EventKind, id: Uuid },

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid hierarchy source document
    #[error("Hierarchy error: {0}")]
    Hierarchy(String),

    /// NATS connection error
    #[error("NATS connection error: {0}")]
    NatsConnection(String),
}

/// Result type for weather operations
pub type WeatherResult<T> = Result<T, WeatherError>;

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for WeatherError {
    fn from(err: std::io::Error) -> Self {
        WeatherError::Configuration(err.to_string())
    }
}
