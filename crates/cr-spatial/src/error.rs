//! Spatial-subsystem error type.
//!
//! Every routing failure is an expected outcome, returned as a value.  The
//! variants are distinct so a caller can tell "could not locate points" from
//! "points not connected".

use std::fmt;

use thiserror::Error;

use cr_core::{CoreError, NodeId};

/// Which end of a route query an error refers to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Endpoint {
    Start,
    End,
    Both,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::End => "end",
            Endpoint::Both => "start and end",
        })
    }
}

/// Errors produced by `cr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no line geometry loaded; the route graph is empty")]
    MissingInput,

    #[error("could not locate a graph node near the {endpoint} point")]
    UnresolvedEndpoint { endpoint: Endpoint },

    #[error("no route from {from} to {to}: the points are not connected")]
    NoPath { from: NodeId, to: NodeId },

    #[error("route query is missing its {missing} point")]
    InvalidQuery { missing: Endpoint },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
