use itertools::Itertools;

use crate::geo::Coordinate;

/// Handle of a [`Stop`] inside the catalogue's stop arena. Only meaningful
/// for the catalogue that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(pub(crate) usize);

/// Handle of a [`Bus`] inside the catalogue's bus arena. Only meaningful
/// for the catalogue that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub position: Coordinate,
}

impl Stop {
    pub fn new(name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Traversed once; the last stop is expected to equal the first.
    Circular,
    /// Traversed forward, then back along the same stops.
    BackAndForth,
}

impl RouteKind {
    pub fn from_roundtrip(is_roundtrip: bool) -> Self {
        if is_roundtrip {
            Self::Circular
        } else {
            Self::BackAndForth
        }
    }
}

/// A route as handed over by an input loader, before stop names are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBus {
    pub number: String,
    pub kind: RouteKind,
    pub stops: Vec<String>,
}

impl RawBus {
    pub fn new<S: Into<String>>(
        number: impl Into<String>,
        kind: RouteKind,
        stops: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            number: number.into(),
            kind,
            stops: stops.into_iter().map(Into::into).collect(),
        }
    }
}

/// A route whose stops were resolved against the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub number: String,
    pub kind: RouteKind,
    pub stops: Vec<StopId>,
}

impl Bus {
    /// The sequence actually ridden: back-and-forth routes return along the
    /// same stops without repeating the terminal.
    pub fn effective_stops(&self) -> Vec<StopId> {
        match self.kind {
            RouteKind::Circular => self.stops.clone(),
            RouteKind::BackAndForth => self
                .stops
                .iter()
                .chain(self.stops.iter().rev().skip(1))
                .copied()
                .collect(),
        }
    }

    pub fn stop_count(&self) -> usize {
        match self.kind {
            RouteKind::Circular => self.stops.len(),
            RouteKind::BackAndForth => (2 * self.stops.len()).saturating_sub(1),
        }
    }

    pub fn unique_stop_count(&self) -> usize {
        self.stops.iter().unique().count()
    }

    pub fn first_stop(&self) -> Option<StopId> {
        self.stops.first().copied()
    }

    pub fn last_stop(&self) -> Option<StopId> {
        self.stops.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusStatistics {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: u64,
    pub geographic_length: f64,
    pub curvature: f64,
}
