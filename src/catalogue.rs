use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::data::*;
use crate::error::{CatalogueError, Result};
use crate::stats;

/// Load-phase store. Stops must be added before the distances and buses that
/// reference them; [`CatalogueBuilder::build`] seals it into a read-only
/// [`TransportCatalogue`].
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,
    distances: HashMap<(StopId, StopId), u32>,
    stop_buses: Vec<BTreeSet<String>>,
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, stop: Stop) -> Result<StopId> {
        if self.stop_index.contains_key(&stop.name) {
            return Err(CatalogueError::DuplicateStop(stop.name));
        }

        let id = StopId(self.stops.len());
        self.stop_index.insert(stop.name.clone(), id);
        self.stops.push(stop);
        self.stop_buses.push(BTreeSet::new());

        Ok(id)
    }

    /// Records the directed distance `from -> to`, replacing an earlier entry
    /// for the same ordered pair.
    pub fn add_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<()> {
        let key = (self.resolve(from)?, self.resolve(to)?);
        self.distances.insert(key, meters);

        Ok(())
    }

    pub fn add_bus(&mut self, bus: RawBus) -> Result<BusId> {
        if self.bus_index.contains_key(&bus.number) {
            return Err(CatalogueError::DuplicateBus(bus.number));
        }

        // Resolve everything up front so a rejected bus leaves no trace.
        let stops = bus
            .stops
            .iter()
            .map(|name| self.resolve(name))
            .collect::<Result<Vec<_>>>()?;

        for stop in &stops {
            self.stop_buses[stop.0].insert(bus.number.clone());
        }

        let id = BusId(self.buses.len());
        self.bus_index.insert(bus.number.clone(), id);
        self.buses.push(Bus {
            number: bus.number,
            kind: bus.kind,
            stops,
        });

        Ok(id)
    }

    pub fn build(self) -> TransportCatalogue {
        info!(
            stops = self.stops.len(),
            buses = self.buses.len(),
            distances = self.distances.len(),
            "Transport catalogue sealed"
        );

        TransportCatalogue {
            stops: self.stops,
            stop_index: self.stop_index,
            buses: self.buses,
            bus_index: self.bus_index,
            distances: self.distances,
            stop_buses: self.stop_buses,
        }
    }

    fn resolve(&self, name: &str) -> Result<StopId> {
        self.stop_index
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_owned()))
    }
}

/// Sealed, read-only snapshot of the network. Nothing mutates it after
/// [`CatalogueBuilder::build`], so it can be shared freely between readers.
#[derive(Debug)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,
    distances: HashMap<(StopId, StopId), u32>,
    stop_buses: Vec<BTreeSet<String>>,
}

impl TransportCatalogue {
    /// # Panics
    ///
    /// If `id` was issued by a different catalogue with more stops.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    /// # Panics
    ///
    /// If `id` was issued by a different catalogue with more buses.
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.0]
    }

    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn find_bus(&self, number: &str) -> Option<BusId> {
        self.bus_index.get(number).copied()
    }

    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, stop)| (StopId(i), stop))
    }

    /// Buses ordered by number.
    pub fn buses_sorted(&self) -> Vec<&Bus> {
        let mut buses: Vec<&Bus> = self.buses.iter().collect();
        buses.sort_unstable_by(|a, b| a.number.cmp(&b.number));
        buses
    }

    /// Stops served by at least one bus, ordered by name.
    pub fn served_stops_sorted(&self) -> Vec<(StopId, &Stop)> {
        let mut stops: Vec<(StopId, &Stop)> = self
            .stops()
            .filter(|(id, _)| !self.stop_buses[id.0].is_empty())
            .collect();
        stops.sort_unstable_by(|a, b| a.1.name.cmp(&b.1.name));
        stops
    }

    /// Road distance `from -> to`, falling back to `to -> from` when only the
    /// reverse direction was recorded.
    pub fn distance(&self, from: StopId, to: StopId) -> Result<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .ok_or_else(|| CatalogueError::MissingDistance {
                from: self.stop(from).name.clone(),
                to: self.stop(to).name.clone(),
            })
    }

    /// `None` for an unknown stop, an empty set for a stop no bus serves.
    pub fn get_stop_buses(&self, stop_name: &str) -> Option<&BTreeSet<String>> {
        self.find_stop(stop_name).map(|id| &self.stop_buses[id.0])
    }

    /// `Ok(None)` for an unknown bus; `Err` only when the route walks an edge
    /// with no recorded distance.
    pub fn get_route_statistics(&self, bus_number: &str) -> Result<Option<BusStatistics>> {
        let Some(id) = self.find_bus(bus_number) else {
            debug!(bus = bus_number, "Bus not found");
            return Ok(None);
        };

        stats::compute(self, self.bus(id)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn builder_with_stops(names: &[&str]) -> CatalogueBuilder {
        let mut builder = CatalogueBuilder::new();
        for (i, name) in names.iter().enumerate() {
            builder
                .add_stop(Stop::new(*name, Coordinate::new(0.0, i as f64)))
                .unwrap();
        }
        builder
    }

    #[test]
    fn test_duplicate_stop_is_rejected() {
        let mut builder = builder_with_stops(&["A"]);

        let err = builder
            .add_stop(Stop::new("A", Coordinate::new(1.0, 1.0)))
            .unwrap_err();

        assert_eq!(err, CatalogueError::DuplicateStop("A".into()));
        let catalogue = builder.build();
        assert_eq!(catalogue.stops().count(), 1);
        assert_eq!(catalogue.stop(StopId(0)).position, Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_bus_with_unknown_stop_is_not_applied() {
        let mut builder = builder_with_stops(&["A", "B"]);

        let err = builder
            .add_bus(RawBus::new("7", RouteKind::Circular, ["A", "X", "A"]))
            .unwrap_err();

        assert_eq!(err, CatalogueError::UnknownStop("X".into()));
        let catalogue = builder.build();
        assert!(catalogue.find_bus("7").is_none());
        assert!(catalogue.get_stop_buses("A").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_bus_is_rejected() {
        let mut builder = builder_with_stops(&["A", "B"]);
        builder
            .add_bus(RawBus::new("7", RouteKind::BackAndForth, ["A", "B"]))
            .unwrap();

        let err = builder
            .add_bus(RawBus::new("7", RouteKind::BackAndForth, ["B"]))
            .unwrap_err();

        assert_eq!(err, CatalogueError::DuplicateBus("7".into()));
        let catalogue = builder.build();
        assert_eq!(catalogue.get_stop_buses("A").unwrap().len(), 1);
    }

    #[test]
    fn test_distance_with_unknown_stop() {
        let mut builder = builder_with_stops(&["A"]);

        assert_eq!(
            builder.add_distance("A", "B", 10),
            Err(CatalogueError::UnknownStop("B".into()))
        );
        assert_eq!(
            builder.add_distance("C", "A", 10),
            Err(CatalogueError::UnknownStop("C".into()))
        );
    }

    #[test]
    fn test_distance_lookup_falls_back_to_reverse() {
        let mut builder = builder_with_stops(&["A", "B", "C"]);
        builder.add_distance("A", "B", 100).unwrap();
        builder.add_distance("B", "C", 50).unwrap();
        builder.add_distance("C", "B", 70).unwrap();
        builder.add_distance("C", "B", 75).unwrap();
        let catalogue = builder.build();

        let (a, b, c) = (StopId(0), StopId(1), StopId(2));
        assert_eq!(catalogue.distance(a, b), Ok(100));
        assert_eq!(catalogue.distance(b, a), Ok(100));
        assert_eq!(catalogue.distance(b, c), Ok(50));
        assert_eq!(catalogue.distance(c, b), Ok(75));
        assert_eq!(
            catalogue.distance(a, c),
            Err(CatalogueError::MissingDistance {
                from: "A".into(),
                to: "C".into()
            })
        );
    }

    #[test]
    fn test_stop_buses() {
        let mut builder = builder_with_stops(&["A", "B", "Lonely"]);
        builder
            .add_bus(RawBus::new("750", RouteKind::Circular, ["A", "B", "A"]))
            .unwrap();
        builder
            .add_bus(RawBus::new("256", RouteKind::BackAndForth, ["B", "A"]))
            .unwrap();
        let catalogue = builder.build();

        let buses: Vec<&str> = catalogue
            .get_stop_buses("A")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(buses, ["256", "750"]);
        assert_eq!(catalogue.get_stop_buses("Lonely"), Some(&BTreeSet::new()));
        assert_eq!(catalogue.get_stop_buses("Nowhere"), None);
    }

    #[test]
    #[should_panic]
    fn test_handle_from_another_catalogue() {
        let mut other = builder_with_stops(&["A", "B", "C"]);
        let foreign = other
            .add_stop(Stop::new("D", Coordinate::new(1.0, 1.0)))
            .unwrap();

        let catalogue = builder_with_stops(&["A"]).build();
        catalogue.stop(foreign);
    }

    #[test]
    fn test_unknown_bus_statistics() {
        let catalogue = builder_with_stops(&["A"]).build();

        assert_eq!(catalogue.get_route_statistics("404"), Ok(None));
    }

    #[test]
    fn test_sorted_enumerations() {
        let mut builder = builder_with_stops(&["C", "A", "B", "Unused"]);
        builder
            .add_bus(RawBus::new("b", RouteKind::BackAndForth, ["C", "A"]))
            .unwrap();
        builder
            .add_bus(RawBus::new("a", RouteKind::BackAndForth, ["B"]))
            .unwrap();
        let catalogue = builder.build();

        let buses: Vec<&str> = catalogue
            .buses_sorted()
            .iter()
            .map(|bus| bus.number.as_str())
            .collect();
        assert_eq!(buses, ["a", "b"]);

        let stops: Vec<&str> = catalogue
            .served_stops_sorted()
            .iter()
            .map(|(_, stop)| stop.name.as_str())
            .collect();
        assert_eq!(stops, ["A", "B", "C"]);
    }
}
