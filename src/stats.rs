//! Per-route statistics: stop counts, road length and curvature.

use itertools::Itertools;
use tracing::warn;

use crate::catalogue::TransportCatalogue;
use crate::data::*;
use crate::error::Result;
use crate::geo;

/// Curvature reported for routes whose stops all coincide.
pub const DEGENERATE_CURVATURE: f64 = 1.0;

pub fn compute(catalogue: &TransportCatalogue, bus: &Bus) -> Result<BusStatistics> {
    let route_length = route_length(catalogue, bus).inspect_err(|err| {
        warn!(bus = %bus.number, error = %err, "Route walks an edge without a road distance")
    })?;
    let geographic_length = geographic_length(catalogue, bus);

    let curvature = if geographic_length == 0.0 {
        DEGENERATE_CURVATURE
    } else {
        route_length as f64 / geographic_length
    };

    Ok(BusStatistics {
        stop_count: bus.stop_count(),
        unique_stop_count: bus.unique_stop_count(),
        route_length,
        geographic_length,
        curvature,
    })
}

/// Road length in meters. The way back of a back-and-forth route is summed
/// from the table on its own, as the two directions may differ.
pub fn route_length(catalogue: &TransportCatalogue, bus: &Bus) -> Result<u64> {
    let forward = walk(catalogue, bus.stops.iter())?;

    match bus.kind {
        RouteKind::Circular => Ok(forward),
        RouteKind::BackAndForth => Ok(forward + walk(catalogue, bus.stops.iter().rev())?),
    }
}

/// Straight-line length in meters over the stops as listed, doubled for
/// back-and-forth routes.
pub fn geographic_length(catalogue: &TransportCatalogue, bus: &Bus) -> f64 {
    let one_way: f64 = bus
        .stops
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| {
            geo::distance(catalogue.stop(from).position, catalogue.stop(to).position)
        })
        .sum();

    match bus.kind {
        RouteKind::Circular => one_way,
        RouteKind::BackAndForth => one_way * 2.0,
    }
}

fn walk<'a>(
    catalogue: &TransportCatalogue,
    stops: impl Iterator<Item = &'a StopId> + Clone,
) -> Result<u64> {
    stops
        .tuple_windows()
        .map(|(&from, &to)| catalogue.distance(from, to).map(u64::from))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CatalogueBuilder;
    use crate::error::CatalogueError;
    use crate::geo::Coordinate;
    use approx::assert_relative_eq;

    fn two_stop_builder() -> CatalogueBuilder {
        let mut builder = CatalogueBuilder::new();
        builder
            .add_stop(Stop::new("A", Coordinate::new(0.0, 0.0)))
            .unwrap();
        builder
            .add_stop(Stop::new("B", Coordinate::new(0.0, 1.0)))
            .unwrap();
        builder
    }

    #[test]
    fn test_circular_loop_with_fallback() {
        let mut builder = two_stop_builder();
        builder.add_distance("A", "B", 1000).unwrap();
        builder
            .add_bus(RawBus::new("1", RouteKind::Circular, ["A", "B", "A"]))
            .unwrap();
        let catalogue = builder.build();

        let stats = catalogue.get_route_statistics("1").unwrap().unwrap();
        let ab = geo::distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));

        assert_eq!(stats.stop_count, 3);
        assert_eq!(stats.unique_stop_count, 2);
        assert_eq!(stats.route_length, 2000);
        assert_relative_eq!(stats.geographic_length, 2.0 * ab);
        assert_relative_eq!(stats.curvature, 2000.0 / (2.0 * ab));
    }

    #[test]
    fn test_back_and_forth_sums_both_directions() {
        let mut builder = two_stop_builder();
        builder
            .add_stop(Stop::new("C", Coordinate::new(0.0, 2.0)))
            .unwrap();
        builder.add_distance("A", "B", 1000).unwrap();
        builder.add_distance("B", "A", 1100).unwrap();
        builder.add_distance("B", "C", 900).unwrap();
        builder
            .add_bus(RawBus::new("2", RouteKind::BackAndForth, ["A", "B", "C"]))
            .unwrap();
        let catalogue = builder.build();

        let stats = catalogue.get_route_statistics("2").unwrap().unwrap();
        let one_way = 2.0 * geo::distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));

        assert_eq!(stats.stop_count, 5);
        assert_eq!(stats.unique_stop_count, 3);
        // forward 1000 + 900, back 900 (fallback) + 1100
        assert_eq!(stats.route_length, 3900);
        assert_relative_eq!(stats.geographic_length, 2.0 * one_way, max_relative = 1e-12);
    }

    #[test]
    fn test_circular_is_not_doubled() {
        let mut builder = two_stop_builder();
        builder
            .add_stop(Stop::new("C", Coordinate::new(1.0, 1.0)))
            .unwrap();
        builder.add_distance("A", "B", 10).unwrap();
        builder.add_distance("B", "C", 20).unwrap();
        builder.add_distance("C", "A", 30).unwrap();
        builder
            .add_bus(RawBus::new("3", RouteKind::Circular, ["A", "B", "C", "A"]))
            .unwrap();
        let catalogue = builder.build();

        let stats = catalogue.get_route_statistics("3").unwrap().unwrap();

        assert_eq!(stats.stop_count, 4);
        assert_eq!(stats.route_length, 60);
    }

    #[test]
    fn test_missing_distance_is_reported() {
        let mut builder = two_stop_builder();
        builder
            .add_bus(RawBus::new("4", RouteKind::BackAndForth, ["A", "B"]))
            .unwrap();
        let catalogue = builder.build();

        assert_eq!(
            catalogue.get_route_statistics("4"),
            Err(CatalogueError::MissingDistance {
                from: "A".into(),
                to: "B".into()
            })
        );
    }

    #[test]
    fn test_coinciding_stops_have_degenerate_curvature() {
        let mut builder = CatalogueBuilder::new();
        builder
            .add_stop(Stop::new("A", Coordinate::new(10.0, 10.0)))
            .unwrap();
        builder
            .add_stop(Stop::new("B", Coordinate::new(10.0, 10.0)))
            .unwrap();
        builder.add_distance("A", "B", 5).unwrap();
        builder
            .add_bus(RawBus::new("5", RouteKind::BackAndForth, ["A", "B"]))
            .unwrap();
        builder
            .add_bus(RawBus::new("6", RouteKind::Circular, ["A"]))
            .unwrap();
        let catalogue = builder.build();

        let stats = catalogue.get_route_statistics("5").unwrap().unwrap();
        assert_eq!(stats.route_length, 10);
        assert_eq!(stats.geographic_length, 0.0);
        assert_eq!(stats.curvature, DEGENERATE_CURVATURE);

        let single = catalogue.get_route_statistics("6").unwrap().unwrap();
        assert_eq!(single.stop_count, 1);
        assert_eq!(single.route_length, 0);
        assert_eq!(single.curvature, DEGENERATE_CURVATURE);
    }
}
