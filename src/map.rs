//! Composes the schematic map: what to draw, where, and in which order.
//!
//! Directives come out in four groups, each drawn on top of the previous one:
//! route lines, route labels, stop markers, stop labels.

use tracing::debug;

use crate::catalogue::TransportCatalogue;
use crate::data::*;
use crate::error::RenderError;
use crate::projector::{Point, SphereProjector};
use crate::settings::{Color, LabelStyle, Offset, RenderSettings, UnderLayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Route,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Polyline {
        points: Vec<Point>,
        color: Color,
        stroke_width: f64,
    },
    Label {
        kind: LabelKind,
        text: String,
        position: Point,
        offset: Offset,
        font_size: u32,
        color: Color,
        underlayer: Option<UnderLayer>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
}

impl Directive {
    pub fn layer(&self) -> Layer {
        match self {
            Directive::Polyline { .. } => Layer::RouteLines,
            Directive::Label {
                kind: LabelKind::Route,
                ..
            } => Layer::RouteLabels,
            Directive::Circle { .. } => Layer::StopMarkers,
            Directive::Label {
                kind: LabelKind::Stop,
                ..
            } => Layer::StopLabels,
        }
    }
}

/// Drawing groups, in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    RouteLines,
    RouteLabels,
    StopMarkers,
    StopLabels,
}

pub const STOP_MARKER_FILL: &str = "white";
pub const STOP_LABEL_FILL: &str = "black";

pub struct MapComposer<'a> {
    catalogue: &'a TransportCatalogue,
    settings: &'a RenderSettings,
}

impl<'a> MapComposer<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, settings: &'a RenderSettings) -> Self {
        Self {
            catalogue,
            settings,
        }
    }

    /// Validates the settings before anything is emitted, so a configuration
    /// error never yields a partial map.
    pub fn compose(&self) -> Result<Vec<Directive>, RenderError> {
        self.settings.validate()?;

        let routes: Vec<&Bus> = self
            .catalogue
            .buses_sorted()
            .into_iter()
            .filter(|bus| !bus.stops.is_empty())
            .collect();
        let stops = self.catalogue.served_stops_sorted();

        if !routes.is_empty() && self.settings.color_palette.is_empty() {
            return Err(RenderError::EmptyPalette);
        }

        let Some(projector) = SphereProjector::new(
            stops.iter().map(|(_, stop)| stop.position),
            self.settings.canvas(),
        ) else {
            debug!("No served stops, map is empty");
            return Ok(Vec::new());
        };

        let mut directives = Vec::new();
        self.route_lines(&projector, &routes, &mut directives)?;
        self.route_labels(&projector, &routes, &mut directives)?;
        self.stop_markers(&projector, &stops, &mut directives);
        self.stop_labels(&projector, &stops, &mut directives);

        debug!(
            routes = routes.len(),
            stops = stops.len(),
            directives = directives.len(),
            "Map composed"
        );

        Ok(directives)
    }

    fn route_lines(
        &self,
        projector: &SphereProjector,
        routes: &[&Bus],
        out: &mut Vec<Directive>,
    ) -> Result<(), RenderError> {
        for (index, bus) in routes.iter().enumerate() {
            out.push(Directive::Polyline {
                points: bus
                    .stops
                    .iter()
                    .map(|&id| self.position(projector, id))
                    .collect(),
                color: self.settings.route_color(index)?.clone(),
                stroke_width: self.settings.line_width,
            });
        }
        Ok(())
    }

    fn route_labels(
        &self,
        projector: &SphereProjector,
        routes: &[&Bus],
        out: &mut Vec<Directive>,
    ) -> Result<(), RenderError> {
        for (index, bus) in routes.iter().enumerate() {
            let color = self.settings.route_color(index)?;

            for terminal in terminals(bus) {
                out.push(self.label(
                    LabelKind::Route,
                    &bus.number,
                    self.position(projector, terminal),
                    self.settings.bus_label(),
                    color.clone(),
                ));
            }
        }
        Ok(())
    }

    fn stop_markers(
        &self,
        projector: &SphereProjector,
        stops: &[(StopId, &Stop)],
        out: &mut Vec<Directive>,
    ) {
        out.extend(stops.iter().map(|(_, stop)| Directive::Circle {
            center: projector.project(stop.position),
            radius: self.settings.stop_radius,
            fill: Color::from(STOP_MARKER_FILL),
        }));
    }

    fn stop_labels(
        &self,
        projector: &SphereProjector,
        stops: &[(StopId, &Stop)],
        out: &mut Vec<Directive>,
    ) {
        for (_, stop) in stops {
            out.push(self.label(
                LabelKind::Stop,
                &stop.name,
                projector.project(stop.position),
                self.settings.stop_label(),
                Color::from(STOP_LABEL_FILL),
            ));
        }
    }

    fn label(
        &self,
        kind: LabelKind,
        text: &str,
        position: Point,
        style: LabelStyle,
        color: Color,
    ) -> Directive {
        Directive::Label {
            kind,
            text: text.to_owned(),
            position,
            offset: style.offset,
            font_size: style.font_size,
            color,
            underlayer: Some(self.settings.underlayer()),
        }
    }

    fn position(&self, projector: &SphereProjector, id: StopId) -> Point {
        projector.project(self.catalogue.stop(id).position)
    }
}

/// Stops that carry the route's name: the first one, plus the far end of a
/// back-and-forth route when it differs.
fn terminals(bus: &Bus) -> Vec<StopId> {
    let (Some(first), Some(last)) = (bus.first_stop(), bus.last_stop()) else {
        return Vec::new();
    };

    match bus.kind {
        RouteKind::BackAndForth if first != last => vec![first, last],
        _ => vec![first],
    }
}

pub fn compose(
    catalogue: &TransportCatalogue,
    settings: &RenderSettings,
) -> Result<Vec<Directive>, RenderError> {
    MapComposer::new(catalogue, settings).compose()
}
