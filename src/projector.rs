use tracing::debug;

use crate::geo::Coordinate;
use crate::settings::Canvas;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Linear map from geographic degrees onto a padded canvas, north up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    /// `None` when there is nothing to project.
    pub fn new(points: impl IntoIterator<Item = Coordinate>, canvas: Canvas) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);
        for point in points {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lon = min_lon.min(point.longitude);
            max_lon = max_lon.max(point.longitude);
        }

        let width_zoom = (max_lon > min_lon)
            .then(|| (canvas.width - 2.0 * canvas.padding) / (max_lon - min_lon));
        let height_zoom = (max_lat > min_lat)
            .then(|| (canvas.height - 2.0 * canvas.padding) / (max_lat - min_lat));

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(zoom), None) | (None, Some(zoom)) => zoom,
            (None, None) => 0.0,
        };

        debug!(zoom, min_lon, max_lat, "Projection computed");

        Some(Self {
            padding: canvas.padding,
            min_lon,
            max_lat,
            zoom,
        })
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn project(&self, coordinate: Coordinate) -> Point {
        Point {
            x: (coordinate.longitude - self.min_lon) * self.zoom + self.padding,
            y: (self.max_lat - coordinate.latitude) * self.zoom + self.padding,
        }
    }
}
