//! Transit network catalogue: stops, routes and road distances, with route
//! statistics and a schematic map renderer.
//!
//! ```
//! use transport_catalogue::prelude::*;
//!
//! let mut builder = CatalogueBuilder::new();
//! builder.add_stop(Stop::new("A", Coordinate::new(0.0, 0.0))).unwrap();
//! builder.add_stop(Stop::new("B", Coordinate::new(0.0, 1.0))).unwrap();
//! builder.add_distance("A", "B", 1000).unwrap();
//! builder
//!     .add_bus(RawBus::new("1", RouteKind::Circular, ["A", "B", "A"]))
//!     .unwrap();
//! let catalogue = builder.build();
//!
//! let stats = catalogue.get_route_statistics("1").unwrap().unwrap();
//! assert_eq!(stats.stop_count, 3);
//! assert_eq!(stats.route_length, 2000);
//! ```

pub mod catalogue;
pub mod data;
pub mod error;
pub mod geo;
pub mod input;
pub mod map;
pub mod projector;
pub mod request;
pub mod settings;
pub mod stats;
pub mod svg;

pub mod prelude {
    pub use crate::catalogue::{CatalogueBuilder, TransportCatalogue};
    pub use crate::data::*;
    pub use crate::error::{CatalogueError, InputError, RenderError};
    pub use crate::geo::Coordinate;
    pub use crate::map::{Directive, MapComposer};
    pub use crate::settings::{Color, RenderSettings};
    pub use crate::svg::{Renderer, SvgRenderer};
}
