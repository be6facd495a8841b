//! CSV dataset loader.
//!
//! A dataset is a directory with three files:
//! `stops.csv` (`name,latitude,longitude`), `distances.csv` (`from,to,meters`)
//! and `buses.csv` (`number,is_roundtrip,stops`, stops separated by `|`).

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::catalogue::{CatalogueBuilder, TransportCatalogue};
use crate::data::{RawBus, RouteKind, Stop};
use crate::error::InputError;
use crate::geo::Coordinate;

pub const STOP_SEPARATOR: char = '|';

#[derive(Deserialize, Debug)]
pub struct StopRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize, Debug)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub meters: u32,
}

#[derive(Deserialize, Debug)]
pub struct BusRecord {
    pub number: String,
    pub is_roundtrip: bool,
    pub stops: String,
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        Stop::new(
            record.name,
            Coordinate::new(record.latitude, record.longitude),
        )
    }
}

impl From<BusRecord> for RawBus {
    fn from(record: BusRecord) -> Self {
        let stops: Vec<&str> = if record.stops.trim().is_empty() {
            Vec::new()
        } else {
            record.stops.split(STOP_SEPARATOR).map(str::trim).collect()
        };

        RawBus::new(
            record.number,
            RouteKind::from_roundtrip(record.is_roundtrip),
            stops,
        )
    }
}

#[derive(Debug, Default)]
pub struct Dataset {
    pub stops: Vec<StopRecord>,
    pub distances: Vec<DistanceRecord>,
    pub buses: Vec<BusRecord>,
}

impl Dataset {
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, InputError> {
        let dir = dir.as_ref();

        Ok(Self {
            stops: deserialize_into(csv::Reader::from_path(dir.join("stops.csv"))?)?,
            distances: deserialize_into(csv::Reader::from_path(dir.join("distances.csv"))?)?,
            buses: deserialize_into(csv::Reader::from_path(dir.join("buses.csv"))?)?,
        })
    }

    pub fn from_readers(
        stops: impl Read,
        distances: impl Read,
        buses: impl Read,
    ) -> Result<Self, InputError> {
        Ok(Self {
            stops: deserialize_into(csv::Reader::from_reader(stops))?,
            distances: deserialize_into(csv::Reader::from_reader(distances))?,
            buses: deserialize_into(csv::Reader::from_reader(buses))?,
        })
    }

    /// Loads stops, then distances, then buses, and seals the catalogue.
    pub fn into_catalogue(self) -> Result<TransportCatalogue, InputError> {
        let mut builder = CatalogueBuilder::new();

        for stop in self.stops {
            builder.add_stop(stop.into())?;
        }
        for distance in &self.distances {
            builder.add_distance(&distance.from, &distance.to, distance.meters)?;
        }
        for bus in self.buses {
            builder.add_bus(bus.into())?;
        }

        Ok(builder.build())
    }
}

fn deserialize_into<T: DeserializeOwned, R: Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<T>, InputError> {
    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;

    info!(records = records.len(), "Processed {}", std::any::type_name::<T>());
    Ok(records)
}
