//! JSON request document: base requests build the catalogue, stat requests
//! query it, and the answers come back as one JSON array.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalogue::{CatalogueBuilder, TransportCatalogue};
use crate::data::{RawBus, RouteKind, Stop};
use crate::error::InputError;
use crate::geo::Coordinate;
use crate::map;
use crate::settings::RenderSettings;
use crate::svg::{Renderer, SvgRenderer};

pub const NOT_FOUND: &str = "not found";

#[derive(Deserialize, Debug)]
pub struct RequestDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub render_settings: Option<RenderSettings>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Map {
        request_id: i64,
        map: String,
    },
    NotFound {
        request_id: i64,
        error_message: String,
    },
}

impl Response {
    fn not_found(request_id: i64) -> Self {
        Self::NotFound {
            request_id,
            error_message: NOT_FOUND.to_owned(),
        }
    }
}

/// Applies base requests in load order: every stop, then every road
/// distance, then every bus.
pub fn build_catalogue(requests: &[BaseRequest]) -> Result<TransportCatalogue, InputError> {
    let mut builder = CatalogueBuilder::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            builder.add_stop(Stop::new(
                name.as_str(),
                Coordinate::new(*latitude, *longitude),
            ))?;
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            for (to, &meters) in road_distances {
                builder.add_distance(name, to, meters)?;
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            builder.add_bus(RawBus::new(
                name.as_str(),
                RouteKind::from_roundtrip(*is_roundtrip),
                stops.iter().map(String::as_str),
            ))?;
        }
    }

    Ok(builder.build())
}

pub fn answer(
    catalogue: &TransportCatalogue,
    settings: Option<&RenderSettings>,
    requests: &[StatRequest],
) -> Result<Vec<Response>, InputError> {
    // The map does not depend on the request, so it is drawn at most once.
    let mut map_image: Option<String> = None;

    requests
        .iter()
        .map(|request| -> Result<Response, InputError> {
            let response = match request {
                StatRequest::Bus { id, name } => match catalogue.get_route_statistics(name)? {
                    Some(stats) => Response::Bus {
                        request_id: *id,
                        curvature: stats.curvature,
                        route_length: stats.route_length,
                        stop_count: stats.stop_count,
                        unique_stop_count: stats.unique_stop_count,
                    },
                    None => Response::not_found(*id),
                },
                StatRequest::Stop { id, name } => match catalogue.get_stop_buses(name) {
                    Some(buses) => Response::Stop {
                        request_id: *id,
                        buses: buses.iter().cloned().collect(),
                    },
                    None => Response::not_found(*id),
                },
                StatRequest::Map { id } => {
                    let image = match &map_image {
                        Some(image) => image.clone(),
                        None => {
                            let settings = settings.ok_or(InputError::MissingRenderSettings)?;
                            let image =
                                SvgRenderer::default().render(&map::compose(catalogue, settings)?);
                            map_image = Some(image.clone());
                            image
                        }
                    };
                    Response::Map {
                        request_id: *id,
                        map: image,
                    }
                }
            };
            debug!(?request, "Answered");
            Ok(response)
        })
        .collect()
}

pub fn process_document(document: RequestDocument) -> Result<Vec<Response>, InputError> {
    info!(
        base_requests = document.base_requests.len(),
        stat_requests = document.stat_requests.len(),
        "Processing request document"
    );

    let catalogue = build_catalogue(&document.base_requests)?;
    answer(
        &catalogue,
        document.render_settings.as_ref(),
        &document.stat_requests,
    )
}

/// Reads a request document from `input` and writes the JSON response array
/// to `output`.
pub fn process(input: impl Read, output: impl Write) -> Result<(), InputError> {
    let document: RequestDocument = serde_json::from_reader(input)?;
    let responses = process_document(document)?;
    serde_json::to_writer_pretty(output, &responses)?;
    Ok(())
}
