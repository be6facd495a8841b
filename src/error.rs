use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("Stop {0:?} is already in the catalogue")]
    DuplicateStop(String),

    #[error("Bus {0:?} is already in the catalogue")]
    DuplicateBus(String),

    #[error("No such Stop {0:?} in the catalogue")]
    UnknownStop(String),

    #[error("No road distance between Stop {from:?} and Stop {to:?} in either direction")]
    MissingDistance { from: String, to: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("The color palette is empty but there are routes to draw")]
    EmptyPalette,

    #[error("Invalid canvas: width {width}, height {height}, padding {padding}")]
    InvalidCanvas { width: f64, height: f64, padding: f64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Map requested but no render settings were supplied")]
    MissingRenderSettings,

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
