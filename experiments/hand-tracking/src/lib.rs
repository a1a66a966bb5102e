//! Real-time hand movement tracking: browser webcam frames in, annotated frames out.

pub mod annotator;
pub mod config;
pub mod draw;
pub mod handler;

pub use annotator::{AnnotateError, FrameAnnotator};
pub use config::{Config, ConfigError};
pub use draw::{CONNECTION_STYLE, DrawingSpec, LANDMARK_STYLE, draw_landmarks};
pub use handler::FrameHandler;

const VIEWER_PAGE: &str = include_str!("../static/index.html");

/// The viewer page, pointed at the frame stream on `ws_port`.
pub fn viewer_page(ws_port: u16) -> String {
    VIEWER_PAGE.replace("{{WS_PORT}}", &ws_port.to_string())
}
