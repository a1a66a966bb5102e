use {
    base::Level,
    inference::HandLandmarkerOptions,
    std::{env, fmt, path::PathBuf, str::FromStr},
};

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:7860";
pub const DEFAULT_WS_ADDR: &str = "127.0.0.1:7861";
pub const DEFAULT_PALM_MODEL: &str = "data/mediapipe/palm_detection_mediapipe_2023feb.onnx";
pub const DEFAULT_LANDMARK_MODEL: &str = "data/mediapipe/handpose_estimation_mediapipe_2023feb.onnx";
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
    OutOfRange { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "invalid value for {key}: {value:?}"),
            ConfigError::OutOfRange { key, value } => {
                write!(f, "value for {key} out of range: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Server settings, read from `HAND_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_addr: String,
    pub ws_addr: String,
    pub palm_model: PathBuf,
    pub landmark_model: PathBuf,
    pub jpeg_quality: u8,
    pub landmarker: HandLandmarkerOptions,
    /// Log to daily files in this directory instead of stdout.
    pub log_dir: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            ws_addr: DEFAULT_WS_ADDR.to_string(),
            palm_model: PathBuf::from(DEFAULT_PALM_MODEL),
            landmark_model: PathBuf::from(DEFAULT_LANDMARK_MODEL),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            landmarker: HandLandmarkerOptions::default(),
            log_dir: None,
            log_level: Level::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for missing or empty keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(addr) = get("HAND_HTTP_ADDR") {
            config.http_addr = addr;
        }
        if let Some(addr) = get("HAND_WS_ADDR") {
            config.ws_addr = addr;
        }
        if let Some(path) = get("HAND_PALM_MODEL") {
            config.palm_model = PathBuf::from(path);
        }
        if let Some(path) = get("HAND_LANDMARK_MODEL") {
            config.landmark_model = PathBuf::from(path);
        }
        if let Some(dir) = get("HAND_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = get("HAND_LOG_LEVEL") {
            config.log_level = Level::parse(value.trim()).ok_or(ConfigError::Invalid {
                key: "HAND_LOG_LEVEL",
                value,
            })?;
        }

        if let Some(value) = get("HAND_JPEG_QUALITY") {
            let quality: u8 = parse("HAND_JPEG_QUALITY", &value)?;
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::OutOfRange {
                    key: "HAND_JPEG_QUALITY",
                    value,
                });
            }
            config.jpeg_quality = quality;
        }
        if let Some(value) = get("HAND_MAX_HANDS") {
            let hands: usize = parse("HAND_MAX_HANDS", &value)?;
            if hands == 0 {
                return Err(ConfigError::OutOfRange {
                    key: "HAND_MAX_HANDS",
                    value,
                });
            }
            config.landmarker.max_num_hands = hands;
        }
        if let Some(value) = get("HAND_MIN_DETECTION_CONFIDENCE") {
            config.landmarker.min_detection_confidence =
                parse_confidence("HAND_MIN_DETECTION_CONFIDENCE", value)?;
        }
        if let Some(value) = get("HAND_MIN_TRACKING_CONFIDENCE") {
            config.landmarker.min_tracking_confidence =
                parse_confidence("HAND_MIN_TRACKING_CONFIDENCE", value)?;
        }
        if let Some(value) = get("HAND_STATIC_IMAGE_MODE") {
            config.landmarker.static_image_mode = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HAND_STATIC_IMAGE_MODE",
                        value,
                    });
                }
            };
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_confidence(key: &'static str, value: String) -> Result<f32, ConfigError> {
    let confidence: f32 = parse(key, &value)?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(ConfigError::OutOfRange { key, value });
    }
    Ok(confidence)
}
