use thiserror::Error;

/// Rejected configuration, caught before any bubble is created.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("bubble count must not be negative (got {0})")]
    NegativeCount(i64),

    #[error("at most {max} bubbles are supported (got {count})")]
    TooManyBubbles { count: usize, max: usize },

    #[error("minimum diameter must be a positive number (got {0})")]
    InvalidMinDiameter(f32),

    #[error("maximum diameter must be a finite number (got {0})")]
    InvalidMaxDiameter(f32),

    #[error("maximum diameter {max} is smaller than minimum diameter {min}")]
    DiameterOrder { min: f32, max: f32 },

    #[error("invalid size `{0}`, expected WIDTHxHEIGHT (e.g. 640x360)")]
    MalformedSize(String),

    #[error("size {width}x{height} is out of range (1..={max} per side)")]
    SizeOutOfRange { width: u32, height: u32, max: u32 },

    #[error("scale must be between 1 and {max} (got {scale})")]
    ScaleOutOfRange { scale: u8, max: u8 },

    #[error("refresh rate must be a positive number (got {0})")]
    InvalidFps(f32),

    #[error("{flag} is not available, rebuild with `--features {feature}`")]
    FeatureDisabled {
        flag: &'static str,
        feature: &'static str,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum SurfaceError {
    #[error("no 2D drawing context for a {width}x{height} surface")]
    ContextUnavailable { width: usize, height: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("failed to run the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to set up the window buffer: {0}")]
    Buffer(#[from] softbuffer::SoftBufferError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "minifb")]
    #[error("minifb window error: {0}")]
    Minifb(#[from] minifb::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
