use std::path::PathBuf;

use bitmap_dither::DitherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("No PNG frames found in {}", .0.display())]
    NoFrames(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitmap_dither::DitherMethod;

    #[test]
    fn test_render_error_png_decode() {
        let error = RenderError::PngDecode("Invalid signature".to_string());
        assert_eq!(error.to_string(), "PNG decode error: Invalid signature");
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 99999,
            height: 1,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 99999x1");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_render_error_no_frames() {
        let error = RenderError::NoFrames(PathBuf::from("frames"));
        assert_eq!(error.to_string(), "No PNG frames found in frames");
    }

    #[test]
    fn test_render_error_from_dither_error() {
        let dither_error: DitherError = "cubic".parse::<DitherMethod>().unwrap_err().into();
        let error: RenderError = dither_error.into();
        match error {
            RenderError::Dither(_) => {}
            _ => panic!("Expected Dither variant"),
        }
    }

    #[test]
    fn test_config_error_invalid_value() {
        let error = ConfigError::InvalidValue {
            key: "upscale",
            message: "expected 'source', 'none' or a positive factor".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'upscale': expected 'source', 'none' or a positive factor"
        );
    }

    #[test]
    fn test_config_error_read() {
        let error = ConfigError::Read {
            path: PathBuf::from("missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read config missing.yaml: not found"
        );
    }
}
