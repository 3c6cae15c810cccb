pub mod frames;
pub mod renderer;

pub use frames::FrameRunner;
pub use renderer::{ExportReport, RenderService, RenderedImage, DEFAULT_OUTPUT_NAME};
