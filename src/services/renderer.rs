use std::path::{Path, PathBuf};

use bitmap_dither::{Ditherer, OutputMode, PixelBuffer};

use crate::error::RenderError;
use crate::models::RenderSettings;
use crate::rendering::{read_png, upscale_nearest, write_png};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "dithered.png";

/// A dithered raster enlarged to its export size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: usize,
    pub height: usize,
    /// Working resolution the dithering ran at
    pub working: (usize, usize),
    pub rgba: Vec<u8>,
}

/// Summary of one exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bytes: usize,
}

/// Runs the dithering pipeline with one settings snapshot and exports PNGs.
///
/// The snapshot is read once at construction. Every call starts from fresh
/// working buffers.
pub struct RenderService {
    settings: RenderSettings,
    ditherer: Ditherer,
}

impl RenderService {
    pub fn new(settings: RenderSettings) -> Self {
        let ditherer = settings.ditherer();
        Self { settings, ditherer }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Dither a decoded source and apply the upscale policy.
    pub fn render_buffer(&self, name: &str, source: &PixelBuffer) -> RenderedImage {
        self.render_with(&self.ditherer, name, source)
    }

    /// Dither with a specific pipeline instance, used by the frame runner to
    /// vary the glitch seed per frame.
    pub(crate) fn render_with(
        &self,
        ditherer: &Ditherer,
        name: &str,
        source: &PixelBuffer,
    ) -> RenderedImage {
        let source_dims = (source.width(), source.height());
        tracing::info!(
            name,
            width = source_dims.0,
            height = source_dims.1,
            "Image loaded"
        );

        let mode = self.settings.mode;
        if mode.is_dithered() {
            tracing::info!(
                method = %self.settings.method,
                mode = %mode,
                "Applying dithering"
            );
        }

        let dithered = ditherer.dither(source);
        let working = (dithered.width(), dithered.height());

        match mode {
            OutputMode::Gray => tracing::info!("Grayscale conversion complete (no dithering)"),
            _ => tracing::info!(
                working_width = working.0,
                working_height = working.1,
                "Dithering finished successfully"
            ),
        }

        let (width, height) = self.settings.upscale.target_dimensions(working, source_dims);
        let rgba = upscale_nearest(&dithered, width, height);
        tracing::debug!(width, height, upscale = %self.settings.upscale, "Upscaled for export");

        RenderedImage {
            width,
            height,
            working,
            rgba,
        }
    }

    /// Read `input`, dither it and write the PNG to `output`.
    pub fn render_file(&self, input: &Path, output: &Path) -> Result<ExportReport, RenderError> {
        let source = read_png(input)?;
        let name = display_name(input);
        let image = self.render_buffer(&name, &source);
        export(image, output)
    }
}

pub(crate) fn export(image: RenderedImage, output: &Path) -> Result<ExportReport, RenderError> {
    let bytes = write_png(output, image.width, image.height, &image.rgba)?;
    tracing::info!(path = %output.display(), bytes, "Dithered image exported");
    Ok(ExportReport {
        path: output.to_path_buf(),
        width: image.width,
        height: image.height,
        bytes,
    })
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
