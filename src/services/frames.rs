use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::rendering::read_png;
use crate::services::renderer::{display_name, export, ExportReport, RenderService};

/// Re-runs the whole pipeline on every frame of a sequence.
///
/// Frames are independent: nothing computed for one frame is visible to the
/// next. With a seed, frame `i` uses `seed + i` so glitch noise still changes
/// from frame to frame while the whole sequence stays reproducible.
pub struct FrameRunner<'a> {
    service: &'a RenderService,
}

impl<'a> FrameRunner<'a> {
    pub fn new(service: &'a RenderService) -> Self {
        Self { service }
    }

    /// PNG files directly inside `dir`, sorted by file name.
    pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        let mut frames: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .collect();
        frames.sort();
        Ok(frames)
    }

    /// Dither every frame of `input_dir` into `output_dir`, keeping file names.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<Vec<ExportReport>, RenderError> {
        let frames = Self::list_frames(input_dir)?;
        if frames.is_empty() {
            return Err(RenderError::NoFrames(input_dir.to_path_buf()));
        }
        std::fs::create_dir_all(output_dir)?;

        tracing::info!(
            count = frames.len(),
            input = %input_dir.display(),
            output = %output_dir.display(),
            "Processing frame sequence"
        );

        let base = self.service.settings().ditherer();
        let seed = self.service.settings().seed;

        let mut reports = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let ditherer = match seed {
                Some(s) => base.clone().seed(s.wrapping_add(index as u64)),
                None => base.clone(),
            };
            let name = display_name(frame);
            let source = read_png(frame)?;
            let image = self.service.render_with(&ditherer, &name, &source);
            reports.push(export(image, &output_dir.join(&name))?);
        }

        tracing::info!(count = reports.len(), "Frame sequence finished");
        Ok(reports)
    }
}
