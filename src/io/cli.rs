//! Command-line interface for forgetting one image or a directory of images

use crate::algorithm::forgetter::{ForgetSummary, Forgetter, ForgetterConfig};
use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_BLOCK_SIZE, DEFAULT_ORDER, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
    MAX_GIF_FRAMES, MAX_RESTART_ATTEMPTS, OUTPUT_PREFIX,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::image::{load_rgba, save_grid};
use crate::io::progress::ProgressReporter;
use crate::io::record::RunRecord;
use crate::io::visualization::AnimationCapture;
use crate::spatial::Arrangement;
use clap::Parser;
use std::path::{Path, PathBuf};

/// File extensions picked up when the target is a directory
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Parser, Debug)]
#[command(name = "blockforget")]
#[command(
    author,
    version,
    about = "Regenerate images block by block from a Markov chain over their own blocks"
)]
/// Command-line arguments for the forgetting tool
pub struct Cli {
    /// Input image file or directory of images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Markov chain order (number of preceding blocks used as context)
    #[arg(short, long, default_value_t = DEFAULT_ORDER)]
    pub order: usize,

    /// Edge length of a square block in pixels
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Order in which blocks are visited
    #[arg(short, long, value_enum, default_value_t = Arrangement::Row)]
    pub arrangement: Arrangement,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output file (single image) or directory (directory target)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write an animated GIF of the regeneration
    #[arg(short, long)]
    pub gif: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Forgetter configuration described by these arguments
    pub const fn forgetter_config(&self) -> ForgetterConfig {
        ForgetterConfig {
            order: self.order,
            block_size: self.block_size,
            arrangement: self.arrangement,
            seed: self.seed,
            pad: true,
            max_restarts: MAX_RESTART_ATTEMPTS,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates loading, forgetting and saving for every target image
pub struct FileProcessor {
    cli: Cli,
    progress: ProgressReporter,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressReporter::new()
        } else {
            ProgressReporter::hidden()
        };
        Self { cli, progress }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&self) -> Result<()> {
        let files = self.collect_files()?;
        for file in &files {
            let output = self.output_path(file);
            self.process_file(file, &output)?;
        }
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            return Ok(vec![target.clone()]);
        }
        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or a directory",
            ));
        }

        let mut files = Vec::new();
        let entries =
            std::fs::read_dir(target).map_err(|e| file_system_error(target, "read directory", e))?;
        for entry in entries {
            let path = entry
                .map_err(|e| file_system_error(target, "read directory entry", e))?
                .path();
            if is_image_path(&path) && !is_forgotten(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Where the result for `input_path` is written
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        let file_name = input_path.file_name().unwrap_or_default();
        let output_name = format!("{OUTPUT_PREFIX}{}", file_name.to_string_lossy());

        match &self.cli.output {
            Some(output) if self.cli.target.is_dir() => output.join(output_name),
            Some(output) => output.clone(),
            None => input_path.parent().map_or_else(
                || PathBuf::from(&output_name),
                |parent| parent.join(&output_name),
            ),
        }
    }

    // Allow print for user feedback on early stops and run summaries
    #[allow(clippy::print_stderr)]
    fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let source = load_rgba(input_path)?;
        let mut forgetter = Forgetter::new(&source, self.cli.forgetter_config())?;
        let total = forgetter.traversal().len();

        let mut animation = self
            .cli
            .gif
            .then(|| AnimationCapture::new(total, MAX_GIF_FRAMES));
        if let Some(capture) = animation.as_mut() {
            capture.capture_initial(forgetter.image())?;
        }

        let label = input_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.progress.start_pass(&label, total);
        let progress = &self.progress;
        let summary = forgetter.forget_with(|_, image| {
            progress.advance();
            animation
                .as_mut()
                .map_or(Ok(()), |capture| capture.record_write(image))
        })?;
        self.progress.finish_pass(&summary_message(&summary));

        save_grid(forgetter.image(), output_path)?;

        let record = RunRecord {
            block_size: self.cli.block_size,
            arrangement: self.cli.arrangement,
            order: self.cli.order,
            seed: self.cli.seed,
            stats: summary.stats,
            exhausted: summary.exhausted,
        };
        record.write_beside(output_path)?;

        if let Some(mut capture) = animation {
            capture.finish(forgetter.image())?;
            capture.export_gif(&animation_path(output_path), GIF_FRAME_DELAY_MS)?;
        }

        if summary.exhausted && !self.cli.quiet {
            eprintln!(
                "{}: generation exhausted, stopped after {}/{} blocks",
                input_path.display(),
                summary.written,
                summary.total
            );
        }

        Ok(())
    }
}

fn summary_message(summary: &ForgetSummary) -> String {
    let status = if summary.exhausted {
        "stopped early"
    } else {
        "done"
    };
    format!(
        "{status} ({} fallbacks, {} restarts)",
        summary.stats.fallbacks, summary.stats.restarts
    )
}

/// Path of the animation that accompanies `output_path`
pub fn animation_path(output_path: &Path) -> PathBuf {
    let stem = output_path.file_stem().unwrap_or_default();
    let name = format!("{}{ANIMATION_SUFFIX}.gif", stem.to_string_lossy());
    output_path.with_file_name(name)
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_forgotten(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(OUTPUT_PREFIX))
}
