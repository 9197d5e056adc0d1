//! Cube controller - Drives an animator through the start/update/stop loop
//! and feeds every frame to a serializer.

use std::fmt;
use std::path::PathBuf;

use super::{ArtifactWriter, FrameSerializer};
use crate::animator::Animator;
use crate::cube::{ColorGrid, Dimensions};
use crate::error::{GeneratorError, Result};
use crate::schema::{ConfigError, GeneratorConfig};

/// Run parameters for a controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Cube size.
    pub dimensions: Dimensions,
    /// Artifact file stem.
    pub name: String,
    /// Stop after this many recorded frames even if the animator has not
    /// (None = no cap).
    pub max_frames: Option<u64>,
}

impl ControllerConfig {
    pub fn new(dimensions: Dimensions, name: impl Into<String>) -> Self {
        Self {
            dimensions,
            name: name.into(),
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.dimensions.validate()?;
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.max_frames == Some(0) {
            return Err(ConfigError::InvalidFrameCap);
        }
        Ok(())
    }
}

impl From<&GeneratorConfig> for ControllerConfig {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            dimensions: config.dimensions(),
            name: config.name.clone(),
            max_frames: config.max_frames,
        }
    }
}

/// Lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed and set up; no frame yet.
    Created,
    /// First frame produced, not yet recorded.
    Started,
    /// At least one frame recorded and the animator wants more.
    Running,
    /// Stop condition (or frame cap) reached.
    Stopped,
    /// Output persisted.
    Finished,
    /// A fatal error aborted the run; nothing further is recorded or persisted.
    Failed,
}

impl ControllerState {
    pub fn as_str(self) -> &'static str {
        match self {
            ControllerState::Created => "created",
            ControllerState::Started => "started",
            ControllerState::Running => "running",
            ControllerState::Stopped => "stopped",
            ControllerState::Finished => "finished",
            ControllerState::Failed => "failed",
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Frames recorded.
    pub frame_count: u64,
    /// True if the frame cap ended the run instead of the animator.
    pub capped: bool,
    /// Every file written, in write order.
    pub artifacts: Vec<PathBuf>,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames, {} artifact(s){}",
            self.frame_count,
            self.artifacts.len(),
            if self.capped { " (frame cap reached)" } else { "" }
        )
    }
}

/// Owns the cube state and runs one animation from start to persistence.
///
/// Usage:
/// ```ignore
/// let mut controller = CubeController::new(config, animator, serializer)?;
/// let mut writer = FileWriter::new("out");
/// controller.run(&mut writer)?;
/// let stats = controller.finish(&mut writer)?;
/// ```
///
/// Each loop iteration records the current frame, asks the animator whether
/// to stop (passing the index of the frame just recorded), and otherwise
/// updates the grid for the next frame.
pub struct CubeController {
    config: ControllerConfig,
    grid: ColorGrid,
    animator: Box<dyn Animator>,
    serializer: Box<dyn FrameSerializer>,
    state: ControllerState,
    /// Index of the frame currently held in `grid`.
    frame: u64,
    capped: bool,
    artifacts: Vec<PathBuf>,
}

impl CubeController {
    /// Create a controller and run the animator's one-time setup.
    pub fn new(
        config: ControllerConfig,
        mut animator: Box<dyn Animator>,
        serializer: Box<dyn FrameSerializer>,
    ) -> Result<Self> {
        config.validate()?;
        let grid = ColorGrid::new(config.dimensions)?;
        animator.setup(config.dimensions)?;

        Ok(Self {
            config,
            grid,
            animator,
            serializer,
            state: ControllerState::Created,
            frame: 0,
            capped: false,
            artifacts: Vec::new(),
        })
    }

    /// Build animator and serializer from a generator configuration.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            ControllerConfig::from(config),
            config.build_animator(),
            config.build_serializer(),
        )
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Current cube state.
    pub fn grid(&self) -> &ColorGrid {
        &self.grid
    }

    /// Index of the frame currently held in the grid.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn frames_recorded(&self) -> u64 {
        self.serializer.frames_handled()
    }

    /// Move to `Failed` if `result` is an error, then pass it through.
    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            log::error!("'{}' aborted at frame {}: {}", self.config.name, self.frame, e);
            self.state = ControllerState::Failed;
        }
        result
    }

    fn invalid(&self, operation: &'static str) -> GeneratorError {
        GeneratorError::InvalidState {
            operation,
            state: self.state.as_str(),
        }
    }

    /// Produce frame 0.
    pub fn start(&mut self) -> Result<()> {
        if self.state != ControllerState::Created {
            return Err(self.invalid("start"));
        }
        log::info!(
            "Starting '{}' with {} on a {} cube",
            self.config.name,
            self.animator.name(),
            self.config.dimensions
        );
        let started = self.animator.start(&mut self.grid);
        self.guard(started)?;
        self.frame = 0;
        self.state = ControllerState::Started;
        Ok(())
    }

    /// Record the current frame and advance.
    ///
    /// Returns `false` once the run has stopped. Any error leaves the
    /// controller `Failed`.
    pub fn step(&mut self, writer: &mut dyn ArtifactWriter) -> Result<bool> {
        match self.state {
            ControllerState::Started | ControllerState::Running => {}
            ControllerState::Stopped => return Ok(false),
            _ => return Err(self.invalid("step")),
        }

        let recorded = self.record(writer);
        self.guard(recorded)?;
        log::debug!("Generated frame {}", self.frame);

        if self.animator.stop(&self.grid, self.frame) {
            log::info!("{} stopped after frame {}", self.animator.name(), self.frame);
            self.state = ControllerState::Stopped;
            return Ok(false);
        }

        if let Some(cap) = self.config.max_frames {
            if self.frames_recorded() >= cap {
                log::warn!(
                    "Frame cap of {} reached before {} stopped",
                    cap,
                    self.animator.name()
                );
                self.capped = true;
                self.state = ControllerState::Stopped;
                return Ok(false);
            }
        }

        let updated = self.animator.update(&mut self.grid);
        self.guard(updated)?;
        self.frame += 1;
        self.state = ControllerState::Running;
        Ok(true)
    }

    fn record(&mut self, writer: &mut dyn ArtifactWriter) -> Result<()> {
        if let Some(encoded) = self.serializer.handle_frame(&self.grid)? {
            let path = writer.append_frame(&encoded.content, &self.config.name, encoded.index)?;
            self.artifacts.push(path);
        }
        Ok(())
    }

    /// Start (if needed) and step until the animator or the frame cap stops
    /// the run.
    ///
    /// With a streaming serializer each frame is written as it is produced;
    /// frames written before an error stay on disk.
    pub fn run(&mut self, writer: &mut dyn ArtifactWriter) -> Result<()> {
        if self.state == ControllerState::Created {
            self.start()?;
        }
        while self.step(writer)? {}
        Ok(())
    }

    /// Persist the serializer's aggregate output (if any).
    pub fn finish(&mut self, writer: &mut dyn ArtifactWriter) -> Result<RunStats> {
        if self.state != ControllerState::Stopped {
            return Err(self.invalid("finish"));
        }

        let persisted = self.persist(writer);
        self.guard(persisted)?;
        self.state = ControllerState::Finished;

        let stats = RunStats {
            frame_count: self.frames_recorded(),
            capped: self.capped,
            artifacts: self.artifacts.clone(),
        };
        log::info!("Finished '{}': {}", self.config.name, stats);
        Ok(stats)
    }

    fn persist(&mut self, writer: &mut dyn ArtifactWriter) -> Result<()> {
        if let Some(content) = self.serializer.finalize()? {
            let extension = self.serializer.extension().to_string();
            let path = writer.save(&content, &self.config.name, &extension)?;
            self.artifacts.push(path);
        }
        Ok(())
    }
}

/// Run a configured animation to completion and persist it.
///
/// Fails before generating anything if the configuration is invalid or the
/// animator's resources cannot be loaded.
pub fn generate_frames(
    config: &GeneratorConfig,
    writer: &mut dyn ArtifactWriter,
) -> Result<RunStats> {
    let mut controller = CubeController::from_config(config)?;
    controller.run(writer)?;
    controller.finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{
        BatchJsonSerializer, FileWriter, FrameDocument, MemoryWriter, PackedFrame,
        StreamingJsonSerializer,
    };
    use crate::animator::{PlaneSweep, StaticProjection};
    use crate::cube::Rgb;
    use crate::schema::{AnimationConfig, Axis, SerializerConfig};
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    /// Toggles between white and black forever.
    struct Blink {
        on: bool,
    }

    impl Animator for Blink {
        fn name(&self) -> &str {
            "blink"
        }

        fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
            self.on = !self.on;
            grid.fill(if self.on { Rgb::WHITE } else { Rgb::BLACK });
            Ok(())
        }
    }

    /// Writes an out-of-range color once `bad_frame` updates have happened.
    struct Overexposed {
        updates: u64,
        bad_frame: u64,
    }

    impl Animator for Overexposed {
        fn name(&self) -> &str {
            "overexposed"
        }

        fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
            let level = if self.updates >= self.bad_frame { 2.0 } else { 0.5 };
            grid.fill(Rgb::new(level, 0.0, 0.0));
            self.updates += 1;
            Ok(())
        }

        fn stop(&self, _grid: &ColorGrid, frame: u64) -> bool {
            frame >= 9
        }
    }

    /// Half-writes voxel (0, 0, 0) on every update and then fails on the
    /// second one.
    struct Flaky {
        updates: u64,
    }

    impl Animator for Flaky {
        fn name(&self) -> &str {
            "flaky"
        }

        fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
            self.updates += 1;
            grid.set(0, 0, 0, Rgb::new(self.updates as f32 * 0.1, 0.0, 0.0))?;
            if self.updates == 2 {
                grid.set(99, 0, 0, Rgb::WHITE)?;
            }
            Ok(())
        }

        fn stop(&self, _grid: &ColorGrid, frame: u64) -> bool {
            frame >= 3
        }
    }

    fn sweep_controller(width: usize) -> CubeController {
        CubeController::new(
            ControllerConfig::new(Dimensions::cube(width), "animation"),
            Box::new(PlaneSweep::new()),
            Box::new(BatchJsonSerializer::new(false)),
        )
        .unwrap()
    }

    fn batch_frames(writer: &MemoryWriter, file: &str) -> Vec<PackedFrame> {
        serde_json::from_str(writer.get(file).unwrap()).unwrap()
    }

    #[test]
    fn test_plane_sweep_end_to_end() {
        let mut controller = sweep_controller(4);
        let mut writer = MemoryWriter::new();

        controller.run(&mut writer).unwrap();
        assert_eq!(controller.state(), ControllerState::Stopped);
        assert_eq!(controller.frame(), 3);
        // Nothing persisted until finish
        assert!(writer.is_empty());

        let stats = controller.finish(&mut writer).unwrap();
        assert_eq!(stats.frame_count, 4);
        assert!(!stats.capped);
        assert_eq!(stats.artifacts, vec![PathBuf::from("animation.json")]);

        let frames = batch_frames(&writer, "animation.json");
        assert_eq!(frames.len(), 4);
        for (index, frame) in frames.iter().enumerate() {
            for (x, plane) in frame.iter().enumerate() {
                let expected = if x == index { 0xFFFFFF } else { 0 };
                assert!(
                    plane.iter().flatten().all(|&c| c == expected),
                    "frame {} plane {}",
                    index,
                    x
                );
            }
        }
    }

    #[test]
    fn test_batch_frames_are_distinct() {
        // Every stored frame must be its own snapshot, not the final grid
        let mut controller = sweep_controller(5);
        let mut writer = MemoryWriter::new();
        controller.run(&mut writer).unwrap();
        controller.finish(&mut writer).unwrap();

        let frames = batch_frames(&writer, "animation.json");
        assert_eq!(frames.len(), 5);
        for i in 0..frames.len() {
            for j in (i + 1)..frames.len() {
                assert_ne!(frames[i], frames[j], "frames {} and {} are equal", i, j);
            }
        }
    }

    #[test]
    fn test_manual_stepping() {
        let mut controller = sweep_controller(2);
        let mut writer = MemoryWriter::new();
        assert_eq!(controller.state(), ControllerState::Created);

        controller.start().unwrap();
        assert_eq!(controller.state(), ControllerState::Started);
        assert_eq!(controller.grid().get(0, 1, 1).unwrap(), Rgb::WHITE);

        assert!(controller.step(&mut writer).unwrap());
        assert_eq!(controller.state(), ControllerState::Running);
        assert_eq!(controller.grid().get(1, 0, 0).unwrap(), Rgb::WHITE);

        assert!(!controller.step(&mut writer).unwrap());
        assert_eq!(controller.state(), ControllerState::Stopped);
        assert_eq!(controller.frames_recorded(), 2);

        // Stepping a stopped run is a no-op
        assert!(!controller.step(&mut writer).unwrap());
        assert_eq!(controller.frames_recorded(), 2);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut controller = sweep_controller(2);
        let mut writer = MemoryWriter::new();

        assert!(matches!(
            controller.step(&mut writer),
            Err(GeneratorError::InvalidState { operation: "step", state: "created" })
        ));
        assert!(matches!(
            controller.finish(&mut writer),
            Err(GeneratorError::InvalidState { operation: "finish", .. })
        ));

        controller.start().unwrap();
        assert!(matches!(
            controller.start(),
            Err(GeneratorError::InvalidState { operation: "start", .. })
        ));

        controller.run(&mut writer).unwrap();
        controller.finish(&mut writer).unwrap();
        assert_eq!(controller.state(), ControllerState::Finished);
        assert!(controller.finish(&mut writer).is_err());
    }

    #[test]
    fn test_frame_cap_stops_endless_animator() {
        let mut controller = CubeController::new(
            ControllerConfig::new(Dimensions::cube(2), "blink").with_max_frames(5),
            Box::new(Blink { on: false }),
            Box::new(BatchJsonSerializer::new(false)),
        )
        .unwrap();
        let mut writer = MemoryWriter::new();

        controller.run(&mut writer).unwrap();
        let stats = controller.finish(&mut writer).unwrap();

        assert!(stats.capped);
        assert_eq!(stats.frame_count, 5);
        let frames = batch_frames(&writer, "blink.json");
        assert_eq!(frames.len(), 5);
        assert_ne!(frames[0], frames[1]);
    }

    #[test]
    fn test_streaming_writes_one_file_per_frame() {
        let dir = tempdir().unwrap();
        let mut writer = FileWriter::new(dir.path());
        let mut controller = CubeController::new(
            ControllerConfig::new(Dimensions::cube(3), "sweep"),
            Box::new(PlaneSweep::new()),
            Box::new(StreamingJsonSerializer::new()),
        )
        .unwrap();

        controller.run(&mut writer).unwrap();
        let stats = controller.finish(&mut writer).unwrap();

        assert_eq!(stats.frame_count, 3);
        assert_eq!(stats.artifacts.len(), 3);
        assert!(!dir.path().join("sweep.json").exists());

        for index in 0..3u64 {
            let path = dir.path().join(format!("sweep_frame_{}.json", index));
            let doc = FrameDocument::from_reader(fs::File::open(&path).unwrap()).unwrap();
            assert_eq!(doc.index(), Some(index));

            let grid = doc.to_grid().unwrap();
            assert_eq!(grid.get(index as usize, 0, 0).unwrap(), Rgb::WHITE);
            assert_eq!(grid.lit_count(), 9);
        }
    }

    #[test]
    fn test_streaming_failure_keeps_earlier_frames() {
        let dir = tempdir().unwrap();
        let mut writer = FileWriter::new(dir.path());
        let mut controller = CubeController::new(
            ControllerConfig::new(Dimensions::cube(2), "partial"),
            Box::new(Overexposed {
                updates: 0,
                bad_frame: 2,
            }),
            Box::new(StreamingJsonSerializer::new()),
        )
        .unwrap();

        let err = controller.run(&mut writer).unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedColorRange { .. }));

        assert!(dir.path().join("partial_frame_0.json").exists());
        assert!(dir.path().join("partial_frame_1.json").exists());
        assert!(!dir.path().join("partial_frame_2.json").exists());
    }

    #[test]
    fn test_batch_failure_persists_nothing() {
        let mut writer = MemoryWriter::new();
        let mut controller = CubeController::new(
            ControllerConfig::new(Dimensions::cube(2), "partial"),
            Box::new(Overexposed {
                updates: 0,
                bad_frame: 2,
            }),
            Box::new(BatchJsonSerializer::new(false)),
        )
        .unwrap();

        assert!(controller.run(&mut writer).is_err());
        assert_eq!(controller.state(), ControllerState::Failed);
        assert!(controller.finish(&mut writer).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn test_failed_run_cannot_resume_or_persist() {
        let mut writer = MemoryWriter::new();
        let mut controller = CubeController::new(
            ControllerConfig::new(Dimensions::cube(2), "flaky"),
            Box::new(Flaky { updates: 0 }),
            Box::new(BatchJsonSerializer::new(false)),
        )
        .unwrap();

        let err = controller.run(&mut writer).unwrap_err();
        assert!(matches!(err, GeneratorError::OutOfBounds { x: 99, .. }));
        assert_eq!(controller.state(), ControllerState::Failed);
        assert_eq!(controller.frames_recorded(), 1);

        assert!(matches!(
            controller.run(&mut writer),
            Err(GeneratorError::InvalidState { operation: "step", state: "failed" })
        ));
        assert!(matches!(
            controller.step(&mut writer),
            Err(GeneratorError::InvalidState { state: "failed", .. })
        ));
        assert!(matches!(
            controller.finish(&mut writer),
            Err(GeneratorError::InvalidState { operation: "finish", state: "failed" })
        ));
        assert_eq!(controller.frames_recorded(), 1);
        assert!(writer.is_empty());
    }

    #[test]
    fn test_write_failure_surfaces() {
        let dir = tempdir().unwrap();
        let mut writer = FileWriter::new(dir.path().join("missing"));
        let mut controller = sweep_controller(2);

        controller.run(&mut writer).unwrap();
        assert!(matches!(
            controller.finish(&mut writer),
            Err(GeneratorError::WriteFailure { .. })
        ));
        assert_eq!(controller.state(), ControllerState::Failed);
        assert!(controller.finish(&mut writer).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = CubeController::new(
            ControllerConfig::new(Dimensions::new(4, 0, 4), "animation"),
            Box::new(PlaneSweep::new()),
            Box::new(BatchJsonSerializer::new(false)),
        );
        assert!(matches!(
            result,
            Err(GeneratorError::Config(ConfigError::InvalidDimensions))
        ));
    }

    #[test]
    fn test_static_projection_scenario() {
        let dims = Dimensions::cube(8);
        let img = RgbaImage::from_fn(8, 8, |x, y| {
            if (x, y) == (0, 0) {
                Rgba([10, 20, 30, 0])
            } else {
                Rgba([0, 255, 0, 255])
            }
        });
        let mut controller = CubeController::new(
            ControllerConfig::new(dims, "logo"),
            Box::new(StaticProjection::with_image(img, Axis::Z)),
            Box::new(BatchJsonSerializer::new(false)),
        )
        .unwrap();
        let mut writer = MemoryWriter::new();

        controller.run(&mut writer).unwrap();
        let stats = controller.finish(&mut writer).unwrap();
        assert_eq!(stats.frame_count, 2);

        // Image pixel (0, 0) lands at the far end of the reversed list
        let frames = batch_frames(&writer, "logo.json");
        for frame in &frames {
            for z in 0..8 {
                assert_eq!(frame[7][7][z], 0);
                assert_eq!(frame[0][0][z], 0x00FF00);
            }
        }
    }

    #[test]
    fn test_missing_image_fails_before_generation() {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            width: 8,
            height: 8,
            depth: 8,
            output_dir: dir.path().to_path_buf(),
            animation: AnimationConfig::RotatingImage {
                image: dir.path().join("nope.png"),
            },
            ..Default::default()
        };
        let mut writer = FileWriter::new(dir.path());

        let err = generate_frames(&config, &mut writer).unwrap_err();
        assert!(matches!(err, GeneratorError::MissingResource { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_generate_frames_from_config() {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            width: 4,
            height: 2,
            depth: 3,
            name: "rgb".to_string(),
            output_dir: dir.path().to_path_buf(),
            animation: AnimationConfig::RgbSweep,
            serializer: SerializerConfig::Batch { pretty: true },
            ..Default::default()
        };
        let mut writer = FileWriter::new(&config.output_dir);

        let stats = generate_frames(&config, &mut writer).unwrap();
        assert_eq!(stats.frame_count, 4);
        assert_eq!(stats.artifacts, vec![dir.path().join("rgb.json")]);

        let json = fs::read_to_string(dir.path().join("rgb.json")).unwrap();
        let frames: Vec<PackedFrame> = serde_json::from_str(&json).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].len(), 4);
        assert_eq!(frames[0][0].len(), 2);
        assert_eq!(frames[0][0][0].len(), 3);
        // Leader at x = 1 on the second frame, trail at x = 0
        assert_eq!(frames[1][1][0][0], 0xFF0000);
        assert_eq!(frames[1][0][0][0], 0x7FFF00);
    }
}
