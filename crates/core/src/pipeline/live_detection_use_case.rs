use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_surface::DisplaySurface;
use crate::display::domain::grayscale_converter::GrayscaleConverter;
use crate::display::domain::key_command::key_bindings_help;
use crate::display::domain::mode_state_machine::{InputOutcome, ModeStateMachine};
use crate::display::domain::overlay::{face_overlays, timing_overlay};
use crate::pipeline::camera_scanner::open_first_camera;
use crate::pipeline::frame_timer::FrameTimer;
use crate::pipeline::live_detection_error::LiveDetectionError;
use crate::pipeline::session_logger::SessionLogger;
use crate::shared::constants::KEY_POLL_MS;
use crate::video::domain::frame_source::{CameraOpener, FrameSource};

/// Why a session ended without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// The quit key was pressed.
    UserQuit,
    /// The source produced a blank frame.
    EndOfStream,
}

/// Live camera pipeline: read → transform → detect → annotate → present → poll key.
///
/// Single-threaded; every stage blocks. Camera-open, conversion and
/// detector failures are errors, a blank frame ends the session cleanly.
pub struct LiveDetectionUseCase {
    detector: Box<dyn FaceDetector>,
    converter: Box<dyn GrayscaleConverter>,
    surface: Box<dyn DisplaySurface>,
    modes: ModeStateMachine,
    logger: Box<dyn SessionLogger>,
    key_poll_ms: i32,
}

impl LiveDetectionUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        converter: Box<dyn GrayscaleConverter>,
        surface: Box<dyn DisplaySurface>,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            detector,
            converter,
            surface,
            modes: ModeStateMachine::default(),
            logger,
            key_poll_ms: KEY_POLL_MS,
        }
    }

    pub fn with_key_poll_ms(mut self, key_poll_ms: i32) -> Self {
        self.key_poll_ms = key_poll_ms;
        self
    }

    pub fn modes(&self) -> &ModeStateMachine {
        &self.modes
    }

    /// Opens the first working camera among `0..camera_indices` and runs
    /// the loop on it. Nothing is presented if no camera opens.
    pub fn execute(
        &mut self,
        opener: &mut dyn CameraOpener,
        camera_indices: u32,
    ) -> Result<LoopExit, LiveDetectionError> {
        let (_, source) = open_first_camera(opener, camera_indices)?;
        self.run(source)
    }

    /// Runs the loop on an already opened source until quit, a blank
    /// frame, or an error.
    pub fn run(&mut self, mut source: Box<dyn FrameSource>) -> Result<LoopExit, LiveDetectionError> {
        self.logger.info(&format!(
            "Start real-time face detection. Keys:\n{}",
            key_bindings_help()
        ));

        let mut timer = FrameTimer::new();
        let result = loop {
            match self.step(source.as_mut(), &mut timer) {
                Ok(None) => continue,
                Ok(Some(exit)) => break Ok(exit),
                Err(e) => break Err(e),
            }
        };

        self.logger.summary();
        result
    }

    fn step(
        &mut self,
        source: &mut dyn FrameSource,
        timer: &mut FrameTimer,
    ) -> Result<Option<LoopExit>, LiveDetectionError> {
        let mut frame = match source.read_frame() {
            Ok(Some(frame)) if !frame.is_empty() => frame,
            Ok(_) => {
                log::warn!("Blank frame grabbed, stopping");
                return Ok(Some(LoopExit::EndOfStream));
            }
            Err(e) => {
                log::warn!("Frame grab failed, stopping: {e}");
                return Ok(Some(LoopExit::EndOfStream));
            }
        };

        let t0 = Instant::now();
        self.modes
            .apply_transform(self.converter.as_ref(), &mut frame)
            .map_err(LiveDetectionError::Conversion)?;
        let t1 = Instant::now();
        let regions = self
            .detector
            .detect(&frame)
            .map_err(LiveDetectionError::Detection)?;
        let t2 = Instant::now();

        let timing = timer.tick();
        let mut overlays = face_overlays(&regions);
        overlays.push(timing_overlay(timing.elapsed_ms, timing.fps as u32));

        self.surface
            .present(&frame, &overlays)
            .map_err(LiveDetectionError::Display)?;
        let t3 = Instant::now();

        self.logger.timing("transform", ms_between(t0, t1));
        self.logger.timing("detect", ms_between(t1, t2));
        self.logger.timing("present", ms_between(t2, t3));
        self.logger.metric("faces", regions.len() as f64);
        self.logger.frame(frame.index());

        let key = self
            .surface
            .poll_key(self.key_poll_ms)
            .map_err(LiveDetectionError::Display)?;
        match self.modes.handle_input(key) {
            InputOutcome::Quit => Ok(Some(LoopExit::UserQuit)),
            InputOutcome::Continue => Ok(None),
        }
    }
}

fn ms_between(start: Instant, end: Instant) -> f64 {
    end.duration_since(start).as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::domain::overlay::Overlay;
    use crate::pipeline::session_logger::NullSessionLogger;
    use crate::shared::frame::Frame;
    use crate::shared::region::Region;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        frames: VecDeque<Result<Option<Frame>, String>>,
    }

    impl StubSource {
        fn new(frames: Vec<Frame>) -> Self {
            Self {
                frames: frames.into_iter().map(|f| Ok(Some(f))).collect(),
            }
        }

        fn with_tail(mut self, tail: Result<Option<Frame>, String>) -> Self {
            self.frames.push_back(tail);
            self
        }
    }

    impl FrameSource for StubSource {
        fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            match self.frames.pop_front() {
                Some(Ok(frame)) => Ok(frame),
                Some(Err(e)) => Err(e.into()),
                None => Ok(None),
            }
        }
    }

    type SeenFrames = Arc<Mutex<Vec<Frame>>>;

    struct StubDetector {
        regions: Vec<Region>,
        fail_on_call: Option<usize>,
        calls: usize,
        seen: SeenFrames,
    }

    impl StubDetector {
        fn returning(regions: Vec<Region>) -> Self {
            Self {
                regions,
                fail_on_call: None,
                calls: 0,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::returning(vec![])
            }
        }
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            let call = self.calls;
            self.calls += 1;
            self.seen.lock().unwrap().push(frame.clone());
            if self.fail_on_call == Some(call) {
                return Err("cascade exploded".into());
            }
            Ok(self.regions.clone())
        }
    }

    #[derive(Default)]
    struct SurfaceRecord {
        presented: Vec<(Frame, Vec<Overlay>)>,
        polls: Vec<i32>,
    }

    struct StubSurface {
        keys: VecDeque<i32>,
        record: Arc<Mutex<SurfaceRecord>>,
    }

    impl StubSurface {
        fn with_keys(keys: &[i32]) -> Self {
            Self {
                keys: keys.iter().copied().collect(),
                record: Arc::new(Mutex::new(SurfaceRecord::default())),
            }
        }
    }

    impl DisplaySurface for StubSurface {
        fn present(
            &mut self,
            frame: &Frame,
            overlays: &[Overlay],
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.record
                .lock()
                .unwrap()
                .presented
                .push((frame.clone(), overlays.to_vec()));
            Ok(())
        }

        fn poll_key(&mut self, timeout_ms: i32) -> Result<i32, Box<dyn std::error::Error>> {
            self.record.lock().unwrap().polls.push(timeout_ms);
            Ok(self.keys.pop_front().unwrap_or(-1))
        }
    }

    /// Keeps the green channel; fails instead when `fail` is set.
    struct StubConverter {
        fail: bool,
    }

    impl GrayscaleConverter for StubConverter {
        fn to_grayscale(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail {
                return Err("no colour backend".into());
            }
            let gray = frame.data().iter().skip(1).step_by(3).copied().collect();
            *frame = Frame::gray(gray, frame.width(), frame.height(), frame.index());
            Ok(())
        }
    }

    // --- Helpers ---

    fn bgr_frames(count: usize) -> Vec<Frame> {
        (0..count)
            .map(|i| Frame::new(vec![(i * 10) as u8; 4 * 4 * 3], 4, 4, 3, i))
            .collect()
    }

    fn use_case(detector: StubDetector, surface: StubSurface) -> LiveDetectionUseCase {
        use_case_with(detector, StubConverter { fail: false }, surface)
    }

    fn use_case_with(
        detector: StubDetector,
        converter: StubConverter,
        surface: StubSurface,
    ) -> LiveDetectionUseCase {
        LiveDetectionUseCase::new(
            Box::new(detector),
            Box::new(converter),
            Box::new(surface),
            Box::new(NullSessionLogger),
        )
    }

    fn face_count(overlays: &[Overlay]) -> usize {
        overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Rectangle { .. }))
            .count()
    }

    // --- Tests ---

    #[test]
    fn test_blank_frame_ends_session_cleanly() {
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface);

        let exit = uc.run(Box::new(StubSource::new(bgr_frames(3)))).unwrap();

        assert_eq!(exit, LoopExit::EndOfStream);
        assert_eq!(record.lock().unwrap().presented.len(), 3);
    }

    #[test]
    fn test_zero_area_frame_counts_as_blank() {
        let source = StubSource::new(bgr_frames(1))
            .with_tail(Ok(Some(Frame::new(Vec::new(), 0, 0, 3, 1))));
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface);

        assert_eq!(uc.run(Box::new(source)).unwrap(), LoopExit::EndOfStream);
        assert_eq!(record.lock().unwrap().presented.len(), 1);
    }

    #[test]
    fn test_read_error_ends_session_cleanly() {
        let source = StubSource::new(bgr_frames(2)).with_tail(Err("unplugged".to_string()));
        let mut uc = use_case(StubDetector::returning(vec![]), StubSurface::with_keys(&[]));
        assert_eq!(uc.run(Box::new(source)).unwrap(), LoopExit::EndOfStream);
    }

    #[test]
    fn test_quit_key_stops_immediately() {
        let surface = StubSurface::with_keys(&[-1, 'q' as i32]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface);

        let exit = uc.run(Box::new(StubSource::new(bgr_frames(10)))).unwrap();

        assert_eq!(exit, LoopExit::UserQuit);
        let record = record.lock().unwrap();
        assert_eq!(record.presented.len(), 2);
        assert_eq!(record.polls, vec![KEY_POLL_MS, KEY_POLL_MS]);
    }

    #[test]
    fn test_zero_faces_draws_only_timing() {
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface);

        uc.run(Box::new(StubSource::new(bgr_frames(2)))).unwrap();

        let record = record.lock().unwrap();
        for (_, overlays) in &record.presented {
            assert_eq!(overlays.len(), 1);
            assert!(matches!(overlays[0], Overlay::Text { .. }));
        }
    }

    #[test]
    fn test_faces_drawn_before_timing_text() {
        let faces = vec![Region::new(0, 0, 30, 30), Region::new(40, 40, 50, 50)];
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(faces), surface);

        uc.run(Box::new(StubSource::new(bgr_frames(1)))).unwrap();

        let record = record.lock().unwrap();
        let overlays = &record.presented[0].1;
        assert_eq!(overlays.len(), 5);
        assert_eq!(face_count(overlays), 2);
        assert!(matches!(overlays[0], Overlay::Ellipse { .. }));
        assert!(matches!(overlays[4], Overlay::Text { .. }));
    }

    #[test]
    fn test_detector_error_is_terminal() {
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::failing_on(1), surface);

        let err = uc
            .run(Box::new(StubSource::new(bgr_frames(5))))
            .err()
            .unwrap();

        assert!(matches!(err, LiveDetectionError::Detection(_)));
        assert!(err.to_string().contains("cascade exploded"));
        // The failing frame is never shown.
        assert_eq!(record.lock().unwrap().presented.len(), 1);
    }

    #[test]
    fn test_grayscale_key_applies_from_next_frame() {
        let detector = StubDetector::returning(vec![]);
        let seen = detector.seen.clone();
        let surface = StubSurface::with_keys(&['g' as i32]);
        let record = surface.record.clone();
        let mut uc = use_case(detector, surface);

        uc.run(Box::new(StubSource::new(bgr_frames(2)))).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].channels(), 3);
        assert_eq!(seen[1].channels(), 1);
        assert_eq!(record.lock().unwrap().presented[1].0.channels(), 1);
        assert!(uc.modes().mode().grayscale());
    }

    #[test]
    fn test_conversion_error_is_terminal() {
        let surface = StubSurface::with_keys(&['g' as i32]);
        let record = surface.record.clone();
        let mut uc = use_case_with(
            StubDetector::returning(vec![]),
            StubConverter { fail: true },
            surface,
        );

        let err = uc
            .run(Box::new(StubSource::new(bgr_frames(3))))
            .err()
            .unwrap();

        assert!(matches!(err, LiveDetectionError::Conversion(_)));
        assert!(err.to_string().contains("no colour backend"));
        // Only the colour frame before the grayscale key was shown.
        assert_eq!(record.lock().unwrap().presented.len(), 1);
    }

    #[test]
    fn test_motion_difference_is_detected_and_presented() {
        let frames = vec![
            Frame::gray(vec![100; 4], 2, 2, 0),
            Frame::gray(vec![100; 4], 2, 2, 1),
            Frame::gray(vec![100; 4], 2, 2, 2),
            Frame::gray(vec![130; 4], 2, 2, 3),
        ];
        let detector = StubDetector::returning(vec![]);
        let seen = detector.seen.clone();
        let surface = StubSurface::with_keys(&['g' as i32, 'm' as i32]);
        let mut uc = use_case(detector, surface);

        uc.run(Box::new(StubSource::new(frames))).unwrap();

        let seen = seen.lock().unwrap();
        // Frame 2 is the first motion frame: stored, not diffed.
        assert_eq!(seen[2].data(), &[100; 4]);
        assert_eq!(seen[3].data(), &[30; 4]);
    }

    #[test]
    fn test_no_camera_means_nothing_presented() {
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface);
        let mut opener = |index: u32| -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
            Err(format!("camera {index} missing").into())
        };

        let err = uc.execute(&mut opener, 5).err().unwrap();

        assert!(matches!(err, LiveDetectionError::CameraUnavailable { tried: 5 }));
        let record = record.lock().unwrap();
        assert!(record.presented.is_empty());
        assert!(record.polls.is_empty());
    }

    #[test]
    fn test_execute_runs_on_first_camera_that_opens() {
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface);
        let mut opener = |index: u32| -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
            if index == 1 {
                Ok(Box::new(StubSource::new(bgr_frames(2))))
            } else {
                Err("busy".into())
            }
        };

        assert_eq!(uc.execute(&mut opener, 5).unwrap(), LoopExit::EndOfStream);
        assert_eq!(record.lock().unwrap().presented.len(), 2);
    }

    #[test]
    fn test_custom_key_poll() {
        let surface = StubSurface::with_keys(&[]);
        let record = surface.record.clone();
        let mut uc = use_case(StubDetector::returning(vec![]), surface).with_key_poll_ms(30);

        uc.run(Box::new(StubSource::new(bgr_frames(1)))).unwrap();

        assert_eq!(record.lock().unwrap().polls, vec![30]);
    }
}
