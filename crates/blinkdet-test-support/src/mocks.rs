//! Mock implementations of core port traits.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use blinkdet_core::domain::{AnalysisResult, EyeEstimate, FaceDetection};
use blinkdet_core::ports::{FaceDetector, PupilLocalizer, ResultOutput};
use image::DynamicImage;

/// Mock implementation of `FaceDetector` for testing.
///
/// Returns a fixed set of faces and counts calls.
pub struct MockFaceDetector {
    faces: Vec<FaceDetection>,
    fail: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockFaceDetector {
    /// Creates a detector that always reports `faces`.
    #[must_use]
    pub fn new(faces: Vec<FaceDetection>) -> Self {
        Self {
            faces,
            fail: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a detector that always errors.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    /// Returns the number of times `detect()` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaceDetector for MockFaceDetector {
    fn detect(&self, _image: &DynamicImage) -> anyhow::Result<Vec<FaceDetection>> {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        if self.fail {
            anyhow::bail!("mock detector failure");
        }
        Ok(self.faces.clone())
    }
}

/// How the mock localizer answers.
enum Answer {
    Passthrough,
    Queue(Mutex<VecDeque<EyeEstimate>>),
    Fail,
}

/// Mock implementation of `PupilLocalizer` for testing.
///
/// Records every seed it receives.
pub struct MockPupilLocalizer {
    answer: Answer,
    seeds: Arc<Mutex<Vec<EyeEstimate>>>,
}

impl MockPupilLocalizer {
    /// Returns each seed unchanged.
    #[must_use]
    pub fn passthrough() -> Self {
        Self::with_answer(Answer::Passthrough)
    }

    /// Returns `pupils` in call order, then "not found".
    #[must_use]
    pub fn queued(pupils: Vec<EyeEstimate>) -> Self {
        Self::with_answer(Answer::Queue(Mutex::new(pupils.into())))
    }

    /// Always errors.
    #[must_use]
    pub fn failing() -> Self {
        Self::with_answer(Answer::Fail)
    }

    fn with_answer(answer: Answer) -> Self {
        Self {
            answer,
            seeds: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all seeds received so far.
    #[must_use]
    pub fn seeds(&self) -> Vec<EyeEstimate> {
        self.seeds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `localize()` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.seeds.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl PupilLocalizer for MockPupilLocalizer {
    fn localize(&self, seed: &EyeEstimate, _image: &DynamicImage) -> anyhow::Result<EyeEstimate> {
        self.seeds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*seed);

        match &self.answer {
            Answer::Passthrough => Ok(*seed),
            Answer::Queue(queue) => Ok(queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(EyeEstimate::not_found)),
            Answer::Fail => anyhow::bail!("mock localizer failure"),
        }
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures results for later assertions.
pub struct MockResultOutput {
    results: Arc<Mutex<Vec<AnalysisResult>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured results.
    #[must_use]
    pub fn results(&self) -> Vec<AnalysisResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
