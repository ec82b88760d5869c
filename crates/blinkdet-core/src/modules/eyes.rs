//! Face-level blink detection.
//!
//! Drives the single-eye classifier over every face a [`FaceDetector`]
//! reports: seeds both eyes from the face geometry, refines each seed with a
//! [`PupilLocalizer`] and classifies the eyes that were found.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::BlinkClassifier;
use crate::domain::{EyeReport, EyeSide, EyeStatus, FaceDetection, FaceResult, ImageInfo};
use crate::ports::{FaceDetector, PupilLocalizer};

/// Configuration for face-level blink detection.
#[derive(Debug, Clone, PartialEq)]
pub struct EyesConfig {
    /// Faces scoring below this are ignored.
    pub min_face_score: f32,

    /// Perturbation count handed to the pupil localizer.
    pub perturbs: u32,
}

impl Default for EyesConfig {
    fn default() -> Self {
        Self {
            min_face_score: 0.0,
            perturbs: 50,
        }
    }
}

impl EyesConfig {
    /// Sets the minimum face score.
    #[must_use]
    pub const fn with_min_face_score(mut self, score: f32) -> Self {
        self.min_face_score = score;
        self
    }

    /// Sets the localizer perturbation count.
    #[must_use]
    pub const fn with_perturbs(mut self, perturbs: u32) -> Self {
        self.perturbs = perturbs;
        self
    }
}

/// Blink detection over all faces in an image.
pub struct EyesModule {
    config: EyesConfig,
    classifier: BlinkClassifier,
    detector: Box<dyn FaceDetector>,
    localizer: Box<dyn PupilLocalizer>,
}

impl EyesModule {
    /// Creates a module from its collaborators.
    #[must_use]
    pub fn new(
        config: EyesConfig,
        classifier: BlinkClassifier,
        detector: Box<dyn FaceDetector>,
        localizer: Box<dyn PupilLocalizer>,
    ) -> Self {
        Self {
            config,
            classifier,
            detector,
            localizer,
        }
    }

    /// Returns the blink classifier in use.
    #[must_use]
    pub const fn classifier(&self) -> &BlinkClassifier {
        &self.classifier
    }

    /// Analyzes every face in `image`.
    ///
    /// A failure on one eye is reported in that eye's status and does not
    /// stop the others.
    ///
    /// # Errors
    ///
    /// Returns an error if face detection fails.
    pub fn analyze(&self, image: &ImageInfo) -> Result<Vec<FaceResult>> {
        let detections = self
            .detector
            .detect(&image.image)
            .context("Face detection failed")?;

        debug!("Found {} faces in {}", detections.len(), image.path);

        let mut results = Vec::new();
        for face in detections {
            if face.score < self.config.min_face_score {
                debug!("Skipping low-score face: {:.2}", face.score);
                continue;
            }

            let left = self.analyze_eye(image, &face, EyeSide::Left, results.len() * 2);
            let right = self.analyze_eye(image, &face, EyeSide::Right, results.len() * 2 + 1);
            let blinking = left.status.is_closed() || right.status.is_closed();

            debug!(
                "Face at ({}, {}): left={:?} right={:?} blinking={}",
                face.row, face.col, left.status, right.status, blinking
            );

            results.push(FaceResult {
                face,
                left,
                right,
                blinking,
            });
        }

        Ok(results)
    }

    fn analyze_eye(
        &self,
        image: &ImageInfo,
        face: &FaceDetection,
        side: EyeSide,
        index: usize,
    ) -> EyeReport {
        let seed = face.eye_seed(side, self.config.perturbs);

        let (pupil, status) = match self.localizer.localize(&seed, &image.image) {
            Ok(pupil) if !pupil.is_found() => {
                debug!("No {:?} pupil near ({}, {})", side, seed.row, seed.col);
                (pupil, EyeStatus::NotFound)
            }
            Ok(pupil) => {
                let status = match self.classifier.classify(&pupil, &image.image) {
                    Ok(verdict) => EyeStatus::from(&verdict),
                    Err(e) => {
                        warn!("Failed to classify {:?} eye: {}", side, e);
                        EyeStatus::from(&e)
                    }
                };
                (pupil, status)
            }
            Err(e) => {
                warn!("Failed to localize {:?} pupil: {:#}", side, e);
                (
                    seed,
                    EyeStatus::Failed {
                        reason: format!("{e:#}"),
                    },
                )
            }
        };

        EyeReport {
            index,
            side: Some(side),
            pupil,
            status,
            diagnostic_path: None,
        }
    }
}
