use thiserror::Error;

use crate::modality::{MAX_UPLOAD_BYTES, Modality, file_extension};
use crate::verdict::Verdict;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Invalid file format. Please upload {} files.", .0.extension_list())]
    InvalidFormat(Modality),
    #[error("File size exceeds 50MB limit.")]
    FileTooLarge,
    #[error("Please select a file to upload.")]
    NoFileSelected,
    #[error("An analysis is already in progress.")]
    AnalysisInFlight,
}

/// Accepts a candidate only if its extension is on the active modality's
/// allow-list and it fits under the size cap. A file with no extension is a
/// format failure.
pub fn validate_candidate(
    modality: Modality,
    file_name: &str,
    size: u64,
) -> Result<(), UploadError> {
    let ext = file_extension(file_name).ok_or(UploadError::InvalidFormat(modality))?;
    if !modality.allowed_extensions().contains(&ext.as_str()) {
        return Err(UploadError::InvalidFormat(modality));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::FileTooLarge);
    }
    Ok(())
}

/// A validated candidate plus the platform handle needed to read it later.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub size: u64,
    pub handle: F,
}

/// State machine behind the upload page, generic over the platform file
/// handle so the transitions stay testable off-browser. The component
/// layers previews and network calls on top; everything that decides what
/// is selected, submittable, or shown inline lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadWorkflow<F> {
    modality: Modality,
    file: Option<SelectedFile<F>>,
    verdict: Option<Verdict>,
    error: Option<String>,
    submitting: bool,
}

impl<F> UploadWorkflow<F> {
    pub fn new(modality: Modality) -> Self {
        UploadWorkflow {
            modality,
            file: None,
            verdict: None,
            error: None,
            submitting: false,
        }
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn selected_file(&self) -> Option<&SelectedFile<F>> {
        self.file.as_ref()
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates and records a candidate file. A rejected candidate is
    /// discarded entirely; the human-readable reason lands in `error()`.
    pub fn select_file(
        &mut self,
        name: impl Into<String>,
        size: u64,
        handle: F,
    ) -> Result<(), UploadError> {
        let name = name.into();
        if let Err(err) = validate_candidate(self.modality, &name, size) {
            self.file = None;
            self.verdict = None;
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.file = Some(SelectedFile { name, size, handle });
        self.verdict = None;
        self.error = None;
        Ok(())
    }

    /// Switching media type always starts over. A file picked under one
    /// modality must never be submitted under another.
    pub fn set_modality(&mut self, modality: Modality) -> bool {
        if modality == self.modality {
            return false;
        }
        self.modality = modality;
        self.clear();
        true
    }

    pub fn clear(&mut self) {
        self.file = None;
        self.verdict = None;
        self.error = None;
        self.submitting = false;
    }

    /// Gate for the single in-flight submission. On `Ok` the caller owns
    /// issuing exactly one POST for the returned modality and reporting
    /// back through `complete_submission`/`fail_submission`.
    pub fn begin_submission(&mut self) -> Result<Modality, UploadError> {
        if self.submitting {
            return Err(UploadError::AnalysisInFlight);
        }
        let Some(file) = &self.file else {
            let err = UploadError::NoFileSelected;
            self.error = Some(err.to_string());
            return Err(err);
        };
        if let Err(err) = validate_candidate(self.modality, &file.name, file.size) {
            self.file = None;
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.submitting = true;
        self.verdict = None;
        self.error = None;
        Ok(self.modality)
    }

    pub fn complete_submission(&mut self, verdict: Verdict) {
        self.submitting = false;
        self.error = None;
        self.verdict = Some(verdict);
    }

    pub fn fail_submission(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.verdict = None;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow(modality: Modality) -> UploadWorkflow<()> {
        UploadWorkflow::new(modality)
    }

    #[test]
    fn extension_outside_allow_list_rejects_and_discards() {
        let mut wf = workflow(Modality::Video);
        let err = wf.select_file("song.mp3", 1024, ()).unwrap_err();
        assert_eq!(err, UploadError::InvalidFormat(Modality::Video));
        assert!(wf.selected_file().is_none());
        assert_eq!(
            wf.error(),
            Some("Invalid file format. Please upload .mp4, .avi, .mov, .mkv files.")
        );
    }

    #[test]
    fn oversized_file_rejects_regardless_of_extension() {
        let mut wf = workflow(Modality::Image);
        let err = wf
            .select_file("huge.png", MAX_UPLOAD_BYTES + 1, ())
            .unwrap_err();
        assert_eq!(err, UploadError::FileTooLarge);
        assert!(wf.selected_file().is_none());
        assert_eq!(wf.error(), Some("File size exceeds 50MB limit."));
    }

    #[test]
    fn boundary_size_is_accepted() {
        let mut wf = workflow(Modality::Image);
        assert!(wf.select_file("ok.jpg", MAX_UPLOAD_BYTES, ()).is_ok());
        assert!(wf.error().is_none());
    }

    #[test]
    fn valid_selection_replaces_prior_outcome() {
        let mut wf = workflow(Modality::Video);
        wf.select_file("clip.mp4", 10 * 1024 * 1024, ()).unwrap();
        assert_eq!(wf.begin_submission().unwrap(), Modality::Video);
        wf.complete_submission(Verdict {
            is_deepfake: true,
            confidence: 87.5,
            summary: "FAKE".into(),
        });
        assert!(wf.verdict().is_some());

        wf.select_file("other.mov", 1024, ()).unwrap();
        assert!(wf.verdict().is_none());
        assert!(wf.error().is_none());
    }

    #[test]
    fn modality_change_resets_everything() {
        let mut wf = workflow(Modality::Video);
        wf.select_file("clip.mp4", 1024, ()).unwrap();
        assert!(wf.set_modality(Modality::Audio));
        assert!(wf.selected_file().is_none());
        assert!(wf.verdict().is_none());
        assert!(wf.error().is_none());
        assert_eq!(wf.modality(), Modality::Audio);
    }

    #[test]
    fn same_modality_is_a_no_op() {
        let mut wf = workflow(Modality::Video);
        wf.select_file("clip.mp4", 1024, ()).unwrap();
        assert!(!wf.set_modality(Modality::Video));
        assert!(wf.selected_file().is_some());
    }

    #[test]
    fn submission_without_file_is_blocked_inline() {
        let mut wf = workflow(Modality::Video);
        let err = wf.begin_submission().unwrap_err();
        assert_eq!(err, UploadError::NoFileSelected);
        assert!(!wf.is_submitting());
        assert_eq!(wf.error(), Some("Please select a file to upload."));
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut wf = workflow(Modality::Video);
        wf.select_file("clip.mp4", 1024, ()).unwrap();
        assert!(wf.begin_submission().is_ok());
        assert_eq!(
            wf.begin_submission().unwrap_err(),
            UploadError::AnalysisInFlight
        );
        wf.fail_submission("Error processing file. Please try again.");
        assert!(!wf.is_submitting());
        assert!(wf.begin_submission().is_ok());
    }

    #[test]
    fn failure_reports_message_and_drops_verdict() {
        let mut wf = workflow(Modality::Audio);
        wf.select_file("voice.wav", 2048, ()).unwrap();
        wf.begin_submission().unwrap();
        wf.fail_submission("value is not a valid file");
        assert_eq!(wf.error(), Some("value is not a valid file"));
        assert!(wf.verdict().is_none());
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut wf = workflow(Modality::Image);
        wf.select_file("photo.jpeg", 4096, ()).unwrap();
        wf.clear();
        assert!(wf.selected_file().is_none());
        assert!(wf.error().is_none());
        assert!(wf.verdict().is_none());
        assert!(!wf.is_submitting());
    }
}
