//! Submission of a new menu item: validate, host the image, create the item.
//!
//! The two network calls are strictly ordered; the backend is only contacted
//! after the image host reported success. State moves
//! `Idle -> Submitting -> Succeeded | Failed -> Idle`. The last step happens on
//! [`MenuItemSubmissionWorkflow::acknowledge`] once the outcome was shown, or
//! implicitly when the next submit starts.
use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::watch;

use super::{MenuItemDraft, MenuItemRecord, ValidationError};
use crate::error::AppError;
use crate::http::CredentialedClient;
use crate::imaging::ImageHostClient;
use crate::notify::{Notification, Notifier};

pub const MENU_PATH: &str = "/menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("image upload failed: {0}")]
    ImageUploadFailed(#[source] AppError),

    /// The image stays on the hosting provider; `orphaned_image` is its URL.
    #[error("menu creation failed: {detail}")]
    MenuCreationFailed {
        status: Option<StatusCode>,
        detail: String,
        orphaned_image: String,
    },
}

pub struct MenuItemSubmissionWorkflow {
    image_host: ImageHostClient,
    backend: Arc<dyn CredentialedClient>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<SubmissionState>,
}

/// Moves the workflow out of `Submitting` when dropped, whatever the exit path.
struct SubmittingGuard<'a> {
    state: &'a watch::Sender<SubmissionState>,
    settled: SubmissionState,
}

impl SubmittingGuard<'_> {
    fn succeed(&mut self) {
        self.settled = SubmissionState::Succeeded;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(self.settled);
    }
}

impl MenuItemSubmissionWorkflow {
    pub fn new(
        image_host: ImageHostClient,
        backend: Arc<dyn CredentialedClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        MenuItemSubmissionWorkflow { image_host, backend, notifier, state }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    /// Watch state changes, e.g. to disable a submit button while loading.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Settle a reported outcome back to `Idle`, e.g. when the toast closes.
    /// Returns false if there was nothing to settle, including while loading.
    pub fn acknowledge(&self) -> bool {
        self.state.send_if_modified(|state| match state {
            SubmissionState::Succeeded | SubmissionState::Failed => {
                *state = SubmissionState::Idle;
                true
            }
            SubmissionState::Idle | SubmissionState::Submitting => false,
        })
    }

    fn try_begin(&self) -> Option<SubmittingGuard<'_>> {
        let started = self.state.send_if_modified(|state| {
            if *state == SubmissionState::Submitting {
                false
            } else {
                *state = SubmissionState::Submitting;
                true
            }
        });
        started.then(|| SubmittingGuard { state: &self.state, settled: SubmissionState::Failed })
    }

    /// Submit `draft`. On success the draft is cleared; on failure it is left
    /// untouched so the admin can retry.
    pub async fn submit(&self, draft: &mut MenuItemDraft) -> Result<MenuItemRecord, SubmitError> {
        let Some(mut guard) = self.try_begin() else {
            tracing::warn!("Submit ignored, another submission is in flight");
            return Err(SubmitError::AlreadySubmitting);
        };

        match self.create(draft).await {
            Ok(record) => {
                guard.succeed();
                draft.reset();
                tracing::info!(name = %record.name(), image = %record.image(), "Menu item added");
                self.notifier.notify(Notification::item_added(record.name()));
                Ok(record)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    async fn create(&self, draft: &MenuItemDraft) -> Result<MenuItemRecord, SubmitError> {
        let valid = draft.validate()?;

        let hosted = self
            .image_host
            .upload(valid.image())
            .await
            .map_err(SubmitError::ImageUploadFailed)?;

        let record = MenuItemRecord::new(&valid, &hosted);
        let creation_failed = |status: Option<StatusCode>, detail: String| SubmitError::MenuCreationFailed {
            status,
            detail,
            orphaned_image: hosted.display_url.clone(),
        };

        let body = serde_json::to_value(&record).map_err(|e| creation_failed(None, e.to_string()))?;
        let response = self
            .backend
            .post(MENU_PATH, &body)
            .await
            .map_err(|e| creation_failed(None, e.to_string()))?;

        if response.status != StatusCode::OK {
            let detail = format!("backend answered {}: {}", response.status, response.text());
            return Err(creation_failed(Some(response.status), detail));
        }
        Ok(record)
    }

    fn report(&self, err: &SubmitError) {
        let notification = match err {
            SubmitError::AlreadySubmitting => return,
            SubmitError::ValidationFailed(reason) => {
                tracing::warn!(%reason, "Menu item rejected before upload");
                Notification::error(reason.to_string())
            }
            SubmitError::ImageUploadFailed(source) => {
                tracing::error!(error = %source, "Error uploading image");
                Notification::something_went_wrong()
            }
            SubmitError::MenuCreationFailed { detail, orphaned_image, .. } => {
                tracing::error!(%detail, "Error adding menu item");
                tracing::warn!(image = %orphaned_image, "Hosted image left without a menu item");
                Notification::something_went_wrong()
            }
        };
        self.notifier.notify(notification);
    }
}
