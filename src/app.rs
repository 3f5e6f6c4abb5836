use crate::application::DownloadCoordinator;
use crate::config::TriggerConfig;
use crate::domain::AppError;
use crate::ui::{TriggerMessage, TriggerView};
use bytes::Bytes;
use iced::Task;
use std::path::PathBuf;

pub struct TriggerApp {
    view: TriggerView,
    coordinator: DownloadCoordinator,
    requests_issued: u64,
}

impl TriggerApp {
    pub fn new(coordinator: DownloadCoordinator) -> Self {
        Self {
            view: TriggerView::default(),
            coordinator,
            requests_issued: 0,
        }
    }

    pub fn from_config(config: &TriggerConfig) -> Self {
        Self::new(DownloadCoordinator::from_config(config))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(TriggerMessage),
    /// Response body of the download request
    FetchCompleted(Result<Bytes, AppError>),
    /// Where the payload ended up
    SaveCompleted(Result<PathBuf, AppError>),
}

/// Background work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch,
    Save(Bytes),
}

impl Effect {
    pub async fn run(self, coordinator: DownloadCoordinator) -> Message {
        match self {
            Effect::Fetch => Message::FetchCompleted(coordinator.fetch().await),
            Effect::Save(bytes) => Message::SaveCompleted(coordinator.save(bytes).await),
        }
    }
}

pub fn update(app: &mut TriggerApp, message: Message) -> Task<Message> {
    match transition(app, message) {
        Some(effect) => Task::perform(
            effect.run(app.coordinator.clone()),
            std::convert::identity,
        ),
        None => Task::none(),
    }
}

/// Applies a message to the view state and says what to run next.
fn transition(app: &mut TriggerApp, message: Message) -> Option<Effect> {
    match message {
        Message::UiMessage(TriggerMessage::RunPressed) => {
            if app.view.is_requesting() {
                tracing::debug!("run pressed while a request is in flight, ignoring");
                return None;
            }

            app.view.begin_request();
            app.requests_issued += 1;
            tracing::info!(request = app.requests_issued, "download requested");
            Some(Effect::Fetch)
        }
        Message::FetchCompleted(result) => match result {
            Ok(bytes) => {
                tracing::info!(bytes = bytes.len(), "download response received");
                app.view
                    .finish_request(format!("Saving {}...", app.coordinator.file_name()));
                Some(Effect::Save(bytes))
            }
            Err(e) => {
                tracing::warn!(error = %e, "download request failed");
                app.view.finish_request(format!("Download failed: {}", e));
                None
            }
        },
        Message::SaveCompleted(result) => {
            let status = match result {
                Ok(path) => format!("Saved: {}", path.display()),
                Err(AppError::Cancelled) => {
                    tracing::info!("save cancelled by user");
                    "Save cancelled".to_string()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "saving payload failed");
                    format!("Save failed: {}", e)
                }
            };
            // A newer request owns the status line until it finishes.
            if app.view.is_requesting() {
                tracing::debug!(status = %status, "save finished during a newer request");
            } else {
                app.view.status_message = status;
            }
            None
        }
    }
}

pub fn view(app: &TriggerApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
