use std::{path::PathBuf, sync::Arc};

use bytes::Bytes;

use super::sink::{DialogSink, DirectorySink, DownloadSink};
use crate::{
    api::ApiClient,
    config::{SinkTarget, TriggerConfig},
    domain::{AppError, Payload},
};

/// Runs the two halves of a download: fetching the payload and handing
/// it to the sink. The UI drives them separately so it can go idle in
/// between.
#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
    sink: Arc<dyn DownloadSink>,
    file_name: String,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient, sink: Arc<dyn DownloadSink>, file_name: String) -> Self {
        Self {
            api_client,
            sink,
            file_name,
        }
    }

    pub fn from_config(config: &TriggerConfig) -> Self {
        let sink: Arc<dyn DownloadSink> = match &config.sink {
            SinkTarget::Directory(dir) => Arc::new(DirectorySink::new(dir.clone())),
            SinkTarget::Dialog => Arc::new(DialogSink),
        };
        Self::new(
            ApiClient::new(config.api.clone()),
            sink,
            config.file_name.clone(),
        )
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn fetch(&self) -> Result<Bytes, AppError> {
        let request = self.api_client.download_request();
        self.api_client
            .request_download(&request)
            .await
            .map_err(|e| AppError::Api(e.to_string()))
    }

    pub async fn save(&self, bytes: Bytes) -> Result<PathBuf, AppError> {
        let payload = Payload::new(bytes, self.file_name.clone());
        self.sink.save(payload).await
    }
}
