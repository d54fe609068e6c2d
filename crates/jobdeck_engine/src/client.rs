use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use jobdeck_core::{
    ApplicationPatch, ApplicationRecord, BatchSnapshot, BatchStarted, JobId, JobPage,
    NewApplication, PipelineRecord,
};

use crate::{ApiError, ApiFailure};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Versioned API root, e.g. `http://127.0.0.1:8000/api/v1`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The HTTP/JSON boundary this client consumes. Object-safe so drivers and
/// tests can substitute their own transport.
#[async_trait::async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn list_jobs(&self, query: &[(String, String)]) -> Result<JobPage, ApiError>;
    async fn submit_mass_apply(&self, job_ids: &[JobId]) -> Result<BatchStarted, ApiError>;
    async fn task_progress(&self, task_id: &str) -> Result<BatchSnapshot, ApiError>;
    async fn create_application(
        &self,
        request: &NewApplication,
    ) -> Result<ApplicationRecord, ApiError>;
    async fn pipeline(&self) -> Result<Vec<PipelineRecord>, ApiError>;
    async fn update_application(
        &self,
        application_id: &str,
        patch: &ApplicationPatch,
    ) -> Result<ApplicationRecord, ApiError>;
}

#[derive(Serialize)]
struct MassApplyRequest<'a> {
    job_ids: &'a [JobId],
}

/// Production client over reqwest.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        // A trailing slash keeps Url::join from eating the last segment of
        // the API root.
        let mut base_url = settings.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .map_err(|err| ApiError::new(ApiFailure::InvalidBaseUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(ApiFailure::InvalidBaseUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn send_json<T, B>(&self, request: reqwest::RequestBuilder, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = request.json(body).send().await.map_err(map_reqwest_error)?;
        decode(response).await
    }
}

#[async_trait::async_trait]
impl JobBoardApi for HttpApi {
    async fn list_jobs(&self, query: &[(String, String)]) -> Result<JobPage, ApiError> {
        let mut url = self.endpoint("jobs/")?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        self.get_json(url).await
    }

    async fn submit_mass_apply(&self, job_ids: &[JobId]) -> Result<BatchStarted, ApiError> {
        let url = self.endpoint("applications/mass-apply")?;
        self.send_json(self.client.post(url), &MassApplyRequest { job_ids })
            .await
    }

    async fn task_progress(&self, task_id: &str) -> Result<BatchSnapshot, ApiError> {
        let url = self.endpoint(&format!("applications/mass-apply/{task_id}"))?;
        self.get_json(url).await
    }

    async fn create_application(
        &self,
        request: &NewApplication,
    ) -> Result<ApplicationRecord, ApiError> {
        let url = self.endpoint("applications/")?;
        self.send_json(self.client.post(url), request).await
    }

    async fn pipeline(&self) -> Result<Vec<PipelineRecord>, ApiError> {
        let url = self.endpoint("applications/pipeline")?;
        self.get_json(url).await
    }

    async fn update_application(
        &self,
        application_id: &str,
        patch: &ApplicationPatch,
    ) -> Result<ApplicationRecord, ApiError> {
        let url = self.endpoint(&format!("applications/{application_id}"))?;
        self.send_json(self.client.patch(url), patch).await
    }
}

/// Non-2xx responses carry the error body as plain text; it becomes the
/// message of a typed error holding the status code.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::new(ApiFailure::Http(status.as_u16()), body));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::new(ApiFailure::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
