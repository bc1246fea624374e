use std::future::Future;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::models::{PredictionResult, UploadForm};

/// The one outbound call a submission makes.
///
/// Transport failures, unexpected status codes and undecodable bodies all come
/// back as a single error; callers do not tell them apart.
pub trait Predictor {
    fn predict(
        &self,
        form: &UploadForm,
    ) -> impl Future<Output = anyhow::Result<PredictionResult>> + Send;
}

/// Posts the form as multipart data to the prediction endpoint.
#[derive(Clone)]
pub struct HttpPredictor {
    client: reqwest::Client,
    url: String,
}

impl HttpPredictor {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn build_multipart(form: &UploadForm) -> anyhow::Result<Form> {
    let mut multipart = Form::new();
    for (name, value) in &form.fields {
        multipart = multipart.text(name.clone(), value.clone());
    }
    if let Some(file) = &form.file {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .with_context(|| format!("invalid content type {:?}", file.mime_type))?;
        multipart = multipart.part(form.file_field.clone(), part);
    }
    Ok(multipart)
}

impl Predictor for HttpPredictor {
    async fn predict(&self, form: &UploadForm) -> anyhow::Result<PredictionResult> {
        let multipart = build_multipart(form)?;

        let response = self
            .client
            .post(&self.url)
            .multipart(multipart)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;

        // The body is decoded whatever the status; error replies carry JSON too.
        let status = response.status();
        let body = response.bytes().await.context("failed to read response body")?;
        debug!(
            "[freshcheck] {} responded {} ({} bytes)",
            self.url,
            status,
            body.len()
        );

        serde_json::from_slice(&body)
            .with_context(|| format!("response from {} is not a prediction (status {})", self.url, status))
    }
}
