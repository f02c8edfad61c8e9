use {
    crate::*,
    async_trait::async_trait,
    image::{Image, encode_jpeg},
    reqwest::{
        Client,
        multipart::{Form, Part},
    },
    serde::Deserialize,
    std::sync::atomic::{AtomicBool, Ordering},
};

// response of POST /detect
#[derive(Debug, Deserialize)]
struct DetectResponse {
    emotion: Option<String>,
    score: f32,
}

// response of GET /health
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Classifies faces by posting JPEG crops to an emotion detection service.
pub struct RemoteHttpClassifier {
    http: Client,
    config: RemoteConfig,
    closed: AtomicBool,
}

impl RemoteHttpClassifier {
    pub fn new(config: RemoteConfig) -> Result<Self, ClassifyError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            config,
            closed: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url().trim_end_matches('/'), path)
    }

    /// Ask the service whether it is up. Transport errors count as "not healthy".
    pub async fn health(&self) -> bool {
        let url = self.url("health");
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<HealthResponse>().await {
                    Ok(health) => health.status == "ok",
                    Err(e) => {
                        log::warn!("unreadable health response from {}: {}", url, e);
                        false
                    }
                }
            }
            Ok(response) => {
                log::warn!("health check on {} returned {}", url, response.status());
                false
            }
            Err(e) => {
                log::warn!("health check on {} failed: {}", url, e);
                false
            }
        }
    }
}

#[async_trait]
impl Classifier for RemoteHttpClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&self, face: Image) -> Result<Classification, ClassifyError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ClassifyError::Cancelled);
        }
        let jpeg = encode_jpeg(face, self.config.jpeg_quality()).await?;
        let part = Part::bytes(jpeg)
            .file_name("frame.jpg")
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part);

        let url = self.url("detect");
        log::trace!("posting face crop to {}", url);
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let detected: DetectResponse = serde_json::from_slice(&body)?;
        let label = detected.emotion.ok_or(ClassifyError::NoFace)?;
        let emotion = label.parse::<Emotion>().map_err(ClassifyError::Parse)?;
        Ok(Classification::new(emotion, detected.score))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        log::debug!("remote classifier closed");
    }
}
