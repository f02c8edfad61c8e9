use {
    crate::*,
    std::{path::PathBuf, time::Duration},
};

pub const BACKEND_ENV: &str = "ANALYSIS_BACKEND";
pub const MODEL_PATH_ENV: &str = "ANALYSIS_MODEL_PATH";
pub const REMOTE_URL_ENV: &str = "ANALYSIS_REMOTE_URL";

const DEFAULT_MODEL_PATH: &str = "data/emotion/emotion.onnx";
const DEFAULT_INPUT_SIZE: usize = 48;
const DEFAULT_REMOTE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, PartialEq)]
pub struct LocalModelConfig {
    model_path: PathBuf,
    input_size: usize,
    labels: Vec<Emotion>,
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            input_size: DEFAULT_INPUT_SIZE,
            labels: Emotion::ALL.to_vec(),
        }
    }
}

impl LocalModelConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self::default().with_model_path(model_path)
    }

    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = model_path.into();
        self
    }

    /// Side of the square model input, at least 1.
    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size.max(1);
        self
    }

    /// Labels in the order of the model's output vector.
    pub fn with_labels(mut self, labels: Vec<Emotion>) -> Self {
        self.labels = labels;
        self
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn labels(&self) -> &[Emotion] {
        &self.labels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    base_url: String,
    timeout: Duration,
    jpeg_quality: u8,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REMOTE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality.clamp(1, 100);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

/// Which classifier a session runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    Local(LocalModelConfig),
    Remote(RemoteConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Remote(RemoteConfig::default())
    }
}

impl BackendConfig {
    /// Read the backend from `ANALYSIS_BACKEND` (`local` or `remote`).
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let backend = var(BACKEND_ENV).unwrap_or_else(|| "remote".to_string());
        match backend.trim().to_ascii_lowercase().as_str() {
            "local" => {
                let mut config = LocalModelConfig::default();
                if let Some(path) = var(MODEL_PATH_ENV) {
                    config = config.with_model_path(path);
                }
                BackendConfig::Local(config)
            }
            other => {
                if other != "remote" {
                    log::warn!("unknown {} {:?}, using remote", BACKEND_ENV, other);
                }
                let mut config = RemoteConfig::default();
                if let Some(url) = var(REMOTE_URL_ENV) {
                    config = config.with_base_url(url);
                }
                BackendConfig::Remote(config)
            }
        }
    }
}

/// Create the classifier a backend config describes.
pub fn open_classifier(config: &BackendConfig) -> Result<Box<dyn Classifier>, ClassifyError> {
    match config {
        BackendConfig::Local(local) => {
            let model = OnnxEmotionModel::open(local.model_path())?;
            log::info!(
                "using local classifier ({}x{} input, {} labels)",
                local.input_size(),
                local.input_size(),
                local.labels().len()
            );
            Ok(Box::new(LocalModelClassifier::new(model, local.clone())))
        }
        BackendConfig::Remote(remote) => {
            log::info!("using remote classifier at {}", remote.base_url());
            Ok(Box::new(RemoteHttpClassifier::new(remote.clone())?))
        }
    }
}
