use {inference::BackendConfig, std::time::Duration};

pub const MIN_GAP_ENV: &str = "ANALYSIS_MIN_GAP_MS";
pub const GRACE_ENV: &str = "ANALYSIS_GRACE_MS";
pub const MIN_CONFIDENCE_ENV: &str = "ANALYSIS_MIN_CONFIDENCE";

const DEFAULT_MIN_GAP: Duration = Duration::from_millis(300);
const DEFAULT_GRACE_WINDOW: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    min_gap: Duration,
    grace_window: Duration,
    min_confidence: f32,
    backend: BackendConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_gap: DEFAULT_MIN_GAP,
            grace_window: DEFAULT_GRACE_WINDOW,
            min_confidence: 0.0,
            backend: BackendConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from variables looked up through `var`. Unparseable values keep
    /// their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str| {
            var(key).and_then(|value| match value.trim().parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    log::warn!("ignoring {}={:?}: not a number of milliseconds", key, value);
                    None
                }
            })
        };
        let mut config = Self::default().with_backend(BackendConfig::from_vars(&var));
        if let Some(min_gap) = millis(MIN_GAP_ENV) {
            config = config.with_min_gap(min_gap);
        }
        if let Some(grace_window) = millis(GRACE_ENV) {
            config = config.with_grace_window(grace_window);
        }
        if let Some(value) = var(MIN_CONFIDENCE_ENV) {
            match value.trim().parse::<f32>() {
                Ok(min_confidence) => config = config.with_min_confidence(min_confidence),
                Err(_) => log::warn!("ignoring {}={:?}", MIN_CONFIDENCE_ENV, value),
            }
        }
        config
    }

    /// Shortest time between the starts of two classifications.
    pub fn with_min_gap(mut self, min_gap: Duration) -> Self {
        self.min_gap = min_gap;
        self
    }

    /// How long a face may go unseen before `NoFace` is reported.
    pub fn with_grace_window(mut self, grace_window: Duration) -> Self {
        self.grace_window = grace_window;
        self
    }

    /// Classifications below this confidence are reported as `NoFace`.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = if min_confidence.is_nan() {
            0.0
        } else {
            min_confidence.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }

    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }
}
