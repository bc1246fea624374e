use serde::{Deserialize, Serialize};
use std::fmt;

/// Label the upstream classifier uses for produce that is fit to eat.
pub const HEALTHY_LABEL: &str = "Fresh/Healthy";

/// Form field the page's file input submits under.
pub const DEFAULT_FILE_FIELD: &str = "file";

/// A file picked in the upload form. Contents are held in memory.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Everything the upload form submits: the file input plus any other fields,
/// kept in submission order so they are forwarded unchanged.
#[derive(Clone, Debug)]
pub struct UploadForm {
    pub file_field: String,
    pub file: Option<UploadedFile>,
    pub fields: Vec<(String, String)>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            file_field: DEFAULT_FILE_FIELD.to_string(),
            file: None,
            fields: Vec::new(),
        }
    }
}

impl UploadForm {
    pub fn with_file(file: UploadedFile) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }
}

/// Confidence as the service sent it. Numbers and quoted numbers both
/// render verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Confidence {
    Number(f64),
    Text(String),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Number(n) => write!(f, "{}", n),
            Confidence::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Confidence::Number(value)
    }
}

/// JSON body returned by the prediction endpoint.
///
/// Either `error` is set, or `prediction` and `confidence` are.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl PredictionResult {
    pub fn label(&self) -> &str {
        self.prediction.as_deref().unwrap_or("")
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::classify(self.label())
    }

    /// The service-reported error, if any. An empty string is no error.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Healthy,
    NotHealthy,
}

impl Verdict {
    /// Exact match against [`HEALTHY_LABEL`]; anything else counts as spoiled.
    pub fn classify(label: &str) -> Self {
        if label == HEALTHY_LABEL {
            Verdict::Healthy
        } else {
            Verdict::NotHealthy
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Verdict::Healthy => "prediction-fresh",
            Verdict::NotHealthy => "prediction-rotten",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Verdict::Healthy => "success",
            Verdict::NotHealthy => "danger",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Verdict::Healthy => "\u{1F34E}",
            Verdict::NotHealthy => "\u{1F342}",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            Verdict::Healthy => "This fruit appears to be fresh and healthy!",
            Verdict::NotHealthy => "This fruit appears to be rotten or spoiled.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Healthy => "healthy",
            Verdict::NotHealthy => "not_healthy",
        }
    }
}
