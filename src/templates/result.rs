use crate::models::PredictionResult;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_loading() -> String {
    r#"<div class="text-center">
    <div class="spinner-border text-primary" role="status">
        <span class="visually-hidden">Loading...</span>
    </div>
    <p class="mt-2">Analyzing image...</p>
</div>"#
        .to_string()
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger" role="alert">
    <strong>Error:</strong> {}
</div>"#,
        escape_html(message)
    )
}

/// Two-pane result block. `preview_url` points at the bytes the user picked,
/// never at anything the prediction service returned.
pub fn render_prediction(result: &PredictionResult, preview_url: &str) -> String {
    let verdict = result.verdict();
    let confidence = result
        .confidence
        .as_ref()
        .map(|c| escape_html(&c.to_string()))
        .unwrap_or_default();

    format!(
        r#"<div class="row">
    <div class="col-md-6">
        <img src="{preview}" class="img-fluid rounded shadow" alt="Uploaded image">
    </div>
    <div class="col-md-6">
        <div class="prediction-result {class}" data-verdict="{verdict}">
            <div class="display-4 mb-3">{icon}</div>
            <h3>Prediction: {label}</h3>
            <h4>Confidence: {confidence}%</h4>
            <div class="confidence-bar">
                <div class="confidence-fill bg-{color}" style="width: {confidence}%"></div>
            </div>
            <p class="mt-3">{interpretation}</p>
        </div>
    </div>
</div>"#,
        preview = escape_html(preview_url),
        class = verdict.css_class(),
        verdict = verdict.as_str(),
        icon = verdict.icon(),
        label = escape_html(result.label()),
        confidence = confidence,
        color = verdict.color(),
        interpretation = verdict.interpretation(),
    )
}
