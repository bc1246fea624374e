//! Turns one form submission into one rendered result.
//!
//! The controller never looks anything up in a page; the host passes in the
//! result container, the notifier and which form elements exist through
//! [`PageHandles`]. Submissions move the container through
//! idle -> loading -> result shown | error shown | hidden after a failure.

use tracing::{error, info};

use crate::models::{PredictionResult, UploadForm, UploadedFile, Verdict};
use crate::predictor::Predictor;
use crate::preview::PreviewUrls;
use crate::slot::{ResultSlot, Ticket};
use crate::templates::result::{render_error, render_loading, render_prediction};
use crate::view::{Notifier, ResultView};

pub const NO_FILE_MESSAGE: &str = "Please select a file first!";
pub const FAILURE_MESSAGE: &str = "An error occurred while processing the image.";

/// Element handles supplied by the host page.
///
/// `upload_form` and `file_input` say whether those elements exist; a missing
/// element disables its listener.
pub struct PageHandles<V, N> {
    pub result: V,
    pub notifier: N,
    pub upload_form: bool,
    pub file_input: bool,
}

impl<V, N> PageHandles<V, N> {
    pub fn new(result: V, notifier: N) -> Self {
        Self {
            result,
            notifier,
            upload_form: true,
            file_input: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The page has no upload form, so nothing listens for submissions.
    Disabled,
    /// No file was selected; the user was warned and nothing was sent.
    NoFile,
    /// The prediction was rendered.
    Rendered(Verdict),
    /// The service answered with an error message, shown inline.
    ServerError,
    /// The request or its response failed; the result area was hidden.
    Failed,
    /// A later submission was issued before this one finished.
    Superseded,
}

pub struct UploadController<P, U, V, N> {
    predictor: P,
    previews: U,
    result: ResultSlot<V>,
    notifier: N,
    listen_submit: bool,
    listen_file_change: bool,
}

impl<P, U, V, N> UploadController<P, U, V, N>
where
    P: Predictor,
    U: PreviewUrls,
    V: ResultView,
    N: Notifier,
{
    pub fn setup(handles: PageHandles<V, N>, predictor: P, previews: U) -> Self {
        Self {
            predictor,
            previews,
            result: ResultSlot::new(handles.result),
            notifier: handles.notifier,
            listen_submit: handles.upload_form,
            listen_file_change: handles.file_input,
        }
    }

    pub async fn on_submit(&self, form: &UploadForm) -> SubmitOutcome {
        if !self.listen_submit {
            return SubmitOutcome::Disabled;
        }

        let Some(file) = form.file.as_ref() else {
            self.notifier.alert(NO_FILE_MESSAGE);
            return SubmitOutcome::NoFile;
        };

        let ticket = self.result.issue();
        self.result.commit(ticket, |view| {
            view.set_content(render_loading());
            view.show();
        });
        info!(
            "[freshcheck] Submitting {} ({} bytes) as request #{}",
            file.name,
            file.size(),
            ticket.seq()
        );

        match self.predictor.predict(form).await {
            Ok(result) => self.display_result(ticket, &result, file),
            Err(e) => {
                error!("[freshcheck] Request #{} failed: {:#}", ticket.seq(), e);
                if !self.result.commit(ticket, |view| view.hide()) {
                    return SubmitOutcome::Superseded;
                }
                self.notifier.alert(FAILURE_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    fn display_result(
        &self,
        ticket: Ticket,
        result: &PredictionResult,
        file: &UploadedFile,
    ) -> SubmitOutcome {
        if let Some(message) = result.error_message() {
            let shown = self
                .result
                .commit(ticket, |view| view.set_content(render_error(message)));
            if !shown {
                return SubmitOutcome::Superseded;
            }
            info!(
                "[freshcheck] Request #{} rejected by service: {}",
                ticket.seq(),
                message
            );
            return SubmitOutcome::ServerError;
        }

        let verdict = result.verdict();
        let shown = self.result.commit(ticket, |view| {
            let preview_url = self.previews.create_url(file);
            view.set_content(render_prediction(result, &preview_url));
            view.show();
            view.scroll_into_view();
        });
        if !shown {
            info!(
                "[freshcheck] Dropping stale result for request #{}",
                ticket.seq()
            );
            return SubmitOutcome::Superseded;
        }

        info!(
            "[freshcheck] Request #{}: {} ({}%)",
            ticket.seq(),
            result.label(),
            result
                .confidence
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default()
        );
        SubmitOutcome::Rendered(verdict)
    }

    /// Preview hook for the file input. Only records the selection for now.
    pub fn on_file_change(&self, file: Option<&UploadedFile>) {
        if !self.listen_file_change {
            return;
        }
        if let Some(file) = file {
            info!("[freshcheck] File selected: {}", file.name);
        }
    }

    pub fn result(&self) -> &ResultSlot<V> {
        &self.result
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Gives the result container and notifier back to the host.
    pub fn into_handles(self) -> (V, N) {
        (self.result.into_inner(), self.notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;
    use crate::preview::PreviewStore;
    use crate::view::{AlertLog, PageView};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Answers according to the form's `label` field. A `slow` field makes the
    /// call wait for `release`.
    #[derive(Default)]
    struct ScriptedPredictor {
        calls: AtomicUsize,
        release: Notify,
    }

    impl Predictor for ScriptedPredictor {
        async fn predict(&self, form: &UploadForm) -> anyhow::Result<PredictionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let field = |key: &str| {
                form.fields
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
            };
            if field("slow").is_some() {
                self.release.notified().await;
            }
            let label = field("label").unwrap_or_default();
            if label == "fail" {
                anyhow::bail!("connection reset by peer");
            }
            if let Some(message) = label.strip_prefix("error:") {
                return Ok(PredictionResult {
                    error: Some(message.to_string()),
                    prediction: Some("ignored".to_string()),
                    confidence: Some(Confidence::Number(99.0)),
                    ..Default::default()
                });
            }
            let confidence = match field("confidence") {
                Some(c) => c.parse().map(Confidence::Number).unwrap_or(Confidence::Text(c)),
                None => Confidence::Number(75.0),
            };
            Ok(PredictionResult {
                prediction: Some(label),
                confidence: Some(confidence),
                ..Default::default()
            })
        }
    }

    type TestController = UploadController<ScriptedPredictor, PreviewStore, PageView, AlertLog>;

    fn controller() -> TestController {
        UploadController::setup(
            PageHandles::new(PageView::default(), AlertLog::new()),
            ScriptedPredictor::default(),
            PreviewStore::new("/preview"),
        )
    }

    fn form(fields: &[(&str, &str)]) -> UploadForm {
        let mut form = UploadForm::with_file(UploadedFile::new(
            "apple.jpg",
            "image/jpeg",
            vec![0xFF, 0xD8, 0xFF],
        ));
        form.fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        form
    }

    fn view(c: &TestController) -> PageView {
        c.result().with_view(|v| v.clone())
    }

    #[tokio::test]
    async fn test_no_file_warns_without_request() {
        let c = controller();
        let outcome = c.on_submit(&UploadForm::default()).await;

        assert_eq!(outcome, SubmitOutcome::NoFile);
        assert_eq!(c.notifier().messages(), vec![NO_FILE_MESSAGE]);
        assert_eq!(c.predictor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(view(&c), PageView::default());
    }

    #[tokio::test]
    async fn test_healthy_result_is_rendered() {
        let c = controller();
        let outcome = c
            .on_submit(&form(&[("label", "Fresh/Healthy"), ("confidence", "92")]))
            .await;

        assert_eq!(outcome, SubmitOutcome::Rendered(Verdict::Healthy));
        let v = view(&c);
        assert!(v.visible);
        assert!(v.scrolled);
        assert!(v.content.contains("prediction-fresh"));
        assert!(v.content.contains("fresh and healthy"));
        assert!(v.content.contains("Confidence: 92%"));
        assert!(c.notifier().messages().is_empty());
        assert_eq!(c.previews.len(), 1);
    }

    #[tokio::test]
    async fn test_rotten_result_is_rendered() {
        let c = controller();
        let outcome = c
            .on_submit(&form(&[("label", "Rotten"), ("confidence", "80")]))
            .await;

        assert_eq!(outcome, SubmitOutcome::Rendered(Verdict::NotHealthy));
        let v = view(&c);
        assert!(v.content.contains("prediction-rotten"));
        assert!(v.content.contains("rotten or spoiled"));
    }

    #[tokio::test]
    async fn test_empty_error_falls_through_to_prediction() {
        let c = controller();
        let outcome = c.on_submit(&form(&[("label", "error:")])).await;

        assert_eq!(outcome, SubmitOutcome::Rendered(Verdict::NotHealthy));
        let v = view(&c);
        assert!(v.visible);
        assert!(!v.content.contains("Error:"));
        assert!(v.content.contains("Prediction: ignored"));
        assert!(v.content.contains("Confidence: 99%"));
    }

    #[tokio::test]
    async fn test_preview_comes_from_selected_file() {
        let c = controller();
        c.on_submit(&form(&[("label", "Rotten")])).await;

        let content = view(&c).content;
        let start = content.find("src=\"/preview/").unwrap() + "src=\"/preview/".len();
        let id: String = content[start..].chars().take_while(|c| *c != '"').collect();
        let entry = c.previews.get(&id).unwrap();
        assert_eq!(entry.bytes, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(entry.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_server_error_is_shown_inline() {
        let c = controller();
        let outcome = c.on_submit(&form(&[("label", "error:bad image")])).await;

        assert_eq!(outcome, SubmitOutcome::ServerError);
        let v = view(&c);
        assert!(v.visible);
        assert!(v.content.contains("bad image"));
        assert!(!v.content.contains("Confidence"));
        assert!(!v.content.contains("ignored"));
        assert!(c.notifier().messages().is_empty());
        assert!(c.previews.is_empty());
    }

    #[tokio::test]
    async fn test_failure_hides_result_and_alerts() {
        let c = controller();
        let outcome = c.on_submit(&form(&[("label", "fail")])).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let v = view(&c);
        assert!(!v.visible);
        assert!(v.content.contains("Analyzing image..."));
        assert_eq!(c.notifier().messages(), vec![FAILURE_MESSAGE]);
    }

    #[tokio::test]
    async fn test_slow_response_does_not_replace_newer_result() {
        let c = controller();
        let slow_form = form(&[("label", "Rotten"), ("slow", "1")]);
        let fast_form = form(&[("label", "Fresh/Healthy")]);

        let slow = c.on_submit(&slow_form);
        let fast = async {
            let outcome = c.on_submit(&fast_form).await;
            c.predictor.release.notify_one();
            outcome
        };
        let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

        assert_eq!(fast_outcome, SubmitOutcome::Rendered(Verdict::Healthy));
        assert_eq!(slow_outcome, SubmitOutcome::Superseded);
        let v = view(&c);
        assert!(v.content.contains("prediction-fresh"));
        assert!(!v.content.contains("prediction-rotten"));
        assert_eq!(c.previews.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_failure_is_silent() {
        let c = controller();
        let slow_form = form(&[("label", "fail"), ("slow", "1")]);
        let fast_form = form(&[("label", "Rotten")]);

        let slow = c.on_submit(&slow_form);
        let fast = async {
            let outcome = c.on_submit(&fast_form).await;
            c.predictor.release.notify_one();
            outcome
        };
        let (slow_outcome, _) = tokio::join!(slow, fast);

        assert_eq!(slow_outcome, SubmitOutcome::Superseded);
        assert!(view(&c).visible);
        assert!(c.notifier().messages().is_empty());
    }

    #[tokio::test]
    async fn test_missing_form_disables_submit() {
        let mut handles = PageHandles::new(PageView::default(), AlertLog::new());
        handles.upload_form = false;
        let c = UploadController::setup(
            handles,
            ScriptedPredictor::default(),
            PreviewStore::new("/preview"),
        );

        let outcome = c.on_submit(&form(&[("label", "Rotten")])).await;
        assert_eq!(outcome, SubmitOutcome::Disabled);
        assert_eq!(c.predictor.calls.load(Ordering::SeqCst), 0);

        let outcome = c.on_submit(&UploadForm::default()).await;
        assert_eq!(outcome, SubmitOutcome::Disabled);
        assert!(c.notifier().messages().is_empty());
    }

    #[tokio::test]
    async fn test_file_change_leaves_result_alone() {
        let c = controller();
        let file = UploadedFile::new("kiwi.png", "image/png", vec![1]);
        c.on_file_change(Some(&file));
        c.on_file_change(None);

        let (result, notifier) = c.into_handles();
        assert_eq!(result, PageView::default());
        assert!(notifier.messages().is_empty());
    }
}
