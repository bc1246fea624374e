use std::sync::Mutex;

/// The page region that shows loading, error and prediction blocks.
/// Every transition replaces the whole content.
pub trait ResultView {
    fn set_content(&mut self, html: String);
    fn show(&mut self);
    fn hide(&mut self);
    fn scroll_into_view(&mut self);
}

/// Blocking, user-facing warnings.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// In-memory result container used when the page is rendered server-side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageView {
    pub content: String,
    pub visible: bool,
    pub scrolled: bool,
}

impl ResultView for PageView {
    fn set_content(&mut self, html: String) {
        self.content = html;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.scrolled = false;
    }

    fn scroll_into_view(&mut self) {
        self.scrolled = true;
    }
}

/// Collects alerts so the host can show them with the next page.
#[derive(Debug, Default)]
pub struct AlertLog {
    messages: Mutex<Vec<String>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("alert log lock poisoned")
            .clone()
    }
}

impl Notifier for AlertLog {
    fn alert(&self, message: &str) {
        self.messages
            .lock()
            .expect("alert log lock poisoned")
            .push(message.to_string());
    }
}
