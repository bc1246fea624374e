use axum::response::Html;

use crate::templates::page::{self, PageState};

pub async fn index() -> Html<String> {
    Html(page::render(&PageState::empty()))
}
