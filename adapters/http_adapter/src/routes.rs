use std::sync::Arc;

use axum::{extract::State, http::Uri, response::Html};
use doi_core::application::LookupService;
use html_adapter::HtmlPageWriter;
use percent_encoding::percent_decode_str;
use tokio::task::spawn_blocking;

use crate::error::AppError;

/// Handles every path. Bytes that do not decode to UTF-8 become U+FFFD, so
/// such paths still get a page (and fail validation) instead of a 400.
pub async fn lookup_handler(
    State(service): State<Arc<LookupService>>,
    uri: Uri,
) -> Result<Html<Vec<u8>>, AppError> {
    let path = percent_decode_str(uri.path()).decode_utf8_lossy().into_owned();
    render_page(service, path).await
}

/// Renders on the blocking pool since the store client does synchronous I/O.
/// The page is buffered rather than streamed so that a store error can still
/// become a 500 response; a failed render drops whatever was written so far.
async fn render_page(service: Arc<LookupService>, path: String) -> Result<Html<Vec<u8>>, AppError> {
    let body = spawn_blocking(move || {
        let mut page = HtmlPageWriter::new(Vec::new());
        service.render(&path, &mut page)?;
        Ok::<_, AppError>(page.into_inner())
    })
    .await??;

    Ok(Html(body))
}
