//! PDF collaborators: browser-based page rendering and page counting.
//!
//! `headless_chrome` is synchronous, so all browser work runs inside
//! `tokio::task::spawn_blocking`. The `PageRenderer` trait is the seam the
//! fit loop depends on — tests substitute a fake that counts pages without
//! launching a browser.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::Browser;

use crate::errors::AppError;

/// A4 sheet in inches, matching the fixed-size rendering contract.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// Renders an HTML document to paginated A4 output. The core needs exactly
/// two capabilities: render to a page count, and render to a file.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, AppError>;

    async fn page_count(&self, html: &str) -> Result<u32, AppError> {
        let bytes = self.render_pdf(html).await?;
        count_pdf_pages(&bytes)
    }

    async fn render_pdf_to_file(&self, html: &str, path: &Path) -> Result<(), AppError> {
        let bytes = self.render_pdf(html).await?;
        tokio::fs::write(path, bytes).await.map_err(AppError::Io)
    }
}

/// Number of pages in a rendered PDF.
pub fn count_pdf_pages(bytes: &[u8]) -> Result<u32, AppError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| AppError::Render(format!("Failed to parse rendered PDF: {e}")))?;
    Ok(doc.get_pages().len() as u32)
}

/// Chrome-backed renderer: writes the document to a temp file, prints it to
/// PDF with zero margins on A4, background graphics on.
pub struct ChromeRenderer;

impl ChromeRenderer {
    fn print_pdf_sync(html: &str) -> Result<Vec<u8>, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-render-")
            .suffix(".html")
            .tempfile()
            .map_err(AppError::Io)?;
        file.write_all(html.as_bytes()).map_err(AppError::Io)?;
        let url = format!("file://{}", file.path().display());

        let browser = Browser::default().map_err(|e| {
            AppError::Render(format!(
                "Failed to launch browser: {e}. Make sure Chrome or Chromium is installed."
            ))
        })?;
        let tab = browser
            .new_tab()
            .map_err(|e| AppError::Render(format!("Failed to create browser tab: {e}")))?;
        tab.navigate_to(&url)
            .map_err(|e| AppError::Render(format!("Failed to open rendered document: {e}")))?
            .wait_until_navigated()
            .map_err(|e| AppError::Render(format!("Failed waiting for document load: {e}")))?;

        tab.print_to_pdf(Some(PrintToPdfOptions {
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_IN),
            paper_height: Some(A4_HEIGHT_IN),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            ..PrintToPdfOptions::default()
        }))
        .map_err(|e| AppError::Render(format!("Failed to print document to PDF: {e}")))
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, AppError> {
        let html = html.to_string();
        tokio::task::spawn_blocking(move || Self::print_pdf_sync(&html))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF render: {e}"))
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pdf_pages_rejects_garbage() {
        let err = count_pdf_pages(b"not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }

    #[tokio::test]
    async fn test_default_page_count_uses_render_pdf() {
        // A renderer whose "PDF" is a fixed byte blob exercises the default
        // page_count wiring end to end (garbage bytes → Render error).
        struct BlobRenderer;
        #[async_trait]
        impl PageRenderer for BlobRenderer {
            async fn render_pdf(&self, _html: &str) -> Result<Vec<u8>, AppError> {
                Ok(b"blob".to_vec())
            }
        }
        let err = BlobRenderer.page_count("<html></html>").await.unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
