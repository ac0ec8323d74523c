use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use gk_core::{Config, Error, Result};
use tempfile::TempDir;
use tokio::task::JoinHandle;

const BROWSER_ARGS: [&str; 2] = ["--disable-gpu", "--disable-dev-shm-usage"];

/// One headless Chromium process with a throwaway profile, used for a
/// single search and then torn down.
///
/// Call [`BrowserSession::close`] on every normal exit path. If the session
/// is dropped instead (timeout, cancelled request), the CDP handler task is
/// aborted and `Browser`'s own drop kills the child process; the profile
/// directory is removed either way.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    _profile: TempDir,
}

impl BrowserSession {
    pub async fn launch(config: &Config) -> Result<Self> {
        let profile = tempfile::Builder::new()
            .prefix("gk-browser-")
            .tempdir()
            .map_err(|e| Error::Search(format!("Failed to create browser profile: {}", e)))?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args(BROWSER_ARGS)
            .user_data_dir(profile.path())
            .request_timeout(config.search_timeout);
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder
            .build()
            .map_err(|e| Error::Search(format!("Browser config error: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::Search(format!("Failed to launch browser: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler,
            _profile: profile,
        })
    }

    pub async fn open(&self, url: &str) -> Result<Page> {
        self.browser
            .new_page(url)
            .await
            .map_err(|e| Error::Search(format!("Failed to navigate to {}: {}", url, e)))
    }

    /// Closes the browser and waits for the process to exit. Failures are
    /// logged only; the process is killed on drop regardless.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
