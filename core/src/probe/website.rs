use std::error::Error as _;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use pulsr_common::probe::WebsiteProbe;
use pulsr_common::verdict::Assessment;

/// Checks a website with a single GET request.
pub struct HttpWebsiteProbe {
    client: Client,
}

impl HttpWebsiteProbe {
    pub fn new(request_timeout: Duration) -> anyhow::Result<Self> {
        let client: Client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("pulsr/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebsiteProbe for HttpWebsiteProbe {
    async fn check_website(&self, url: &str) -> Assessment {
        let checked_url: String = normalize_url(url);

        match self.client.get(&checked_url).send().await {
            Ok(response) => classify_status(response.status()),
            Err(e) => Assessment::errored(describe_request_error(&e)),
        }
    }
}

/// Prefixes `http://` unless the URL already names `http` or `https` (any case).
pub fn normalize_url(url: &str) -> String {
    let lower: String = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

fn classify_status(status: StatusCode) -> Assessment {
    if status.is_success() {
        Assessment::healthy(status.to_string())
    } else {
        Assessment::unhealthy(status.to_string())
    }
}

// reqwest's top-level message is generic ("error sending request"), the cause is deeper.
fn describe_request_error(error: &reqwest::Error) -> String {
    let mut detail: String = if error.is_timeout() {
        String::from("request timed out")
    } else {
        error.to_string()
    };

    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
