//! Publisher adapter
//!
//! Posts narrative lines as independent units with a fixed inter-post
//! delay. The sink behind the publisher is swappable: Bluesky for real
//! runs, stdout for dry runs, an in-memory recorder for tests. The same
//! truncation and pacing logic runs against every sink.

use anyhow::{bail, Context, Result};
use recap_core::clamp_to_cap;
use std::time::Duration;
use tracing::{error, info};

/// Fixed pacing between consecutive posts
pub const POST_PACING: Duration = Duration::from_secs(1);

/// Where a single post ends up
#[async_trait::async_trait]
pub trait PostSink: Send + Sync {
    async fn post(&self, text: &str) -> Result<()>;
}

/// Posts an ordered list of texts through a sink
pub struct Publisher {
    sink: Box<dyn PostSink>,
    pacing: Duration,
}

impl Publisher {
    pub fn new(sink: Box<dyn PostSink>) -> Self {
        Self { sink, pacing: POST_PACING }
    }

    /// Override the inter-post delay (used by tests)
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Post each text as its own unit, in order, truncated to the cap
    ///
    /// A failed post is logged and skipped; the remaining lines are still
    /// attempted. Returns how many posts succeeded.
    pub async fn publish(&self, posts: &[String]) -> usize {
        let mut posted = 0;
        for (i, text) in posts.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.pacing).await;
            }
            let capped = clamp_to_cap(text.clone());
            match self.sink.post(&capped).await {
                Ok(()) => posted += 1,
                Err(e) => error!("Failed to publish post {}: {e:#}", i + 1),
            }
        }
        posted
    }
}

/// Bluesky session returned by `com.atproto.server.createSession`
#[derive(Debug, Clone, serde::Deserialize)]
struct Session {
    #[serde(rename = "accessJwt")]
    access_jwt: String,
    did: String,
}

/// Posts to Bluesky over the atproto XRPC endpoints
pub struct BlueskySink {
    client: reqwest::Client,
    service_url: String,
    handle: String,
    app_password: String,
    session: tokio::sync::Mutex<Option<Session>>,
}

impl BlueskySink {
    pub fn new(
        service_url: impl Into<String>,
        handle: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            service_url: service_url.into(),
            handle: handle.into(),
            app_password: app_password.into(),
            session: tokio::sync::Mutex::new(None),
        })
    }

    /// Log in once per run and reuse the session for every post
    async fn session(&self) -> Result<Session> {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let response = self
            .client
            .post(format!("{}/xrpc/com.atproto.server.createSession", self.service_url))
            .json(&serde_json::json!({
                "identifier": self.handle,
                "password": self.app_password,
            }))
            .send()
            .await
            .context("Bluesky login request failed")?;

        if !response.status().is_success() {
            bail!("Bluesky login failed with status {}", response.status());
        }
        let session: Session =
            response.json().await.context("Failed to parse Bluesky session")?;
        info!("Logged in to Bluesky as {}", self.handle);

        *guard = Some(session.clone());
        Ok(session)
    }
}

#[async_trait::async_trait]
impl PostSink for BlueskySink {
    async fn post(&self, text: &str) -> Result<()> {
        let session = self.session().await?;

        let record = serde_json::json!({
            "$type": "app.bsky.feed.post",
            "text": text,
            "createdAt": chrono::Utc::now().to_rfc3339(),
        });
        let response = self
            .client
            .post(format!("{}/xrpc/com.atproto.repo.createRecord", self.service_url))
            .bearer_auth(&session.access_jwt)
            .json(&serde_json::json!({
                "repo": session.did,
                "collection": "app.bsky.feed.post",
                "record": record,
            }))
            .send()
            .await
            .context("Bluesky post request failed")?;

        if !response.status().is_success() {
            bail!("Bluesky post failed with status {}", response.status());
        }
        Ok(())
    }
}

/// Prints would-be posts to stdout instead of the network
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait::async_trait]
impl PostSink for DryRunSink {
    async fn post(&self, text: &str) -> Result<()> {
        println!("--- DRY RUN (would post) ---");
        println!("{text}");
        println!("----------------------------");
        Ok(())
    }
}

/// Records posts in memory (for testing)
#[derive(Debug, Default)]
pub struct MemorySink {
    posts: tokio::sync::Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::default())
    }

    pub async fn posts(&self) -> Vec<String> {
        self.posts.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl PostSink for std::sync::Arc<MemorySink> {
    async fn post(&self, text: &str) -> Result<()> {
        self.posts.lock().await.push(text.to_string());
        Ok(())
    }
}
