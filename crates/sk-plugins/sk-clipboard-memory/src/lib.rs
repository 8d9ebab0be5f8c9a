//! # sk-clipboard-memory
//!
//! `Clipboard` implementation for a server without access to the viewer's
//! clipboard: it keeps the most recently copied text in memory.

use std::sync::RwLock;

use async_trait::async_trait;
use sk_core::traits::Clipboard;

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    last: RwLock<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written text, if any.
    pub fn last_copied(&self) -> Option<String> {
        self.last.read().ok().and_then(|last| last.clone())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut last = self
            .last
            .write()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        *last = Some(text.to_string());
        log::debug!("copied {text}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_latest_write() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.last_copied().is_none());
        clipboard.write_text("http://a/questions/1#answer-1").await.unwrap();
        clipboard.write_text("http://a/questions/1#answer-2").await.unwrap();
        assert_eq!(clipboard.last_copied().as_deref(), Some("http://a/questions/1#answer-2"));
    }
}
