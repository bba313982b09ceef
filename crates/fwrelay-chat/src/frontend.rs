//! Message-in, messages-out chat front end

use std::sync::Arc;

use tracing::{debug, info};

use fwrelay_core::{DeviceLookup, LookupQuery, LookupResult};

use crate::command::ChatCommand;
use crate::render;

/// What the front end wants done with an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// Answer immediately with one message
    Reply(String),
    /// Send `ack`, then run the lookup
    Lookup { ack: String, query: LookupQuery },
    /// Not a command this bot handles
    Ignore,
}

/// Chat front end over any [`DeviceLookup`].
///
/// Transports that can send messages while work is in progress use
/// [`plan`](Self::plan) followed by [`lookup`](Self::lookup); simpler ones
/// call [`handle`](Self::handle) and send the returned messages in order.
#[derive(Clone)]
pub struct ChatFrontend {
    lookup: Arc<dyn DeviceLookup>,
}

impl ChatFrontend {
    pub fn new(lookup: Arc<dyn DeviceLookup>) -> Self {
        Self { lookup }
    }

    /// Decide how to answer a message without touching the vendor
    pub fn plan(&self, text: &str) -> ChatAction {
        match ChatCommand::parse(text) {
            Some(ChatCommand::Start) => ChatAction::Reply(render::welcome()),
            Some(ChatCommand::MissingSn) => ChatAction::Reply(render::sn_usage()),
            Some(ChatCommand::MissingMtm) => ChatAction::Reply(render::mtm_usage()),
            Some(ChatCommand::Lookup(query)) => ChatAction::Lookup {
                ack: render::progress(&query),
                query,
            },
            None => {
                debug!(text, "Ignoring non-command message");
                ChatAction::Ignore
            }
        }
    }

    /// Run a lookup and render the messages that follow the acknowledgement
    pub async fn lookup(&self, query: &LookupQuery) -> Vec<String> {
        info!(
            sn = query.sn.as_deref(),
            mtm = query.mtm.as_deref(),
            firmware = query.current_firmware_version.as_deref(),
            "Chat lookup"
        );

        let result = self.lookup.resolve(query).await;
        info!(success = result.success, mtm = result.mtm(), "Chat lookup finished");

        Self::replies(query, &result)
    }

    /// Messages that follow the acknowledgement for a finished lookup
    pub fn replies(query: &LookupQuery, result: &LookupResult) -> Vec<String> {
        let mut messages = Vec::with_capacity(2);
        if result.success && query.current_firmware_version.is_some() {
            messages.push(render::ota_progress());
        }
        messages.push(render::lookup_result(query, result));
        messages
    }

    /// Every reply to a message, in send order
    pub async fn handle(&self, text: &str) -> Vec<String> {
        match self.plan(text) {
            ChatAction::Reply(message) => vec![message],
            ChatAction::Lookup { ack, query } => {
                let mut messages = vec![ack];
                messages.extend(self.lookup(&query).await);
                messages
            }
            ChatAction::Ignore => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fwrelay_core::{FlashPackage, LookupError};
    use std::sync::Mutex;

    /// Resolves every MTM except `NONE`; records queries it receives
    #[derive(Default)]
    struct MockLookup {
        queries: Mutex<Vec<LookupQuery>>,
    }

    #[async_trait]
    impl DeviceLookup for MockLookup {
        async fn resolve(&self, query: &LookupQuery) -> LookupResult {
            self.queries.lock().unwrap().push(query.clone());
            let mtm = query.mtm.clone().unwrap_or_else(|| "82XX".to_string());
            if mtm == "NONE" {
                return LookupResult::failed(&LookupError::NoPackage(mtm));
            }
            LookupResult::found(
                None,
                FlashPackage {
                    mtm: Some(mtm),
                    ..Default::default()
                },
                None,
            )
        }
    }

    fn frontend() -> (ChatFrontend, Arc<MockLookup>) {
        let lookup = Arc::new(MockLookup::default());
        (ChatFrontend::new(lookup.clone()), lookup)
    }

    #[test]
    fn test_plan_replies_without_lookup() {
        let (chat, lookup) = frontend();

        assert!(matches!(chat.plan("/start"), ChatAction::Reply(m) if m.contains("/query")));
        assert!(matches!(chat.plan("/query"), ChatAction::Reply(m) if m.starts_with("⚠️")));
        assert_eq!(chat.plan("just chatting"), ChatAction::Ignore);
        assert!(lookup.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_sends_ack_then_result() {
        let (chat, lookup) = frontend();

        let messages = chat.handle("/query ha29117a").await;

        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("SN: *HA29117A*"));
        assert!(messages[1].contains("完整查询成功"));
        assert_eq!(
            lookup.queries.lock().unwrap()[0],
            LookupQuery::by_sn("HA29117A")
        );
    }

    #[tokio::test]
    async fn test_firmware_version_adds_ota_progress() {
        let (chat, _) = frontend();

        let messages = chat.handle("/query HA29117A V1").await;

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], render::ota_progress());
        assert!(messages[2].contains("未发现从版本 V1"));
    }

    #[tokio::test]
    async fn test_failure_skips_ota_progress() {
        let (chat, _) = frontend();

        let messages = chat.handle("/mtm none V1").await;

        assert_eq!(messages.len(), 2);
        assert!(messages[1].contains("MTM *NONE*"));
    }

    #[test]
    fn test_replies_for_finished_lookup() {
        let query = LookupQuery::by_mtm("82XX").with_firmware_version("V1");

        let found = LookupResult::found(None, FlashPackage::default(), None);
        let replies = ChatFrontend::replies(&query, &found);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], render::ota_progress());

        let failed = LookupResult::failed(&LookupError::NoMtm);
        assert_eq!(ChatFrontend::replies(&query, &failed).len(), 1);
    }

    #[tokio::test]
    async fn test_ignored_message_has_no_replies() {
        let (chat, _) = frontend();
        assert!(chat.handle("hello").await.is_empty());
    }
}
