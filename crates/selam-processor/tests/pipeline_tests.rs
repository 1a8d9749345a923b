// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline tests over mock adapters.

use std::sync::Arc;
use std::time::Duration;

use selam_core::{ChatTransport, MessageId, Update};
use selam_history::{HistoryLimits, HistoryStore, SystemClock};
use selam_lingua::LanguageBridge;
use selam_processor::{DedupGate, Dispatcher, EngagePolicy, MessageProcessor};
use selam_test_utils::{
    MockProvider, MockTranslator, MockTransport, group_reply_to_bot_update, group_text_update,
    private_text_update,
};
use tokio_util::sync::CancellationToken;

const APOLOGY: &str = "Oops! Something went wrong. \u{1F605}";

struct Harness {
    provider: Arc<MockProvider>,
    transport: Arc<MockTransport>,
    processor: Arc<MessageProcessor>,
}

fn harness_with(provider: MockProvider, translator: MockTranslator) -> Harness {
    let provider = Arc::new(provider);
    let transport = Arc::new(MockTransport::new());
    let history = Arc::new(HistoryStore::new(
        HistoryLimits::default(),
        Arc::new(SystemClock),
    ));
    let bridge = LanguageBridge::new(Arc::new(translator));
    let engage = EngagePolicy::new(
        vec![
            "selam".to_string(),
            "how are you".to_string(),
            "joke".to_string(),
            "fun".to_string(),
            "guys".to_string(),
        ],
        "selam_bot".to_string(),
    );
    let processor = Arc::new(MessageProcessor::new(
        provider.clone(),
        transport.clone(),
        history,
        bridge,
        engage,
        DedupGate::new(64),
        APOLOGY.to_string(),
    ));
    Harness {
        provider,
        transport,
        processor,
    }
}

fn harness() -> Harness {
    harness_with(MockProvider::new(), MockTranslator::identity())
}

async fn process_all(h: &Harness, updates: &[Update]) {
    for update in updates {
        h.processor.process_update(update).await;
    }
}

#[tokio::test]
async fn redelivered_and_stale_updates_are_processed_once() {
    let h = harness();
    let updates = vec![
        private_text_update(5, 7, "hello"),
        private_text_update(5, 7, "hello"),
        private_text_update(3, 7, "older"),
        private_text_update(7, 7, "newest"),
    ];
    process_all(&h, &updates).await;

    assert_eq!(h.provider.call_count(), 2);
    assert_eq!(h.transport.sent_count().await, 2);
}

#[tokio::test]
async fn group_message_without_trigger_gets_no_reply() {
    let h = harness();
    process_all(
        &h,
        &[group_text_update(1, -100, 7, "good morning everyone")],
    )
    .await;

    assert_eq!(h.provider.call_count(), 0);
    assert_eq!(h.transport.sent_count().await, 0);
}

#[tokio::test]
async fn group_message_with_trigger_gets_reply() {
    let h = harness();
    process_all(&h, &[group_text_update(1, -100, 7, "selam everyone!")]).await;

    assert_eq!(h.provider.call_count(), 1);
    assert_eq!(h.transport.sent_count().await, 1);
}

#[tokio::test]
async fn group_reply_to_bot_engages_without_trigger() {
    let h = harness();
    process_all(
        &h,
        &[group_reply_to_bot_update(1, -100, 7, "tell me more")],
    )
    .await;

    assert_eq!(h.provider.call_count(), 1);
}

#[tokio::test]
async fn private_message_flows_through_pipeline() {
    let h = harness_with(
        MockProvider::with_responses(vec!["hi there".to_string()]),
        MockTranslator::identity(),
    );
    process_all(&h, &[private_text_update(10, 7, "hello")]).await;

    let prompts = h.provider.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Our Last Chat(used for to remember): hello"));
    assert!(prompts[0].contains("My new Message: User User7 (@user7, ID: 7): hello"));

    let sent = h.transport.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "hi there");
    assert_eq!(sent[0].reply_to, Some(MessageId(10)));
}

#[tokio::test]
async fn history_accumulates_across_messages() {
    let h = harness();
    process_all(
        &h,
        &[
            private_text_update(1, 7, "hello"),
            private_text_update(2, 7, "what is new"),
        ],
    )
    .await;

    let prompts = h.provider.prompts().await;
    assert!(prompts[1].starts_with("Our Last Chat(used for to remember): hello what is new"));
}

#[tokio::test]
async fn translation_failure_sends_apology_and_advances_cursor() {
    let h = harness_with(MockProvider::new(), MockTranslator::failing());
    // Ge'ez text forces a translation call that the scripted translator fails.
    let update = private_text_update(9, 7, "\u{1230}\u{120B}\u{121D}");

    h.processor.process_update(&update).await;
    let sent = h.transport.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, APOLOGY);
    assert_eq!(sent[0].reply_to, Some(MessageId(9)));
    assert_eq!(h.provider.call_count(), 0);

    // Redelivery of the failed update is suppressed, not retried.
    h.processor.process_update(&update).await;
    assert_eq!(h.transport.sent_count().await, 1);
}

#[tokio::test]
async fn empty_and_non_message_updates_are_ignored() {
    let h = harness();
    let mut no_message = private_text_update(1, 7, "x");
    no_message.message = None;
    process_all(
        &h,
        &[no_message, private_text_update(2, 7, "   ")],
    )
    .await;

    assert_eq!(h.provider.call_count(), 0);
    assert_eq!(h.transport.sent_count().await, 0);
}

#[tokio::test]
async fn buffered_same_user_updates_keep_arrival_order_and_all_get_replies() {
    let h = harness();
    // Buffer a burst up front so recv_update returns ready back to back
    // and the workers are spawned without the loop ever yielding.
    for (id, text) in [(1, "first"), (2, "second"), (3, "third")] {
        h.transport
            .inject_update(private_text_update(id, 7, text))
            .await;
    }

    let transport: Arc<dyn ChatTransport> = h.transport.clone();
    let dispatcher = Arc::new(Dispatcher::new(transport, h.processor.clone()));
    let cancel = CancellationToken::new();
    let run = tokio::spawn({
        let dispatcher = dispatcher.clone();
        let cancel = cancel.clone();
        async move { dispatcher.run(cancel).await }
    });

    for _ in 0..50 {
        if h.transport.sent_count().await == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // Every update in the burst got a reply; none were swallowed by the
    // dedup gate racing ahead of an earlier update.
    let sent = h.transport.sent_messages().await;
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].reply_to, Some(MessageId(1)));
    assert_eq!(sent[1].reply_to, Some(MessageId(2)));
    assert_eq!(sent[2].reply_to, Some(MessageId(3)));

    // The history carried in each prompt proves arrival order held.
    let prompts = h.provider.prompts().await;
    assert!(prompts[0].starts_with("Our Last Chat(used for to remember): first\n"));
    assert!(prompts[1].starts_with("Our Last Chat(used for to remember): first second\n"));
    assert!(prompts[2].starts_with("Our Last Chat(used for to remember): first second third\n"));

    // Once the user has nothing in flight their chain entry is dropped.
    for _ in 0..50 {
        if dispatcher.pending_users() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(dispatcher.pending_users(), 0);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), run)
        .await
        .expect("dispatcher should stop after cancellation")
        .unwrap();
}

#[tokio::test]
async fn dispatcher_processes_injected_updates_and_drains_on_cancel() {
    let h = harness();
    let transport: Arc<dyn ChatTransport> = h.transport.clone();
    let dispatcher = Dispatcher::new(transport, h.processor.clone());
    let cancel = CancellationToken::new();

    let run = tokio::spawn({
        let cancel = cancel.clone();
        async move { dispatcher.run(cancel).await }
    });

    h.transport
        .inject_update(private_text_update(1, 7, "hello"))
        .await;
    h.transport
        .inject_update(private_text_update(2, 8, "hello"))
        .await;

    // Give the workers time to finish both replies.
    for _ in 0..50 {
        if h.transport.sent_count().await == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(h.transport.sent_count().await, 2);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), run)
        .await
        .expect("dispatcher should stop after cancellation")
        .unwrap();
}
