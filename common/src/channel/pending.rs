use crate::channel::PushError;
use crate::messages::ChannelError;
use futures::channel::oneshot;
use futures::future::{self, Either};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Ok(Value),
    Error(Value),
}

pub type ReplyReceiver = oneshot::Receiver<Reply>;

// Requests waiting for a `phx_reply`, keyed by message ref
#[derive(Debug, Default)]
pub struct PendingReplies {
    waiting: HashMap<String, oneshot::Sender<Reply>>,
}

impl PendingReplies {
    pub fn register(&mut self, msg_ref: String) -> ReplyReceiver {
        self.prune();
        let (tx, rx) = oneshot::channel();
        self.waiting.insert(msg_ref, tx);
        rx
    }

    // Returns false if nobody was waiting on this ref anymore
    pub fn resolve(&mut self, msg_ref: &str, reply: Reply) -> bool {
        match self.waiting.remove(msg_ref) {
            Some(tx) => tx.send(reply).is_ok(),
            None => {
                debug!("reply for unknown or expired ref {}", msg_ref);
                false
            }
        }
    }

    // Dropping the senders wakes every waiter with a disconnect
    pub fn fail_all(&mut self) {
        self.waiting.clear();
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    // Waiters that timed out dropped their receivers
    fn prune(&mut self) {
        self.waiting.retain(|_, tx| !tx.is_canceled());
    }
}

// Resolves with the reply, or fails once `timeout` completes first. The
// timer is supplied by the caller so the same logic runs in the browser and
// under test.
pub async fn await_reply<F>(rx: ReplyReceiver, timeout: F) -> Result<Value, PushError>
where
    F: Future<Output = ()>,
{
    futures::pin_mut!(timeout);
    match future::select(rx, timeout).await {
        Either::Left((Ok(Reply::Ok(response)), _)) => Ok(response),
        Either::Left((Ok(Reply::Error(response)), _)) => {
            Err(PushError::Rejected(ChannelError::from_payload(response)))
        }
        Either::Left((Err(oneshot::Canceled), _)) => Err(PushError::Disconnected),
        Either::Right(_) => Err(PushError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_reply_before_timeout() {
        let mut pending = PendingReplies::default();
        let rx = pending.register("3".to_string());
        assert!(pending.resolve("3", Reply::Ok(json!({"ok": true}))));
        let result = await_reply(rx, sleep(Duration::from_secs(10))).await;
        assert_eq!(result.unwrap(), json!({"ok": true}));
        assert!(pending.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_reply_rejects() {
        let mut pending = PendingReplies::default();
        let rx = pending.register("4".to_string());
        pending.resolve("4", Reply::Error(json!({"reason": "must_discard", "hand_size": 8})));
        match await_reply(rx, sleep(Duration::from_secs(10))).await {
            Err(PushError::Rejected(err)) => assert_eq!(err.discard_required(), Some(1)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let mut pending = PendingReplies::default();
        let rx = pending.register("5".to_string());
        let result = await_reply(rx, sleep(Duration::from_secs(10))).await;
        assert!(matches!(result, Err(PushError::Timeout)));
        // A late reply finds nobody waiting
        assert!(!pending.resolve("5", Reply::Ok(Value::Null)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_fails_waiters() {
        let mut pending = PendingReplies::default();
        let rx = pending.register("6".to_string());
        pending.fail_all();
        let result = await_reply(rx, sleep(Duration::from_secs(10))).await;
        assert!(matches!(result, Err(PushError::Disconnected)));
    }

    #[test]
    fn test_register_prunes_abandoned_waiters() {
        let mut pending = PendingReplies::default();
        let abandoned = pending.register("1".to_string());
        drop(abandoned);
        let _kept = pending.register("2".to_string());
        assert_eq!(pending.len(), 1);
    }
}
