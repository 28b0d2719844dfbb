//! Command bridge between screens and the external backend.
//!
//! The bridge runs a named backend command, publishes exactly one
//! notification about how it went and hands the reply back. Failures are
//! never returned as errors: the caller gets `None` and the user has already
//! been told what went wrong.
//!
//! There is no retry, timeout or cancellation, and concurrent calls are not
//! coordinated. Because the notification channel keeps a single slot, the
//! call that settles last decides what the user sees.

pub mod command;
mod invoker;

pub use command::{
    Analyze, Bundle, BundleFlag, Command, CommandAnalyze, CommandBundle, CommandDefault,
    CommandGetData, CommandResult, Convert, Direction, FileFormat, GetData, Reply, Reset,
    SetBundleFlag, SetData, SetSource, SetVolumeSizes,
};
pub use invoker::{Args, InvokeError, Invoker};

use crate::notify::{Notification, NotificationChannel, NotificationKind, DEFAULT_TIMEOUT};
use serde_json::Value;
use std::time::Duration;

/// Adapts fallible backend calls into notifications plus optional replies.
pub struct Bridge<I> {
    invoker: I,
    notifications: NotificationChannel,
    timeout: Duration,
}

impl<I: Invoker> Bridge<I> {
    pub fn new(invoker: I, notifications: NotificationChannel) -> Self {
        Self {
            invoker,
            notifications,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different display duration for published notifications.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a typed command.
    ///
    /// Returns `None` when the backend failed, the arguments could not be
    /// serialized or the reply did not have the command's shape. In every
    /// case exactly one notification is published.
    pub async fn call<C: Command>(&self, command: &C) -> Option<C::Output> {
        let args = match command.args() {
            Ok(args) => args,
            Err(error) => {
                tracing::error!(command = C::NAME, %error, "failed to serialize arguments");
                self.fail(C::NAME, error.to_string());
                return None;
            }
        };
        self.invoke(C::NAME, args).await
    }

    /// Run a command by name and keep its reply untyped.
    pub async fn invoke_raw(&self, name: &str, args: Args) -> Option<CommandResult> {
        self.invoke(name, args).await
    }

    /// Run a command by name and decode its reply as `R`.
    pub async fn invoke<R: Reply>(&self, name: &str, args: Args) -> Option<R> {
        tracing::debug!(command = name, "invoking backend command");

        let value = match self.invoker.invoke(name, args).await {
            Ok(value) => value,
            Err(error) => {
                self.fail(name, error.message().to_string());
                return None;
            }
        };

        match serde_json::from_value::<R>(value) {
            Ok(reply) => {
                let message = reply.message().unwrap_or_default().to_string();
                tracing::info!(command = name, %message, "backend command succeeded");
                self.publish(NotificationKind::Success, message);
                Some(reply)
            }
            Err(error) => {
                tracing::error!(command = name, %error, "unexpected reply shape");
                self.fail(name, error.to_string());
                None
            }
        }
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    fn fail(&self, name: &str, message: String) {
        tracing::warn!(command = name, %message, "backend command failed");
        self.publish(NotificationKind::Error, message);
    }

    fn publish(&self, kind: NotificationKind, message: String) {
        self.notifications
            .publish(Notification::new(kind, message).with_timeout(self.timeout));
    }
}

/// Replies with fixed values or errors, for wiring screens without a backend.
///
/// Unknown commands fail with `unknown command: <name>`.
#[derive(Clone, Debug, Default)]
pub struct StaticInvoker {
    replies: Vec<(String, Result<Value, InvokeError>)>,
}

impl StaticInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, command: impl Into<String>, value: Value) -> Self {
        self.replies.push((command.into(), Ok(value)));
        self
    }

    pub fn reject(mut self, command: impl Into<String>, error: impl Into<InvokeError>) -> Self {
        self.replies.push((command.into(), Err(error.into())));
        self
    }

    fn lookup(&self, command: &str) -> Result<Value, InvokeError> {
        self.replies
            .iter()
            .find(|(name, _)| name == command)
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Err(InvokeError::new(format!("unknown command: {command}"))))
    }
}

impl Invoker for StaticInvoker {
    async fn invoke(&self, command: &str, _args: Args) -> Result<Value, InvokeError> {
        self.lookup(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bridge(invoker: StaticInvoker) -> Bridge<StaticInvoker> {
        Bridge::new(invoker, NotificationChannel::new())
    }

    #[tokio::test]
    async fn success_returns_reply_and_notifies() {
        let bridge = bridge(StaticInvoker::new().reply("convert", json!({ "message": "done" })));

        let reply = bridge.invoke_raw("convert", Args::new()).await;

        assert_eq!(reply.unwrap().message.as_deref(), Some("done"));
        assert_eq!(bridge.notifications().published(), 1);
        assert_eq!(
            bridge.notifications().latest(),
            Some(Notification::success("done"))
        );
    }

    #[tokio::test]
    async fn failure_returns_none_and_notifies() {
        let bridge = bridge(StaticInvoker::new().reject("convert", "disk full"));

        let reply = bridge.invoke_raw("convert", Args::new()).await;

        assert!(reply.is_none());
        assert_eq!(bridge.notifications().published(), 1);
        assert_eq!(
            bridge.notifications().latest(),
            Some(Notification::error("disk full"))
        );
    }

    #[tokio::test]
    async fn typed_call_decodes_reply() {
        let bridge = bridge(StaticInvoker::new().reply(
            "bundle",
            json!({
                "message": "Bundled 3 chapters",
                "total_chapters": 3,
                "total_volumes": 1,
                "chapter_sizes": [3],
            }),
        ));

        let reply = bridge.call(&Bundle { sensibility: None }).await.unwrap();

        assert_eq!(reply.total_chapters, 3);
        assert_eq!(reply.chapter_sizes, Some(vec![3]));
        assert_eq!(
            bridge.notifications().latest().unwrap().message,
            "Bundled 3 chapters"
        );
    }

    #[tokio::test]
    async fn mismatched_reply_is_a_failure() {
        let bridge = bridge(StaticInvoker::new().reply("analyze", json!({ "message": "ok" })));

        let reply = bridge.call(&Analyze).await;

        assert!(reply.is_none());
        let latest = bridge.notifications().latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Error);
        assert_eq!(bridge.notifications().published(), 1);
    }

    #[tokio::test]
    async fn null_message_is_published_empty() {
        let bridge = bridge(StaticInvoker::new().reply("reset", json!({ "message": null })));

        let reply = bridge.call(&Reset).await;

        assert_eq!(reply, Some(CommandDefault { message: None }));
        assert_eq!(
            bridge.notifications().latest(),
            Some(Notification::success(""))
        );
    }

    #[tokio::test]
    async fn unknown_command_fails() {
        let bridge = bridge(StaticInvoker::new());

        assert!(bridge.call(&GetData).await.is_none());
        assert_eq!(
            bridge.notifications().latest().unwrap().message,
            "unknown command: get_data"
        );
    }

    #[tokio::test]
    async fn custom_timeout_is_used() {
        let bridge = bridge(StaticInvoker::new().reply("reset", json!({ "message": "ok" })))
            .with_timeout(Duration::from_secs(1));

        bridge.call(&Reset).await;

        assert_eq!(
            bridge.notifications().latest().unwrap().timeout,
            Duration::from_secs(1)
        );
    }
}
