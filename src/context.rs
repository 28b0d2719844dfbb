//! Application context passed to screens and handlers.
//!
//! Everything that would otherwise be a global (settings, the notification
//! slot, the backend bridge) lives here and is handed out explicitly.

use crate::bridge::{Bridge, Invoker};
use crate::ident::IdGenerator;
use crate::notify::NotificationChannel;
use crate::settings::{SettingsStorage, SettingsStore};

pub struct AppContext<I, B> {
    settings: SettingsStore<B>,
    notifications: NotificationChannel,
    bridge: Bridge<I>,
    ids: IdGenerator,
}

impl<I: Invoker, B: SettingsStorage> AppContext<I, B> {
    /// Open settings from `storage` and wire the bridge to a fresh
    /// notification slot.
    pub fn new(invoker: I, storage: B) -> Self {
        let notifications = NotificationChannel::new();
        Self {
            settings: SettingsStore::open(storage),
            bridge: Bridge::new(invoker, notifications.clone()),
            notifications,
            ids: IdGenerator::new("popup"),
        }
    }

    pub fn settings(&self) -> &SettingsStore<B> {
        &self.settings
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn bridge(&self) -> &Bridge<I> {
        &self.bridge
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{Reset, StaticInvoker};
    use crate::settings::{MemoryStorage, Theme};
    use serde_json::json;

    #[tokio::test]
    async fn bridge_publishes_into_context_slot() {
        let context = AppContext::new(
            StaticInvoker::new().reply("reset", json!({ "message": "Reset" })),
            MemoryStorage::new(),
        );

        context.bridge().call(&Reset).await;

        assert_eq!(context.notifications().latest().unwrap().message, "Reset");
    }

    #[test]
    fn settings_are_opened_from_storage() {
        let storage = MemoryStorage::new().with(
            crate::settings::SETTINGS_KEY,
            json!({
                "theme": "Light",
                "paths": { "converted": null },
                "popups": { "help": true, "info": true },
            })
            .to_string(),
        );
        let context = AppContext::new(StaticInvoker::new(), storage);

        assert_eq!(context.settings().get().theme, Theme::Light);
        assert_eq!(context.ids().next_id(), "popup-1");
    }
}
