use tokio::sync::{mpsc, oneshot};

use hanabi_core::settings::{Settings, SettingsField, SettingsPatch, SettingsStore};
use hanabi_core::storage::Storage;

use crate::RuntimeError;

/// Async handle to the settings store, which lives on its own thread
/// because the SQLite connection cannot be shared across tasks.
#[derive(Clone)]
pub struct SettingsHandle {
    tx: mpsc::UnboundedSender<SettingsCommand>,
}

enum SettingsCommand {
    Update {
        patch: Box<SettingsPatch>,
        reply: oneshot::Sender<Settings>,
    },
    Reset {
        field: SettingsField,
        reply: oneshot::Sender<Settings>,
    },
    WelcomeSeen {
        reply: oneshot::Sender<bool>,
    },
    MarkWelcomeSeen {
        reply: oneshot::Sender<()>,
    },
}

impl SettingsHandle {
    /// Start the actor on an already-opened store.
    pub fn spawn(store: SettingsStore<Storage>) -> Option<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name("settings-actor".into())
            .spawn(move || actor_loop(store, rx))
            .map_err(|e| tracing::error!("Failed to spawn settings thread: {e}"))
            .ok()?;

        Some(Self { tx })
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SettingsCommand,
    ) -> Result<T, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(make(reply));
        rx.await
            .map_err(|_| RuntimeError::Database("settings actor closed".into()))
    }

    pub async fn update(&self, patch: SettingsPatch) -> Result<Settings, RuntimeError> {
        self.request(|reply| SettingsCommand::Update {
            patch: Box::new(patch),
            reply,
        })
        .await
    }

    pub async fn reset(&self, field: SettingsField) -> Result<Settings, RuntimeError> {
        self.request(|reply| SettingsCommand::Reset { field, reply })
            .await
    }

    pub async fn welcome_seen(&self) -> Result<bool, RuntimeError> {
        self.request(|reply| SettingsCommand::WelcomeSeen { reply })
            .await
    }

    pub async fn mark_welcome_seen(&self) -> Result<(), RuntimeError> {
        self.request(|reply| SettingsCommand::MarkWelcomeSeen { reply })
            .await
    }
}

fn actor_loop(mut store: SettingsStore<Storage>, mut rx: mpsc::UnboundedReceiver<SettingsCommand>) {
    while let Some(cmd) = rx.blocking_recv() {
        match cmd {
            SettingsCommand::Update { patch, reply } => {
                let _ = reply.send(store.update(*patch));
            }
            SettingsCommand::Reset { field, reply } => {
                let _ = reply.send(store.reset(field));
            }
            SettingsCommand::WelcomeSeen { reply } => {
                let _ = reply.send(store.welcome_seen());
            }
            SettingsCommand::MarkWelcomeSeen { reply } => {
                store.mark_welcome_seen();
                let _ = reply.send(());
            }
        }
    }
    tracing::debug!("settings actor stopped");
}
