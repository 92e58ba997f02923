use crate::api::axcient::types::{Appliance, Client, Device, Vault};
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

/// Fetch-completion variants carry the generation counter captured when the
/// fetch was dispatched; the app drops any completion whose generation no
/// longer matches, so a superseded screen's late response never lands on
/// current state. Errors cross the channel as strings to keep the event
/// type Clone.
#[derive(Clone, Debug)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    ClientsFetched(u64, Result<Vec<Client>, String>),
    ClientFetched(u64, Result<Client, String>),
    ClientDevicesFetched(u64, Result<Vec<Device>, String>),
    AppliancesFetched(u64, Result<Vec<Appliance>, String>),
    VaultsFetched(u64, Result<Vec<Vault>, String>),
    VaultDevicesFetched(u64, i64, Result<Vault, String>), // (generation, vault id, result)
}

#[derive(Debug)]
pub struct EventHandler {
    _tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: std::time::Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _tx = tx.clone();
        let task_tx = tx.clone();
        let _task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                let tick_delay = interval.tick();
                let crossterm_event = reader.next().fuse();
                tokio::select! {
                    _ = tick_delay => {
                        if task_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        let forwarded = match evt {
                            CrosstermEvent::Key(key) => {
                                if key.kind == crossterm::event::KeyEventKind::Press {
                                    task_tx.send(Event::Key(key))
                                } else {
                                    Ok(())
                                }
                            }
                            CrosstermEvent::Mouse(mouse) => task_tx.send(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => task_tx.send(Event::Resize(w, h)),
                            _ => Ok(()),
                        };
                        if forwarded.is_err() {
                            break;
                        }
                    }
                };
            }
        });
        Self { _tx, rx, _task }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self._tx.clone()
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Unable to get event"))
    }
}
