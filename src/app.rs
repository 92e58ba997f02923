use crate::api::axcient::AxcientClient;
use crate::api::axcient::clients::ClientsApi;
use crate::api::axcient::devices::DevicesApi;
use crate::api::axcient::types::{Appliance, Client, Device, Vault, VaultDevice};
use crate::api::axcient::vaults::VaultsApi;
use crate::common::health::{self, sort_devices};
use crate::common::utils::open_browser;
use crate::event::{Event, EventHandler};
use crate::tui::Tui;
use crate::ui;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, PartialEq)]
pub enum CurrentView {
    Clients,
    ClientDetail,
    Vaults,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientDetailTab {
    Devices,
    Appliances,
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub client: Option<AxcientClient>,
    pub current_view: CurrentView,
    // Bumped on every screen entry, parameter change or refresh; completion
    // events carrying an older value are discarded.
    pub generation: u64,

    // Client roster
    pub clients: Vec<Client>,
    pub clients_loading: bool,
    pub clients_error: Option<String>,
    pub clients_table_state: TableState,

    // Devices & appliances for one client
    pub selected_client_id: Option<i64>,
    pub client_name: Option<String>,
    pub detail_tab: ClientDetailTab,
    pub devices: Vec<Device>,
    pub devices_loading: bool,
    pub devices_error: Option<String>,
    pub devices_table_state: TableState,
    pub appliances: Vec<Appliance>,
    pub appliances_loading: bool,
    pub appliances_error: Option<String>,
    pub appliances_table_state: TableState,

    // Vaults
    pub vaults: Vec<Vault>,
    pub vaults_loading: bool,
    pub vaults_error: Option<String>,
    pub vaults_table_state: TableState,
    pub selected_vault_id: Option<i64>,
    pub vault_devices: Vec<VaultDevice>,
    pub vault_devices_loading: bool,
    pub vault_devices_error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            should_quit: false,
            client: None,
            current_view: CurrentView::Clients,
            generation: 0,

            clients: Vec::new(),
            clients_loading: false,
            clients_error: None,
            clients_table_state: TableState::default(),

            selected_client_id: None,
            client_name: None,
            detail_tab: ClientDetailTab::Devices,
            devices: Vec::new(),
            devices_loading: false,
            devices_error: None,
            devices_table_state: TableState::default(),
            appliances: Vec::new(),
            appliances_loading: false,
            appliances_error: None,
            appliances_table_state: TableState::default(),

            vaults: Vec::new(),
            vaults_loading: false,
            vaults_error: None,
            vaults_table_state: TableState::default(),
            selected_vault_id: None,
            vault_devices: Vec::new(),
            vault_devices_loading: false,
            vault_devices_error: None,
        }
    }
}

impl App {
    pub fn new(client: Option<AxcientClient>) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    pub async fn run(&mut self, tui: &mut Tui, events: &mut EventHandler) -> Result<()> {
        if self.client.is_some() {
            self.enter_clients(events.sender());
        } else {
            self.clients_error = Some("API client not initialized. Check .env config.".to_string());
        }

        while !self.should_quit {
            tui.draw(|f| {
                ui::render(self, f);
            })?;

            match events.next().await? {
                Event::Tick => {}
                Event::Key(key) => self.handle_key_event(key, events.sender()),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                Event::ClientsFetched(generation, result) => {
                    self.on_clients_fetched(generation, result);
                }
                Event::ClientFetched(generation, result) => {
                    self.on_client_fetched(generation, result);
                }
                Event::ClientDevicesFetched(generation, result) => {
                    self.on_client_devices_fetched(generation, result);
                }
                Event::AppliancesFetched(generation, result) => {
                    self.on_appliances_fetched(generation, result);
                }
                Event::VaultsFetched(generation, result) => {
                    self.on_vaults_fetched(generation, result);
                }
                Event::VaultDevicesFetched(generation, vault_id, result) => {
                    self.on_vault_devices_fetched(generation, vault_id, result);
                }
            }
        }
        Ok(())
    }

    /// Roster rows in display order: troubled, then warned, then healthy.
    /// Clients outside those three groups are not shown. Key handling and
    /// rendering both go through this so the selection index always points
    /// at the row on screen.
    pub fn grouped_roster(&self) -> Vec<&Client> {
        let groups = health::group_clients_by_health(&self.clients);
        let mut roster = groups.troubled;
        roster.extend(groups.warned);
        roster.extend(groups.healthy);
        roster
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    // --- Screen entry / fetch dispatch ---

    pub fn enter_clients(&mut self, tx: UnboundedSender<Event>) {
        self.current_view = CurrentView::Clients;
        self.selected_client_id = None;
        let generation = self.bump_generation();

        let Some(client) = self.client.clone() else {
            return;
        };
        self.clients_loading = true;
        self.clients_error = None;
        self.clients = Vec::new();
        self.clients_table_state.select(None);
        tokio::spawn(async move {
            let result = client.get_clients().await.map_err(|e| e.to_string());
            let _ = tx.send(Event::ClientsFetched(generation, result));
        });
    }

    pub fn enter_client_detail(&mut self, client_id: i64, tx: UnboundedSender<Event>) {
        self.current_view = CurrentView::ClientDetail;
        self.detail_tab = ClientDetailTab::Devices;
        self.selected_client_id = Some(client_id);
        self.client_name = None;
        let generation = self.bump_generation();

        let Some(client) = self.client.clone() else {
            return;
        };

        self.devices_loading = true;
        self.devices_error = None;
        self.devices = Vec::new();
        self.devices_table_state.select(None);

        self.appliances_loading = true;
        self.appliances_error = None;
        self.appliances = Vec::new();
        self.appliances_table_state.select(None);

        // Three independent fetches; the view renders whatever has landed.
        let meta_client = client.clone();
        let meta_tx = tx.clone();
        tokio::spawn(async move {
            let result = meta_client
                .get_client(client_id)
                .await
                .map_err(|e| e.to_string());
            let _ = meta_tx.send(Event::ClientFetched(generation, result));
        });

        let devices_client = client.clone();
        let devices_tx = tx.clone();
        tokio::spawn(async move {
            let result = devices_client
                .get_client_devices(client_id)
                .await
                .map_err(|e| e.to_string());
            let _ = devices_tx.send(Event::ClientDevicesFetched(generation, result));
        });

        tokio::spawn(async move {
            let result = client
                .get_client_appliances(client_id)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(Event::AppliancesFetched(generation, result));
        });
    }

    pub fn enter_vaults(&mut self, tx: UnboundedSender<Event>) {
        self.current_view = CurrentView::Vaults;
        self.selected_vault_id = None;
        self.vault_devices = Vec::new();
        self.vault_devices_error = None;
        self.vault_devices_loading = false;
        let generation = self.bump_generation();

        let Some(client) = self.client.clone() else {
            return;
        };
        self.vaults_loading = true;
        self.vaults_error = None;
        self.vaults = Vec::new();
        self.vaults_table_state.select(None);
        tokio::spawn(async move {
            let result = client.get_vaults().await.map_err(|e| e.to_string());
            let _ = tx.send(Event::VaultsFetched(generation, result));
        });
    }

    /// Always refetches, even for a vault that was already shown; there is
    /// no device-list cache.
    pub fn select_vault(&mut self, vault_id: i64, tx: UnboundedSender<Event>) {
        self.selected_vault_id = Some(vault_id);
        self.vault_devices = Vec::new();
        self.vault_devices_error = None;
        let generation = self.bump_generation();

        let Some(client) = self.client.clone() else {
            return;
        };
        self.vault_devices_loading = true;
        tokio::spawn(async move {
            let result = client.get_vault(vault_id).await.map_err(|e| e.to_string());
            let _ = tx.send(Event::VaultDevicesFetched(generation, vault_id, result));
        });
    }

    // --- Fetch completion ---

    fn on_clients_fetched(&mut self, generation: u64, result: Result<Vec<Client>, String>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale clients response dropped");
            return;
        }
        self.clients_loading = false;
        match result {
            Ok(clients) => {
                self.clients = clients;
                if self.grouped_roster().is_empty() {
                    self.clients_table_state.select(None);
                } else {
                    self.clients_table_state.select(Some(0));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch clients");
                self.clients_error = Some(e);
            }
        }
    }

    fn on_client_fetched(&mut self, generation: u64, result: Result<Client, String>) {
        if generation != self.generation {
            return;
        }
        match result {
            Ok(client) => self.client_name = client.name,
            Err(e) => {
                // Title falls back to the id; not worth a section error.
                tracing::error!(error = %e, "failed to fetch client metadata");
            }
        }
    }

    fn on_client_devices_fetched(&mut self, generation: u64, result: Result<Vec<Device>, String>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale devices response dropped");
            return;
        }
        self.devices_loading = false;
        match result {
            Ok(devices) => {
                self.devices = sort_devices(devices);
                if self.devices.is_empty() {
                    self.devices_table_state.select(None);
                } else {
                    self.devices_table_state.select(Some(0));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch devices");
                self.devices_error = Some(e);
            }
        }
    }

    fn on_appliances_fetched(&mut self, generation: u64, result: Result<Vec<Appliance>, String>) {
        if generation != self.generation {
            return;
        }
        self.appliances_loading = false;
        match result {
            Ok(appliances) => {
                self.appliances = appliances;
                if self.appliances.is_empty() {
                    self.appliances_table_state.select(None);
                } else {
                    self.appliances_table_state.select(Some(0));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch appliances");
                self.appliances_error = Some(e);
            }
        }
    }

    fn on_vaults_fetched(&mut self, generation: u64, result: Result<Vec<Vault>, String>) {
        if generation != self.generation {
            return;
        }
        self.vaults_loading = false;
        match result {
            Ok(vaults) => {
                self.vaults = vaults;
                if self.vaults.is_empty() {
                    self.vaults_table_state.select(None);
                } else {
                    self.vaults_table_state.select(Some(0));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch vaults");
                self.vaults_error = Some(e);
            }
        }
    }

    fn on_vault_devices_fetched(
        &mut self,
        generation: u64,
        vault_id: i64,
        result: Result<Vault, String>,
    ) {
        if generation != self.generation || self.selected_vault_id != Some(vault_id) {
            tracing::debug!(vault_id, "stale vault devices response dropped");
            return;
        }
        self.vault_devices_loading = false;
        match result {
            Ok(vault) => self.vault_devices = vault.devices,
            Err(e) => {
                tracing::error!(vault_id, error = %e, "failed to fetch vault devices");
                self.vault_devices_error = Some(e);
            }
        }
    }

    // --- Input ---

    fn handle_key_event(&mut self, key: KeyEvent, tx: UnboundedSender<Event>) {
        match self.current_view {
            CurrentView::Clients => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => {
                    let len = self.grouped_roster().len();
                    select_next(&mut self.clients_table_state, len);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    let len = self.grouped_roster().len();
                    select_prev(&mut self.clients_table_state, len);
                }
                KeyCode::Enter => {
                    if let Some(id) = self.selected_roster_client_id() {
                        self.enter_client_detail(id, tx);
                    }
                }
                KeyCode::Char('o') => {
                    if let Some(id) = self.selected_roster_client_id() {
                        open_browser(&format!("https://my.axcient.net/home/client/{}", id));
                    }
                }
                KeyCode::Char('v') => self.enter_vaults(tx),
                KeyCode::Char('r') => self.enter_clients(tx),
                _ => {}
            },
            CurrentView::ClientDetail => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                    // Going back re-enters the roster, which refetches.
                    self.enter_clients(tx);
                }
                KeyCode::Tab => {
                    self.detail_tab = match self.detail_tab {
                        ClientDetailTab::Devices => ClientDetailTab::Appliances,
                        ClientDetailTab::Appliances => ClientDetailTab::Devices,
                    };
                }
                KeyCode::Char('j') | KeyCode::Down => match self.detail_tab {
                    ClientDetailTab::Devices => {
                        select_next(&mut self.devices_table_state, self.devices.len());
                    }
                    ClientDetailTab::Appliances => {
                        select_next(&mut self.appliances_table_state, self.appliances.len());
                    }
                },
                KeyCode::Char('k') | KeyCode::Up => match self.detail_tab {
                    ClientDetailTab::Devices => {
                        select_prev(&mut self.devices_table_state, self.devices.len());
                    }
                    ClientDetailTab::Appliances => {
                        select_prev(&mut self.appliances_table_state, self.appliances.len());
                    }
                },
                KeyCode::Char('o') | KeyCode::Enter => {
                    if self.detail_tab == ClientDetailTab::Devices {
                        if let Some(url) = self.selected_device().and_then(|d| d.device_details_page_url.clone())
                        {
                            open_browser(&url);
                        }
                    }
                }
                KeyCode::Char('s') => {
                    if self.detail_tab == ClientDetailTab::Devices {
                        let screenshot = self.selected_device().and_then(|d| {
                            d.latest_autoverify_details
                                .as_ref()
                                .and_then(|av| av.screenshot_url.clone())
                        });
                        if let Some(url) = screenshot {
                            open_browser(&url);
                        }
                    }
                }
                KeyCode::Char('r') => {
                    if let Some(id) = self.selected_client_id {
                        self.enter_client_detail(id, tx);
                    }
                }
                _ => {}
            },
            CurrentView::Vaults => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                    self.enter_clients(tx);
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    select_next(&mut self.vaults_table_state, self.vaults.len());
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    select_prev(&mut self.vaults_table_state, self.vaults.len());
                }
                KeyCode::Enter => {
                    let vault_id = self
                        .vaults_table_state
                        .selected()
                        .and_then(|idx| self.vaults.get(idx))
                        .map(|v| v.id);
                    if let Some(id) = vault_id {
                        self.select_vault(id, tx);
                    }
                }
                KeyCode::Char('r') => self.enter_vaults(tx),
                _ => {}
            },
        }
    }

    fn selected_roster_client_id(&self) -> Option<i64> {
        let idx = self.clients_table_state.selected()?;
        self.grouped_roster().get(idx).map(|c| c.id)
    }

    pub fn selected_device(&self) -> Option<&Device> {
        let idx = self.devices_table_state.selected()?;
        self.devices.get(idx)
    }

    pub fn selected_appliance(&self) -> Option<&Appliance> {
        let idx = self.appliances_table_state.selected()?;
        self.appliances.get(idx)
    }

    pub fn selected_vault(&self) -> Option<&Vault> {
        let id = self.selected_vault_id?;
        self.vaults.iter().find(|v| v.id == id)
    }
}

fn select_next(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = match state.selected() {
        Some(i) => {
            if i >= len - 1 {
                0 // Loop back to top
            } else {
                i + 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}

fn select_prev(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = match state.selected() {
        Some(i) => {
            if i == 0 {
                len - 1 // Loop to bottom
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::axcient::types::{DeviceHealth, VaultDevice};

    fn test_client(id: i64, status: &str) -> Client {
        Client {
            id,
            name: Some(format!("client-{id}")),
            health_status: Some(status.to_string()),
            devices_counters: None,
        }
    }

    fn test_device(id: i64, status: &str) -> Device {
        Device {
            id,
            name: None,
            device_type: None,
            ip_address: None,
            os: None,
            current_health_status: Some(DeviceHealth {
                status: Some(status.to_string()),
            }),
            latest_local_rp: None,
            latest_autoverify_details: None,
            device_details_page_url: None,
        }
    }

    fn test_vault(id: i64, devices: Vec<VaultDevice>) -> Vault {
        Vault {
            id,
            name: Some(format!("vault-{id}")),
            vault_type: None,
            ip_address: None,
            health_status: None,
            health_status_reason: None,
            model: None,
            software_version: None,
            tunnel_status: None,
            last_tunnel_up: None,
            storage_details: None,
            devices,
        }
    }

    fn test_vault_device(id: i64) -> VaultDevice {
        VaultDevice {
            id,
            name: None,
            device_type: None,
            client: None,
            ip_address: None,
            os: None,
            local_usage: None,
            vault_usage: None,
            bytes_replicated: None,
            latest_vault_rp: None,
        }
    }

    #[test]
    fn fetch_failure_leaves_roster_empty_with_error() {
        let mut app = App::new(None);
        app.generation = 1;
        app.clients_loading = true;

        app.on_clients_fetched(1, Err("server returned 500 Internal Server Error".to_string()));

        assert!(app.clients.is_empty());
        assert!(app.grouped_roster().is_empty());
        assert!(!app.clients_loading);
        assert!(app.clients_error.is_some());
    }

    #[test]
    fn stale_generation_response_is_discarded() {
        let mut app = App::new(None);
        app.generation = 3;

        app.on_clients_fetched(2, Ok(vec![test_client(1, "NORMAL")]));

        assert!(app.clients.is_empty());
        assert!(app.clients_error.is_none());
    }

    #[test]
    fn devices_are_sorted_before_being_stored() {
        let mut app = App::new(None);
        app.generation = 1;
        app.devices_loading = true;

        app.on_client_devices_fetched(
            1,
            Ok(vec![
                test_device(1, "WARNED"),
                test_device(2, "TROUBLED"),
                test_device(3, "NORMAL"),
                test_device(4, "PARKED"),
                test_device(5, "RETIRED"),
            ]),
        );

        let ids: Vec<i64> = app.devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
        assert_eq!(app.devices_table_state.selected(), Some(0));
    }

    #[test]
    fn grouped_roster_orders_troubled_warned_healthy() {
        let mut app = App::new(None);
        app.clients = vec![
            test_client(1, "NORMAL"),
            test_client(2, "WARNED"),
            test_client(3, "TROUBLED"),
            test_client(4, "SUSPENDED"),
        ];

        let ids: Vec<i64> = app.grouped_roster().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn selecting_a_second_vault_replaces_the_first_ones_devices() {
        let mut app = App::new(None);
        app.generation = 1;
        app.selected_vault_id = Some(1);
        app.on_vault_devices_fetched(1, 1, Ok(test_vault(1, vec![test_vault_device(100)])));
        assert_eq!(app.vault_devices.len(), 1);

        // User picks vault 2; the dispatch path clears state and bumps the
        // generation, mirrored here.
        app.selected_vault_id = Some(2);
        app.vault_devices = Vec::new();
        app.generation = 2;
        app.on_vault_devices_fetched(
            2,
            2,
            Ok(test_vault(2, vec![test_vault_device(200), test_vault_device(201)])),
        );

        let ids: Vec<i64> = app.vault_devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![200, 201]);
    }

    #[test]
    fn vault_devices_for_a_superseded_selection_are_dropped() {
        let mut app = App::new(None);
        app.generation = 2;
        app.selected_vault_id = Some(2);

        // Late response for vault 1, dispatched at generation 1.
        app.on_vault_devices_fetched(1, 1, Ok(test_vault(1, vec![test_vault_device(100)])));

        assert!(app.vault_devices.is_empty());
    }

    #[test]
    fn selection_helpers_wrap_around() {
        let mut state = TableState::default();
        select_next(&mut state, 2);
        assert_eq!(state.selected(), Some(0));
        select_next(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
        select_next(&mut state, 2);
        assert_eq!(state.selected(), Some(0));
        select_prev(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
    }
}
