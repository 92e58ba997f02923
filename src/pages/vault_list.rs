use crate::app::App;
use crate::common::health::HealthStatus;
use crate::common::utils::{format_kb, format_mb, format_storage};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn render_vault_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_vaults(app, frame, chunks[0]);
    render_vault_devices(app, frame, chunks[1]);
}

fn render_vaults(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Vaults");

    if app.vaults_loading {
        frame.render_widget(
            Paragraph::new("Loading vaults...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    if let Some(err) = &app.vaults_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {}", err))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    if app.vaults.is_empty() {
        frame.render_widget(Paragraph::new("No vaults found.").block(block), area);
        return;
    }

    let rows: Vec<Row> = app
        .vaults
        .iter()
        .map(|vault| {
            let status = HealthStatus::parse(vault.health_status.as_deref());
            let storage = vault
                .storage_details
                .as_ref()
                .map_or("N/A".to_string(), |s| {
                    format_storage(s.used_size, s.drive_size)
                });

            Row::new(vec![
                Cell::from(vault.name.as_deref().unwrap_or("Unknown Vault").to_string()),
                Cell::from(vault.vault_type.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(Span::styled(
                    status.label(),
                    Style::default().fg(status.color()),
                )),
                Cell::from(vault.tunnel_status.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(storage),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(24),
            Constraint::Percentage(12),
            Constraint::Percentage(14),
            Constraint::Percentage(16),
            Constraint::Percentage(34),
        ],
    )
    .header(
        Row::new(vec!["Name", "Type", "Health", "Tunnel", "Storage"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.vaults_table_state);
}

fn render_vault_devices(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = match app.selected_vault() {
        Some(vault) => format!(
            "Devices for Vault {}",
            vault.name.as_deref().unwrap_or("Unknown Vault")
        ),
        None => "Devices".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.selected_vault_id.is_none() {
        frame.render_widget(
            Paragraph::new("Select a vault and press 'Enter' to load its devices.").block(block),
            area,
        );
        return;
    }

    if app.vault_devices_loading {
        frame.render_widget(
            Paragraph::new("Loading devices...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    if let Some(err) = &app.vault_devices_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {}", err))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    if app.vault_devices.is_empty() {
        frame.render_widget(
            Paragraph::new("No devices found for this vault.").block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = app
        .vault_devices
        .iter()
        .map(|device| {
            let client_name = device
                .client
                .as_ref()
                .and_then(|c| c.name.as_deref())
                .unwrap_or("N/A");

            Row::new(vec![
                Cell::from(device.name.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(client_name.to_string()),
                Cell::from(device.device_type.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(device.os.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(format_mb(device.local_usage)),
                Cell::from(format_mb(device.vault_usage)),
                Cell::from(format_kb(device.bytes_replicated)),
                Cell::from(device.latest_vault_rp.as_deref().unwrap_or("N/A").to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(16),
            Constraint::Percentage(14),
            Constraint::Percentage(8),
            Constraint::Percentage(14),
            Constraint::Percentage(11),
            Constraint::Percentage(11),
            Constraint::Percentage(11),
            Constraint::Percentage(15),
        ],
    )
    .header(
        Row::new(vec![
            "Name",
            "Client",
            "Type",
            "OS",
            "Local Usage",
            "Vault Usage",
            "Replicated",
            "Latest Vault RP",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);

    frame.render_widget(table, area);
}
