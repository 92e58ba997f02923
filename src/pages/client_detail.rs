use crate::app::{App, ClientDetailTab};
use crate::common::health::{self, HealthStatus};
use crate::common::utils::{format_mb, format_storage, format_timestamp};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
};

pub fn render_client_detail(app: &mut App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(vec!["Devices", "Appliances"])
        .select(match app.detail_tab {
            ClientDetailTab::Devices => 0,
            ClientDetailTab::Appliances => 1,
        })
        .block(Block::default().borders(Borders::ALL).title("View"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        );
    frame.render_widget(tabs, chunks[0]);

    match app.detail_tab {
        ClientDetailTab::Devices => render_devices(app, frame, chunks[1]),
        ClientDetailTab::Appliances => render_appliances(app, frame, chunks[1]),
    }
}

fn render_devices(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Devices");

    if app.devices_loading {
        frame.render_widget(
            Paragraph::new("Loading devices...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    if let Some(err) = &app.devices_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {}", err))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    if app.devices.is_empty() {
        frame.render_widget(Paragraph::new("No devices found.").block(block), area);
        return;
    }

    let rows: Vec<Row> = app
        .devices
        .iter()
        .map(|device| {
            let status = health::device_status(device);

            let os_name = device
                .os
                .as_ref()
                .and_then(|os| os.os_name.as_deref())
                .unwrap_or("N/A");

            let screenshot = if device
                .latest_autoverify_details
                .as_ref()
                .and_then(|av| av.screenshot_url.as_deref())
                .is_some()
            {
                "'s' to view"
            } else {
                ""
            };

            Row::new(vec![
                Cell::from(device.name.as_deref().unwrap_or("Unknown Device").to_string()),
                Cell::from(device.device_type.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(device.ip_address.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(os_name.to_string()),
                Cell::from(Span::styled(
                    status.label(),
                    Style::default().fg(status.color()),
                )),
                Cell::from(device.latest_local_rp.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(screenshot),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(10),
            Constraint::Percentage(13),
            Constraint::Percentage(18),
            Constraint::Percentage(11),
            Constraint::Percentage(17),
            Constraint::Percentage(11),
        ],
    )
    .header(
        Row::new(vec![
            "Name",
            "Type",
            "IP Address",
            "OS",
            "Health",
            "Latest Local RP",
            "Screenshot",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.devices_table_state);
}

fn render_appliances(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Appliances");

    if app.appliances_loading {
        frame.render_widget(
            Paragraph::new("Loading appliances...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    if let Some(err) = &app.appliances_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {}", err))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    if app.appliances.is_empty() {
        frame.render_widget(Paragraph::new("No appliances found.").block(block), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_appliance_table(app, frame, chunks[0], block);
    render_appliance_detail(app, frame, chunks[1]);
}

fn render_appliance_table(app: &mut App, frame: &mut Frame, area: Rect, block: Block) {
    let rows: Vec<Row> = app
        .appliances
        .iter()
        .map(|appliance| {
            let status = HealthStatus::parse(appliance.health_status.as_deref());

            Row::new(vec![
                Cell::from(
                    appliance
                        .alias
                        .as_deref()
                        .unwrap_or("Unknown Appliance")
                        .to_string(),
                ),
                Cell::from(appliance.product.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(Span::styled(
                    status.label(),
                    Style::default().fg(status.color()),
                )),
                Cell::from(appliance.tunnel_status.as_deref().unwrap_or("N/A").to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Alias", "Product", "Health", "Tunnel"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.appliances_table_state);
}

fn render_appliance_detail(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(appliance) = app.selected_appliance().cloned() else {
        frame.render_widget(
            Paragraph::new("No appliance selected")
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let health = format!(
        "{} ({})",
        appliance.health_status.as_deref().unwrap_or("N/A"),
        appliance.health_status_reason.as_deref().unwrap_or("N/A")
    );
    let storage = appliance
        .storage_details
        .as_ref()
        .map_or("N/A".to_string(), |s| {
            format_storage(s.used_size, s.drive_size)
        });

    let text = vec![
        Line::from(vec![
            Span::styled("IP Address: ", bold),
            Span::raw(appliance.ip_address.as_deref().unwrap_or("N/A").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Service Type: ", bold),
            Span::raw(appliance.service_type.as_deref().unwrap_or("N/A").to_string()),
        ]),
        Line::from(vec![Span::styled("Health: ", bold), Span::raw(health)]),
        Line::from(vec![
            Span::styled("Model: ", bold),
            Span::raw(
                appliance
                    .model
                    .as_ref()
                    .and_then(|m| m.name.as_deref())
                    .unwrap_or("N/A")
                    .to_string(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Software Version: ", bold),
            Span::raw(
                appliance
                    .software_version
                    .as_ref()
                    .and_then(|v| v.version.as_deref())
                    .unwrap_or("N/A")
                    .to_string(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Tunnel Status: ", bold),
            Span::raw(appliance.tunnel_status.as_deref().unwrap_or("N/A").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Last Tunnel Up: ", bold),
            Span::raw(format_timestamp(appliance.last_tunnel_up.as_ref())),
        ]),
        Line::from(vec![Span::styled("Storage: ", bold), Span::raw(storage)]),
    ];

    let title = format!(
        "{} ({})",
        appliance.alias.as_deref().unwrap_or("Unknown Appliance"),
        appliance.product.as_deref().unwrap_or("Unknown Product")
    );
    frame.render_widget(
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    render_associated_devices(&appliance, frame, chunks[1]);
}

fn render_associated_devices(
    appliance: &crate::api::axcient::types::Appliance,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Associated Devices");

    if appliance.devices.is_empty() {
        frame.render_widget(
            Paragraph::new("No devices associated with this appliance.").block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = appliance
        .devices
        .iter()
        .map(|device| {
            Row::new(vec![
                Cell::from(device.name.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(device.device_type.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(device.ip_address.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(device.os.as_deref().unwrap_or("N/A").to_string()),
                Cell::from(format_mb(device.local_usage)),
                Cell::from(device.latest_local_rp.as_deref().unwrap_or("N/A").to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(18),
        ],
    )
    .header(
        Row::new(vec![
            "Name",
            "Type",
            "IP Address",
            "OS",
            "Local Usage",
            "Latest Local RP",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);

    frame.render_widget(table, area);
}
