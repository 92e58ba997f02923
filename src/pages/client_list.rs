use crate::app::App;
use crate::common::health::{self, HealthStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn render_client_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Clients");

    if app.clients_loading {
        frame.render_widget(
            Paragraph::new("Loading clients...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    if let Some(err) = &app.clients_error {
        frame.render_widget(
            Paragraph::new(format!("Error: {}", err))
                .style(Style::default().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    if app.clients.is_empty() {
        frame.render_widget(Paragraph::new("No clients found.").block(block), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_status_counts(app, frame, chunks[0]);
    render_roster(app, frame, chunks[1], block);
}

fn render_status_counts(app: &App, frame: &mut Frame, area: Rect) {
    let groups = health::group_clients_by_health(&app.clients);

    let line = Line::from(vec![
        Span::raw(format!("Total Clients: {}", app.clients.len())),
        Span::raw("    Troubled: "),
        Span::styled(
            groups.troubled.len().to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    Warned: "),
        Span::styled(
            groups.warned.len().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    Healthy: "),
        Span::styled(
            groups.healthy.len().to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Summary")),
        area,
    );
}

fn render_roster(app: &mut App, frame: &mut Frame, area: Rect, block: Block) {
    let rows: Vec<Row> = app
        .grouped_roster()
        .iter()
        .map(|client| {
            let status = HealthStatus::parse(client.health_status.as_deref());
            let counts = health::calculate_device_counts(client.devices_counters.as_ref());

            Row::new(vec![
                Cell::from(client.name.as_deref().unwrap_or("Unknown Client").to_string()),
                Cell::from(Span::styled(
                    status.label(),
                    Style::default().fg(status.color()),
                )),
                Cell::from(counts.total.to_string()),
                Cell::from(counts.appliance.to_string()),
                Cell::from(counts.d2c.to_string()),
                Cell::from(counts.cloud_archive.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(34),
            Constraint::Percentage(14),
            Constraint::Percentage(13),
            Constraint::Percentage(13),
            Constraint::Percentage(13),
            Constraint::Percentage(13),
        ],
    )
    .header(
        Row::new(vec![
            "Client",
            "Health",
            "Total Devices",
            "Appliance",
            "D2C",
            "Cloud Archive",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.clients_table_state);
}
