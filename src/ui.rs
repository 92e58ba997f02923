use crate::app::{App, CurrentView};
use crate::pages;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(0)])
        .split(frame.area());

    let status_text = match app.current_view {
        CurrentView::Clients => {
            format!(
                "x360Recover | Clients: {} | 'q': quit, 'j/k': move, 'Enter': devices, 'o': portal, 'v': vaults, 'r': refresh",
                app.clients.len()
            )
        }
        CurrentView::ClientDetail => {
            format!(
                "Devices and Appliances for {} | 'Tab': switch, 'j/k': move, 'o': details, 's': screenshot, 'r': refresh, 'Esc': back",
                app.client_name.as_deref().unwrap_or("Unknown Client")
            )
        }
        CurrentView::Vaults => {
            format!(
                "Vaults: {} | 'j/k': move, 'Enter': load devices, 'r': refresh, 'Esc': back",
                app.vaults.len()
            )
        }
    };

    frame.render_widget(
        Paragraph::new(status_text).block(Block::default().borders(Borders::ALL).title("Status")),
        layout[0],
    );

    match app.current_view {
        CurrentView::Clients => pages::client_list::render_client_list(app, frame, layout[1]),
        CurrentView::ClientDetail => {
            pages::client_detail::render_client_detail(app, frame, layout[1]);
        }
        CurrentView::Vaults => pages::vault_list::render_vault_list(app, frame, layout[1]),
    }
}
