//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input arrives on one channel and check completions on another.
//! Both are applied to the shared [`App`](crate::core::app::App) in the order
//! they are received, and any change requests a redraw.

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::LanguageToolClient;
use crate::core::app::App;
use crate::core::check::CheckCompletion;
use crate::core::config::CheckSettings;
use crate::ui::renderer::ui;

use super::keybindings::{handle_key_event, handle_paste, KeyResult};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

async fn draw_frame(app: &AppHandle, terminal: &SharedTerminal) -> std::io::Result<()> {
    let mut terminal_guard = terminal.lock().await;
    app.read(|app| terminal_guard.draw(|f| ui(f, app)).map(|_| ()))
        .await
}

struct EventProcessingOutcome {
    request_redraw: bool,
    exit_requested: bool,
}

async fn process_ui_event(app: &AppHandle, ev: UiEvent) -> EventProcessingOutcome {
    let result = match ev {
        UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            app.update(|app| handle_key_event(app, key)).await
        }
        UiEvent::Crossterm(Event::Paste(text)) => {
            app.update(|app| handle_paste(app, &text)).await
        }
        UiEvent::Crossterm(Event::Resize(_, _)) => KeyResult::Handled,
        UiEvent::Crossterm(_) => KeyResult::NotHandled,
    };

    EventProcessingOutcome {
        request_redraw: result != KeyResult::NotHandled,
        exit_requested: result == KeyResult::Exit,
    }
}

async fn run_event_loop(
    app: &AppHandle,
    terminal: &SharedTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    completion_rx: &mut mpsc::UnboundedReceiver<CheckCompletion>,
) -> Result<(), Box<dyn Error>> {
    let mut request_redraw = true;

    loop {
        if app.read(|app| app.ui.exit_requested).await {
            return Ok(());
        }

        if request_redraw {
            draw_frame(app, terminal).await?;
            request_redraw = false;
        }

        tokio::select! {
            Some(ev) = event_rx.recv() => {
                let outcome = process_ui_event(app, ev).await;
                if outcome.exit_requested {
                    app.update(|app| app.ui.exit_requested = true).await;
                }
                request_redraw |= outcome.request_redraw;
            }
            Some(completion) = completion_rx.recv() => {
                debug!(ticket = completion.ticket_id, "check completion received");
                request_redraw |= app.update(|app| app.apply_completion(completion)).await;
            }
            else => return Ok(()),
        }
    }
}

pub async fn run_tui(settings: CheckSettings) -> Result<(), Box<dyn Error>> {
    let service = LanguageToolClient::new(&settings.api_url, &settings.language)?;
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<CheckCompletion>();
    let app = AppHandle::new(App::new(
        Arc::new(service),
        completion_tx,
        settings.language.clone(),
    ));
    info!(
        api_url = %settings.api_url,
        language = %settings.language,
        "starting interactive session"
    );

    let terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result = run_event_loop(&app, &terminal, &mut event_rx, &mut completion_rx).await;

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    info!("interactive session ended");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{create_test_app, MockApiServer};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[tokio::test]
    async fn key_and_completion_events_flow_through_the_handle() {
        let server = MockApiServer::respond_with(
            200,
            r#"{"matches":[{"message":"Grammatical error","replacements":[{"value":"doesn't"}]}]}"#,
        )
        .await;
        let (app, mut completion_rx) = create_test_app(Arc::new(server.client()));
        let app = AppHandle::new(app);

        let outcome = process_ui_event(
            &app,
            UiEvent::Crossterm(Event::Paste("She dont like it.".to_string())),
        )
        .await;
        assert!(outcome.request_redraw);

        let check = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        process_ui_event(&app, UiEvent::Crossterm(Event::Key(check))).await;
        assert!(app.read(|app| app.check.is_busy()).await);

        let completion = completion_rx.recv().await.expect("completion");
        assert!(app.update(|app| app.apply_completion(completion)).await);
        let messages = app
            .read(|app| {
                app.check
                    .suggestions()
                    .iter()
                    .map(|s| s.message.clone())
                    .collect::<Vec<_>>()
            })
            .await;
        assert_eq!(messages, vec!["Grammatical error".to_string()]);
    }

    #[tokio::test]
    async fn ctrl_c_requests_exit() {
        let server = MockApiServer::respond_with(200, "{}").await;
        let (app, _rx) = create_test_app(Arc::new(server.client()));
        let app = AppHandle::new(app);

        let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let outcome = process_ui_event(&app, UiEvent::Crossterm(Event::Key(quit))).await;
        assert!(outcome.exit_requested);
    }
}
