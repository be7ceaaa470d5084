use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod actions;
mod api;
mod async_actions;
mod config;
mod logger;
mod state;
mod views;

use actions::{user_click_increment_button, user_click_increment_button_with_number};
use async_actions::{
    initialize_application, user_click_delay_decrement_button,
    user_click_delay_decrement_button_with_number,
};
use config::DemoConfig;
use draft_store::{Action, AsyncAction, AsyncDispatch, Store, StoreConfig, Transition};
use state::CounterState;

fn main() -> anyhow::Result<()> {
    let log_file = logger::init();
    log::info!("Starting counter-demo, logging to {}", log_file.display());

    let config = DemoConfig::load();
    let runtime = tokio::runtime::Runtime::new()?;

    let store = Store::with_config(
        CounterState::default(),
        StoreConfig {
            on_state_change: Some(Box::new(log_transition)),
            debug: config.debug_store,
        },
    );

    // Redraw only when a slice the views actually read has changed.
    let dirty = Arc::new(AtomicBool::new(true));
    let _counter_sub = store.subscribe(|s: &CounterState| s.counter, mark_dirty(&dirty));
    let _loading_sub = store.subscribe(|s: &CounterState| s.is_loading, mark_dirty(&dirty));
    let _init_sub = store.subscribe(|s: &CounterState| s.is_initializing, mark_dirty(&dirty));

    // Fetch the default counter value in the background.
    let async_dispatch = store.async_dispatcher();
    spawn_async_action(
        &runtime,
        &async_dispatch,
        initialize_application(config.api.clone()),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &store,
        &runtime,
        &async_dispatch,
        &config,
        &dirty,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {err}");
    }

    log::info!("Exiting counter-demo");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &Store<CounterState>,
    runtime: &tokio::runtime::Runtime,
    async_dispatch: &AsyncDispatch<CounterState>,
    config: &DemoConfig,
    dirty: &Arc<AtomicBool>,
) -> anyhow::Result<()> {
    loop {
        // Render only when a subscribed slice changed since the last frame
        if dirty.swap(false, Ordering::SeqCst) {
            let state = store.state();
            terminal.draw(|frame| views::render(&state, frame))?;
        }

        if !event::poll(Duration::from_millis(config.tick_rate_ms))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('+') | KeyCode::Char('i') => {
                    dispatch_or_log(store, user_click_increment_button());
                }
                KeyCode::Char('2') => {
                    dispatch_or_log(store, user_click_increment_button_with_number(2));
                }
                KeyCode::Char('-') | KeyCode::Char('d') => {
                    spawn_async_action(runtime, async_dispatch, user_click_delay_decrement_button());
                }
                KeyCode::Char('3') => {
                    spawn_async_action(
                        runtime,
                        async_dispatch,
                        user_click_delay_decrement_button_with_number(3, config.api.clone()),
                    );
                }
                _ => {}
            },
            Event::Resize(_, _) => dirty.store(true, Ordering::SeqCst),
            _ => {}
        }
    }

    Ok(())
}

/// Listener that flags the UI for a redraw, whatever the derived value.
fn mark_dirty<V>(dirty: &Arc<AtomicBool>) -> impl FnMut(&V) + Send + 'static {
    let dirty = Arc::clone(dirty);
    move |_| dirty.store(true, Ordering::SeqCst)
}

fn dispatch_or_log(store: &Store<CounterState>, action: Action<CounterState>) {
    if let Err(e) = store.dispatch(action) {
        log::error!("Dispatch failed: {e:#}");
    }
}

fn spawn_async_action(
    runtime: &tokio::runtime::Runtime,
    async_dispatch: &AsyncDispatch<CounterState>,
    action: AsyncAction<CounterState>,
) {
    let async_dispatch = async_dispatch.clone();
    runtime.spawn(async move {
        if let Err(e) = async_dispatch.run(action).await {
            log::error!("Async action failed: {e:#}");
        }
    });
}

/// Store hook: render every transition as a state diff into the log file.
fn log_transition(transition: &Transition<CounterState>) {
    let name = if transition.action_name.is_empty() {
        "(anonymous)"
    } else {
        transition.action_name.as_str()
    };

    match state_diff::diff_state(&*transition.old_state, &*transition.new_state, None) {
        Ok(diff) if diff.has_changes() => log::debug!("Action: {name}\n{diff}"),
        Ok(_) => log::debug!("Action: {name} (no state change)"),
        Err(e) => log::error!("Failed to diff state transition: {e}"),
    }
}
