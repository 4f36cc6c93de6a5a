mod clicker;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use clicker::config::ClickerConfig;
use clicker::save::SaveStore;
use clicker::state::seed_from_millis;
use clicker::ClickerGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::SimClock;

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    log::debug!("tap at cell ({col}, {row}), {} targets", cs.targets.len());
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let _ = env_logger::try_init();
}

#[cfg(target_arch = "wasm32")]
fn open_store(config: &ClickerConfig) -> Box<dyn SaveStore> {
    Box::new(clicker::save::LocalStorage::new(config.storage_key))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store(_config: &ClickerConfig) -> Box<dyn SaveStore> {
    Box::new(clicker::save::MemoryStore::new())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let config = ClickerConfig::default();
    let store = open_store(&config);
    let seed = seed_from_millis(js_sys::Date::now());
    let game = Rc::new(RefCell::new(ClickerGame::new(config, store, seed)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(SimClock::new()));
    log::info!("Ruble Clicker starting");

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c.to_ascii_lowercase()));
            }
        }
    });

    terminal.draw_web(move |f| {
        let ticks = clock.borrow_mut().update(now_ms());
        if ticks > 0 {
            game.borrow_mut().tick(ticks);
        }

        let size = f.area();
        {
            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
        }

        game.borrow().render(f, size, &click_state);
    });

    Ok(())
}
