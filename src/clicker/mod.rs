//! Ruble Clicker, a single-screen idle clicker.

pub mod actions;
pub mod config;
pub mod error;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use config::ClickerConfig;
use save::SaveStore;
use state::{ClickerState, Purchase};

/// A running session: state, rules, and the store every change is written to.
pub struct ClickerGame {
    pub state: ClickerState,
    pub config: ClickerConfig,
    store: Box<dyn SaveStore>,
}

impl ClickerGame {
    /// Start a session, restoring the stored save when there is one.
    pub fn new(config: ClickerConfig, mut store: Box<dyn SaveStore>, seed: u32) -> Self {
        let mut state = ClickerState::with_seed(seed);
        match save::load_game(store.as_mut()) {
            Some(data) => {
                save::apply_save(&mut state, &config, &data);
                state.add_log("Прогресс загружен", false);
            }
            None => state.add_log("Новая игра. Жми [C]!", false),
        }
        Self {
            state,
            config,
            store,
        }
    }

    fn persist(&mut self) {
        save::save_game(self.store.as_mut(), &self.state);
    }

    pub fn click(&mut self) {
        logic::register_click(&mut self.state, &self.config);
        self.persist();
    }

    /// Attempt a purchase; the outcome is reported in the log either way.
    pub fn buy(&mut self, kind: Purchase) -> bool {
        match logic::purchase(&mut self.state, &self.config, kind) {
            Ok(()) => {
                let msg = match kind {
                    Purchase::Automation => format!(
                        "Автокликер ур. {} ({}/сек)",
                        self.state.automation_level,
                        self.state.automation_rate(&self.config)
                    ),
                    Purchase::ClickBoost => {
                        format!("+₽ за клик: теперь {}", self.state.click_multiplier)
                    }
                    Purchase::DoubleBoost => {
                        format!("X2 клики на {} сек!", self.config.double_boost_secs)
                    }
                    _ => format!("{} куплено!", kind.name()),
                };
                self.state.add_log(&msg, false);
                self.persist();
                true
            }
            Err(e) => {
                log::debug!("purchase {:?} refused: {e}", kind);
                self.state.add_log(&e.to_string(), true);
                false
            }
        }
    }

    /// First call arms, second call wipes the save and starts over.
    pub fn request_reset(&mut self) {
        if !self.state.reset_armed {
            self.state.reset_armed = true;
            self.state
                .add_log("Сбросить весь прогресс? Нажми [R] ещё раз", true);
            return;
        }
        save::delete_save(self.store.as_mut());
        logic::reset(&mut self.state);
        self.state.add_log("Прогресс сброшен", true);
        log::info!("progress reset");
        self.persist();
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let reset_requested = matches!(
            event,
            InputEvent::Key('r') | InputEvent::Click(actions::RESET_PROGRESS)
        );
        if !reset_requested {
            self.state.reset_armed = false;
        }

        match event {
            InputEvent::Key('c') | InputEvent::Key(' ') | InputEvent::Click(actions::CLICK_RUBLE) => {
                self.click();
                true
            }
            InputEvent::Key('v') | InputEvent::Click(actions::SHOW_CARD) => {
                self.state.add_log("Показать карту 💳", false);
                true
            }
            _ if reset_requested => {
                self.request_reset();
                true
            }
            InputEvent::Key(c) => match Purchase::from_key(*c) {
                Some(kind) => {
                    self.buy(kind);
                    true
                }
                None => false,
            },
            InputEvent::Click(id) => {
                let idx = id.wrapping_sub(actions::BUY_BASE) as usize;
                match Purchase::all().get(idx) {
                    Some(&kind) => {
                        self.buy(kind);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Advance timers; writes the save only when automation paid out.
    pub fn tick(&mut self, delta_ticks: u32) {
        if logic::advance(&mut self.state, &self.config, delta_ticks) {
            self.persist();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, &self.config, f, area, click_state);
    }
}
