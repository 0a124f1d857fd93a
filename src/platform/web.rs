//! Browser bindings for the frame driver collaborators

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::score_text;
use crate::driver::{FrameScheduler, ScoreDisplay};
use crate::highscores::HighScores;

/// Slot holding the requestAnimationFrame callback. Filled once the driver
/// that the callback drives has been created.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler
pub struct BrowserScheduler {
    callback: FrameCallback,
}

impl BrowserScheduler {
    /// Create a scheduler and the slot its callback must be installed into
    pub fn new() -> (Self, FrameCallback) {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        (
            Self {
                callback: callback.clone(),
            },
            callback,
        )
    }
}

impl FrameScheduler for BrowserScheduler {
    fn request_next_frame(&mut self) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule a frame on");
            return;
        };
        match self.callback.borrow().as_ref() {
            Some(callback) => {
                if window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .is_err()
                {
                    log::error!("requestAnimationFrame failed");
                }
            }
            None => log::warn!("Frame requested before the callback was installed"),
        }
    }
}

/// Writes the score line into `#instructions` and records finished runs on
/// the high score board
pub struct DomDisplay {
    element: Option<Element>,
    fps_element: Option<Element>,
    high_scores: HighScores,
    /// The current game over has already been recorded
    recorded: bool,
}

impl DomDisplay {
    pub fn new(document: &Document) -> Self {
        let element = document.get_element_by_id("instructions");
        if element.is_none() {
            log::warn!("No #instructions element - score will not be shown");
        }
        Self {
            element,
            fps_element: document.get_element_by_id("fps"),
            high_scores: HighScores::load(),
            recorded: false,
        }
    }

    /// Update the FPS readout (hidden when `fps` is None)
    pub fn show_fps(&self, fps: Option<u32>) {
        if let Some(el) = &self.fps_element {
            let text = fps.map(|f| format!("{} FPS", f)).unwrap_or_default();
            el.set_text_content(Some(&text));
        }
    }
}

impl ScoreDisplay for DomDisplay {
    fn show_score(&mut self, score: u64, is_game_over: bool) {
        if is_game_over && !self.recorded {
            self.recorded = true;
            if let Some(rank) = self.high_scores.add_score(score, js_sys::Date::now()) {
                log::info!("New high score #{}: {}", rank, score);
                self.high_scores.save();
            }
        } else if !is_game_over {
            self.recorded = false;
        }

        let text = score_text(score, is_game_over, self.high_scores.top_score());
        if let Some(el) = &self.element {
            el.set_text_content(Some(&text));
        }
    }
}
