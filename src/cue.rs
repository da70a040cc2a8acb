//! Outcome sound cues. The session only ever notifies; it never learns
//! whether a cue actually played.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Incorrect,
}

/// Fire-and-forget sink for outcome cues.
pub trait CueSink {
    fn notify(&self, cue: Cue);
}

impl<T: CueSink + ?Sized> CueSink for Rc<T> {
    fn notify(&self, cue: Cue) {
        (**self).notify(cue)
    }
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn notify(&self, cue: Cue) {
        (**self).notify(cue)
    }
}

/// Silent sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCues;

impl CueSink for NullCues {
    fn notify(&self, _cue: Cue) {}
}

/// Plays a short clip per outcome through `<audio>`. Autoplay refusals,
/// missing files and decode errors are all dropped on the floor.
pub struct AudioCues {
    correct_src: String,
    incorrect_src: String,
    // Shared rejection handler so each play() doesn't leak a closure.
    swallow: Closure<dyn FnMut(JsValue)>,
}

impl AudioCues {
    pub fn new(correct_src: &str, incorrect_src: &str) -> Self {
        Self {
            correct_src: correct_src.to_string(),
            incorrect_src: incorrect_src.to_string(),
            swallow: Closure::wrap(Box::new(|_err: JsValue| {}) as Box<dyn FnMut(JsValue)>),
        }
    }

    fn src(&self, cue: Cue) -> &str {
        match cue {
            Cue::Correct => &self.correct_src,
            Cue::Incorrect => &self.incorrect_src,
        }
    }
}

impl CueSink for AudioCues {
    fn notify(&self, cue: Cue) {
        let Ok(audio) = HtmlAudioElement::new_with_src(self.src(cue)) else {
            return;
        };
        let played: Result<Promise, JsValue> = audio.play();
        if let Ok(promise) = played {
            let _ = promise.catch(&self.swallow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Cue>>);

    impl CueSink for Recorder {
        fn notify(&self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    #[test]
    fn rc_forwards_to_inner_sink() {
        let rec = Rc::new(Recorder::default());
        let sink: Box<dyn CueSink> = Box::new(rec.clone());
        sink.notify(Cue::Correct);
        sink.notify(Cue::Incorrect);
        NullCues.notify(Cue::Correct);
        assert_eq!(*rec.0.borrow(), vec![Cue::Correct, Cue::Incorrect]);
    }
}
