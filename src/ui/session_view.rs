use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement};

use super::{Listener, element, listen};
use crate::config::GameConfig;
use crate::cue::{AudioCues, CueSink};
use crate::rng::Rng;
use crate::session::{Feedback, InputOutcome, PendingAdvance, Phase, Session, TickOutcome};
use crate::timer::{Interval, Timeout};
use crate::vocab::Mode;

pub const HINT_PLACEHOLDER: &str = "点击显示拼音提示";
pub const INPUT_PLACEHOLDER: &str = "输入拼音...";
pub const CORRECT_TEXT: &str = "正确!";
pub const INCORRECT_TEXT: &str = "不正确，请重试";
pub const BACK_LABEL: &str = "返回";
pub const SKIP_LABEL: &str = "跳过";

const INPUT_BASE: &str = "width:256px; padding:8px 16px; font-size:20px; border-width:2px; border-style:solid; border-radius:8px; outline:none;";

struct SessionDom {
    score: Element,
    clock: Element,
    prompt: Element,
    hint: Element,
    input: HtmlInputElement,
    feedback: Element,
    banner: Element,
}

impl SessionDom {
    fn render(&self, session: &Session<impl CueSink>) {
        let st = session.state();
        self.score.set_text_content(Some(&format!("得分: {}", st.score)));
        self.clock.set_text_content(Some(&format!("时间: {}", session.clock_label())));
        self.prompt.set_text_content(Some(st.current.text));
        self.hint.set_text_content(Some(if st.reveal_transcription {
            st.current.transcription
        } else {
            HINT_PLACEHOLDER
        }));

        // Controlled field: always shows the folded buffer.
        if self.input.value() != st.input {
            self.input.set_value(&st.input);
        }
        self.input.set_disabled(!session.accepts_input());
        let (border, fill) = match st.feedback {
            Feedback::Correct => ("#22c55e", "#f0fdf4"),
            Feedback::Incorrect => ("#ef4444", "#fef2f2"),
            Feedback::None => ("#93c5fd", "#ffffff"),
        };
        self.input
            .set_attribute("style", &format!("{INPUT_BASE} border-color:{border}; background:{fill};"))
            .ok();

        match st.feedback {
            Feedback::Correct => {
                self.feedback.set_text_content(Some(CORRECT_TEXT));
                self.feedback.set_attribute("style", "margin-top:8px; font-weight:700; color:#22c55e;").ok();
            }
            Feedback::Incorrect => {
                self.feedback.set_text_content(Some(INCORRECT_TEXT));
                self.feedback.set_attribute("style", "margin-top:8px; font-weight:700; color:#ef4444;").ok();
            }
            Feedback::None => {
                self.feedback.set_text_content(None);
            }
        }

        if session.phase() == Phase::Expired {
            self.banner.set_text_content(Some(&format!("时间到! 最终得分: {}", st.score)));
        } else {
            self.banner.set_text_content(None);
        }
    }
}

/// State shared between the view and its event callbacks.
struct Live {
    session: Session<AudioCues>,
    dom: SessionDom,
    countdown: Option<Interval>,
    pending: Vec<Timeout>,
}

/// One mounted game session. Dropping it ends the session, releases the
/// countdown and any pending advance, and removes the markup.
pub struct SessionView {
    container: Element,
    live: Rc<RefCell<Live>>,
    _listeners: Vec<Listener>,
}

impl SessionView {
    pub fn new(
        doc: &Document,
        parent: &Element,
        mode: Mode,
        config: GameConfig,
        on_back: impl Fn() + 'static,
    ) -> Result<Self, JsValue> {
        let container = element(doc, "div", "py-session", "max-width:672px; margin:0 auto; background:#fff; border-radius:12px; box-shadow:0 10px 15px rgba(0,0,0,0.1); padding:32px;")?;

        let header = element(doc, "div", "", "display:flex; justify-content:space-between; margin-bottom:24px;")?;
        let score = element(doc, "div", "py-score", "font-size:20px; font-weight:700; color:#2563eb;")?;
        let clock = element(doc, "div", "py-clock", "font-size:20px; font-weight:700; color:#dc2626;")?;
        header.append_child(&score)?;
        header.append_child(&clock)?;

        let center = element(doc, "div", "", "text-align:center; margin-bottom:32px;")?;
        let prompt = element(doc, "div", "py-prompt", "font-size:60px; font-weight:700; margin-bottom:16px;")?;
        let hint = element(doc, "div", "py-hint", "color:#6b7280; margin-bottom:16px; cursor:pointer;")?;
        let input: HtmlInputElement = element(doc, "input", "py-input", INPUT_BASE)?.dyn_into()?;
        input.set_type("text");
        input.set_placeholder(INPUT_PLACEHOLDER);
        input.set_autocomplete("off");
        let feedback = element(doc, "div", "py-feedback", "margin-top:8px; font-weight:700;")?;
        let banner = element(doc, "div", "py-banner", "margin-top:16px; font-size:22px; font-weight:700; color:#dc2626;")?;
        center.append_child(&prompt)?;
        center.append_child(&hint)?;
        center.append_child(&input)?;
        center.append_child(&feedback)?;
        center.append_child(&banner)?;

        let footer = element(doc, "div", "", "display:flex; justify-content:space-between;")?;
        let back = element(doc, "button", "py-back", "background:#6b7280; color:#fff; padding:8px 24px; border:none; border-radius:8px; cursor:pointer;")?;
        back.set_text_content(Some(BACK_LABEL));
        let skip = element(doc, "button", "py-skip", "background:#3b82f6; color:#fff; padding:8px 24px; border:none; border-radius:8px; cursor:pointer;")?;
        skip.set_text_content(Some(SKIP_LABEL));
        footer.append_child(&back)?;
        footer.append_child(&skip)?;

        container.append_child(&header)?;
        container.append_child(&center)?;
        container.append_child(&footer)?;

        let cues = AudioCues::new(&config.correct_sound, &config.incorrect_sound);
        let tick_ms = config.tick_ms;
        let session = Session::new(mode, config, Rng::from_entropy(), cues);
        let dom = SessionDom { score, clock, prompt, hint: hint.clone(), input: input.clone(), feedback, banner };
        dom.render(&session);
        let live = Rc::new(RefCell::new(Live { session, dom, countdown: None, pending: Vec::new() }));

        let mut listeners = Vec::with_capacity(4);
        {
            let weak = Rc::downgrade(&live);
            listeners.push(listen(&input, "input", move |_| on_input(&weak))?);
        }
        {
            let weak = Rc::downgrade(&live);
            listeners.push(listen(&hint, "click", move |_| {
                with_live(&weak, |l| {
                    l.session.reveal_hint();
                    l.dom.render(&l.session);
                })
            })?);
        }
        {
            let weak = Rc::downgrade(&live);
            listeners.push(listen(&skip, "click", move |_| {
                with_live(&weak, |l| {
                    l.session.skip();
                    l.dom.render(&l.session);
                })
            })?);
        }
        listeners.push(listen(&back, "click", move |_| on_back())?);

        let weak = Rc::downgrade(&live);
        let countdown = Interval::new(tick_ms, move || on_tick(&weak))?;
        live.borrow_mut().countdown = Some(countdown);

        // Only show the markup once everything behind it is wired up.
        parent.append_child(&container)?;
        input.focus().ok();
        Ok(Self { container, live, _listeners: listeners })
    }

    pub fn score(&self) -> u32 {
        self.live.borrow().session.state().score
    }
}

impl Drop for SessionView {
    fn drop(&mut self) {
        if let Ok(mut l) = self.live.try_borrow_mut() {
            l.session.end();
            if let Some(countdown) = &l.countdown {
                countdown.cancel();
            }
            l.pending.clear();
        }
        self.container.remove();
    }
}

fn with_live(weak: &Weak<RefCell<Live>>, f: impl FnOnce(&mut Live)) {
    let Some(live) = weak.upgrade() else {
        return;
    };
    let mut guard = live.borrow_mut();
    f(&mut guard);
}

fn on_input(weak: &Weak<RefCell<Live>>) {
    with_live(weak, |l| {
        let text = l.dom.input.value();
        if let InputOutcome::Matched(ticket) = l.session.on_input_changed(&text) {
            l.pending.retain(|t| !t.has_fired());
            let delay = l.session.config().advance_delay_ms;
            let w = weak.clone();
            match Timeout::new(delay, move || on_advance(&w, ticket)) {
                Ok(t) => l.pending.push(t),
                Err(e) => log::warn!("could not schedule next prompt: {:?}", e),
            }
        }
        l.dom.render(&l.session);
    });
}

fn on_advance(weak: &Weak<RefCell<Live>>, ticket: PendingAdvance) {
    with_live(weak, |l| {
        if l.session.complete_advance(ticket) {
            l.dom.render(&l.session);
        }
    });
}

fn on_tick(weak: &Weak<RefCell<Live>>) {
    with_live(weak, |l| {
        match l.session.tick() {
            TickOutcome::Running => {}
            TickOutcome::Expired => {
                log::info!("time up in {} mode, final score {}", l.session.mode().key(), l.session.state().score);
                if let Some(countdown) = &l.countdown {
                    countdown.cancel();
                }
            }
            TickOutcome::Stopped => {
                if let Some(countdown) = &l.countdown {
                    countdown.cancel();
                }
            }
        }
        l.dom.render(&l.session);
    });
}
