//! Browser shell: mounts the menu / session views into the page and routes
//! navigation between them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, window};

use crate::config::GameConfig;
use crate::vocab::Mode;

mod menu_view;
mod session_view;

pub use menu_view::MenuView;
pub use session_view::SessionView;

pub const ROOT_ID: &str = "py-root";

enum Screen {
    Empty,
    Menu(MenuView),
    Session(SessionView),
}

/// Top-level controller. Owns whichever view is on screen.
pub struct App {
    doc: Document,
    root: Element,
    config: GameConfig,
    screen: Screen,
    me: Weak<RefCell<App>>,
}

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

/// Mount the game into `document.body`, replacing any previous mount.
pub fn mount(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    // Tear the old tree down first so its timers are released.
    let previous = APP.with(|a| a.borrow_mut().take());
    drop(previous);

    let root = doc.create_element("div")?;
    root.set_id(ROOT_ID);
    root.set_attribute("style", "min-height:100vh; background:linear-gradient(#dbeafe,#ffffff); padding:32px; font-family:'Noto Sans SC','Microsoft YaHei',sans-serif;")?;
    body.append_child(&root)?;

    let app = Rc::new_cyclic(|me| {
        RefCell::new(App {
            doc,
            root,
            config,
            screen: Screen::Empty,
            me: me.clone(),
        })
    });
    app.borrow_mut().show_menu()?;
    APP.with(|a| a.replace(Some(app)));
    Ok(())
}

impl App {
    fn show_menu(&mut self) -> Result<(), JsValue> {
        self.screen = Screen::Empty;
        let me = self.me.clone();
        let view = MenuView::new(&self.doc, &self.root, move |mode| {
            if let Some(app) = me.upgrade() {
                if let Err(e) = app.borrow_mut().start_session(mode) {
                    log::error!("failed to start {} session: {:?}", mode.key(), e);
                }
            }
        })?;
        self.screen = Screen::Menu(view);
        Ok(())
    }

    fn start_session(&mut self, mode: Mode) -> Result<(), JsValue> {
        log::info!("starting {} session", mode.key());
        self.screen = Screen::Empty;
        let me = self.me.clone();
        let view = SessionView::new(&self.doc, &self.root, mode, self.config.clone(), move || {
            if let Some(app) = me.upgrade() {
                app.borrow_mut().back_to_menu();
            }
        })?;
        self.screen = Screen::Session(view);
        Ok(())
    }

    fn back_to_menu(&mut self) {
        if let Screen::Session(view) = &self.screen {
            log::info!("back to menu (score {})", view.score());
        }
        if let Err(e) = self.show_menu() {
            log::error!("failed to show menu: {:?}", e);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.screen = Screen::Empty;
        self.root.remove();
    }
}

// --- DOM helpers ------------------------------------------------------------

pub(crate) fn element(doc: &Document, tag: &str, id: &str, style: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !id.is_empty() {
        el.set_id(id);
    }
    el.set_attribute("style", style)?;
    Ok(el)
}

/// An event listener registration. Dropping it unregisters the callback
/// and frees the closure. A listener may be dropped from inside its own
/// callback (the back button does this); wasm-bindgen defers the free until
/// the call returns.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub(crate) fn listen(
    target: &EventTarget,
    event: &'static str,
    f: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(Listener { target: target.clone(), event, closure })
}
