use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::{Listener, element, listen};
use crate::menu::Menu;
use crate::vocab::Mode;

pub const TITLE: &str = "拼音打字游戏";

pub fn card_id(mode: Mode) -> String {
    format!("py-mode-{}", mode.key())
}

fn card_style(mode: Mode) -> &'static str {
    match mode {
        Mode::Beginner => "background:#eff6ff; border-radius:8px; padding:24px; cursor:pointer;",
        Mode::Intermediate => "background:#f0fdf4; border-radius:8px; padding:24px; cursor:pointer;",
    }
}

fn heading_style(mode: Mode) -> &'static str {
    match mode {
        Mode::Beginner => "font-size:20px; font-weight:600; color:#1d4ed8; margin:0 0 8px;",
        Mode::Intermediate => "font-size:20px; font-weight:600; color:#15803d; margin:0 0 8px;",
    }
}

/// Title plus one clickable card per mode.
pub struct MenuView {
    container: Element,
    _listeners: Vec<Listener>,
}

impl MenuView {
    pub fn new(
        doc: &Document,
        parent: &Element,
        on_select: impl Fn(Mode) + 'static,
    ) -> Result<Self, JsValue> {
        let menu = Rc::new(Menu::new(on_select));

        let container = element(doc, "div", "py-menu", "max-width:896px; margin:0 auto; background:#fff; border-radius:12px; box-shadow:0 10px 15px rgba(0,0,0,0.1); padding:32px;")?;
        let title = element(doc, "h1", "", "font-size:30px; font-weight:700; text-align:center; color:#2563eb; margin:0 0 32px;")?;
        title.set_text_content(Some(TITLE));
        container.append_child(&title)?;

        let mut listeners = Vec::with_capacity(Mode::ALL.len());
        let grid = element(doc, "div", "", "display:grid; grid-template-columns:repeat(auto-fit,minmax(240px,1fr)); gap:24px;")?;
        for &mode in menu.options() {
            let card = element(doc, "div", &card_id(mode), card_style(mode))?;
            let h = element(doc, "h2", "", heading_style(mode))?;
            h.set_text_content(Some(mode.title()));
            let p = element(doc, "p", "", "color:#4b5563; margin:0;")?;
            p.set_text_content(Some(mode.blurb()));
            card.append_child(&h)?;
            card.append_child(&p)?;

            let menu = menu.clone();
            listeners.push(listen(&card, "click", move |_| menu.select(mode))?);
            grid.append_child(&card)?;
        }
        container.append_child(&grid)?;
        parent.append_child(&container)?;
        Ok(Self { container, _listeners: listeners })
    }
}

impl Drop for MenuView {
    fn drop(&mut self) {
        self.container.remove();
    }
}
