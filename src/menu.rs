//! Mode selection. Stateless apart from the callback it hands the choice to.

use crate::vocab::Mode;

pub struct Menu<F: Fn(Mode)> {
    on_select: F,
}

impl<F: Fn(Mode)> Menu<F> {
    pub fn new(on_select: F) -> Self {
        Self { on_select }
    }

    pub fn options(&self) -> &'static [Mode] {
        &Mode::ALL
    }

    pub fn select(&self, mode: Mode) {
        (self.on_select)(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn offers_both_modes_in_order() {
        let menu = Menu::new(|_| {});
        assert_eq!(menu.options(), &[Mode::Beginner, Mode::Intermediate]);
    }

    #[test]
    fn select_invokes_callback_once() {
        let picked = RefCell::new(Vec::new());
        let menu = Menu::new(|m| picked.borrow_mut().push(m));
        menu.select(Mode::Intermediate);
        assert_eq!(*picked.borrow(), vec![Mode::Intermediate]);
    }
}
