//! Responsive navigation toggle.
//!
//! The expanded state lives in the page itself, as `aria-expanded` on the
//! toggle button, so there is nothing to keep in sync.

use crate::config::Selectors;
use crate::document::Document;

/// Navigation menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Collapsed,
    Expanded,
}

impl NavState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    #[must_use]
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    /// Current state as recorded on the toggle. Anything but `"true"` is
    /// collapsed.
    pub fn read(doc: &impl Document, selectors: &Selectors) -> Self {
        match doc.attribute(&selectors.menu_toggle, "aria-expanded").as_deref() {
            Some("true") => Self::Expanded,
            _ => Self::Collapsed,
        }
    }
}

/// Flip the menu and return the new state.
///
/// Needs both the toggle and the nav list; returns `None` without touching
/// the page otherwise.
pub fn toggle_menu(doc: &mut impl Document, selectors: &Selectors) -> Option<NavState> {
    if !doc.contains(&selectors.menu_toggle) || !doc.contains(&selectors.nav_list) {
        return None;
    }
    let next = NavState::read(doc, selectors).toggled();
    let expanded = next.is_expanded();
    doc.set_attribute(&selectors.menu_toggle, "aria-expanded", bool_attr(expanded));
    doc.set_attribute(&selectors.nav_list, "aria-hidden", bool_attr(!expanded));
    Some(next)
}

const fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
