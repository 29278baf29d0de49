//! Menu navigation state machine
//!
//! A sidebar (`Main`) with two sub-panes. Arrow keys move the selection and
//! enter/leave sub-panes; confirming an item either navigates or hands a
//! [`Command`] back to the caller. The machine never touches the pet.

use std::sync::Arc;

use crate::dispatch::Command;
use crate::errors::{PetError, Result};

/// Focusable panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pane {
    #[default]
    Main,
    Actions,
    Settings,
}

impl Pane {
    pub fn title(self) -> &'static str {
        match self {
            Pane::Main => "Menu",
            Pane::Actions => "Actions",
            Pane::Settings => "Settings",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Pane::Main => "main",
            Pane::Actions => "actions",
            Pane::Settings => "settings",
        }
    }
}

/// What confirming an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLink {
    Submenu(Pane),
    Command(Command),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub link: MenuLink,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, link: MenuLink) -> Self {
        Self {
            label: label.into(),
            link,
        }
    }

    pub fn submenu(label: impl Into<String>, pane: Pane) -> Self {
        Self::new(label, MenuLink::Submenu(pane))
    }

    pub fn command(label: impl Into<String>, command: Command) -> Self {
        Self::new(label, MenuLink::Command(command))
    }

    pub fn back() -> Self {
        Self::new("Back", MenuLink::Back)
    }
}

/// Item lists for every pane. Each list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    main: Vec<MenuItem>,
    actions: Vec<MenuItem>,
    settings: Vec<MenuItem>,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            main: vec![
                MenuItem::submenu("Actions", Pane::Actions),
                MenuItem::submenu("Settings", Pane::Settings),
                MenuItem::command("Exit", Command::Quit),
            ],
            actions: vec![
                MenuItem::command("Dance", Command::Dance),
                MenuItem::command("Sit", Command::Sit),
                MenuItem::command("Sing", Command::Sing),
                MenuItem::command("Feed", Command::Feed),
                MenuItem::command("Play", Command::Play),
                MenuItem::command("Status", Command::Status),
            ],
            settings: vec![
                MenuItem::command("Simulate decay", Command::Decay),
                MenuItem::command("Repair files", Command::Repair),
                MenuItem::back(),
            ],
        }
    }
}

impl MenuLayout {
    pub fn new(
        main: Vec<MenuItem>,
        actions: Vec<MenuItem>,
        settings: Vec<MenuItem>,
    ) -> Result<Self> {
        let layout = Self {
            main,
            actions,
            settings,
        };

        for pane in [Pane::Main, Pane::Actions, Pane::Settings] {
            let items = layout.items(pane);
            if items.is_empty() {
                return Err(PetError::EmptyPane { pane: pane.key() });
            }
            // Only Main opens submenus, and never itself.
            if let Some(bad) = items.iter().find(|i| match i.link {
                MenuLink::Submenu(target) => pane != Pane::Main || target == Pane::Main,
                _ => false,
            }) {
                return Err(PetError::InvalidLink {
                    label: Arc::new(bad.label.clone()),
                });
            }
        }

        Ok(layout)
    }

    pub fn items(&self, pane: Pane) -> &[MenuItem] {
        match pane {
            Pane::Main => &self.main,
            Pane::Actions => &self.actions,
            Pane::Settings => &self.settings,
        }
    }
}

/// Focus plus selection over a [`MenuLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuStateMachine {
    layout: MenuLayout,
    focus: Pane,
    selected_index: usize,
}

impl Default for MenuStateMachine {
    fn default() -> Self {
        Self::new(MenuLayout::default())
    }
}

impl MenuStateMachine {
    pub fn new(layout: MenuLayout) -> Self {
        Self {
            layout,
            focus: Pane::Main,
            selected_index: 0,
        }
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn current_items(&self) -> &[MenuItem] {
        self.layout.items(self.focus)
    }

    pub fn selected(&self) -> &MenuItem {
        // Layout panes are never empty and the index is kept in range.
        &self.current_items()[self.selected_index]
    }

    pub fn navigate_up(&mut self) {
        let len = self.current_items().len();
        self.selected_index = (self.selected_index + len - 1) % len;
    }

    pub fn navigate_down(&mut self) {
        let len = self.current_items().len();
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Enter the selected item's submenu, if it has one.
    pub fn navigate_right(&mut self) -> bool {
        if self.focus != Pane::Main {
            return false;
        }
        match self.selected().link {
            MenuLink::Submenu(pane) => {
                self.enter(pane);
                true
            }
            _ => false,
        }
    }

    /// Return to `Main` from a submenu.
    pub fn navigate_left(&mut self) -> bool {
        if self.focus == Pane::Main {
            return false;
        }
        self.enter(Pane::Main);
        true
    }

    /// Confirm the selected item. Navigation items are handled here; a
    /// command item is returned for the caller to dispatch.
    pub fn select(&mut self) -> Option<Command> {
        match self.selected().link {
            MenuLink::Submenu(_) => {
                self.navigate_right();
                None
            }
            MenuLink::Back => {
                self.navigate_left();
                None
            }
            MenuLink::Command(command) => Some(command),
        }
    }

    /// Whether the exit confirmation should be shown: `Main` is focused and
    /// its selected item quits.
    pub fn is_confirming_exit(&self) -> bool {
        self.focus == Pane::Main && self.selected().link == MenuLink::Command(Command::Quit)
    }

    fn enter(&mut self, pane: Pane) {
        tracing::trace!(from = ?self.focus, to = ?pane, "menu focus");
        self.focus = pane;
        self.selected_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_item_menu() -> MenuStateMachine {
        let defaults = MenuLayout::default();
        let layout = MenuLayout::new(
            vec![
                MenuItem::submenu("Actions", Pane::Actions),
                MenuItem::command("Exit", Command::Quit),
            ],
            defaults.items(Pane::Actions).to_vec(),
            defaults.items(Pane::Settings).to_vec(),
        )
        .unwrap();
        MenuStateMachine::new(layout)
    }

    #[test]
    fn test_initial_state() {
        let menu = MenuStateMachine::default();
        assert_eq!(menu.focus(), Pane::Main);
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_navigate_up_wraps() {
        let mut menu = two_item_menu();
        menu.navigate_up();
        assert_eq!(menu.selected_index(), 1);
        menu.navigate_up();
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_navigate_down_wraps() {
        let mut menu = MenuStateMachine::default();
        for expected in [1, 2, 0, 1] {
            menu.navigate_down();
            assert_eq!(menu.selected_index(), expected);
        }
    }

    #[test]
    fn test_right_then_left() {
        let mut menu = two_item_menu();
        assert!(menu.navigate_right());
        assert_eq!(menu.focus(), Pane::Actions);
        assert_eq!(menu.selected_index(), 0);

        menu.navigate_down();
        menu.navigate_down();
        assert!(menu.navigate_left());
        assert_eq!(menu.focus(), Pane::Main);
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_right_on_command_item_is_noop() {
        let mut menu = two_item_menu();
        menu.navigate_down();
        assert!(!menu.navigate_right());
        assert_eq!(menu.focus(), Pane::Main);
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn test_left_on_main_is_noop() {
        let mut menu = MenuStateMachine::default();
        menu.navigate_down();
        assert!(!menu.navigate_left());
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn test_select_returns_commands() {
        let mut menu = MenuStateMachine::default();
        assert_eq!(menu.select(), None);
        assert_eq!(menu.focus(), Pane::Actions);

        assert_eq!(menu.select(), Some(Command::Dance));
        menu.navigate_up();
        assert_eq!(menu.select(), Some(Command::Status));
        assert_eq!(menu.focus(), Pane::Actions);
    }

    #[test]
    fn test_select_back_returns_to_main() {
        let mut menu = MenuStateMachine::default();
        menu.navigate_down();
        assert_eq!(menu.select(), None);
        assert_eq!(menu.focus(), Pane::Settings);

        menu.navigate_up();
        assert_eq!(menu.selected().link, MenuLink::Back);
        assert_eq!(menu.select(), None);
        assert_eq!(menu.focus(), Pane::Main);
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_confirm_exit_view() {
        let mut menu = MenuStateMachine::default();
        assert!(!menu.is_confirming_exit());
        menu.navigate_up();
        assert!(menu.is_confirming_exit());
        assert_eq!(menu.select(), Some(Command::Quit));
    }

    #[test]
    fn test_layout_rejects_empty_pane() {
        let err = MenuLayout::new(vec![MenuItem::back()], vec![], vec![MenuItem::back()])
            .unwrap_err();
        assert!(matches!(err, PetError::EmptyPane { pane: "actions" }));
    }

    #[test]
    fn test_layout_rejects_link_to_main() {
        let err = MenuLayout::new(
            vec![MenuItem::back()],
            vec![MenuItem::submenu("Home", Pane::Main)],
            vec![MenuItem::back()],
        )
        .unwrap_err();
        assert!(matches!(err, PetError::InvalidLink { .. }));
    }

    #[test]
    fn test_layout_rejects_sideways_link() {
        let err = MenuLayout::new(
            vec![MenuItem::submenu("Actions", Pane::Actions)],
            vec![MenuItem::submenu("Settings", Pane::Settings)],
            vec![MenuItem::back()],
        )
        .unwrap_err();
        assert!(matches!(err, PetError::InvalidLink { label } if label.as_str() == "Settings"));
    }

    #[test]
    fn test_right_only_opens_from_main() {
        let mut menu = MenuStateMachine::default();
        assert!(menu.navigate_right());
        assert_eq!(menu.focus(), Pane::Actions);
        assert!(!menu.navigate_right());
        assert_eq!(menu.focus(), Pane::Actions);
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_index_always_valid() {
        let mut menu = MenuStateMachine::default();
        let moves: [fn(&mut MenuStateMachine); 4] = [
            |m| m.navigate_up(),
            |m| m.navigate_down(),
            |m| {
                m.navigate_right();
            },
            |m| {
                m.navigate_left();
            },
        ];
        for step in 0..200usize {
            moves[(step * 7 + step / 3) % 4](&mut menu);
            assert!(menu.selected_index() < menu.current_items().len());
        }
    }
}
