// Copyright (c) 2024 Mike Tsao

use super::{List, Widget};
use crate::{
    traits::{ActionKey, Module, ModuleAction},
    types::{Vec2, WidgetBox},
};

/// A thin horizontal rule between groups of [MenuItem]s.
#[derive(Debug)]
pub struct MenuEntry {
    bounds: WidgetBox,
}
impl Default for MenuEntry {
    fn default() -> Self {
        Self {
            bounds: WidgetBox::new(Vec2::ZERO, Vec2::new(0.0, Self::HEIGHT)),
        }
    }
}
impl MenuEntry {
    #[allow(missing_docs)]
    pub const HEIGHT: f32 = 5.0;
}
impl Widget for MenuEntry {
    fn bounds(&self) -> &WidgetBox {
        &self.bounds
    }

    fn bounds_mut(&mut self) -> &mut WidgetBox {
        &mut self.bounds
    }
}

/// One line of a menu: a label on the left and, for toggles, a checkmark on
/// the right.
#[derive(Debug)]
pub struct MenuItem {
    bounds: WidgetBox,
    /// The label.
    pub text: String,
    /// Right-aligned text, usually a checkmark or nothing.
    pub right_text: String,
    /// What happens when the item is clicked. Headings have no action.
    pub action: Option<ActionKey>,
}
impl MenuItem {
    #[allow(missing_docs)]
    pub const HEIGHT: f32 = 20.0;
    /// Shown on the right of a toggle that is on.
    pub const CHECKMARK: &'static str = "✔";

    /// A non-clickable line of text.
    pub fn new_heading(text: &str) -> Self {
        Self {
            bounds: WidgetBox::new(Vec2::ZERO, Vec2::new(0.0, Self::HEIGHT)),
            text: text.to_string(),
            right_text: String::default(),
            action: None,
        }
    }
}
impl From<&ModuleAction> for MenuItem {
    fn from(action: &ModuleAction) -> Self {
        Self {
            right_text: if action.is_checked == Some(true) {
                Self::CHECKMARK.to_string()
            } else {
                String::default()
            },
            action: Some(action.key.clone()),
            ..Self::new_heading(&action.label)
        }
    }
}
impl Widget for MenuItem {
    fn bounds(&self) -> &WidgetBox {
        &self.bounds
    }

    fn bounds_mut(&mut self) -> &mut WidgetBox {
        &mut self.bounds
    }
}

/// What a row of a [ContextMenu] shows.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuRow {
    /// A [MenuEntry].
    Separator,
    /// A [MenuItem].
    Item {
        #[allow(missing_docs)]
        text: String,
        #[allow(missing_docs)]
        right_text: String,
        #[allow(missing_docs)]
        action: Option<ActionKey>,
    },
}

/// The menu a module shows on right-click: its name, then a separator, then
/// one item per [ModuleAction].
#[derive(Debug)]
pub struct ContextMenu {
    list: List,
    rows: Vec<MenuRow>,
}
impl ContextMenu {
    #[allow(missing_docs)]
    pub const WIDTH: f32 = 120.0;

    /// Builds the menu from the module's current actions. Rebuild it each
    /// time it's opened so that checkmarks are current.
    pub fn new_for(module: &dyn Module) -> Self {
        let mut r = Self {
            list: List::new_with_width(Self::WIDTH),
            rows: Default::default(),
        };
        r.push_item(MenuItem::new_heading(module.name()));
        let actions = module.actions();
        if !actions.is_empty() {
            r.push_separator();
            actions.iter().for_each(|a| r.push_item(MenuItem::from(a)));
        }
        r.list.step();
        r
    }

    fn push_separator(&mut self) {
        self.rows.push(MenuRow::Separator);
        self.list.add_child(Box::new(MenuEntry::default()));
    }

    fn push_item(&mut self, item: MenuItem) {
        self.rows.push(MenuRow::Item {
            text: item.text.clone(),
            right_text: item.right_text.clone(),
            action: item.action.clone(),
        });
        self.list.add_child(Box::new(item));
    }

    /// The rows in display order.
    pub fn rows(&self) -> &[MenuRow] {
        &self.rows
    }

    /// The laid-out geometry of the menu.
    pub fn list(&self) -> &List {
        &self.list
    }

    /// Runs the action behind the row at `index`. Returns false if that row
    /// has no action or the module didn't recognize it.
    pub fn activate(&self, index: usize, module: &mut dyn Module) -> bool {
        match self.rows.get(index) {
            Some(MenuRow::Item {
                action: Some(key), ..
            }) => module.perform_action(key),
            _ => false,
        }
    }
}
