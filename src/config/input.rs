//! The `[keys]` section: key lists per action.
//!
//! Key strings use the grammar understood by `app::keymap`: single characters
//! ("k", "G", "."), names ("Up", "Enter", "Tab", "space") and modifiers
//! ("Ctrl+c", "Shift+n", "<c-x>").

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_parent: Vec<String>,
    open: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    toggle_select: Vec<String>,
    select_all: Vec<String>,
    clear_selection: Vec<String>,
    yank: Vec<String>,
    cut: Vec<String>,
    paste: Vec<String>,
    rename: Vec<String>,
    create: Vec<String>,
    create_directory: Vec<String>,
    delete: Vec<String>,
    zip: Vec<String>,
    pin: Vec<String>,
    unpin: Vec<String>,
    toggle_focus: Vec<String>,
    toggle_hidden: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    go_up,
    go_down,
    go_parent,
    open,
    go_to_top,
    go_to_bottom,
    toggle_select,
    select_all,
    clear_selection,
    yank,
    cut,
    paste,
    rename,
    create,
    create_directory,
    delete,
    zip,
    pin,
    unpin,
    toggle_focus,
    toggle_hidden,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_parent: vec!["h".into(), "Left".into(), "Backspace".into()],
            open: vec!["l".into(), "Right".into(), "Enter".into()],
            go_to_top: vec!["g".into()],
            go_to_bottom: vec!["G".into()],

            toggle_select: vec!["space".into(), "v".into()],
            select_all: vec!["a".into()],
            clear_selection: vec!["Esc".into()],

            yank: vec!["y".into()],
            cut: vec!["x".into()],
            paste: vec!["p".into()],
            rename: vec!["r".into()],
            create: vec!["n".into()],
            create_directory: vec!["N".into()],
            delete: vec!["d".into()],
            zip: vec!["z".into()],

            pin: vec!["b".into()],
            unpin: vec!["u".into()],
            toggle_focus: vec!["Tab".into()],
            toggle_hidden: vec![".".into()],

            quit: vec!["q".into()],
        }
    }
}
