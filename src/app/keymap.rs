//! Key mapping for triptych.
//!
//! Parses the key lists from the config into a lookup table from [Key] to [Action].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    Pin(PinAction),
    System(SystemAction),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoUp,
    GoDown,
    GoParent,
    Open,
    GoToTop,
    GoToBottom,
    ToggleSelect,
    SelectAll,
    ClearSelection,
    ToggleFocus,
    ToggleHidden,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    Yank,
    Cut,
    Paste,
    Rename,
    Create,
    CreateDirectory,
    Delete,
    Zip,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinAction {
    Pin,
    Unpin,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
}

/// Key + modifiers as used in the keymap.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config.
    #[rustfmt::skip]
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use FileAction as F;
        use PinAction as P;
        use SystemAction as S;

        bind!(keys.go_up(),            Action::Nav(N::GoUp));
        bind!(keys.go_down(),          Action::Nav(N::GoDown));
        bind!(keys.go_parent(),        Action::Nav(N::GoParent));
        bind!(keys.open(),             Action::Nav(N::Open));
        bind!(keys.go_to_top(),        Action::Nav(N::GoToTop));
        bind!(keys.go_to_bottom(),     Action::Nav(N::GoToBottom));
        bind!(keys.toggle_select(),    Action::Nav(N::ToggleSelect));
        bind!(keys.select_all(),       Action::Nav(N::SelectAll));
        bind!(keys.clear_selection(),  Action::Nav(N::ClearSelection));
        bind!(keys.toggle_focus(),     Action::Nav(N::ToggleFocus));
        bind!(keys.toggle_hidden(),    Action::Nav(N::ToggleHidden));

        bind!(keys.yank(),             Action::File(F::Yank));
        bind!(keys.cut(),              Action::File(F::Cut));
        bind!(keys.paste(),            Action::File(F::Paste));
        bind!(keys.rename(),           Action::File(F::Rename));
        bind!(keys.create(),           Action::File(F::Create));
        bind!(keys.create_directory(), Action::File(F::CreateDirectory));
        bind!(keys.delete(),           Action::File(F::Delete));
        bind!(keys.zip(),              Action::File(F::Zip));

        bind!(keys.pin(),              Action::Pin(P::Pin));
        bind!(keys.unpin(),            Action::Pin(P::Unpin));

        bind!(keys.quit(),             Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a key event.
    ///
    /// Character keys reported with SHIFT fall back to the unshifted binding, since
    /// terminals disagree on whether "G" carries the modifier.
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    // A lone separator character is a key of its own.
    if s == "+" || s == "-" {
        return Some(Key {
            code: KeyCode::Char(s.chars().next()?),
            modifiers,
        });
    }

    let is_bracketed = s.starts_with('<') && s.ends_with('>') && s.len() > 2;
    let mut input = if is_bracketed {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    };

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();
        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    for part in input.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(mut c), None) => {
                        if modifiers.contains(KeyModifiers::SHIFT) {
                            c = c.to_ascii_uppercase();
                        }
                        code = Some(KeyCode::Char(c));
                    }
                    (None, _) => continue,
                    _ => {
                        if p_low.starts_with('f') && p_low[1..].chars().all(|c| c.is_ascii_digit()) {
                            code = Some(KeyCode::F(p_low[1..].parse().ok()?));
                        } else {
                            return None;
                        }
                    }
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, "ignoring unparsable key binding"),
        }
    }
}
