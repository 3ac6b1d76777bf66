//! The `[display]` section: pane layout and decorations.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Display {
    pins: bool,
    icons: bool,
    layout: LayoutRatios,
}

impl Default for Display {
    fn default() -> Self {
        Display {
            pins: true,
            icons: true,
            layout: LayoutRatios::default(),
        }
    }
}

impl Display {
    /// Whether the pinned pane is shown.
    #[inline]
    pub fn pins(&self) -> bool {
        self.pins
    }

    #[inline]
    pub fn icons(&self) -> bool {
        self.icons
    }

    #[inline]
    pub fn layout(&self) -> &LayoutRatios {
        &self.layout
    }
}

/// Relative pane widths. They do not need to add up to 100.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct LayoutRatios {
    pins: u16,
    parent: u16,
    main: u16,
    preview: u16,
}

impl Default for LayoutRatios {
    fn default() -> Self {
        LayoutRatios {
            pins: 15,
            parent: 20,
            main: 35,
            preview: 30,
        }
    }
}

impl LayoutRatios {
    /// Percentages for (pins, parent, main, preview), summing to 100.
    ///
    /// The pinned share is folded into the other panes when `with_pins` is false.
    /// A zero total falls back to the defaults.
    pub fn percentages(&self, with_pins: bool) -> [u16; 4] {
        let pins = if with_pins { self.pins } else { 0 };
        let total = u32::from(pins) + u32::from(self.parent) + u32::from(self.main) + u32::from(self.preview);
        if total == 0 {
            return LayoutRatios::default().percentages(with_pins);
        }
        let pct = |v: u16| (u32::from(v) * 100 / total) as u16;
        let (p, par, pre) = (pct(pins), pct(self.parent), pct(self.preview));
        [p, par, 100 - p - par - pre, pre]
    }
}
