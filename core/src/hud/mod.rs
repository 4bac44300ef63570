//! Heads-up display: health pips, currency counter, item slots.
//!
//! The compositor draws over whatever is already on the surface and only
//! writes inside its three reserved regions, so other overlays can share the
//! frame.

pub mod font;

use crate::video::{Color, Framebuffer, Rect, SCREEN_WIDTH};

const PIP_X: i32 = 10;
const PIP_Y: i32 = 10;
const PIP_SIZE: u32 = 15;
const PIP_STEP: i32 = 20;

const ICON: Rect = Rect::new(270, 10, 15, 15);
const COUNTER_X: i32 = 290;
const COUNTER_Y: i32 = 10;
const COUNTER_SCALE: u32 = 2;

/// Most pips that fit left of the currency region.
pub const MAX_PIPS: u32 = (ICON.x - PIP_X - PIP_SIZE as i32) as u32 / PIP_STEP as u32 + 1;

/// Most counter digits that fit between the counter origin and the right edge.
pub const MAX_COUNTER_DIGITS: usize =
    ((SCREEN_WIDTH as i32 - COUNTER_X) as u32 / (font::ADVANCE * COUNTER_SCALE)) as usize;

/// Item slots are always drawn as three empty boxes.
pub const SLOT_COUNT: u32 = 3;
const SLOT_SIZE: u32 = 30;
const SLOT_GAP: u32 = 10;
const SLOT_Y: i32 = 200;
const SLOT_BORDER: u32 = 2;

/// Values the HUD shows. Gameplay owns the numbers; the HUD only reads them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudState {
    pub health: u32,
    pub currency: u32,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            health: 3,
            currency: 0,
        }
    }
}

/// Configurable parts of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudLayout {
    /// Most health pips ever drawn; higher health is clamped. Values above
    /// [`MAX_PIPS`] are treated as [`MAX_PIPS`].
    pub max_pips: u32,
    /// Minimum digits in the currency counter (zero-padded), at most
    /// [`MAX_COUNTER_DIGITS`].
    pub currency_digits: usize,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            max_pips: 3,
            currency_digits: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudColors {
    pub pip: Color,
    pub icon: Color,
    pub text: Color,
    pub slot: Color,
}

impl Default for HudColors {
    fn default() -> Self {
        Self {
            pip: Color::RED,
            icon: Color::GREEN,
            text: Color::WHITE,
            slot: Color::WHITE,
        }
    }
}

/// Format a counter zero-padded to at least `width` digits.
pub fn format_counter(value: u32, width: usize) -> String {
    format!("{value:0width$}")
}

pub struct HudCompositor {
    layout: HudLayout,
    colors: HudColors,
}

impl HudCompositor {
    pub fn new(layout: HudLayout) -> Self {
        Self::with_colors(layout, HudColors::default())
    }

    pub fn with_colors(layout: HudLayout, colors: HudColors) -> Self {
        Self { layout, colors }
    }

    pub fn layout(&self) -> &HudLayout {
        &self.layout
    }

    fn pip_capacity(&self) -> u32 {
        self.layout.max_pips.min(MAX_PIPS)
    }

    /// Pips actually drawn for `health`.
    pub fn visible_pips(&self, health: u32) -> u32 {
        health.min(self.pip_capacity())
    }

    /// Top-left strip holding the health pips.
    pub fn health_region(&self) -> Rect {
        let width = self.pip_capacity().saturating_sub(1) * PIP_STEP as u32 + PIP_SIZE;
        Rect::new(PIP_X, PIP_Y, width, PIP_SIZE)
    }

    /// Top-right strip holding the currency icon and counter.
    pub fn currency_region(&self) -> Rect {
        Rect::from_corners(ICON.x, ICON.y, SCREEN_WIDTH as i32, ICON.bottom())
    }

    /// Bottom-center strip holding the item slots.
    pub fn slots_region(&self) -> Rect {
        let width = SLOT_COUNT * SLOT_SIZE + (SLOT_COUNT - 1) * SLOT_GAP;
        let x = (SCREEN_WIDTH as u32 - width) / 2;
        Rect::new(x as i32, SLOT_Y, width, SLOT_SIZE)
    }

    /// Rectangle of health pip `i`.
    pub fn pip_rect(&self, i: u32) -> Rect {
        let offset = i.saturating_mul(PIP_STEP as u32).min(i32::MAX as u32) as i32;
        Rect::new(PIP_X.saturating_add(offset), PIP_Y, PIP_SIZE, PIP_SIZE)
    }

    /// Counter text for `value`, saturating at the largest number that fits.
    pub fn counter_text(&self, value: u32) -> String {
        let ceiling = 10u32.pow(MAX_COUNTER_DIGITS as u32) - 1;
        let width = self.layout.currency_digits.min(MAX_COUNTER_DIGITS);
        format_counter(value.min(ceiling), width)
    }

    /// Rectangle of item slot `i`.
    pub fn slot_rect(&self, i: u32) -> Rect {
        let origin = self.slots_region();
        let step = (SLOT_SIZE + SLOT_GAP) as i32;
        Rect::new(origin.x + i as i32 * step, origin.y, SLOT_SIZE, SLOT_SIZE)
    }

    /// Composite the HUD onto `surface` without clearing it.
    pub fn draw(&self, surface: &mut Framebuffer, state: &HudState) {
        let mut health = surface.region(self.health_region());
        for i in 0..self.visible_pips(state.health) {
            health.fill_rect(self.pip_rect(i), self.colors.pip);
        }

        let mut currency = surface.region(self.currency_region());
        currency.fill_rect(ICON, self.colors.icon);
        let text = self.counter_text(state.currency);
        font::draw_text(
            &mut currency,
            COUNTER_X,
            COUNTER_Y,
            &text,
            COUNTER_SCALE,
            self.colors.text,
        );

        let mut slots = surface.region(self.slots_region());
        for i in 0..SLOT_COUNT {
            slots.stroke_rect(self.slot_rect(i), SLOT_BORDER, self.colors.slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_padding() {
        assert_eq!(format_counter(7, 3), "007");
        assert_eq!(format_counter(0, 3), "000");
        assert_eq!(format_counter(1234, 3), "1234");
        assert_eq!(format_counter(5, 1), "5");
    }

    #[test]
    fn regions_do_not_overlap() {
        let hud = HudCompositor::new(HudLayout::default());
        let h = hud.health_region();
        let c = hud.currency_region();
        let s = hud.slots_region();
        assert!(h.intersect(&c).is_none());
        assert!(h.intersect(&s).is_none());
        assert!(c.intersect(&s).is_none());
    }

    #[test]
    fn layout_limits() {
        assert_eq!(MAX_PIPS, 13);
        assert_eq!(MAX_COUNTER_DIGITS, 3);
    }

    #[test]
    fn counter_saturates() {
        let hud = HudCompositor::new(HudLayout::default());
        assert_eq!(hud.counter_text(42), "042");
        assert_eq!(hud.counter_text(999), "999");
        assert_eq!(hud.counter_text(1000), "999");
        assert_eq!(hud.counter_text(u32::MAX), "999");

        let wide = HudCompositor::new(HudLayout {
            max_pips: 3,
            currency_digits: 8,
        });
        assert_eq!(wide.counter_text(7), "007");
    }

    #[test]
    fn health_region_never_reaches_currency() {
        for max_pips in [MAX_PIPS, MAX_PIPS + 1, 120_000_000, u32::MAX] {
            let hud = HudCompositor::new(HudLayout {
                max_pips,
                currency_digits: 3,
            });
            assert!(hud.health_region().intersect(&hud.currency_region()).is_none());
            assert_eq!(hud.visible_pips(u32::MAX), MAX_PIPS);
        }
    }

    #[test]
    fn slots_are_centered() {
        let hud = HudCompositor::new(HudLayout::default());
        let s = hud.slots_region();
        assert_eq!(s.x, SCREEN_WIDTH as i32 - s.right());
        assert_eq!(hud.slot_rect(2).right(), s.right());
    }

    #[test]
    fn zero_max_pips_draws_none() {
        let hud = HudCompositor::new(HudLayout {
            max_pips: 0,
            currency_digits: 3,
        });
        assert_eq!(hud.visible_pips(5), 0);
    }
}
