//! Layout tokens derived from the navigation bar position.

use serde::Serialize;

use crate::settings::HeaderPosition;

/// Padding main content reserves around the navigation surface.
const NAV_CLEARANCE: u16 = 96;
const SIDE_NAV_CLEARANCE: u16 = 88;
const EDGE_GUTTER: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Edge padding in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeInsets {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl EdgeInsets {
    pub const fn uniform(v: u16) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutOffsets {
    /// Screen edge the navigation bar is pinned to.
    pub nav_edge: Side,
    pub nav_orientation: Orientation,
    pub content_padding: EdgeInsets,
    /// Which side of a nav button its tooltip opens on.
    pub tooltip_side: Side,
    /// Side-mounted bars are too narrow for the clock.
    pub show_clock: bool,
}

impl LayoutOffsets {
    pub fn for_position(position: HeaderPosition) -> Self {
        let mut padding = EdgeInsets::uniform(EDGE_GUTTER);
        let (nav_edge, tooltip_side) = match position {
            HeaderPosition::Top => {
                padding.top = NAV_CLEARANCE;
                (Side::Top, Side::Bottom)
            }
            HeaderPosition::Bottom => {
                padding.bottom = NAV_CLEARANCE;
                (Side::Bottom, Side::Top)
            }
            HeaderPosition::Left => {
                padding.left = SIDE_NAV_CLEARANCE;
                (Side::Left, Side::Right)
            }
            HeaderPosition::Right => {
                padding.right = SIDE_NAV_CLEARANCE;
                (Side::Right, Side::Left)
            }
        };
        Self {
            nav_edge,
            nav_orientation: if position.is_vertical() {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            },
            content_padding: padding,
            tooltip_side,
            show_clock: !position.is_vertical(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_clears_navigation_edge() {
        for &pos in HeaderPosition::ALL {
            let l = LayoutOffsets::for_position(pos);
            let p = l.content_padding;
            let (nav_side, others) = match l.nav_edge {
                Side::Top => (p.top, [p.right, p.bottom, p.left]),
                Side::Bottom => (p.bottom, [p.top, p.right, p.left]),
                Side::Left => (p.left, [p.top, p.right, p.bottom]),
                Side::Right => (p.right, [p.top, p.bottom, p.left]),
            };
            assert!(others.iter().all(|&o| nav_side > o), "{pos:?}");
        }
    }

    #[test]
    fn test_positions_are_mutually_exclusive() {
        let layouts: Vec<_> = HeaderPosition::ALL
            .iter()
            .map(|&p| LayoutOffsets::for_position(p))
            .collect();
        for (i, a) in layouts.iter().enumerate() {
            for b in &layouts[i + 1..] {
                assert_ne!(a.nav_edge, b.nav_edge);
            }
        }
    }

    #[test]
    fn test_vertical_bars_hide_clock() {
        let left = LayoutOffsets::for_position(HeaderPosition::Left);
        assert_eq!(left.nav_orientation, Orientation::Vertical);
        assert_eq!(left.tooltip_side, Side::Right);
        assert!(!left.show_clock);
        assert!(LayoutOffsets::for_position(HeaderPosition::Bottom).show_clock);
    }
}
