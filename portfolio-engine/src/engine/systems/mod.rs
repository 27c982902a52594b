//! Page-level behaviour shared by every portfolio section.

/// One-shot reveal of sections and cards as they scroll into view.
pub mod reveal;

/// Page scrolling, node measurement, anchors and the scrollspy.
pub mod scroll;

/// Light and dark palettes applied to themed nodes.
pub mod theme;
