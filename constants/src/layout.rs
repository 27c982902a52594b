/// Ambient canvas surface and population.
pub const AMBIENT_CANVAS_SIZE: f32 = 400.0;
pub const AMBIENT_PARTICLE_COUNT: usize = 50;

/// Header height used when scrolling to an anchor.
pub const HEADER_OFFSET: f32 = 80.0;
/// Probe offset used by the scrollspy.
pub const SCROLLSPY_OFFSET: f32 = 100.0;
/// Scroll distance after which the header switches to its compact look.
pub const HEADER_SCROLLED_AFTER: f32 = 50.0;
/// Logical pixels scrolled per mouse wheel line.
pub const SCROLL_LINE_HEIGHT: f32 = 40.0;

/// Section anchors in page order.
pub const SECTION_IDS: [&str; 6] = [
    "hero",
    "skills",
    "projects",
    "experience",
    "education",
    "contact",
];

/// Simulated contact submission.
pub const CONTACT_SUBMIT_DELAY_SECS: f32 = 1.5;
pub const CONTACT_SUCCESS_DISPLAY_SECS: f32 = 3.0;

/// Hero title cycle timings.
pub const TITLE_DROP_MAX_DELAY_SECS: f32 = 1.0;
pub const TITLE_DROP_DURATION_SECS: f32 = 2.0;
pub const TITLE_LAYOUT_DELAY_SECS: f32 = 0.1;
pub const TITLE_HOLD_SECS: f32 = 5.0;
pub const TITLE_SUCK_STAGGER_SECS: f32 = 0.05;
pub const TITLE_SUCK_DURATION_SECS: f32 = 1.2;
pub const TITLE_NEXT_WORD_SECS: f32 = 1.5;

/// Window width below which the header collapses into a menu button.
pub const MOBILE_BREAKPOINT: f32 = 768.0;
/// Height of the fixed header bar.
pub const HEADER_HEIGHT: f32 = 64.0;
