/// Inset applied to the viewport before intersection tests, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Inset {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Inset {
    pub const fn vertical(top: f32, bottom: f32) -> Self {
        Self {
            top,
            right: 0.0,
            bottom,
            left: 0.0,
        }
    }
}

/// Visible fraction required before a section element is revealed.
pub const DEFAULT_THRESHOLD: f32 = 0.2;
pub const CONTACT_THRESHOLD: f32 = 0.3;

/// Negative margins: triggering waits until the element is inside the viewport.
pub const DEFAULT_ROOT_MARGIN: Inset = Inset::vertical(0.0, 50.0);
pub const CONTACT_ROOT_MARGIN: Inset = Inset::vertical(50.0, 50.0);
pub const SKILLS_ROOT_MARGIN: Inset = Inset::vertical(50.0, 50.0);
pub const TIMELINE_ROOT_MARGIN: Inset = Inset::vertical(50.0, 50.0);

/// Deferral before observation starts on rebuilt content.
pub const ATTACH_DELAY_SECS: f32 = 0.05;

/// Slide-up animation after reveal.
pub const REVEAL_DURATION_SECS: f32 = 0.7;
pub const REVEAL_SLIDE_DISTANCE: f32 = 40.0;

/// Delay between consecutive staggered items inside a revealed panel.
pub const STAGGER_STEP_SECS: f32 = 0.05;
