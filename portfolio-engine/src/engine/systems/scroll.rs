use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::layout::{
    HEADER_OFFSET, HEADER_SCROLLED_AFTER, SCROLL_LINE_HEIGHT, SCROLLSPY_OFFSET,
};

use crate::rpc::web_rpc::WebRpcInterface;

/// Scroll container holding every portfolio section.
#[derive(Component)]
pub struct PageRoot;

/// Single column inside [`PageRoot`]; its height is the document height.
#[derive(Component)]
pub struct PageColumn;

/// Anchor target for navigation and the scrollspy.
#[derive(Component, Debug, Clone, Copy)]
pub struct SectionAnchor {
    pub id: &'static str,
}

/// Node rectangle in logical pixels, relative to the window.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct NodeBounds(pub Rect);

/// Visible part of the page and the full height of its content.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PageViewport {
    pub rect: Rect,
    pub content_height: f32,
}

impl PageViewport {
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.rect.height()).max(0.0)
    }
}

/// Derived scroll state read by the header and the RPC layer.
#[derive(Resource, Debug, Clone, Default)]
pub struct PageScroll {
    pub offset: f32,
    pub scrolled: bool,
    /// Percentage of the scrollable distance covered.
    pub progress: f32,
    pub active_section: Option<&'static str>,
}

/// Scroll so the named section sits just below the header.
#[derive(Event, Debug, Clone)]
pub struct ScrollToSection(pub String);

/// Section whose span contains the probe line `scroll_y + offset`.
/// Sections are `(id, document top, height)` in page order.
pub fn active_section(
    scroll_y: f32,
    probe_offset: f32,
    sections: &[(&'static str, f32, f32)],
) -> Option<&'static str> {
    let probe = scroll_y + probe_offset;
    sections
        .iter()
        .find(|(_, top, height)| probe >= *top && probe < top + height)
        .map(|(id, _, _)| *id)
}

pub fn scroll_progress(offset: f32, max_scroll: f32) -> f32 {
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (offset / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Scroll offset that puts a section top right under the fixed header.
pub fn anchor_offset(section_top: f32, max_scroll: f32) -> f32 {
    (section_top - HEADER_OFFSET).clamp(0.0, max_scroll)
}

/// Copy laid-out node geometry into [`NodeBounds`].
pub fn measure_node_bounds(
    mut nodes: Query<(&mut NodeBounds, &ComputedNode, &GlobalTransform)>,
) {
    for (mut bounds, node, transform) in &mut nodes {
        let scale = node.inverse_scale_factor();
        let rect = Rect::from_center_size(
            transform.translation().truncate() * scale,
            node.size() * scale,
        );
        if bounds.0 != rect {
            bounds.0 = rect;
        }
    }
}

pub fn measure_page_viewport(
    roots: Query<&NodeBounds, With<PageRoot>>,
    columns: Query<&NodeBounds, With<PageColumn>>,
    mut viewport: ResMut<PageViewport>,
) {
    let (Ok(root), Ok(column)) = (roots.single(), columns.single()) else {
        return;
    };
    viewport.rect = root.0;
    viewport.content_height = column.0.height();
}

pub fn scroll_page_on_wheel(
    mut wheel: EventReader<MouseWheel>,
    viewport: Res<PageViewport>,
    mut roots: Query<&mut ScrollPosition, With<PageRoot>>,
) {
    let delta: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y * SCROLL_LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        })
        .sum();
    if delta == 0.0 {
        return;
    }

    for mut position in &mut roots {
        position.offset_y = (position.offset_y - delta).clamp(0.0, viewport.max_scroll());
    }
}

pub fn apply_scroll_requests(
    mut requests: EventReader<ScrollToSection>,
    viewport: Res<PageViewport>,
    sections: Query<(&SectionAnchor, &NodeBounds)>,
    mut roots: Query<&mut ScrollPosition, With<PageRoot>>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };
    let Ok(mut position) = roots.single_mut() else {
        return;
    };
    let Some((_, bounds)) = sections.iter().find(|(anchor, _)| anchor.id == request.0) else {
        warn!("No section named '{}'", request.0);
        return;
    };

    let document_top = bounds.0.min.y - viewport.rect.min.y + position.offset_y;
    position.offset_y = anchor_offset(document_top, viewport.max_scroll());
    debug!("Scrolled to '{}' at {:.0}px", request.0, position.offset_y);
}

/// Refresh the scrollspy and notify the host when the active section moves.
pub fn update_page_scroll(
    viewport: Res<PageViewport>,
    roots: Query<&ScrollPosition, With<PageRoot>>,
    sections: Query<(&SectionAnchor, &NodeBounds)>,
    mut scroll: ResMut<PageScroll>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Ok(position) = roots.single() else {
        return;
    };
    let offset = position.offset_y;

    let mut spans: Vec<_> = sections
        .iter()
        .map(|(anchor, bounds)| {
            let top = bounds.0.min.y - viewport.rect.min.y + offset;
            (anchor.id, top, bounds.0.height())
        })
        .collect();
    spans.sort_by(|a, b| a.1.total_cmp(&b.1));

    let active = active_section(offset, SCROLLSPY_OFFSET, &spans);
    let scrolled = offset > HEADER_SCROLLED_AFTER;
    let progress = scroll_progress(offset, viewport.max_scroll());

    if scroll.offset != offset || scroll.scrolled != scrolled || scroll.progress != progress {
        scroll.offset = offset;
        scroll.scrolled = scrolled;
        scroll.progress = progress;
    }

    if active.is_some() && scroll.active_section != active {
        scroll.active_section = active;
        rpc_interface.send_notification(
            "active_section_changed",
            serde_json::json!({ "section": active }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    const SPANS: [(&str, f32, f32); 3] = [
        ("hero", 0.0, 800.0),
        ("skills", 800.0, 600.0),
        ("projects", 1400.0, 900.0),
    ];

    #[test]
    fn scrollspy_probes_below_the_header() {
        assert_eq!(active_section(0.0, SCROLLSPY_OFFSET, &SPANS), Some("hero"));
        assert_eq!(active_section(699.0, SCROLLSPY_OFFSET, &SPANS), Some("hero"));
        assert_eq!(active_section(700.0, SCROLLSPY_OFFSET, &SPANS), Some("skills"));
        assert_eq!(active_section(5000.0, SCROLLSPY_OFFSET, &SPANS), None);
    }

    #[test]
    fn progress_and_anchor_offsets_stay_in_range() {
        assert_eq!(scroll_progress(0.0, 0.0), 0.0);
        assert_eq!(scroll_progress(500.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(1200.0, 1000.0), 100.0);
        assert_eq!(anchor_offset(800.0, 5000.0), 720.0);
        assert_eq!(anchor_offset(40.0, 5000.0), 0.0);
        assert_eq!(anchor_offset(9000.0, 5000.0), 5000.0);
    }

    fn page_world(offset: f32) -> World {
        let mut world = World::new();
        world.init_resource::<PageScroll>();
        world.init_resource::<WebRpcInterface>();
        world.init_resource::<Events<ScrollToSection>>();
        world.insert_resource(PageViewport {
            rect: Rect::new(0.0, 0.0, 1280.0, 800.0),
            content_height: 2300.0,
        });
        world.spawn((
            PageRoot,
            ScrollPosition {
                offset_x: 0.0,
                offset_y: offset,
            },
        ));
        for (id, top, height) in SPANS {
            world.spawn((
                SectionAnchor { id },
                NodeBounds(Rect::new(0.0, top - offset, 1280.0, top - offset + height)),
            ));
        }
        world
    }

    #[test]
    fn scroll_state_tracks_offset_and_section() {
        let mut world = page_world(900.0);
        world.run_system_once(update_page_scroll).expect("scroll");

        let scroll = world.resource::<PageScroll>();
        assert!(scroll.scrolled);
        assert_eq!(scroll.active_section, Some("skills"));
        assert_eq!(scroll.progress, 900.0 / 1500.0 * 100.0);
    }

    #[test]
    fn scroll_requests_land_under_the_header() {
        let mut world = page_world(0.0);
        world.send_event(ScrollToSection("projects".into()));
        world.run_system_once(apply_scroll_requests).expect("scroll");

        let mut roots = world.query_filtered::<&ScrollPosition, With<PageRoot>>();
        let position = roots.single(&world).expect("page root");
        assert_eq!(position.offset_y, 1400.0 - HEADER_OFFSET);
    }
}
