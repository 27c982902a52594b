//! One-shot scroll reveal.
//!
//! Headings, panels and cards start hidden and shifted down. Section
//! containers stay visible; each carries a [`RevealScope`] that waits a short
//! moment after its content is (re)built, then marks every hidden target
//! beneath it as [`Observed`]. The first time an observed target is visible
//! enough it is revealed, loses its [`Observed`] marker and slides into
//! place. Revealed targets never hide again.

use std::collections::HashSet;

use bevy::prelude::*;
use constants::reveal::{
    ATTACH_DELAY_SECS, CONTACT_ROOT_MARGIN, CONTACT_THRESHOLD, DEFAULT_ROOT_MARGIN,
    DEFAULT_THRESHOLD, Inset, REVEAL_DURATION_SECS, REVEAL_SLIDE_DISTANCE, SKILLS_ROOT_MARGIN,
    STAGGER_STEP_SECS, TIMELINE_ROOT_MARGIN,
};

use super::scroll::{NodeBounds, PageViewport, SectionAnchor};
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f32,
    pub root_margin: Inset,
}

impl RevealOptions {
    pub const SECTION: Self = Self {
        threshold: DEFAULT_THRESHOLD,
        root_margin: DEFAULT_ROOT_MARGIN,
    };

    pub const CONTACT: Self = Self {
        threshold: CONTACT_THRESHOLD,
        root_margin: CONTACT_ROOT_MARGIN,
    };

    pub const SKILLS: Self = Self {
        threshold: DEFAULT_THRESHOLD,
        root_margin: SKILLS_ROOT_MARGIN,
    };

    pub const TIMELINE: Self = Self {
        threshold: DEFAULT_THRESHOLD,
        root_margin: TIMELINE_ROOT_MARGIN,
    };
}

/// Fraction of `element` inside `viewport` shrunk by `margin`.
pub fn intersection_ratio(element: Rect, viewport: Rect, margin: Inset) -> f32 {
    let root = Rect {
        min: viewport.min + Vec2::new(margin.left, margin.top),
        max: viewport.max - Vec2::new(margin.right, margin.bottom),
    };
    let area = element.width() * element.height();
    let visible = element.intersect(root);
    if area <= 0.0 || visible.is_empty() {
        return 0.0;
    }
    (visible.width() * visible.height()) / area
}

/// Presentation state of one revealable node.
#[derive(Component, Debug, Default)]
pub struct RevealTarget {
    state: RevealState,
}

impl RevealTarget {
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Record an intersection sample. Returns true on the single
    /// hidden to revealed transition.
    pub fn on_intersection(&mut self, ratio: f32, threshold: f32) -> bool {
        if self.state == RevealState::Revealed || ratio <= 0.0 || ratio < threshold {
            return false;
        }
        self.state = RevealState::Revealed;
        true
    }
}

/// Observation handle. Present only while the target is watched.
#[derive(Component, Debug, Clone, Copy)]
pub struct Observed {
    pub options: RevealOptions,
    /// Section whose scope attached the observation.
    pub section: Option<&'static str>,
}

/// Owner of a group of targets. Attaches observation after a deferral so
/// freshly spawned nodes have been laid out.
#[derive(Component, Debug)]
pub struct RevealScope {
    pub options: RevealOptions,
    attach: Option<Timer>,
}

impl RevealScope {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            attach: Some(Timer::from_seconds(ATTACH_DELAY_SECS, TimerMode::Once)),
        }
    }

    /// Schedule a new attachment pass, e.g. after a filtered list was rebuilt.
    pub fn rearm(&mut self) {
        self.attach = Some(Timer::from_seconds(ATTACH_DELAY_SECS, TimerMode::Once));
    }

    pub fn is_pending(&self) -> bool {
        self.attach.is_some()
    }
}

/// Slide-up in progress after a reveal.
#[derive(Component, Debug)]
pub struct RevealAnimation(Timer);

/// Sent once per target when it is revealed.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetRevealed(pub Entity);

/// Components for a node that starts hidden and waits to be revealed.
pub fn reveal_bundle() -> (RevealTarget, NodeBounds, Visibility) {
    (RevealTarget::default(), NodeBounds::default(), Visibility::Hidden)
}

/// Item shown after its revealed ancestor, one step later than the item
/// before it. Spawned with `Visibility::Hidden`.
#[derive(Component, Debug, Default)]
pub struct StaggeredItem;

#[derive(Component, Debug)]
pub struct StaggerDelay(Timer);

/// Initial downward shift for nodes carrying [`reveal_bundle`].
pub fn hidden_offset() -> Val {
    Val::Px(REVEAL_SLIDE_DISTANCE)
}

pub fn attach_reveal_scopes(
    mut commands: Commands,
    time: Res<Time>,
    mut scopes: Query<(Entity, &mut RevealScope, Option<&SectionAnchor>)>,
    children: Query<&Children>,
    targets: Query<&RevealTarget, Without<Observed>>,
) {
    for (scope_entity, mut scope, anchor) in &mut scopes {
        let Some(timer) = scope.attach.as_mut() else {
            continue;
        };
        if !timer.tick(time.delta()).finished() {
            continue;
        }
        scope.attach = None;

        let observed = Observed {
            options: scope.options,
            section: anchor.map(|anchor| anchor.id),
        };
        let mut attached = 0;
        for entity in children.iter_descendants(scope_entity) {
            if let Ok(target) = targets.get(entity) {
                if target.state() == RevealState::Hidden {
                    commands.entity(entity).insert(observed);
                    attached += 1;
                }
            }
        }
        debug!("Observing {} reveal targets", attached);
    }
}

pub fn observe_reveal_targets(
    mut commands: Commands,
    viewport: Res<PageViewport>,
    mut targets: Query<(Entity, &mut RevealTarget, &Observed, &NodeBounds)>,
    mut revealed: EventWriter<TargetRevealed>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut announced: Local<HashSet<&'static str>>,
) {
    for (entity, mut target, observed, bounds) in &mut targets {
        let ratio = intersection_ratio(bounds.0, viewport.rect, observed.options.root_margin);
        if !target.on_intersection(ratio, observed.options.threshold) {
            continue;
        }

        commands
            .entity(entity)
            .remove::<Observed>()
            .insert((
                Visibility::Inherited,
                RevealAnimation(Timer::from_seconds(REVEAL_DURATION_SECS, TimerMode::Once)),
            ));
        revealed.write(TargetRevealed(entity));

        // First reveal inside a section announces the section.
        if let Some(section) = observed.section.filter(|section| announced.insert(*section)) {
            rpc_interface.send_notification(
                "section_revealed",
                serde_json::json!({ "section": section }),
            );
        }
    }
}

/// Schedule the staggered items under each newly revealed target.
pub fn stagger_revealed_items(
    mut commands: Commands,
    mut revealed: EventReader<TargetRevealed>,
    children: Query<&Children>,
    items: Query<(), With<StaggeredItem>>,
) {
    for TargetRevealed(target) in revealed.read() {
        let staggered = children
            .iter_descendants(*target)
            .filter(|entity| items.contains(*entity));
        for (index, item) in staggered.enumerate() {
            commands.entity(item).insert(StaggerDelay(Timer::from_seconds(
                STAGGER_STEP_SECS * index as f32,
                TimerMode::Once,
            )));
        }
    }
}

pub fn show_staggered_items(
    mut commands: Commands,
    time: Res<Time>,
    mut items: Query<(Entity, &mut StaggerDelay, &mut Visibility)>,
) {
    for (entity, mut delay, mut visibility) in &mut items {
        if delay.0.tick(time.delta()).finished() {
            *visibility = Visibility::Inherited;
            commands.entity(entity).remove::<StaggerDelay>();
        }
    }
}

pub fn animate_reveals(
    mut commands: Commands,
    time: Res<Time>,
    mut animations: Query<(Entity, &mut RevealAnimation, &mut Node)>,
) {
    for (entity, mut animation, mut node) in &mut animations {
        animation.0.tick(time.delta());
        let t = animation.0.fraction();
        let eased = 1.0 - (1.0 - t).powi(3);
        node.top = Val::Px(REVEAL_SLIDE_DISTANCE * (1.0 - eased));

        if animation.0.finished() {
            node.top = Val::Auto;
            commands.entity(entity).remove::<RevealAnimation>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    const VIEWPORT: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::new(1000.0, 800.0),
    };

    #[test]
    fn ratio_respects_the_root_margin() {
        let element = Rect::new(0.0, 700.0, 1000.0, 800.0);
        assert_eq!(intersection_ratio(element, VIEWPORT, Inset::default()), 1.0);
        assert_eq!(
            intersection_ratio(element, VIEWPORT, Inset::vertical(0.0, 50.0)),
            0.5
        );
        let below = Rect::new(0.0, 900.0, 1000.0, 1000.0);
        assert_eq!(intersection_ratio(below, VIEWPORT, Inset::default()), 0.0);
    }

    #[test]
    fn timeline_and_skills_margins_inset_both_edges() {
        let top = Rect::new(0.0, 0.0, 1000.0, 100.0);
        let bottom = Rect::new(0.0, 700.0, 1000.0, 800.0);
        for options in [RevealOptions::TIMELINE, RevealOptions::SKILLS] {
            assert_eq!(intersection_ratio(top, VIEWPORT, options.root_margin), 0.5);
            assert_eq!(intersection_ratio(bottom, VIEWPORT, options.root_margin), 0.5);
        }
        assert_eq!(
            intersection_ratio(top, VIEWPORT, RevealOptions::SECTION.root_margin),
            1.0
        );
    }

    #[test]
    fn targets_reveal_once_and_never_hide() {
        let mut target = RevealTarget::default();
        assert!(!target.on_intersection(0.1, 0.2));
        assert!(target.on_intersection(0.25, 0.2));
        assert!(!target.on_intersection(0.9, 0.2));
        assert!(!target.on_intersection(0.0, 0.2));
        assert_eq!(target.state(), RevealState::Revealed);
    }

    fn reveal_world() -> World {
        let mut world = World::new();
        world.init_resource::<WebRpcInterface>();
        world.init_resource::<Events<TargetRevealed>>();
        world.insert_resource(PageViewport {
            rect: VIEWPORT,
            content_height: 3000.0,
        });
        world
    }

    #[test]
    fn quarter_visible_target_is_revealed_and_unobserved_once() {
        let mut world = reveal_world();
        // 25 of 100 px inside the viewport once the 50 px bottom inset applies.
        let target = world
            .spawn((
                RevealTarget::default(),
                Observed {
                    options: RevealOptions::SECTION,
                    section: None,
                },
                NodeBounds(Rect::new(0.0, 725.0, 1000.0, 825.0)),
                Visibility::Hidden,
                Node::default(),
            ))
            .id();

        world.run_system_once(observe_reveal_targets).expect("observe");
        world.run_system_once(observe_reveal_targets).expect("observe");

        let entity = world.entity(target);
        assert_eq!(
            entity.get::<RevealTarget>().map(RevealTarget::state),
            Some(RevealState::Revealed)
        );
        assert!(entity.get::<Observed>().is_none());
        assert_eq!(entity.get::<Visibility>(), Some(&Visibility::Inherited));

        let events = world.resource::<Events<TargetRevealed>>();
        assert_eq!(events.get_cursor().read(events).count(), 1);
    }

    #[test]
    fn scopes_attach_after_the_deferral() {
        let mut world = reveal_world();
        world.insert_resource(Time::<()>::default());
        let scope = world.spawn(RevealScope::new(RevealOptions::SECTION)).id();
        let card = world.spawn(RevealTarget::default()).id();
        world.entity_mut(scope).add_child(card);

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(20));
        world.run_system_once(attach_reveal_scopes).expect("attach");
        assert!(world.entity(card).get::<Observed>().is_none());

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(40));
        world.run_system_once(attach_reveal_scopes).expect("attach");
        assert!(world.entity(card).get::<Observed>().is_some());
        assert!(!world.entity(scope).get::<RevealScope>().is_some_and(RevealScope::is_pending));
    }

    #[test]
    fn a_section_is_announced_by_its_first_reveal_only() {
        let mut world = reveal_world();
        let observed = Observed {
            options: RevealOptions::SECTION,
            section: Some("projects"),
        };
        for top in [100.0, 300.0] {
            world.spawn((
                RevealTarget::default(),
                observed,
                NodeBounds(Rect::new(0.0, top, 1000.0, top + 100.0)),
                Visibility::Hidden,
                Node::default(),
            ));
        }

        world.run_system_once(observe_reveal_targets).expect("observe");

        let rpc = world.resource::<WebRpcInterface>();
        let announced: Vec<_> = rpc
            .pending_notifications()
            .iter()
            .filter(|notification| notification.method == "section_revealed")
            .collect();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].params["section"], "projects");

        let events = world.resource::<Events<TargetRevealed>>();
        assert_eq!(events.get_cursor().read(events).count(), 2);
    }

    #[test]
    fn staggered_items_appear_one_step_apart() {
        let mut world = reveal_world();
        world.insert_resource(Time::<()>::default());
        let panel = world.spawn(Visibility::Inherited).id();
        let grid = world.spawn(Visibility::Inherited).id();
        world.entity_mut(panel).add_child(grid);
        let items: Vec<Entity> = (0..3)
            .map(|_| world.spawn((StaggeredItem, Visibility::Hidden)).id())
            .collect();
        world.entity_mut(grid).add_children(&items);

        world.send_event(TargetRevealed(panel));
        world.run_system_once(stagger_revealed_items).expect("stagger");

        let visible = |world: &World| {
            items
                .iter()
                .filter(|item| world.entity(**item).get::<Visibility>() == Some(&Visibility::Inherited))
                .count()
        };

        world.run_system_once(show_staggered_items).expect("show");
        assert_eq!(visible(&world), 1);

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(60));
        world.run_system_once(show_staggered_items).expect("show");
        assert_eq!(visible(&world), 2);

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(60));
        world.run_system_once(show_staggered_items).expect("show");
        assert_eq!(visible(&world), 3);
        assert!(items.iter().all(|item| world.entity(*item).get::<StaggerDelay>().is_none()));
    }
}
