//! Landing section: greeting, cycling job titles, calls to action and the
//! profile picture floating in an ambient particle field.

/// Drifting dots behind the profile picture.
pub mod ambient_particles;

/// Letter rain and suction timing for the job titles.
pub mod title_cycle;

use bevy::prelude::*;
use constants::layout::{AMBIENT_CANVAS_SIZE, AMBIENT_PARTICLE_COUNT};
use constants::palette::AMBIENT_PARTICLE;

use super::widgets::{
    BODY_SIZE, HEADING_SIZE, HoverHighlight, ScrollLink, TITLE_SIZE, button_bundle, button_node,
    localized_text, spawn_section,
};
use crate::content::locale::ActiveLocale;
use crate::content::settings::Settings;
use crate::content::site_manifest::SiteManifest;
use crate::engine::systems::reveal::RevealOptions;
use crate::engine::systems::theme::ThemeRole;
use ambient_particles::AmbientField;
use title_cycle::TitleCycle;

const TITLES_KEY: &str = "hero.titles";

/// Row holding the letters of the current title.
#[derive(Component)]
pub struct HeroTitle {
    cycle: Option<TitleCycle>,
}

#[derive(Component)]
pub struct TitleLetter(usize);

/// Drawing surface of the ambient field. Despawning it stops the animation.
#[derive(Component)]
pub struct AmbientCanvas {
    field: AmbientField,
}

#[derive(Component)]
pub struct AmbientDot(usize);

pub fn spawn_hero(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    manifest: &SiteManifest,
    asset_server: &AssetServer,
) {
    spawn_section(
        parent,
        "hero",
        RevealOptions::SECTION,
        ThemeRole::Background,
        |section| {
            section
                .spawn(Node {
                    width: Val::Percent(100.0),
                    max_width: Val::Px(1200.0),
                    min_height: Val::Vh(80.0),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Row,
                    flex_wrap: FlexWrap::Wrap,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::SpaceBetween,
                    row_gap: Val::Px(48.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_intro(row, locale);
                    spawn_profile(row, manifest, asset_server);
                });
        },
    );
}

fn spawn_intro(parent: &mut ChildSpawnerCommands, locale: &ActiveLocale) {
    parent
        .spawn(Node {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(16.0),
            max_width: Val::Px(620.0),
            ..default()
        })
        .with_children(|intro| {
            localized_text(intro, locale, "hero.welcome", HEADING_SIZE, ThemeRole::TextSecondary);
            localized_text(intro, locale, "hero.IAm", TITLE_SIZE, ThemeRole::TextPrimary);
            intro.spawn((
                Name::new("HeroTitle"),
                HeroTitle { cycle: None },
                Node {
                    height: Val::Px(TITLE_SIZE * 1.6),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::FlexEnd,
                    overflow: Overflow::visible(),
                    ..default()
                },
            ));
            localized_text(
                intro,
                locale,
                "hero.heroDescription",
                BODY_SIZE,
                ThemeRole::TextSecondary,
            );

            intro
                .spawn(Node {
                    display: Display::Flex,
                    column_gap: Val::Px(16.0),
                    margin: UiRect::top(Val::Px(16.0)),
                    ..default()
                })
                .with_children(|actions| {
                    actions
                        .spawn((
                            button_bundle(HoverHighlight::PRIMARY),
                            ScrollLink("contact"),
                            button_node(),
                        ))
                        .with_children(|button| {
                            localized_text(
                                button,
                                locale,
                                "hero.cta.getInTouch",
                                BODY_SIZE,
                                ThemeRole::Background,
                            );
                        });
                    actions
                        .spawn((
                            button_bundle(HoverHighlight::SUBTLE),
                            ScrollLink("projects"),
                            button_node(),
                        ))
                        .with_children(|button| {
                            localized_text(
                                button,
                                locale,
                                "hero.cta.seeProject",
                                BODY_SIZE,
                                ThemeRole::Primary,
                            );
                        });
                });
        });
}

fn spawn_profile(
    parent: &mut ChildSpawnerCommands,
    manifest: &SiteManifest,
    asset_server: &AssetServer,
) {
    let field = AmbientField::new(
        Vec2::splat(AMBIENT_CANVAS_SIZE),
        AMBIENT_PARTICLE_COUNT,
        &mut rand::thread_rng(),
    );
    let dots: Vec<_> = field
        .particles()
        .iter()
        .enumerate()
        .map(|(index, particle)| {
            (
                AmbientDot(index),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(particle.position.x - particle.radius),
                    top: Val::Px(particle.position.y - particle.radius),
                    width: Val::Px(particle.radius * 2.0),
                    height: Val::Px(particle.radius * 2.0),
                    ..default()
                },
                BackgroundColor(AMBIENT_PARTICLE.with_alpha(particle.opacity)),
                BorderRadius::MAX,
            )
        })
        .collect();

    parent
        .spawn((
            Name::new("AmbientCanvas"),
            Node {
                width: Val::Px(AMBIENT_CANVAS_SIZE),
                height: Val::Px(AMBIENT_CANVAS_SIZE),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|canvas| {
            for dot in dots {
                canvas.spawn(dot);
            }
            canvas.spawn((
                Name::new("ProfileImage"),
                ImageNode::new(asset_server.load(&manifest.profile.image)),
                Node {
                    width: Val::Px(AMBIENT_CANVAS_SIZE * 0.7),
                    height: Val::Px(AMBIENT_CANVAS_SIZE * 0.7),
                    ..default()
                },
                BorderRadius::MAX,
            ));
        })
        .insert(AmbientCanvas { field });
}

/// Advance the title animation and rebuild letters for each new title.
pub fn cycle_hero_title(
    mut commands: Commands,
    time: Res<Time>,
    locale: Res<ActiveLocale>,
    settings: Res<Settings>,
    mut titles: Query<(Entity, &mut HeroTitle)>,
    mut letters: Query<(&TitleLetter, &mut Node, &mut Transform, &mut TextColor)>,
) {
    let now = time.elapsed_secs();
    let words = locale.table.list(TITLES_KEY);
    let mut rng = rand::thread_rng();

    for (entity, mut title) in &mut titles {
        let rebuild = if let Some(cycle) = title.cycle.as_mut() {
            cycle
                .advance(now, words.len(), |i| words[i].as_str(), &mut rng)
                .map(|i| words[i].as_str())
        } else if let Some(word) = words.first() {
            title.cycle = Some(TitleCycle::new(word, now, &mut rng));
            Some(word.as_str())
        } else {
            None
        };

        if let Some(word) = rebuild {
            commands.entity(entity).despawn_related::<Children>();
            commands.entity(entity).with_children(|row| {
                for (index, letter) in word.chars().enumerate() {
                    let glyph = if letter == ' ' { '\u{00A0}' } else { letter };
                    row.spawn((
                        TitleLetter(index),
                        Text::new(glyph.to_string()),
                        TextFont {
                            font_size: TITLE_SIZE,
                            ..default()
                        },
                        TextColor(Color::NONE),
                        Node::default(),
                    ));
                }
            });
        }
    }

    let Some(cycle) = titles.iter().find_map(|(_, title)| title.cycle.as_ref()) else {
        return;
    };
    let colour = ThemeRole::Primary.colour(settings.theme());
    for (letter, mut node, mut transform, mut text_colour) in &mut letters {
        let pose = cycle.pose(letter.0, now);
        node.left = Val::Px(pose.offset.x);
        node.top = Val::Px(pose.offset.y);
        transform.rotation = Quat::from_rotation_z(pose.rotation);
        transform.scale = Vec3::splat(pose.scale);
        text_colour.0 = colour.with_alpha(pose.opacity);
    }
}

/// Move and redraw the ambient dots. Runs only while a canvas exists.
pub fn drift_ambient_particles(
    mut canvases: Query<(&mut AmbientCanvas, &Children)>,
    mut dots: Query<(&AmbientDot, &mut Node)>,
) {
    for (mut canvas, children) in &mut canvases {
        canvas.field.step();
        let mut children = dots.iter_many_mut(children);
        while let Some((dot, mut node)) = children.fetch_next() {
            if let Some(particle) = canvas.field.particles().get(dot.0) {
                node.left = Val::Px(particle.position.x - particle.radius);
                node.top = Val::Px(particle.position.y - particle.radius);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn canvas_world() -> (World, Entity) {
        let mut world = World::new();
        let field = AmbientField::new(Vec2::splat(400.0), 3, &mut StdRng::seed_from_u64(1));
        let canvas = world.spawn(AmbientCanvas { field }).id();
        for index in 0..3 {
            let dot = world.spawn((AmbientDot(index), Node::default())).id();
            world.entity_mut(canvas).add_child(dot);
        }
        (world, canvas)
    }

    #[test]
    fn ambient_dots_follow_the_field() {
        let (mut world, canvas) = canvas_world();
        world
            .run_system_once(drift_ambient_particles)
            .expect("drift");

        let expected = world
            .entity(canvas)
            .get::<AmbientCanvas>()
            .map(|c| c.field.particles()[0])
            .expect("canvas");
        let mut dots = world.query::<(&AmbientDot, &Node)>();
        let node = dots
            .iter(&world)
            .find(|(dot, _)| dot.0 == 0)
            .map(|(_, node)| node.left)
            .expect("dot");
        assert_eq!(node, Val::Px(expected.position.x - expected.radius));
    }

    #[test]
    fn despawned_canvas_stops_animating() {
        let (mut world, canvas) = canvas_world();
        world.despawn(canvas);
        world
            .run_system_once(drift_ambient_particles)
            .expect("drift");
        let mut canvases = world.query::<&AmbientCanvas>();
        assert_eq!(canvases.iter(&world).count(), 0);
    }
}
