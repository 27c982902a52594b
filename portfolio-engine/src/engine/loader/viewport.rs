use bevy::prelude::*;
use bevy::window::WindowResized;

use super::LoaderCamera;

/// Output size the loader renders at, tracked from window resizes.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LoaderViewport {
    pub width: f32,
    pub height: f32,
}

impl LoaderViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

/// Keep the loader camera's projection in step with the window.
pub fn handle_loader_resize(
    mut resize_events: EventReader<WindowResized>,
    viewport: Option<ResMut<LoaderViewport>>,
    mut cameras: Query<&mut Projection, With<LoaderCamera>>,
) {
    let Some(mut viewport) = viewport else {
        resize_events.clear();
        return;
    };
    let Some(last) = resize_events.read().last() else {
        return;
    };

    viewport.resize(last.width, last.height);
    for mut projection in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = viewport.aspect_ratio();
        }
    }
    debug!(
        "Loader viewport resized to {}x{}",
        viewport.width, viewport.height
    );
}
