use bevy::prelude::*;

use crate::engine::loader::LoaderCompleted;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Portfolio,
}

/// Leave the loader once it reports completion.
pub fn transition_to_portfolio(
    mut completed: EventReader<LoaderCompleted>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if completed.read().count() > 0 {
        info!("→ Transitioning to Portfolio state");
        next_state.set(AppState::Portfolio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn completion_moves_to_portfolio() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .add_event::<LoaderCompleted>()
            .add_systems(Update, transition_to_portfolio);

        app.update();
        assert_eq!(*app.world().resource::<State<AppState>>(), AppState::Loading);

        app.world_mut().send_event(LoaderCompleted);
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>(),
            AppState::Portfolio
        );
    }
}
