use crate::{check_description, validate_artifact, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ArtifactSelected { candidate, channel: _ } => {
            match validate_artifact(state.policy(), candidate) {
                Ok(artifact) => state.accept_artifact(artifact),
                Err(reason) => state.reject_artifact(reason),
            }
            Vec::new()
        }
        Msg::DescriptionChanged(text) => {
            state.set_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The guard runs before any effect is emitted; a busy slot swallows the click.
            if state.submission().is_busy() {
                return (state, Vec::new());
            }
            let Some(artifact) = state.artifact().cloned() else {
                return (state, Vec::new());
            };
            if let Err(reason) = check_description(state.policy(), state.description()) {
                state.set_notice(reason);
                return (state, Vec::new());
            }

            let description = state.description().to_string();
            let attempt_id = state.begin_attempt();
            vec![Effect::Submit {
                attempt_id,
                artifact,
                description,
            }]
        }
        Msg::AttemptProgress { attempt_id, stage } => {
            state.apply_progress(attempt_id, stage);
            Vec::new()
        }
        Msg::AttemptDone {
            attempt_id,
            outcome,
        } => {
            state.apply_done(attempt_id, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
