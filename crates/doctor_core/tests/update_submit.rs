use std::sync::Once;

use doctor_core::{
    update, AppState, ArtifactCandidate, Effect, Msg, SelectionChannel, SubmissionOutcome,
    SubmissionState, ValidationError,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(doctor_logging::initialize_for_tests);
}

fn ready_state(name: &str, description: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::ArtifactSelected {
            candidate: ArtifactCandidate::new(name, b"G28\nG1 Z0.2 F300\n".to_vec()),
            channel: SelectionChannel::Picker,
        },
    );
    let (state, _) = update(state, Msg::DescriptionChanged(description.to_string()));
    state
}

fn submit(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1, "expected exactly one submit effect");
    let Effect::Submit { attempt_id, .. } = &effects[0];
    let attempt_id = *attempt_id;
    (state, attempt_id)
}

fn finish(state: AppState, attempt_id: u64, outcome: SubmissionOutcome) -> AppState {
    let (state, effects) = update(
        state,
        Msg::AttemptDone {
            attempt_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

fn success(text: &str) -> SubmissionOutcome {
    SubmissionOutcome::Success {
        guidance: text.to_string(),
    }
}

fn failure(text: &str) -> SubmissionOutcome {
    SubmissionOutcome::Failure {
        message: text.to_string(),
    }
}

#[test]
fn submit_emits_effect_with_raw_description_snapshot() {
    init_logging();
    let state = ready_state("part.gcode", "  first layer is lifting off \n");
    assert!(state.view().can_submit);

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(state.view().submission, SubmissionState::Compressing);
    assert!(!state.view().can_submit);
    match effects.as_slice() {
        [Effect::Submit {
            attempt_id,
            artifact,
            description,
        }] => {
            assert_eq!(*attempt_id, 1);
            assert_eq!(artifact.name(), "part.gcode");
            assert_eq!(description, "  first layer is lifting off \n");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn submission_is_disabled_below_three_words() {
    init_logging();
    for description in ["", "   ", "warping", "stringing  \n everywhere", "\tbad\tadhesion\t"] {
        let state = ready_state("part.gcode", description);
        assert!(!state.view().can_submit, "{description:?} should not be submittable");

        let (next, effects) = update(state.clone(), Msg::SubmitClicked);
        assert!(effects.is_empty());
        assert_eq!(next.view().submission, SubmissionState::Idle);
        assert!(matches!(
            next.view().notice,
            Some(ValidationError::DescriptionTooShort { min: 3, .. })
        ));
    }

    let state = ready_state("part.gcode", "nozzle keeps clogging");
    assert!(state.view().can_submit);
}

#[test]
fn notice_for_short_description_clears_once_fixed() {
    init_logging();
    let state = ready_state("part.gcode", "clogs");
    let (state, _) = update(state, Msg::SubmitClicked);
    assert!(state.view().notice.is_some());

    let (state, _) = update(
        state,
        Msg::DescriptionChanged("nozzle clogs after an hour".to_string()),
    );
    assert_eq!(state.view().notice, None);
}

#[test]
fn submit_without_artifact_is_ignored() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::DescriptionChanged("extruder clicks during infill".to_string()),
    );
    let (next, effects) = update(state.clone(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn rejected_file_never_produces_a_request() {
    init_logging();
    let state = ready_state("model.txt", "first layer is lifting off");
    assert!(matches!(
        state.view().notice,
        Some(ValidationError::InvalidExtension { .. })
    ));

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().submission, SubmissionState::Idle);
}

#[test]
fn second_submit_while_busy_is_noop() {
    init_logging();
    let state = ready_state("part.gcode", "first layer is lifting off");
    let (state, attempt_id) = submit(state);

    for stage in [
        SubmissionState::Compressing,
        SubmissionState::Sending,
        SubmissionState::AwaitingResponse,
    ] {
        let (state, _) = update(state.clone(), Msg::AttemptProgress { attempt_id, stage });
        let (next, effects) = update(state.clone(), Msg::SubmitClicked);
        assert!(effects.is_empty(), "submit during {stage:?} must not emit");
        assert_eq!(next, state);
    }
}

#[test]
fn progress_moves_forward_only() {
    init_logging();
    let (state, attempt_id) = submit(ready_state("part.gcode", "layers shift near top"));

    let (state, _) = update(
        state,
        Msg::AttemptProgress {
            attempt_id,
            stage: SubmissionState::AwaitingResponse,
        },
    );
    assert_eq!(state.view().submission, SubmissionState::AwaitingResponse);

    let (state, _) = update(
        state,
        Msg::AttemptProgress {
            attempt_id,
            stage: SubmissionState::Sending,
        },
    );
    assert_eq!(state.view().submission, SubmissionState::AwaitingResponse);

    // Terminal stages only arrive through AttemptDone.
    let (state, _) = update(
        state,
        Msg::AttemptProgress {
            attempt_id,
            stage: SubmissionState::Succeeded,
        },
    );
    assert_eq!(state.view().submission, SubmissionState::AwaitingResponse);
}

#[test]
fn success_settles_and_allows_next_attempt() {
    init_logging();
    let (state, attempt_id) = submit(ready_state("part.gcode", "first layer is lifting off"));
    let state = finish(state, attempt_id, success("Increase bed temperature."));

    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Succeeded);
    assert_eq!(view.outcome, Some(success("Increase bed temperature.")));
    assert!(view.can_submit);

    let (_state, next_attempt) = submit(state);
    assert_eq!(next_attempt, attempt_id + 1);
}

#[test]
fn failure_settles_and_allows_retry() {
    init_logging();
    let (state, attempt_id) = submit(ready_state("part.gcode", "first layer is lifting off"));
    let state = finish(state, attempt_id, failure("AI service unavailable"));

    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Failed);
    assert_eq!(view.outcome.as_ref().map(|o| o.message()), Some("AI service unavailable"));
    assert!(view.can_submit);
}

#[test]
fn new_attempt_clears_failure_but_keeps_stale_guidance() {
    init_logging();
    let (state, first) = submit(ready_state("part.gcode", "first layer is lifting off"));
    let state = finish(state, first, success("Check bed leveling"));

    let (state, second) = submit(state);
    assert_eq!(state.view().outcome, Some(success("Check bed leveling")));
    let state = finish(state, second, failure("Request failed: 502 Bad Gateway"));
    assert_eq!(
        state.view().outcome,
        Some(failure("Request failed: 502 Bad Gateway"))
    );

    let (state, _third) = submit(state);
    assert_eq!(state.view().outcome, None);
    assert_eq!(state.view().submission, SubmissionState::Compressing);
}

#[test]
fn stale_attempt_events_are_ignored() {
    init_logging();
    let (state, first) = submit(ready_state("part.gcode", "first layer is lifting off"));
    let state = finish(state, first, failure("timed out"));
    let (state, second) = submit(state);

    let (state, _) = update(
        state,
        Msg::AttemptProgress {
            attempt_id: first,
            stage: SubmissionState::AwaitingResponse,
        },
    );
    let state = finish(state, first, success("late reply"));
    assert_eq!(state.view().submission, SubmissionState::Compressing);
    assert_eq!(state.view().outcome, None);

    let state = finish(state, second, success("fresh reply"));
    assert_eq!(state.view().outcome, Some(success("fresh reply")));
}

#[test]
fn editing_description_mid_flight_does_not_touch_attempt() {
    init_logging();
    let (state, attempt_id) = submit(ready_state("part.gcode", "first layer is lifting off"));
    let (state, effects) = update(state, Msg::DescriptionChanged("x".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().submission, SubmissionState::Compressing);
    assert_eq!(state.view().description_tokens, 1);

    let state = finish(state, attempt_id, success("ok"));
    assert_eq!(state.view().submission, SubmissionState::Succeeded);
    assert!(!state.view().can_submit);
}

#[test]
fn replacing_artifact_mid_flight_keeps_attempt_running() {
    init_logging();
    let (state, attempt_id) = submit(ready_state("part.gcode", "first layer is lifting off"));
    let (state, _) = update(
        state,
        Msg::ArtifactSelected {
            candidate: ArtifactCandidate::new("other.gcode", vec![1u8, 2, 3]),
            channel: SelectionChannel::DragDrop,
        },
    );
    assert!(state.view().submission.is_busy());
    assert_eq!(state.view().artifact.unwrap().name, "other.gcode");

    let state = finish(state, attempt_id, success("ok"));
    assert_eq!(state.view().submission, SubmissionState::Succeeded);
}
