use doctor_core::{update, AppState, ArtifactCandidate, Msg, SelectionChannel, SubmissionState};

#[test]
fn noop_leaves_a_fresh_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn noop_does_not_mark_a_prepared_form_dirty() {
    let (state, _) = update(
        AppState::new(),
        Msg::ArtifactSelected {
            candidate: ArtifactCandidate::new("benchy.gcode", b"G28\nG1 Z0.2\n".to_vec()),
            channel: SelectionChannel::Picker,
        },
    );
    let (mut state, _) = update(state, Msg::DescriptionChanged("layers shift at 5mm".into()));
    assert!(state.consume_dirty());

    let (mut next, effects) = update(state.clone(), Msg::NoOp);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next.submission(), SubmissionState::Idle);
    assert_eq!(next, state);
}
