use anyhow::{bail, Result};
use doctor_core::{update, AppState, AppViewModel, Msg, SubmissionPolicy};

use crate::effects::EffectRunner;

/// Owns the single `AppState` and feeds it messages one at a time.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    pub fn new(policy: SubmissionPolicy, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_policy(policy),
            runner,
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Apply `msg`, run its effects, and return the view if anything visible changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;
        self.runner.enqueue(effects);
        view
    }

    /// Pump engine events until the active attempt settles.
    pub fn run_until_settled(
        &mut self,
        mut on_change: impl FnMut(&AppViewModel),
    ) -> Result<AppViewModel> {
        while self.state.submission().is_busy() {
            let Some(msg) = self.runner.next_msg() else {
                bail!("engine stopped before the submission settled");
            };
            if let Some(view) = self.dispatch(msg) {
                on_change(&view);
            }
        }
        Ok(self.state.view())
    }
}
