use doctor_core::{AppViewModel, SubmissionState};

pub fn state_label(state: SubmissionState) -> &'static str {
    match state {
        SubmissionState::Idle => "Idle",
        SubmissionState::Compressing => "Compressing",
        SubmissionState::Sending => "Sending",
        SubmissionState::AwaitingResponse => "Awaiting response",
        SubmissionState::Succeeded => "Succeeded",
        SubmissionState::Failed => "Failed",
    }
}

/// One-line summary written to stderr on every visible change.
pub fn status_line(view: &AppViewModel) -> String {
    let file = match &view.artifact {
        Some(artifact) => format!("{} ({})", artifact.name, format_size(artifact.size_bytes)),
        None => "none".to_string(),
    };
    format!(
        "[{}] File: {} | Words: {}",
        state_label(view.submission),
        file,
        view.description_tokens
    )
}

pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}
