use chrono::{DateTime, Utc};
use tutor_core::{update, ChatState, Effect, JobState, Msg, NoticeLevel};

fn seeded() -> ChatState {
    let at = DateTime::from_timestamp(1_760_000_000, 0).expect("valid timestamp");
    ChatState::new().with_welcome(at)
}

fn run(state: ChatState, message_index: usize, code: &str) -> (ChatState, Vec<Effect>) {
    update(
        state,
        Msg::RunCodeRequested {
            message_index,
            code: code.to_string(),
        },
    )
}

fn notices(effects: &[Effect]) -> Vec<(NoticeLevel, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notice) => Some((notice.level, notice.title.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn run_creates_processing_job_and_start_effect() {
    let (mut state, effects) = run(seeded(), 2, "class A(Scene): pass");

    assert!(matches!(
        &effects[0],
        Effect::StartJob { job_id: 1, code } if code == "class A(Scene): pass"
    ));
    assert_eq!(notices(&effects).len(), 1);

    let job = state.job(1).expect("job recorded");
    assert_eq!(job.source_message, 2);
    assert_eq!(job.state, JobState::Processing);
    assert_eq!(state.active_job().map(|job| job.id), Some(1));
    assert!(state.consume_dirty());
    assert_eq!(state.view().messages[2].job.as_ref().map(|j| j.job_id), Some(1));
}

#[test]
fn only_one_job_processes_at_a_time() {
    let (state, _) = run(seeded(), 2, "scene one");
    let (state, effects) = run(state, 2, "scene again");
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::StartJob { .. })));
    assert_eq!(notices(&effects).len(), 1);

    let (state, effects) = run(state, 0, "another message");
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::StartJob { .. })));
    let processing = state
        .jobs()
        .filter(|job| job.state == JobState::Processing)
        .count();
    assert_eq!(processing, 1);
}

#[test]
fn job_becomes_ready_and_notifies_exactly_once() {
    let (state, _) = run(seeded(), 2, "scene");
    let done = Msg::JobFinished {
        job_id: 1,
        result: Ok("https://videos.example.com/1.mp4".to_string()),
    };
    let (state, effects) = update(state, done.clone());
    assert_eq!(
        notices(&effects),
        vec![(NoticeLevel::Success, "Video ready".to_string())]
    );
    let job = state.job(1).unwrap();
    assert_eq!(job.result_ref(), Some("https://videos.example.com/1.mp4"));
    assert!(job.state.is_terminal());

    let (state, effects) = update(state, done);
    assert!(effects.is_empty());
    assert!(state.active_job().is_none());
}

#[test]
fn failed_job_frees_the_slot() {
    let (state, _) = run(seeded(), 2, "scene");
    let (state, effects) = update(
        state,
        Msg::JobFinished {
            job_id: 1,
            result: Err("render crashed".to_string()),
        },
    );
    assert_eq!(notices(&effects)[0].0, NoticeLevel::Error);
    assert_eq!(
        state.job(1).unwrap().state,
        JobState::Failed {
            reason: "render crashed".to_string()
        }
    );

    let (state, effects) = run(state, 2, "scene retry");
    assert!(matches!(&effects[0], Effect::StartJob { job_id: 2, .. }));
    // Earlier jobs stay on record.
    assert_eq!(state.jobs().count(), 2);
    assert_eq!(
        state.view().messages[2].job.as_ref().map(|j| j.job_id),
        Some(2)
    );
}

#[test]
fn run_rejects_missing_message_or_blank_code() {
    let (state, effects) = run(seeded(), 9, "scene");
    assert!(state.jobs().next().is_none());
    assert_eq!(notices(&effects)[0].0, NoticeLevel::Error);

    let (state, effects) = run(state, 2, "   ");
    assert!(state.jobs().next().is_none());
    assert_eq!(notices(&effects)[0].0, NoticeLevel::Error);
}

#[test]
fn unknown_job_completion_is_ignored() {
    let (state, effects) = update(
        seeded(),
        Msg::JobFinished {
            job_id: 42,
            result: Ok("x".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert!(state.job(42).is_none());
}

#[test]
fn clear_waits_for_running_job_then_retires_jobs() {
    let (state, _) = run(seeded(), 2, "scene");
    let (state, _) = update(state, Msg::ClearRequested);
    assert_eq!(state.messages().len(), 3);

    let (state, _) = update(
        state,
        Msg::JobFinished {
            job_id: 1,
            result: Ok("done".to_string()),
        },
    );
    let (state, _) = update(state, Msg::ClearRequested);
    assert!(state.messages().is_empty());
    assert!(state.jobs().next().is_none());
}
