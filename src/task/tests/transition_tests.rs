//! Tests for status transition validation and application.

use crate::task::{
    domain::{TaskStatus, ValidationError},
    lifecycle::{StepRequest, validate_progress_step, validate_status_transition},
    ports::MockWorkflowCatalog,
};
use crate::test_support::{FixedClock, catalog_with, task_with};
use chrono::Duration;
use rstest::{fixture, rstest};

const STEPS: [&str; 4] = ["Draft", "Review", "Approve", "Publish"];

#[fixture]
fn clock() -> FixedClock {
    FixedClock::on(2024, 6, 10)
}

#[fixture]
fn catalog() -> MockWorkflowCatalog {
    catalog_with(&STEPS, Some("Draft"))
}

#[rstest]
fn entering_progress_with_member_step_keeps_it(clock: FixedClock, catalog: MockWorkflowCatalog) {
    let task = task_with("report", TaskStatus::Pending, None, &clock);

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Set("Review"), &catalog)
            .expect("step belongs to workflow");

    assert_eq!(transition.to(), TaskStatus::InProgress);
    assert_eq!(transition.progress(), Some("Review"));
    assert_eq!(transition.suggested_step(), None);
    assert!(transition.changes_status());
    assert!(!transition.closes_out());
}

#[rstest]
fn entering_progress_with_foreign_step_is_rejected(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
) {
    let task = task_with("report", TaskStatus::Pending, None, &clock);

    let result =
        validate_status_transition(&task, "in_progress", StepRequest::Set("Ship"), &catalog);

    assert_eq!(
        result,
        Err(ValidationError::StepNotInWorkflow {
            task_type: "report".to_owned(),
            step: "Ship".to_owned(),
        })
    );
}

#[rstest]
fn entering_progress_without_step_suggests_default(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
) {
    let task = task_with("report", TaskStatus::Pending, None, &clock);

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Unspecified, &catalog)
            .expect("status is valid");

    assert_eq!(transition.progress(), None);
    assert_eq!(transition.suggested_step(), Some("Draft"));
}

#[rstest]
fn staying_in_progress_without_step_keeps_current_step(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
) {
    let task = task_with("report", TaskStatus::InProgress, Some("Approve"), &clock);

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Unspecified, &catalog)
            .expect("status is valid");

    assert_eq!(transition.progress(), Some("Approve"));
    assert_eq!(transition.suggested_step(), None);
    assert!(!transition.changes_status());
}

#[rstest]
fn clearing_the_step_while_in_progress_drops_it(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
) {
    let mut task = task_with("report", TaskStatus::InProgress, Some("Review"), &clock);

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Clear, &catalog)
            .expect("status is valid");
    transition.apply(&mut task, &clock).expect("progress is editable");

    assert_eq!(transition.progress(), None);
    assert_eq!(transition.suggested_step(), Some("Draft"));
    assert_eq!(task.progress(), None);
}

#[rstest]
fn blank_step_counts_as_a_clear(clock: FixedClock, catalog: MockWorkflowCatalog) {
    let task = task_with("report", TaskStatus::InProgress, Some("Review"), &clock);

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Set("  "), &catalog)
            .expect("status is valid");

    assert_eq!(transition.progress(), None);
}

#[rstest]
#[case::absent(None, StepRequest::Unspecified)]
#[case::cleared(Some(None), StepRequest::Clear)]
#[case::named(Some(Some("Review")), StepRequest::Set("Review"))]
fn step_requests_keep_absent_and_cleared_apart(
    #[case] update: Option<Option<&str>>,
    #[case] expected: StepRequest<'static>,
) {
    assert_eq!(StepRequest::from_update(update), expected);
}

#[rstest]
#[case("done")]
#[case("in progress")]
#[case("")]
fn unknown_status_is_rejected(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
    #[case] requested: &str,
) {
    let task = task_with("report", TaskStatus::Pending, None, &clock);

    let result = validate_status_transition(&task, requested, StepRequest::Unspecified, &catalog);

    assert!(matches!(result, Err(ValidationError::InvalidStatus(_))));
}

#[rstest]
fn status_strings_are_case_insensitive(clock: FixedClock, catalog: MockWorkflowCatalog) {
    let task = task_with("report", TaskStatus::Pending, None, &clock);

    let transition =
        validate_status_transition(&task, " Completed ", StepRequest::Unspecified, &catalog)
            .expect("status is valid");

    assert_eq!(transition.to(), TaskStatus::Completed);
}

#[rstest]
fn every_status_pair_is_permitted(clock: FixedClock, catalog: MockWorkflowCatalog) {
    for from in TaskStatus::ALL {
        for to in TaskStatus::ALL {
            let task = task_with("report", from, None, &clock);
            let transition =
                validate_status_transition(&task, to.as_str(), StepRequest::Unspecified, &catalog);
            assert!(transition.is_ok(), "{from} -> {to} should be permitted");
        }
    }
}

#[rstest]
fn moving_to_pending_clears_progress(clock: FixedClock, catalog: MockWorkflowCatalog) {
    let mut task = task_with("report", TaskStatus::InProgress, Some("Review"), &clock);

    let transition =
        validate_status_transition(&task, "pending", StepRequest::Set("Approve"), &catalog)
            .expect("status is valid");
    transition.apply(&mut task, &clock).expect("apply succeeds");

    assert!(task.status().is(TaskStatus::Pending));
    assert_eq!(task.progress(), None);
}

#[rstest]
fn completing_freezes_progress_and_stamps_completion(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
) {
    let mut task = task_with("report", TaskStatus::InProgress, Some("Approve"), &clock);
    clock.advance(Duration::days(3));

    let transition =
        validate_status_transition(&task, "completed", StepRequest::Set("Publish"), &catalog)
            .expect("status is valid");
    assert!(transition.closes_out());
    transition.apply(&mut task, &clock).expect("apply succeeds");

    assert!(task.is_completed());
    assert_eq!(task.progress(), Some("Approve"));
    assert_eq!(task.completed_at(), Some(task.updated_at()));
    assert!(task.completed_at() > Some(task.created_at()));
}

#[rstest]
fn reopening_a_completed_task_clears_completion(
    clock: FixedClock,
    catalog: MockWorkflowCatalog,
) {
    let mut task = task_with("report", TaskStatus::Completed, Some("Publish"), &clock);
    assert!(task.completed_at().is_some());

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Set("Review"), &catalog)
            .expect("status is valid");
    transition.apply(&mut task, &clock).expect("apply succeeds");

    assert!(task.status().is(TaskStatus::InProgress));
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.progress(), Some("Review"));
}

#[rstest]
fn completed_task_rejects_progress_edits(clock: FixedClock) {
    let mut task = task_with("report", TaskStatus::Completed, Some("Publish"), &clock);

    let result = task.set_progress(Some("Draft".to_owned()), &clock);

    assert_eq!(result, Err(ValidationError::ProgressLocked(task.id())));
    assert_eq!(task.progress(), Some("Publish"));
}

#[rstest]
fn unknown_task_type_accepts_any_step() {
    let catalog = catalog_with(&[], None);

    assert_eq!(validate_progress_step("ad hoc", "Anything", &catalog), Ok(()));
}

#[rstest]
fn catalog_is_consulted_for_the_task_type(clock: FixedClock) {
    let mut catalog = MockWorkflowCatalog::new();
    catalog
        .expect_steps()
        .withf(|task_type| task_type == "audit")
        .times(1)
        .returning(|_| vec!["Scope".to_owned(), "Fieldwork".to_owned()]);
    let task = task_with("audit", TaskStatus::Pending, None, &clock);

    let transition =
        validate_status_transition(&task, "in_progress", StepRequest::Set("Fieldwork"), &catalog)
            .expect("step belongs to workflow");

    assert_eq!(transition.progress(), Some("Fieldwork"));
}
