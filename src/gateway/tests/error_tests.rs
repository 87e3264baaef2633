//! Error taxonomy tests.

use crate::gateway::{ApiError, AuthError, ErrorKind};
use crate::review::{
    domain::{ReviewDomainError, ReviewId, ReviewStatus},
    ports::{FetchError, ModelError, OutputShape},
    services::{FeedbackError, ReviewEngineError, SubmissionError},
};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
    services::TaskCatalogError,
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(ErrorKind::TaskNotFound, "task_not_found", 404)]
#[case(ErrorKind::ReviewNotFound, "review_not_found", 404)]
#[case(ErrorKind::ValidationError, "validation_error", 400)]
#[case(ErrorKind::DecodeError, "decode_error", 400)]
#[case(ErrorKind::FetchError, "fetch_error", 400)]
#[case(ErrorKind::DuplicateTask, "duplicate_task", 400)]
#[case(ErrorKind::Unauthorized, "unauthorized", 401)]
#[case(ErrorKind::Locked, "locked", 423)]
#[case(ErrorKind::ModelInvocationError, "model_invocation_error", 500)]
#[case(ErrorKind::ParseError, "parse_error", 500)]
#[case(ErrorKind::PersistenceError, "persistence_error", 500)]
fn kinds_have_stable_discriminators(
    #[case] kind: ErrorKind,
    #[case] discriminator: &str,
    #[case] status: u16,
) {
    assert_eq!(kind.as_str(), discriminator);
    assert_eq!(kind.status_code(), status);
    assert_eq!(
        serde_json::to_value(kind).expect("serializable"),
        json!(discriminator)
    );
}

fn task_id() -> TaskId {
    TaskId::new("t-1").expect("valid task id")
}

#[rstest]
#[case(AuthError::MissingCredential.into(), ErrorKind::Unauthorized)]
#[case(TaskCatalogError::Domain(TaskDomainError::EmptyTitle).into(), ErrorKind::ValidationError)]
#[case(
    TaskCatalogError::Repository(TaskRepositoryError::DuplicateTask(task_id())).into(),
    ErrorKind::DuplicateTask
)]
#[case(
    SubmissionError::Fetch(FetchError::NotText { url: "u".to_owned() }).into(),
    ErrorKind::FetchError
)]
#[case(ReviewEngineError::TaskNotFound(task_id()).into(), ErrorKind::TaskNotFound)]
#[case(ReviewEngineError::ReviewNotFound(ReviewId::new()).into(), ErrorKind::ReviewNotFound)]
#[case(
    ReviewEngineError::Locked {
        review_id: ReviewId::new(),
        status: ReviewStatus::PendingFeedback,
    }
    .into(),
    ErrorKind::Locked
)]
#[case(
    ReviewEngineError::Model(ModelError::Invocation("down".to_owned())).into(),
    ErrorKind::ModelInvocationError
)]
#[case(
    ReviewEngineError::Model(ModelError::parse(OutputShape::NextTask, "bad")).into(),
    ErrorKind::ParseError
)]
#[case(
    FeedbackError::Validation(ReviewDomainError::UnknownSentiment("meh".to_owned())).into(),
    ErrorKind::ValidationError
)]
#[case(FeedbackError::ReviewNotFound(ReviewId::new()).into(), ErrorKind::ReviewNotFound)]
fn service_errors_map_to_kinds(#[case] error: ApiError, #[case] expected: ErrorKind) {
    assert_eq!(error.kind(), expected);
    assert!(!error.detail().is_empty());
}

#[rstest]
fn decode_errors_map_to_decode_kind() {
    let bytes = vec![0xff_u8, 0xfe];
    let Err(utf8) = std::str::from_utf8(&bytes) else {
        panic!("expected invalid UTF-8");
    };
    let error = ApiError::from(SubmissionError::Decode(utf8));
    assert_eq!(error.kind(), ErrorKind::DecodeError);
    assert_eq!(error.status_code(), 400);
}

#[rstest]
fn api_error_serializes_discriminator_and_detail() {
    let error = ApiError::new(ErrorKind::Locked, "feedback required");
    assert_eq!(
        serde_json::to_value(&error).expect("serializable"),
        json!({ "error": "locked", "detail": "feedback required" })
    );
    assert_eq!(error.to_string(), "locked: feedback required");
}
