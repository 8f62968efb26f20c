use chrono::{Local, TimeZone, Utc};
use rattendance::core::check_out::{CHECK_OUT_FAILED, CheckOutOutcome, EARLY_CHECKOUT_PROMPT};
use rattendance::core::machine::{Event, Operation, Phase, transition};
use rattendance::models::location::Fix;
use rattendance::models::requests::{CheckInRequest, CheckOutRequest, StatusResponse};
use rattendance::models::session::Session;
use rattendance::models::work_type::WorkType;
use rattendance::remote::RemoteError;
use rattendance::remote::failure::FailureBody;
use serde_json::json;

fn body(v: serde_json::Value) -> FailureBody {
    FailureBody::from_value(v)
}

// ------------------------------------------------------------------
// Failure bodies
// ------------------------------------------------------------------

#[test]
fn test_message_extraction_rules() {
    assert_eq!(
        body(json!({"message": ["A", "B"]})).display_message("fallback"),
        "A, B"
    );
    assert_eq!(body(json!({"message": "X"})).display_message("fallback"), "X");
    assert_eq!(body(json!({"msg": "X"})).display_message("fallback"), "fallback");
    assert_eq!(body(json!({"message": 42})).display_message("fallback"), "fallback");
    assert_eq!(
        body(json!({"message": ["A", 1]})).display_message("fallback"),
        "fallback"
    );
    assert_eq!(body(json!({"message": "  "})).display_message("fallback"), "fallback");
    assert_eq!(body(json!([1, 2, 3])).display_message("fallback"), "fallback");
    assert_eq!(FailureBody::empty().display_message("fallback"), "fallback");
}

#[test]
fn test_unparsable_body_is_empty() {
    let b = FailureBody::from_bytes(b"<html>502 Bad Gateway</html>");
    assert_eq!(b, FailureBody::empty());
    assert_eq!(b.display_message("check-out failed"), "check-out failed");
}

#[test]
fn test_early_checkout_discriminator() {
    assert!(body(json!({"code": "EARLY_CHECKOUT_REQUIRED", "message": "M"})).is_early_checkout());
    assert!(!body(json!({"code": "OTHER", "message": "M"})).is_early_checkout());
    assert!(!body(json!({"message": "EARLY_CHECKOUT_REQUIRED"})).is_early_checkout());
    assert!(!body(json!({"code": 1})).is_early_checkout());
}

#[test]
fn test_check_out_classification() {
    let early = RemoteError::Rejected {
        status: 400,
        body: body(json!({"code": "EARLY_CHECKOUT_REQUIRED", "message": "M"})),
    };
    assert_eq!(
        CheckOutOutcome::classify(Err(early)),
        CheckOutOutcome::PolicyRejected("M".into())
    );

    let early_silent = RemoteError::Rejected {
        status: 400,
        body: body(json!({"code": "EARLY_CHECKOUT_REQUIRED"})),
    };
    assert_eq!(
        CheckOutOutcome::classify(Err(early_silent)),
        CheckOutOutcome::PolicyRejected(EARLY_CHECKOUT_PROMPT.into())
    );

    let plain = RemoteError::Rejected {
        status: 422,
        body: body(json!({"message": ["a", "b"]})),
    };
    assert_eq!(
        CheckOutOutcome::classify(Err(plain)),
        CheckOutOutcome::Failed("a, b".into())
    );

    assert_eq!(
        CheckOutOutcome::classify(Err(RemoteError::Transport("boom".into()))),
        CheckOutOutcome::Failed(CHECK_OUT_FAILED.into())
    );
    assert_eq!(
        CheckOutOutcome::classify(Err(RemoteError::Expired)),
        CheckOutOutcome::Expired
    );
    assert_eq!(CheckOutOutcome::classify(Ok(())), CheckOutOutcome::Ok);
}

// ------------------------------------------------------------------
// Wire formats
// ------------------------------------------------------------------

#[test]
fn test_check_in_request_json() {
    let fix = Fix::new(37.5, 127.0).unwrap();
    let office = serde_json::to_value(CheckInRequest::new(WorkType::Office, Some(fix), true)).unwrap();
    assert_eq!(
        office,
        json!({"workType": "OFFICE", "lat": 37.5, "lon": 127.0, "skipLunch": true})
    );

    let remote = serde_json::to_value(CheckInRequest::new(WorkType::Remote, None, false)).unwrap();
    assert_eq!(remote, json!({"workType": "REMOTE", "skipLunch": false}));
}

#[test]
fn test_check_out_request_json() {
    assert_eq!(
        serde_json::to_value(CheckOutRequest::tentative(false)).unwrap(),
        json!({"skipLunch": false, "isEarlyCheckoutConfirmed": false})
    );
    assert_eq!(
        serde_json::to_value(CheckOutRequest::confirmed(true, "dentist")).unwrap(),
        json!({"skipLunch": true, "isEarlyCheckoutConfirmed": true, "memo": "dentist"})
    );
}

#[test]
fn test_status_response_to_session() {
    let idle: StatusResponse = serde_json::from_value(json!({"isWorking": false, "startTime": null})).unwrap();
    assert_eq!(idle.to_session(), Some(Session::Inactive));

    // a stale start time is ignored when not working
    let stale: StatusResponse =
        serde_json::from_value(json!({"isWorking": false, "startTime": "2024-01-01T09:00:00Z"})).unwrap();
    assert_eq!(stale.to_session(), Some(Session::Inactive));

    let working: StatusResponse =
        serde_json::from_value(json!({"isWorking": true, "startTime": "2024-01-01T09:00:00Z"})).unwrap();
    let session = working.to_session().unwrap();
    assert!(session.is_active());
    assert_eq!(
        session.started_at(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap())
    );

    let millis: StatusResponse =
        serde_json::from_value(json!({"isWorking": true, "startTime": "2024-01-01T09:00:00.000Z"})).unwrap();
    assert_eq!(
        millis.to_session().unwrap().started_at(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap())
    );

    let offset: StatusResponse =
        serde_json::from_value(json!({"isWorking": true, "startTime": "2024-01-01T18:00:00+09:00"})).unwrap();
    assert_eq!(
        offset.to_session().unwrap().started_at(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap())
    );

    // no offset: local wall-clock time
    let local: StatusResponse =
        serde_json::from_value(json!({"isWorking": true, "startTime": "2024-01-01T09:00:00"})).unwrap();
    let expected = Local
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(local.to_session().unwrap().started_at(), Some(expected));

    let broken: StatusResponse =
        serde_json::from_value(json!({"isWorking": true, "startTime": "yesterday"})).unwrap();
    assert_eq!(broken.to_session(), None);

    let missing: StatusResponse = serde_json::from_value(json!({"isWorking": true})).unwrap();
    assert_eq!(missing.to_session(), None);
}

#[test]
fn test_work_type_codes() {
    assert_eq!(WorkType::from_code("office"), Some(WorkType::Office));
    assert_eq!(WorkType::from_code(" R "), Some(WorkType::Remote));
    assert_eq!(WorkType::from_code("FIELD"), Some(WorkType::Field));
    assert_eq!(WorkType::from_code("home"), None);
    assert!(WorkType::Office.requires_location());
    assert!(!WorkType::Remote.requires_location());
    assert!(!WorkType::Field.requires_location());
}

#[test]
fn test_fix_parsing() {
    assert_eq!(
        Fix::parse(" 37.5665 , 126.978\n").unwrap(),
        Fix {
            latitude: 37.5665,
            longitude: 126.978
        }
    );
    assert!(Fix::parse("37.5").is_err());
    assert!(Fix::parse("north,east").is_err());
    assert!(Fix::parse("91,0").is_err());
    assert!(Fix::new(0.0, -181.0).is_err());
}

// ------------------------------------------------------------------
// Transition table
// ------------------------------------------------------------------

#[test]
fn test_legal_transitions() {
    use Operation::*;

    assert_eq!(
        transition(Phase::Ready, Event::Begin(CheckIn)).unwrap(),
        Phase::Submitting(CheckIn)
    );
    assert_eq!(
        transition(Phase::Submitting(CheckIn), Event::Settled).unwrap(),
        Phase::Ready
    );
    assert_eq!(
        transition(Phase::Submitting(CheckOut), Event::PolicyRejected).unwrap(),
        Phase::ConfirmationPending
    );
    assert_eq!(
        transition(Phase::ConfirmationPending, Event::Begin(ConfirmCheckOut)).unwrap(),
        Phase::Submitting(ConfirmCheckOut)
    );
    assert_eq!(
        transition(Phase::Submitting(ConfirmCheckOut), Event::ConfirmFailed).unwrap(),
        Phase::ConfirmationPending
    );
    assert_eq!(
        transition(Phase::ConfirmationPending, Event::Cancel).unwrap(),
        Phase::Ready
    );
    assert_eq!(
        transition(Phase::Submitting(Refresh), Event::Expired).unwrap(),
        Phase::Ready
    );
}

#[test]
fn test_illegal_transitions() {
    use Operation::*;

    // one operation at a time
    assert!(transition(Phase::Submitting(CheckIn), Event::Begin(CheckIn)).is_err());
    assert!(transition(Phase::Submitting(CheckIn), Event::Begin(Refresh)).is_err());
    assert!(transition(Phase::ConfirmationPending, Event::Begin(CheckOut)).is_err());
    // no duplicate confirmations
    assert!(
        transition(Phase::Submitting(ConfirmCheckOut), Event::Begin(ConfirmCheckOut)).is_err()
    );
    assert!(transition(Phase::Submitting(ConfirmCheckOut), Event::Cancel).is_err());
    // policy rejection only comes from a tentative check-out
    assert!(transition(Phase::Submitting(CheckIn), Event::PolicyRejected).is_err());
    assert!(transition(Phase::Ready, Event::Begin(ConfirmCheckOut)).is_err());
    assert!(transition(Phase::Ready, Event::Settled).is_err());
}
