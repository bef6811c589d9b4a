//! Integration tests for Ghostpass
//!
//! End-to-end scenarios over the public API: session round trips, tamper
//! detection, wrong-password behavior, and the plainsight codec.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tempfile::tempdir;

use ghostpass::{
    Config, Corpus, FieldError, Password, RecordError, RecordStore, SecretValue, Session,
    SessionError, StegoError,
};

/// A ~500-word sample carrier.
fn sample_carrier() -> Corpus {
    let paragraph = "The lighthouse keeper walked down to the harbor every \
        morning before dawn and checked the moorings of the small boats \
        that the fishermen left tied along the old stone pier while gulls \
        circled overhead calling to each other across the grey water and \
        the first light crept slowly over the hills behind the town";
    Corpus::new(vec![paragraph; 10].join(" "))
}

fn open_store(dir: &std::path::Path) -> RecordStore {
    RecordStore::open(&Config::with_dir(dir.join("sessions"))).unwrap()
}

/// Create, add, export, then reopen with the right and the wrong
/// password.
#[test]
fn test_session_round_trip_scenario() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());
    let carrier = sample_carrier();

    let mut session = Session::init_state(Password::new("hunter2"), &carrier, None).unwrap();
    session.add("email", SecretValue::new("a@b.com")).unwrap();
    session.export(&store).unwrap();

    let record = store.resolve(None).unwrap();

    let reopened = Session::open(&record, Password::new("hunter2")).unwrap();
    assert_eq!(reopened.view("email").unwrap().as_bytes(), b"a@b.com");
    assert_eq!(reopened.list(), vec!["email"]);

    let result = Session::open(&record, Password::new("wrong"));
    assert!(matches!(result, Err(SessionError::AuthenticationFailure)));
}

/// Flipping bits in the persisted ciphertext makes open fail even with the
/// correct password.
#[test]
fn test_tamper_detection_ciphertext() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());

    let mut session = Session::init_state(Password::new("hunter2"), &sample_carrier(), None).unwrap();
    session.add("email", SecretValue::new("a@b.com")).unwrap();
    let record = session.export(&store).unwrap();

    let ciphertext = BASE64.decode(&record.ciphertext).unwrap();
    for (byte, bit) in [(0, 0), (ciphertext.len() / 2, 5), (ciphertext.len() - 1, 7)] {
        let mut tampered_bytes = ciphertext.clone();
        tampered_bytes[byte] ^= 1 << bit;

        let mut tampered = record.clone();
        tampered.ciphertext = BASE64.encode(&tampered_bytes);

        let result = Session::open(&tampered, Password::new("hunter2"));
        assert!(matches!(result, Err(SessionError::AuthenticationFailure)));
    }
}

/// Flipping bits in the authentication tag is detected the same way.
#[test]
fn test_tamper_detection_tag() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());

    let mut session = Session::init_state(Password::new("hunter2"), &sample_carrier(), None).unwrap();
    session.add("email", SecretValue::new("a@b.com")).unwrap();
    let record = session.export(&store).unwrap();

    let tag = BASE64.decode(&record.tag).unwrap();
    for (byte, bit) in [(0, 0), (tag.len() - 1, 7)] {
        let mut tampered_bytes = tag.clone();
        tampered_bytes[byte] ^= 1 << bit;

        let mut tampered = record.clone();
        tampered.tag = BASE64.encode(&tampered_bytes);

        let result = Session::open(&tampered, Password::new("hunter2"));
        assert!(matches!(result, Err(SessionError::AuthenticationFailure)));
    }
}

/// Share one field as plainsight text and recover it with
/// nothing but the text.
#[test]
fn test_plainsight_sharing_scenario() {
    let carrier = sample_carrier();
    let mut session = Session::init_state(Password::new("hunter2"), &carrier, None).unwrap();
    session.add("email", SecretValue::new("a@b.com")).unwrap();

    let stego = session.encrypt_field("email", &carrier).unwrap();

    // Same visible word count as the carrier
    assert_eq!(
        stego.split_whitespace().count(),
        carrier.text().split_whitespace().count()
    );

    // No session, no password: the text alone is enough
    let value = Session::decrypt_field(&stego).unwrap();
    assert_eq!(value.as_bytes(), b"a@b.com");
}

/// A payload too large for the carrier fails up front and produces nothing.
#[test]
fn test_plainsight_capacity_failure() {
    let tiny_carrier = Corpus::new("only a few words here");
    let mut session = Session::init_state(Password::new("pw"), &sample_carrier(), None).unwrap();
    session
        .add("key", SecretValue::new("a value far too long for five words"))
        .unwrap();

    let result = session.encrypt_field("key", &tiny_carrier);
    assert!(matches!(
        result,
        Err(SessionError::Stego(StegoError::CapacityExceeded { .. }))
    ));
}

/// Store invariants hold through the session API: failed operations leave
/// the field set unchanged.
#[test]
fn test_field_invariants_through_session() {
    let mut session = Session::init_state(Password::new("pw"), &sample_carrier(), None).unwrap();
    session.add("email", SecretValue::new("a@b.com")).unwrap();

    let result = session.add("email", SecretValue::new("evil@c.org"));
    assert!(matches!(
        result,
        Err(SessionError::Field(FieldError::DuplicateField(_)))
    ));
    assert_eq!(session.view("email").unwrap().as_bytes(), b"a@b.com");

    let result = session.remove("missing");
    assert!(matches!(
        result,
        Err(SessionError::Field(FieldError::FieldNotFound(_)))
    ));
    assert_eq!(session.list(), vec!["email"]);
}

/// Repeated export overwrites the same record; the session stays openable.
#[test]
fn test_export_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());

    let mut session = Session::init_state(Password::new("pw"), &sample_carrier(), None).unwrap();
    session.add("a", SecretValue::new("1")).unwrap();
    session.export(&store).unwrap();
    session.add("b", SecretValue::new("2")).unwrap();
    let record = session.export(&store).unwrap();

    assert_eq!(store.list().unwrap().len(), 1);

    let reopened = Session::open(&record, Password::new("pw")).unwrap();
    assert_eq!(reopened.list(), vec!["a", "b"]);
}

/// Named sessions resolve by name; destruct removes the record from disk.
#[test]
fn test_named_sessions_and_destruct() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());
    let carrier = sample_carrier();

    let work =
        Session::init_state(Password::new("pw1"), &carrier, Some("work".to_string())).unwrap();
    work.export(&store).unwrap();
    let home =
        Session::init_state(Password::new("pw2"), &carrier, Some("home".to_string())).unwrap();
    home.export(&store).unwrap();

    // Two sessions: no default, but names resolve
    assert!(matches!(store.resolve(None), Err(RecordError::Ambiguous)));
    let record = store.resolve(Some("work")).unwrap();
    assert_eq!(record.name.as_deref(), Some("work"));

    let session = Session::open(&record, Password::new("pw1")).unwrap();
    session.destruct(&store).unwrap();

    let remaining = store.list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name.as_deref(), Some("home"));
}

/// Larger field sets survive the full persist/reopen cycle unchanged.
#[test]
fn test_many_fields_round_trip() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());

    let mut session = Session::init_state(Password::new("pw"), &sample_carrier(), None).unwrap();
    for i in 0..20 {
        session
            .add(&format!("field-{i:02}"), SecretValue::new(format!("value {i}")))
            .unwrap();
    }
    let record = session.export(&store).unwrap();

    let reopened = Session::open(&record, Password::new("pw")).unwrap();
    assert_eq!(reopened.list().len(), 20);
    assert_eq!(reopened.view("field-07").unwrap().as_bytes(), b"value 7");
}
