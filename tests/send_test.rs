#[path = "common/mod.rs"]
mod common;

use common::{MailformTest, USERS_JSON};

// ============================================================================
// send
// ============================================================================

#[test]
fn test_send_single_recipient() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let output = mailform.run_success(&[
        "send",
        "--to",
        "bob",
        "-s",
        "Hello",
        "-d",
        "Meeting at noon",
    ]);
    assert!(output.contains("Submitted Data"));
    assert!(output.contains("Hello"));
    assert!(output.contains("- bob@example.com"));
}

#[test]
fn test_send_json_payload() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let output = mailform.run_success(&[
        "send",
        "--to",
        "ann@example.com",
        "--to",
        "Bob",
        "--subject",
        "  Hello  ",
        "--description",
        "Meeting at noon",
        "--json",
    ]);
    let payload: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(payload["subject"], "Hello");
    assert_eq!(payload["description"], "Meeting at noon");
    let recipients = payload["recipients"].as_array().unwrap();
    assert_eq!(recipients.len(), 2);
    assert_eq!(recipients[0]["id"], 1);
    assert_eq!(recipients[1]["id"], 3);
}

#[test]
fn test_send_all() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let output = mailform.run_success(&[
        "send",
        "--all",
        "-s",
        "Hi all",
        "-d",
        "Quarterly update",
        "--json",
    ]);
    let payload: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(payload["recipients"].as_array().unwrap().len(), 3);
}

#[test]
fn test_send_without_recipients() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let output = mailform.run(&["send", "-s", "Hello", "-d", "Meeting at noon"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please add at least one recipient"));
}

#[test]
fn test_send_reports_every_field() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let output = mailform.run(&["send", "--to", "bob", "-d", "short", "--json"]);
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["errors"]["subject"], "Subject is required.");
    assert_eq!(json["errors"]["description"], "Must be at least 10 characters");
    assert!(json["errors"].get("email").is_none());
}

#[test]
fn test_send_ambiguous_recipient() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let stderr = mailform.run_failure(&["send", "--to", "ann", "-s", "Hi", "-d", "0123456789"]);
    assert!(stderr.contains("matches several users"));
    assert!(stderr.contains("anna@example.com"));
}

#[test]
fn test_send_unknown_recipient() {
    let mailform = MailformTest::with_directory(USERS_JSON);

    let stderr = mailform.run_failure(&["send", "--to", "zed", "-s", "Hi", "-d", "0123456789"]);
    assert!(stderr.contains("no user matches 'zed'"));
}
