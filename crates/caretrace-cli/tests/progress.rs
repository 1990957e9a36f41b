//! `caretrace progress` against saved event dumps.

use caretrace_testing::{EventBuilder, TestWorld, assertions, fixtures};

#[test]
fn test_no_session_selected_placeholder() {
    let world = TestWorld::new();
    let result = world.run(&["progress"]).expect("Failed to run progress");

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("No session selected."));
}

#[test]
fn test_no_session_selected_json() {
    let world = TestWorld::new().json();
    let result = world.run(&["progress", "--user", "7"]).unwrap();
    assert!(result.success());

    let json = result.json().unwrap();
    assertions::assert_badge_level(&json, "info").unwrap();
    assert_eq!(json["badge"]["label"], "No session selected.");
    assert!(json["content"]["session"].is_null());
    assert_eq!(json["content"]["agents"].as_array().unwrap().len(), 0);
}

#[test]
fn test_assessment_in_progress_from_dump() {
    let world = TestWorld::new().json();
    let input = world
        .write_events("session.json", &fixtures::assessment_in_progress())
        .unwrap();

    let result = world
        .run(&["progress", "--user", "7", "--session", "42", "--input", input.to_str().unwrap()])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_stage_statuses(
        &json,
        "assessment",
        &[
            ("Session Started", "finish"),
            ("Initial Chat", "finish"),
            ("PHQ in progress", "process"),
            ("Follow-up", "wait"),
        ],
    )
    .unwrap();
    assertions::assert_stage_statuses(
        &json,
        "classifier",
        &[("Session Ended", "wait"), ("Level Detection", "wait")],
    )
    .unwrap();
    assertions::assert_focus(&json, Some("assessment")).unwrap();

    let phq = &json["content"]["agents"][0]["stages"][2];
    let questions: Vec<&str> = phq["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|child| child["title"].as_str().unwrap())
        .collect();
    assert_eq!(questions, vec!["PHQ Q1", "PHQ Q2", "PHQ Q3"]);
    assert_eq!(json["content"]["session"]["session_id"], 42);
}

#[test]
fn test_completed_session_moves_focus_to_therapy() {
    let world = TestWorld::new().json();
    let input = world
        .write_events("session.json", &fixtures::complete_session())
        .unwrap();

    let result = world
        .run(&["progress", "--input", input.to_str().unwrap()])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_stage_statuses(
        &json,
        "classifier",
        &[("Session Ended", "finish"), ("Level Detection", "finish")],
    )
    .unwrap();
    assertions::assert_stage_statuses(
        &json,
        "therapy",
        &[("Breathing", "finish"), ("Journaling", "process")],
    )
    .unwrap();
    assertions::assert_focus(&json, Some("therapy")).unwrap();
    assert_eq!(json["badge"]["label"], "Therapy Agent in progress: Journaling");
}

#[test]
fn test_single_agent_view() {
    let world = TestWorld::new().json();
    let input = world
        .write_events("session.json", &fixtures::complete_session())
        .unwrap();

    let result = world
        .run(&["progress", "--agent", "Classifier", "--input", input.to_str().unwrap()])
        .unwrap();
    assert!(result.success());

    let json = result.json().unwrap();
    let agents = json["content"]["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["agent"], "classifier");
    assertions::assert_focus(&json, None).unwrap();
    assertions::assert_badge_level(&json, "success").unwrap();
}

#[test]
fn test_other_sessions_in_dump_are_ignored() {
    let world = TestWorld::new().json();
    let mut events = fixtures::assessment_in_progress();
    events.push(
        EventBuilder::classifier("2025-03-01T10:05:00")
            .tag("depression_detection")
            .ids(7, 99)
            .build(),
    );
    let input = world.write_events("mixed.json", &events).unwrap();

    let result = world
        .run(&["progress", "--user", "7", "--session", "42", "--input", input.to_str().unwrap()])
        .unwrap();

    let json = result.json().unwrap();
    assertions::assert_stage_statuses(
        &json,
        "classifier",
        &[("Session Ended", "wait"), ("Level Detection", "wait")],
    )
    .unwrap();
}

#[test]
fn test_text_output_marks_stages() {
    let world = TestWorld::new();
    let input = world
        .write_events("session.json", &fixtures::assessment_in_progress())
        .unwrap();

    let result = world
        .run(&[
            "progress",
            "--user",
            "7",
            "--session",
            "42",
            "--nickname",
            "amal",
            "--input",
            input.to_str().unwrap(),
        ])
        .unwrap();
    assert!(result.success());

    let stdout = result.stdout();
    assert!(stdout.contains("Session 42 · user 7 (amal)"));
    assert!(stdout.contains("Assessment Agent"));
    assert!(stdout.contains("● PHQ in progress"));
    assert!(stdout.contains("○ Follow-up"));
    // Piped output carries no ANSI escapes.
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_unreadable_dump_fails() {
    let world = TestWorld::new();
    let missing = world.temp_dir().join("missing.json");

    let result = world
        .run(&["progress", "--input", missing.to_str().unwrap()])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Error:"));
}

#[test]
fn test_unreachable_api_degrades_to_warning() {
    let world = TestWorld::new()
        .json()
        .with_config("api_base = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n");

    let result = world
        .run(&["progress", "--user", "7", "--session", "42"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_badge_level(&json, "warning").unwrap();
    assert_eq!(json["content"]["agents"].as_array().unwrap().len(), 0);
}
