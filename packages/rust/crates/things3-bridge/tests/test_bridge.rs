//! Facade tests against an in-memory executor.

use std::cell::RefCell;

use things3_bridge::{BridgeError, DecodeError, ExecutionError, Script, ScriptExecutor, ThingsBridge};

/// Replays canned interpreter outcomes and records every script it receives.
struct FakeExecutor {
    outcome: Box<dyn Fn() -> Result<String, ExecutionError>>,
    seen: RefCell<Vec<Script>>,
}

impl FakeExecutor {
    fn returning(output: &str) -> Self {
        let output = output.to_string();
        Self {
            outcome: Box::new(move || Ok(output.clone())),
            seen: RefCell::new(vec![]),
        }
    }

    fn failing(stderr: &str) -> Self {
        let stderr = stderr.to_string();
        Self {
            outcome: Box::new(move || {
                Err(ExecutionError::Failed {
                    code: Some(1),
                    stderr: stderr.clone(),
                })
            }),
            seen: RefCell::new(vec![]),
        }
    }

    fn last_script(&self) -> Script {
        self.seen.borrow().last().cloned().unwrap()
    }
}

impl ScriptExecutor for FakeExecutor {
    fn execute(&self, script: &Script) -> Result<String, ExecutionError> {
        self.seen.borrow_mut().push(script.clone());
        (self.outcome)()
    }
}

fn bridge(executor: FakeExecutor) -> ThingsBridge<FakeExecutor> {
    ThingsBridge::with_executor(executor, "Things3")
}

#[test]
fn test_empty_inbox_yields_no_tasks() {
    let bridge = bridge(FakeExecutor::returning("[]"));
    let tasks = bridge.get_inbox_tasks().unwrap();
    assert!(tasks.is_empty());
    assert!(bridge.executor().last_script().source.contains("\"Inbox\""));
}

#[test]
fn test_today_task_without_due_date_or_tags() {
    let bridge = bridge(FakeExecutor::returning(
        r#"[{"title":"Call mom","notes":"","due_date":"","start_date":"","tags":"","when":""}]"#,
    ));
    let tasks = bridge.get_todays_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Call mom");
    assert_eq!(tasks[0].due_date, "");
    assert_eq!(tasks[0].tags, "");
    assert_eq!(tasks[0].start_date.as_deref(), Some(""));
}

#[test]
fn test_projects_areas_and_selection_decode() {
    let projects = bridge(FakeExecutor::returning(
        r#"[{"title":"Groceries","notes":"weekly"},{"title":"Garden","notes":""}]"#,
    ))
    .get_projects()
    .unwrap();
    assert_eq!(projects[0].title, "Groceries");
    assert_eq!(projects[0].notes, "weekly");
    assert_eq!(projects[1].title, "Garden");

    let areas = bridge(FakeExecutor::returning(r#"[{"title":"Home"}]"#))
        .get_areas()
        .unwrap();
    assert_eq!(areas[0].title, "Home");

    let selected = bridge(FakeExecutor::returning(r#"[{"title":"Buy milk","notes":"2%"}]"#))
        .get_current_selected_todos()
        .unwrap();
    assert_eq!(selected[0].notes, "2%");
}

#[test]
fn test_duplicate_titles_are_kept() {
    let tasks = bridge(FakeExecutor::returning(
        r#"[{"title":"Buy milk"},{"title":"Buy milk"}]"#,
    ))
    .get_inbox_tasks()
    .unwrap();
    assert_eq!(tasks.len(), 2);
}

#[test]
fn test_malformed_output_is_decode_error() {
    let err = bridge(FakeExecutor::returning("[{\"title\": \"Buy milk\",}]"))
        .get_inbox_tasks()
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Decode(DecodeError::InvalidJson { .. })
    ));
}

#[test]
fn test_failed_script_is_execution_error() {
    let err = bridge(FakeExecutor::failing("Can't get project \"Nope\". (-1728)"))
        .assign_project("Buy milk", "Nope")
        .unwrap_err();
    match err {
        BridgeError::Execution(ExecutionError::Failed { code, stderr }) => {
            assert_eq!(code, Some(1));
            assert!(stderr.contains("-1728"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_assign_project_without_match_succeeds() {
    let bridge = bridge(FakeExecutor::returning(""));
    bridge.assign_project("Buy milk", "Groceries").unwrap();

    let script = bridge.executor().last_script();
    assert_eq!(script.args, vec!["Buy milk", "Groceries"]);
}

#[test]
fn test_mutations_ignore_output() {
    let bridge = bridge(FakeExecutor::returning("not json at all"));
    bridge.assign_area("Buy milk", "Home").unwrap();
    bridge.set_tags("Buy milk", &["Errand", "Quick"]).unwrap();

    let script = bridge.executor().last_script();
    assert_eq!(script.args, vec!["Buy milk", "Errand", "Quick"]);
}

#[test]
fn test_hostile_titles_stay_out_of_source() {
    let hostile = r#"foo" & bad & "bar"#;
    let bridge = bridge(FakeExecutor::returning(""));
    bridge.assign_project(hostile, hostile).unwrap();
    bridge.assign_area(hostile, hostile).unwrap();
    bridge.set_tags(hostile, &[hostile]).unwrap();

    for script in bridge.executor().seen.borrow().iter() {
        assert!(!script.source.contains(hostile));
        assert!(script.args.iter().all(|arg| arg == hostile));
    }
}

#[test]
fn test_application_name_flows_into_scripts() {
    let bridge = ThingsBridge::with_executor(FakeExecutor::returning("[]"), "Things3 Beta");
    bridge.get_areas().unwrap();
    assert_eq!(bridge.application(), "Things3 Beta");
    assert!(
        bridge
            .executor()
            .last_script()
            .source
            .contains(r#"Application("Things3 Beta")"#)
    );
}
