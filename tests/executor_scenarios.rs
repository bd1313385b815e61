// tests/executor_scenarios.rs

mod common;
use crate::common::{
    Event, MISSING_BINARY, RecordingSink, init_tracing, recording_executor, sh, with_timeout,
};

use apkbench::exec::Command;
use apkbench::exec::dispatch::{
    LAUNCH_ERROR_STATUS, SUCCESS_STATUS, failure_marker, failure_status, separator,
    success_marker,
};
use apkbench::observer::Progress;

#[tokio::test]
async fn echo_hello_produces_full_success_sequence() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.submit(Command::new(["echo", "hello"], "Echo test"));
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        observer.events(),
        vec![
            Event::ProgressVisible(true),
            Event::Progress(Progress::Indeterminate),
            Event::Status("Echo test".to_string()),
            Event::Append("> echo hello".to_string()),
            Event::Append("hello".to_string()),
            Event::ProgressVisible(false),
            Event::Status(SUCCESS_STATUS.to_string()),
            Event::Append(success_marker(0)),
            Event::Append(separator()),
        ]
    );
}

#[tokio::test]
async fn success_marker_mentions_exit_code_zero() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.submit(Command::new(sh("true"), "noop"));
    with_timeout(executor.join()).await.unwrap();

    let lines = observer.appended();
    let markers: Vec<_> = lines.iter().filter(|l| l.starts_with("[SUCCESS]")).collect();
    assert_eq!(markers.len(), 1);
    assert!(markers[0].contains('0'));
    assert!(!lines.iter().any(|l| l.starts_with("[ERROR]")));
}

#[tokio::test]
async fn nonzero_exit_reports_exact_code() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.submit(Command::new(sh("echo partial; exit 3"), "Failing"));
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(
        observer.appended(),
        vec![
            "> sh -c echo partial; exit 3".to_string(),
            "partial".to_string(),
            failure_marker(3),
            separator(),
        ]
    );
    assert_eq!(
        observer.statuses(),
        vec!["Failing".to_string(), failure_status(3)]
    );
    assert_eq!(observer.success_count(), 0);
}

#[tokio::test]
async fn missing_binary_is_reported_and_worker_keeps_going() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.submit(Command::new([MISSING_BINARY, "--flag"], "Broken"));
    executor.submit(Command::new(["echo", "still alive"], "Next"));
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 1);

    let blocks = observer.transcript_blocks();
    assert_eq!(blocks.len(), 2);

    let broken = &blocks[0];
    assert_eq!(broken[0], format!("> {MISSING_BINARY} --flag"));
    assert_eq!(broken.len(), 3, "announce, exception marker, separator");
    assert!(broken[1].starts_with("[EXCEPTION] "));
    assert!(broken[1].len() > "[EXCEPTION] ".len());
    assert!(!broken.iter().any(|l| l.starts_with("[SUCCESS]")));

    assert_eq!(blocks[1][1], "still alive");

    let statuses = observer.statuses();
    assert_eq!(statuses[1], LAUNCH_ERROR_STATUS);
    assert_eq!(statuses.last().map(String::as_str), Some(SUCCESS_STATUS));
}

#[tokio::test]
async fn stderr_is_merged_into_the_transcript_in_order() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.submit(Command::new(
        sh("echo 1; echo 2 >&2; echo 3; echo 4 >&2; echo 5"),
        "Interleaved",
    ));
    with_timeout(executor.join()).await.unwrap();

    let blocks = observer.transcript_blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0][1..6], ["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn sink_receives_output_and_failure_marker() {
    init_tracing();
    let (executor, observer) = recording_executor();
    let sink = RecordingSink::new();

    executor.submit(
        Command::new(sh("echo one; echo two >&2; exit 2"), "With sink").with_sink(sink.clone()),
    );
    executor.submit(Command::new(["echo", "not for the sink"], "No sink"));
    with_timeout(executor.join()).await.unwrap();

    let lines = sink.lines();
    assert_eq!(
        lines,
        vec!["one".to_string(), "two".to_string(), failure_marker(2)]
    );

    // Everything the sink saw also reached the observer.
    let appended = observer.appended();
    for line in &lines {
        assert!(appended.contains(line), "observer missing {line:?}");
    }
    assert!(!lines.contains(&"not for the sink".to_string()));
}

#[tokio::test]
async fn sink_receives_exception_marker_on_launch_failure() {
    init_tracing();
    let (executor, _observer) = recording_executor();
    let sink = RecordingSink::new();

    executor.submit(Command::new([MISSING_BINARY], "Broken").with_sink(sink.clone()));
    with_timeout(executor.join()).await.unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[EXCEPTION] "));
}

#[tokio::test]
async fn sink_receives_success_marker() {
    init_tracing();
    let (executor, _observer) = recording_executor();
    let sink = RecordingSink::new();

    executor.submit(Command::new(["echo", "ok"], "Echo").with_sink(sink.clone()));
    with_timeout(executor.join()).await.unwrap();

    assert_eq!(sink.lines(), vec!["ok".to_string(), success_marker(0)]);
}

#[tokio::test]
async fn report_error_reaches_observer() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.report_error("Please select an APK file to sign.");
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.executed(), 0);
    assert_eq!(
        observer.errors(),
        vec!["Please select an APK file to sign.".to_string()]
    );
}

#[tokio::test]
async fn error_reported_mid_command_is_shown_after_its_block() {
    init_tracing();
    let (executor, observer) = recording_executor();

    executor.submit(Command::new(sh("sleep 0.2; echo finished"), "Slow"));
    with_timeout(observer.wait_for_status("Slow")).await;
    executor.report_error("Please select an APK file to verify.");
    let summary = with_timeout(executor.join()).await.unwrap();
    assert_eq!(summary.succeeded, 1);

    let events = observer.events();
    let error_at = events
        .iter()
        .position(|e| matches!(e, Event::Error(_)))
        .expect("error delivered");
    let separator_at = events
        .iter()
        .position(|e| *e == Event::Append(separator()))
        .expect("separator delivered");

    assert!(error_at > separator_at, "error landed inside the command block: {events:?}");
    assert_eq!(
        observer.errors(),
        vec!["Please select an APK file to verify.".to_string()]
    );
}

#[tokio::test]
async fn failed_step_skips_the_rest_of_its_chain() {
    init_tracing();
    let (executor, observer) = recording_executor();

    let chain = Command::new(sh("echo keytool broke; exit 1"), "Generating test keystore...")
        .and_then(Command::new(["echo", "signed"], "Signing APK..."));
    executor.submit(chain);
    executor.submit(Command::new(["echo", "independent"], "Next"));
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.succeeded, 1, "later submissions still run");
    assert!(!summary.all_succeeded());

    let statuses = observer.statuses();
    assert!(!statuses.iter().any(|s| s == "Signing APK..."));
    assert!(!observer.appended().iter().any(|l| l == "signed"));

    let blocks = observer.transcript_blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1][1], "independent");

    assert_eq!(
        observer.errors(),
        vec![r#"Skipped "Signing APK..." because "Generating test keystore..." failed."#.to_string()]
    );
}

#[tokio::test]
async fn successful_chain_runs_every_step_in_order() {
    init_tracing();
    let (executor, observer) = recording_executor();

    let chain = Command::new(["echo", "first"], "First")
        .and_then(Command::new(["echo", "second"], "Second"))
        .and_then(Command::new(["echo", "third"], "Third"));
    assert_eq!(chain.chain_len(), 3);
    executor.submit(chain);
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.skipped, 0);
    let outputs: Vec<_> = observer
        .transcript_blocks()
        .into_iter()
        .map(|block| block[1].clone())
        .collect();
    assert_eq!(outputs, ["first", "second", "third"]);
    assert!(observer.errors().is_empty());
}

#[tokio::test]
async fn executor_without_observer_still_runs_commands() {
    init_tracing();
    let executor = apkbench::exec::CommandExecutor::new(None);
    let sink = RecordingSink::new();

    executor.submit(Command::new(["echo", "quiet"], "Quiet").with_sink(sink.clone()));
    let summary = with_timeout(executor.join()).await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(sink.lines()[0], "quiet");
}
