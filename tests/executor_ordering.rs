// tests/executor_ordering.rs

mod common;
use crate::common::{init_tracing, recording_executor, sh, with_timeout};

use apkbench::exec::Command;
use apkbench::exec::dispatch::separator;

const THREADS: usize = 4;
const PER_THREAD: usize = 5;

/// Every block is `> ...`, two output lines, marker, separator, and all
/// output lines in a block carry the block's own id.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_submissions_never_interleave() {
    init_tracing();
    let (executor, observer) = recording_executor();

    std::thread::scope(|scope| {
        for t in 0..THREADS {
            let executor = &executor;
            scope.spawn(move || {
                for n in 0..PER_THREAD {
                    let id = format!("t{t}-n{n}");
                    executor.submit(Command::new(
                        sh(&format!("echo {id}-a; echo {id}-b")),
                        id.clone(),
                    ));
                }
            });
        }
    });

    let summary = with_timeout(executor.join()).await.unwrap();
    assert_eq!(summary.succeeded, THREADS * PER_THREAD);

    let blocks = observer.transcript_blocks();
    assert_eq!(blocks.len(), THREADS * PER_THREAD);

    let mut seen_per_thread = vec![Vec::new(); THREADS];
    for block in &blocks {
        assert_eq!(block.len(), 5, "unexpected block shape: {block:?}");
        assert!(block[0].starts_with("> sh -c echo "));
        assert_eq!(block[4], separator());

        let id = block[1]
            .strip_suffix("-a")
            .expect("first output line is the -a line");
        assert_eq!(block[2], format!("{id}-b"));
        assert!(block[0].contains(&format!("echo {id}-a")));

        let (t, n) = parse_id(id);
        seen_per_thread[t].push(n);
    }

    // Each submitter's commands ran in the order it submitted them.
    for (t, seen) in seen_per_thread.iter().enumerate() {
        let expected: Vec<usize> = (0..PER_THREAD).collect();
        assert_eq!(seen, &expected, "thread {t} out of order");
    }
}

#[tokio::test]
async fn statuses_follow_submission_order() {
    init_tracing();
    let (executor, observer) = recording_executor();

    let labels: Vec<String> = (0..6).map(|i| format!("step {i}")).collect();
    for label in &labels {
        executor.submit(Command::new(["true"], label.clone()));
    }
    with_timeout(executor.join()).await.unwrap();

    let announced: Vec<String> = observer
        .statuses()
        .into_iter()
        .filter(|s| s.starts_with("step "))
        .collect();
    assert_eq!(announced, labels);
}

fn parse_id(id: &str) -> (usize, usize) {
    let (t, n) = id
        .strip_prefix('t')
        .and_then(|rest| rest.split_once("-n"))
        .expect("id has the form tX-nY");
    (t.parse().unwrap(), n.parse().unwrap())
}
