use std::{collections::HashSet, fs, sync::Arc, thread};

use linelog::{Level, Logger};

const THREADS: usize = 8;
const LINES_PER_THREAD: usize = 25;

#[test]
fn concurrent_writers_do_not_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.log");
    let logger = Arc::new(Logger::create(&path).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..LINES_PER_THREAD {
                    let message = format!("thread {t} line {i}");
                    logger.log(Level::Info, "worker", &[message.as_str(), "ok"]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    Arc::into_inner(logger).unwrap().close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.matches('\n').count(), THREADS * LINES_PER_THREAD);

    // every line is complete and belongs to exactly one call
    let mut seen = HashSet::new();
    for line in contents.lines() {
        assert!(line.starts_with('['), "corrupt line: {line:?}");
        let (_, body) = line
            .split_once("]-[info]-[worker] ")
            .unwrap_or_else(|| panic!("corrupt line: {line:?}"));
        let body = body
            .strip_suffix(" : ok")
            .unwrap_or_else(|| panic!("corrupt body: {body:?}"));
        assert!(seen.insert(body.to_string()), "duplicate line: {body:?}");
    }
    for t in 0..THREADS {
        for i in 0..LINES_PER_THREAD {
            assert!(seen.contains(&format!("thread {t} line {i}")));
        }
    }
}

#[test]
fn concurrent_writers_respect_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("threshold.log");
    let logger = Arc::new(Logger::create(&path).unwrap());
    logger.set_level(Level::Error);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..LINES_PER_THREAD {
                    logger.log(Level::Debug, "worker", &["dropped"]);
                    logger.log(Level::Error, "worker", &["kept"]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    Arc::into_inner(logger).unwrap().close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.matches('\n').count(), THREADS * LINES_PER_THREAD);
    assert!(!contents.contains("dropped"));
}
