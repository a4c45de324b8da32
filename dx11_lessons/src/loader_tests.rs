use super::*;
use std::fs;
use std::time::{Duration, Instant};

// ============================================================================
// Helpers
// ============================================================================

fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Poll `task` until it yields, failing after a generous timeout
fn poll_until_ready(task: &mut LoadTask) -> Result<Vec<u8>> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(result) = task.try_take() {
            return result;
        }
        assert!(Instant::now() < deadline, "load of {:?} timed out", task.path());
        thread::sleep(Duration::from_millis(1));
    }
}

// ============================================================================
// load_binary_file tests
// ============================================================================

#[test]
fn test_load_binary_file_reads_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "shader.cso", &[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(load_binary_file(&path).unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_load_binary_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_binary_file(dir.path().join("missing.cso"));
    match result {
        Err(Error::InvalidResource(message)) => assert!(message.contains("missing.cso")),
        other => panic!("unexpected result {:?}", other),
    }
}

// ============================================================================
// LoadTask tests
// ============================================================================

#[test]
fn test_task_yields_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "a.bin", b"hello");
    let loader = AssetLoader::new(2).unwrap();

    let mut task = loader.load(&path);
    assert_eq!(poll_until_ready(&mut task).unwrap(), b"hello".to_vec());
    assert!(task.try_take().is_none());
}

#[test]
fn test_task_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = AssetLoader::new(1).unwrap();

    let mut task = loader.load(dir.path().join("nope.dds"));
    assert!(matches!(poll_until_ready(&mut task), Err(Error::InvalidResource(_))));
}

#[test]
fn test_task_wait_blocks_for_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "b.bin", &[1, 2, 3]);
    let loader = AssetLoader::new(1).unwrap();

    assert_eq!(loader.load(&path).wait().unwrap(), vec![1, 2, 3]);
}

// ============================================================================
// LoadBatch tests
// ============================================================================

#[test]
fn test_batch_finishes_in_submission_order() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..8u8)
        .map(|i| write_file(&dir, &format!("face{}.png", i), &[i; 16]))
        .collect();
    let loader = AssetLoader::new(4).unwrap();
    let mut batch = loader.load_all(paths.iter().cloned());
    assert_eq!(batch.len(), 8);

    let deadline = Instant::now() + Duration::from_secs(10);
    let results = loop {
        let progress = batch.progress();
        assert!((0.0..=1.0).contains(&progress));
        if let Some(results) = batch.try_finish() {
            break results;
        }
        assert!(Instant::now() < deadline, "batch timed out");
        thread::sleep(Duration::from_millis(1));
    };

    assert_eq!(results.len(), 8);
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), vec![i as u8; 16]);
    }
}

#[test]
fn test_batch_progress_reaches_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "c.bin", b"x");
    let loader = AssetLoader::new(1).unwrap();
    let mut batch = LoadBatch::new();
    batch.push(loader.load(&path));

    let deadline = Instant::now() + Duration::from_secs(10);
    while batch.progress() < 1.0 {
        assert!(Instant::now() < deadline, "batch timed out");
        thread::sleep(Duration::from_millis(1));
    }
    assert!(batch.try_finish().is_some());
}

#[test]
fn test_batch_yields_results_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "e.bin", b"once");
    let loader = AssetLoader::new(1).unwrap();
    let mut batch = LoadBatch::new();
    batch.push(loader.load(&path));

    let deadline = Instant::now() + Duration::from_secs(10);
    let results = loop {
        if let Some(results) = batch.try_finish() {
            break results;
        }
        assert!(Instant::now() < deadline, "batch timed out");
        thread::sleep(Duration::from_millis(1));
    };
    assert_eq!(results.len(), 1);

    assert!(batch.try_finish().is_none());
    assert_eq!(batch.progress(), 1.0);
}

#[test]
fn test_batch_reopens_after_push() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "f.bin", b"again");
    let loader = AssetLoader::new(1).unwrap();
    let mut batch = LoadBatch::new();
    assert_eq!(batch.try_finish().map(|r| r.len()), Some(0));
    assert!(batch.try_finish().is_none());

    batch.push(loader.load(&path));
    let deadline = Instant::now() + Duration::from_secs(10);
    let results = loop {
        if let Some(results) = batch.try_finish() {
            break results;
        }
        assert!(Instant::now() < deadline, "batch timed out");
        thread::sleep(Duration::from_millis(1));
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results.into_iter().next().unwrap().unwrap(), b"again".to_vec());
}

#[test]
fn test_empty_batch_is_complete() {
    let mut batch = LoadBatch::new();
    assert!(batch.is_empty());
    assert_eq!(batch.progress(), 1.0);
    assert_eq!(batch.try_finish().map(|r| r.len()), Some(0));
}

#[test]
fn test_batch_wait_keeps_failures_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(&dir, "good.bin", b"ok");
    let loader = AssetLoader::new(2).unwrap();

    let batch = loader.load_all([good.clone(), dir.path().join("bad.bin"), good]);
    let results = batch.wait();

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

// ============================================================================
// Lifecycle tests
// ============================================================================

#[test]
fn test_zero_workers_spawns_one() {
    let loader = AssetLoader::new(0).unwrap();
    assert_eq!(loader.worker_count(), 1);
}

#[test]
fn test_drop_joins_after_pending_work() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "d.bin", b"late");
    let loader = AssetLoader::new(1).unwrap();

    let task = loader.load(&path);
    drop(loader);

    // Jobs queued before the drop are still served
    assert_eq!(task.wait().unwrap(), b"late".to_vec());
}
