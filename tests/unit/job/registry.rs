use std::path::PathBuf;

use super::*;

#[test]
fn lifecycle_create_checkpoint_complete() {
    let registry = JobRegistry::new();
    let id = registry.create();

    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Processing);
    assert_eq!(job.progress, 0);

    registry.checkpoint(&id, 40, "building timeline");
    let job = registry.get(&id).unwrap();
    assert_eq!(job.progress, 40);
    assert_eq!(job.message.as_deref(), Some("building timeline"));

    registry.complete(&id, PathBuf::from("out.mp4"));
    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress, 100);
    assert_eq!(job.output_path, Some(PathBuf::from("out.mp4")));
}

#[test]
fn failed_jobs_keep_their_message() {
    let registry = JobRegistry::new();
    let id = registry.create();
    registry.fail(&id, "synthesis collaborator timed out");

    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("synthesis collaborator timed out"));
}

#[test]
fn entries_persist_until_explicit_cleanup() {
    let registry = JobRegistry::new();
    let a = registry.create();
    let b = registry.create();
    assert_eq!(registry.len(), 2);

    registry.complete(&a, PathBuf::from("a.mp4"));
    // Completion does not evict.
    assert_eq!(registry.len(), 2);

    assert!(registry.remove(&a).is_some());
    assert!(registry.get(&a).is_none());
    assert!(registry.get(&b).is_some());
    assert_eq!(registry.len(), 1);
}

#[test]
fn polls_see_writer_checkpoints_across_threads() {
    let registry = JobRegistry::new();
    let id = registry.create();

    let writer = {
        let registry = registry.clone();
        let id = id.clone();
        std::thread::spawn(move || {
            for pct in [10u8, 30, 60, 90] {
                registry.checkpoint(&id, pct, "working");
            }
            registry.complete(&id, PathBuf::from("done.mp4"));
        })
    };

    writer.join().unwrap();
    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
}

#[test]
fn progress_is_clamped_to_100() {
    let registry = JobRegistry::new();
    let id = registry.create();
    registry.checkpoint(&id, 250, "overshoot");
    assert_eq!(registry.get(&id).unwrap().progress, 100);
}
