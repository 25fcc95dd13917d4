use std::io::ErrorKind;

use pager_core::config::config::MemoryConfig;
use pager_core::fault::fault::Fault;
use pager_core::manager::manager::MemoryManager;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn demo_manager() -> MemoryManager {
    MemoryManager::new(MemoryConfig::default())
}

// 8 frames of 32 bytes, room for 4 processes of up to 256 bytes.
fn small_manager() -> MemoryManager {
    MemoryManager::new(MemoryConfig::new(32, 256, 256, 4).unwrap())
}

fn frames_of(mm: &MemoryManager, pid: usize) -> Vec<Option<usize>> {
    mm.mappings(pid).unwrap().iter().map(|m| m.frame).collect()
}

#[test]
fn create_starts_fully_unmapped() {
    let mut mm = demo_manager();
    let pid = mm.create(256).unwrap();
    assert_eq!(pid, 0);

    let mappings = mm.mappings(pid).unwrap();
    assert_eq!(mappings.len(), 8);
    assert!(mappings.iter().all(|m| !m.present()));
    assert_eq!(mm.allocated_pages(), 8);
    assert_eq!(mm.free_frames(), 256);
}

#[test]
fn create_rejects_bad_sizes_without_side_effects() {
    let mut mm = demo_manager();
    for size in [0, 513, usize::MAX] {
        let err = mm.create(size).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(Fault::of(&err), Some(Fault::InvalidArgument));
    }
    assert!(mm.running_pids().is_empty());
    assert_eq!(mm.allocated_pages(), 0);
    assert_eq!(mm.create(512).unwrap(), 0);
}

#[test]
fn create_fails_when_slots_run_out() {
    let mut mm = small_manager();
    for expected in 0..4 {
        assert_eq!(mm.create(32).unwrap(), expected);
    }
    let err = mm.create(32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceBusy);
    assert_eq!(mm.allocated_pages(), 4);
}

#[test]
fn admission_budget_counts_reserved_pages_not_frames() {
    let mut mm = small_manager();
    mm.create(160).unwrap(); // 5 pages
    let err = mm.create(128).unwrap_err(); // 4 more would make 9 > 8
    assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    assert_eq!(mm.allocated_pages(), 5);

    // nothing has been touched, yet the budget is what limits admission
    assert_eq!(mm.free_frames(), 8);
    assert_eq!(mm.create(96).unwrap(), 1);
    assert_eq!(mm.allocated_pages(), 8);
}

#[test]
fn unique_pids_until_destroyed() {
    let mut mm = demo_manager();
    let a = mm.create(64).unwrap();
    let b = mm.create(64).unwrap();
    let c = mm.create(64).unwrap();
    assert_eq!((a, b, c), (0, 1, 2));

    mm.destroy(b).unwrap();
    assert_eq!(mm.create(32).unwrap(), 1);
    assert_eq!(mm.create(32).unwrap(), 3);
}

#[test]
fn write_then_read_round_trips_across_pages() {
    let mut mm = demo_manager();
    let pid = mm.create(200).unwrap();

    let data: Vec<u8> = (0..100u8).collect();
    mm.write(pid, 20, &data).unwrap();
    assert_eq!(mm.read_vec(pid, 20, 100).unwrap(), data);

    // an inner window of the same range
    assert_eq!(mm.read_vec(pid, 31, 2).unwrap(), vec![11, 12]);

    let mut buf = [0u8; 4];
    mm.read(pid, 64, &mut buf).unwrap();
    assert_eq!(buf, [44, 45, 46, 47]);
}

#[test]
fn randomized_round_trips() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut mm = demo_manager();
    let pid = mm.create(512).unwrap();

    for _ in 0..200 {
        let addr = rng.random_range(0..512);
        let len = rng.random_range(1..=512 - addr);
        let mut data = vec![0u8; len];
        rng.fill(&mut data[..]);

        mm.write(pid, addr, &data).unwrap();
        assert_eq!(mm.read_vec(pid, addr, len).unwrap(), data, "addr={addr} len={len}");
    }
    assert_eq!(mm.read_vec(pid, 0, 512).unwrap().len(), 512);
    assert_eq!(mm.free_frames(), 256 - 16);
}

#[test]
fn out_of_range_access_always_fails() {
    let mut mm = demo_manager();
    let pid = mm.create(100).unwrap();

    for (addr, len) in [(100, 1), (100, 50), (0, 101), (99, 2), (50, 51), (0, 0), (10, 0), (1000, 1)] {
        let err = mm.write(pid, addr, &vec![0; len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "write addr={addr} len={len}");
        let err = mm.read_vec(pid, addr, len).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "read addr={addr} len={len}");
    }

    // rejected calls map nothing
    assert_eq!(mm.free_frames(), 256);
    assert!(mm.read_vec(pid, 99, 1).is_ok());
}

#[test]
fn operations_on_missing_pid_are_invalid_references() {
    let mut mm = demo_manager();
    let pid = mm.create(64).unwrap();
    mm.destroy(pid).unwrap();

    assert_eq!(mm.destroy(pid).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(mm.read_vec(pid, 0, 1).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(mm.write(pid, 0, &[1]).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(mm.mappings(pid).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(mm.destroy(99).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(Fault::of(&mm.destroy(99).unwrap_err()), Some(Fault::InvalidReference));
}

#[test]
fn mapped_pages_keep_their_frame() {
    let mut mm = demo_manager();
    let a = mm.create(128).unwrap();
    let b = mm.create(128).unwrap();

    mm.write(a, 40, &[1, 2, 3]).unwrap();
    let before = frames_of(&mm, a);
    assert_eq!(before, vec![None, Some(0), None, None]);

    mm.write(b, 0, &[9; 128]).unwrap();
    mm.read_vec(a, 0, 128).unwrap();
    mm.write(a, 32, &[7; 32]).unwrap();

    let after = frames_of(&mm, a);
    assert_eq!(after[1], Some(0));
    assert_eq!(after, vec![Some(5), Some(0), Some(6), Some(7)]);
}

#[test]
fn first_fit_reuses_lowest_freed_frame() {
    let mut mm = small_manager();
    let a = mm.create(64).unwrap();
    let b = mm.create(64).unwrap();
    let c = mm.create(128).unwrap();
    mm.write(a, 0, &[1; 64]).unwrap();
    mm.write(b, 0, &[2; 64]).unwrap();
    mm.write(c, 0, &[3; 128]).unwrap();
    assert_eq!(mm.free_frames(), 0);
    assert_eq!(frames_of(&mm, b), vec![Some(2), Some(3)]);

    mm.destroy(b).unwrap();
    let d = mm.create(32).unwrap();
    assert_eq!(d, 1);
    mm.read_vec(d, 0, 1).unwrap();
    assert_eq!(frames_of(&mm, d), vec![Some(2)]);
}

#[test]
fn range_mapping_takes_remaining_frames_first_fit() {
    let mut mm = MemoryManager::new(MemoryConfig::new(16, 96, 64, 3).unwrap()); // 6 frames
    let a = mm.create(32).unwrap(); // 2 pages
    let b = mm.create(64).unwrap(); // 4 pages
    mm.write(a, 0, &[1; 32]).unwrap(); // frames 0, 1
    mm.write(b, 16, &[2; 16]).unwrap(); // page 1 -> frame 2
    mm.destroy(a).unwrap(); // frames 0, 1 free again; 3, 4, 5 still free
    let c = mm.create(32).unwrap();
    mm.write(c, 0, &[3; 32]).unwrap(); // frames 0, 1
    mm.write(b, 48, &[4; 16]).unwrap(); // page 3 -> frame 3
    assert_eq!(mm.free_frames(), 2);

    // b's pages 0 and 2 need two frames: exactly enough
    let before = frames_of(&mm, b);
    assert_eq!(before, vec![None, Some(2), None, Some(3)]);
    mm.write(b, 0, &[5; 64]).unwrap();
    assert_eq!(frames_of(&mm, b), vec![Some(4), Some(2), Some(5), Some(3)]);
    assert_eq!(mm.free_frames(), 0);
}

#[test]
fn destroy_returns_budget_and_frames() {
    let mut mm = demo_manager();
    let a = mm.create(128).unwrap();
    let b = mm.create(128).unwrap();
    mm.write(a, 0, &[1; 128]).unwrap();
    mm.write(b, 0, &[2; 128]).unwrap();
    assert_eq!(mm.free_frames(), 248);
    assert_eq!(mm.allocated_pages(), 8);

    let b_frames = frames_of(&mm, b);
    mm.destroy(a).unwrap();
    assert_eq!(mm.free_frames(), 252);
    assert_eq!(mm.allocated_pages(), 4);
    assert!(!mm.is_running(a));
    assert_eq!(frames_of(&mm, b), b_frames);
    assert_eq!(mm.read_vec(b, 0, 128).unwrap(), vec![2; 128]);

    // a's frames are the next ones handed out
    let c = mm.create(32).unwrap();
    mm.read_vec(c, 0, 1).unwrap();
    assert_eq!(frames_of(&mm, c), vec![Some(0)]);
}

#[test]
fn demo_scenario_read_maps_pages_in_order() {
    let mut mm = demo_manager();
    let pid = mm.create(256).unwrap();
    assert_eq!(pid, 0);

    let data = mm.read_vec(pid, 0, 234).unwrap();
    assert_eq!(data.len(), 234);
    assert_eq!(mm.free_frames(), 248);
    let expected: Vec<Option<usize>> = (0..8).map(Some).collect();
    assert_eq!(frames_of(&mm, pid), expected);

    mm.destroy(pid).unwrap();
    assert_eq!(mm.free_frames(), 256);
    assert_eq!(mm.allocated_pages(), 0);
    assert_eq!(mm.create(256).unwrap(), 0);
}

#[test]
fn frame_owners_track_each_process() {
    let mut mm = demo_manager();
    let a = mm.create(64).unwrap();
    let b = mm.create(64).unwrap();
    mm.write(b, 0, &[1]).unwrap();
    mm.write(a, 32, &[1]).unwrap();

    let owners = mm.frame_owners();
    assert_eq!(owners.len(), 256);
    assert_eq!(owners[0], Some(b));
    assert_eq!(owners[1], Some(a));
    assert!(owners[2..].iter().all(Option::is_none));
}
