use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use assert_cmd::prelude::*;
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

static STAY_COUNTER: AtomicU64 = AtomicU64::new(0);

fn innkeep(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("innkeep").expect("failed to locate innkeep binary");
    cmd.stdout(Stdio::null()).stderr(Stdio::null());
    cmd.args(["--data-dir", data_dir.path().to_str().unwrap(), "--quiet"]);
    cmd
}

fn initialize_data_dir(data_dir: &TempDir) {
    let status = innkeep(data_dir)
        .args(["init", "--room", "1:General's Quarters", "--room", "2:Major's Suite"])
        .status()
        .expect("failed to execute innkeep init");
    assert!(status.success(), "innkeep init command failed");
}

fn reserve(data_dir: &TempDir, room: &str, checkin: NaiveDate, checkout: NaiveDate) -> bool {
    innkeep(data_dir)
        .args([
            "reserve",
            "--room",
            room,
            "--checkin",
            &checkin.to_string(),
            "--checkout",
            &checkout.to_string(),
            "--first-name",
            "Grace",
            "--last-name",
            "Hopper",
            "--email",
            "grace@example.com",
            "--phone",
            "555-0101",
        ])
        .status()
        .expect("failed to execute innkeep reserve")
        .success()
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date")
}

fn bench_cli_startup(c: &mut Criterion) {
    c.bench_function("cli_startup_version", |b| {
        b.iter(|| {
            let mut cmd = Command::cargo_bin("innkeep").expect("failed to locate innkeep binary");
            let output = cmd.arg("--version").output().expect("failed to run innkeep");
            black_box(output);
        });
    });
}

fn bench_cli_reserve(c: &mut Criterion) {
    let data_dir = TempDir::new().expect("failed to create temp dir");
    initialize_data_dir(&data_dir);

    c.bench_function("cli_reserve", |b| {
        b.iter(|| {
            // A fresh two-night stay every iteration
            let n = STAY_COUNTER.fetch_add(1, Ordering::Relaxed);
            let checkin = base_date() + Days::new(n * 2);
            assert!(reserve(&data_dir, "1", checkin, checkin + Days::new(2)));
        });
    });
}

fn bench_cli_search(c: &mut Criterion) {
    c.bench_function("cli_search", |b| {
        b.iter_batched(
            || {
                let data_dir = TempDir::new().expect("failed to create temp dir");
                initialize_data_dir(&data_dir);
                for n in 0..20 {
                    let checkin = base_date() + Days::new(n * 3);
                    reserve(&data_dir, "2", checkin, checkin + Days::new(2));
                }
                data_dir
            },
            |data_dir| {
                let status = innkeep(&data_dir)
                    .args(["search", "--checkin", "2030-01-10", "--checkout", "2030-01-20"])
                    .status()
                    .expect("failed to execute innkeep search");
                black_box(status);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_cli_calendar(c: &mut Criterion) {
    let data_dir = TempDir::new().expect("failed to create temp dir");
    initialize_data_dir(&data_dir);
    for n in 0..10 {
        let checkin = base_date() + Days::new(n * 3);
        reserve(&data_dir, "1", checkin, checkin + Days::new(2));
    }

    c.bench_function("cli_calendar_show", |b| {
        b.iter(|| {
            let status = innkeep(&data_dir)
                .args(["calendar", "show", "--month", "2030-01", "--session", "bench"])
                .status()
                .expect("failed to execute innkeep calendar show");
            black_box(status);
        });
    });
}

criterion_group!(
    benches,
    bench_cli_startup,
    bench_cli_reserve,
    bench_cli_search,
    bench_cli_calendar
);
criterion_main!(benches);
