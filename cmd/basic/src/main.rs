//! Basic exitus walkthrough
//!
//! Builds a handful of error values, routes some of them through the logger
//! registry into `tracing`, and prints how each one looks to a caller.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=<filter>` - tracing filter (default: `info`)
//! - `EXITUS_DEMO_STACK=1` - also print the captured stack of the last error

use std::fs;
use std::panic;

use anyhow::Context;
use exitus::kind::{Filesystem, InvalidParameters, Unexpected, Unknown};
use exitus::{
    construct, ensure, exitus, is_error_value, set_logger_config, Caught, ErrorValue,
    ExResult, FsPayload, KindId, LogConfig, NewError, ParamsPayload, ResultExt, Severity,
    StackRequest,
};
use tracing_subscriber::EnvFilter;

const QUOTA_EXCEEDED: KindId = KindId::new("quota_exceeded", 100_001);

fn parse_workers(raw: &str) -> ExResult<usize, InvalidParameters> {
    let workers = raw
        .parse::<usize>()
        .err_kind(InvalidParameters, "workers is not a number")?;
    ensure!(workers > 0, InvalidParameters, "workers must be positive", {
        payload: ParamsPayload::param("workers").with_field("got", workers),
    });
    Ok(workers)
}

fn read_settings(path: &str) -> ExResult<String, Filesystem> {
    fs::read_to_string(path).map_err(|e| {
        construct(
            NewError::with_kind(Filesystem)
                .with_payload(FsPayload::file(path))
                .with_message("settings unreadable")
                .with_source(e)
                .with_log(Severity::Warn),
        )
    })
}

fn check_quota(used: u64, limit: u64) -> ExResult<(), KindId> {
    if used > limit {
        return Err(exitus!(QUOTA_EXCEEDED, "quota exceeded", {
            log: true.into(),
        }));
    }
    Ok(())
}

fn describe<K: exitus::Kind>(label: &str, err: &ErrorValue<K>) {
    println!("{}:", label);
    println!("  display:   {}", err);
    println!("  kind:      {}", err.error_kind());
    println!("  recognized {}", err.error_kind().is_recognized());
    println!("  is error:  {}", is_error_value(err));
    println!("  logged:    {:?}", err.logged());
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== exitus Basic Example ===\n");

    set_logger_config(LogConfig::tracing_from(Severity::Info));
    tracing::info!(severities = ?exitus::logger_config(), "logger registry installed");

    match parse_workers("eight") {
        Ok(n) => println!("workers: {}", n),
        Err(err) => describe("parse_workers(\"eight\")", &err),
    }
    match parse_workers("0") {
        Ok(n) => println!("workers: {}", n),
        Err(err) => {
            describe("parse_workers(\"0\")", &err);
            println!("  params:    {:?}\n", err.payload().params);
        }
    }

    if let Err(err) = read_settings("/nonexistent/exitus/settings.toml") {
        describe("read_settings", &err);
    }

    if let Err(err) = check_quota(12, 10) {
        describe("check_quota", &err);
    }

    // A panic absorbed as the caught exception.
    let prev_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let outcome = panic::catch_unwind(|| -> usize { panic!("worker state corrupted") });
    panic::set_hook(prev_hook);
    if let Err(payload) = outcome {
        let err = construct(
            NewError::with_kind(Unexpected)
                .with_caught(Caught::from_panic(payload))
                .with_context("worker", 3)
                .with_stack(StackRequest::Capture),
        );
        describe("caught panic", &err);
        if std::env::var("EXITUS_DEMO_STACK").is_ok_and(|v| v == "1") {
            println!("{}", err.stack().unwrap_or("<no stack>"));
        }
    }

    // An anyhow chain absorbed as the caught exception.
    let chained = fs::read("/nonexistent/exitus/blob")
        .context("loading blob")
        .map_err(|e| exitus!(Unknown, "blob load failed", caught = e));
    if let Err(err) = chained {
        describe("anyhow chain", &err);
    }

    // Unknown severity names never abort construction.
    let err = construct(NewError::new().with_message("misrouted").with_log("loud"));
    describe("invalid log request", &err);
}
