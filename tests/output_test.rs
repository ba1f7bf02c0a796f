//! Tests for result serialization and the end-to-end `convert` entry point.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use convert_uuid::engine::{DispatchReport, DispatcherConfig, Unresolved, convert};
use convert_uuid::error::Error;
use convert_uuid::lookup::{LookupError, ProfileLookup};
use convert_uuid::model::Identifier;
use convert_uuid::output::{write_properties_at, write_unresolved};
use convert_uuid::store::ResultStore;
use std::io::{self, Write};
use std::sync::Arc;

/// Resolves every name to `uuid-<name>` except "ghost".
struct EchoLookup;

#[async_trait]
impl ProfileLookup for EchoLookup {
    async fn resolve(&self, username: &str) -> Result<Identifier, LookupError> {
        if username == "ghost" {
            Err(LookupError::NotFound)
        } else {
            Ok(Identifier::new(format!("uuid-{username}")))
        }
    }
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn body_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.starts_with('#')).collect()
}

#[test]
fn properties_layout_matches_java_format() {
    let entries = vec![
        ("alice".to_string(), Identifier::new("uuid-alice")),
        ("bob".to_string(), Identifier::new("uuid-bob")),
    ];
    let timestamp = Utc.with_ymd_and_hms(2013, 12, 1, 8, 30, 0).unwrap();
    let mut out = Vec::new();

    write_properties_at(&entries, &mut out, "Generated by ConvertUUID", timestamp).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "#Generated by ConvertUUID\n\
         #Sun Dec 01 08:30:00 UTC 2013\n\
         alice=uuid-alice\n\
         bob=uuid-bob\n"
    );
}

#[tokio::test]
async fn convert_writes_one_line_per_resolved_username() {
    let store = ResultStore::new();
    let mut out = Vec::new();

    let report = convert(
        Arc::new(EchoLookup),
        &store,
        names(&["bob", "alice"]),
        DispatcherConfig::with_max_concurrency(1),
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("#Generated by ConvertUUID\n"));
    assert_eq!(body_lines(&text), vec!["alice=uuid-alice", "bob=uuid-bob"]);
    assert_eq!(report.resolved, 2);
}

#[tokio::test]
async fn unresolved_only_input_still_writes_header() {
    let store = ResultStore::new();
    let mut out = Vec::new();

    let report = convert(
        Arc::new(EchoLookup),
        &store,
        names(&["ghost"]),
        DispatcherConfig::default(),
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(body_lines(&text).is_empty());
    assert_eq!(report.unresolved.len(), 1);
}

#[tokio::test]
async fn sink_failure_is_fatal_but_results_survive() {
    let store = ResultStore::new();

    let result = convert(
        Arc::new(EchoLookup),
        &store,
        names(&["alice", "ghost"]),
        DispatcherConfig::default(),
        BrokenSink,
    )
    .await;

    assert!(matches!(result, Err(Error::Output(_))));
    assert_eq!(store.get("alice"), Some(Identifier::new("uuid-alice")));
}

#[test]
fn unresolved_report_lists_username_and_reason() {
    let report = DispatchReport {
        unresolved: vec![
            Unresolved {
                username: "ghost".to_string(),
                reason: LookupError::NotFound,
            },
            Unresolved {
                username: "flaky".to_string(),
                reason: LookupError::Transient("timed out".to_string()),
            },
        ],
        ..Default::default()
    };
    let mut out = Vec::new();

    write_unresolved(&report, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ghost\tno profile exists for this username\n\
         flaky\ttransient failure: timed out\n"
    );
}

#[test]
fn unresolved_usernames_with_tabs_stay_on_one_field() {
    let report = DispatchReport {
        unresolved: vec![Unresolved {
            username: "odd\tname".to_string(),
            reason: LookupError::Rejected(400),
        }],
        ..Default::default()
    };
    let mut out = Vec::new();

    write_unresolved(&report, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "odd\\tname\tlookup rejected with status 400\n");
    assert_eq!(text.trim_end().split('\t').count(), 2);
}
