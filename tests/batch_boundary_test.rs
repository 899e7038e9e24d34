//! Flush accounting at and around batch boundaries

mod common;

use common::{config_yaml, MemoryStore};
use hbackup::config::BackupConfig;
use hbackup::core::export::{BatchedWriter, CsvSink, ExportPipeline, ExportRequest, FlushEvent, DEFAULT_BATCH_SIZE};
use hbackup::domain::Record;
use std::sync::{Arc, Mutex};
use test_case::test_case;

fn run_writer(records: usize, batch_size: usize) -> Vec<FlushEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let observed = Arc::clone(&events);

    let mut writer = BatchedWriter::open(CsvSink::new("null", std::io::sink()), &["n".to_string()], batch_size)
        .unwrap()
        .with_progress(move |event: &FlushEvent| observed.lock().unwrap().push(*event));
    for i in 0..records {
        writer.append(Record::from(vec![i.to_string()])).unwrap();
    }
    let stats = writer.close().unwrap();
    assert_eq!(stats.rows_written, records as u64);

    let events = events.lock().unwrap().clone();
    events
}

#[test_case(0 ; "no records")]
#[test_case(1 ; "one batch")]
#[test_case(3 ; "three batches")]
fn test_exact_multiples_end_with_empty_final_flush(k: usize) {
    let events = run_writer(DEFAULT_BATCH_SIZE * k, DEFAULT_BATCH_SIZE);

    assert_eq!(events.len(), k + 1);
    assert!(events[..k].iter().all(|e| e.records == DEFAULT_BATCH_SIZE && !e.is_final));
    let last = events[k];
    assert!(last.is_final);
    assert_eq!(last.records, 0);
    assert_eq!(last.total_rows, (DEFAULT_BATCH_SIZE * k) as u64);
}

#[test_case(0, 1 ; "single record")]
#[test_case(1, 1 ; "one over")]
#[test_case(2, 4999 ; "one short")]
fn test_remainder_goes_to_final_flush(k: usize, r: usize) {
    let events = run_writer(DEFAULT_BATCH_SIZE * k + r, DEFAULT_BATCH_SIZE);

    assert_eq!(events.len(), k + 1);
    assert_eq!(events[k].records, r);
    assert!(events[k].is_final);
}

#[test]
fn test_cumulative_totals_increase_per_flush() {
    let events = run_writer(25, 10);
    let totals: Vec<u64> = events.iter().map(|e| e.total_rows).collect();
    assert_eq!(totals, vec![10, 20, 25]);
}

#[tokio::test]
async fn test_pipeline_reports_flush_count() {
    let mut store = MemoryStore::new();
    for i in 0..7 {
        store = store.put("events", &format!("r{i:02}"), ("DF", "id"), 150, format!("v{i}"));
    }
    let config: BackupConfig =
        serde_yaml::from_str(&config_yaml(100, 200, "  id: string", "  id: ID", 3)).unwrap();

    let mut out = Vec::new();
    let summary = ExportPipeline::new(Arc::new(store))
        .run(&ExportRequest::from_config(&config), CsvSink::new("memory", &mut out))
        .await
        .unwrap();

    assert_eq!(summary.row_count, 7);
    assert_eq!(summary.batches_flushed, 3);
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(csv.lines().count(), 8);
    assert_eq!(csv.lines().nth(1), Some("v0"));
    assert_eq!(csv.lines().last(), Some("v6"));
}

#[test_case(12 ; "ends on a boundary")]
#[test_case(13 ; "one past a boundary")]
#[test_case(15 ; "one short of a boundary")]
#[tokio::test]
async fn test_rows_keep_scan_order_across_batches(rows: usize) {
    let mut store = MemoryStore::new();
    // Inserted out of key order; the scan returns them sorted.
    for i in (0..rows).rev() {
        store = store.put("events", &format!("r{i:03}"), ("DF", "n"), 150, i.to_string());
    }
    let config: BackupConfig =
        serde_yaml::from_str(&config_yaml(100, 200, "  n: string", "  n: N", 4)).unwrap();

    let mut out = Vec::new();
    let summary = ExportPipeline::new(Arc::new(store))
        .run(&ExportRequest::from_config(&config), CsvSink::new("memory", &mut out))
        .await
        .unwrap();

    assert_eq!(summary.row_count, rows as u64);
    assert!(summary.batches_flushed >= 4);
    let csv = String::from_utf8(out).unwrap();
    let written: Vec<String> = csv.lines().skip(1).map(str::to_string).collect();
    let expected: Vec<String> = (0..rows).map(|i| i.to_string()).collect();
    assert_eq!(written, expected);
}
