use super::SqliteStrandRecordRepository;
use crate::domain::strand_record::NewStrandRecord;
use crate::domain::types::QualityStatus;
use crate::repository::error::RepositoryError;
use crate::repository::strand_record_store::{RecordFilter, RecordOrder, StrandRecordStore};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_repo() -> SqliteStrandRecordRepository {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();
    SqliteStrandRecordRepository::new(Arc::new(Mutex::new(conn)))
}

fn ts(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 2)
        .unwrap()
        .and_hms_opt(9, minute, 0)
        .unwrap()
}

fn make_record(heat: &str, strand: &str, storage: &str, minute: u32) -> NewStrandRecord {
    NewStrandRecord {
        timestamp: ts(minute),
        shift: "A".to_string(),
        operator: "Khaled".to_string(),
        inspector: "Nour".to_string(),
        ccm: "CCM01".to_string(),
        heat: heat.to_string(),
        grade: "B500".to_string(),
        storage_loc: storage.to_string(),
        billet_count: 40,
        short_billet_length: None,
        sample_info: None,
        strand: strand.to_string(),
        d1: 130.0,
        d2: 131.25,
        rh: 1.25,
        status: QualityStatus::Pass,
    }
}

#[test]
fn test_append_and_find_by_id() {
    let repo = setup_repo();

    let mut record = make_record("H100", "S01", "SMS-Box", 0);
    record.short_billet_length = Some(3.2);
    record.sample_info = Some("头坯".to_string());

    let ids = repo.append(&[record]).unwrap();
    assert_eq!(ids.len(), 1);

    let found = repo.find_by_id(ids[0]).unwrap().expect("记录应存在");
    assert_eq!(found.heat, "H100");
    assert_eq!(found.date_only, "2025-04-02");
    assert_eq!(found.time_only, "09:00:00");
    assert_eq!(found.timestamp, ts(0));
    assert_eq!(found.rh, 1.25);
    assert_eq!(found.status, QualityStatus::Pass);
    assert_eq!(found.short_billet_length, Some(3.2));
    assert_eq!(found.sample_info.as_deref(), Some("头坯"));

    assert!(repo.find_by_id(ids[0] + 100).unwrap().is_none());
}

#[test]
fn test_identical_batches_get_distinct_ids() {
    let repo = setup_repo();
    let batch = vec![make_record("H1", "S01", "A", 0), make_record("H1", "S02", "A", 0)];

    let first = repo.append(&batch).unwrap();
    let second = repo.append(&batch).unwrap();

    assert_eq!(first.len(), 2);
    assert!(first[0] < first[1]);
    assert!(first[1] < second[0]);
    assert_eq!(repo.query_all(RecordOrder::IdAsc).unwrap().len(), 4);
}

#[test]
fn test_query_all_orders() {
    let repo = setup_repo();
    repo.append(&[make_record("H1", "S01", "A", 30)]).unwrap();
    repo.append(&[make_record("H2", "S01", "A", 10)]).unwrap();
    repo.append(&[make_record("H3", "S01", "A", 20)]).unwrap();

    let heats = |order| -> Vec<String> {
        repo.query_all(order)
            .unwrap()
            .into_iter()
            .map(|r| r.heat)
            .collect()
    };

    assert_eq!(heats(RecordOrder::IdAsc), vec!["H1", "H2", "H3"]);
    assert_eq!(heats(RecordOrder::IdDesc), vec!["H3", "H2", "H1"]);
    assert_eq!(heats(RecordOrder::TimestampDesc), vec!["H1", "H3", "H2"]);
}

#[test]
fn test_query_recent_limits_and_orders() {
    let repo = setup_repo();
    for i in 0..20 {
        repo.append(&[make_record(&format!("H{}", i), "S01", "A", i)]).unwrap();
    }

    let recent = repo.query_recent(15).unwrap();
    assert_eq!(recent.len(), 15);
    assert_eq!(recent[0].heat, "H19");
    assert_eq!(recent[14].heat, "H5");
    assert!(recent.windows(2).all(|w| w[0].id > w[1].id));
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let repo = setup_repo();
    repo.append(&[
        make_record("AB-2401", "S01", "SMS-Box", 0),
        make_record("ab-2402", "S02", "Yard-North", 1),
        make_record("CD-2403", "S03", "sms-box 2", 2),
    ])
    .unwrap();

    let by_heat = repo.search(&RecordFilter::by_heat("aB-24")).unwrap();
    assert_eq!(by_heat.len(), 2);
    assert_eq!(by_heat[0].heat, "ab-2402");

    let by_storage = repo.search(&RecordFilter::by_storage("SMS-BOX")).unwrap();
    assert_eq!(by_storage.len(), 2);

    let all = repo.search(&RecordFilter::by_heat("")).unwrap();
    assert_eq!(all.len(), 3);

    let none = repo.search(&RecordFilter::by_heat("ZZ")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_search_folds_non_ascii_case() {
    let repo = setup_repo();
    repo.append(&[
        make_record("ÄB-77", "S01", "Ödeme-Lager", 0),
        make_record("CD-78", "S02", "Halle Süd", 1),
    ])
    .unwrap();

    let by_storage = repo.search(&RecordFilter::by_storage("ödeme")).unwrap();
    assert_eq!(by_storage.len(), 1);
    assert_eq!(by_storage[0].storage_loc, "Ödeme-Lager");

    let by_storage = repo.search(&RecordFilter::by_storage("SÜD")).unwrap();
    assert_eq!(by_storage.len(), 1);
    assert_eq!(by_storage[0].heat, "CD-78");

    let by_heat = repo.search(&RecordFilter::by_heat("äb")).unwrap();
    assert_eq!(by_heat.len(), 1);
}

#[test]
fn test_failed_insert_rolls_back_whole_batch() {
    let repo = setup_repo();
    repo.append(&[make_record("H0", "S01", "A", 0)]).unwrap();

    // 第二条 rh 为 NaN，绑定为 NULL 后触发 NOT NULL 约束
    let good = make_record("H1", "S01", "A", 1);
    let mut bad = make_record("H1", "S02", "A", 1);
    bad.d2 = f64::NAN;
    bad.rh = f64::NAN;

    let result = repo.append(&[good, bad]);
    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));

    let all = repo.query_all(RecordOrder::IdAsc).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].heat, "H0");
    assert!(repo.search(&RecordFilter::by_heat("H1")).unwrap().is_empty());
}

#[test]
fn test_unknown_status_is_conversion_error() {
    let repo = setup_repo();
    repo.append(&[make_record("H1", "S01", "A", 0)]).unwrap();
    {
        let conn = repo.get_conn().unwrap();
        conn.execute("UPDATE strand_record SET status = 'MAYBE'", []).unwrap();
    }
    assert!(matches!(
        repo.query_all(RecordOrder::IdAsc),
        Err(RepositoryError::RowDecodeError { column: 12, .. })
    ));
}
