//! End-to-end tests against the real API.
//!
//! Ignored by default. Run with `MILLION_VERIFIER_API_KEY` set and
//! `--ignored`; they spend credits.
//!
//! Shapes are checked on the raw JSON the API sends, fetched with
//! `Client::get_raw`, before the typed models get a chance to fill gaps.

use chrono::{Duration, Local, NaiveDateTime};
use millionverifier::{
    api_paths, ActionResponse, ApiErrorKind, ApiHost, Client, Config, CreditsSummary,
    EmailVerification, Error, FileInfo, FileList, FileStatus, ListFilesOptions, ReportEntry,
    ResponseShape, UploadOptions, WaitOptions, MAX_LIST_LIMIT,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

/// Key the API answers with canned, credit-free results
const FREE_API_KEY: &str = "API_KEY_FOR_TEST";

fn client() -> Client {
    Client::new(Config::from_env().unwrap()).unwrap()
}

fn free_client() -> Client {
    Client::new(Config {
        api_key: FREE_API_KEY.to_string(),
        ..Default::default()
    })
    .unwrap()
}

async fn raw_file_info(client: &Client, file_id: u64) -> Value {
    client
        .get_raw(
            ApiHost::Bulk,
            api_paths::FILE_INFO,
            vec![("file_id", Some(file_id.to_string()))],
        )
        .await
        .unwrap()
}

async fn raw_report(client: &Client, file_id: u64) -> Vec<Value> {
    let raw = client
        .get_raw(
            ApiHost::Bulk,
            api_paths::DOWNLOAD,
            vec![("file_id", Some(file_id.to_string()))],
        )
        .await
        .unwrap();
    match raw {
        Value::Array(rows) => rows,
        other => panic!("report for {file_id} is not an array: {other}"),
    }
}

fn assert_not_found(result: Result<impl std::fmt::Debug, Error>, operation: &str) {
    match result {
        Err(err) => assert_eq!(
            err.api_kind(),
            Some(ApiErrorKind::FileNotFound),
            "{operation}: {err}"
        ),
        Ok(value) => panic!("{operation} succeeded for file 0: {value:?}"),
    }
}

#[tokio::test]
#[ignore]
async fn live_verify_email() {
    let client = free_client();

    for address in [
        "matthew@gmail.com",
        "mark@outlook.com",
        "luke@hotmail.com",
        "john@yahoo.com",
    ] {
        let raw = client
            .get_raw(
                ApiHost::Single,
                api_paths::VERIFY,
                vec![
                    ("email", Some(address.to_string())),
                    ("timeout", Some("20".to_string())),
                ],
            )
            .await
            .unwrap();
        EmailVerification::check_shape(&raw).unwrap();

        let verification = client.verify_email(address, None).await.unwrap();
        assert_eq!(verification.email, address);
        assert_eq!(verification.resultcode, verification.result.code());
    }
}

#[tokio::test]
#[ignore]
async fn live_check_credits() {
    let client = client();

    let raw = client
        .get_raw(ApiHost::Single, api_paths::CREDITS, vec![])
        .await
        .unwrap();
    CreditsSummary::check_shape(&raw).unwrap();

    let credits = client.check_credits().await.unwrap();
    assert_eq!(Some(credits.credits), raw["credits"].as_u64());
}

#[tokio::test]
#[ignore]
async fn live_bad_api_key() {
    let client = Client::new(Config {
        api_key: "NOT-REAL-API-KEY".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = client.verify_email("fake-email", None).await.unwrap_err();
    assert!(
        matches!(
            err.api_kind(),
            Some(ApiErrorKind::InvalidApiKey | ApiErrorKind::IpAddressBlocked)
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
#[ignore]
async fn live_missing_file_is_not_found() {
    let client = client();

    assert_not_found(client.get_file_info(0).await, "get_file_info");
    assert_not_found(client.get_report(0, None).await, "get_report");
    assert_not_found(client.stop_file(0).await, "stop_file");
    assert_not_found(client.delete_file(0).await, "delete_file");
}

#[tokio::test]
#[ignore]
async fn live_bulk_lifecycle() {
    let client = client();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-data/test-emails.txt");

    let uploaded = client
        .upload_file(UploadOptions {
            file_path: path.to_string(),
            file_name: None,
        })
        .await
        .unwrap();
    assert_eq!(uploaded.file_name, "test-emails.txt");
    let file_id = uploaded.file_id;

    FileInfo::check_shape(&raw_file_info(&client, file_id).await).unwrap();
    let info = client.get_file_info(file_id).await.unwrap();
    assert_eq!(info.file_id, file_id);

    let all = client.list_files(None).await.unwrap();
    assert!(all.files.iter().any(|f| f.file_id == file_id));

    let stopped: ActionResponse = client.stop_file(file_id).await.unwrap();
    assert!(stopped.is_ok());

    let info = client
        .wait_for_file(
            file_id,
            Some(WaitOptions {
                max_attempts: Some(20),
                polling_interval: Some(3000),
            }),
        )
        .await
        .unwrap();
    assert!(matches!(
        info.status,
        FileStatus::Finished | FileStatus::Canceled
    ));

    for row in raw_report(&client, file_id).await {
        ReportEntry::check_shape(&row).unwrap();
    }

    let deleted = client.delete_file(file_id).await.unwrap();
    assert!(deleted.is_ok());
}

#[tokio::test]
#[ignore]
async fn live_list_files() {
    let client = client();

    let raw = client
        .get_raw(ApiHost::Bulk, api_paths::FILE_LIST, vec![])
        .await
        .unwrap();
    FileList::check_shape(&raw).unwrap();

    let list = client.list_files(None).await.unwrap();
    let expected = list.total.min(u64::from(MAX_LIST_LIMIT));
    assert_eq!(list.files.len() as u64, expected);
}

#[tokio::test]
#[ignore]
async fn live_list_files_status_filter() {
    let client = client();

    for status in FileStatus::all() {
        let options = ListFilesOptions {
            statuses: vec![*status],
            ..Default::default()
        };

        let raw = client
            .get_raw(ApiHost::Bulk, api_paths::FILE_LIST, options.query_params())
            .await
            .unwrap();
        FileList::check_shape(&raw).unwrap();

        let list = client.list_files(Some(options.clone())).await.unwrap();
        for file in &list.files {
            assert!(
                status.matches(file.status),
                "{} listed under {status}",
                file.status
            );
            assert!(options.matches(file));
        }
    }
}

/// A random `[from, to]` window between `start` and now, either end possibly open
fn random_window(
    rng: &mut impl Rng,
    start: NaiveDateTime,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let now = Local::now().naive_local();
    let span = (now - start).num_seconds().max(1) + 86_400;

    let from = rng
        .gen_bool(0.5)
        .then(|| now - Duration::seconds(rng.gen_range(0..span)));
    let to = rng.gen_bool(0.5).then(|| {
        let lower = from.unwrap_or(start);
        let room = (now - lower).num_seconds().max(0);
        now - Duration::seconds(rng.gen_range(0..=room))
    });
    (from, to)
}

fn random_filters(rng: &mut impl Rng, existing: &[FileInfo]) -> ListFilesOptions {
    let mut options = ListFilesOptions::default();

    if rng.gen_bool(0.5) {
        let ids: Vec<u64> = existing.iter().map(|f| f.file_id).collect();
        let max_id = ids.iter().copied().max().unwrap_or(0);
        let real = rng.gen_range(1..=ids.len().max(1));
        options.file_ids = ids.choose_multiple(rng, real).copied().collect();
        for _ in 0..rng.gen_range(0..=real) {
            options.file_ids.push(rng.gen_range(0..=max_id));
        }
        options.file_ids.sort_unstable();
        options.file_ids.dedup();
    }

    if rng.gen_bool(0.5) {
        options.name = ["csv", "nt", "a", "ck"].choose(rng).map(|n| n.to_string());
    }

    if rng.gen_bool(0.5) {
        let count = rng.gen_range(1..FileStatus::all().len());
        options.statuses = FileStatus::all()
            .choose_multiple(rng, count)
            .copied()
            .collect();
    }

    let start = existing
        .iter()
        .map(|f| f.updated_at.min(f.createdate))
        .min()
        .unwrap_or_else(|| Local::now().naive_local());
    (options.updated_at_from, options.updated_at_to) = random_window(rng, start);
    (options.create_date_from, options.create_date_to) = random_window(rng, start);

    if rng.gen_bool(0.5) {
        options.percent_from = Some(rng.gen_range(0..=100));
    }
    if rng.gen_bool(0.5) {
        options.percent_to = Some(rng.gen_range(options.percent_from.unwrap_or(0)..=100));
    }
    if rng.gen_bool(0.5) {
        options.has_error = Some(rng.gen_bool(0.5));
    }

    options
}

#[tokio::test]
#[ignore]
async fn live_list_files_random_filters() {
    let client = client();
    let existing = client.list_files(None).await.unwrap().files;
    if existing.is_empty() {
        return;
    }

    let mut rng = rand::thread_rng();
    for _ in 0..10 {
        let options = random_filters(&mut rng, &existing);
        options.validate().unwrap();

        let list = client.list_files(Some(options.clone())).await.unwrap();
        for file in &list.files {
            assert!(options.matches(file), "{file:?} does not match {options:?}");
        }
    }
}

#[tokio::test]
#[ignore]
async fn live_info_and_report_for_existing_files() {
    let client = client();
    let existing = client.list_files(None).await.unwrap().files;

    let picked: Vec<u64> = {
        let mut rng = rand::thread_rng();
        existing
            .choose_multiple(&mut rng, 10)
            .map(|f| f.file_id)
            .collect()
    };

    for file_id in picked {
        FileInfo::check_shape(&raw_file_info(&client, file_id).await).unwrap();
        let info = client.get_file_info(file_id).await.unwrap();
        assert_eq!(info.file_id, file_id);

        for row in raw_report(&client, file_id).await {
            ReportEntry::check_shape(&row).unwrap();
        }
        client.get_report(file_id, None).await.unwrap();
    }
}
