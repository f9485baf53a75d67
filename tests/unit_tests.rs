use std::sync::Arc;
use vnx_exporter::{
    error::ExporterError,
    metrics::{parse_lun_count, parse_storage_pool, ExporterMetrics, StoragePoolPoller},
    navi::{NaviCliConfig, ScriptedRunner},
    WebConfig,
};

const STORAGEPOOL_LIST: &str = include_str!("fixtures/storagepool_list.txt");

/// Parse a captured `storagepool -list` header
#[test]
fn test_fixture_yields_expected_fields() {
    let record = parse_storage_pool(STORAGEPOOL_LIST).expect("fixture should parse");

    assert_eq!(record.available_capacity_gb, 847.681);
    assert_eq!(record.consumed_capacity_gb, 3553.957);
    assert_eq!(record.user_capacity_gb, 4401.638);
    assert_eq!(record.percent_full, 80.741);
    assert_eq!(record.total_subscribed_capacity_gb, 3827.726);
    assert_eq!(record.percent_subscribed, 86.962);
}

/// Output of `wc -l` carries a trailing newline
#[test]
fn test_lun_count_trailing_newline() {
    assert_eq!(parse_lun_count("512\n").unwrap(), 512.0);
    assert!(matches!(
        parse_lun_count("").unwrap_err(),
        ExporterError::ParseError(_)
    ));
}

/// A full poll cycle lands in the scrape output
#[test]
fn test_poll_cycle_is_visible_in_exposition() {
    let metrics = Arc::new(ExporterMetrics::new().unwrap());
    let runner = Arc::new(ScriptedRunner::new(vec![Ok(STORAGEPOOL_LIST.to_string())]));
    let poller = StoragePoolPoller::new(
        runner,
        NaviCliConfig::default().storage_pool_command(),
        Arc::clone(&metrics),
    );

    tokio_test::block_on(poller.poll_once()).expect("poll should succeed");

    let text = metrics.encode().unwrap();
    assert!(text.contains("vnx_available_capacity_in_gb 847.681"));
    assert!(text.contains("vnx_consumed_capacity_in_gb 3553.957"));
    assert!(text.contains("vnx_user_capacity_in_gb 4401.638"));
    assert!(text.contains("vnx_percent_full 80.741"));
    assert!(text.contains("vnx_total_subscribed_capacity_in_gb 3827.726"));
    assert!(text.contains("vnx_percent_subscribed 86.962"));
}

/// Test ExporterError formatting
#[test]
fn test_exporter_error_types() {
    let parse_error = ExporterError::parse_error("Failed to parse data");
    assert!(format!("{}", parse_error).contains("Failed to parse data"));

    let web_error = ExporterError::web_server_error("Server startup failed");
    assert!(format!("{}", web_error).contains("Server startup failed"));

    let config_error = ExporterError::config_error("Invalid configuration");
    assert!(format!("{}", config_error).contains("Invalid configuration"));
}

/// Test WebConfig builder pattern
#[test]
fn test_web_config() {
    let config = WebConfig::default()
        .with_host("127.0.0.1")
        .with_port(9090)
        .with_metrics_path("/probe");

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert_eq!(config.metrics_path, "/probe");
    assert_eq!(config.bind_address(), "127.0.0.1:9090");
}

/// Test WebConfig defaults
#[test]
fn test_web_config_defaults() {
    let config = WebConfig::default();
    assert_eq!(config.bind_address(), "0.0.0.0:9184");
    assert_eq!(config.metrics_path, "/metrics");
}

// Stub-CLI tests write and exec files; running them one at a time avoids
// ETXTBSY when another test forks while a stub is still open for writing.
#[cfg(unix)]
static STUB_CLI_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Write an executable stand-in for naviseccli into a fresh directory
#[cfg(unix)]
fn write_stub_cli(name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let dir = std::env::temp_dir().join(format!("vnx-exporter-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let stub = dir.join("naviseccli");
    std::fs::write(&stub, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();
    stub
}

/// Commands spawn the CLI directly and reduce its output in-process
#[cfg(unix)]
#[tokio::test]
async fn test_commands_with_stub_cli() {
    use vnx_exporter::{CommandRunner, ShellRunner};

    let _serial = STUB_CLI_LOCK.lock().await;
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/storagepool_list.txt");
    let stub = write_stub_cli(
        "ok",
        &format!(
            "case \"$*\" in\n  *getlun*) printf 'LOGICAL UNIT NUMBER 0\\nName LUN 0\\nLOGICAL UNIT NUMBER 1\\n' ;;\n  *) cat '{fixture}'; echo 'Disks:'; echo 'Bus 0 Enclosure 0 Disk 4' ;;\nesac\n"
        ),
    );

    let navi = NaviCliConfig::new("192.0.2.1", "admin", "secret", "Pool 0")
        .with_binary(stub.to_string_lossy());
    let runner = ShellRunner::new();

    let pool_output = runner.run(&navi.storage_pool_command()).await.unwrap();
    assert_eq!(pool_output.lines().count(), 26);
    assert_eq!(parse_storage_pool(&pool_output).unwrap().percent_full, 80.741);

    let lun_output = runner.run(&navi.lun_count_command()).await.unwrap();
    assert_eq!(parse_lun_count(&lun_output).unwrap(), 2.0);

    if let Some(dir) = stub.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

/// A failing CLI is a fatal poll error, never a zero LUN count
#[cfg(unix)]
#[tokio::test]
async fn test_failing_cli_fails_the_poll() {
    use vnx_exporter::{LunCountPoller, ShellRunner};

    let _serial = STUB_CLI_LOCK.lock().await;
    let stub = write_stub_cli("fail", "echo 'Error: Unable to validate the identity of the server' >&2\nexit 1\n");
    let navi = NaviCliConfig::default().with_binary(stub.to_string_lossy());
    let metrics = Arc::new(ExporterMetrics::new().unwrap());
    metrics.set_lun_count(7.0);

    let runner = Arc::new(ShellRunner::new());
    let lun_poller = LunCountPoller::new(
        Arc::clone(&runner),
        navi.lun_count_command(),
        Arc::clone(&metrics),
    );
    let err = lun_poller.poll_once().await.unwrap_err();
    assert!(matches!(err, ExporterError::Command { .. }), "got {err}");
    assert!(err.to_string().contains("Unable to validate"));
    assert_eq!(metrics.consumed_num_of_lun.get(), 7.0);

    let pool_poller = StoragePoolPoller::new(runner, navi.storage_pool_command(), metrics);
    let err = pool_poller.poll_once().await.unwrap_err();
    assert!(matches!(err, ExporterError::Command { .. }), "got {err}");

    if let Some(dir) = stub.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
