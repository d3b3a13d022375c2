//! Tests for [`dbot_telegram::TelegramBotAdapter`] file access against a mockito server standing
//! in for the Bot API (`getFile` plus the file endpoint).

use dbot_core::MediaSource;
use dbot_telegram::{TelegramBotAdapter, TelegramConfig};
use mockito::Matcher;
use tempfile::TempDir;

const FILE_SIZE: usize = 3_000_000;

fn file_body() -> Vec<u8> {
    (0..FILE_SIZE).map(|i| (i % 251) as u8).collect()
}

fn adapter_for(server: &mockito::ServerGuard) -> TelegramBotAdapter {
    let config = TelegramConfig {
        bot_token: "123:abc".to_string(),
        api_url: Some(server.url()),
    };
    TelegramBotAdapter::new(config.build_bot().unwrap())
}

async fn mock_get_file(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", Matcher::Regex(r"(?i)/bot[^/]+/getfile$".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "ok": true,
                "result": {
                    "file_id": "v1",
                    "file_unique_id": "uv1",
                    "file_size": FILE_SIZE,
                    "file_path": "voice/big.oga"
                }
            })
            .to_string(),
        )
        .create_async()
        .await
}

/// **Test: A large file is complete on disk as soon as `download` returns.**
///
/// Setup: getFile answers with `voice/big.oga`; the file endpoint serves 3 MB.
/// Action: download the file several times into fresh paths.
/// Expected: every copy is byte-identical to the served body right after the call.
#[tokio::test(flavor = "multi_thread")]
async fn download_writes_whole_file_before_returning() {
    let mut server = mockito::Server::new_async().await;
    let body = file_body();
    let _get_file = mock_get_file(&mut server).await;
    let _file = server
        .mock(
            "GET",
            Matcher::Regex(r"^/file/bot[^/]+/voice/big\.oga$".to_string()),
        )
        .with_status(200)
        .with_body(body.clone())
        .create_async()
        .await;
    let adapter = adapter_for(&server);
    let dir = TempDir::new().unwrap();

    for run in 0..5 {
        let dest = dir.path().join(format!("voice-{}.oga", run));
        adapter.download("v1", &dest).await.unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert_eq!(written.len(), FILE_SIZE, "run {}", run);
        assert!(written == body, "run {}: content differs", run);
    }
}

/// **Test: `file_url` points at the configured API server's file endpoint.**
#[tokio::test(flavor = "multi_thread")]
async fn file_url_uses_configured_api() {
    let mut server = mockito::Server::new_async().await;
    let _get_file = mock_get_file(&mut server).await;
    let adapter = adapter_for(&server);

    let url = adapter.file_url("v1").await.unwrap();

    assert_eq!(url, format!("{}/file/bot123:abc/voice/big.oga", server.url()));
}

/// **Test: A getFile failure surfaces as an error and creates no file.**
#[tokio::test(flavor = "multi_thread")]
async fn get_file_error_is_returned() {
    let mut server = mockito::Server::new_async().await;
    let _get_file = server
        .mock("POST", Matcher::Regex(r"(?i)/getfile$".to_string()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: invalid file_id"}"#)
        .create_async()
        .await;
    let adapter = adapter_for(&server);
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("missing.oga");

    let res = adapter.download("bad", &dest).await;

    assert!(res.is_err());
    assert!(!dest.exists());
}
