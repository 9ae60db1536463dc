use std::process::Command;

use anyhow::Context as _;
use volley_testserver::TestServer;

fn status_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[test]
fn invalid_flags_exit_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_volley");

    let out = Command::new(exe)
        .arg("run")
        .arg("http://127.0.0.1:1")
        .arg("--duration")
        .arg("10x")
        .output()
        .context("run volley binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[test]
fn zero_rate_exits_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_volley");

    let out = Command::new(exe)
        .arg("run")
        .arg("http://127.0.0.1:1")
        .arg("--rps")
        .arg("0")
        .output()
        .context("run volley binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[test]
fn malformed_target_url_exits_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_volley");

    let out = Command::new(exe)
        .arg("run")
        .arg("not a url")
        .output()
        .context("run volley binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[tokio::test]
async fn run_with_only_http_errors_exits_0() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let base_url = server.base_url().to_string();

    let exe = env!("CARGO_BIN_EXE_volley");
    let out = tokio::task::spawn_blocking(move || {
        Command::new(exe)
            .arg("run")
            .arg(&base_url)
            .arg("--duration")
            .arg("1s")
            .arg("--rps")
            .arg("20")
            .arg("--endpoint")
            .arg("/error")
            .arg("--output")
            .arg("json")
            .output()
    })
    .await
    .context("spawn_blocking join")?
    .context("run volley binary")?;

    server.shutdown().await;

    // Failed requests are data, not a failed run.
    anyhow::ensure!(
        status_code(out.status) == 0,
        "expected exit code 0, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}
