use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, api_key: Option<&str>) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = match api_key {
        Some(key) => format!("api_key: {key}\nlanguage: en-US\n"),
        None => "language: en-US\n".to_string(),
    };
    fs::write(&path, contents).expect("failed to write config");
    path
}

/// `mflix` isolated to a temp config and data dir, with MFLIX_* env cleared.
fn mflix(dir: &Path, config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mflix"));
    cmd.arg("--config")
        .arg(config)
        .arg("--data-dir")
        .arg(dir.join("data"))
        .env_remove("MFLIX_API_KEY")
        .env_remove("MFLIX_API_HOST")
        .env_remove("MFLIX_CONFIG")
        .env_remove("MFLIX_DATA_DIR")
        .env_remove("MFLIX_FORMAT")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn status_reports_missing_api_key() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    let assert = mflix(temp.path(), &config).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("API key not configured"));
    assert!(stdout.contains(&config.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_json_with_api_key() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("test-key"));

    let assert = mflix(temp.path(), &config)
        .args(["--format", "json", "status"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["data"]["api_key_configured"], true);
    assert_eq!(value["data"]["library"]["watchlist_count"], 0);

    Ok(())
}

#[test]
fn catalog_commands_require_api_key() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    mflix(temp.path(), &config)
        .args(["browse", "trending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not configured"));

    Ok(())
}

#[test]
fn unknown_row_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("test-key"));

    mflix(temp.path(), &config)
        .args(["browse", "nonsense-row"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown row"));

    Ok(())
}

#[test]
fn watchlist_add_list_remove() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    mflix(temp.path(), &config)
        .args(["watchlist", "add", "movie", "550", "--title", "Fight Club"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Fight Club"));

    let assert = mflix(temp.path(), &config)
        .args(["--format", "json", "watchlist", "list"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["data"][0]["id"], 550);
    assert_eq!(value["data"][0]["title"], "Fight Club");

    mflix(temp.path(), &config)
        .args(["watchlist", "remove", "movie", "550"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    mflix(temp.path(), &config)
        .args(["watchlist", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));

    Ok(())
}

#[test]
fn ratings_set_and_profile_average() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    for (id, rating) in [("550", "4"), ("13", "5")] {
        mflix(temp.path(), &config)
            .args(["ratings", "set", "movie", id, rating])
            .assert()
            .success();
    }

    let assert = mflix(temp.path(), &config)
        .args(["--format", "json", "profile"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["data"]["ratings_count"], 2);
    assert_eq!(value["data"]["average_rating"], 4.5);

    Ok(())
}

#[test]
fn ratings_out_of_range_fail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    mflix(temp.path(), &config)
        .args(["ratings", "set", "movie", "550", "6"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn settings_set_persists_and_reset_restores() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    mflix(temp.path(), &config)
        .args(["settings", "set", "default-server", "2"])
        .assert()
        .success();

    let assert = mflix(temp.path(), &config)
        .args(["--format", "json", "settings", "show"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["data"]["defaultServer"], 1);

    mflix(temp.path(), &config)
        .args(["settings", "set", "quality", "8K"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    mflix(temp.path(), &config)
        .args(["settings", "reset"])
        .assert()
        .success();

    let assert = mflix(temp.path(), &config)
        .args(["--format", "json", "settings", "show"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["data"]["defaultServer"], 0);

    Ok(())
}

#[test]
fn watched_toggle_twice_unmarks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);

    mflix(temp.path(), &config)
        .args(["watched", "toggle", "1399", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked watched"));

    mflix(temp.path(), &config)
        .args(["watched", "toggle", "1399", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked unwatched"));

    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("mflix"))
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mflix"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn browse_json_uses_custom_api_host() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _popular = server
        .mock("GET", "/3/movie/popular")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(
            r#"{
                "page": 1,
                "total_pages": 3,
                "results": [
                    { "id": 550, "title": "Fight Club", "release_date": "1999-10-15" },
                    { "id": 13, "title": "Forrest Gump", "release_date": "1994-06-23" }
                ]
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("test-key"));

    let assert = mflix(temp.path(), &config)
        .args(["--format", "json", "--api-host", &api_host])
        .args(["browse", "popular-movie"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["data"]["phase"], "ready");
    assert_eq!(value["data"]["current_page"], 1);
    assert_eq!(value["data"]["items"][0]["id"], 550);
    assert!(
        value["meta"]["attribution"]
            .as_str()
            .is_some_and(|a| a.contains("TMDB"))
    );

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn search_records_recent_term() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _search = server
        .mock("GET", "/3/search/multi")
        .match_query(mockito::Matcher::UrlEncoded(
            "query".into(),
            "fight club".into(),
        ))
        .with_status(200)
        .with_body(
            r#"{"page": 1, "total_pages": 1, "results": [
                { "id": 550, "title": "Fight Club", "media_type": "movie" }
            ]}"#,
        )
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("test-key"));

    mflix(temp.path(), &config)
        .args(["--api-host", &api_host, "search", "fight club"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fight Club"));

    mflix(temp.path(), &config)
        .args(["search-history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fight club"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn bad_api_key_reports_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _details = server
        .mock("GET", "/3/movie/550")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status_code": 7, "status_message": "Invalid API key"}"#)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("bad-key"));

    mflix(temp.path(), &config)
        .args(["--api-host", &api_host, "show", "movie", "550"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected the API key"));

    Ok(())
}
