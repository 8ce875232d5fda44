use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn token_prints_access_token_from_config_file() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/oauth2/access_token")
        .with_status(200)
        .with_body(r#"{"access_token": "blatch"}"#)
        .expect(1)
        .create();
    ctx.write(
        "olx.toml",
        &format!("[cms]\nurl = \"{}\"\nclient_id = \"id\"\nclient_secret = \"secret\"\n", server.url()),
    );

    ctx.cli().arg("token").assert().success().stdout("blatch\n");
    mock.assert();
}

#[test]
fn environment_supplies_credentials() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/oauth2/access_token")
        .match_body(mockito::Matcher::UrlEncoded("client_id".into(), "env-id".into()))
        .with_status(200)
        .with_body(r#"{"access_token": "from-env"}"#)
        .expect(1)
        .create();

    ctx.cli()
        .arg("token")
        .env("OLX_CMS_URL", server.url())
        .env("OLX_CLIENT_ID", "env-id")
        .env("OLX_CLIENT_SECRET", "env-secret")
        .assert()
        .success()
        .stdout("from-env\n");
    mock.assert();
}

#[test]
fn missing_client_id_is_reported_before_any_request() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", mockito::Matcher::Any).expect(0).create();

    ctx.cli()
        .args(["token", "--url", &server.url(), "--client-secret", "secret"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No client ID specified."));
    mock.assert();
}

#[test]
fn unknown_config_keys_are_rejected() {
    let ctx = TestContext::new();
    ctx.write("olx.toml", "[cms]\nendpoint = \"https://example.com\"\n");

    ctx.cli().arg("token").assert().code(1).stderr(predicate::str::contains("unknown field"));
}
