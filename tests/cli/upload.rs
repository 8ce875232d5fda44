use crate::harness::TestContext;
use mockito::Matcher;
use predicates::prelude::*;

const IMPORT_PATH: &str = "/api/courses/v0/import/course-v1:DemoOrg+DemoX+2019/";

fn archived_course() -> TestContext {
    let ctx = TestContext::with_demo_course();
    ctx.new_run("2019", "2019-01-01", "2019-12-31");
    ctx.cli().arg("archive").assert().success();
    ctx
}

fn token_mock(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("POST", "/oauth2/access_token")
        .with_status(200)
        .with_body(r#"{"access_token": "tok"}"#)
        .expect(1)
        .create()
}

fn credentials(server: &mockito::Server) -> Vec<String> {
    vec![
        "--url".into(),
        server.url(),
        "--client-id".into(),
        "id".into(),
        "--client-secret".into(),
        "secret".into(),
    ]
}

#[test]
fn upload_without_wait_reports_task() {
    let ctx = archived_course();
    let mut server = mockito::Server::new();
    let token = token_mock(&mut server);
    let upload = server
        .mock("POST", IMPORT_PATH)
        .match_header("authorization", "JWT tok")
        .with_status(200)
        .with_body(r#"{"task_id": "4711"}"#)
        .expect(1)
        .create();
    let status = server.mock("GET", Matcher::Any).expect(0).create();

    ctx.cli()
        .arg("upload")
        .args(credentials(&server))
        .arg("archive.tar.gz")
        .assert()
        .success()
        .stdout(predicate::str::contains("import task 4711"));

    token.assert();
    upload.assert();
    status.assert();
}

#[test]
fn upload_with_wait_polls_until_success() {
    let ctx = archived_course();
    let mut server = mockito::Server::new();
    let token = token_mock(&mut server);
    let _upload = server
        .mock("POST", IMPORT_PATH)
        .with_status(200)
        .with_body(r#"{"task_id": "4711"}"#)
        .create();
    let status = server
        .mock("GET", IMPORT_PATH)
        .match_header("authorization", "JWT tok")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("task_id".into(), "4711".into()),
            Matcher::UrlEncoded("filename".into(), "archive.tar.gz".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"state": "Succeeded"}"#)
        .expect(1)
        .create();

    ctx.cli()
        .args(["upload", "--wait"])
        .args(credentials(&server))
        .arg("archive.tar.gz")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported archive.tar.gz"));

    token.assert();
    status.assert();
}

#[test]
fn failed_import_names_course_and_archive() {
    let ctx = archived_course();
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server);
    let _upload = server
        .mock("POST", IMPORT_PATH)
        .with_status(200)
        .with_body(r#"{"task_id": "4711"}"#)
        .create();
    let _status = server
        .mock("GET", IMPORT_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"state": "Failed"}"#)
        .create();

    ctx.cli()
        .args(["upload", "--wait"])
        .args(credentials(&server))
        .arg("archive.tar.gz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Course upload to course-v1:DemoOrg+DemoX+2019 from archive.tar.gz failed",
        ));
}

#[test]
fn explicit_course_id_skips_archive_inspection() {
    let ctx = TestContext::new();
    ctx.write("not-an-archive.tar.gz", "plain text");
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server);
    let upload = server
        .mock("POST", "/api/courses/v0/import/course-v1:Org+Num+Run/")
        .with_status(200)
        .with_body(r#"{"task_id": "1"}"#)
        .expect(1)
        .create();

    ctx.cli()
        .args(["upload", "--course-id", "course-v1:Org+Num+Run"])
        .args(credentials(&server))
        .arg("not-an-archive.tar.gz")
        .assert()
        .success();

    upload.assert();
}

#[test]
fn http_errors_are_reported() {
    let ctx = archived_course();
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server);
    let _upload = server.mock("POST", IMPORT_PATH).with_status(500).create();

    ctx.cli()
        .arg("upload")
        .args(credentials(&server))
        .arg("archive.tar.gz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 500"));
}

#[test]
fn archive_without_course_xml_fails_before_any_request() {
    let ctx = TestContext::new();
    ctx.cli().arg("archive").assert().success();
    let mut server = mockito::Server::new();
    let post = server.mock("POST", Matcher::Any).expect(0).create();
    let get = server.mock("GET", Matcher::Any).expect(0).create();

    ctx.cli()
        .arg("upload")
        .args(credentials(&server))
        .arg("archive.tar.gz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Can't find course.xml"));
    post.assert();
    get.assert();
}

#[test]
fn missing_archive_is_named_before_any_request() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let post = server.mock("POST", Matcher::Any).expect(0).create();

    ctx.cli()
        .arg("upload")
        .args(credentials(&server))
        .arg("no-such-export.tar.gz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to determine course ID from archive"))
        .stderr(predicate::str::contains("no-such-export.tar.gz"));
    post.assert();
}

#[test]
fn missing_archive_with_explicit_course_id_is_not_posted() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let token = token_mock(&mut server);
    let upload = server
        .mock("POST", "/api/courses/v0/import/course-v1:Org+Num+Run/")
        .expect(0)
        .create();

    ctx.cli()
        .args(["upload", "--course-id", "course-v1:Org+Num+Run"])
        .args(credentials(&server))
        .arg("no-such-export.tar.gz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to read archive no-such-export.tar.gz"));
    token.assert();
    upload.assert();
}
