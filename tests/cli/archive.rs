use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn archive_of_new_run_identifies_the_course() {
    let ctx = TestContext::with_demo_course();
    ctx.new_run("2019", "2019-01-01", "2019-12-31");

    ctx.cli()
        .arg("archive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created archive.tar.gz"));

    let archive = ctx.path("archive.tar.gz");
    let course_id = olx_utils::course_id_from_archive(&archive).expect("course id");
    assert_eq!(course_id.as_str(), "course-v1:DemoOrg+DemoX+2019");
}

#[test]
fn archive_with_root_and_base_name() {
    let ctx = TestContext::with_demo_course();
    ctx.new_run("2019", "2019-01-01", "2019-12-31");

    ctx.cli_in(ctx.scratch())
        .args(["archive", "-r"])
        .arg(ctx.work_dir())
        .arg("export-2019")
        .assert()
        .success()
        .stdout(predicate::str::contains("export-2019.tar.gz"));

    assert!(ctx.scratch().join("export-2019.tar.gz").is_file());
    assert!(!ctx.path("export-2019.tar.gz").exists());
}

#[test]
fn missing_root_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["archive", "-r", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}
