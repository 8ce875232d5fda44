//! A small but complete templated course.

use std::fs;
use std::path::Path;

const FILES: &[(&str, &str)] = &[
    ("course.xml", "<course url_name=\"{{ run_name }}\" org=\"DemoOrg\" course=\"DemoX\"/>\n"),
    (
        "course/course.xml",
        "<course display_name=\"Demo Course{{ suffix(run_suffix) }}\" start=\"{{ date(start_date) }}\" end=\"{{ date(end_date) }}\">\n  <chapter url_name=\"week1\"/>\n</course>\n",
    ),
    ("chapter/week1.xml", "<chapter display_name=\"{{ filename|title }}\"/>\n"),
    ("html/intro.xml", "<html filename=\"{{ filename }}\" display_name=\"Introduction\"/>\n"),
    ("html/intro.html", "{{ markdown_file('static/markdown/intro.md') }}"),
    ("static/markdown/intro.md", "\n# Welcome\n\nThis is **the** course.\n"),
    ("static/js/run.js", "var RUN = \"{{ run_name }}\";\n"),
    (
        "info/updates.html",
        "{% import \"helpers.j2\" as h %}<p>Runs {{ h.window(start_date, end_date) }}</p>\n",
    ),
    (
        "modules/helpers.j2",
        "{% macro window(start, end) %}{{ start.strftime('%B %-d, %Y') }} to {{ end.strftime('%B %-d, %Y') }}{% endmacro %}",
    ),
    (
        "include/overview.html",
        "{% import \"olx/macros.j2\" as olx %}<h2>{{ olx.run_title(\"Overview\", run_suffix) }}</h2>\n",
    ),
    (
        "policies/_base/policy.json",
        "{\"course/{{ run_name }}\": {\"start\": \"{{ date(start_date) }}\", \"end\": \"{{ date(end_date) }}\", \"ispublic\": {{ \"true\" if is_public else \"false\" }}}}\n",
    ),
    ("policies/_base/grading_policy.json", "{\"GRADER\": []}\n"),
    ("README.md", "Not part of the course.\n"),
];

/// Write the demo course under `root`. `about/overview.html` is a link into `include/`.
pub(crate) fn write(root: &Path) {
    for (relative, content) in FILES {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create directories");
        fs::write(&path, content).expect("write demo course file");
    }
    fs::create_dir_all(root.join("about")).expect("create about directory");
    std::os::unix::fs::symlink("../include/overview.html", root.join("about/overview.html"))
        .expect("link about/overview.html");
}
