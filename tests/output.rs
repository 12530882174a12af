#![forbid(unsafe_code)]
use chrono::NaiveDate;
use fairrota::{
    io, HtmlRenderer, HtmlTemplate, OperatorId, OutputStore, ScheduleDocument, ScheduleRenderer, ScheduleRow,
    ShiftId, TextRenderer,
};
use std::fs;
use tempfile::tempdir;

fn row(y: i32, m: u32, d: u32, shift: &str, operator: &str) -> ScheduleRow {
    ScheduleRow {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        shift: ShiftId::new(shift),
        operator: OperatorId::new(operator),
    }
}

fn sample_doc() -> ScheduleDocument {
    ScheduleDocument {
        title: "Sound".into(),
        subtitle: "2024".into(),
        rows: vec![
            row(2024, 1, 7, "Sunday AM", "Alice"),
            row(2024, 1, 7, "Sunday PM", "Bob"),
            row(2024, 1, 10, "Wednesday", "Alice"),
        ],
        counts: vec![(OperatorId::new("Alice"), 2), (OperatorId::new("Bob"), 1)],
        contacts: vec![
            ("Alice".into(), "555-0100".into()),
            ("Bob & Co".into(), String::new()),
        ],
        notes: vec!["Arrive <15 min> early".into()],
    }
}

#[test]
fn text_rendering() {
    let out = TextRenderer.render(&sample_doc());
    insta::assert_snapshot!(out, @r"
    Sound (2024)

    Jan 07  Sunday AM  Alice
    Jan 07  Sunday PM  Bob
    Jan 10  Wednesday  Alice

    Counts:
    - Alice: 2
    - Bob: 1
    ");
}

#[test]
fn html_rendering_escapes_cells() {
    let html = HtmlRenderer::default().render(&sample_doc());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Sound</title>"));
    assert!(html.contains("<h2>2024</h2>"));
    assert!(html.contains("<tr><td>Jan 07</td><td>Sunday AM</td><td>Alice</td></tr>"));
    assert!(html.contains("<td>Bob &amp; Co</td>"));
    assert!(html.contains("<li>Arrive &lt;15 min&gt; early</li>"));
    assert!(html.contains(fairrota::render::GENERATOR));
    assert_eq!(HtmlRenderer::default().extension(), "html");
}

#[test]
fn html_template_fills_every_field() {
    let tpl = HtmlTemplate::parse(
        "<html><style>$css</style><h1>$title</h1><h2>${subtitle}</h2>\n\
         $schedule_table$contacts_table<ul>\n$notes</ul><i>$version</i> $$1</html>",
    )
    .unwrap();
    let html = HtmlRenderer::with_template(tpl).render(&sample_doc());

    assert!(html.starts_with("<html><style>body {"));
    assert!(html.contains("<h1>Sound</h1><h2>2024</h2>"));
    assert!(html.contains("<tr><td>Jan 07</td><td>Sunday AM</td><td>Alice</td></tr>"));
    assert!(html.contains("<td>Bob &amp; Co</td>"));
    assert!(html.contains("<li>Arrive &lt;15 min&gt; early</li>"));
    assert!(html.contains(&format!("<i>{}</i> $1</html>", fairrota::render::GENERATOR)));
    assert!(!html.contains("<!DOCTYPE html>"));
}

#[test]
fn schedule_and_counts_csv() {
    let doc = sample_doc();
    let csv = String::from_utf8(io::export_schedule_csv(&doc.rows).unwrap()).unwrap();
    assert_eq!(
        csv,
        "date,shift,operator\nJan 07,Sunday AM,Alice\nJan 07,Sunday PM,Bob\nJan 10,Wednesday,Alice\n"
    );

    let counts = String::from_utf8(io::export_counts_csv(&doc.counts).unwrap()).unwrap();
    assert_eq!(counts, "operator,count\nAlice,2\nBob,1\n");
}

#[test]
fn output_store_numbers_files() {
    let dir = tempdir().unwrap();
    let store = OutputStore::for_config(dir.path(), std::path::Path::new("conf/team.json"));

    let first = store.save("html", b"<p>1</p>").unwrap();
    let second = store.save("html", b"<p>2</p>").unwrap();
    let other_ext = store.save("csv", b"a,b\n").unwrap();

    assert_eq!(first.file_name().unwrap(), "team-schedule-00.html");
    assert_eq!(second.file_name().unwrap(), "team-schedule-01.html");
    assert_eq!(other_ext.file_name().unwrap(), "team-schedule-00.csv");
    assert_eq!(fs::read_to_string(&second).unwrap(), "<p>2</p>");
    assert_eq!(
        store.next_path("html").unwrap().file_name().unwrap(),
        "team-schedule-02.html"
    );
}

#[test]
fn output_store_never_overwrites_after_a_deletion() {
    let dir = tempdir().unwrap();
    let store = OutputStore::new(dir.path(), "team");
    for i in 0..3 {
        store.save("html", format!("<p>{i}</p>").as_bytes()).unwrap();
    }
    fs::remove_file(dir.path().join("team-schedule-01.html")).unwrap();

    let refill = store.save("html", b"<p>new</p>").unwrap();
    assert_eq!(refill.file_name().unwrap(), "team-schedule-01.html");
    let after = store.save("html", b"<p>newer</p>").unwrap();
    assert_eq!(after.file_name().unwrap(), "team-schedule-03.html");

    let kept = fs::read_to_string(dir.path().join("team-schedule-02.html")).unwrap();
    assert_eq!(kept, "<p>2</p>");
}

#[test]
fn output_store_creates_missing_dir() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("out").join("schedules");
    let store = OutputStore::new(&nested, "roster");
    let path = store.save("txt", b"x").unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}
