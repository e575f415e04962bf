// benches/verify_tree.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use diago::bookies::sportsbook_tree;
use diago::core::Document;
use diago::engine::verify_tree;

fn sample_page() -> String {
    // Roughly half the default selectors present, plus filler markup.
    let mut html = String::from(
        r#"<html><head><title>Sample Sportsbook</title></head><body class="main-page">
<form><input id="username"><input id="password"><button id="login">Log in</button></form>
<select id="sport"></select><input id="date"><button id="search"></button>
<div id="eventResults">"#,
    );
    for i in 0..200 {
        html.push_str(&format!(
            r#"<div class="event-item"><div class="event-title">Match {i}</div>
<div class="event-team">Home</div><div class="event-team">Away</div>
<div class="match-result">1.{i:02}</div><div class="over-under">2.{i:02}</div></div>"#
        ));
    }
    html.push_str(r#"</div><button id="placeBet"></button></body></html>"#);
    html
}

fn bench_verify(c: &mut Criterion) {
    let html = sample_page();
    let tree = sportsbook_tree();

    c.bench_function("parse_document", |b| {
        b.iter(|| black_box(Document::parse(black_box(&html))))
    });

    let doc = Document::parse(&html);
    c.bench_function("verify_sportsbook_tree", |b| {
        b.iter(|| {
            let v = verify_tree(black_box(&tree), black_box(&doc));
            black_box(v.results.len())
        })
    });
}

criterion_group!(benches, bench_verify);
criterion_main!(benches);
