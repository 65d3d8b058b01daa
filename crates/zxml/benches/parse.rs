use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use zxml::parse_text;

const SIMPLE_XML: &str = "<root><child>text</child></root>";
const ATTR_XML: &str = "<root id=\"1\" name='test'><item value=\"42\" /></root>";

fn library(books: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?><library>");
    for i in 0..books {
        xml.push_str(&format!(
            "<book id=\"{i}\"><title>Title {i}</title><author>Author</author><rating value=\"4.{i}\"/></book>"
        ));
    }
    xml.push_str("</library>");
    xml
}

fn bench_simple(c: &mut Criterion) {
    c.bench_function("zxml_simple", |b| b.iter(|| parse_text(black_box(SIMPLE_XML))));
}

fn bench_attr(c: &mut Criterion) {
    c.bench_function("zxml_attr", |b| b.iter(|| parse_text(black_box(ATTR_XML))));
}

fn bench_library(c: &mut Criterion) {
    let xml = library(1000);
    c.bench_function("zxml_library_1000", |b| b.iter(|| parse_text(black_box(&xml))));
}

fn bench_queries(c: &mut Criterion) {
    let xml = library(1000);
    let Ok(doc) = parse_text(&xml) else {
        return;
    };
    c.bench_function("zxml_find_tag_miss", |b| {
        b.iter(|| doc.find_tag(black_box("isbn"), true))
    });
    c.bench_function("zxml_find_by_path", |b| {
        b.iter(|| doc.find_by_path(black_box("library/book/rating"), true))
    });
}

criterion_group!(benches, bench_simple, bench_attr, bench_library, bench_queries);
criterion_main!(benches);
