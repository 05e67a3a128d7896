use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vitrine_core::acf::{RawPage, RawPost};
use vitrine_core::mapper::{map_blog_listing, map_home, map_services_index, service_blocks};
use vitrine_core::{SERVICE_SLOTS, SeoHead, extract_json_ld, parse_metadata};

fn load_page(name: &str) -> RawPage {
    let json = std::fs::read_to_string(format!("../../tests/fixtures/pages/{}.json", name)).unwrap();
    let pages: Vec<RawPage> = serde_json::from_str(&json).unwrap();
    pages.into_iter().next().unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let json = std::fs::read_to_string("../../tests/fixtures/pages/services.json").unwrap();

    c.bench_function("decode_services_page", |b| {
        b.iter(|| serde_json::from_str::<Vec<RawPage>>(black_box(&json)))
    });
}

fn bench_mappers(c: &mut Criterion) {
    let home = load_page("home");
    let services = load_page("services");
    let posts: Vec<RawPost> =
        serde_json::from_str(&std::fs::read_to_string("../../tests/fixtures/posts.json").unwrap()).unwrap();

    let mut group = c.benchmark_group("map");

    group.bench_with_input(BenchmarkId::new("home", "fixture"), &home, |b, page| {
        b.iter(|| map_home(black_box(page)))
    });

    group.bench_with_input(BenchmarkId::new("services_index", "fixture"), &services, |b, page| {
        b.iter(|| map_services_index(black_box(page)))
    });

    group.bench_with_input(BenchmarkId::new("service_lookup", "fuzzy"), &services, |b, page| {
        b.iter(|| {
            let (_, items) = service_blocks(black_box(page));
            let refs: Vec<_> = items.iter().collect();
            SERVICE_SLOTS.locate("cloud-solutions", &refs)
        })
    });

    group.bench_with_input(BenchmarkId::new("blog_listing", "fixture"), &posts, |b, posts| {
        b.iter(|| map_blog_listing(None, None, black_box(posts)))
    });

    group.finish();
}

fn bench_seo(c: &mut Criterion) {
    let head = std::fs::read_to_string("../../tests/fixtures/head.html").unwrap();

    let mut group = c.benchmark_group("seo");
    group.bench_function("parse_metadata", |b| b.iter(|| parse_metadata(black_box(&head))));
    group.bench_function("extract_json_ld", |b| b.iter(|| extract_json_ld(black_box(&head))));
    group.bench_function("head", |b| b.iter(|| SeoHead::parse(black_box(&head))));
    group.finish();
}

criterion_group!(benches, bench_decode, bench_mappers, bench_seo);
criterion_main!(benches);
