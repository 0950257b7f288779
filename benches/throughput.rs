use brrtrouter_resolver::{RequestContext, RouteManifest, RouteResolver};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn example_manifest() -> &'static str {
    r#"modules:
  - key: zoo
    routes:
      - { method: GET, path: "/", handler: root_handler }
      - { method: GET, path: /zoo/animals, handler: get_animals }
      - { method: POST, path: /zoo/animals, handler: create_animal }
      - { method: GET, path: "/zoo/animals/{id}", handler: get_animal }
      - { method: PUT, path: "/zoo/animals/{id}", handler: update_animal }
      - { method: PATCH, path: "/zoo/animals/{id}", handler: patch_animal }
      - { method: DELETE, path: "/zoo/animals/{id}", handler: delete_animal }
      - { method: GET, path: /zoo/animals/featured, handler: featured_animal }
      - { method: GET, path: "/zoo/animals/{id}/toys/{toy_id}", handler: animal_toy }
      - { method: GET, path: "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}", handler: habitat_section }
      - { method: HEAD, path: /zoo/health, handler: health_check }
      - { method: OPTIONS, path: /zoo/health, handler: supported_ops }
  - key: inventory
    routes:
      - { method: POST, path: "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}", handler: post_item_batch }
      - { method: GET, path: "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}", handler: complex_many_params }
"#
}

fn resolver() -> RouteResolver {
    let manifest = RouteManifest::from_yaml_str(example_manifest()).expect("valid manifest");
    RouteResolver::new(manifest.to_cache())
}

fn bench_resolve_throughput(c: &mut Criterion) {
    let resolver = resolver();
    c.bench_function("resolve_match", |b| {
        let requests = [
            ("GET", "/zoo/animals/123"),
            ("GET", "/zoo/animals/featured"),
            ("GET", "/zoo/animals/123/toys/456"),
            ("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
            ("POST", "/inventory/1/feeds/2/items/3/batches/4"),
            ("GET", "/complex/1/2/3/4/5/6/7/8/9"),
        ];
        b.iter(|| {
            for (method, path) in requests.iter() {
                let res = resolver.resolve(&RequestContext::new(*method, *path));
                black_box(&res);
            }
        })
    });
}

fn bench_resolve_synthetic(c: &mut Criterion) {
    let resolver = resolver();
    c.bench_function("resolve_synthetic", |b| {
        let requests = [
            ("GET", "/does/not/exist"),
            ("DELETE", "/zoo/animals"),
            ("OPTIONS", "/zoo/animals/123"),
        ];
        b.iter(|| {
            for (method, path) in requests.iter() {
                let res = resolver.resolve(&RequestContext::new(*method, *path));
                black_box(&res);
            }
        })
    });
}

fn bench_diagnostics(c: &mut Criterion) {
    let resolver = resolver();
    c.bench_function("diagnose", |b| {
        b.iter(|| black_box(resolver.diagnose("GET", "/zoo/animals/123/toys/456")))
    });
}

criterion_group!(
    benches,
    bench_resolve_throughput,
    bench_resolve_synthetic,
    bench_diagnostics
);
criterion_main!(benches);
