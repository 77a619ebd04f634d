use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use explorer_inputs::File;
use explorer_serialize::{LocationConverter, SerializeOptions, SyntaxResponse, serialize};

static SOURCE: &str = r#"
/// A point on the plane.
struct Point {
    var x: Int = 0 // abscissa
    var y: Int = 0 /* ordinate */
}

func distance(from a: Point, to b: Point) -> Float {
    let dx = a.x - b.x
    let dy = a.y - b.y
    return sqrt(dx * dx + dy * dy)
}

func describe(_ names: [String]?) -> String {
    if let names = names, names.count > 0 {
        return "many"
    }
    while false {
    return "none"
"#;

fn benchmark_serializer(c: &mut Criterion) {
    let db = salsa::DatabaseImpl::new();
    let file = File::new(&db, "Recovered".into(), SOURCE.repeat(8));
    let text = file.text(&db);
    let tree = &file.parse(&db).tree;
    let converter = LocationConverter::new(text, file.line_index(&db));

    let mut group = c.benchmark_group("Serializer Benchmark");
    group.throughput(Throughput::Bytes(text.len() as u64));

    for show_missing_tokens in [false, true] {
        let options = SerializeOptions { show_missing_tokens };
        group.bench_with_input(
            BenchmarkId::new("serialize", show_missing_tokens),
            &options,
            |b, options| b.iter(|| black_box(serialize(tree, &converter, options))),
        );
    }

    group.bench_function("response", |b| {
        b.iter(|| {
            let response = SyntaxResponse::new(tree, &converter, &SerializeOptions::default());
            black_box(response)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_serializer);
criterion_main!(benches);
