use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use n3_api::parser::TriplesParser;
use n3_parser::{Context, N3Error, N3Parser};

fn generate_document(statements: usize) -> String {
    let mut document = String::from(
        "@prefix ex: <http://example.com/> .\n@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n",
    );
    for i in 0..statements {
        document.push_str(&format!(
            "ex:p{} a foaf:Person ; foaf:name \"Person {}\"@en ; foaf:age {} ;\n    foaf:knows ex:p{}, [ foaf:nick \"p{}\" ] .\n",
            i,
            i,
            i % 90,
            (i + 1) % statements,
            i
        ));
        document.push_str(&format!(
            "ex:p{} is foaf:knows of ex:p{} .\n{{ ex:p{} foaf:age 42 }} => {{ ex:p{} a ex:Adult }} .\n",
            i,
            (i + 2) % statements,
            i,
            i
        ));
        document.push_str(&format!("ex:p{}!foaf:knows!foaf:name ex:seenAs (\"a\" \"b\" {}) .\n", i, i));
    }
    document
}

fn bench_parse(c: &mut Criterion) {
    let document = generate_document(1_000);
    let mut group = c.benchmark_group("n3");
    group.throughput(Throughput::Bytes(document.len() as u64));
    group.bench_function("parse generated document", |b| {
        b.iter(|| {
            let mut count = 0;
            N3Parser::new(document.as_bytes(), Context::new())
                .unwrap()
                .parse_all(&mut |_| {
                    count += 1;
                    Ok(()) as Result<(), N3Error>
                })
                .unwrap();
            count
        })
    });
    group.finish();
}

criterion_group!(parser, bench_parse);

criterion_main!(parser);
