//! Parse + lower throughput (bytes/sec).

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tsdl_common::LoweringOptions;

// =============================================================================
// Test Sources
// =============================================================================

const CLASSES: &str = r#"
class Animal {
    constructor(public name: string) { }
    move(meters: number = 0) {
        return this.name + " moved " + meters + "m.";
    }
}

class Snake extends Animal {
    constructor(name: string) { super(name); }
    move() {
        return super.move(5);
    }
    get length() { return 3; }
    set length(value: number) { }
}
"#;

const NAMESPACES: &str = r#"
module Geometry.Shapes {
    export enum Kind { Point, Line = 5, Polygon }

    export interface Shape {
        kind: Kind;
    }

    export function describe(shape: Shape, ...tags: string[]) {
        return tags.map((tag: string) => tag + ":" + shape.kind);
    }
}
"#;

const ARROWS: &str = r#"
function Counter() {
    var count = 0;
    return {
        inc: () => this.count++,
        add: (n: number, m = 1) => { count += n * m; },
        get value() { return () => this.count; }
    };
}
"#;

fn sized(source: &str, copies: usize) -> String {
    source.repeat(copies)
}

fn bench_lower(c: &mut Criterion) {
    let options = LoweringOptions::default();
    let mut group = c.benchmark_group("lower");
    for (name, source) in [("classes", CLASSES), ("namespaces", NAMESPACES), ("arrows", ARROWS)] {
        let text = sized(source, 50);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_and_lower", name), &text, |b, text| {
            b.iter(|| {
                let lowered = tsdl_cli::driver::lower_source(black_box(text), &options);
                black_box(lowered)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lower);
criterion_main!(benches);
