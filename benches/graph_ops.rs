use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rivers::Graph;

fn ring(size: usize) -> Graph {
    let mut graph = Graph::directed();
    for i in 0..size {
        graph.nodes_mut().add(&format!("n{}", i)).unwrap();
    }
    for i in 0..size {
        let s = format!("n{}", i);
        let t = format!("n{}", (i + 1) % size);
        graph.edges_mut().add(&s, &t).unwrap();
    }
    graph
}

fn bench_transpose(c: &mut Criterion) {
    let graph = ring(1_000);
    c.bench_function("transpose_ring_1000", |b| {
        b.iter(|| black_box(graph.transpose().unwrap()))
    });
}

fn bench_union(c: &mut Criterion) {
    let other = ring(1_000);
    c.bench_function("disjoint_union_ring_1000", |b| {
        b.iter(|| {
            let mut graph = ring(100);
            graph.disjoint_union_with(&other, "p_", true).unwrap();
            black_box(graph)
        })
    });
}

fn bench_remove_node(c: &mut Criterion) {
    c.bench_function("remove_node_ring_1000", |b| {
        b.iter(|| {
            let mut graph = ring(1_000);
            black_box(graph.nodes_mut().remove("n500"))
        })
    });
}

criterion_group!(benches, bench_transpose, bench_union, bench_remove_node);
criterion_main!(benches);
