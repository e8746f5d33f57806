use std::hint::black_box;
use std::time::Instant;

use orbitgrid_mesh::tessellate;

fn bench_tessellate(subdivisions: u32, iterations: usize) {
    let start = Instant::now();
    let mut indices = 0;
    for _ in 0..iterations {
        let mesh = tessellate(black_box(subdivisions)).expect("valid subdivision count");
        indices = black_box(mesh.index_count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  tessellate (n={subdivisions}, {indices} indices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("orbitgrid-mesh benchmarks");
    println!();

    println!("tessellate:");
    for &(n, iters) in &[(1, 100_000), (16, 10_000), (64, 1_000), (255, 100)] {
        bench_tessellate(n, iters);
    }
}
