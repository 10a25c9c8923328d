use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use darray::{DArray, Protected};

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");

    for size in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("darray", size), size, |b, &size| {
            b.iter(|| {
                let darray: DArray<u64> = DArray::new();
                for i in 0..size as u64 {
                    black_box(darray.push_back(i).unwrap());
                }
                black_box(darray.size().unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("darray_protected", size), size, |b, &size| {
            b.iter(|| {
                let darray: DArray<u64, Protected> = DArray::new();
                for i in 0..size as u64 {
                    black_box(darray.push_back(i).unwrap());
                }
                black_box(darray.size().unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("vec", size), size, |b, &size| {
            b.iter(|| {
                let mut vec: Vec<u64> = Vec::with_capacity(8);
                for i in 0..size as u64 {
                    vec.push(i);
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("darray", size), size, |b, &size| {
            b.iter(|| {
                let darray: DArray<u64> = DArray::new();
                for i in 0..size as u64 {
                    black_box(darray.insert(0, i).unwrap());
                }
                black_box(darray.size().unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("vec", size), size, |b, &size| {
            b.iter(|| {
                let mut vec: Vec<u64> = Vec::with_capacity(8);
                for i in 0..size as u64 {
                    vec.insert(0, i);
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("darray", size), size, |b, &size| {
            b.iter(|| {
                let darray: DArray<u64> = DArray::new();
                for i in 0..size as u64 {
                    let middle = darray.size().unwrap() / 2;
                    black_box(darray.insert(middle, i).unwrap());
                }
                black_box(darray.size().unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("vec", size), size, |b, &size| {
            b.iter(|| {
                let mut vec: Vec<u64> = Vec::with_capacity(8);
                for i in 0..size as u64 {
                    vec.insert(vec.len() / 2, i);
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_push_pop_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_cycle");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64 * 2));
        group.bench_with_input(BenchmarkId::new("darray", size), size, |b, &size| {
            let darray: DArray<u64> = DArray::builder().capacity(1).build().unwrap();
            b.iter(|| {
                for i in 0..size as u64 {
                    darray.push_back(i).unwrap();
                }
                while let Ok(value) = darray.pop_back() {
                    black_box(value);
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("vec", size), size, |b, &size| {
            let mut vec: Vec<u64> = Vec::with_capacity(1);
            b.iter(|| {
                for i in 0..size as u64 {
                    vec.push(i);
                }
                while let Some(value) = vec.pop() {
                    black_box(value);
                }
                vec.shrink_to(1);
            });
        });
    }
    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for size in [1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("darray_lock", size), size, |b, &size| {
            let darray: DArray<u64> = DArray::new();
            darray.try_extend(0..size as u64).unwrap();
            b.iter(|| black_box(darray.lock().iter().sum::<u64>()));
        });
        group.bench_with_input(BenchmarkId::new("darray_at", size), size, |b, &size| {
            let darray: DArray<u64> = DArray::new();
            darray.try_extend(0..size as u64).unwrap();
            b.iter(|| {
                let mut sum = 0;
                for i in 0..size {
                    sum += *darray.at(i).unwrap();
                }
                black_box(sum)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_insert_front,
    bench_insert_middle,
    bench_push_pop_cycle,
    bench_iteration
);
criterion_main!(benches);
