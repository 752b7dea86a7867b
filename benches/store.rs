//! 内存存储性能基准测试

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::sync::Arc;

use adroit::storage::{LinkStore, MemoryStore};

/// 预填充 n 条链接的存储
fn seeded_store(n: usize) -> Arc<MemoryStore> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    rt.block_on(async {
        for i in 0..n {
            store
                .insert_if_absent(&format!("seed{:06}", i), &format!("https://example.com/{}", i))
                .await
                .unwrap();
        }
    });
    store
}

/// 命中查找吞吐量
fn bench_get_by_code(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("store/get_by_code");

    for size in [100, 10_000] {
        let store = seeded_store(size);
        group.bench_with_input(BenchmarkId::new("links", size), &store, |b, store| {
            let store = store.clone();
            b.to_async(&rt).iter(move || {
                let store = store.clone();
                async move {
                    let link = store.get_by_code("seed000042").await;
                    assert!(link.is_some());
                }
            });
        });
    }

    group.finish();
}

/// 未命中查找（重定向 404 的快路径）
fn bench_get_by_code_miss(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(10_000);

    c.bench_function("store/get_by_code_miss", |b| {
        let store = store.clone();
        b.to_async(&rt).iter(move || {
            let store = store.clone();
            async move {
                assert!(store.get_by_code("nothere").await.is_none());
            }
        });
    });
}

/// 点击计数临界区吞吐量
fn bench_increment_clicks(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(1000);

    c.bench_function("store/increment_clicks", |b| {
        let store = store.clone();
        b.to_async(&rt).iter(move || {
            let store = store.clone();
            async move {
                assert!(store.increment_clicks("seed000007").await);
            }
        });
    });
}

/// 并发点击：多任务打同一个码
fn bench_concurrent_increments(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("store/concurrent_increments");

    for num_tasks in [4, 16, 64] {
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::new("tasks", num_tasks),
            &num_tasks,
            |b, &num_tasks| {
                b.to_async(&rt).iter(|| async move {
                    let store = Arc::new(MemoryStore::new());
                    store
                        .insert_if_absent("hotspot", "https://example.com/hot")
                        .await
                        .unwrap();

                    let mut handles = vec![];
                    for _ in 0..num_tasks {
                        let store = store.clone();
                        handles.push(tokio::spawn(async move {
                            for _ in 0..1000 / num_tasks {
                                store.increment_clicks("hotspot").await;
                            }
                        }));
                    }
                    for handle in handles {
                        handle.await.unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

/// 插入吞吐量（含反向索引维护）
fn bench_insert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("store/insert_if_absent");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("1000_distinct", |b| {
        b.to_async(&rt).iter(|| async {
            let store = MemoryStore::new();
            for i in 0..1000 {
                store
                    .insert_if_absent(&format!("new{:06}", i), "https://example.com/batch")
                    .await
                    .unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_get_by_code,
    bench_get_by_code_miss,
    bench_increment_clicks,
    bench_concurrent_increments,
    bench_insert,
);
criterion_main!(benches);
