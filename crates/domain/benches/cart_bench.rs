use common::{DishId, SpecId, TableId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Aggregate, Cart, CartEngine, CartEvent, LineItem, Money};
use snapshot_store::{InMemorySnapshotStore, JsonFileStore};

fn line(id: i64, quantity: u32) -> LineItem {
    LineItem::new(
        DishId::new(id),
        format!("Dish {id}"),
        Money::from_cents(100 * id),
        quantity,
    )
}

fn bench_add_item(c: &mut Criterion) {
    let engine = CartEngine::open(InMemorySnapshotStore::new());
    engine.add_item(line(1, 1));

    c.bench_function("cart/add_item_merge", |b| {
        b.iter(|| engine.add_item(line(1, 1)));
    });
}

fn bench_totals(c: &mut Criterion) {
    let engine = CartEngine::open(InMemorySnapshotStore::new());
    for id in 1..=50 {
        engine.add_item(line(id, 2).with_spec(SpecId::new(id), "Regular"));
    }

    c.bench_function("cart/totals_50_lines", |b| {
        b.iter(|| (engine.total_count(), engine.total_amount()));
    });
}

fn bench_table_session_cycle(c: &mut Criterion) {
    c.bench_function("cart/seat_add_clear", |b| {
        b.iter(|| {
            let engine = CartEngine::open(InMemorySnapshotStore::new());
            engine.start_table_session(TableId::new(5), "T5", 4);
            engine.add_item(line(1, 2));
            engine.update_quantity(DishId::new(1), 5, None);
            engine.clear_cart();
        });
    });
}

fn bench_apply_50_events(c: &mut Criterion) {
    let events: Vec<CartEvent> = (1..=50).map(|id| CartEvent::ItemAdded(line(id, 1))).collect();

    c.bench_function("cart/apply_50_events", |b| {
        b.iter(|| {
            let mut cart = Cart::default();
            cart.apply_events(events.clone());
            cart
        });
    });
}

fn bench_file_rehydrate(c: &mut Criterion) {
    let tmp = tempfile::tempdir().unwrap();
    {
        let engine = CartEngine::open(JsonFileStore::new(tmp.path()));
        for id in 1..=50 {
            engine.add_item(line(id, 1));
        }
    }

    c.bench_function("cart/rehydrate_50_lines", |b| {
        b.iter(|| CartEngine::open(JsonFileStore::new(tmp.path())).total_count());
    });
}

criterion_group!(
    benches,
    bench_add_item,
    bench_totals,
    bench_table_session_cycle,
    bench_apply_50_events,
    bench_file_rehydrate
);
criterion_main!(benches);
