//! Cart behaviour across sequences of user actions.

use comptoir::prelude::*;
use jiff::Timestamp;
use rust_decimal::Decimal;

fn item(id: i64, price: i64) -> CatalogItem {
    CatalogItem {
        id: ItemId(id),
        name: format!("Item {id}"),
        list_price: Decimal::from(price),
        promo_price: None,
        promo_expiration: None,
        image_ref: None,
        stock: StockStatus::InStock,
    }
}

#[test]
fn mixed_operation_sequences_never_duplicate_lines() {
    let mut store = CartStore::open(MemoryStorage::new());

    let _ = store.add_to_cart(item(1, 50), 1);
    let _ = store.add_to_cart(item(2, 30), 2);
    let _ = store.add_to_cart(item(1, 50), 3);
    store.update_quantity(ItemId(2), 1);
    let _ = store.add_to_cart(item(2, 30), 1);
    store.remove_from_cart(ItemId(1));
    let _ = store.add_to_cart(item(1, 50), 2);

    let mut seen = std::collections::HashSet::new();

    for line in store.lines() {
        assert!(seen.insert(line.item.id), "duplicate line for {}", line.item.id);
        assert!(line.quantity >= 1, "line quantity below one");
    }

    assert_eq!(store.total_items(), 4);
}

#[test]
fn totals_always_recompute_from_lines() {
    let mut store = CartStore::open(MemoryStorage::new());

    let _ = store.add_to_cart(item(1, 50), 2);
    let _ = store.add_to_cart(item(2, 30), 1);

    assert_eq!(store.total_items(), 3);
    assert_eq!(store.total_price(), Decimal::from(130));

    store.update_quantity(ItemId(1), 5);

    assert_eq!(store.total_items(), 6);
    assert_eq!(store.total_price(), Decimal::from(280));

    store.remove_from_cart(ItemId(2));

    assert_eq!(store.total_items(), 5);
    assert_eq!(store.total_price(), Decimal::from(250));
}

#[test]
fn add_then_remove_leaves_empty_cart() {
    let mut store = CartStore::open(MemoryStorage::new());

    let _ = store.add_to_cart(item(1, 50), 2);
    store.remove_from_cart(ItemId(1));

    assert!(store.is_empty());
    assert_eq!(store.total_items(), 0);
}

#[test]
fn removing_twice_matches_removing_once() {
    let mut store = CartStore::open(MemoryStorage::new());

    let _ = store.add_to_cart(item(1, 50), 2);
    let _ = store.add_to_cart(item(2, 30), 1);

    store.remove_from_cart(ItemId(1));
    let after_first = store.cart().clone();

    store.remove_from_cart(ItemId(1));

    assert_eq!(store.cart(), &after_first);
}

#[test]
fn updating_quantity_to_zero_removes_the_item() {
    let mut store = CartStore::open(MemoryStorage::new());

    let _ = store.add_to_cart(item(1, 50), 3);
    store.update_quantity(ItemId(1), 0);

    assert!(store.cart().line(ItemId(1)).is_none());
    assert!(store.is_empty());
}

#[test]
fn promo_prices_flow_into_totals() {
    let mut store = CartStore::open(MemoryStorage::new());

    let discounted = CatalogItem {
        promo_price: Some(Decimal::from(40)),
        promo_expiration: Some(Timestamp::UNIX_EPOCH),
        ..item(1, 50)
    };

    let _ = store.add_to_cart(discounted.clone(), 2);

    assert_eq!(store.unit_price(&discounted), Decimal::from(40));
    assert_eq!(store.total_price(), Decimal::from(80));
}

#[test]
fn out_of_stock_blocks_only_that_add() {
    let mut store = CartStore::open(MemoryStorage::new());

    let sold_out = CatalogItem {
        stock: StockStatus::OutOfStock,
        ..item(1, 50)
    };

    assert_eq!(
        store.add_to_cart(sold_out, 1),
        AddOutcome::RejectedOutOfStock
    );
    assert_eq!(store.add_to_cart(item(2, 30), 1), AddOutcome::Added);

    assert_eq!(store.total_items(), 1);
}
