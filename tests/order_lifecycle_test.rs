//! Order lifecycle tests
//! Registration, referential guard, entry handling and sale conversion against SQLite

use autosalon::db;
use autosalon::domain::{DeleteDecision, DomainError, EntityKind, OrderState};
use autosalon::models::{AutoInput, ClientInput, order, order_entry, sale, sale_entry};
use autosalon::services::{
    auto_service, client_service, order_service, reference_guard, sale_service,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to register a client
async fn create_test_client(db: &DatabaseConnection, name: &str, phone: &str, code: &str) -> i32 {
    client_service::register_client(
        db,
        ClientInput {
            name: name.to_string(),
            phone: phone.to_string(),
            code: code.to_string(),
        },
    )
    .await
    .expect("Failed to register client")
    .id
}

// Helper to register an auto
async fn create_test_auto(db: &DatabaseConnection, name: &str, price: &str, code: &str) -> i32 {
    auto_service::register_auto(
        db,
        AutoInput {
            name: name.to_string(),
            price: price.to_string(),
            code: code.to_string(),
            manufacturer: "556".to_string(),
        },
    )
    .await
    .expect("Failed to register auto")
    .id
}

async fn ivanov_and_tour(db: &DatabaseConnection) -> (i32, i32) {
    let client_id = create_test_client(db, "Ivanov", "88999999999", "0315367456").await;
    let auto_id = create_test_auto(db, "Tour", "140000", "14").await;
    (client_id, auto_id)
}

#[tokio::test]
async fn test_complete_order_totals_primary_and_entries() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;

    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    let count = order_service::add_entry(&db, order.id, auto_id).await.unwrap();
    assert_eq!(count, 1);

    let receipt = order_service::complete_order(&db, order.id).await.unwrap();
    assert_eq!(receipt.sale.total_cost, 280000.0);
    assert_eq!(receipt.sale.order_id, order.id);
    assert_eq!(receipt.entries.len(), 2);

    let stored = sale_entry::Entity::find()
        .filter(sale_entry::Column::SaleId.eq(receipt.sale.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(stored, 2);
}

#[tokio::test]
async fn test_order_without_entries_still_records_primary_auto() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;

    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    let receipt = order_service::complete_order(&db, order.id).await.unwrap();

    assert_eq!(receipt.sale.total_cost, 140000.0);
    assert_eq!(receipt.entries.len(), 1);
    assert_eq!(receipt.entries[0].auto_id, auto_id);
}

#[tokio::test]
async fn test_sale_entries_follow_entry_insertion_order() {
    let db = setup_test_db().await;
    let (client_id, tour) = ivanov_and_tour(&db).await;
    let ring = create_test_auto(&db, "Golden Ring", "50000", "10").await;
    let coupe = create_test_auto(&db, "Coupe", "75000.50", "11").await;

    let order = order_service::create_order(&db, client_id, tour).await.unwrap();
    order_service::add_entry(&db, order.id, coupe).await.unwrap();
    order_service::add_entry(&db, order.id, ring).await.unwrap();
    order_service::add_entry(&db, order.id, coupe).await.unwrap();

    let receipt = order_service::complete_order(&db, order.id).await.unwrap();
    let sold: Vec<i32> = receipt.entries.iter().map(|e| e.auto_id).collect();
    assert_eq!(sold, vec![tour, coupe, ring, coupe]);
    assert_eq!(receipt.sale.total_cost, 140000.0 + 75000.5 + 50000.0 + 75000.5);

    let report = sale_service::get_sale_report(&db, receipt.sale.id)
        .await
        .unwrap();
    assert_eq!(report.client.id, client_id);
    let reported: Vec<i32> = report.autos.iter().map(|a| a.id).collect();
    assert_eq!(reported, sold);
}

#[tokio::test]
async fn test_completed_order_is_frozen() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    order_service::add_entry(&db, order.id, auto_id).await.unwrap();
    order_service::complete_order(&db, order.id).await.unwrap();

    assert!(matches!(
        order_service::complete_order(&db, order.id).await,
        Err(DomainError::InvalidState(_))
    ));
    assert!(matches!(
        order_service::delete_order(&db, order.id).await,
        Err(DomainError::InvalidState(_))
    ));
    assert!(matches!(
        order_service::add_entry(&db, order.id, auto_id).await,
        Err(DomainError::InvalidState(_))
    ));
    assert!(matches!(
        order_service::remove_entry(&db, order.id, auto_id).await,
        Err(DomainError::InvalidState(_))
    ));

    let sales = sale::Entity::find()
        .filter(sale::Column::OrderId.eq(order.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(sales, 1);

    let detail = order_service::get_order_detail(&db, order.id).await.unwrap();
    assert_eq!(detail.state, OrderState::Completed);
    assert_eq!(detail.entry_count, 1);
}

#[tokio::test]
async fn test_concurrent_completion_yields_single_sale() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        order_service::complete_order(&db, order.id),
        order_service::complete_order(&db, order.id)
    );
    assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);

    let sales = sale::Entity::find()
        .filter(sale::Column::OrderId.eq(order.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(sales, 1);
}

#[tokio::test]
async fn test_delete_auto_blocked_by_new_order() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();

    match auto_service::delete_auto(&db, auto_id).await {
        Err(DomainError::ReferentialConflict {
            entity,
            id,
            blocking_order_ids,
        }) => {
            assert_eq!(entity, EntityKind::Auto);
            assert_eq!(id, auto_id);
            assert_eq!(blocking_order_ids, vec![order.id]);
        }
        other => panic!("expected referential conflict, got {:?}", other),
    }

    assert!(auto_service::get_auto(&db, auto_id).await.is_ok());
}

#[tokio::test]
async fn test_guard_reports_every_referencing_order() {
    let db = setup_test_db().await;
    let (client_id, tour) = ivanov_and_tour(&db).await;
    let ring = create_test_auto(&db, "Golden Ring", "50000", "10").await;

    let primary = order_service::create_order(&db, client_id, ring).await.unwrap();
    let with_entry = order_service::create_order(&db, client_id, tour).await.unwrap();
    order_service::add_entry(&db, with_entry.id, ring).await.unwrap();
    order_service::add_entry(&db, with_entry.id, ring).await.unwrap();

    assert_eq!(
        reference_guard::can_delete(&db, EntityKind::Auto, ring)
            .await
            .unwrap(),
        DeleteDecision::Denied {
            blocking_order_ids: vec![primary.id, with_entry.id]
        }
    );
    assert_eq!(
        reference_guard::can_delete(&db, EntityKind::Client, client_id)
            .await
            .unwrap(),
        DeleteDecision::Denied {
            blocking_order_ids: vec![primary.id, with_entry.id]
        }
    );
}

#[tokio::test]
async fn test_delete_client_after_orders_are_gone() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();

    assert!(matches!(
        client_service::delete_client(&db, client_id).await,
        Err(DomainError::ReferentialConflict { .. })
    ));

    order_service::delete_order(&db, order.id).await.unwrap();
    client_service::delete_client(&db, client_id).await.unwrap();
    auto_service::delete_auto(&db, auto_id).await.unwrap();

    assert!(matches!(
        client_service::get_client(&db, client_id).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        client_service::delete_client(&db, client_id).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_order_removes_its_entries() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    order_service::add_entry(&db, order.id, auto_id).await.unwrap();
    order_service::add_entry(&db, order.id, auto_id).await.unwrap();

    order_service::delete_order(&db, order.id).await.unwrap();

    assert!(order::Entity::find_by_id(order.id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    let entries = order_entry::Entity::find()
        .filter(order_entry::Column::OrderId.eq(order.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(entries, 0);

    assert!(matches!(
        order_service::delete_order(&db, order.id).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_remove_entry_takes_one_duplicate_at_a_time() {
    let db = setup_test_db().await;
    let (client_id, tour) = ivanov_and_tour(&db).await;
    let ring = create_test_auto(&db, "Golden Ring", "50000", "10").await;
    let order = order_service::create_order(&db, client_id, tour).await.unwrap();

    order_service::add_entry(&db, order.id, ring).await.unwrap();
    order_service::add_entry(&db, order.id, ring).await.unwrap();

    assert_eq!(
        order_service::remove_entry(&db, order.id, ring).await.unwrap(),
        1
    );
    assert_eq!(
        order_service::remove_entry(&db, order.id, ring).await.unwrap(),
        0
    );
    assert!(matches!(
        order_service::remove_entry(&db, order.id, ring).await,
        Err(DomainError::NotFound(_))
    ));
    // The primary auto is not an entry
    assert!(matches!(
        order_service::remove_entry(&db, order.id, tour).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_order_requires_existing_client_and_auto() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;

    assert!(matches!(
        order_service::create_order(&db, 999, auto_id).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        order_service::create_order(&db, client_id, 999).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        order_service::add_entry(&db, 999, auto_id).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        order_service::complete_order(&db, 999).await,
        Err(DomainError::NotFound(_))
    ));

    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    assert!(matches!(
        order_service::add_entry(&db, order.id, 999).await,
        Err(DomainError::NotFound(_))
    ));
    assert_eq!(order::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_price_persists_nothing() {
    let db = setup_test_db().await;

    let result = auto_service::register_auto(
        &db,
        AutoInput {
            name: "Tour".to_string(),
            price: "abc".to_string(),
            code: "14".to_string(),
            manufacturer: "556".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(auto_service::list_autos(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_uniqueness_conflicts_on_register_and_update() {
    let db = setup_test_db().await;
    let ivanov = create_test_client(&db, "Ivanov", "88999999999", "0315367456").await;
    let petrova = create_test_client(&db, "Petrova", "88888888888", "1232345654").await;

    let same_phone = client_service::register_client(
        &db,
        ClientInput {
            name: "Sidorov".to_string(),
            phone: "88999999999".to_string(),
            code: "5555".to_string(),
        },
    )
    .await;
    assert!(matches!(same_phone, Err(DomainError::Conflict(_))));

    let steal_code = client_service::update_client(
        &db,
        petrova,
        ClientInput {
            name: "Petrova".to_string(),
            phone: "88888888888".to_string(),
            code: "0315367456".to_string(),
        },
    )
    .await;
    assert!(matches!(steal_code, Err(DomainError::Conflict(_))));

    // Keeping its own phone and code is not a conflict
    let renamed = client_service::update_client(
        &db,
        ivanov,
        ClientInput {
            name: "Ivanov Ivan".to_string(),
            phone: "88999999999".to_string(),
            code: "0315367456".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Ivanov Ivan");

    create_test_auto(&db, "Tour", "140000", "14").await;
    let duplicate_code = auto_service::register_auto(
        &db,
        AutoInput {
            name: "Other".to_string(),
            price: "1".to_string(),
            code: "14".to_string(),
            manufacturer: "145".to_string(),
        },
    )
    .await;
    assert!(matches!(duplicate_code, Err(DomainError::Conflict(_))));
    assert_eq!(client_service::list_clients(&db).await.unwrap().len(), 2);
    assert_eq!(auto_service::list_autos(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_price_change_does_not_touch_recorded_sales() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let order = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    let receipt = order_service::complete_order(&db, order.id).await.unwrap();

    auto_service::update_auto(
        &db,
        auto_id,
        AutoInput {
            name: "Tour".to_string(),
            price: "150000".to_string(),
            code: "14".to_string(),
            manufacturer: "556".to_string(),
        },
    )
    .await
    .unwrap();

    let report = sale_service::get_sale_report(&db, receipt.sale.id)
        .await
        .unwrap();
    assert_eq!(report.sale.total_cost, 140000.0);
    assert_eq!(report.autos[0].price, 150000.0);
}

#[tokio::test]
async fn test_listings_are_ordered_by_id_with_state() {
    let db = setup_test_db().await;
    let (client_id, auto_id) = ivanov_and_tour(&db).await;
    let first = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    let second = order_service::create_order(&db, client_id, auto_id)
        .await
        .unwrap();
    order_service::add_entry(&db, second.id, auto_id).await.unwrap();
    order_service::complete_order(&db, second.id).await.unwrap();

    let orders = order_service::list_orders(&db).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order.id, first.id);
    assert_eq!(orders[0].state, OrderState::Open);
    assert_eq!(orders[0].entry_count, 0);
    assert_eq!(orders[1].order.id, second.id);
    assert_eq!(orders[1].state, OrderState::Completed);
    assert_eq!(orders[1].entry_count, 1);

    let stats = sale_service::sales_statistics(&db).await.unwrap();
    assert_eq!(stats.total_sales, 1);
    assert_eq!(stats.autos_sold, 2);
    assert_eq!(stats.total_revenue, 280000.0);
    assert_eq!(stats.average_sale, 280000.0);
}

#[tokio::test]
async fn test_update_auto_rejects_invalid_fields() {
    let db = setup_test_db().await;
    let auto_id = create_test_auto(&db, "Tour", "140000", "14").await;

    let result = auto_service::update_auto(
        &db,
        auto_id,
        AutoInput {
            name: "Tour".to_string(),
            price: "abc".to_string(),
            code: "14".to_string(),
            manufacturer: "556".to_string(),
        },
    )
    .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let stored = auto_service::get_auto(&db, auto_id).await.unwrap();
    assert_eq!(stored.price, 140000.0);
    assert_eq!(stored.name, "Tour");
}

#[tokio::test]
async fn test_update_auto_cannot_take_another_code() {
    let db = setup_test_db().await;
    create_test_auto(&db, "Golden Ring", "50000", "10").await;
    let tour = create_test_auto(&db, "Tour", "140000", "14").await;

    let result = auto_service::update_auto(
        &db,
        tour,
        AutoInput {
            name: "Tour".to_string(),
            price: "140000".to_string(),
            code: "10".to_string(),
            manufacturer: "556".to_string(),
        },
    )
    .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
    assert_eq!(auto_service::get_auto(&db, tour).await.unwrap().code, "14");
}

#[tokio::test]
async fn test_update_client_rejects_invalid_phone() {
    let db = setup_test_db().await;
    let client_id = create_test_client(&db, "Ivanov", "88999999999", "0315367456").await;

    let result = client_service::update_client(
        &db,
        client_id,
        ClientInput {
            name: "Ivanov".to_string(),
            phone: "12a".to_string(),
            code: "0315367456".to_string(),
        },
    )
    .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let stored = client_service::get_client(&db, client_id).await.unwrap();
    assert_eq!(stored.phone, "88999999999");
}

#[tokio::test]
async fn test_update_unknown_records_is_not_found() {
    let db = setup_test_db().await;

    let client = client_service::update_client(
        &db,
        999,
        ClientInput {
            name: "Ivanov".to_string(),
            phone: "88999999999".to_string(),
            code: "0315367456".to_string(),
        },
    )
    .await;
    assert!(matches!(client, Err(DomainError::NotFound(_))));

    let auto = auto_service::update_auto(
        &db,
        999,
        AutoInput {
            name: "Tour".to_string(),
            price: "140000".to_string(),
            code: "14".to_string(),
            manufacturer: "556".to_string(),
        },
    )
    .await;
    assert!(matches!(auto, Err(DomainError::NotFound(_))));
}
