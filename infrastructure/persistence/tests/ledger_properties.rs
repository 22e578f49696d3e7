mod common;

use proptest::prelude::*;
use uuid::Uuid;

use business::domain::inventory::errors::InventoryError;
use business::domain::inventory::model::{MovementRequest, MovementType};
use business::domain::inventory::use_cases::get_stock_audit::{
    GetStockAuditParams, GetStockAuditUseCase,
};
use business::domain::inventory::use_cases::record_movement::RecordMovementUseCase;

use common::Harness;

fn movement() -> impl Strategy<Value = (MovementType, i32)> {
    prop_oneof![
        (1..20i32).prop_map(|q| (MovementType::In, q)),
        (1..20i32).prop_map(|q| (MovementType::Out, q)),
        (0..30i32).prop_map(|q| (MovementType::Adjustment, q)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn should_keep_stock_equal_to_opening_plus_ledger(
        opening in 0..25i32,
        moves in prop::collection::vec(movement(), 1..25),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let h = Harness::new();
            let product = h.product("Trail 29", 100, opening).await;

            for (movement_type, quantity) in moves {
                let before = h.stock_of(product).await;
                let result = h
                    .record_movement
                    .execute(MovementRequest {
                        product_id: product,
                        quantity,
                        movement_type,
                        actor_id: Uuid::new_v4(),
                        reference_id: None,
                        notes: None,
                    })
                    .await;

                match result {
                    Ok(entry) => assert_eq!(entry.stock_after, h.stock_of(product).await),
                    Err(InventoryError::InsufficientStock { available, .. }) => {
                        assert_eq!(movement_type, MovementType::Out);
                        assert_eq!(available, before);
                        assert_eq!(h.stock_of(product).await, before);
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
                assert!(h.stock_of(product).await >= 0);
            }

            let audit = h
                .stock_audit
                .execute(GetStockAuditParams { product_id: product })
                .await
                .unwrap();
            assert_eq!(audit.opening_balance(), i64::from(opening));
        });
    }
}
