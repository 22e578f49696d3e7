use std::sync::Arc;

use logger::TracingLogger;
use persistence::PgTransactionCoordinator;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::create::CreateCartUseCaseImpl;
use business::application::cart::get_active::GetActiveCartUseCaseImpl;
use business::application::cart::get_activity::GetCartActivityUseCaseImpl;
use business::application::cart::get_by_id::GetCartByIdUseCaseImpl;
use business::application::cart::list_active::ListActiveCartsUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::sweep_expired::SweepExpiredCartsUseCaseImpl;
use business::application::cart::update_item::UpdateCartItemUseCaseImpl;
use business::application::inventory::get_current_stock::GetCurrentStockUseCaseImpl;
use business::application::inventory::get_movements::GetMovementsUseCaseImpl;
use business::application::inventory::get_stock_audit::GetStockAuditUseCaseImpl;
use business::application::inventory::record_movement::RecordMovementUseCaseImpl;
use business::application::order::create::CreateOrderUseCaseImpl;
use business::application::order::create_from_cart::CreateOrderFromCartUseCaseImpl;
use business::application::order::get_by_customer::GetCustomerOrdersUseCaseImpl;
use business::application::order::get_by_id::GetOrderByIdUseCaseImpl;
use business::application::order::get_by_number::GetOrderByNumberUseCaseImpl;
use business::application::order::list::ListOrdersUseCaseImpl;
use business::application::order::update_status::UpdateOrderStatusUseCaseImpl;
use business::domain::cart::lifecycle::CartExpiryPolicy;
use business::domain::cart::use_cases::sweep_expired::SweepExpiredCartsUseCase;
use business::domain::logger::Logger;
use business::domain::transaction::TransactionCoordinator;

use crate::api::cart::routes::CartApi;
use crate::api::health::routes::Api as HealthApi;
use crate::api::order::routes::OrderApi;
use crate::api::stock::routes::StockApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub cart_api: CartApi,
    pub order_api: OrderApi,
    pub stock_api: StockApi,
    /// Shared with the background expiry schedule.
    pub sweep_use_case: Arc<dyn SweepExpiredCartsUseCase>,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, expiry: CartExpiryPolicy) -> Self {
        let transactions: Arc<dyn TransactionCoordinator> =
            Arc::new(PgTransactionCoordinator::new(pool));
        Self::with_coordinator(transactions, expiry)
    }

    pub fn with_coordinator(
        transactions: Arc<dyn TransactionCoordinator>,
        expiry: CartExpiryPolicy,
    ) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("fulfillment"));

        // Cart use cases
        let sweep_use_case: Arc<dyn SweepExpiredCartsUseCase> =
            Arc::new(SweepExpiredCartsUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            });
        let cart_api = CartApi::new(
            Arc::new(CreateCartUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(GetCartByIdUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(GetActiveCartUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(ListActiveCartsUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(AddCartItemUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(UpdateCartItemUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(RemoveCartItemUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(ClearCartUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(GetCartActivityUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            sweep_use_case.clone(),
        );

        // Order use cases
        let order_api = OrderApi::new(
            Arc::new(CreateOrderUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(CreateOrderFromCartUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            }),
            Arc::new(GetOrderByIdUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetOrderByNumberUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetCustomerOrdersUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(ListOrdersUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(UpdateOrderStatusUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
        );

        // Stock use cases
        let stock_api = StockApi::new(
            Arc::new(RecordMovementUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetCurrentStockUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetMovementsUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetStockAuditUseCaseImpl {
                transactions,
                logger,
            }),
        );

        Self {
            health_api: HealthApi::new(),
            cart_api,
            order_api,
            stock_api,
            sweep_use_case,
        }
    }
}
