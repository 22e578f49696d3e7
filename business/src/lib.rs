pub mod application {
    pub mod cart {
        pub mod add_item;
        pub mod clear;
        pub mod create;
        pub mod get_active;
        pub mod get_activity;
        pub mod get_by_id;
        pub mod list_active;
        pub mod remove_item;
        pub mod sweep_expired;
        pub mod update_item;
    }
    pub mod inventory {
        pub mod get_current_stock;
        pub mod get_movements;
        pub mod get_stock_audit;
        pub mod record_movement;
    }
    pub mod order {
        pub mod create;
        pub mod create_from_cart;
        pub mod get_by_customer;
        pub mod get_by_id;
        pub mod get_by_number;
        pub mod list;
        pub mod update_status;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod transaction;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod catalog {
        pub mod model;
        pub mod repository;
    }
    pub mod inventory {
        pub mod errors;
        pub mod ledger;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_current_stock;
            pub mod get_movements;
            pub mod get_stock_audit;
            pub mod record_movement;
        }
    }
    pub mod cart {
        pub mod activity;
        pub mod errors;
        pub mod lifecycle;
        pub mod model;
        pub mod repository;
        pub mod store;
        pub mod use_cases {
            pub mod add_item;
            pub mod clear;
            pub mod create;
            pub mod get_active;
            pub mod get_activity;
            pub mod get_by_id;
            pub mod list_active;
            pub mod remove_item;
            pub mod sweep_expired;
            pub mod update_item;
        }
    }
    pub mod order {
        pub mod assembler;
        pub mod errors;
        pub mod model;
        pub mod number;
        pub mod query;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod create_from_cart;
            pub mod get_by_customer;
            pub mod get_by_id;
            pub mod get_by_number;
            pub mod list;
            pub mod update_status;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
