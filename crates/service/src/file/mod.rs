pub mod product_store;
