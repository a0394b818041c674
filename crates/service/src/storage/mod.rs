pub mod json_list_store;
