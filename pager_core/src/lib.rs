pub mod address_space;
pub mod config;
pub mod fault;
pub mod frame_pool;
pub mod manager;
pub mod page_table;
