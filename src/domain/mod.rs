pub mod caller;
pub mod customer;
pub mod errors;
pub mod order;
pub mod paging;
pub mod ports;
pub mod product;
