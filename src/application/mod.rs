pub mod boleto;
pub mod customer_service;
pub mod notification;
pub mod order_service;
pub mod password;
pub mod product_service;
