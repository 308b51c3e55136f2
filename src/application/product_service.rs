use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::Product;

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find(&self, id: i32) -> Result<Product, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::not_found("Product", id))
    }
}
