use std::collections::BTreeSet;

use crate::domain::caller::Caller;
use crate::domain::customer::{
    Customer, CustomerDraft, CustomerType, CustomerUpdate, NewAddress, NewCustomerRequest,
};
use crate::domain::errors::DomainError;
use crate::domain::paging::{CustomerSort, Page, PageParams, PageRequest};
use crate::domain::ports::CustomerRepository;

use super::password::hash_password;

pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Looks up a customer on behalf of `caller`, who must be an admin or the
    /// customer itself.
    pub fn find(&self, caller: Option<&Caller>, id: i32) -> Result<Customer, DomainError> {
        match caller {
            Some(caller) if caller.may_access(id) => {}
            Some(caller) => {
                log::warn!("Customer {} denied access to customer {}", caller.customer_id, id);
                return Err(DomainError::Unauthorized);
            }
            None => return Err(DomainError::Unauthorized),
        }

        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::not_found("Customer", id))
    }

    pub fn insert(&self, draft: CustomerDraft) -> Result<Customer, DomainError> {
        let customer = self.repo.insert(draft.into())?;
        log::info!(
            "Registered customer {} with {} address(es)",
            customer.id,
            customer.addresses.len()
        );
        Ok(customer)
    }

    /// Copies name and email onto the stored record. Nothing else is
    /// writable through this path.
    pub fn update(
        &self,
        caller: Option<&Caller>,
        id: i32,
        changes: CustomerUpdate,
    ) -> Result<Customer, DomainError> {
        let mut customer = self.find(caller, id)?;
        customer.name = changes.name;
        customer.email = changes.email;
        self.repo.update(&customer)?;
        Ok(customer)
    }

    pub fn delete(&self, caller: Option<&Caller>, id: i32) -> Result<(), DomainError> {
        self.find(caller, id)?;
        self.repo.delete_by_id(id)?;
        log::info!("Deleted customer {}", id);
        Ok(())
    }

    pub fn find_all(&self, caller: Option<&Caller>) -> Result<Vec<Customer>, DomainError> {
        require_admin(caller)?;
        self.repo.find_all()
    }

    pub fn find_page(
        &self,
        caller: Option<&Caller>,
        params: &PageParams,
    ) -> Result<Page<Customer>, DomainError> {
        require_admin(caller)?;
        let request = PageRequest::<CustomerSort>::parse(params)?;
        self.repo.find_page(&request)
    }

    /// Maps a registration payload to a draft: hashes the password, builds
    /// the single address and collects the phones that were supplied.
    pub fn from_request(&self, request: NewCustomerRequest) -> Result<CustomerDraft, DomainError> {
        let customer_type = CustomerType::from_code(request.customer_type)?;
        let password_hash = hash_password(&request.password)?;

        let phones: BTreeSet<String> = std::iter::once(request.phone1)
            .chain(request.phone2)
            .chain(request.phone3)
            .collect();

        Ok(CustomerDraft {
            id: None,
            name: request.name,
            email: request.email,
            tax_id: request.tax_id,
            customer_type,
            password_hash,
            phones,
            addresses: vec![NewAddress {
                street: request.street,
                number: request.number,
                complement: request.complement,
                district: request.district,
                postal_code: request.postal_code,
                city_id: request.city_id,
            }],
        })
    }
}

fn require_admin(caller: Option<&Caller>) -> Result<&Caller, DomainError> {
    match caller {
        Some(caller) if caller.is_admin() => Ok(caller),
        _ => Err(DomainError::Unauthorized),
    }
}
