mod common;

use std::collections::BTreeSet;

use backoffice::application::customer_service::CustomerService;
use backoffice::application::password::verify_password;
use backoffice::domain::caller::Caller;
use backoffice::domain::customer::{
    CustomerDraft, CustomerType, CustomerUpdate, NewAddress, NewCustomerRequest,
};
use backoffice::domain::errors::DomainError;
use backoffice::domain::order::{LineItemDraft, OrderDraft, PaymentDraft, PaymentMethod};
use backoffice::domain::paging::PageParams;

use common::{order_service, seeded_store, RecordingNotifier, UntouchableStore, ANA, MARIA, PRINTER};

fn registration(phone2: Option<&str>, phone3: Option<&str>) -> NewCustomerRequest {
    NewCustomerRequest {
        name: "Joana".to_string(),
        email: "joana@example.com".to_string(),
        tax_id: "36378912377".to_string(),
        customer_type: 1,
        password: "s3cret-pass".to_string(),
        street: "Avenida Matos".to_string(),
        number: "105".to_string(),
        complement: Some("Sala 800".to_string()),
        district: "Centro".to_string(),
        postal_code: "38777012".to_string(),
        phone1: "27363323".to_string(),
        phone2: phone2.map(str::to_string),
        phone3: phone3.map(str::to_string),
        city_id: 2,
    }
}

fn draft(id: Option<i32>) -> CustomerDraft {
    CustomerDraft {
        id,
        name: "Joana".to_string(),
        email: "joana@example.com".to_string(),
        tax_id: "36378912377".to_string(),
        customer_type: CustomerType::Business,
        password_hash: "hash".to_string(),
        phones: BTreeSet::from(["93838393".to_string()]),
        addresses: vec![NewAddress {
            street: "Avenida Matos".to_string(),
            number: "105".to_string(),
            complement: None,
            district: "Centro".to_string(),
            postal_code: "38777012".to_string(),
            city_id: 2,
        }],
    }
}

// ── find ─────────────────────────────────────────────────────────────────────

#[test]
fn owner_can_find_itself() {
    let service = CustomerService::new(seeded_store());

    let customer = service
        .find(Some(&Caller::customer(MARIA)), MARIA)
        .expect("find failed");

    assert_eq!(customer.id, MARIA);
    assert_eq!(customer.name, "Maria");
}

#[test]
fn non_admin_cannot_find_other_customers() {
    let service = CustomerService::new(seeded_store());
    let caller = Caller::customer(MARIA);

    for id in [ANA, 1, 99, -1] {
        let err = service.find(Some(&caller), id).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized), "id {}", id);
    }
}

#[test]
fn unauthenticated_find_is_unauthorized() {
    let service = CustomerService::new(UntouchableStore);

    assert!(matches!(
        service.find(None, MARIA),
        Err(DomainError::Unauthorized)
    ));
}

#[test]
fn admin_finds_any_existing_customer_and_not_found_otherwise() {
    let service = CustomerService::new(seeded_store());
    let admin = Caller::admin(1);

    assert_eq!(service.find(Some(&admin), MARIA).unwrap().id, MARIA);
    assert_eq!(service.find(Some(&admin), ANA).unwrap().id, ANA);
    assert!(matches!(
        service.find(Some(&admin), 404),
        Err(DomainError::NotFound {
            entity: "Customer",
            id: 404
        })
    ));
}

// ── insert / update ──────────────────────────────────────────────────────────

#[test]
fn insert_discards_supplied_id_and_stores_addresses() {
    let store = seeded_store();
    let service = CustomerService::new(store);

    let customer = service.insert(draft(Some(MARIA))).expect("insert failed");

    assert_ne!(customer.id, MARIA);
    assert_eq!(customer.addresses.len(), 1);
    assert_eq!(customer.addresses[0].city_id, 2);

    let found = service
        .find(Some(&Caller::customer(customer.id)), customer.id)
        .expect("find failed");
    assert_eq!(found, customer);
    // The seeded customer under the supplied id is untouched.
    let maria = service.find(Some(&Caller::admin(1)), MARIA).unwrap();
    assert_eq!(maria.name, "Maria");
}

#[test]
fn update_copies_only_name_and_email() {
    let service = CustomerService::new(seeded_store());
    let caller = Caller::customer(MARIA);
    let before = service.find(Some(&caller), MARIA).unwrap();

    let updated = service
        .update(
            Some(&caller),
            MARIA,
            CustomerUpdate {
                name: "Maria Souza".to_string(),
                email: "souza@example.com".to_string(),
            },
        )
        .expect("update failed");

    let stored = service.find(Some(&caller), MARIA).unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.name, "Maria Souza");
    assert_eq!(stored.email, "souza@example.com");
    assert_eq!(stored.tax_id, before.tax_id);
    assert_eq!(stored.phones, before.phones);
    assert_eq!(stored.addresses, before.addresses);
}

#[test]
fn update_of_another_customer_is_unauthorized() {
    let service = CustomerService::new(seeded_store());

    let err = service
        .update(
            Some(&Caller::customer(ANA)),
            MARIA,
            CustomerUpdate {
                name: "Hacked".to_string(),
                email: "hacked@example.com".to_string(),
            },
        )
        .unwrap_err();

    assert!(matches!(err, DomainError::Unauthorized));
    let maria = service.find(Some(&Caller::admin(1)), MARIA).unwrap();
    assert_eq!(maria.name, "Maria");
}

// ── delete ───────────────────────────────────────────────────────────────────

#[test]
fn delete_without_orders_removes_the_customer() {
    let service = CustomerService::new(seeded_store());
    let admin = Caller::admin(1);

    service.delete(Some(&admin), ANA).expect("delete failed");

    assert!(matches!(
        service.find(Some(&admin), ANA),
        Err(DomainError::NotFound { .. })
    ));
}

#[test]
fn delete_of_customer_with_orders_is_an_integrity_conflict() {
    let store = seeded_store();
    let orders = order_service(&store, RecordingNotifier::default());
    let maria = Caller::customer(MARIA);
    orders
        .insert(
            Some(&maria),
            OrderDraft {
                id: None,
                placed_at: None,
                customer_id: MARIA,
                payment: PaymentDraft {
                    state: None,
                    method: PaymentMethod::Card { installments: 1 },
                },
                items: vec![LineItemDraft {
                    product_id: PRINTER,
                    quantity: 1,
                    price: None,
                    discount: None,
                }],
            },
        )
        .expect("order insert failed");
    let service = CustomerService::new(store);

    let err = service.delete(Some(&maria), MARIA).unwrap_err();

    assert!(matches!(err, DomainError::IntegrityConflict));
    assert_eq!(err.to_string(), "Cannot delete: related records exist");
    assert!(service.find(Some(&maria), MARIA).is_ok());
}

#[test]
fn delete_requires_the_same_authorization_as_find() {
    let service = CustomerService::new(seeded_store());

    assert!(matches!(
        service.delete(Some(&Caller::customer(ANA)), MARIA),
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        service.delete(None, MARIA),
        Err(DomainError::Unauthorized)
    ));
}

// ── listing ──────────────────────────────────────────────────────────────────

#[test]
fn unauthenticated_find_page_fails_before_touching_the_store() {
    let service = CustomerService::new(UntouchableStore);

    let err = service
        .find_page(None, &PageParams::new(0, 24, "name", "ASC"))
        .unwrap_err();

    assert!(matches!(err, DomainError::Unauthorized));
}

#[test]
fn find_page_is_admin_only() {
    let service = CustomerService::new(UntouchableStore);

    assert!(matches!(
        service.find_page(
            Some(&Caller::customer(MARIA)),
            &PageParams::new(0, 24, "name", "ASC")
        ),
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        service.find_all(Some(&Caller::customer(MARIA))),
        Err(DomainError::Unauthorized)
    ));
}

#[test]
fn find_page_rejects_unknown_direction() {
    let service = CustomerService::new(seeded_store());

    let err = service
        .find_page(
            Some(&Caller::admin(1)),
            &PageParams::new(0, 24, "name", "UPWARDS"),
        )
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn find_page_orders_by_requested_field() {
    let service = CustomerService::new(seeded_store());
    let admin = Caller::admin(1);

    let page = service
        .find_page(Some(&admin), &PageParams::new(0, 24, "name", "ASC"))
        .expect("page failed");
    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Maria"]);
    assert_eq!(page.total, 2);

    let page = service
        .find_page(Some(&admin), &PageParams::new(0, 1, "id", "DESC"))
        .expect("page failed");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, ANA);
    assert_eq!(page.total_pages(), 2);
}

#[test]
fn find_all_returns_every_customer_to_an_admin_only() {
    let service = CustomerService::new(seeded_store());

    let mut ids: Vec<i32> = service
        .find_all(Some(&Caller::admin(1)))
        .expect("find_all failed")
        .iter()
        .map(|c| c.id)
        .collect();
    ids.sort();
    assert_eq!(ids, [MARIA, ANA]);

    assert!(matches!(
        service.find_all(Some(&Caller::customer(MARIA))),
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        service.find_all(None),
        Err(DomainError::Unauthorized)
    ));
}

#[test]
fn find_page_rejects_a_page_past_any_offset() {
    let service = CustomerService::new(seeded_store());

    let err = service
        .find_page(
            Some(&Caller::admin(1)),
            &PageParams::new(i64::MAX, 24, "id", "ASC"),
        )
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
}

// ── request mapping ──────────────────────────────────────────────────────────

#[test]
fn from_request_adds_only_the_phones_that_were_supplied() {
    let service = CustomerService::new(UntouchableStore);

    let only_first = service.from_request(registration(None, None)).unwrap();
    assert_eq!(only_first.phones, BTreeSet::from(["27363323".to_string()]));

    let all = service
        .from_request(registration(Some("93838393"), Some("11112222")))
        .unwrap();
    assert_eq!(
        all.phones,
        BTreeSet::from([
            "27363323".to_string(),
            "93838393".to_string(),
            "11112222".to_string()
        ])
    );

    let third_only = service
        .from_request(registration(None, Some("11112222")))
        .unwrap();
    assert_eq!(third_only.phones.len(), 2);
    assert!(third_only.phones.contains("11112222"));
}

#[test]
fn from_request_hashes_password_and_builds_address() {
    let service = CustomerService::new(UntouchableStore);

    let draft = service.from_request(registration(None, None)).unwrap();

    assert_eq!(draft.id, None);
    assert_eq!(draft.customer_type, CustomerType::Individual);
    assert_ne!(draft.password_hash, "s3cret-pass");
    assert!(verify_password("s3cret-pass", &draft.password_hash));
    assert_eq!(draft.addresses.len(), 1);
    assert_eq!(draft.addresses[0].complement.as_deref(), Some("Sala 800"));
    assert_eq!(draft.addresses[0].city_id, 2);
}

#[test]
fn from_request_rejects_unknown_customer_type() {
    let service = CustomerService::new(UntouchableStore);
    let mut request = registration(None, None);
    request.customer_type = 3;

    assert!(matches!(
        service.from_request(request),
        Err(DomainError::InvalidInput(_))
    ));
}
