use bookstore_core::db::open_db_in_memory;
use bookstore_core::model::customer::{CITY_NAME_MAX_CHARS, CLIENT_NAME_MAX_CHARS};
use bookstore_core::{
    ClientFilter, ConstraintKind, CustomerRepository, NewCity, NewClient, RepoError,
    SqliteCustomerRepository,
};

#[test]
fn city_delivery_days_must_not_be_negative() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let same_day = repo.create_city(&NewCity::new("Moscow", 0)).unwrap();
    assert_eq!(repo.get_city(same_day).unwrap().unwrap().delivery_days, 0);

    let err = repo.create_city(&NewCity::new("Nowhere", -1)).unwrap_err();
    match err {
        RepoError::Constraint { kind, message } => {
            assert_eq!(kind, ConstraintKind::Check);
            assert!(message.contains("delivery_days"), "unexpected message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(repo.list_cities().unwrap().len(), 1);
}

#[test]
fn client_email_is_unique() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    repo.create_client(&NewClient::new("Ann", "ann@example.com", None))
        .unwrap();
    let err = repo
        .create_client(&NewClient::new("Another Ann", "ann@example.com", None))
        .unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
    assert_eq!(repo.list_clients(ClientFilter::All).unwrap().len(), 1);
}

#[test]
fn client_email_must_look_like_an_address() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let bad_emails = [
        "",
        "not-an-email",
        "@example.com",
        "ann@",
        "ann@example",
        "ann smith@example.com",
        "ann@x@y.com",
        "ann\t@x.com",
        "ann\n@x.com",
        "ann\r@x.com",
        "a@b..c",
        "ann@.example.com",
        "ann@example.com.",
    ];
    for bad in bad_emails {
        let err = repo
            .create_client(&NewClient::new("Ann", bad, None))
            .unwrap_err();
        assert_eq!(
            err.constraint_kind(),
            Some(ConstraintKind::Check),
            "email {bad:?} should be rejected"
        );
    }

    repo.create_client(&NewClient::new("Ann", "ann.smith@mail.example.org", None))
        .unwrap();
    repo.create_client(&NewClient::new("Bo", "bo+books@shop.example.com", None))
        .unwrap();
    assert_eq!(repo.list_clients(ClientFilter::All).unwrap().len(), 2);
}

#[test]
fn name_widths_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let err = repo
        .create_city(&NewCity::new("c".repeat(CITY_NAME_MAX_CHARS + 1), 1))
        .unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Check));

    let err = repo
        .create_client(&NewClient::new(
            "n".repeat(CLIENT_NAME_MAX_CHARS + 1),
            "long@example.com",
            None,
        ))
        .unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Check));
}

#[test]
fn deleting_city_nulls_client_city_instead_of_deleting_clients() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let kazan = repo.create_city(&NewCity::new("Kazan", 3)).unwrap();
    let omsk = repo.create_city(&NewCity::new("Omsk", 7)).unwrap();
    let moved = repo
        .create_client(&NewClient::new("Boris", "boris@example.com", Some(kazan)))
        .unwrap();
    let stayed = repo
        .create_client(&NewClient::new("Vera", "vera@example.com", Some(omsk)))
        .unwrap();

    repo.delete_city(kazan).unwrap();

    let boris = repo.get_client(moved).unwrap().unwrap();
    assert_eq!(boris.city_id, None);
    assert_eq!(boris.email, "boris@example.com");
    assert_eq!(repo.get_client(stayed).unwrap().unwrap().city_id, Some(omsk));

    let homeless = repo.list_clients(ClientFilter::WithoutCity).unwrap();
    assert_eq!(homeless.len(), 1);
    assert_eq!(homeless[0].id, moved);
}

#[test]
fn clients_can_be_listed_per_city_and_found_by_email() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let city = repo.create_city(&NewCity::new("Perm", 4)).unwrap();
    let first = repo
        .create_client(&NewClient::new("Gleb", "gleb@example.com", Some(city)))
        .unwrap();
    let second = repo
        .create_client(&NewClient::new("Dina", "dina@example.com", Some(city)))
        .unwrap();
    repo.create_client(&NewClient::new("Egor", "egor@example.com", None))
        .unwrap();

    let in_city: Vec<_> = repo
        .list_clients(ClientFilter::InCity(city))
        .unwrap()
        .into_iter()
        .map(|client| client.id)
        .collect();
    assert_eq!(in_city, [first, second]);
    assert_eq!(repo.list_clients(ClientFilter::All).unwrap().len(), 3);

    let dina = repo.find_client_by_email("dina@example.com").unwrap().unwrap();
    assert_eq!(dina.id, second);
    assert_eq!(dina.name, "Dina");
    assert!(repo.find_client_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn client_city_can_be_changed_and_cleared() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let city = repo.create_city(&NewCity::new("Tver", 2)).unwrap();
    let client = repo
        .create_client(&NewClient::new("Zoya", "zoya@example.com", None))
        .unwrap();

    repo.update_client_city(client, Some(city)).unwrap();
    assert_eq!(repo.get_client(client).unwrap().unwrap().city_id, Some(city));

    let err = repo.update_client_city(client, Some(city + 50)).unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::ForeignKey));

    repo.update_client_city(client, None).unwrap();
    assert_eq!(repo.get_client(client).unwrap().unwrap().city_id, None);

    assert!(matches!(
        repo.update_client_city(client + 1, None),
        Err(RepoError::NotFound { entity: "client", .. })
    ));
}

#[test]
fn delete_unknown_customer_rows_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.delete_city(5),
        Err(RepoError::NotFound { entity: "city", id: 5 })
    ));
    assert!(matches!(
        repo.delete_client(6),
        Err(RepoError::NotFound { entity: "client", id: 6 })
    ));
}
