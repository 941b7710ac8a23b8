//! Behaviour every repository adapter must share.
//!
//! `tag` keeps keys unique so the checks can run against a shared database.

use chrono::Utc;
use stockroom_auth::{AuthError, User, UserRepository};
use stockroom_core::ProductId;
use stockroom_products::{Product, ProductErrorKind, ProductRepository, Sku};

pub(crate) fn product_repository(repo: &dyn ProductRepository, tag: &str) {
    let sku = |suffix: &str| Sku::parse(&format!("{tag}-{suffix}")).unwrap();
    let product = |name: &str, suffix: &str, stock: i64| Product::new(name, sku(suffix), stock).unwrap();

    let alpha = repo.create(product("Alpha", "a", 3)).unwrap();
    let alpha_id = alpha.id_typed().expect("create assigns an id");
    assert_eq!(alpha.stock(), 3);
    assert_eq!(alpha.created_at(), alpha.updated_at());

    assert_eq!(repo.get_by_id(alpha_id).unwrap().unwrap().name(), "Alpha");
    assert_eq!(repo.get_by_sku(&sku("a")).unwrap().unwrap().id_typed(), Some(alpha_id));
    assert!(repo.get_by_sku(&sku("missing")).unwrap().is_none());

    let err = repo.create(product("Other", "a", 0)).unwrap_err();
    assert_eq!(err.kind(), ProductErrorKind::DuplicateSku);

    let mut changed = alpha.clone();
    changed.increment_stock(4).unwrap();
    changed.update_details(Some("Alpha v2"), None).unwrap();
    let stored = repo.update(changed).unwrap();
    assert_eq!(stored.stock(), 7);
    let reloaded = repo.get_by_id(alpha_id).unwrap().unwrap();
    assert_eq!(reloaded.name(), "Alpha v2");
    assert_eq!(reloaded.stock(), 7);

    let beta = repo.create(product("Beta", "b", 0)).unwrap();
    let beta_id = beta.id_typed().unwrap();
    assert!(beta_id > alpha_id);

    let clash = Product::from_parts(
        beta.id_typed(),
        beta.name(),
        sku("a"),
        beta.stock(),
        beta.created_at(),
        beta.updated_at(),
    )
    .unwrap();
    assert_eq!(repo.update(clash).unwrap_err().kind(), ProductErrorKind::DuplicateSku);

    let now = Utc::now();
    let ghost = Product::from_parts(Some(ProductId::from_i64(i64::MAX)), "Ghost", sku("ghost"), 0, now, now).unwrap();
    assert_eq!(repo.update(ghost).unwrap_err().kind(), ProductErrorKind::ProductNotFound);

    let ids: Vec<_> = repo
        .get_all(0, usize::MAX)
        .unwrap()
        .iter()
        .filter_map(Product::id_typed)
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    let position = ids.iter().position(|id| *id == alpha_id).unwrap();
    let page = repo.get_all(position, 1).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id_typed(), Some(alpha_id));
    assert!(repo.get_all(0, 0).unwrap().is_empty());

    assert!(repo.delete(beta_id).unwrap());
    assert!(!repo.delete(beta_id).unwrap());
    assert!(repo.get_by_id(beta_id).unwrap().is_none());

    let reborn = repo.create(product("Beta again", "b", 1)).unwrap();
    assert!(repo.delete(reborn.id_typed().unwrap()).unwrap());
    assert!(repo.delete(alpha_id).unwrap());
}

pub(crate) fn user_repository(repo: &dyn UserRepository, tag: &str) {
    let username = format!("{tag}_user");
    let email = format!("{tag}@example.com");

    let created = repo.create(User::new(&username, &email, "$argon2id$hash")).unwrap();
    assert!(created.id_typed().is_some());
    assert!(created.is_active());

    let by_name = repo.get_by_username(&username).unwrap().unwrap();
    assert_eq!(by_name.id_typed(), created.id_typed());
    assert_eq!(by_name.hashed_password(), "$argon2id$hash");
    let by_email = repo.get_by_email(&email).unwrap().unwrap();
    assert_eq!(by_email.id_typed(), created.id_typed());
    assert!(repo.get_by_username(&format!("{tag}_nobody")).unwrap().is_none());

    let err = repo
        .create(User::new(&username, format!("{tag}_other@example.com"), "h"))
        .unwrap_err();
    assert_eq!(err, AuthError::UsernameTaken { username: username.clone() });

    let err = repo.create(User::new(format!("{tag}_other"), &email, "h")).unwrap_err();
    assert_eq!(err, AuthError::EmailTaken { email: email.clone() });
}
