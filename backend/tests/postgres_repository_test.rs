//! PostgreSQL user repository tests
//!
//! Run with: cargo test -- --ignored

mod common;

use authgate_backend::repositories::{NewUser, PgUserRepository, UserRepository};
use std::sync::Arc;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        email: format!("{}@test.com", username),
        avatar: None,
    }
}

fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

async fn repository() -> PgUserRepository {
    let app = common::TestApp::with_postgres().await;
    PgUserRepository::new(app.pool.expect("postgres test app has a pool"))
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_insert_and_find() {
    let repo = repository().await;
    let username = unique_username("find");

    let created = repo.insert(&new_user(&username)).await.unwrap().unwrap();
    assert_eq!(created.username, username);

    let found = repo.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(repo.username_exists(&username).await.unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_insert_duplicate_returns_none() {
    let repo = repository().await;
    let username = unique_username("dup");

    assert!(repo.insert(&new_user(&username)).await.unwrap().is_some());
    assert!(repo.insert(&new_user(&username)).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_inserts_create_one_row() {
    let repo = Arc::new(repository().await);
    let username = unique_username("race");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            let user = new_user(&username);
            tokio::spawn(async move { repo.insert(&user).await.unwrap() })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_find_unknown_user() {
    let repo = repository().await;

    assert!(repo.find_by_username(&unique_username("ghost")).await.unwrap().is_none());
    assert!(repo.ping().await.is_ok());
}
