//! Racing creates of the same username.

use crate::common::*;
use backend_resources::UserServiceError;
use futures::future::join_all;

#[tokio::test]
async fn test_exactly_one_concurrent_create_succeeds() {
    let mut env = TestEnv::new().await;
    let ctx = moderator_context();
    let request = valid_request();

    let attempts = (0..10).map(|_| env.service.create_user(&ctx, &request));
    let results = join_all(attempts).await;

    let created: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(created.len(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, UserServiceError::Conflict { .. }))
    );
    assert_eq!(env.identity_count().await, 1);

    env.track(*created[0]);
    env.cleanup().await;
}

#[tokio::test]
async fn test_concurrent_creates_across_tasks() {
    let mut env = TestEnv::new().await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = std::sync::Arc::clone(&env.service);
            // Half the tasks race on one name, the rest use unique names
            let username = if i % 2 == 0 {
                "shared".to_string()
            } else {
                format!("unique_{}", i)
            };
            tokio::spawn(async move {
                let request = UserRequestBuilder::new().with_username(username).build();
                service.create_user(&moderator_context(), &request).await
            })
        })
        .collect();

    let mut successes = Vec::new();
    for handle in handles {
        if let Ok(id) = handle.await.unwrap() {
            successes.push(id);
        }
    }

    // One "shared" plus four unique names
    assert_eq!(successes.len(), 5);
    for id in successes {
        env.track(id);
    }
    env.cleanup().await;
}
