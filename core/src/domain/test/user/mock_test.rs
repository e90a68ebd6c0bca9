use crate::{
    Service,
    domain::{
        common::{CoreError, GetPaginated},
        user::{
            entities::{InsertUserInput, UpdateUserInput, UserId},
            events,
            ports::{MockUserRepository, UserService},
        },
    },
};
use uuid::Uuid;

fn sample_input() -> InsertUserInput {
    InsertUserInput {
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        display_name: Some("Ada Lovelace".to_string()),
    }
}

// == Create User Tests ==

#[tokio::test]
async fn test_create_user_success() -> Result<(), Box<dyn std::error::Error>> {
    let user_mock_repo = MockUserRepository::new();
    let service = Service::new(user_mock_repo.clone());

    let user = service
        .create_user(sample_input())
        .await
        .expect("create_user returned an error");

    assert_eq!(user.username, "ada", "Expected correct username");
    assert_eq!(user.email, "ada@example.com", "Expected correct email");
    assert!(user.is_active, "New users start active");
    assert!(
        user.pending_events().is_empty(),
        "Events must be drained into the outbox at insert time"
    );

    let records = user_mock_repo.outbox().records();
    assert_eq!(records.len(), 2, "Expected two staged outbox records");
    assert_eq!(records[0].event_type, events::USER_CREATED);
    assert_eq!(records[1].event_type, events::WELCOME_EMAIL_REQUESTED);
    assert!(records.iter().all(|r| r.is_pending()));

    Ok(())
}

#[tokio::test]
async fn test_create_user_fail_empty_username() -> Result<(), Box<dyn std::error::Error>> {
    let user_mock_repo = MockUserRepository::new();
    let service = Service::new(user_mock_repo.clone());

    let input = InsertUserInput {
        username: "   ".to_string(),
        email: "ada@example.com".to_string(),
        display_name: None,
    };

    let error = service
        .create_user(input)
        .await
        .expect_err("create_user should have returned an error");

    assert_eq!(
        error.to_string(),
        "Username cannot be empty",
        "Expected invalid username error"
    );
    assert!(
        user_mock_repo.outbox().records().is_empty(),
        "Validation failures must stage nothing"
    );

    Ok(())
}

#[tokio::test]
async fn test_create_user_fail_invalid_email() -> Result<(), Box<dyn std::error::Error>> {
    let user_mock_repo = MockUserRepository::new();
    let service = Service::new(user_mock_repo);

    let input = InsertUserInput {
        username: "ada".to_string(),
        email: "not-an-address".to_string(),
        display_name: None,
    };

    let error = service
        .create_user(input)
        .await
        .expect_err("create_user should have returned an error");

    assert_eq!(
        error.to_string(),
        "Email address is not valid",
        "Expected invalid email error"
    );

    Ok(())
}

// == Get User Tests ==

#[tokio::test]
async fn test_get_user_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let service = Service::new(MockUserRepository::new());
    let missing = UserId::from(Uuid::new_v4());

    let error = service
        .get_user(&missing)
        .await
        .expect_err("get_user should have returned an error");

    assert!(
        matches!(error, CoreError::UserNotFound { id } if id == missing),
        "Expected UserNotFound, got: {error}"
    );

    Ok(())
}

#[tokio::test]
async fn test_get_user_success() -> Result<(), Box<dyn std::error::Error>> {
    let service = Service::new(MockUserRepository::new());

    let created = service.create_user(sample_input()).await?;
    let fetched = service.get_user(&created.id).await?;

    assert_eq!(fetched.id, created.id, "Expected the same user back");
    assert_eq!(fetched.username, "ada");

    Ok(())
}

// == List Users Tests ==

#[tokio::test]
async fn test_list_users_page_zero_is_treated_as_first_page() -> Result<(), Box<dyn std::error::Error>>
{
    let service = Service::new(MockUserRepository::new());

    service.create_user(sample_input()).await?;
    service
        .create_user(InsertUserInput {
            username: "grace".to_string(),
            email: "grace@example.com".to_string(),
            display_name: None,
        })
        .await?;

    let (users, total) = service
        .list_users(&GetPaginated { page: 0, limit: 10 })
        .await
        .expect("list_users returned an error");

    assert_eq!(total, 2, "Expected both users to be counted");
    assert_eq!(users.len(), 2, "Page zero must behave like the first page");

    Ok(())
}

// == Update User Tests ==

#[tokio::test]
async fn test_update_user_success() -> Result<(), Box<dyn std::error::Error>> {
    let user_mock_repo = MockUserRepository::new();
    let service = Service::new(user_mock_repo.clone());

    let created = service.create_user(sample_input()).await?;
    let updated = service
        .update_user(UpdateUserInput {
            id: created.id,
            username: None,
            email: None,
            display_name: Some("Countess of Lovelace".to_string()),
            is_active: Some(false),
        })
        .await
        .expect("update_user returned an error");

    assert_eq!(
        updated.display_name,
        Some("Countess of Lovelace".to_string()),
        "Expected updated display name"
    );
    assert!(!updated.is_active, "Expected user to be deactivated");
    assert!(updated.updated_at.is_some(), "Expected updated_at stamp");

    let records = user_mock_repo.outbox().records();
    assert_eq!(records.len(), 3, "Update should stage one more record");
    assert_eq!(records[2].event_type, events::USER_UPDATED);

    Ok(())
}

#[tokio::test]
async fn test_update_user_fail_empty_username() -> Result<(), Box<dyn std::error::Error>> {
    let service = Service::new(MockUserRepository::new());

    let created = service.create_user(sample_input()).await?;
    let error = service
        .update_user(UpdateUserInput {
            id: created.id,
            username: Some("".to_string()),
            email: None,
            display_name: None,
            is_active: None,
        })
        .await
        .expect_err("update_user should have returned an error");

    assert_eq!(
        error.to_string(),
        "Username cannot be empty",
        "Expected invalid username error"
    );

    Ok(())
}

// == Delete User Tests ==

#[tokio::test]
async fn test_delete_user_success() -> Result<(), Box<dyn std::error::Error>> {
    let user_mock_repo = MockUserRepository::new();
    let service = Service::new(user_mock_repo.clone());

    let created = service.create_user(sample_input()).await?;
    service
        .delete_user(&created.id)
        .await
        .expect("delete_user returned an error");

    let error = service
        .get_user(&created.id)
        .await
        .expect_err("deleted user should not be found");
    assert!(matches!(error, CoreError::UserNotFound { .. }));

    let records = user_mock_repo.outbox().records();
    assert_eq!(
        records.last().map(|r| r.event_type.as_str()),
        Some(events::USER_DELETED),
        "Delete should stage a user.deleted record"
    );

    Ok(())
}
