//! Store-level workflow tests
//!
//! These tests verify the entity store semantics the HTTP layer relies on:
//! per-id serialization of reviewer transitions, idempotence after failed
//! transitions, and insert-or-replace saves.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use expensetrack_api::domain::errors::WorkflowError;
use expensetrack_api::domain::expense::{Expense, ExpenseStatus, NewExpense};
use expensetrack_api::domain::repositories::ExpenseRepository;
use expensetrack_api::domain::user::{Email, Role, User};
use expensetrack_api::infrastructure::repositories::InMemoryExpenseRepository;

fn user(name: &str, email: &str, role: Role, department: Option<&str>) -> User {
    User::new(
        name.to_string(),
        Email::new(email).unwrap(),
        "hash".to_string(),
        role,
        department.map(|d| d.to_string()),
    )
    .unwrap()
}

fn pending_expense() -> Expense {
    let employee = user(
        "Employee",
        "employee@example.com",
        Role::Funcionario,
        Some("Marketing"),
    );
    let (expense, _) = Expense::submit(
        &employee,
        NewExpense {
            description: "Taxi".to_string(),
            amount: Decimal::new(4500, 2),
            date: NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
            receipt_url: None,
        },
    )
    .unwrap();
    expense
}

/// The load-mutate-complete flow a review handler performs
async fn review(
    store: Arc<InMemoryExpenseRepository>,
    reviewer: User,
    id: Uuid,
) -> Result<(), WorkflowError> {
    let mut expense = store
        .find_by_id(id)
        .await?
        .ok_or(WorkflowError::NotFound(id))?;
    expense.approve(&reviewer, None)?;
    store.complete_review(&expense).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reviews_exactly_one_wins() {
    let store = Arc::new(InMemoryExpenseRepository::new());
    let expense = pending_expense();
    store.save(&expense).await.unwrap();

    let finance = user(
        "Financial Manager",
        "finance@example.com",
        Role::Financeiro,
        None,
    );
    let admin = user("Admin User", "admin@example.com", Role::Admin, None);

    let first = tokio::spawn(review(store.clone(), finance, expense.id()));
    let second = tokio::spawn(review(store.clone(), admin, expense.id()));

    let results = [first.await.unwrap(), second.await.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(WorkflowError::Conflict(_)))));

    let stored = store.find_by_id(expense.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), ExpenseStatus::Approved);
}

#[tokio::test]
async fn test_lost_race_does_not_overwrite_winner() {
    let store = Arc::new(InMemoryExpenseRepository::new());
    let expense = pending_expense();
    store.save(&expense).await.unwrap();

    let finance = user(
        "Financial Manager",
        "finance@example.com",
        Role::Financeiro,
        None,
    );
    let manager = user(
        "Marketing Manager",
        "manager@example.com",
        Role::Gestao,
        Some("Marketing"),
    );

    // Both reviewers load the pending claim before either writes
    let mut first_copy = store.find_by_id(expense.id()).await.unwrap().unwrap();
    let mut second_copy = store.find_by_id(expense.id()).await.unwrap().unwrap();

    first_copy.approve(&finance, None).unwrap();
    second_copy.reject(&manager, "Duplicate claim").unwrap();

    store.complete_review(&first_copy).await.unwrap();
    let lost = store.complete_review(&second_copy).await;

    assert!(matches!(lost, Err(WorkflowError::Conflict(_))));

    let stored = store.find_by_id(expense.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), ExpenseStatus::Approved);
    assert_eq!(stored.approved_by(), Some("Financial Manager"));
    assert_eq!(stored.comments(), None);
}

#[tokio::test]
async fn test_failed_transition_leaves_stored_record_unchanged() {
    let store = Arc::new(InMemoryExpenseRepository::new());
    let expense = pending_expense();
    store.save(&expense).await.unwrap();

    let finance = user(
        "Financial Manager",
        "finance@example.com",
        Role::Financeiro,
        None,
    );
    let other_manager = user(
        "IT Manager",
        "it-manager@example.com",
        Role::Gestao,
        Some("TI"),
    );

    // Rejection without a comment fails validation
    let mut copy = store.find_by_id(expense.id()).await.unwrap().unwrap();
    assert!(matches!(
        copy.reject(&finance, ""),
        Err(WorkflowError::Validation(_))
    ));

    // An out-of-scope manager fails on review scope
    let mut copy = store.find_by_id(expense.id()).await.unwrap().unwrap();
    assert!(matches!(
        copy.approve(&other_manager, None),
        Err(WorkflowError::Forbidden(_))
    ));

    // Neither attempt touched the stored record
    let stored = store.find_by_id(expense.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), ExpenseStatus::Pending);
    assert_eq!(stored.approved_by(), None);
    assert_eq!(stored.comments(), None);
}

#[tokio::test]
async fn test_save_is_insert_or_replace() {
    let store = InMemoryExpenseRepository::new();
    let expense = pending_expense();

    store.save(&expense).await.unwrap();
    store.save(&expense).await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), expense.id());
}
