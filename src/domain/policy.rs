//! Role-based visibility rules
//!
//! The single authority for which expenses a user may see and which
//! departments a reviewer may act on. Callers must not filter on their own.

use crate::domain::errors::WorkflowError;
use crate::domain::expense::{Expense, ExpenseStatus};
use crate::domain::user::{Role, User};

/// Whether `user` is authorized to see `expense`
///
/// Scope per role: admin and financeiro see everything, gestao sees their
/// own department, funcionario sees their own claims.
pub fn can_view(user: &User, expense: &Expense) -> bool {
    match user.role() {
        Role::Admin | Role::Financeiro => true,
        Role::Gestao => user.department() == Some(expense.department()),
        Role::Funcionario => expense.user_id() == user.id(),
    }
}

/// Returns exactly the subset of `expenses` that `user` may see
///
/// Order-preserving relative to the input, no side effects.
pub fn visible_expenses<'a>(user: &User, expenses: &'a [Expense]) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| can_view(user, e)).collect()
}

/// Whether `reviewer` may approve or reject claims for `department`
///
/// Employees never review; managers review only their own department.
pub fn can_review(reviewer: &User, department: &str) -> bool {
    match reviewer.role() {
        Role::Admin | Role::Financeiro => true,
        Role::Gestao => reviewer.department() == Some(department),
        Role::Funcionario => false,
    }
}

/// Returns the pending claims awaiting `user`'s review
///
/// Same department scope as [`can_review`], restricted to `Pending` status.
/// Fails with `Forbidden` for `funcionario` users.
pub fn approval_queue<'a>(
    user: &User,
    expenses: &'a [Expense],
) -> Result<Vec<&'a Expense>, WorkflowError> {
    if !user.role().is_reviewer() {
        return Err(WorkflowError::Forbidden(
            "employees may not review expenses".to_string(),
        ));
    }

    Ok(expenses
        .iter()
        .filter(|e| e.status() == ExpenseStatus::Pending && can_review(user, e.department()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::user::Email;

    fn user(name: &str, role: Role, department: Option<&str>) -> User {
        User::new(
            name.to_string(),
            Email::new(format!("{}@example.com", name.to_lowercase().replace(' ', "."))).unwrap(),
            "hash".to_string(),
            role,
            department.map(|d| d.to_string()),
        )
        .unwrap()
    }

    fn expense(user_id: Uuid, department: &str, status: ExpenseStatus) -> Expense {
        Expense::from_persistence(
            Uuid::new_v4(),
            user_id,
            "Employee".to_string(),
            department.to_string(),
            "Test expense".to_string(),
            Decimal::new(10000, 2),
            NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
            status,
            None,
            None,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn admin_sees_all_expenses() {
        let admin = user("Admin User", Role::Admin, None);
        let expenses = vec![
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "TI", ExpenseStatus::Approved),
        ];

        assert_eq!(visible_expenses(&admin, &expenses).len(), 2);
    }

    #[test]
    fn finance_sees_all_expenses() {
        let finance = user("Financial Manager", Role::Financeiro, None);
        let expenses = vec![
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "TI", ExpenseStatus::Rejected),
        ];

        assert_eq!(visible_expenses(&finance, &expenses).len(), 2);
    }

    #[test]
    fn manager_sees_own_department_only() {
        let manager = user("Department Manager", Role::Gestao, Some("Marketing"));
        let expenses = vec![
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "TI", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Approved),
        ];

        let visible = visible_expenses(&manager, &expenses);

        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|e| e.department() == "Marketing"));
    }

    #[test]
    fn employee_sees_own_expenses_only() {
        let employee = user("Employee", Role::Funcionario, Some("Marketing"));
        let expenses = vec![
            expense(employee.id(), "Marketing", ExpenseStatus::Pending),
            // same department, different owner
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
        ];

        let visible = visible_expenses(&employee, &expenses);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].user_id(), employee.id());
    }

    #[test]
    fn visibility_preserves_input_order() {
        let finance = user("Financial Manager", Role::Financeiro, None);
        let expenses = vec![
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "TI", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "RH", ExpenseStatus::Pending),
        ];

        let visible = visible_expenses(&finance, &expenses);

        let input_ids: Vec<_> = expenses.iter().map(|e| e.id()).collect();
        let output_ids: Vec<_> = visible.iter().map(|e| e.id()).collect();
        assert_eq!(input_ids, output_ids);
    }

    #[test]
    fn approval_queue_only_returns_pending() {
        let finance = user("Financial Manager", Role::Financeiro, None);
        let expenses = vec![
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Approved),
            expense(Uuid::new_v4(), "TI", ExpenseStatus::Rejected),
        ];

        let queue = approval_queue(&finance, &expenses).unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].status(), ExpenseStatus::Pending);
    }

    #[test]
    fn approval_queue_scopes_manager_to_department() {
        let manager = user("Department Manager", Role::Gestao, Some("TI"));
        let expenses = vec![
            expense(Uuid::new_v4(), "Marketing", ExpenseStatus::Pending),
            expense(Uuid::new_v4(), "TI", ExpenseStatus::Pending),
        ];

        let queue = approval_queue(&manager, &expenses).unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].department(), "TI");
    }

    #[test]
    fn approval_queue_forbidden_for_employees() {
        let employee = user("Employee", Role::Funcionario, Some("Marketing"));
        let expenses = vec![expense(employee.id(), "Marketing", ExpenseStatus::Pending)];

        let result = approval_queue(&employee, &expenses);

        assert!(matches!(result, Err(WorkflowError::Forbidden(_))));
    }

    #[test]
    fn review_scope_per_role() {
        let admin = user("Admin User", Role::Admin, None);
        let finance = user("Financial Manager", Role::Financeiro, None);
        let manager = user("Department Manager", Role::Gestao, Some("Marketing"));
        let employee = user("Employee", Role::Funcionario, Some("Marketing"));

        assert!(can_review(&admin, "TI"));
        assert!(can_review(&finance, "TI"));
        assert!(can_review(&manager, "Marketing"));
        assert!(!can_review(&manager, "TI"));
        assert!(!can_review(&employee, "Marketing"));
    }
}
