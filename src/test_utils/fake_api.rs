use std::sync::Mutex;

use async_trait::async_trait;
use time::macros::date;

use crate::{
    Error,
    api::FinanceApi,
    auth::BearerToken,
    category::{Category, CategoryDraft, CategoryId, Icon},
    transaction::{Transaction, TransactionDraft, TransactionId},
    user::{SetUserPayload, User, UserId},
};

/// A request received by [FakeFinanceApi].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiCall {
    FetchUser,
    CreateCategory(CategoryDraft),
    UpdateCategory { id: CategoryId, draft: CategoryDraft },
    ListTransactions,
    CreateTransaction(TransactionDraft),
    UpdateTransaction { id: TransactionId, draft: TransactionDraft },
}

/// An in-memory finance API that records every request.
#[derive(Default)]
pub(crate) struct FakeFinanceApi {
    calls: Mutex<Vec<ApiCall>>,
    tokens: Mutex<Vec<BearerToken>>,
    user: Mutex<Option<User>>,
    transactions: Mutex<Vec<Transaction>>,
    assigned_category_id: Mutex<Option<CategoryId>>,
    write_error: Mutex<Option<Error>>,
    list_error: Mutex<Option<Error>>,
    before_fetch_user: Mutex<Option<Box<dyn Fn() + Send>>>,
    before_create_category: Mutex<Option<Box<dyn Fn() + Send>>>,
}

impl FakeFinanceApi {
    pub(crate) fn with_user(user: User) -> Self {
        let api = Self::default();
        *api.user.lock().unwrap() = Some(user);
        api
    }

    pub(crate) fn set_transactions(&self, transactions: Vec<Transaction>) {
        *self.transactions.lock().unwrap() = transactions;
    }

    /// Make the next category creations answer with `id`.
    pub(crate) fn assign_category_id(&self, id: &str) {
        *self.assigned_category_id.lock().unwrap() = Some(CategoryId::new(id));
    }

    /// Make every create and update request fail with `error`.
    pub(crate) fn fail_writes_with(&self, error: Error) {
        *self.write_error.lock().unwrap() = Some(error);
    }

    /// Make every transaction list request fail with `error`.
    pub(crate) fn fail_list_with(&self, error: Error) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    /// Run `hook` when a user request arrives, before it is answered.
    pub(crate) fn before_fetch_user(&self, hook: impl Fn() + Send + 'static) {
        *self.before_fetch_user.lock().unwrap() = Some(Box::new(hook));
    }

    /// Run `hook` when a category creation arrives, before it is answered.
    pub(crate) fn before_create_category(&self, hook: impl Fn() + Send + 'static) {
        *self.before_create_category.lock().unwrap() = Some(Box::new(hook));
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn tokens(&self) -> Vec<BearerToken> {
        self.tokens.lock().unwrap().clone()
    }

    fn record(&self, token: &BearerToken, call: ApiCall) {
        self.tokens.lock().unwrap().push(token.clone());
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<(), Error> {
        match self.write_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FinanceApi for FakeFinanceApi {
    async fn fetch_user(&self, token: &BearerToken) -> Result<SetUserPayload, Error> {
        self.record(token, ApiCall::FetchUser);

        if let Some(hook) = self.before_fetch_user.lock().unwrap().as_ref() {
            hook();
        }

        self.user
            .lock()
            .unwrap()
            .clone()
            .map(|user| SetUserPayload::Wrapped { user })
            .ok_or(Error::RequestRejected { status: 401 })
    }

    async fn create_category(
        &self,
        token: &BearerToken,
        draft: &CategoryDraft,
    ) -> Result<Option<CategoryId>, Error> {
        self.record(token, ApiCall::CreateCategory(draft.clone()));

        if let Some(hook) = self.before_create_category.lock().unwrap().as_ref() {
            hook();
        }

        self.write_result()?;

        Ok(self.assigned_category_id.lock().unwrap().clone())
    }

    async fn update_category(
        &self,
        token: &BearerToken,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<(), Error> {
        self.record(
            token,
            ApiCall::UpdateCategory {
                id: id.clone(),
                draft: draft.clone(),
            },
        );
        self.write_result()
    }

    async fn list_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>, Error> {
        self.record(token, ApiCall::ListTransactions);

        if let Some(error) = self.list_error.lock().unwrap().clone() {
            return Err(error);
        }

        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn create_transaction(
        &self,
        token: &BearerToken,
        draft: &TransactionDraft,
    ) -> Result<(), Error> {
        self.record(token, ApiCall::CreateTransaction(draft.clone()));
        self.write_result()?;

        let mut transactions = self.transactions.lock().unwrap();
        let id = TransactionId::new(format!("t{}", transactions.len() + 1));
        transactions.push(transaction_from_draft(id, draft));

        Ok(())
    }

    async fn update_transaction(
        &self,
        token: &BearerToken,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<(), Error> {
        self.record(
            token,
            ApiCall::UpdateTransaction {
                id: id.clone(),
                draft: draft.clone(),
            },
        );
        self.write_result()?;

        for transaction in self.transactions.lock().unwrap().iter_mut() {
            if &transaction.id == id {
                *transaction = transaction_from_draft(id.clone(), draft);
            }
        }

        Ok(())
    }
}

fn transaction_from_draft(id: TransactionId, draft: &TransactionDraft) -> Transaction {
    Transaction {
        id,
        amount: draft.amount,
        description: draft.description.clone(),
        date: draft.date,
        category_id: draft.category_id.clone(),
    }
}

/// A user with the categories "Fuel" (c1) and "Bills" (c2).
pub(crate) fn sample_user() -> User {
    User::new(
        UserId::new("u1"),
        vec![
            Category {
                id: Some(CategoryId::new("c1")),
                label: "Fuel".to_owned(),
                icon: Some(Icon::Car),
            },
            Category {
                id: Some(CategoryId::new("c2")),
                label: "Bills".to_owned(),
                icon: Some(Icon::Receipt),
            },
        ],
    )
}

/// A fuel purchase on 2024-03-05 in category c1.
pub(crate) fn sample_transaction(id: &str, amount: f64) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        amount,
        description: "Fuel".to_owned(),
        date: date!(2024 - 03 - 05),
        category_id: Some(CategoryId::new("c1")),
    }
}
