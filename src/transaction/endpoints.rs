//! Transaction page, edit, submit and cancel endpoints.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::{
    AppState, Error,
    api::FinanceApi,
    auth::BearerToken,
    form::Submission,
    session::{CurrentSession, Session},
    transaction::{
        Transaction, TransactionDraft, TransactionFormData, TransactionId,
        view::{transaction_panel, transactions_page},
    },
};

/// Render the transactions page.
pub async fn get_transactions_page(
    current: CurrentSession,
    State(state): State<AppState>,
) -> Result<Response, Error> {
    load(&current, &state).await?;

    render(&current.session, false)
}

/// Load the transaction with `transaction_id` into the form.
///
/// An ID that does not match a cached transaction puts the form back into create mode.
pub async fn get_edit_transaction_form(
    current: CurrentSession,
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let transactions = load(&current, &state).await?;
    let session = &current.session;

    let candidate = transactions
        .iter()
        .find(|transaction| transaction.id == transaction_id);

    if candidate.is_none() {
        tracing::warn!("Transaction {transaction_id} is not cached, switching to create mode");
    }

    session.transaction_form()?.switch_to(candidate);

    render(session, is_htmx)
}

/// Handle transaction form submission.
///
/// On success the transactions are fetched again from the finance API and the
/// form returns to create mode. On failure the form keeps its contents and an
/// alert is returned.
pub async fn submit_transaction_form(
    CurrentSession { token, session }: CurrentSession,
    State(state): State<AppState>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    let draft = match TransactionDraft::try_from(form_data) {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    let submission = match session.transaction_form() {
        Ok(mut form) => {
            form.edit(draft);
            form.submission()
        }
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = dispatch(state.api.as_ref(), &token, submission).await {
        tracing::error!("Could not save transaction: {error}");
        return error.into_alert_response();
    }

    let result = async {
        session.transaction_form()?.reset();
        refetch(&session, state.api.as_ref(), &token).await?;

        render(&session, true)
    }
    .await;

    result.unwrap_or_else(|error| {
        tracing::error!("Saved transaction but could not refresh the page: {error}");
        error.into_alert_response()
    })
}

/// Discard the edit in progress without contacting the finance API.
pub async fn cancel_transaction_edit(
    CurrentSession { session, .. }: CurrentSession,
) -> Result<Response, Error> {
    if !session.transaction_form()?.cancel() {
        tracing::debug!("Cancel requested while not editing a transaction");
    }

    render(&session, true)
}

async fn dispatch(
    api: &dyn FinanceApi,
    token: &BearerToken,
    submission: Submission<TransactionId, TransactionDraft>,
) -> Result<(), Error> {
    match submission {
        Submission::Create(draft) => api.create_transaction(token, &draft).await,
        Submission::Update { id, draft } => api.update_transaction(token, &id, &draft).await,
    }
}

/// Replace the cached transactions with the finance API's copy.
///
/// The cache is dropped if the refetch fails so the next page load tries again.
async fn refetch(session: &Session, api: &dyn FinanceApi, token: &BearerToken) -> Result<(), Error> {
    if let Err(error) = session.refresh_transactions(api, token).await {
        session.invalidate_transactions()?;
        return Err(error);
    }

    Ok(())
}

/// Make sure the user and the transactions are cached.
async fn load(current: &CurrentSession, state: &AppState) -> Result<Vec<Transaction>, Error> {
    current
        .hydrate_user(state)
        .await
        .inspect_err(|error| tracing::error!("Could not load user: {error}"))?;

    current
        .session
        .load_transactions(state.api.as_ref(), &current.token)
        .await
        .inspect_err(|error| tracing::error!("Could not load transactions: {error}"))
}

/// Render the transaction panel for htmx requests, otherwise the full page.
fn render(session: &Session, is_htmx: bool) -> Result<Response, Error> {
    let transactions = session.transactions()?.unwrap_or_default();
    let categories = session.user.categories()?;
    let form = session.transaction_form()?.clone();

    let markup = if is_htmx {
        transaction_panel(&transactions, &categories, &form)
    } else {
        transactions_page(&transactions, &categories, &form)
    };

    Ok(markup.into_response())
}
