//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    category::{
        cancel_category_edit, get_categories_page, get_edit_category_form, submit_category_form,
    },
    endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{
        cancel_transaction_edit, get_edit_transaction_form, get_transactions_page,
        submit_transaction_form,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::EDIT_CATEGORY_FORM, get(get_edit_category_form))
        .route(endpoints::SUBMIT_CATEGORY_FORM, post(submit_category_form))
        .route(endpoints::CANCEL_CATEGORY_EDIT, post(cancel_category_edit))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::EDIT_TRANSACTION_FORM,
            get(get_edit_transaction_form),
        )
        .route(
            endpoints::SUBMIT_TRANSACTION_FORM,
            post(submit_transaction_form),
        )
        .route(
            endpoints::CANCEL_TRANSACTION_EDIT,
            post(cancel_transaction_edit),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}
