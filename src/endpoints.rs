//! The URIs served by the web client.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}/edit', use [format_endpoint].

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for listing, creating and editing categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// Loads an existing category into the category form.
pub const EDIT_CATEGORY_FORM: &str = "/categories/{category_id}/edit";
/// Submits the category form.
pub const SUBMIT_CATEGORY_FORM: &str = "/categories/form";
/// Cancels editing a category.
pub const CANCEL_CATEGORY_EDIT: &str = "/categories/form/cancel";
/// The page for listing, creating and editing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// Loads an existing transaction into the transaction form.
pub const EDIT_TRANSACTION_FORM: &str = "/transactions/{transaction_id}/edit";
/// Submits the transaction form.
pub const SUBMIT_TRANSACTION_FORM: &str = "/transactions/form";
/// Cancels editing a transaction.
pub const CANCEL_TRANSACTION_EDIT: &str = "/transactions/form/cancel";

/// Replace the parameter in `endpoint_path` with `id`, percent-encoded.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}/edit', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        urlencoding::encode(id),
        &endpoint_path[param_end..]
    )
}
