//! Transaction management: the transaction table and the transaction form.

mod domain;
mod endpoints;
mod view;

pub use domain::{Transaction, TransactionDraft, TransactionFormData, TransactionId};
pub use endpoints::{
    cancel_transaction_edit, get_edit_transaction_form, get_transactions_page,
    submit_transaction_form,
};
