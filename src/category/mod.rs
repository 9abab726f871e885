//! Category management: the category list and the category form.

mod domain;
mod endpoints;
mod view;

pub use domain::{Category, CategoryDraft, CategoryFormData, CategoryId, Icon};
pub use endpoints::{
    cancel_category_edit, get_categories_page, get_edit_category_form, submit_category_form,
};
