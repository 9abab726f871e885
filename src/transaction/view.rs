//! HTML rendering for the transactions page.

use maud::{Markup, html};

use crate::{
    category::Category,
    endpoints,
    form::FormState,
    html::{
        BUTTON_LINK_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE,
        BUTTON_SUCCESS_OUTLINE_STYLE, FORM_CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    transaction::Transaction,
};

/// The ID of the element replaced by the transaction endpoints.
pub const TRANSACTION_PANEL_ID: &str = "transaction-panel";

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

pub fn transactions_page(
    transactions: &[Transaction],
    categories: &[Category],
    form: &FormState<Transaction>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (transaction_panel(transactions, categories, form))
        }
    };

    base("Transactions", &content)
}

/// The transaction table and form, swapped as a unit after every form action.
pub fn transaction_panel(
    transactions: &[Transaction],
    categories: &[Category],
    form: &FormState<Transaction>,
) -> Markup {
    let target = format!("#{TRANSACTION_PANEL_ID}");

    html! {
        div id=(TRANSACTION_PANEL_ID) class="flex flex-col lg:flex-row gap-8 w-full justify-center"
        {
            (transaction_form(form, categories, &target))
            (transaction_table(transactions, categories, &target))
        }
    }
}

fn transaction_form(form: &FormState<Transaction>, categories: &[Category], target: &str) -> Markup {
    let draft = form.draft();
    let heading = if form.is_editing() {
        "Update Transaction"
    } else {
        "Add New Transaction"
    };

    html! {
        div class=(FORM_CARD_STYLE)
        {
            h2 class="text-xl font-bold" { (heading) }

            form
                hx-post=(endpoints::SUBMIT_TRANSACTION_FORM)
                hx-target=(target)
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount (in EUR)" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        value=(draft.amount)
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        value=(draft.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Transaction Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(draft.date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                    @if categories.is_empty() {
                        select name="category_id" id="category_id" disabled class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" { "No categories" }
                        }
                    } @else {
                        select name="category_id" id="category_id" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" selected[draft.category_id.is_none()] { "Select a category" }

                            @for category in categories {
                                @if let Some(id) = &category.id {
                                    option
                                        value=(id)
                                        selected[draft.category_id.as_ref() == Some(id)]
                                    {
                                        @if let Some(icon) = category.icon { (icon) " " }
                                        (category.label)
                                    }
                                }
                            }
                        }
                    }
                }

                @if form.is_editing() {
                    div class="flex gap-4"
                    {
                        button type="submit" class=(BUTTON_SUCCESS_OUTLINE_STYLE) { "Update" }

                        button
                            type="button"
                            hx-post=(endpoints::CANCEL_TRANSACTION_EDIT)
                            hx-target=(target)
                            hx-swap="outerHTML"
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Cancel"
                        }
                    }
                } @else {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Submit" }
                }
            }
        }
    }
}

fn transaction_table(transactions: &[Transaction], categories: &[Category], target: &str) -> Markup {
    let category_label = |transaction: &Transaction| {
        transaction.category_id.as_ref().and_then(|category_id| {
            categories
                .iter()
                .find(|category| category.id.as_ref() == Some(category_id))
        })
    };

    html! {
        section class="w-full lg:max-w-3xl dark:bg-gray-800"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if let Some(category) = category_label(transaction) {
                                    @if let Some(icon) = category.icon { (icon) " " }
                                    (category.label)
                                }
                            }
                            td class={ "px-6 py-4 text-right " (amount_class(transaction.amount)) }
                            {
                                (format_currency(transaction.amount))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                button
                                    type="button"
                                    hx-get=(endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_FORM, transaction.id.as_ref()))
                                    hx-target=(target)
                                    hx-swap="outerHTML"
                                    class=(BUTTON_LINK_STYLE)
                                {
                                    "Edit"
                                }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr
                        {
                            td
                                colspan="5"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No transactions yet."
                            }
                        }
                    }
                }
            }
        }
    }
}
