//! HTML for the categories page.

use maud::{Markup, html};

use crate::{
    category::{Category, Icon},
    endpoints,
    form::FormState,
    html::{
        BUTTON_LINK_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE,
        BUTTON_SUCCESS_OUTLINE_STYLE, FORM_CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
};

/// The ID of the element replaced by the category endpoints.
pub const CATEGORY_PANEL_ID: &str = "category-panel";

pub fn categories_page(categories: &[Category], form: &FormState<Category>) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (category_panel(categories, form))
        }
    };

    base("Categories", &content)
}

/// The category list and form, swapped as a unit after every form action.
pub fn category_panel(categories: &[Category], form: &FormState<Category>) -> Markup {
    let target = format!("#{CATEGORY_PANEL_ID}");

    html! {
        div id=(CATEGORY_PANEL_ID) class="flex flex-col lg:flex-row gap-8 w-full justify-center"
        {
            (category_form(form, &target))
            (category_list(categories, &target))
        }
    }
}

fn category_form(form: &FormState<Category>, target: &str) -> Markup {
    let draft = form.draft();

    html! {
        div class=(FORM_CARD_STYLE)
        {
            h2 class="text-xl font-bold" { "Add New Category" }

            form
                hx-post=(endpoints::SUBMIT_CATEGORY_FORM)
                hx-target=(target)
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="label" class=(FORM_LABEL_STYLE) { "Label" }

                    input
                        id="label"
                        type="text"
                        name="label"
                        placeholder="e.g. Groceries"
                        value=(draft.label)
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="icon" class=(FORM_LABEL_STYLE) { "Icon" }

                    select id="icon" name="icon" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[draft.icon.is_none()] { "No icon" }

                        @for icon in Icon::ALL {
                            option value=(icon) selected[draft.icon == Some(icon)] { (icon) }
                        }
                    }
                }

                @if form.is_editing() {
                    div class="flex gap-4"
                    {
                        button type="submit" class=(BUTTON_SUCCESS_OUTLINE_STYLE) { "Update" }

                        button
                            type="button"
                            hx-post=(endpoints::CANCEL_CATEGORY_EDIT)
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

fn category_list(categories: &[Category], target: &str) -> Markup {
    html! {
        section class="w-full lg:max-w-xl dark:bg-gray-800"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Icon" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Label" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for category in categories {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if let Some(icon) = category.icon { (icon) }
                            }

                            td class=(TABLE_CELL_STYLE) { (category.label) }

                            td class=(TABLE_CELL_STYLE)
                            {
                                // Categories only become editable once the server has assigned an ID.
                                @if let Some(id) = &category.id {
                                    button
                                        type="button"
                                        hx-get=(endpoints::format_endpoint(endpoints::EDIT_CATEGORY_FORM, id.as_ref()))
                                        hx-target=(target)
                                        hx-swap="outerHTML"
                                        class=(BUTTON_LINK_STYLE)
                                    {
                                        "Edit"
                                    }
                                }
                            }
                        }
                    }

                    @if categories.is_empty() {
                        tr
                        {
                            td
                                colspan="3"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No categories created yet."
                            }
                        }
                    }
                }
            }
        }
    }
}
