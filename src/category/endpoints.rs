//! Category page, edit, submit and cancel endpoints.

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
    category::{
        Category, CategoryDraft, CategoryFormData, CategoryId,
        view::{categories_page, category_panel},
    },
    form::Submission,
    session::{CurrentSession, Session},
};

/// Render the categories page.
pub async fn get_categories_page(
    current: CurrentSession,
    State(state): State<AppState>,
) -> Result<Response, Error> {
    current
        .hydrate_user(&state)
        .await
        .inspect_err(|error| tracing::error!("Could not load user: {error}"))?;

    render(&current.session, false)
}

/// Load the category with `category_id` into the form.
///
/// An ID that does not match a cached category puts the form back into create mode.
pub async fn get_edit_category_form(
    current: CurrentSession,
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    current
        .hydrate_user(&state)
        .await
        .inspect_err(|error| tracing::error!("Could not load user: {error}"))?;

    let session = &current.session;
    let categories = session.user.categories()?;
    let candidate = categories
        .iter()
        .find(|category| category.id.as_ref() == Some(&category_id));

    if candidate.is_none() {
        tracing::warn!("Category {category_id} is not cached, switching to create mode");
    }

    session.category_form()?.switch_to(candidate);

    render(session, is_htmx)
}

/// Handle category form submission.
///
/// On success the category cache is updated and the form returns to create
/// mode. On failure the form keeps its contents and an alert is returned.
pub async fn submit_category_form(
    current: CurrentSession,
    State(state): State<AppState>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let CurrentSession { token, session } = &current;

    let draft = match CategoryDraft::try_from(form_data) {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    let submission = match session.category_form() {
        Ok(mut form) => {
            form.edit(draft);
            form.submission()
        }
        Err(error) => return error.into_alert_response(),
    };

    let result = async {
        current.hydrate_user(&state).await?;
        dispatch(session, state.api.as_ref(), token, submission).await?;
        session.category_form()?.reset();

        render(session, true)
    }
    .await;

    result.unwrap_or_else(|error| {
        tracing::error!("Could not save category: {error}");
        error.into_alert_response()
    })
}

/// Discard the edit in progress without contacting the finance API.
pub async fn cancel_category_edit(
    CurrentSession { session, .. }: CurrentSession,
) -> Result<Response, Error> {
    if !session.category_form()?.cancel() {
        tracing::debug!("Cancel requested while not editing a category");
    }

    render(&session, true)
}

/// Send `submission` to the finance API and apply it to the cached categories.
async fn dispatch(
    session: &Session,
    api: &dyn FinanceApi,
    token: &BearerToken,
    submission: Submission<CategoryId, CategoryDraft>,
) -> Result<(), Error> {
    match submission {
        Submission::Create(draft) => {
            let id = api.create_category(token, &draft).await?;

            session.user.update_categories(|categories| {
                categories.push(Category::from_draft(id, draft));
            })?;
        }
        Submission::Update { id, draft } => {
            api.update_category(token, &id, &draft).await?;

            session.user.update_categories(|categories| {
                for category in categories.iter_mut() {
                    if category.id.as_ref() == Some(&id) {
                        *category = Category::from_draft(Some(id.clone()), draft.clone());
                    }
                }
            })?;
        }
    }

    Ok(())
}

/// Render the category panel for htmx requests, otherwise the full page.
fn render(session: &Session, is_htmx: bool) -> Result<Response, Error> {
    let categories = session.user.categories()?;
    let form = session.category_form()?.clone();

    let markup = if is_htmx {
        category_panel(&categories, &form)
    } else {
        categories_page(&categories, &form)
    };

    Ok(markup.into_response())
}
