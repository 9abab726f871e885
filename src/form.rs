//! The create/edit lifecycle shared by the category and transaction forms.
//!
//! A [FormState] is always in exactly one of two modes: creating a new entity
//! from a draft, or editing the existing entity whose identifier is held by
//! [FormMode::Edit]. Drafts are only ever handed to the network layer through
//! [FormState::submission], which callers invoke when the user submits.

use std::fmt::{Debug, Display};

/// An entity that can be loaded into a form for editing.
pub trait Editable {
    /// The server-assigned identifier of the entity.
    type Id: Clone + Debug + Display + PartialEq;
    /// The editable fields of the entity. [Default] gives the empty template.
    type Draft: Clone + Debug + Default + PartialEq;

    /// The identifier of the entity, `None` if the server has not assigned one yet.
    fn id(&self) -> Option<&Self::Id>;

    /// Copy the editable fields of the entity into a new draft.
    fn to_draft(&self) -> Self::Draft;
}

/// Whether a form creates a new entity or updates an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode<Id> {
    /// Submitting the form creates a new entity.
    Create,
    /// Submitting the form updates the entity with this identifier.
    Edit(Id),
}

/// The request a form submission resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<Id, Draft> {
    /// Persist a new entity. The server assigns the identifier.
    Create(Draft),
    /// Overwrite the stored fields of the entity with identifier `id`.
    Update {
        /// The entity to update.
        id: Id,
        /// The new field values.
        draft: Draft,
    },
}

/// The draft and mode of a single form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<E: Editable> {
    draft: E::Draft,
    mode: FormMode<E::Id>,
}

impl<E: Editable> Default for FormState<E> {
    fn default() -> Self {
        Self {
            draft: E::Draft::default(),
            mode: FormMode::Create,
        }
    }
}

impl<E: Editable> FormState<E> {
    /// Create a form in create mode holding the empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// The values currently held by the form.
    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    /// Whether the form creates or updates.
    pub fn mode(&self) -> &FormMode<E::Id> {
        &self.mode
    }

    /// Whether the form is in edit mode.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Load `candidate` into the form.
    ///
    /// A candidate with an identifier puts the form into edit mode with the
    /// candidate's fields as the draft. No candidate, or a candidate the
    /// server has not assigned an identifier to, resets the form to create
    /// mode with the empty template.
    pub fn switch_to(&mut self, candidate: Option<&E>) {
        match candidate.and_then(|entity| entity.id().map(|id| (id, entity))) {
            Some((id, entity)) => {
                self.draft = entity.to_draft();
                self.mode = FormMode::Edit(id.clone());
            }
            None => self.reset(),
        }
    }

    /// Replace the draft with the values the user entered. The mode is unchanged.
    pub fn edit(&mut self, draft: E::Draft) {
        self.draft = draft;
    }

    /// The request to send for the current draft, chosen by the current mode.
    pub fn submission(&self) -> Submission<E::Id, E::Draft> {
        match &self.mode {
            FormMode::Create => Submission::Create(self.draft.clone()),
            FormMode::Edit(id) => Submission::Update {
                id: id.clone(),
                draft: self.draft.clone(),
            },
        }
    }

    /// Return to create mode with the empty template.
    pub fn reset(&mut self) {
        self.draft = E::Draft::default();
        self.mode = FormMode::Create;
    }

    /// Discard the draft of an edit in progress.
    ///
    /// Returns `false` and leaves the form untouched when it is in create mode.
    pub fn cancel(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }

        self.reset();
        true
    }
}
