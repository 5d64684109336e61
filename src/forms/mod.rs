//! Form state controllers
//!
//! A [`FormController`] holds at most one draft: a working copy of a record
//! being created or edited, isolated from the store's list until submitted.
//!
//! ```text
//! Closed ──open_new()──────▶ Open(new)      ┐
//! Closed ──open_existing()─▶ Open(editing)  ├─ close() / successful submit() ──▶ Closed
//!                                           ┘
//! ```
//!
//! Opening a form while another draft is open discards that draft.

mod category;
mod product;

pub use category::CategoryDraft;
pub use product::ProductDraft;

use crate::core::{Category, FormError, RecordId, TavolaError, ValidationError};
use crate::store::{CollectionStore, Editable, Record};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Product form controller
pub type ProductForm = FormController<ProductDraft>;

/// Category form controller
pub type CategoryForm = FormController<CategoryDraft>;

/// What a draft may need to know about the rest of the view
#[derive(Debug, Clone, Copy, Default)]
pub struct FormContext<'a> {
    /// Category selected in the menu view, used as a default for new products
    pub selected_category: Option<RecordId>,

    /// Categories currently known to the view
    pub categories: &'a [Category],
}

/// A working copy of an editable record
pub trait Draft: Clone + fmt::Debug + Send + 'static {
    type Record: Editable;

    /// Empty template for a new record
    fn blank(ctx: &FormContext<'_>) -> Self;

    /// Copy of an existing record
    fn from_record(record: &Self::Record) -> Self;

    /// Id of the record being edited; `None` for a new one
    fn id(&self) -> Option<RecordId>;

    /// Check the draft and build the request body
    fn payload(
        &self,
        ctx: &FormContext<'_>,
    ) -> Result<<Self::Record as Editable>::Payload, ValidationError>;
}

/// Sub-mode of an open form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Editing(RecordId),
}

#[derive(Debug)]
struct FormInner<D> {
    draft: Option<D>,
    error: Option<String>,
}

/// Controller of one form
pub struct FormController<D: Draft> {
    inner: Mutex<FormInner<D>>,
    submitting: AtomicBool,
}

/// Releases the in-flight flag, also when the submit future is dropped
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> FormController<D> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FormInner {
                draft: None,
                error: None,
            }),
            submitting: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner<D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the form on an empty template
    pub fn open_new(&self, ctx: &FormContext<'_>) {
        let mut inner = self.lock();
        inner.draft = Some(D::blank(ctx));
        inner.error = None;
    }

    /// Open the form on a copy of an existing record
    pub fn open_existing(&self, record: &D::Record) {
        let mut inner = self.lock();
        inner.draft = Some(D::from_record(record));
        inner.error = None;
    }

    /// Discard the draft and hide the form
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.draft = None;
        inner.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.lock().draft.is_some()
    }

    /// `None` when closed
    pub fn mode(&self) -> Option<FormMode> {
        self.lock()
            .draft
            .as_ref()
            .map(|draft| draft.id().map_or(FormMode::New, FormMode::Editing))
    }

    /// Copy of the current draft
    pub fn draft(&self) -> Option<D> {
        self.lock().draft.clone()
    }

    /// Modify the open draft; returns `false` if the form is closed
    ///
    /// The closure works on a copy, so it may read the form itself. The copy
    /// is written back only if the same record is still open afterwards.
    pub fn edit(&self, f: impl FnOnce(&mut D)) -> bool {
        let Some(mut edited) = self.draft() else {
            return false;
        };
        f(&mut edited);

        let mut inner = self.lock();
        match inner.draft.as_mut() {
            Some(current) if current.id() == edited.id() => {
                *current = edited;
                true
            }
            _ => false,
        }
    }

    /// Message of the last failed validation or submission
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Check the open draft without submitting it
    pub fn validate(
        &self,
        ctx: &FormContext<'_>,
    ) -> Result<<D::Record as Editable>::Payload, TavolaError> {
        let draft = self.draft().ok_or(FormError::Closed)?;
        Ok(draft.payload(ctx)?)
    }

    /// Validate the draft and send it to the store
    ///
    /// A draft with an id updates that record, one without creates a new one.
    /// On success the form closes (the store has reloaded by then), unless a
    /// different record was opened while the request was in flight; on failure
    /// it stays open with the draft untouched and the message in [`error`](Self::error).
    /// Validation failures never reach the API.
    pub async fn submit(
        &self,
        store: &CollectionStore<D::Record>,
        ctx: &FormContext<'_>,
    ) -> Result<(), TavolaError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(FormError::Busy.into());
        }
        let _guard = SubmitGuard(&self.submitting);

        let draft = self.draft().ok_or(FormError::Closed)?;
        let payload = match draft.payload(ctx) {
            Ok(payload) => payload,
            Err(err) => {
                let resource = <D::Record as Record>::RESOURCE;
                tracing::debug!(resource, error = %err, "draft rejected");
                self.lock().error = Some(err.to_string());
                return Err(err.into());
            }
        };

        let result = match draft.id() {
            Some(id) => store.update(id, &payload).await,
            None => store.create(&payload).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                // Another record may have been opened meanwhile
                let mut inner = self.lock();
                if inner.draft.as_ref().is_some_and(|open| open.id() == draft.id()) {
                    inner.draft = None;
                    inner.error = None;
                }
                Ok(())
            }
            Err(err) => {
                self.lock().error = Some(format!("Error: {}", err));
                Err(err.into())
            }
        }
    }
}
