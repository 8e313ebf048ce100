//! Submit handling shared by the auth views.
//!
//! A [`FormController`] bundles the form state, the mounted input nodes and the
//! toast queue. [`FormController::submit`] runs the schema and, when it
//! rejects, raises one toast and focuses the first invalid input. What to do
//! with a valid payload is up to the view.

use std::collections::BTreeMap;
use std::rc::Rc;

use dioxus::prelude::*;
use forms::{FormModel, FormState, Schema, SubmitOutcome};
use store::ClientConfig;

use super::SUBMISSION_FAILED;
use crate::toast::{toast_error, use_toasts, ToastQueue};

pub struct FormController<M: FormModel + 'static, S: 'static> {
    form: Signal<FormState<M, S>>,
    nodes: Signal<BTreeMap<M::Field, Rc<MountedData>>>,
    toasts: Signal<ToastQueue>,
}

impl<M: FormModel + 'static, S: 'static> Clone for FormController<M, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: FormModel + 'static, S: 'static> Copy for FormController<M, S> {}

impl<M: FormModel + 'static, S: 'static> PartialEq for FormController<M, S> {
    fn eq(&self, other: &Self) -> bool {
        self.form == other.form && self.nodes == other.nodes && self.toasts == other.toasts
    }
}

/// Create a controller for `schema`. The re-validate mode comes from the
/// [`ClientConfig`] context when there is one.
pub fn use_form_controller<M, S>(schema: impl FnOnce() -> S) -> FormController<M, S>
where
    M: FormModel + 'static,
    S: Schema<M> + 'static,
{
    let revalidate = try_use_context::<ClientConfig>()
        .map(|config| config.forms.revalidate)
        .unwrap_or_default();
    let form = use_signal(|| FormState::with_mode(schema(), revalidate));
    let nodes = use_signal(BTreeMap::new);
    let toasts = use_toasts();

    FormController {
        form,
        nodes,
        toasts,
    }
}

impl<M: FormModel + 'static, S: 'static> FormController<M, S> {
    pub fn form(&self) -> Signal<FormState<M, S>> {
        self.form
    }

    /// Remember the node of `field` so a rejected submit can focus it.
    pub fn register(&self, field: M::Field, node: Rc<MountedData>) {
        let mut nodes = self.nodes;
        nodes.write().insert(field, node);
    }

    fn node(&self, field: M::Field) -> Option<Rc<MountedData>> {
        self.nodes.read().get(&field).cloned()
    }
}

impl<M: FormModel + 'static, S: Schema<M> + 'static> FormController<M, S> {
    pub fn set_value(&self, field: M::Field, value: String) {
        let mut form = self.form;
        form.write().set_value(field, value);
    }

    pub fn submit(&self) -> SubmitOutcome<S::Output, M::Field> {
        let mut form = self.form;
        let outcome = form.write().handle_submit();
        if let SubmitOutcome::Invalid { first_invalid } = &outcome {
            let mut toasts = self.toasts;
            toast_error(&mut toasts, SUBMISSION_FAILED);
            match first_invalid.and_then(|field| self.node(field)) {
                Some(node) => focus_node(node),
                None => tracing::debug!(field = ?first_invalid, "No mounted node to focus"),
            }
        }
        outcome
    }
}

fn focus_node(node: Rc<MountedData>) {
    spawn(async move {
        if let Err(e) = node.set_focus(true).await {
            tracing::warn!("Failed to focus field: {:?}", e);
        }
    });
}
