//! # Form controller
//!
//! [`FormState`] holds the raw values of a form together with the outcome of
//! the last validation pass. It mirrors how the auth views use a form:
//!
//! - every keystroke goes through [`FormState::set_value`];
//! - a submit goes through [`FormState::handle_submit`], which runs the schema
//!   once and either hands back the typed payload or the first invalid field;
//! - after the first submit, changes re-run the schema when the
//!   [`ReValidateMode`] is [`ReValidateMode::OnChange`], so messages clear as
//!   soon as the user fixes a field.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldErrors, Schema};

/// When errors are recomputed once the form has been submitted at least once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReValidateMode {
    #[default]
    OnChange,
    OnSubmit,
}

/// The raw, string-valued side of a form.
pub trait FormModel: Clone + Default {
    /// Field identifier. `Ord` must follow declaration order.
    type Field: Copy + Ord + Debug + 'static;

    /// Every field, in declaration order.
    const FIELDS: &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn set_value(&mut self, field: Self::Field, value: String);
}

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome<T, F> {
    /// Every field passed; the schema's typed output.
    Valid(T),
    /// The schema rejected the values. `first_invalid` is the first field in
    /// declaration order carrying a message, if the schema named one.
    Invalid { first_invalid: Option<F> },
}

/// Values, submission count and errors of one mounted form.
#[derive(Clone, Debug)]
pub struct FormState<M: FormModel, S> {
    values: M,
    errors: FieldErrors<M::Field>,
    submit_count: u32,
    mode: ReValidateMode,
    schema: S,
}

impl<M: FormModel, S> FormState<M, S> {
    pub fn values(&self) -> &M {
        &self.values
    }

    pub fn value(&self, field: M::Field) -> &str {
        self.values.value(field)
    }

    pub fn errors(&self) -> &FieldErrors<M::Field> {
        &self.errors
    }

    pub fn error(&self, field: M::Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn has_error(&self, field: M::Field) -> bool {
        self.errors.contains(field)
    }

    /// True once the user has attempted a submit, whatever its outcome.
    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn mode(&self) -> ReValidateMode {
        self.mode
    }

    /// Back to empty defaults, as if freshly mounted.
    pub fn reset(&mut self) {
        self.values = M::default();
        self.errors = FieldErrors::new();
        self.submit_count = 0;
    }
}

impl<M: FormModel, S: Schema<M>> FormState<M, S> {
    pub fn new(schema: S) -> Self {
        Self::with_mode(schema, ReValidateMode::default())
    }

    pub fn with_mode(schema: S, mode: ReValidateMode) -> Self {
        Self {
            values: M::default(),
            errors: FieldErrors::new(),
            submit_count: 0,
            mode,
            schema,
        }
    }

    pub fn set_value(&mut self, field: M::Field, value: impl Into<String>) {
        self.values.set_value(field, value.into());
        if self.is_submitted() && self.mode == ReValidateMode::OnChange {
            self.errors = self.validate().err().unwrap_or_default();
        }
    }

    /// Run the schema once for a submit attempt.
    pub fn handle_submit(&mut self) -> SubmitOutcome<S::Output, M::Field> {
        self.submit_count = self.submit_count.saturating_add(1);
        match self.validate() {
            Ok(output) => {
                self.errors = FieldErrors::new();
                SubmitOutcome::Valid(output)
            }
            Err(errors) => {
                let first_invalid = errors.first();
                self.errors = errors;
                SubmitOutcome::Invalid { first_invalid }
            }
        }
    }

    fn validate(&self) -> Result<S::Output, FieldErrors<M::Field>> {
        self.schema.validate(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum NoteField {
        Title,
        Body,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct NoteValues {
        title: String,
        body: String,
    }

    impl FormModel for NoteValues {
        type Field = NoteField;
        const FIELDS: &'static [NoteField] = &[NoteField::Title, NoteField::Body];

        fn value(&self, field: NoteField) -> &str {
            match field {
                NoteField::Title => &self.title,
                NoteField::Body => &self.body,
            }
        }

        fn set_value(&mut self, field: NoteField, value: String) {
            match field {
                NoteField::Title => self.title = value,
                NoteField::Body => self.body = value,
            }
        }
    }

    #[derive(Clone, Debug)]
    struct NonEmpty;

    impl Schema<NoteValues> for NonEmpty {
        type Output = (String, String);

        fn validate(&self, values: &NoteValues) -> Result<Self::Output, FieldErrors<NoteField>> {
            let mut errors = FieldErrors::new();
            for field in NoteValues::FIELDS {
                if values.value(*field).is_empty() {
                    errors.insert(*field, format!("{field:?} is required."));
                }
            }
            if errors.is_empty() {
                Ok((values.title.clone(), values.body.clone()))
            } else {
                Err(errors)
            }
        }
    }

    #[test]
    fn test_new_form_is_pristine() {
        let form = FormState::<NoteValues, _>::new(NonEmpty);
        assert!(!form.is_submitted());
        assert!(form.errors().is_empty());
        assert_eq!(form.value(NoteField::Title), "");
        assert_eq!(form.mode(), ReValidateMode::OnChange);
    }

    #[test]
    fn test_changes_before_submit_do_not_validate() {
        let mut form = FormState::<NoteValues, _>::new(NonEmpty);
        form.set_value(NoteField::Title, "hello");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_submit_reports_first_invalid_field() {
        let mut form = FormState::<NoteValues, _>::new(NonEmpty);
        form.set_value(NoteField::Title, "hello");

        let outcome = form.handle_submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid {
                first_invalid: Some(NoteField::Body)
            }
        );
        assert!(form.is_submitted());
        assert_eq!(form.error(NoteField::Body), Some("Body is required."));
        assert!(!form.has_error(NoteField::Title));
    }

    #[test]
    fn test_submit_valid_clears_errors() {
        let mut form = FormState::<NoteValues, _>::with_mode(NonEmpty, ReValidateMode::OnSubmit);
        form.handle_submit();
        assert_eq!(form.errors().len(), 2);

        form.set_value(NoteField::Title, "t");
        form.set_value(NoteField::Body, "b");
        // on_submit mode keeps stale errors until the next submit
        assert_eq!(form.errors().len(), 2);

        let outcome = form.handle_submit();
        assert_eq!(outcome, SubmitOutcome::Valid(("t".to_string(), "b".to_string())));
        assert!(form.errors().is_empty());
        assert_eq!(form.submit_count(), 2);
    }

    #[test]
    fn test_on_change_revalidates_after_submit() {
        let mut form = FormState::<NoteValues, _>::new(NonEmpty);
        form.handle_submit();
        assert_eq!(form.errors().len(), 2);

        form.set_value(NoteField::Title, "t");
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().first(), Some(NoteField::Body));

        form.set_value(NoteField::Body, "b");
        assert!(form.errors().is_empty());
        // revalidation never counts as a submit
        assert_eq!(form.submit_count(), 1);
    }

    #[test]
    fn test_submit_count_saturates() {
        let mut form = FormState::<NoteValues, _>::new(NonEmpty);
        form.submit_count = u32::MAX;

        form.handle_submit();
        assert_eq!(form.submit_count(), u32::MAX);
        assert!(form.is_submitted());
    }

    #[test]
    fn test_reset() {
        let mut form = FormState::<NoteValues, _>::new(NonEmpty);
        form.set_value(NoteField::Body, "b");
        form.handle_submit();
        form.reset();

        assert!(!form.is_submitted());
        assert!(form.errors().is_empty());
        assert_eq!(form.values(), &NoteValues::default());
    }
}
