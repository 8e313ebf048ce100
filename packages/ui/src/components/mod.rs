//! Form building blocks shared by the auth views.

mod auth_form;
pub use auth_form::{AuthForm, AuthMode};

mod error_message;
pub use error_message::ErrorMessage;

mod radio_group;
pub use radio_group::{RadioGroup, RadioOption};

mod submit_button;
pub use submit_button::SubmitButton;

mod text_input;
pub use text_input::{InputType, TextInput};
