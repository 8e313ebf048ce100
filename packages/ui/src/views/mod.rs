mod controller;
pub use controller::{use_form_controller, FormController};

mod login;
pub use login::{LoginFields, LoginView};

mod signup;
pub use signup::{SignupFields, SignupView};

/// Toast raised once per rejected submit.
pub const SUBMISSION_FAILED: &str = "Whoops! There was an error with your submission.";
