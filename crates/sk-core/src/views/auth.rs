//! Log-in and sign-up pages.
//!
//! Passwords are validated and dropped; the sign-up page keeps only the
//! policy report so the checklist can be redrawn.

use crate::error::ValidationError;
use crate::forms::{LoginForm, SignUpForm};
use crate::models::SocialProvider;
use crate::password::PasswordReport;
use crate::traits::Toaster;

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    email: String,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn submit(&mut self, form: LoginForm, toasts: &mut impl Toaster) -> Result<(), ValidationError> {
        self.email = form.email.clone();
        if let Err(err) = form.validate() {
            let (title, description) = err.toast();
            toasts.destructive(title, &description);
            return Err(err);
        }
        toasts.success("Login successful!", "Welcome back to StackIt.");
        Ok(())
    }

    pub fn social(&self, provider: SocialProvider, toasts: &mut impl Toaster) {
        social_toast(provider, "login", toasts);
    }
}

#[derive(Debug, Clone)]
pub struct SignUpView {
    username: String,
    email: String,
    accept_terms: bool,
    password_report: PasswordReport,
    /// `None` until a confirmation has been submitted.
    passwords_match: Option<bool>,
}

impl Default for SignUpView {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            accept_terms: false,
            password_report: PasswordReport::check(""),
            passwords_match: None,
        }
    }
}

impl SignUpView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn accept_terms(&self) -> bool {
        self.accept_terms
    }

    pub fn password_report(&self) -> &PasswordReport {
        &self.password_report
    }

    pub fn passwords_match(&self) -> Option<bool> {
        self.passwords_match
    }

    pub fn submit(&mut self, form: SignUpForm, toasts: &mut impl Toaster) -> Result<(), ValidationError> {
        self.username = form.username.clone();
        self.email = form.email.clone();
        self.accept_terms = form.terms_accepted();
        self.password_report = form.password_report();
        self.passwords_match = (!form.confirm_password.is_empty()).then(|| form.passwords_match());

        if let Err(err) = form.validate() {
            let (title, description) = err.toast();
            toasts.destructive(title, &description);
            return Err(err);
        }
        toasts.success(
            "Account created successfully!",
            "Welcome to StackIt. Please verify your email.",
        );
        Ok(())
    }

    pub fn social(&self, provider: SocialProvider, toasts: &mut impl Toaster) {
        social_toast(provider, "sign up", toasts);
    }
}

fn social_toast(provider: SocialProvider, flow: &str, toasts: &mut impl Toaster) {
    let name = provider.name();
    toasts.success(
        &format!("{name} {flow}"),
        &format!("Redirecting to {name} authentication..."),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::PasswordRequirement;
    use crate::toast::{ToastQueue, ToastVariant};

    #[test]
    fn sign_up_keeps_report_not_password() {
        let mut view = SignUpView::new();
        let mut toasts = ToastQueue::new();
        let form = SignUpForm {
            username: "newdev".into(),
            email: "new@example.com".into(),
            password: "weak".into(),
            confirm_password: "weak".into(),
            accept_terms: None,
        };

        let err = view.submit(form, &mut toasts).unwrap_err();
        assert!(matches!(err, ValidationError::PasswordPolicyViolation(_)));
        assert_eq!(view.username(), "newdev");
        assert_eq!(view.passwords_match(), Some(true));
        assert!(!view.password_report().is_valid());
        assert!(view
            .password_report()
            .checks()
            .contains(&(PasswordRequirement::Lowercase, true)));

        let toast = toasts.drain().remove(0);
        assert_eq!(toast.title, "Password requirements not met");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }

    #[test]
    fn successful_sign_up_toasts_welcome() {
        let mut view = SignUpView::new();
        let mut toasts = ToastQueue::new();
        let form = SignUpForm {
            username: "newdev".into(),
            email: "new@example.com".into(),
            password: "Str0ng!Pass".into(),
            confirm_password: "Str0ng!Pass".into(),
            accept_terms: Some("on".into()),
        };
        view.submit(form, &mut toasts).unwrap();
        assert_eq!(toasts.drain()[0].title, "Account created successfully!");
    }

    #[test]
    fn login_and_social_toasts() {
        let mut view = LoginView::new();
        let mut toasts = ToastQueue::new();
        let form = LoginForm { email: "dev@example.com".into(), password: "secret".into() };
        view.submit(form, &mut toasts).unwrap();
        view.social(SocialProvider::GitHub, &mut toasts);

        let drained = toasts.drain();
        assert_eq!(drained[0].title, "Login successful!");
        assert_eq!(drained[1].title, "GitHub login");
        assert_eq!(drained[1].description, "Redirecting to GitHub authentication...");
        assert_eq!(view.email(), "dev@example.com");
    }
}
