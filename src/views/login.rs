use crate::api::BankApi;
use crate::models::{Route, Toasts};
use crate::services::auth_service::{self, LOGIN_OK};
use crate::session::SessionContext;

/// Login form state
#[derive(Debug, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
}

impl LoginView {
    /// Submit the form. Returns where to navigate, if anywhere.
    ///
    /// Nothing guards against a second submit while one is in flight.
    pub async fn submit(
        &self,
        api: &dyn BankApi,
        session: &SessionContext,
        toasts: &mut Toasts,
    ) -> Option<Route> {
        match auth_service::login(api, session, &self.email, &self.password).await {
            Ok(_) => {
                toasts.success(LOGIN_OK);
                Some(Route::Dashboard)
            }
            Err(e) => {
                toasts.error(e.user_message());
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let email = if self.email.is_empty() { "<Email>" } else { self.email.as_str() };
        let password = if self.password.is_empty() {
            "<Password>".to_string()
        } else {
            "*".repeat(self.password.chars().count())
        };

        format!(
            "=== Login ===\n\
             Email:    {}\n\
             Password: {}\n\
             \n\
             [login]\n\
             Don't have an account? Register ({})",
            email,
            password,
            Route::Register
        )
    }
}
