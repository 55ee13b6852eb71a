use tracing::{info, warn};
use crate::api::BankApi;
use crate::api::bank::{ApiError, Transaction};
use crate::models::{Route, Toasts};
use crate::services::{auth_service, balance_service, transaction_service, transfer_service};
use crate::session::SessionContext;

/// Result of mounting the dashboard
pub enum Mount {
    Ready(DashboardView),
    /// No usable session; go here instead. No request was made.
    Redirect(Route),
}

/// Balance, history and the transfer form for an authenticated session
#[derive(Debug)]
pub struct DashboardView {
    token: String,
    balance: f64,
    transactions: Vec<Transaction>,
    pub to_email: String,
    pub amount: String,
}

impl DashboardView {
    /// Read the stored token and, if there is one, load balance and history
    pub async fn mount(api: &dyn BankApi, session: &SessionContext, toasts: &mut Toasts) -> Mount {
        let token = match session.token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("No session token, redirecting to {}", Route::Login);
                return Mount::Redirect(Route::Login);
            }
            Err(e) => {
                warn!("Could not read session, redirecting to {}: {}", Route::Login, e);
                return Mount::Redirect(Route::Login);
            }
        };

        let mut view = DashboardView {
            token,
            balance: 0.0,
            transactions: Vec::new(),
            to_email: String::new(),
            amount: String::new(),
        };
        view.refresh(api, toasts).await;
        Mount::Ready(view)
    }

    /// Fetch balance and history side by side
    ///
    /// Each result only ever touches its own field, so a failure or a late
    /// arrival on one side leaves the other untouched.
    pub async fn refresh(&mut self, api: &dyn BankApi, toasts: &mut Toasts) {
        let (balance, transactions) = tokio::join!(
            balance_service::get_balance(api, &self.token),
            transaction_service::get_transactions(api, &self.token),
        );

        self.apply_balance(balance, toasts);
        self.apply_transactions(transactions, toasts);
    }

    fn apply_balance(&mut self, result: Result<f64, ApiError>, toasts: &mut Toasts) {
        match result {
            Ok(balance) => self.balance = balance,
            Err(_) => toasts.error(balance_service::FETCH_FAILED),
        }
    }

    fn apply_transactions(&mut self, result: Result<Vec<Transaction>, ApiError>, toasts: &mut Toasts) {
        match result {
            Ok(transactions) => self.transactions = transactions,
            Err(_) => toasts.error(transaction_service::FETCH_FAILED),
        }
    }

    /// Send the form contents. On success the form is cleared and balance and
    /// history are fetched again; on failure the form is left as typed.
    pub async fn transfer(&mut self, api: &dyn BankApi, toasts: &mut Toasts) {
        let request = transfer_service::build_transfer(&self.to_email, &self.amount);

        match transfer_service::execute_transfer(api, &self.token, &request).await {
            Ok(()) => {
                toasts.success(transfer_service::TRANSFER_OK);
                self.to_email.clear();
                self.amount.clear();
                self.refresh(api, toasts).await;
            }
            Err(e) => toasts.error(e.user_message(transfer_service::TRANSFER_FAILED)),
        }
    }

    /// Forget the local session and head back to login
    pub fn logout(self, session: &SessionContext, toasts: &mut Toasts) -> Route {
        if let Err(e) = auth_service::logout(session) {
            warn!("Failed to clear session: {}", e);
            toasts.error(format!("Logout failed: {}", e));
        }
        Route::Login
    }

    #[cfg(test)]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    #[cfg(test)]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn render(&self) -> String {
        let to_email = if self.to_email.is_empty() { "<Receiver Email>" } else { self.to_email.as_str() };
        let amount = if self.amount.is_empty() { "<Amount>" } else { self.amount.as_str() };

        format!(
            "=== Dashboard ===                    [logout]\n\
             {}\n\
             \n\
             --- Send Money ---\n\
             Receiver Email: {}\n\
             Amount:         {}\n\
             [send]\n\
             \n\
             --- Transactions ---\n\
             {}",
            balance_service::render_balance(self.balance),
            to_email,
            amount,
            transaction_service::render_transactions(&self.transactions)
        )
    }
}
