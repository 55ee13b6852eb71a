pub mod dashboard;
pub mod login;

use tracing::debug;
use crate::app::App;
use crate::models::Route;

/// Whether the shell keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line and run it against the current screen
///
/// Everything after the first space is the value, kept as typed so that
/// passwords and emails reach the API unchanged.
pub async fn handle_line(app: &mut App, line: &str) -> Flow {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    let (command, value) = match line.split_once(' ') {
        Some((command, value)) => (command, value),
        None => (line.trim_end(), ""),
    };
    let command = command.to_lowercase();

    let result = match command.as_str() {
        "quit" | "exit" => return Flow::Quit,
        "help" => {
            let help = help_text(app.route());
            app.toasts.info(help);
            Ok(())
        }
        _ => match app.route() {
            Route::Dashboard => dashboard::execute(app, &command, value).await,
            _ => login::execute(app, &command, value).await,
        },
    };

    if let Err(e) = result {
        debug!("Command `{}` failed: {}", command, e);
        app.toasts.error(e);
    }

    Flow::Continue
}

pub fn help_text(route: Route) -> &'static str {
    match route {
        Route::Dashboard => dashboard::HELP,
        _ => login::HELP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::bank::{ApiError, BalanceResponse};
    use crate::api::mock::{Call, MockBank};
    use crate::models::notification::Level;
    use crate::session::{MemorySessionStore, SessionContext, SessionStore, TOKEN_KEY};
    use std::sync::Arc;

    fn app_with(api: Arc<MockBank>) -> (Arc<MemorySessionStore>, App) {
        let store = Arc::new(MemorySessionStore::default());
        let app = App::new(api, SessionContext::new(store.clone()));
        (store, app)
    }

    async fn run(app: &mut App, lines: &[&str]) {
        for line in lines {
            assert_eq!(handle_line(app, line).await, Flow::Continue);
        }
    }

    #[tokio::test]
    async fn test_start_on_dashboard_without_token_lands_on_login() {
        let api = Arc::new(MockBank::new());
        let (_, mut app) = app_with(api.clone());

        app.navigate(Route::Dashboard).await;

        assert_eq!(app.route(), Route::Login);
        assert!(api.calls().is_empty());
        assert!(app.render().starts_with("=== Login ==="));
    }

    #[tokio::test]
    async fn test_login_then_transfer_then_logout() {
        let api = Arc::new(MockBank::new().with_balance(Ok(BalanceResponse { balance: 10.0 })));
        let (store, mut app) = app_with(api.clone());

        run(&mut app, &["email alice@example.com", "password two words", "login"]).await;
        assert_eq!(app.route(), Route::Dashboard);
        assert!(matches!(
            api.calls().first(),
            Some(Call::Login { email, password })
                if email == "alice@example.com" && password == "two words"
        ));
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("token-1"));

        run(&mut app, &["to bob@example.com", "amount 2.5", "send"]).await;
        assert_eq!(api.transfer_calls(), 1);
        assert_eq!(api.balance_calls(), 2);

        run(&mut app, &["logout"]).await;
        assert_eq!(app.route(), Route::Login);
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_login() {
        let api = Arc::new(
            MockBank::new().with_login(Err(ApiError::from_status(401, r#"{"error":"Bad password"}"#))),
        );
        let (_, mut app) = app_with(api);

        run(&mut app, &["email a@b.c", "password x", "login"]).await;

        assert_eq!(app.route(), Route::Login);
        assert_eq!(app.toasts.messages(Level::Error), vec!["Bad password"]);
        let page = app.render();
        assert!(page.contains("a@b.c"));
        assert!(page.contains("❌ Bad password"));
    }

    #[tokio::test]
    async fn test_unknown_command_is_reported() {
        let (_, mut app) = app_with(Arc::new(MockBank::new()));

        run(&mut app, &["dance"]).await;

        assert_eq!(app.toasts.messages(Level::Error).len(), 1);
        assert!(app.toasts.messages(Level::Error)[0].contains("dance"));
    }

    #[tokio::test]
    async fn test_register_is_not_implemented() {
        let (_, mut app) = app_with(Arc::new(MockBank::new()));

        run(&mut app, &["register"]).await;

        assert_eq!(app.route(), Route::Login);
        assert_eq!(app.toasts.messages(Level::Info).len(), 1);
    }

    #[tokio::test]
    async fn test_quit_and_blank_lines() {
        let (_, mut app) = app_with(Arc::new(MockBank::new()));

        assert_eq!(handle_line(&mut app, "   ").await, Flow::Continue);
        assert_eq!(handle_line(&mut app, "QUIT").await, Flow::Quit);
    }
}
