use std::sync::Arc;
use tracing::info;

use crate::api::BankApi;
use crate::models::{Route, Toasts};
use crate::session::SessionContext;
use crate::views::{DashboardView, LoginView, Mount};

/// The screen currently shown
pub enum Screen {
    Login(LoginView),
    Dashboard(DashboardView),
}

/// Everything the shell needs between two commands
pub struct App {
    pub(crate) api: Arc<dyn BankApi>,
    pub(crate) session: SessionContext,
    pub(crate) toasts: Toasts,
    pub(crate) screen: Screen,
}

impl App {
    pub fn new(api: Arc<dyn BankApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            toasts: Toasts::default(),
            screen: Screen::Login(LoginView::default()),
        }
    }

    pub fn route(&self) -> Route {
        match self.screen {
            Screen::Login(_) => Route::Login,
            Screen::Dashboard(_) => Route::Dashboard,
        }
    }

    /// Switch screens, mounting the dashboard (and following its redirect) as needed
    pub async fn navigate(&mut self, route: Route) {
        let mut next = Some(route);

        while let Some(route) = next.take() {
            info!("Navigating to {}", route);
            match route {
                Route::Login => self.screen = Screen::Login(LoginView::default()),
                Route::Dashboard => {
                    match DashboardView::mount(self.api.as_ref(), &self.session, &mut self.toasts).await {
                        Mount::Ready(view) => self.screen = Screen::Dashboard(view),
                        Mount::Redirect(target) => next = Some(target),
                    }
                }
                Route::Register => {
                    self.toasts.info("Registration is not available in this client");
                }
            }
        }
    }

    /// Current page followed by any pending notifications, which are dismissed
    pub fn render(&mut self) -> String {
        let mut output = match &self.screen {
            Screen::Login(view) => view.render(),
            Screen::Dashboard(view) => view.render(),
        };

        for notification in self.toasts.drain() {
            output.push('\n');
            output.push_str(&notification.render());
        }

        output
    }
}
