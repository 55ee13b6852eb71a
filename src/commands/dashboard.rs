use crate::app::{App, Screen};
use crate::models::Route;
use crate::views::LoginView;

pub const HELP: &str = "Dashboard commands:\n\
    `to <email>`          set the receiver email\n\
    `amount <value>`      set the amount\n\
    `send`                submit the transfer\n\
    `reload`              reload balance and transactions\n\
    `logout`              forget the session\n\
    `quit`                leave";

pub async fn execute(app: &mut App, command: &str, value: &str) -> Result<(), String> {
    if command == "logout" {
        let screen = std::mem::replace(&mut app.screen, Screen::Login(LoginView::default()));
        let route = match screen {
            Screen::Dashboard(view) => view.logout(&app.session, &mut app.toasts),
            Screen::Login(_) => Route::Login,
        };
        app.navigate(route).await;
        return Ok(());
    }

    let Screen::Dashboard(view) = &mut app.screen else {
        return Err("Not on the dashboard".to_string());
    };

    match command {
        "to" => view.to_email = value.to_string(),
        "amount" => view.amount = value.to_string(),
        "send" => view.transfer(app.api.as_ref(), &mut app.toasts).await,
        "reload" => app.navigate(Route::Dashboard).await,
        _ => return Err(format!("Unknown command `{}`. Type `help` for a list.", command)),
    }

    Ok(())
}
