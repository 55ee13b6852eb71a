use crate::app::{App, Screen};
use crate::models::Route;

pub const HELP: &str = "Login commands:\n\
    `email <address>`     set the email field\n\
    `password <secret>`   set the password field\n\
    `login`               submit the form\n\
    `register`            open the registration page\n\
    `quit`                leave";

pub async fn execute(app: &mut App, command: &str, value: &str) -> Result<(), String> {
    let Screen::Login(view) = &mut app.screen else {
        return Err("Not on the login page".to_string());
    };

    match command {
        "email" => view.email = value.to_string(),
        "password" => view.password = value.to_string(),
        "login" => {
            let next = view.submit(app.api.as_ref(), &app.session, &mut app.toasts).await;
            if let Some(route) = next {
                app.navigate(route).await;
            }
        }
        "register" => app.navigate(Route::Register).await,
        _ => return Err(format!("Unknown command `{}`. Type `help` for a list.", command)),
    }

    Ok(())
}
