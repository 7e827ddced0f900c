//! Account commands: register, login, logout.

use dialoguer::{Confirm, Input, Password};

use nimbus_client::register::{RegistrationForm, validate_registration};
use nimbus_core::error::AppError;

use super::ClientContext;
use crate::output::print_success;

/// Interactive registration.
pub async fn register(ctx: &ClientContext) -> Result<(), AppError> {
    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_error)?;
    let email: String = Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(prompt_error)?;
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)?;
    let confirm_password = Password::new()
        .with_prompt("Confirm password")
        .interact()
        .map_err(prompt_error)?;
    let agree_to_terms = Confirm::new()
        .with_prompt("Do you agree to the Terms of Service and Privacy Policy?")
        .default(false)
        .interact()
        .map_err(prompt_error)?;

    let form = RegistrationForm {
        username,
        email,
        password,
        confirm_password,
        agree_to_terms,
    };

    // Checked locally before anything goes over the wire.
    validate_registration(&form)?;

    ctx.api()
        .register(&form.username, &form.email, &form.password)
        .await?;

    print_success("Registration successful! Please login to continue.");
    Ok(())
}

/// Log in and persist the bearer token.
pub async fn login(ctx: &mut ClientContext, email: Option<&str>) -> Result<(), AppError> {
    let email = match email {
        Some(email) => email.to_string(),
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(prompt_error)?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)?;

    let token = ctx.api().login(&email, &password).await?;

    ctx.state.token = Some(token);
    ctx.state.save(&ctx.state_path)?;

    print_success("Logged in.");
    Ok(())
}

/// Clear the stored token.
pub fn logout(ctx: &mut ClientContext) -> Result<(), AppError> {
    ctx.state.token = None;
    ctx.state.save(&ctx.state_path)?;
    print_success("Logged out.");
    Ok(())
}

pub(super) fn prompt_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Prompt failed: {e}"))
}
