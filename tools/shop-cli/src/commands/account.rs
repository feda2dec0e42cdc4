//! Account commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Password};
use shop_auth::{AuthError, RegisterForm};

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

fn prompt_text(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

/// `shop login`
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let email = prompt_text("Email", args.email)?;
    let password = match args.password_env {
        Some(var) => std::env::var(&var)
            .with_context(|| format!("Environment variable {} is not set", var))?,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let mut auth = ctx.auth()?;
    let spinner = ctx.output.spinner("Signing in...");
    let result = auth.login(email.trim(), &password).await;
    spinner.finish_and_clear();

    match result {
        Ok(user) => {
            if ctx.output.is_json() {
                ctx.output.json(user);
            } else {
                ctx.output
                    .success(&format!("Signed in as {}", user.display_name()));
            }
            Ok(())
        }
        Err(AuthError::LoginFailed(message)) => bail!(message),
        Err(e) => Err(e.into()),
    }
}

/// `shop register`
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let form = RegisterForm {
        first_name: prompt_text("First name", args.first_name)?,
        last_name: prompt_text("Last name", args.last_name)?,
        email: prompt_text("Email", args.email)?,
        password: Password::new().with_prompt("Password").interact()?,
        password2: Password::new().with_prompt("Confirm password").interact()?,
    };

    let mut auth = ctx.auth()?;
    let spinner = ctx.output.spinner("Creating account...");
    let result = auth.register(&form).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            ctx.output.success("Account created. Sign in with `shop login`.");
            Ok(())
        }
        Err(AuthError::InvalidForm(errors)) => {
            for error in errors.iter() {
                ctx.output.error(&error.message);
            }
            bail!("Registration form has {} problem(s)", errors.iter().count())
        }
        Err(AuthError::RegistrationFailed(message)) => bail!(message),
        Err(e) => Err(e.into()),
    }
}

/// `shop logout`
pub async fn logout(ctx: &Context) -> Result<()> {
    let mut auth = ctx.auth()?;
    auth.logout()?;
    ctx.output.success("Signed out");
    Ok(())
}

/// `shop whoami`
pub async fn whoami(ctx: &Context) -> Result<()> {
    let mut auth = ctx.auth()?;
    let user = auth.load_user().await?.cloned();

    if ctx.output.is_json() {
        ctx.output.json(&user);
        return Ok(());
    }

    match user {
        Some(user) => {
            ctx.output.header(&user.display_name());
            ctx.output.kv("email", &user.email);
            ctx.output.kv("role", user.role.as_str());
            if let Some(phone) = &user.phone {
                ctx.output.kv("phone", phone);
            }
        }
        None => ctx.output.info("Not signed in. Run `shop login`."),
    }
    Ok(())
}
