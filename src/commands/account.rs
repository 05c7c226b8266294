use anyhow::{Context, Result};
use dialoguer::Input;
use evplan_core::{Planner, Registration, Session};
use owo_colors::OwoColorize;

pub async fn register(
    planner: &Planner,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("  Username").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("  Email").interact_text()?,
    };

    let form = Registration {
        username,
        email,
        password: prompt_password("  Password: ")?,
        confirm_password: prompt_password("  Confirm password: ")?,
    };
    let user = form.validate()?;
    let username = user.username.clone();

    if !planner.auth().try_register_user(user).await? {
        anyhow::bail!("Username '{}' already exists", username);
    }

    println!("{}", format!("  Registered {}", username).green());
    println!("{}", "  Log in with `evplan login`".dimmed());

    Ok(())
}

pub async fn login(planner: &Planner, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("  Username").interact_text()?,
    };
    let password = prompt_password("  Password: ")?;

    if !planner.auth().try_login_user(&username, &password).await? {
        anyhow::bail!("Invalid credentials");
    }

    println!("{}", format!("  Logged in as {}", username).green());
    Ok(())
}

pub async fn logout(planner: &Planner) -> Result<()> {
    planner.auth().try_logout().await?;
    println!("{}", "  Logged out".dimmed());
    Ok(())
}

pub async fn whoami(planner: &Planner) -> Result<()> {
    match planner.auth().session().await {
        Session::LoggedIn(user) => println!("{} {}", user.username.bold(), user.email.dimmed()),
        Session::LoggedOut => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).context("Failed to read password")
}
