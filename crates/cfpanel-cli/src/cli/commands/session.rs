//! `cfpanel login`, `logout` and `passwd` - Session management.

use anyhow::Result;
use cfpanel::Outcome;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{save_session, Context};
use crate::cli::args::{LoginArgs, PasswdArgs};
use crate::config::{Config, Session};
use crate::output::{render_reply, spinner};

pub async fn login(ctx: Context, args: LoginArgs) -> Result<()> {
    let username = match args.username.or_else(|| ctx.username.clone()) {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let (client, dashboard) = ctx.dashboard()?;
    let bar = spinner(ctx.output_format, "logging in...");
    let reply = dashboard.login(&username, &password).await;
    bar.finish_and_clear();
    let reply = reply?;

    if !ctx.is_pretty() {
        println!("{}", render_reply(ctx.output_format, reply.raw())?);
    }
    if !reply.ok {
        anyhow::bail!("Login failed: {}", reply.failure_text());
    }

    save_session(&client)?;
    let mut config = Config::load()?;
    config.username = Some(username.clone());
    config.save()?;

    if ctx.is_pretty() {
        println!("{} Logged in as {}.", "Success:".green().bold(), username.cyan());
    }
    Ok(())
}

pub async fn logout(ctx: Context) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;
    dashboard.logout().await?;

    if dashboard.view().await.location.is_none() {
        anyhow::bail!("Logout was refused by the backend");
    }

    Session::clear()?;
    if ctx.is_pretty() {
        println!("{} Logged out.", "Success:".green().bold());
    }
    Ok(())
}

pub async fn passwd(ctx: Context, args: PasswdArgs) -> Result<()> {
    let old = match args.old {
        Some(old) => old,
        None => Password::new().with_prompt("Current password").interact()?,
    };
    let new = match args.new {
        Some(new) => new,
        None => Password::new()
            .with_prompt("New password")
            .with_confirmation("Repeat new password", "Passwords do not match")
            .interact()?,
    };

    let (_, dashboard) = ctx.dashboard()?;
    dashboard.open_password_dialog().await;
    dashboard
        .update_forms(move |forms| {
            forms.old_password = old;
            forms.new_password = new;
        })
        .await;

    let bar = spinner(ctx.output_format, "saving...");
    let outcome = dashboard.change_password().await;
    bar.finish_and_clear();
    let outcome = outcome?;

    println!("{}", dashboard.view().await.outputs.password);
    let changed = matches!(outcome, Outcome::Scheduled(_));
    outcome.settle().await;
    if !changed {
        anyhow::bail!("Password not changed");
    }

    if ctx.is_pretty() {
        println!("{} Password changed.", "Success:".green().bold());
    }
    Ok(())
}
