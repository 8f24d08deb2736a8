//! 账户命令：login / register / logout / whoami

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::flows::{AuthFlow, ProfileOutcome};
use crate::interfaces::cli::{CliContext, CliError};
use crate::interfaces::render::render_redirect;
use crate::models::User;

/// 交互式读取一行（非 TTY 时直接读 stdin）
fn prompt_line(label: &str) -> Result<String, CliError> {
    print!("{}", label);
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::CommandError(format!("Failed to read from stdin: {}", e)))?;
    Ok(line.trim().to_string())
}

/// 密码：命令行参数优先，否则在 TTY 上隐藏输入
fn get_password(password: Option<String>) -> Result<String, CliError> {
    if let Some(pwd) = password {
        return Ok(pwd);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::ParseError(
            "No password provided. Use --password or run interactively.".to_string(),
        ));
    }
    rpassword::prompt_password("Password: ")
        .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))
}

fn print_user(prefix: &str, user: &User) {
    println!(
        "{} {} {} <{}>",
        "✓".bold().green(),
        prefix,
        user.username.cyan(),
        user.email.blue()
    );
}

pub async fn run_login(
    ctx: &CliContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = get_password(password)?;

    let user = AuthFlow::new(ctx.api.clone())
        .login(&email, &password)
        .await?;
    print_user("Logged in as", &user);
    Ok(())
}

pub async fn run_register(
    ctx: &CliContext,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = get_password(password)?;

    let user = AuthFlow::new(ctx.api.clone())
        .register(&username, &email, &password)
        .await?;
    print_user("Registered", &user);
    Ok(())
}

pub fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    let was_signed_in = ctx.api.session().is_signed_in();
    let route = AuthFlow::new(ctx.api.clone()).logout();
    if was_signed_in {
        println!("{} Logged out ({})", "✓".bold().green(), route);
    } else {
        println!("{} Not logged in", "ℹ".bold().blue());
    }
    Ok(())
}

pub async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    match AuthFlow::new(ctx.api.clone()).profile().await? {
        ProfileOutcome::Found(user) => {
            print_user("Logged in as", &user);
            if let Some(created_at) = user.created_at {
                println!(
                    "  {} {}",
                    "Member since".dimmed(),
                    created_at.format("%Y-%m-%d")
                );
            }
            Ok(())
        }
        ProfileOutcome::Redirect(route) => {
            eprintln!("{}", render_redirect(&route));
            Err(CliError::SessionRequired(route))
        }
    }
}
