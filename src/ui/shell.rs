//! Interactive line shell over an `AppContext`.

use anyhow::Result;

use crate::{
    ui::{
        command::{parse_command, resolve_discussion, ShellCommand},
        terminal::ChatTerminal,
        view,
    },
    usecases::{context::AppContext, conversation::ConversationError},
};

const WELCOME: &str = "chatinside. Type /help for commands.";
const SIGN_IN_FIRST: &str = "Sign in first with /login <login> or /register <login> <pseudo>.";
const OPEN_FIRST: &str = "Open a discussion first with /open <number> or /new <title>.";
const STILL_LOADING: &str = "Accounts are still loading, try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

pub async fn run(terminal: &mut dyn ChatTerminal, context: &mut AppContext) -> Result<()> {
    terminal.print_line(WELCOME)?;

    loop {
        let prompt = prompt_label(context);
        let Some(line) = terminal.prompt_line(&prompt)? else {
            break;
        };

        if handle_line(terminal, context, &line).await? == ShellFlow::Quit {
            break;
        }
    }

    terminal.print_line("Bye.")?;
    Ok(())
}

pub async fn handle_line(
    terminal: &mut dyn ChatTerminal,
    context: &mut AppContext,
    line: &str,
) -> Result<ShellFlow> {
    let command = parse_command(line);
    let allowed_while_loading = matches!(
        command,
        ShellCommand::Empty | ShellCommand::Quit | ShellCommand::Help
    );
    if !is_ready(context) && !allowed_while_loading {
        terminal.print_line(STILL_LOADING)?;
        return Ok(ShellFlow::Continue);
    }

    match command {
        ShellCommand::Empty => {}
        ShellCommand::Quit => return Ok(ShellFlow::Quit),
        ShellCommand::Help => {
            for line in view::HELP_LINES {
                terminal.print_line(line)?;
            }
        }
        ShellCommand::Register {
            identifier,
            display_name,
        } => {
            register_account(terminal, context, &identifier, &display_name)?;
        }
        ShellCommand::Login { identifier } => {
            sign_in(terminal, context, &identifier)?;
        }
        ShellCommand::Logout => {
            context.session.sign_out();
            context.conversation.close_discussion();
            terminal.print_line("Signed out.")?;
        }
        ShellCommand::WhoAmI => match context.session.current_account() {
            Some(account) => terminal.print_line(&format!(
                "{} ({})",
                account.display_name, account.identifier
            ))?,
            None => terminal.print_line("Not signed in.")?,
        },
        ShellCommand::List => list(terminal, context)?,
        ShellCommand::New { title } => create(terminal, context, &title)?,
        ShellCommand::Open { target } => open(terminal, context, &target)?,
        ShellCommand::Delete { target } => delete(terminal, context, &target)?,
        ShellCommand::Send { text } => send(terminal, context, &text).await?,
        ShellCommand::Invalid { usage } => terminal.print_line(&format!("Usage: {usage}"))?,
        ShellCommand::Unknown { name } => {
            terminal.print_line(&format!("Unknown command /{name}. Type /help."))?
        }
    }

    Ok(ShellFlow::Continue)
}

/// Prompts for a password and registers. Returns whether it succeeded.
pub fn register_account(
    terminal: &mut dyn ChatTerminal,
    context: &mut AppContext,
    identifier: &str,
    display_name: &str,
) -> Result<bool> {
    let Some(secret) = terminal.prompt_secret("Password: ")? else {
        return Ok(false);
    };

    let registered = context.session.register(
        &mut context.store,
        identifier,
        &secret,
        display_name,
    );
    if registered {
        context.conversation.close_discussion();
        terminal.print_line(&format!("Welcome, {display_name}!"))?;
    } else {
        terminal.print_line(
            "Registration failed: this login is already used or a field is empty.",
        )?;
    }

    Ok(registered)
}

/// Prompts for a password and signs in. Returns whether it succeeded.
pub fn sign_in(
    terminal: &mut dyn ChatTerminal,
    context: &mut AppContext,
    identifier: &str,
) -> Result<bool> {
    let Some(secret) = terminal.prompt_secret("Password: ")? else {
        return Ok(false);
    };

    let signed_in = context.session.login(&context.store, identifier, &secret);
    match context.session.current_account() {
        Some(account) if signed_in => {
            context.conversation.close_discussion();
            terminal.print_line(&format!("Hello, {}!", account.display_name))?;
        }
        _ => terminal.print_line("Login failed: wrong login or password.")?,
    }

    Ok(signed_in)
}

pub fn list(terminal: &mut dyn ChatTerminal, context: &AppContext) -> Result<()> {
    let Some(account) = context.session.current_account() else {
        terminal.print_line(SIGN_IN_FIRST)?;
        return Ok(());
    };

    terminal.print_lines(&view::discussion_list_lines(&account.discussions))?;
    Ok(())
}

fn create(terminal: &mut dyn ChatTerminal, context: &mut AppContext, title: &str) -> Result<()> {
    match context
        .conversation
        .create_discussion(&mut context.session, &mut context.store, title)
    {
        Ok(discussion) => terminal.print_line(&view::discussion_header(&discussion))?,
        Err(ConversationError::NotSignedIn) => terminal.print_line(SIGN_IN_FIRST)?,
        Err(ConversationError::EmptyTitle) => terminal.print_line("Usage: /new <title>")?,
        Err(error) => terminal.print_line(&format!("Could not save the discussion: {error}"))?,
    }
    Ok(())
}

fn open(terminal: &mut dyn ChatTerminal, context: &mut AppContext, target: &str) -> Result<()> {
    let Some(account) = context.session.current_account() else {
        terminal.print_line(SIGN_IN_FIRST)?;
        return Ok(());
    };
    let Some(id) = resolve_discussion(&account.discussions, target).map(|d| d.id.clone()) else {
        terminal.print_line(&format!("No discussion matches {target}."))?;
        return Ok(());
    };

    if context.conversation.open_discussion(&context.session, &id) {
        if let Some(discussion) = context.conversation.current_discussion() {
            terminal.print_line(&view::discussion_header(discussion))?;
            terminal.print_lines(&view::message_lines(&discussion.messages))?;
        }
    }
    Ok(())
}

fn delete(terminal: &mut dyn ChatTerminal, context: &mut AppContext, target: &str) -> Result<()> {
    let Some(account) = context.session.current_account() else {
        terminal.print_line(SIGN_IN_FIRST)?;
        return Ok(());
    };
    let Some((id, title)) = resolve_discussion(&account.discussions, target)
        .map(|discussion| (discussion.id.clone(), discussion.title.clone()))
    else {
        terminal.print_line(&format!("No discussion matches {target}."))?;
        return Ok(());
    };

    let answer = terminal.prompt_line(&format!("Delete {title}? [y/N] "))?;
    let confirmed = answer.as_deref().map(str::trim).is_some_and(|answer| {
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    });
    if !confirmed {
        terminal.print_line(&format!("Kept {title}."))?;
        return Ok(());
    }

    match context
        .conversation
        .delete_discussion(&mut context.session, &mut context.store, &id)
    {
        Ok(true) => terminal.print_line(&format!("Deleted {title}."))?,
        Ok(false) => terminal.print_line(&format!("No discussion matches {target}."))?,
        Err(error) => terminal.print_line(&format!("Could not delete the discussion: {error}"))?,
    }
    Ok(())
}

async fn send(terminal: &mut dyn ChatTerminal, context: &mut AppContext, text: &str) -> Result<()> {
    if !context.session.is_signed_in() {
        terminal.print_line(SIGN_IN_FIRST)?;
        return Ok(());
    }
    let Some(discussion_id) = context
        .conversation
        .current_discussion()
        .map(|discussion| discussion.id.clone())
    else {
        terminal.print_line(OPEN_FIRST)?;
        return Ok(());
    };

    let outcome = context
        .conversation
        .send_message(
            &mut context.session,
            &mut context.store,
            context.generator.as_ref(),
            &discussion_id,
            text,
        )
        .await;

    match outcome {
        Ok(Some(sent)) => {
            terminal.print_line(&view::message_line(&sent.message))?;
            terminal.print_line(&view::reply_line(&sent.reply))?;
        }
        Ok(None) => terminal.print_line("Nothing was sent.")?,
        Err(error) => terminal.print_line(&format!("Could not save your message: {error}"))?,
    }
    Ok(())
}

/// Commands wait until the store was read and the session marked ready.
fn is_ready(context: &AppContext) -> bool {
    context.store.is_loaded() && !context.session.is_loading()
}

fn prompt_label(context: &AppContext) -> String {
    match (
        context.session.current_account(),
        context.conversation.current_discussion(),
    ) {
        (Some(account), Some(discussion)) => {
            format!("{}/{}> ", account.identifier, discussion.title)
        }
        (Some(account), None) => format!("{}> ", account.identifier),
        _ => "> ".to_owned(),
    }
}
