use anyhow::{bail, Context, Result};

use crate::{
    cli::{Cli, Command},
    domain, generation, infra,
    ui::{
        self,
        terminal::{ChatTerminal, StdTerminal},
    },
    usecases::{
        self,
        bootstrap::{self, BootstrapOptions},
        context::AppContext,
        startup,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let options = BootstrapOptions {
        config_path: cli.config.clone(),
        data_dir: cli.data_dir.clone(),
        ephemeral: cli.ephemeral,
    };
    let mut context = bootstrap::bootstrap(&options)?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        generation = generation::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let plan = startup::start(&mut context)?;
    tracing::info!(
        accounts = plan.accounts_loaded,
        lock = ?plan.lock_guard.as_ref().map(|guard| guard.path().display().to_string()),
        "startup complete"
    );

    let mut terminal = StdTerminal;
    execute(cli.command_or_default(), &mut context, &mut terminal)
}

fn execute(
    command: Command,
    context: &mut AppContext,
    terminal: &mut dyn ChatTerminal,
) -> Result<()> {
    match command {
        Command::Run => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            runtime.block_on(ui::shell::run(terminal, context))
        }
        Command::Register { login, pseudo } => {
            if !ui::shell::register_account(terminal, context, &login, &pseudo)? {
                bail!("could not register {login}");
            }
            Ok(())
        }
        Command::Discussions { login } => print_discussions(terminal, context, &login),
    }
}

fn print_discussions(
    terminal: &mut dyn ChatTerminal,
    context: &mut AppContext,
    login: &str,
) -> Result<()> {
    if !ui::shell::sign_in(terminal, context, login)? {
        bail!("could not sign in as {login}");
    }
    ui::shell::list(terminal, context)
}
