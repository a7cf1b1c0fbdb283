use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
        set,
    } = cmd
    {
        let path = Config::config_file();

        if let Some(assignment) = set {
            ConfigLogic::set(&path, assignment)?;
        }

        if *migrate {
            ConfigLogic::migrate(&path)?;
        }

        if *check {
            // re-read: --set / --migrate may have changed the file
            let current = Config::load_from(&path)?;
            ConfigLogic::check(&path, &current)?;
        }

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor.as_deref())?;
        }

        if set.is_none() && !*migrate && !*check && !*print_config && !*edit_config {
            info(format!("Configuration file: {}", path.display()));
        }
    }

    Ok(())
}
