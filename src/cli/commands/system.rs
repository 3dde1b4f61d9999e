use super::category::parse_flag;
use super::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::{help, io as cli_io};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "config",
            "Show or change display settings",
            "config [plain|screen-reader on|off]",
            cmd_config,
        ),
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build information", "version", cmd_version),
        CommandDefinition::new("exit", "Leave the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (setting, value) = match args {
        [] => {
            show_config(context);
            return Ok(());
        }
        [setting, value] => (setting.to_ascii_lowercase(), parse_flag(value)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: config [plain|screen-reader on|off]".into(),
            ))
        }
    };

    let mut updated = context.config.clone();
    match setting.as_str() {
        "plain" => updated.plain_mode = value,
        "screen-reader" => updated.screen_reader_mode = value,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{}` (expected plain or screen-reader)",
                other
            )))
        }
    }
    context.config_manager.save(&updated)?;
    output::set_preferences(OutputPreferences::from(&updated));
    tracing::info!(setting = %setting, value, "display setting saved");
    context.config = updated;
    cli_io::print_info(format!("{} set to {}.", setting, if value { "on" } else { "off" }));
    Ok(())
}

fn show_config(context: &ShellContext) {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let rows = [
        ("config file", context.config_manager.path().display().to_string()),
        (
            "category store",
            context
                .config_manager
                .store_path(&context.config)
                .display()
                .to_string(),
        ),
        ("plain", on_off(context.config.plain_mode).to_string()),
        ("screen-reader", on_off(context.config.screen_reader_mode).to_string()),
    ];
    output::section("Configuration");
    for (label, value) in rows {
        cli_io::print_info(format!("  {:<15} {}", label, value));
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => help::print_overview(&context.registry),
        Some(name) => match context.registry.get(name) {
            Some(entry) => help::print_command(entry),
            None => {
                return Err(CommandError::InvalidArguments(format!(
                    "no help available for `{}`",
                    name
                )))
            }
        },
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    cli_io::print_info(build_info::current().summary());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
