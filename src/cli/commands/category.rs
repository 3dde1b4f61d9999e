use uuid::Uuid;

use super::CommandDefinition;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io::{self as cli_io, DialoguerConfirmer};
use crate::cli::output::{self, current_preferences, paint_badge};
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::domain::category::{is_hex_color, CategoryKind};
use crate::domain::Displayable;
use crate::notify::AssumeYes;
use crate::views::{
    CategoryCard, CategoryFormModal, DeleteOutcome, FieldUpdate, ListRender,
    SubmitOutcome,
};

const FORM_OPEN: &str = "A category form is open. Use `save` or `cancel` first.";
const FORM_KEPT: &str = "The form is still open: adjust it with `set`, then `save` or `cancel`.";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("list", "Show all categories", "list", cmd_list)
            .with_aliases(&["ls"]),
        CommandDefinition::new("retry", "Reload categories from the store", "retry", cmd_retry),
        CommandDefinition::new(
            "add",
            "Create a category",
            "add [name] [type=expense|income] [color=#rrggbb] [default=true|false]",
            cmd_add,
        )
        .with_aliases(&["new"]),
        CommandDefinition::new(
            "edit",
            "Edit a category by list number",
            "edit <n> [name=...] [type=...] [color=...] [default=...]",
            cmd_edit,
        ),
        CommandDefinition::new(
            "delete",
            "Delete a category by list number",
            "delete <n>",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandDefinition::new(
            "set",
            "Change a field on the open form",
            "set <name|type|color|default> <value>",
            cmd_set,
        ),
        CommandDefinition::new("save", "Submit the open form", "save", cmd_save),
        CommandDefinition::new("cancel", "Close the open form without saving", "cancel", cmd_cancel),
        CommandDefinition::new("form", "Show the open form", "form", cmd_form),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render_list(context);
    Ok(())
}

fn cmd_retry(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    ensure_no_form(context)?;
    context.view.retry();
    render_list(context);
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_no_form(context)?;
    let updates = parse_add_args(args)?;
    context.view.open_create();
    fill_and_submit(context, updates)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_no_form(context)?;
    let (index, rest) = args
        .split_first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: edit <n> [field=value...]".into()))?;
    let id = resolve_index(context, index)?;
    let updates = rest
        .iter()
        .map(|token| parse_assignment(token))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(category) = context.view.category(id) {
        cli_io::print_info(format!("Editing {}", category.display_label()));
    }
    context.view.open_edit_by_id(id);
    fill_and_submit(context, updates)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_no_form(context)?;
    let index = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete <n>".into()))?;
    let id = resolve_index(context, index)?;

    let outcome = match context.mode {
        CliMode::Interactive => context
            .view
            .delete(id, &DialoguerConfirmer::new(&context.theme)),
        CliMode::Script => context.view.delete(id, &AssumeYes),
    };

    match outcome {
        DeleteOutcome::Deleted => render_list(context),
        DeleteOutcome::Blocked => cli_io::print_warning("Default categories cannot be deleted."),
        DeleteOutcome::Cancelled => cli_io::print_info("Delete cancelled."),
        DeleteOutcome::NotFound => {
            return Err(CommandError::InvalidArguments(format!(
                "no category numbered {}",
                index
            )))
        }
        DeleteOutcome::Failed => {}
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (field, value) = match args {
        [field, rest @ ..] => (*field, rest.join(" ")),
        [] => {
            return Err(CommandError::InvalidArguments(
                "usage: set <name|type|color|default> <value>".into(),
            ))
        }
    };
    let update = field_update(field, &value)?;
    apply_update(context, update)?;
    show_form(context);
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    submit(context)
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.view.modal().is_none() {
        cli_io::print_info("No form is open.");
        return Ok(());
    }
    if !context.view.cancel_modal() {
        cli_io::print_warning("A save is in progress.");
    }
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.view.modal().is_none() {
        cli_io::print_info("No form is open.");
    } else {
        show_form(context);
    }
    Ok(())
}

fn ensure_no_form(context: &ShellContext) -> CommandResult {
    if context.view.is_modal_open() {
        return Err(CommandError::InvalidArguments(FORM_OPEN.into()));
    }
    Ok(())
}

/// Maps a 1-based list number to the category id.
fn resolve_index(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let number: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments("category number must be numeric".into()))?;
    number
        .checked_sub(1)
        .and_then(|index| context.view.categories().get(index))
        .map(|category| category.id)
        .ok_or_else(|| CommandError::InvalidArguments(format!("no category numbered {}", number)))
}

fn parse_add_args(args: &[&str]) -> Result<Vec<FieldUpdate>, CommandError> {
    let mut updates = Vec::new();
    for (position, token) in args.iter().enumerate() {
        if position == 0 && !token.contains('=') {
            updates.push(FieldUpdate::Name((*token).to_string()));
        } else {
            updates.push(parse_assignment(token)?);
        }
    }
    Ok(updates)
}

fn parse_assignment(token: &str) -> Result<FieldUpdate, CommandError> {
    let (key, value) = token.split_once('=').ok_or_else(|| {
        CommandError::InvalidArguments(format!("expected field=value, got `{}`", token))
    })?;
    field_update(key, value)
}

fn field_update(key: &str, value: &str) -> Result<FieldUpdate, CommandError> {
    match key.to_ascii_lowercase().as_str() {
        "name" => Ok(FieldUpdate::Name(value.to_string())),
        "type" if value.trim().is_empty() => Ok(FieldUpdate::Kind(None)),
        "type" => value
            .parse::<CategoryKind>()
            .map(|kind| FieldUpdate::Kind(Some(kind)))
            .map_err(|err| CommandError::InvalidArguments(err.to_string())),
        "color" => Ok(FieldUpdate::Color(value.trim().to_string())),
        "default" => parse_flag(value).map(FieldUpdate::IsDefault),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown field `{}` (expected name, type, color or default)",
            other
        ))),
    }
}

pub(crate) fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected true or false, got `{}`",
            other
        ))),
    }
}

fn apply_update(context: &mut ShellContext, update: FieldUpdate) -> CommandResult {
    if let FieldUpdate::Color(color) = &update {
        if !is_hex_color(color) {
            cli_io::print_warning(format!(
                "`{}` is not a #rrggbb color; it will be saved as entered.",
                color
            ));
        }
    }
    context.view.set_modal_field(update)?;
    Ok(())
}

fn fill_and_submit(context: &mut ShellContext, updates: Vec<FieldUpdate>) -> CommandResult {
    if updates.is_empty() && context.mode == CliMode::Interactive {
        prompt_form(context)?;
    } else {
        for update in updates {
            apply_update(context, update)?;
        }
    }
    submit(context)
}

/// Walks every field with dialoguer prompts seeded from the open form.
fn prompt_form(context: &mut ShellContext) -> CommandResult {
    let Some(form) = context.view.modal().map(|modal| modal.form().clone()) else {
        return Err(CommandError::InvalidArguments("no form is open".into()));
    };
    let theme = &context.theme;

    let name = cli_io::prompt_text(theme, "Category name", &form.name)?;
    let options = CategoryFormModal::kind_options();
    let labels: Vec<&str> = options.iter().map(|option| option.label).collect();
    let current = form
        .kind
        .and_then(|kind| options.iter().position(|option| option.value == kind.value()))
        .unwrap_or(0);
    let choice = cli_io::prompt_choice(theme, "Type", &labels, current)?;
    let color = cli_io::prompt_text(theme, "Color", &form.color)?;
    let is_default = cli_io::confirm_action(theme, "Set as default category?", form.is_default)?;

    let kind = options
        .get(choice)
        .and_then(|option| option.value.parse::<CategoryKind>().ok());
    apply_update(context, FieldUpdate::Name(name))?;
    apply_update(context, FieldUpdate::Kind(kind))?;
    apply_update(context, FieldUpdate::Color(color))?;
    apply_update(context, FieldUpdate::IsDefault(is_default))?;
    Ok(())
}

fn submit(context: &mut ShellContext) -> CommandResult {
    match context.view.submit_modal() {
        None => Err(CommandError::InvalidArguments("no form is open".into())),
        Some(SubmitOutcome::Saved { .. }) => {
            render_list(context);
            Ok(())
        }
        Some(SubmitOutcome::Invalid(_)) | Some(SubmitOutcome::Failed) => {
            cli_io::print_info(FORM_KEPT);
            Ok(())
        }
        Some(SubmitOutcome::Busy) => {
            cli_io::print_warning("A save is already in progress.");
            Ok(())
        }
    }
}

fn show_form(context: &ShellContext) {
    let Some(modal) = context.view.modal() else {
        return;
    };
    let form = modal.form();
    output::section(modal.title());
    cli_io::print_info(format!("  name:    {}", form.name));
    cli_io::print_info(format!(
        "  type:    {}",
        form.kind.map(|kind| kind.to_string()).unwrap_or_default()
    ));
    cli_io::print_info(format!("  color:   {}", form.color));
    cli_io::print_info(format!("  default: {}", form.is_default));
    cli_io::print_info(format!("Type `save` to {}.", modal.submit_label().to_ascii_lowercase()));
}

pub(crate) fn render_list(context: &ShellContext) {
    match context.view.render() {
        ListRender::Loading => cli_io::print_info("Loading categories..."),
        ListRender::Error { message } => {
            cli_io::print_error(message);
            cli_io::print_info("Type `retry` to load again.");
        }
        ListRender::Empty {
            message,
            description,
            action_label,
        } => {
            output::section("Categories");
            cli_io::print_warning(message);
            cli_io::print_info(description);
            cli_io::print_info(format!("{}: `add <name>`", action_label));
        }
        ListRender::Cards(cards) => {
            output::section("Categories");
            println!("{}", build_table(&cards).render());
        }
    }
}

fn build_table(cards: &[CategoryCard]) -> Table {
    let prefs = current_preferences();
    let mut table = Table::new(vec![
        TableColumn::right("#", 1),
        TableColumn::left("NAME", 10).with_max_width(32),
        TableColumn::left("TYPE", 7),
        TableColumn::left("COLOR", 7),
        TableColumn::left("DEFAULT", 7),
    ]);
    for (index, card) in cards.iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            card.name.clone(),
            paint_badge(card.badge.label, card.badge.variant, &prefs),
            card.color.clone(),
            card.default_badge
                .as_ref()
                .map(|badge| paint_badge(badge.label, badge.variant, &prefs))
                .unwrap_or_default(),
        ]);
    }
    table
}
