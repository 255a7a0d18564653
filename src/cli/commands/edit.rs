use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::{EditOutcome, FieldEditor, field_value};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Session, SessionField};
use crate::ui::messages::{confirm, header, info, success};
use crate::utils::colors::{GREEN, RESET, YELLOW};
use crate::utils::time::secs2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        field,
        value,
        yes,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;
        let mut editor = FieldEditor::new(&mut pool);

        let before = editor.select(*id, *field)?;
        let preview = editor.propose(value)?;

        header(format!("Edit session #{}", id));
        print_change(&before, &preview, *field, &cfg.currency);

        if !*yes && !confirm("Apply this change?") {
            editor.cancel();
            info("Edit cancelled. Session unchanged.");
            return Ok(());
        }

        if let EditOutcome::Committed(after) = editor.confirm()? {
            success(format!("Session #{} updated ({}).", after.id, field.label()));
        }
    }

    Ok(())
}

fn print_change(before: &Session, after: &Session, field: SessionField, currency: &str) {
    println!(
        "{:<12} {YELLOW}{}{RESET} → {GREEN}{}{RESET}",
        field.label(),
        field_value(before, field),
        field_value(after, field)
    );

    if field.affects_derived() {
        println!(
            "{:<12} {YELLOW}{}{RESET} → {GREEN}{}{RESET}",
            "duration",
            secs2readable(before.duration_secs),
            secs2readable(after.duration_secs)
        );
        println!(
            "{:<12} {YELLOW}{:.2}{cur}{RESET} → {GREEN}{:.2}{cur}{RESET}",
            "earnings",
            before.earnings,
            after.earnings,
            cur = currency
        );
    }
    println!();
}
