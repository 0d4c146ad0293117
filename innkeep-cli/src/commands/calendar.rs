//! Calendar commands: `calendar show` and `calendar edit`.
//!
//! `show` renders a month of occupancy and, given `--session`, remembers the
//! block maps it displayed. `edit` diffs the requested changes against those
//! remembered maps, so blocks added by someone else after the view are left
//! alone. Without a session the live blocks stand in for the shown ones.

use std::io::Write;

use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use innkeep::calendar::build_calendar;
use innkeep::operations::{reconcile, CalendarForm, ReconcileOptions, ReconcileSummary};
use innkeep::{store_calendar, Config, Database, Month, RoomCalendar, RoomId, SnapshotStore};

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_month, parse_room_day, parse_room_id, GlobalOptions,
    OutputFormat,
};

/// Show or edit the occupancy calendar.
#[derive(Args)]
pub struct CalendarCommand {
    #[command(subcommand)]
    pub action: CalendarAction,
}

/// Calendar subcommands.
#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show a month of reservations and blocks
    Show(ShowArgs),

    /// Add or remove owner blocks
    Edit(EditArgs),
}

/// Arguments for `calendar show`.
#[derive(Args)]
pub struct ShowArgs {
    /// Month to show (YYYY-MM); defaults to the current month
    #[arg(long, value_name = "MONTH", value_parser = parse_month)]
    pub month: Option<Month>,

    /// Remember the displayed blocks for a later `calendar edit`
    #[arg(long, value_name = "SESSION")]
    pub session: Option<String>,

    /// Output format (table or json)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `calendar edit`.
#[derive(Args)]
pub struct EditArgs {
    /// Month being edited (YYYY-MM)
    #[arg(long, value_name = "MONTH", value_parser = parse_month)]
    pub month: Month,

    /// Session whose displayed calendar the edit applies to
    #[arg(long, value_name = "SESSION")]
    pub session: Option<String>,

    /// Remove the block on a day (repeatable)
    #[arg(long, value_name = "ROOM:DATE", value_parser = parse_room_day)]
    pub remove: Vec<(RoomId, NaiveDate)>,

    /// Add a block on a day (repeatable)
    #[arg(long, value_name = "ROOM:DATE", value_parser = parse_room_day)]
    pub add: Vec<(RoomId, NaiveDate)>,

    /// Raw checkbox field name, as posted by the calendar form (repeatable).
    /// Shown blocks without a matching field are removed.
    #[arg(long, value_name = "NAME", conflicts_with = "remove")]
    pub field: Vec<String>,

    /// Only edit these rooms (repeatable)
    #[arg(long, value_name = "ID", value_parser = parse_room_id)]
    pub room: Vec<RoomId>,

    /// Report the changes without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl CalendarCommand {
    /// Execute the calendar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self.action {
            CalendarAction::Show(args) => show(&db, &config, args),
            CalendarAction::Edit(args) => edit(&mut db, &config, global, args),
        }
    }
}

fn show(db: &Database, config: &Config, args: ShowArgs) -> Result<(), CliError> {
    let month = args
        .month
        .unwrap_or_else(|| Month::containing(Utc::now().date_naive()));
    let calendars = build_calendar(db, month)?;

    if let Some(ref session) = args.session {
        let store = SnapshotStore::new(db).with_ttl(config.session_ttl());
        store_calendar(&store, session, month, &calendars)?;
    }

    match OutputFormat::resolve(args.format, config) {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &calendars)?;
            writeln!(handle)?;
            Ok(())
        }
        OutputFormat::Table => print_grid(month, &calendars),
        OutputFormat::Csv => Err(CliError::InvalidArguments(
            "calendar show supports table and json output".into(),
        )),
    }
}

/// One character per day: `R` reserved, `B` blocked, `.` free.
fn day_cell(calendar: &RoomCalendar, day: NaiveDate) -> char {
    let reserved = calendar.maps.reservations.occupant(day).unwrap_or(0) != 0;
    let blocked = calendar.maps.blocks.occupant(day).unwrap_or(0) != 0;
    match (reserved, blocked) {
        (true, _) => 'R',
        (false, true) => 'B',
        (false, false) => '.',
    }
}

fn print_grid(month: Month, calendars: &[RoomCalendar]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let days: Vec<NaiveDate> = month.days().collect();
    let name_width = calendars
        .iter()
        .map(|c| c.room.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    writeln!(handle, "{month}")?;
    let tens: String = days.iter().map(|d| day_digit(d, 10)).collect();
    let units: String = days.iter().map(|d| day_digit(d, 1)).collect();
    writeln!(handle, "{:name_width$}  {tens}", "")?;
    writeln!(handle, "{:name_width$}  {units}", "ROOM")?;

    for calendar in calendars {
        let row: String = days.iter().map(|d| day_cell(calendar, *d)).collect();
        writeln!(handle, "{:name_width$}  {row}", calendar.room.to_string())?;
    }
    writeln!(handle)?;
    writeln!(handle, "R = reserved, B = blocked, . = free")?;

    Ok(())
}

fn day_digit(day: &NaiveDate, place: u32) -> char {
    use chrono::Datelike;
    char::from_digit(day.day() / place % 10, 10).unwrap_or(' ')
}

fn build_form(args: &EditArgs) -> CalendarForm {
    if !args.field.is_empty() {
        let mut form = CalendarForm::from_field_names(&args.field);
        for &(room, day) in &args.add {
            form = form.add(room, day);
        }
        return form;
    }

    let mut form = CalendarForm::edits();
    for &(room, day) in &args.remove {
        form = form.remove(room, day);
    }
    for &(room, day) in &args.add {
        form = form.add(room, day);
    }
    form
}

fn edit(
    db: &mut Database,
    config: &Config,
    global: &GlobalOptions,
    args: EditArgs,
) -> Result<(), CliError> {
    let mut options = ReconcileOptions::new(args.month, build_form(&args)).with_dry_run(args.dry_run);
    if !args.room.is_empty() {
        options = options.with_rooms(args.room.clone());
    }

    if let Some(ref session) = args.session {
        let rooms = if args.room.is_empty() {
            Database::list_rooms(db.connection())?
                .iter()
                .map(innkeep::Room::id)
                .collect()
        } else {
            args.room.clone()
        };
        let store = SnapshotStore::new(&*db).with_ttl(config.session_ttl());
        options = options.with_session_snapshots(&store, session, &rooms)?;
    }

    let summary = reconcile(db, &options)?;
    report(&summary, global);

    // Later edits in this session apply to what is stored now
    if let Some(session) = args.session.as_deref().filter(|_| !args.dry_run) {
        let calendars = build_calendar(&*db, args.month)?;
        let store = SnapshotStore::new(&*db).with_ttl(config.session_ttl());
        store_calendar(&store, session, args.month, &calendars)?;
    }

    if summary.is_clean() {
        Ok(())
    } else {
        Err(CliError::PartialFailure(summary.flash_message()))
    }
}

fn report(summary: &ReconcileSummary, global: &GlobalOptions) {
    if summary.is_clean() {
        println!("{}", summary.flash_message());
    }
    if global.quiet {
        return;
    }
    if summary.dry_run || global.verbose {
        for action in &summary.actions {
            eprintln!("  - {action}");
        }
    }
    for warning in &summary.warnings {
        eprintln!("Warning: {warning}");
    }
    for failure in &summary.failures {
        eprintln!("Failed: {} ({})", failure.action, failure.error);
    }
    for failure in &summary.parse_failures {
        eprintln!("Ignored field {}: {}", failure.field, failure.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeep::stay::parse_date;

    fn args(remove: &[&str], add: &[&str], field: &[&str]) -> EditArgs {
        EditArgs {
            month: Month::new(2024, 7).unwrap(),
            session: None,
            remove: remove.iter().map(|s| parse_room_day(s).unwrap()).collect(),
            add: add.iter().map(|s| parse_room_day(s).unwrap()).collect(),
            field: field.iter().map(|s| (*s).to_string()).collect(),
            room: Vec::new(),
            dry_run: false,
        }
    }

    fn room(id: i64) -> RoomId {
        RoomId::try_from(id).unwrap()
    }

    #[test]
    fn test_explicit_edits_keep_unmentioned_blocks() {
        let form = build_form(&args(&["1:2024-07-15"], &["2:2024-07-22"], &[]));
        assert!(!form.keeps(room(1), parse_date("2024-07-15").unwrap()));
        assert!(form.keeps(room(1), parse_date("2024-07-20").unwrap()));
        assert_eq!(form.additions().len(), 1);
    }

    #[test]
    fn test_field_names_use_checkbox_semantics() {
        let form = build_form(&args(&[], &[], &["remove_block_1_2024-07-15"]));
        assert!(form.keeps(room(1), parse_date("2024-07-15").unwrap()));
        assert!(!form.keeps(room(1), parse_date("2024-07-20").unwrap()));
    }

    #[test]
    fn test_day_digits() {
        let day = parse_date("2024-07-25").unwrap();
        assert_eq!(day_digit(&day, 10), '2');
        assert_eq!(day_digit(&day, 1), '5');
    }
}
