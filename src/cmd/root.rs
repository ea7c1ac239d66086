use crate::calc::MonthCursor;
use crate::data::AppSettings;
use crate::picker::PickerSession;
use crate::ui::picker_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let cursor = settings
        .initial_month_date()
        .map(MonthCursor::from_date)
        .unwrap_or_else(|| MonthCursor::from_date(today));
    let session = PickerSession::new(&settings, cursor);
    let mut app = App::new(session, today);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // The host owns what happens to the committed value; here it goes to
    // stdout once the terminal is back to normal.
    if let Some(value) = app.last_committed() {
        println!("{value}");
    }

    result
}
