use roost_core::init_logging;

mod app;
mod commands;
mod picker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Logs are quiet unless -v is given
    let quiet = !matches.get_flag("verbose");
    init_logging(quiet);

    commands::run_command(&matches)?;

    Ok(())
}
