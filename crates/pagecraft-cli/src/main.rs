mod app;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pagecraft_config::Config;
use pagecraft_engine::render::{html, text};
use pagecraft_engine::{Route, io};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, fs::File, io::{Stdout, stdout}, process};

use app::{App, View, share_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Terminal,
    Text,
    Html,
    Share,
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Warn);

    // The terminal UI owns stdout, so logs go to a file when one is named
    if let Ok(path) = env::var("PAGECRAFT_LOG") {
        match File::create(&path) {
            Ok(file) => {
                builder
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: could not open log file {path}: {e}"),
        }
    }
    builder.init();
}

fn usage(program: &str) -> String {
    format!("Usage: {program} [--read-only] [--init-config] [--print | --html | --share] [route-or-page-id]")
}

/// A bare page id opens that page, anything starting with `/` is a route
fn parse_route(arg: &str) -> Route {
    if arg.starts_with('/') {
        Route::parse(arg)
    } else {
        Route::Page(arg.to_string())
    }
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pagecraft-cli");
    let config_path = Config::config_path();
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", config_path.display());
            process::exit(1);
        }
    };

    let mut read_only = config.read_only;
    let mut output = Output::Terminal;
    let mut route = Route::Home;
    let mut init_config = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--read-only" => read_only = true,
            "--print" => output = Output::Text,
            "--html" => output = Output::Html,
            "--share" => output = Output::Share,
            "--init-config" => init_config = true,
            "-h" | "--help" => {
                println!("{}", usage(program));
                return Ok(());
            }
            flag if flag.starts_with("--") => {
                eprintln!("Error: unknown option {flag}");
                eprintln!("{}", usage(program));
                process::exit(1);
            }
            other => route = parse_route(other),
        }
    }

    if init_config {
        let config = Config {
            read_only,
            ..config
        };
        match config.save() {
            Ok(()) => println!("Wrote config to {}", config_path.display()),
            Err(e) => {
                eprintln!("Error: could not write {}: {e}", config_path.display());
                process::exit(1);
            }
        }
        return Ok(());
    }

    let store = match io::open_store(config.pages_path.as_deref()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut app = App::new(store, read_only, config.public_base_url.clone());
    app.open(route);
    log::info!("pagecraft starting, read_only={}", app.is_read_only());

    if output != Output::Terminal {
        return print_view(&app, output, &config.public_base_url);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn print_view(app: &App, output: Output, public_base_url: &str) -> Result<()> {
    match &app.view {
        View::Page { header, editor, .. } => {
            let snapshot = editor.snapshot();
            match output {
                Output::Html => println!(
                    "{}",
                    html::to_page_html(
                        &header.emoji,
                        header.display_title(),
                        &header.last_edited,
                        &snapshot
                    )
                ),
                Output::Share => println!("{}", share_summary(header, public_base_url)),
                _ => {
                    println!("{} {}", header.emoji, header.display_title());
                    println!();
                    for line in text::to_lines(&snapshot) {
                        println!("{line}");
                    }
                }
            }
        }
        View::Database { table, .. } => {
            let titles: Vec<_> = table.columns.iter().map(|c| c.title.as_str()).collect();
            println!("{}", titles.join("\t"));
            for row in &table.rows {
                let cells: Vec<_> = table
                    .columns
                    .iter()
                    .map(|c| row.get(&c.id).unwrap_or_default())
                    .collect();
                println!("{}", cells.join("\t"));
            }
        }
        View::NotFound(_) => {
            eprintln!("{}", pagecraft_engine::PageView::NOT_FOUND_MESSAGE);
            process::exit(1);
        }
    }
    Ok(())
}
