// Quokka: lexer, parser and token explorer

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use quokka::parser::parse::Parser;
use quokka::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--check] <file.qk>", program_name);
    eprintln!();
    eprintln!("  {} program.qk          # Explore tokens and syntax tree", program_name);
    eprintln!("  {} --check program.qk  # Print the parsed program and errors", program_name);
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("quokka");

    let (check_only, file) = match args.get(1).map(|s| s.as_str()) {
        Some("--check") => (true, args.get(2)),
        Some(_) => (false, args.get(1)),
        None => (false, None),
    };

    let Some(file) = file else {
        print_usage(program_name);
        return Ok(ExitCode::FAILURE);
    };

    if !Path::new(file).exists() {
        eprintln!("Error: File '{}' not found", file);
        print_usage(program_name);
        return Ok(ExitCode::FAILURE);
    }

    let source = fs::read_to_string(file)?;

    if check_only {
        return Ok(check(&source));
    }

    eprintln!("Parsing {}...", file);
    let app = App::new(source);
    eprintln!(
        "Parsed {} statements with {} errors.",
        app.program.statements.len(),
        app.errors.len()
    );
    for err in &app.errors {
        eprintln!("{}", err);
    }

    run_explorer(app)?;
    Ok(ExitCode::SUCCESS)
}

/// Print the canonical rendering and every error; fail if any error was recorded
fn check(source: &str) -> ExitCode {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();

    println!("{}", program);
    for err in parser.errors() {
        eprintln!("{}", err);
    }

    if parser.errors().is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_explorer(mut app: App) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {:?}", err);
    }

    res
}
