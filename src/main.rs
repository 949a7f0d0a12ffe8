// arkscope: ArkType definition parser and syntax-tree inspector

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{ArgGroup, Parser as ClapParser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};

use arkscope::parser::ast::SourceLocation;
use arkscope::parser::lexer::Lexer;
use arkscope::parser::{
    Parser, ParserConfig, SyntaxError, DEFAULT_MAX_DEPTH, DEFAULT_MAX_OPERATORS,
};
use arkscope::ui::App;

#[derive(ClapParser, Debug)]
#[command(
    name = "arkscope",
    version,
    about = "Parse ArkType definitions and inspect their syntax tree"
)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "expr"])))]
#[command(group(ArgGroup::new("output").args(["sexp", "json", "canonical", "tokens"])))]
struct Opt {
    /// File containing one definition
    file: Option<PathBuf>,

    /// Definition given on the command line
    #[arg(short = 'e', long = "expr")]
    expr: Option<String>,

    /// Maximum nesting depth before parsing fails
    #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum operators and array suffixes chained in one expression
    #[arg(long = "max-operators", default_value_t = DEFAULT_MAX_OPERATORS)]
    max_operators: usize,

    /// Print the tree as an S-expression
    #[arg(long = "sexp", default_value_t = false)]
    sexp: bool,

    /// Print the tree as JSON
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    /// Print the definition in canonical form
    #[arg(long = "canonical", default_value_t = false)]
    canonical: bool,

    /// Print the token stream
    #[arg(long = "tokens", default_value_t = false)]
    tokens: bool,

    /// Log parser decisions to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opt {
    fn wants_tui(&self) -> bool {
        !(self.sexp || self.json || self.canonical || self.tokens)
    }
}

/// Install the stderr logger for `-v`/`-vv`; returns whether one was installed
fn init_logging(opt: &Opt) -> Result<bool, log::SetLoggerError> {
    // Log lines would tear the alternate screen, so only dump modes get them
    if opt.verbose == 0 || opt.wants_tui() {
        return Ok(false);
    }
    let level = if opt.verbose > 1 {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init()?;
    Ok(true)
}

fn report(source: &str, err: &SyntaxError) {
    let location = SourceLocation::from_offset(source, err.offset());
    eprintln!(
        "Syntax error at {}:{}: {}",
        location.line, location.column, err
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();

    init_logging(&opt)?;

    let (name, source) = if let Some(expr) = &opt.expr {
        ("<expr>".to_string(), expr.clone())
    } else if let Some(path) = &opt.file {
        match fs::read_to_string(path) {
            Ok(source) => (path.display().to_string(), source),
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("Error: no input provided; pass a FILE or --expr");
        std::process::exit(1);
    };

    if opt.tokens {
        for token in Lexer::new(&source) {
            match token {
                Ok(token) => {
                    let span = token.span();
                    println!("{:>5}..{:<5} {}", span.start, span.end, token);
                }
                Err(e) => {
                    report(&source, &e);
                    std::process::exit(1);
                }
            }
        }
        return Ok(());
    }

    let config = ParserConfig::new()
        .with_max_depth(opt.max_depth)
        .with_max_operators(opt.max_operators);

    // Parse the source code
    if opt.wants_tui() {
        eprintln!("Parsing {}...", name);
    }
    let parsed = Parser::with_config(&source, config).and_then(|mut p| p.parse_source_file());

    if !opt.wants_tui() {
        let file = match parsed {
            Ok(file) => file,
            Err(e) => {
                report(&source, &e);
                std::process::exit(1);
            }
        };
        if opt.sexp {
            println!("{}", file.syntax().to_sexp());
        } else if opt.json {
            println!("{}", serde_json::to_string_pretty(&file)?);
        } else {
            println!("{}", file);
        }
        return Ok(());
    }

    match &parsed {
        Ok(file) => eprintln!(
            "Parsed successfully. Found {} node(s).",
            file.syntax().node_count()
        ),
        Err(e) => {
            report(&source, e);
            eprintln!("Entering TUI with the error highlighted...");
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(source, parsed);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
