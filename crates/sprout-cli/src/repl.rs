use std::io::{self, Write};

use owo_colors::OwoColorize;
use sprout_engine::{RunConfig, Runner, RunStatus};
use sprout_matcher::Matcher;
use sprout_scanner::LineScanner;

/// Interactive playground: type a snippet line by line, then run it.
///
/// An empty line after some input runs the buffer, mirroring how the lesson
/// widget's "Run" button behaves. Each run is independent: fresh bindings,
/// fresh iteration budget.
pub fn start_playground() {
    println!(
        "{}",
        "Sprout playground. Type code, then an empty line to run it. :help for help."
            .bold()
            .green()
    );

    let mut runner = Runner::new(RunConfig::default());
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() {
            "sprout> ".cyan().to_string()
        } else {
            "   ...> ".cyan().to_string()
        };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            // EOF
            if !buffer.trim().is_empty() {
                run_buffer(&mut runner, &buffer);
            }
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => {
                    println!("Goodbye.");
                    break;
                }
                ":help" | ":h" => {
                    println!(
                        "{}\n  {}  {}\n  {}  {}\n  {}  {}\n  {}  {}",
                        "Commands:".bold(),
                        ":run".yellow(),
                        "Run the buffered snippet",
                        ":vars".yellow(),
                        "Show variables from the last run",
                        ":clear".yellow(),
                        "Discard the buffered snippet",
                        ":quit".yellow(),
                        "Exit the playground"
                    );
                    println!("An empty line after some input also runs the snippet.");
                    continue;
                }
                ":vars" => {
                    print_vars(&runner);
                    continue;
                }
                ":clear" => {
                    buffer.clear();
                    println!("{}", "Buffer cleared.".yellow());
                    continue;
                }
                ":run" => {
                    if buffer.trim().is_empty() {
                        println!("{}", "<nothing to run>".dimmed());
                    } else {
                        run_buffer(&mut runner, &buffer);
                        buffer.clear();
                    }
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        // An empty line runs the buffered snippet.
        if trimmed.is_empty() {
            if !buffer.trim().is_empty() {
                run_buffer(&mut runner, &buffer);
                buffer.clear();
            }
            continue;
        }

        buffer.push_str(&line);
    }
}

fn run_buffer(runner: &mut Runner, source: &str) {
    let lines = LineScanner::new(source).scan();
    let snippet = Matcher::new(lines).match_snippet();
    let status = runner.run(&snippet);
    for line in runner.output() {
        println!("{}", line.bright_blue());
    }
    match status {
        RunStatus::Ok => {}
        RunStatus::IterationCapExceeded => println!(
            "{}",
            "The loop ran too many times. Does your loop variable change inside the loop?"
                .yellow()
        ),
        RunStatus::NoOutput => {
            println!("{}", "Nothing was printed. Try adding a print(...).".yellow())
        }
    }
}

fn print_vars(runner: &Runner) {
    let mut vars = runner.vars_snapshot();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (k, v) in vars {
        println!("{} = {}", k.yellow(), format!("{}", v).bright_blue());
    }
}
