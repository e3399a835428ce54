//! Wordle CSP CLI
//!
//! Command-line front end for the constraint-propagation solver.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::info;
use wordle_csp::{
    analyze_patterns, Dictionary, FeedbackPattern, PatternAnalysis, Session, SessionState,
    SolverConfig, Strategy,
};

const HELP_TEXT: &str = include_str!("text/help.txt");

#[derive(Debug, Parser)]
#[clap(name = "wordle-csp", version, about)]
struct Args {
    /// Dictionary file, one word per line (defaults to the bundled list)
    #[clap(short, long)]
    dictionary: Option<PathBuf>,

    /// Word length
    #[clap(short, long, default_value = "5")]
    length: usize,

    /// entropy, minimax, frequency, first or random
    #[clap(short, long, default_value = "entropy")]
    strategy: Strategy,

    #[clap(long, default_value = "6")]
    max_attempts: usize,

    /// Seed for the random strategy
    #[clap(long)]
    seed: Option<u64>,

    /// Compute the first guess instead of using the list of known openers
    #[clap(long)]
    no_opening_book: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive assistant (default)
    Interactive,
    /// Play automatically against a known secret word
    Solve { target: String },
    /// Print the best opening guess
    Suggest,
    /// Letter statistics for the dictionary
    Analyze,
    /// Solve every dictionary word and report the guess distribution
    Bench,
}

impl Args {
    fn config(&self) -> SolverConfig {
        let mut config = SolverConfig::new()
            .with_word_length(self.length)
            .with_max_attempts(self.max_attempts)
            .with_opening_book(!self.no_opening_book);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn dictionary(&self) -> wordle_csp::Result<Dictionary> {
        match &self.dictionary {
            Some(path) => Dictionary::load(path, self.length),
            None => Ok(Dictionary::embedded()),
        }
    }
}

fn print_analysis(analysis: &PatternAnalysis) {
    println!("Words analysed: {}", analysis.total_words);
    println!("Most common letters:");
    for (letter, count) in &analysis.common_letters {
        println!("  {} {:>6}", letter.to_ascii_uppercase(), count);
    }
    println!("Top letters by position:");
    for (pos, letters) in &analysis.position_letters {
        let row: Vec<String> = letters
            .iter()
            .map(|(l, c)| format!("{}:{}", l.to_ascii_uppercase(), c))
            .collect();
        let vowels = analysis.vowel_positions.get(pos).copied().unwrap_or(0);
        println!("  {}: {}  (vowels {})", pos + 1, row.join(" "), vowels);
    }
    let affixes = |list: &[(String, usize)]| {
        list.iter()
            .map(|(s, c)| format!("{}({})", s, c))
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!("Common prefixes: {}", affixes(&analysis.common_prefixes));
    println!("Common suffixes: {}", affixes(&analysis.common_suffixes));
}

fn print_history(guesses: &[(String, FeedbackPattern)]) {
    for (i, (guess, pattern)) in guesses.iter().enumerate() {
        println!("Guess {}: {} → {}", i + 1, guess.to_uppercase(), pattern);
    }
}

fn run_interactive(mut session: Session, mut strategy: Strategy) -> io::Result<()> {
    println!("Wordle CSP solver, {} words loaded.", session.dictionary().len());
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => println!("{}", HELP_TEXT),
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" | "best" => match session.best_guess(strategy) {
                Some(word) => {
                    println!();
                    println!("Best guess ({}): {}", strategy, word.to_uppercase());
                    println!("Remaining possibilities: {}", session.remaining_count());
                    println!();
                }
                None => println!("No possible words remaining. Use 'reset' to start over."),
            },
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                let top = session.top_guesses(n);
                if top.is_empty() {
                    println!("No possible words remaining.");
                    continue;
                }
                println!();
                println!("{:>4} {:>8} {:>8} {:>12} Possible?", "#", "Word", "Entropy", "Exp. Remain");
                println!("{}", "-".repeat(50));
                for (i, analysis) in top.iter().enumerate() {
                    println!(
                        "{:>4} {:>8} {:>8.3} {:>12.1} {}",
                        i + 1,
                        analysis.word.to_uppercase(),
                        analysis.entropy,
                        analysis.expected_remaining,
                        if analysis.is_possible_answer { "✓" } else { "" }
                    );
                }
                println!();
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    println!("Example: feedback crane gybbb");
                    continue;
                }
                let word = parts[1].to_lowercase();
                let pattern = match FeedbackPattern::parse(parts[2]) {
                    Some(p) => p,
                    None => {
                        println!("Invalid pattern: {}", parts[2]);
                        println!("Use g=green, y=yellow, b=gray");
                        continue;
                    }
                };

                let before = session.remaining_count();
                match session.apply_pattern(&word, pattern) {
                    Ok(state) => {
                        let after = session.remaining_count();
                        println!();
                        println!("{} {}", word.to_uppercase(), pattern);
                        println!("Eliminated {} words ({} → {})", before - after, before, after);
                        match state {
                            SessionState::Solved => println!("Solved!"),
                            SessionState::Stuck => {
                                println!("No words match this feedback. Use 'reset' to start over.")
                            }
                            SessionState::Exhausted => println!("Out of attempts."),
                            _ if after <= 10 => println!("Remaining: {}", session.possible_words().join(" ")),
                            _ => {}
                        }
                        println!();
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "remaining" | "r" | "left" => {
                let remaining = session.possible_words();
                println!("Remaining possibilities: {}", remaining.len());
                for chunk in remaining.chunks(10) {
                    println!("  {}", chunk.join(" "));
                }
            }
            "stats" => {
                let stats = session.stats();
                println!("Dictionary words:  {}", stats.total_words);
                println!("Possible words:    {}", stats.possible_words);
                println!("Elimination rate:  {:.1}%", stats.elimination_rate * 100.0);
                println!("Attempts:          {}/{}", stats.attempts, stats.max_attempts);
                println!("State:             {}", stats.state);
            }
            "analyze" => {
                let words: Vec<&str> = session.possible_words().iter().map(String::as_str).collect();
                match analyze_patterns(&words) {
                    Some(analysis) => print_analysis(&analysis),
                    None => println!("No possible words remaining."),
                }
            }
            "strategy" => match parts.get(1).map(|s| s.parse::<Strategy>()) {
                Some(Ok(s)) => {
                    strategy = s;
                    println!("Strategy: {}", strategy);
                }
                Some(Err(e)) => println!("{}", e),
                None => println!("Strategy: {}", strategy),
            },
            "reset" => {
                session.reset();
                println!("Reset. {} words available.", session.remaining_count());
            }
            other => {
                println!("Unknown command: {}", other);
                println!("Type 'help' for available commands.");
            }
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let dictionary = Arc::new(args.dictionary()?);
    info!("dictionary has {} words", dictionary.len());
    let mut session = Session::new(dictionary, args.config())?;

    match args.command.unwrap_or(Command::Interactive) {
        Command::Interactive => run_interactive(session, args.strategy)?,
        Command::Solve { target } => {
            println!("Solving for: {}", target.to_uppercase());
            println!();
            let guesses = session.solve_for_target(args.strategy, &target)?;
            print_history(&guesses);
            println!();
            match session.state() {
                SessionState::Solved => println!("Solved in {} guesses.", guesses.len()),
                state => println!("Not solved ({}).", state),
            }
        }
        Command::Suggest => match session.best_guess(args.strategy) {
            Some(word) => println!("Best opening guess: {}", word.to_uppercase()),
            None => eprintln!("No words available."),
        },
        Command::Analyze => {
            let words: Vec<&str> = session.dictionary().words().iter().map(String::as_str).collect();
            match analyze_patterns(&words) {
                Some(analysis) => print_analysis(&analysis),
                None => eprintln!("No words available."),
            }
        }
        Command::Bench => {
            let start = Instant::now();
            let distribution = session.benchmark(args.strategy);
            let elapsed = start.elapsed();

            let total: usize = distribution.iter().map(|(_, c)| c).sum();
            let max_attempts = session.config().max_attempts;
            println!("Guess distribution ({}):", args.strategy);
            for (guesses, count) in &distribution {
                let pct = *count as f64 / total.max(1) as f64 * 100.0;
                let bar = "█".repeat((*count * 40 / total.max(1)).max(1));
                let label = if *guesses > max_attempts {
                    "failed".to_string()
                } else {
                    guesses.to_string()
                };
                println!("  {:>6}: {:>5} ({:>5.1}%) {}", label, count, pct, bar);
            }
            let solved: Vec<_> = distribution.iter().filter(|(g, _)| *g <= max_attempts).collect();
            let solved_games: usize = solved.iter().map(|(_, c)| c).sum();
            let solved_guesses: usize = solved.iter().map(|(g, c)| g * c).sum();
            if solved_games > 0 {
                println!("Average guesses when solved: {:.3}", solved_guesses as f64 / solved_games as f64);
            }
            println!("Time elapsed: {:.2?}", elapsed);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
